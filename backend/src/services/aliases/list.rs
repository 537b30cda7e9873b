use super::store::AliasStore;
use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(rename = "siteroot", default)]
    pub site_root: String,
}

pub async fn process(query: web::Query<ListQuery>, store: web::Data<AliasStore>) -> impl Responder {
    let store = store.get_ref().clone();
    let site_root = query.into_inner().site_root;

    match tokio::task::spawn_blocking(move || store.list(&site_root)).await {
        Ok(Ok(aliases)) => HttpResponse::Ok().json(aliases),
        Ok(Err(e)) => {
            error!("Listing aliases failed: {}", e);
            HttpResponse::InternalServerError().body(format!("Error: {}", e))
        }
        Err(join_err) => HttpResponse::InternalServerError().body(format!("join error: {}", join_err)),
    }
}

#[cfg(test)]
mod tests {
    use crate::services::aliases::configure_routes;
    use crate::services::aliases::store::AliasStore;
    use actix_web::{test, web, App};
    use common::model::alias::{AliasMode, AliasRecord};

    #[actix_web::test]
    async fn lists_aliases_of_one_site() {
        let dir = tempfile::tempdir().unwrap();
        let store = AliasStore::open(dir.path().join("aliases.sqlite")).unwrap();
        {
            let mut conn = store.connection().unwrap();
            let tx = conn.transaction().unwrap();
            for (site, alias) in [("/sites/a", "/z"), ("/sites/a", "/b"), ("/sites/b", "/c")] {
                let record = AliasRecord {
                    alias_path: alias.to_string(),
                    target_path: "/index.html".to_string(),
                    mode: AliasMode::Redirect,
                };
                crate::services::aliases::store::save(&tx, site, &record).unwrap();
            }
            tx.commit().unwrap();
        }

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store))
                .service(configure_routes()),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/api/aliases?siteroot=/sites/a")
            .to_request();
        let aliases: Vec<AliasRecord> = test::call_and_read_body_json(&app, req).await;

        let paths: Vec<&str> = aliases.iter().map(|a| a.alias_path.as_str()).collect();
        assert_eq!(paths, vec!["/b", "/z"]);
        assert_eq!(aliases[0].mode, AliasMode::Redirect);
    }
}
