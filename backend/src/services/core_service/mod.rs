//! # Core Service Module
//!
//! Resource lock RPCs used by the editors before and after changing a resource.
//!
//! ## Registered Routes:
//!
//! *   **`POST /api/core/lock`** and **`POST /api/core/unlock`**:
//!     - **Body**: `{"uri": "<resource uri>"}`
//!     - **Answer**: `200` with `{"error": null}` when the repository accepted the
//!       operation, or `{"error": "<message>"}` when it refused it. Any other
//!       repository failure is logged and answered with `500`.
//!
//! The acting user is read from the `X-Cms-User` header.

mod lock;
mod unlock;

use crate::repository::{RepositoryError, ResourceRepository};
use actix_web::web::{post, scope};
use actix_web::{HttpRequest, HttpResponse, Scope};
use common::model::lock::LockResponse;
use log::error;

const API_PATH: &str = "/api/core";

/// Header naming the user on whose behalf a lock operation runs.
pub const USER_HEADER: &str = "X-Cms-User";

const DEFAULT_USER: &str = "Admin";

/// Configures the lock routes against the repository type registered as app data.
pub fn configure_routes<R: ResourceRepository + 'static>() -> Scope {
    scope(API_PATH)
        .route("/lock", post().to(lock::process::<R>))
        .route("/unlock", post().to(unlock::process::<R>))
}

fn current_user(req: &HttpRequest) -> String {
    req.headers()
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_USER)
        .to_string()
}

/// Translates a repository answer into the RPC response.
fn respond(operation: &str, uri: &str, result: Result<(), RepositoryError>) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::Ok().json(LockResponse::ok()),
        Err(RepositoryError::Refused(message)) => {
            HttpResponse::Ok().json(LockResponse::refused(message))
        }
        Err(e) => {
            error!("{} of '{}' failed: {}", operation, uri, e);
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::LockTable;
    use actix_web::{http::StatusCode, test, web, App};
    use common::requests::LockRequest;

    fn lock_request(path: &str, uri: &str, user: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri(path)
            .insert_header((USER_HEADER, user.to_string()))
            .set_json(LockRequest {
                uri: uri.to_string(),
            })
    }

    #[actix_web::test]
    async fn lock_and_unlock_round() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(LockTable::default()))
                .service(configure_routes::<LockTable>()),
        )
        .await;

        let ok: LockResponse =
            test::call_and_read_body_json(&app, lock_request("/api/core/lock", "/index.html", "Admin").to_request())
                .await;
        assert_eq!(ok, LockResponse::ok());

        let refused: LockResponse = test::call_and_read_body_json(
            &app,
            lock_request("/api/core/lock", "/index.html", "Editor").to_request(),
        )
        .await;
        assert!(refused.error.unwrap().contains("locked by user 'Admin'"));

        let refused: LockResponse = test::call_and_read_body_json(
            &app,
            lock_request("/api/core/unlock", "/index.html", "Editor").to_request(),
        )
        .await;
        assert!(refused.error.is_some());

        let ok: LockResponse = test::call_and_read_body_json(
            &app,
            lock_request("/api/core/unlock", "/index.html", "Admin").to_request(),
        )
        .await;
        assert_eq!(ok.error, None);
    }

    #[actix_web::test]
    async fn unexpected_failures_are_server_errors() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(LockTable::default()))
                .service(configure_routes::<LockTable>()),
        )
        .await;

        let resp = test::call_service(&app, lock_request("/api/core/lock", " ", "Admin").to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn user_defaults_to_admin() {
        let req = test::TestRequest::default().to_http_request();
        assert_eq!(current_user(&req), "Admin");

        let req = test::TestRequest::default()
            .insert_header((USER_HEADER, " Editor "))
            .to_http_request();
        assert_eq!(current_user(&req), "Editor");
    }
}
