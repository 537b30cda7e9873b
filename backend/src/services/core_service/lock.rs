use super::{current_user, respond};
use crate::repository::ResourceRepository;
use actix_web::{web, HttpRequest, Responder};
use common::requests::LockRequest;

pub async fn process<R: ResourceRepository + 'static>(
    req: HttpRequest,
    payload: web::Json<LockRequest>,
    repository: web::Data<R>,
) -> impl Responder {
    let user = current_user(&req);
    let result = repository.lock_resource(&payload.uri, &user).await;
    respond("Locking", &payload.uri, result)
}
