//! Client side of the `/api/core` lock RPCs.
//!
//! Both calls resolve to `Ok(None)` when the repository accepted the
//! operation and `Ok(Some(message))` when it refused; `Err` means the call
//! itself failed.

use common::model::lock::LockResponse;
use common::requests::LockRequest;
use gloo_net::http::Request;

pub async fn lock(uri: &str) -> Result<Option<String>, String> {
    call("/api/core/lock", uri).await
}

pub async fn unlock(uri: &str) -> Result<Option<String>, String> {
    call("/api/core/unlock", uri).await
}

async fn call(path: &str, uri: &str) -> Result<Option<String>, String> {
    let response = Request::post(path)
        .json(&LockRequest {
            uri: uri.to_string(),
        })
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.ok() {
        return Err(format!(
            "HTTP {}: {}",
            response.status(),
            response.text().await.unwrap_or_default()
        ));
    }

    response
        .json::<LockResponse>()
        .await
        .map(|answer| answer.error)
        .map_err(|e| e.to_string())
}
