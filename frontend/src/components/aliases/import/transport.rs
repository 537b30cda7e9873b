//! Posts an `ImportRequest` as a browser multipart form.

use common::error::TransportError;
use common::exchange::ImportTransport;
use common::requests::{FormPart, ImportRequest};
use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use web_sys::FormData;

pub struct FormTransport;

impl ImportTransport for FormTransport {
    async fn submit(&self, request: &ImportRequest) -> Result<String, TransportError> {
        let form = build_form(request)?;

        // The browser chooses the multipart boundary when the body is FormData.
        let response = Request::post(request.target_url())
            .body(form)
            .map_err(|e| TransportError(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        if !response.ok() {
            return Err(TransportError(format!("HTTP {}: {}", status, body)));
        }
        Ok(body)
    }
}

fn build_form(request: &ImportRequest) -> Result<FormData, TransportError> {
    let form = FormData::new().map_err(js_error)?;
    for part in request.multipart_fields() {
        match part {
            FormPart::Text { name, value } => {
                form.append_with_str(name, value).map_err(js_error)?;
            }
            FormPart::File { name, file } => {
                let blob: web_sys::Blob =
                    gloo_file::Blob::new_with_options(file.bytes.as_slice(), Some(file.mime())).into();
                form.append_with_blob_and_filename(name, &blob, &file.name)
                    .map_err(js_error)?;
            }
        }
    }
    Ok(form)
}

fn js_error(value: JsValue) -> TransportError {
    TransportError(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
