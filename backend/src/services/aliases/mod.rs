//! Alias endpoints of the sitemap editor.
//!
//! The provided routes are:
//! - `POST /api/aliases/import`: bulk import from a CSV upload. The multipart form carries the
//!   site root in `siteroot` and exactly one file in `importfile`. Every CSV line is
//!   `aliasPath,targetPath[,mode]`; the answer is a `{"result": [...]}` document with one
//!   `aliasNew`, `aliasChanged` or `aliasError` row per non-blank line, in file order.
//!
//! - `GET /api/aliases?siteroot=...`: the aliases currently stored for a site, ordered by path.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod import;
mod list;
pub mod store;

const API_PATH: &str = "/api/aliases";

/// Configures and returns the Actix scope for alias routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/import", post().to(import::process))
        .route("", get().to(list::process))
}
