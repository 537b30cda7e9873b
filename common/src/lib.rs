//! Shared contract between the alias-import view and the server.
//!
//! Everything in here is plain data plus pure functions so both the wasm
//! frontend and the actix backend speak exactly the same wire format.

pub mod error;
pub mod exchange;
pub mod model;
pub mod requests;
pub mod validation;
