//! Content-repository operations the core RPC endpoints delegate to.
//!
//! The endpoints under `/api/core` do nothing themselves: they pass the
//! resource uri and the requesting user to a `ResourceRepository` and translate
//! its answer. A `Refused` error is an expected outcome and is sent back to the
//! client as a readable message; anything else is an internal failure.

use std::future::Future;
use thiserror::Error;

pub mod memory;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The repository declined the operation; the text is shown to the user.
    #[error("{0}")]
    Refused(String),

    #[error("Repository failure: {0}")]
    Internal(String),
}

pub trait ResourceRepository {
    fn lock_resource(
        &self,
        uri: &str,
        user: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>>;

    fn unlock_resource(
        &self,
        uri: &str,
        user: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>>;
}
