use serde::{Deserialize, Serialize};

/// Answer of the lock RPCs.
///
/// `error` is `None` when the repository accepted the operation, otherwise it
/// holds the human-readable refusal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockResponse {
    pub error: Option<String>,
}

impl LockResponse {
    pub fn ok() -> Self {
        Self { error: None }
    }

    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }
}
