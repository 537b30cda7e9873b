use crate::exchange::ImportPhase;
use thiserror::Error;

/// Failure reported by whatever carried the import form to the server.
///
/// The exchange never retries; the text is surfaced to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Every way an alias-import cycle can end without a result list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// More than one file was handed over for a single import.
    #[error("Exactly one file must be selected, got {0}")]
    Selection(usize),

    /// The hosting context supplied no import endpoint.
    #[error("The alias import endpoint is not configured")]
    MissingTarget,

    /// The response never arrived.
    #[error("Import request failed: {0}")]
    Transport(#[from] TransportError),

    /// The response arrived but does not follow the `{"result": [...]}` schema.
    ///
    /// `raw` keeps the offending body so the caller can log it before
    /// surfacing the failure.
    #[error("Malformed alias import response: {reason}")]
    MalformedResponse { reason: String, raw: String },

    /// An operation was called in a phase of the import cycle that does not allow it.
    #[error("Cannot {action} while the import is {phase:?}")]
    InvalidTransition {
        action: &'static str,
        phase: ImportPhase,
    },
}

impl ImportError {
    pub(crate) fn malformed(reason: impl Into<String>, raw: &str) -> Self {
        ImportError::MalformedResponse {
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }
}
