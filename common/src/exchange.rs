//! One alias-import cycle: file selection, submission and result reconciliation.
//!
//! ```text
//! Idle -> FileSelected -> Submitted -> ResultsRendered
//!                                   \-> Failed
//! ```
//!
//! The exchange owns no transport and no UI. The caller reports the file
//! selection, takes the `ImportRequest` from `submit`, carries it however it
//! likes and hands the raw outcome back to `complete`. Callers must keep the
//! submit control disabled (see `can_submit`) while a submission is pending;
//! overlapping submissions are rejected as invalid transitions.

use crate::error::{ImportError, TransportError};
use crate::model::alias_import::parse_response;
use crate::model::display::ImportResultList;
use crate::requests::{ImportFile, ImportRequest};
use crate::validation::{validate_import_form, ValidationHandler};
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPhase {
    Idle,
    FileSelected,
    Submitted,
    ResultsRendered,
    Failed,
}

/// Sink for diagnostics produced at the exchange boundary.
pub trait DiagnosticLog {
    fn log(&self, message: &str);
}

impl<F: Fn(&str)> DiagnosticLog for F {
    fn log(&self, message: &str) {
        self(message)
    }
}

/// Carries a submission to the server and yields the raw response body.
pub trait ImportTransport {
    fn submit(&self, request: &ImportRequest)
    -> impl Future<Output = Result<String, TransportError>>;
}

pub struct AliasImportExchange {
    target_url: String,
    site_root: String,
    phase: ImportPhase,
    selected: Option<ImportFile>,
    results: ImportResultList,
}

impl AliasImportExchange {
    /// Creates an idle exchange for the endpoint and site the host provides.
    pub fn new(
        target_url: impl Into<String>,
        site_root: impl Into<String>,
    ) -> Result<Self, ImportError> {
        let target_url = target_url.into();
        if target_url.trim().is_empty() {
            return Err(ImportError::MissingTarget);
        }
        Ok(Self {
            target_url,
            site_root: site_root.into(),
            phase: ImportPhase::Idle,
            selected: None,
            results: ImportResultList::new(),
        })
    }

    pub fn phase(&self) -> ImportPhase {
        self.phase
    }

    pub fn results(&self) -> &ImportResultList {
        &self.results
    }

    pub fn selected_file_name(&self) -> Option<&str> {
        self.selected.as_ref().map(|f| f.name.as_str())
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.selected.is_some()
            && matches!(
                self.phase,
                ImportPhase::FileSelected | ImportPhase::ResultsRendered | ImportPhase::Failed
            )
    }

    /// Records the files picked by the user.
    ///
    /// More than one file is a `Selection` error and leaves the cycle as it
    /// was. Zero files, or a file failing validation, drops back to `Idle`.
    pub fn select_files(
        &mut self,
        mut files: Vec<ImportFile>,
        handler: &mut impl ValidationHandler,
    ) -> Result<(), ImportError> {
        if self.phase == ImportPhase::Submitted {
            return Err(self.invalid("select a file"));
        }
        if files.len() > 1 {
            return Err(ImportError::Selection(files.len()));
        }

        self.selected = files.pop().and_then(|file| validate_import_form(file, handler));
        self.phase = if self.selected.is_some() {
            ImportPhase::FileSelected
        } else {
            ImportPhase::Idle
        };
        Ok(())
    }

    /// Starts a submission: clears previous results and returns the request
    /// to send.
    pub fn submit(&mut self) -> Result<ImportRequest, ImportError> {
        if !self.can_submit() {
            return Err(self.invalid("submit"));
        }
        let file = match &self.selected {
            Some(file) => file.clone(),
            None => return Err(self.invalid("submit")),
        };
        let request = ImportRequest::build(file, &self.target_url, &self.site_root)?;

        self.results.clear();
        self.phase = ImportPhase::Submitted;
        Ok(request)
    }

    /// Feeds the transport outcome of the pending submission.
    ///
    /// A malformed body is written to `log` together with the raw text before
    /// the error is returned. Every error leaves the cycle in `Failed` with an
    /// empty result list.
    pub fn complete(
        &mut self,
        outcome: Result<String, TransportError>,
        log: &impl DiagnosticLog,
    ) -> Result<&ImportResultList, ImportError> {
        if self.phase != ImportPhase::Submitted {
            return Err(self.invalid("complete a submission"));
        }
        self.results.clear();

        let parsed = outcome
            .map_err(ImportError::from)
            .and_then(|body| parse_response(&body));

        match parsed {
            Ok(response) => {
                self.results.accumulate(response.rows());
                self.phase = ImportPhase::ResultsRendered;
                Ok(&self.results)
            }
            Err(err) => {
                if let ImportError::MalformedResponse { reason, raw } = &err {
                    log.log(&format!(
                        "Could not parse alias import results ({}): '{}'",
                        reason, raw
                    ));
                }
                self.phase = ImportPhase::Failed;
                Err(err)
            }
        }
    }

    /// Submits through `transport` and reconciles the answer.
    pub async fn run<T: ImportTransport>(
        &mut self,
        transport: &T,
        log: &impl DiagnosticLog,
    ) -> Result<&ImportResultList, ImportError> {
        let request = self.submit()?;
        let outcome = transport.submit(&request).await;
        self.complete(outcome, log)
    }

    fn invalid(&self, action: &'static str) -> ImportError {
        ImportError::InvalidTransition {
            action,
            phase: self.phase,
        }
    }
}
