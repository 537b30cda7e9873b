//! Component state of the alias import view.

use common::exchange::AliasImportExchange;
use yew::prelude::*;

use super::props::AliasImportProps;

pub struct AliasImportView {
    /// The running import cycle. `None` when the host gave no usable endpoint.
    pub exchange: Option<AliasImportExchange>,

    /// Why `exchange` could not be created.
    pub config_error: Option<String>,

    /// Reference to the hidden `<input type="file">`.
    pub file_input_ref: NodeRef,

    /// Messages from the last file validation.
    pub validation_errors: Vec<String>,

    /// Terminal error of the last selection or submission, shown above the results.
    pub failure: Option<String>,

    /// True while the selected file is being read into memory.
    pub reading: bool,
}

impl AliasImportView {
    pub fn new(props: &AliasImportProps) -> Self {
        let (exchange, config_error) =
            match AliasImportExchange::new(props.import_url.as_str(), props.site_root.as_str()) {
                Ok(exchange) => (Some(exchange), None),
                Err(e) => (None, Some(e.to_string())),
            };

        Self {
            exchange,
            config_error,
            file_input_ref: Default::default(),
            validation_errors: Vec::new(),
            failure: None,
            reading: false,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.reading && self.exchange.as_ref().is_some_and(|e| e.can_submit())
    }
}
