//! Utility functions for the alias import view.
//!
//! - **User Feedback**: temporary "toast" notifications for finished or failed imports.
//! - **Diagnostics**: the console sink handed to the exchange for malformed responses.
//! - **File Input**: turning the input's `FileList` into owned `File` handles.
//! - **Validation**: collecting the messages of a field validation run.

use common::validation::{ValidationHandler, ValidationResult};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement};

/// Displays a temporary notification message at the bottom of the screen.
///
/// The toast removes itself after three seconds.
pub fn show_toast(message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };

    toast.set_text_content(Some(message));
    toast.set_class_name("alias-toast");
    let html_toast: HtmlElement = toast.unchecked_into();
    let style = html_toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(3000).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}

/// Console sink for diagnostics raised while reconciling an import.
pub fn log_diagnostic(message: &str) {
    gloo_console::error!(message);
}

/// Takes the files out of a file input and resets it, so picking the same
/// file again still fires a change event.
pub fn take_files(input: &HtmlInputElement) -> Vec<web_sys::File> {
    let files = input
        .files()
        .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
        .unwrap_or_default();
    input.set_value("");
    files
}

/// Validation handler that keeps the error messages of failed fields.
#[derive(Default)]
pub struct FieldErrors {
    messages: Vec<String>,
}

impl FieldErrors {
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl ValidationHandler for FieldErrors {
    fn on_validation_result(&mut self, _field_id: &str, result: &ValidationResult) {
        if let Some(message) = &result.error_message {
            self.messages.push(message.clone());
        }
    }

    fn on_validation_finished(&mut self, ok: bool) {
        if !ok && self.messages.is_empty() {
            self.messages.push("The selected file cannot be imported".to_string());
        }
    }
}
