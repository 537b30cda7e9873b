//! Update function for the alias import view.
//!
//! Elm-style: receives the state, the `Context` and a `Msg`, advances the
//! import cycle and returns whether the view should re-render.
//!
//! Key behaviors
//! - File selection: more than one file is refused by the exchange before
//!   anything is read; a single file is read into memory and validated.
//! - Submission: the exchange builds the request, `FormTransport` posts it and
//!   the raw outcome comes back as `Msg::SubmitCompleted`.
//! - Completion: the exchange parses and classifies the rows; malformed bodies
//!   are written to the console before the failure is shown.

use common::requests::ImportFile;
use gloo_file::{futures::read_as_bytes, File};
use yew::platform::spawn_local;
use yew::prelude::*;

use common::exchange::ImportTransport;

use super::helpers::{log_diagnostic, show_toast, FieldErrors};
use super::messages::Msg;
use super::state::AliasImportView;
use super::transport::FormTransport;

pub fn update(component: &mut AliasImportView, ctx: &Context<AliasImportView>, msg: Msg) -> bool {
    let Some(exchange) = component.exchange.as_mut() else {
        return false;
    };

    match msg {
        Msg::OpenFileDialog => {
            if let Some(input) = component.file_input_ref.cast::<web_sys::HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::FilesChosen(files) => {
            component.validation_errors.clear();
            component.failure = None;

            if files.len() == 1 {
                let file = files[0].clone();
                let link = ctx.link().clone();
                component.reading = true;
                spawn_local(async move {
                    let name = file.name();
                    let content_type = file.type_();
                    let blob = File::from(file);
                    match read_as_bytes(&blob).await {
                        Ok(bytes) => {
                            let mut import_file = ImportFile::new(name, bytes);
                            if !content_type.is_empty() {
                                import_file = import_file.with_content_type(content_type);
                            }
                            link.send_message(Msg::FileRead(import_file));
                        }
                        Err(err) => link.send_message(Msg::FileReadFailed(err.to_string())),
                    }
                });
            } else {
                // Nothing or several files: let the exchange decide without reading them.
                let names = files
                    .iter()
                    .map(|f| ImportFile::new(f.name(), Vec::new()))
                    .collect();
                let mut errors = FieldErrors::default();
                if let Err(err) = exchange.select_files(names, &mut errors) {
                    show_toast(&err.to_string());
                    component.failure = Some(err.to_string());
                }
            }
            true
        }
        Msg::FileRead(file) => {
            component.reading = false;
            let mut errors = FieldErrors::default();
            match exchange.select_files(vec![file], &mut errors) {
                Ok(()) => component.validation_errors = errors.into_messages(),
                Err(err) => component.failure = Some(err.to_string()),
            }
            true
        }
        Msg::FileReadFailed(reason) => {
            component.reading = false;
            gloo_console::error!(format!("Reading the import file failed: {}", reason));
            component.failure = Some(format!("The file could not be read: {}", reason));
            true
        }
        Msg::Submit => {
            match exchange.submit() {
                Ok(request) => {
                    component.failure = None;
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        let outcome = FormTransport.submit(&request).await;
                        link.send_message(Msg::SubmitCompleted(outcome));
                    });
                }
                Err(err) => component.failure = Some(err.to_string()),
            }
            true
        }
        Msg::SubmitCompleted(outcome) => {
            match exchange.complete(outcome, &log_diagnostic) {
                Ok(results) => {
                    let (ok, overwrite, error) = results.summary();
                    show_toast(&format!(
                        "Import finished: {} new, {} changed, {} with errors.",
                        ok, overwrite, error
                    ));
                }
                Err(err) => {
                    show_toast("The alias import failed.");
                    component.failure = Some(err.to_string());
                }
            }
            true
        }
    }
}
