use common::error::TransportError;
use common::requests::ImportFile;

pub enum Msg {
    OpenFileDialog,
    /// Files reported by the file input's change event.
    FilesChosen(Vec<web_sys::File>),
    FileRead(ImportFile),
    FileReadFailed(String),
    Submit,
    /// Raw outcome of the form submission.
    SubmitCompleted(Result<String, TransportError>),
}
