//! Field validation results and the handler that receives them.

use crate::requests::{ImportFile, PARAM_IMPORTFILE};

/// Outcome of validating one field.
///
/// `new_value` is set when validation normalised the input and the caller
/// should use that value instead of what was entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub error_message: Option<String>,
    pub new_value: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn normalized(new_value: impl Into<String>) -> Self {
        Self {
            error_message: None,
            new_value: Some(new_value.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error_message: Some(message.into()),
            new_value: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error_message.is_none()
    }
}

/// Receives validation notifications.
pub trait ValidationHandler {
    /// Called once per validated field.
    fn on_validation_result(&mut self, field_id: &str, result: &ValidationResult);

    /// Called after all fields; `ok` is true when every field passed.
    fn on_validation_finished(&mut self, ok: bool);
}

/// Checks the file chosen for an alias import.
///
/// Browsers may report a full (or fake) path as the file name; the base name
/// is returned as `new_value` in that case.
pub fn validate_import_file(file: &ImportFile) -> ValidationResult {
    let base_name = file
        .name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if base_name.is_empty() {
        return ValidationResult::error("The selected file has no name");
    }
    if !base_name.to_ascii_lowercase().ends_with(".csv") {
        return ValidationResult::error(format!("'{}' is not a CSV file", base_name));
    }
    if file.bytes.is_empty() {
        return ValidationResult::error(format!("'{}' is empty", base_name));
    }
    if base_name != file.name {
        return ValidationResult::normalized(base_name);
    }
    ValidationResult::ok()
}

/// Runs every import-form check against `file`, reporting to `handler`.
///
/// Returns the (possibly normalised) file when all checks passed.
pub fn validate_import_form(
    mut file: ImportFile,
    handler: &mut impl ValidationHandler,
) -> Option<ImportFile> {
    let result = validate_import_file(&file);
    handler.on_validation_result(PARAM_IMPORTFILE, &result);
    let ok = result.is_ok();
    handler.on_validation_finished(ok);

    if !ok {
        return None;
    }
    if let Some(name) = result.new_value {
        file.name = name;
    }
    Some(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        results: Vec<(String, ValidationResult)>,
        finished: Vec<bool>,
    }

    impl ValidationHandler for Recorder {
        fn on_validation_result(&mut self, field_id: &str, result: &ValidationResult) {
            self.results.push((field_id.to_string(), result.clone()));
        }

        fn on_validation_finished(&mut self, ok: bool) {
            self.finished.push(ok);
        }
    }

    #[test]
    fn accepts_csv_in_any_case() {
        let file = ImportFile::new("ALIASES.CSV", b"x".to_vec());
        assert_eq!(validate_import_file(&file), ValidationResult::ok());
    }

    #[test]
    fn strips_browser_fake_path() {
        let file = ImportFile::new("C:\\fakepath\\aliases.csv", b"x".to_vec());
        let mut recorder = Recorder::default();
        let accepted = validate_import_form(file, &mut recorder).unwrap();

        assert_eq!(accepted.name, "aliases.csv");
        assert_eq!(recorder.results[0].0, PARAM_IMPORTFILE);
        assert_eq!(
            recorder.results[0].1.new_value.as_deref(),
            Some("aliases.csv")
        );
        assert_eq!(recorder.finished, vec![true]);
    }

    #[test]
    fn rejects_wrong_extension_and_empty_files() {
        let mut recorder = Recorder::default();
        assert!(validate_import_form(ImportFile::new("a.txt", b"x".to_vec()), &mut recorder).is_none());
        assert!(validate_import_form(ImportFile::new("a.csv", Vec::new()), &mut recorder).is_none());
        assert!(validate_import_form(ImportFile::new("dir/", b"x".to_vec()), &mut recorder).is_none());

        assert_eq!(recorder.finished, vec![false, false, false]);
        assert!(recorder.results.iter().all(|(_, r)| !r.is_ok()));
    }
}
