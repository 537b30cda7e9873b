//! Request payloads sent from the frontend to the backend.

use crate::error::ImportError;
use serde::{Deserialize, Serialize};

/// Multipart field carrying the CSV file of an alias import.
pub const PARAM_IMPORTFILE: &str = "importfile";

/// Multipart field carrying the site-scope token of an alias import.
pub const PARAM_SITEROOT: &str = "siteroot";

/// A file picked for import, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImportFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// MIME type sent with the multipart part.
    pub fn mime(&self) -> &str {
        self.content_type.as_deref().unwrap_or("text/csv")
    }
}

/// One part of the multipart body, in the order it must be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPart<'a> {
    Text {
        name: &'static str,
        value: &'a str,
    },
    File {
        name: &'static str,
        file: &'a ImportFile,
    },
}

/// Shape of one alias-import submission. Built fresh for every submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    target_url: String,
    site_root: String,
    file: ImportFile,
}

impl ImportRequest {
    pub const METHOD: &'static str = "POST";
    pub const ENCODING: &'static str = "multipart/form-data";

    /// Builds the request for a single, already selected file.
    ///
    /// The single-file rule is enforced where files are collected; this only
    /// refuses an empty endpoint.
    pub fn build(
        file: ImportFile,
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
            file,
        })
    }

    pub fn method(&self) -> &'static str {
        Self::METHOD
    }

    pub fn encoding(&self) -> &'static str {
        Self::ENCODING
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn site_root(&self) -> &str {
        &self.site_root
    }

    pub fn file(&self) -> &ImportFile {
        &self.file
    }

    /// Form parts: the site root first, then the file.
    pub fn multipart_fields(&self) -> [FormPart<'_>; 2] {
        [
            FormPart::Text {
                name: PARAM_SITEROOT,
                value: &self.site_root,
            },
            FormPart::File {
                name: PARAM_IMPORTFILE,
                file: &self.file,
            },
        ]
    }
}

/// Body of `POST /api/core/lock` and `POST /api/core/unlock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRequest {
    pub uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv() -> ImportFile {
        ImportFile::new("aliases.csv", b"/a,/b\n".to_vec())
    }

    #[test]
    fn request_is_a_multipart_post() {
        let request = ImportRequest::build(csv(), "/aliases/import", "/sites/default").unwrap();
        assert_eq!(request.method(), "POST");
        assert_eq!(request.encoding(), "multipart/form-data");
        assert_eq!(request.target_url(), "/aliases/import");
    }

    #[test]
    fn fields_carry_site_root_then_file() {
        let request = ImportRequest::build(csv(), "/import", "/sites/shop").unwrap();
        let [first, second] = request.multipart_fields();
        assert_eq!(
            first,
            FormPart::Text {
                name: PARAM_SITEROOT,
                value: "/sites/shop"
            }
        );
        match second {
            FormPart::File { name, file } => {
                assert_eq!(name, PARAM_IMPORTFILE);
                assert_eq!(file.name, "aliases.csv");
                assert_eq!(file.mime(), "text/csv");
            }
            other => panic!("unexpected part {:?}", other),
        }
    }

    #[test]
    fn empty_target_is_refused() {
        assert_eq!(
            ImportRequest::build(csv(), "  ", "/sites/default"),
            Err(ImportError::MissingTarget)
        );
    }
}
