//! Per-line outcome of a bulk alias import and the response that carries them.
//!
//! The server answers an import with a JSON object holding one array under the
//! `result` key:
//!
//! ```json
//! { "result": [ { "line": 1, "status": "aliasNew", "message": "..." } ] }
//! ```
//!
//! Parsing is strict on that shape. Anything else (no `result` key, a non-array
//! value, a row without line/status/message, a status token outside the three
//! known ones, line numbers out of file order) is rejected as a whole with
//! `ImportError::MalformedResponse`; a partial result list is never produced.

use crate::error::ImportError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key of the array field in the import response.
pub const JSON_RESULT: &str = "result";

/// What happened to one CSV line on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AliasImportStatus {
    /// A new alias was created.
    #[serde(rename = "aliasNew")]
    New,
    /// An existing alias was overwritten.
    #[serde(rename = "aliasChanged")]
    Changed,
    /// The line could not be imported.
    #[serde(rename = "aliasError")]
    Error,
}

impl AliasImportStatus {
    /// The protocol token used on the wire.
    pub fn token(self) -> &'static str {
        match self {
            AliasImportStatus::New => "aliasNew",
            AliasImportStatus::Changed => "aliasChanged",
            AliasImportStatus::Error => "aliasError",
        }
    }
}

/// One outcome for one input CSV line. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasImportRow {
    /// 1-based position in the submitted file.
    pub line: u32,
    pub status: AliasImportStatus,
    /// Error detail or confirmation text; may be empty.
    pub message: String,
}

impl AliasImportRow {
    pub fn new(line: u32, status: AliasImportStatus, message: impl Into<String>) -> Self {
        Self {
            line,
            status,
            message: message.into(),
        }
    }
}

/// Ordered rows of one import, in source file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResponse {
    pub result: Vec<AliasImportRow>,
}

impl ImportResponse {
    pub fn new(rows: Vec<AliasImportRow>) -> Self {
        Self { result: rows }
    }

    pub fn rows(&self) -> &[AliasImportRow] {
        &self.result
    }

    pub fn into_rows(self) -> Vec<AliasImportRow> {
        self.result
    }

    pub fn len(&self) -> usize {
        self.result.len()
    }

    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    /// Serializes the response in the exact shape `parse_response` accepts.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Parses the raw body returned by the import endpoint.
///
/// A leading byte-order mark and surrounding whitespace are tolerated; the
/// structure below the root is not negotiable. The raw body is carried inside
/// the error so the caller can log it before reporting the failure.
pub fn parse_response(raw_body: &str) -> Result<ImportResponse, ImportError> {
    let body = raw_body.trim_start_matches('\u{feff}').trim();

    let value: Value = serde_json::from_str(body)
        .map_err(|e| ImportError::malformed(format!("invalid JSON: {}", e), raw_body))?;

    let root = value
        .as_object()
        .ok_or_else(|| ImportError::malformed("root is not a JSON object", raw_body))?;

    let result = root.get(JSON_RESULT).ok_or_else(|| {
        ImportError::malformed(format!("missing '{}' field", JSON_RESULT), raw_body)
    })?;

    let entries = result.as_array().ok_or_else(|| {
        ImportError::malformed(format!("'{}' is not an array", JSON_RESULT), raw_body)
    })?;

    let mut rows: Vec<AliasImportRow> = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let row = AliasImportRow::deserialize(entry).map_err(|e| {
            ImportError::malformed(format!("row {}: {}", index, e), raw_body)
        })?;

        if row.line == 0 {
            return Err(ImportError::malformed(
                format!("row {}: line numbers start at 1", index),
                raw_body,
            ));
        }
        if let Some(previous) = rows.last() {
            if row.line <= previous.line {
                return Err(ImportError::malformed(
                    format!(
                        "row {}: line {} does not follow line {}",
                        index, row.line, previous.line
                    ),
                    raw_body,
                ));
            }
        }
        rows.push(row);
    }

    Ok(ImportResponse::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason_of(err: ImportError) -> String {
        match err {
            ImportError::MalformedResponse { reason, .. } => reason,
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn parses_single_new_row() {
        let response =
            parse_response(r#"{"result":[{"line":1,"status":"aliasNew","message":"ok"}]}"#)
                .unwrap();
        assert_eq!(
            response.rows(),
            &[AliasImportRow::new(1, AliasImportStatus::New, "ok")]
        );
    }

    #[test]
    fn keeps_array_order() {
        let response = parse_response(
            r#"{"result":[
                {"line":2,"status":"aliasChanged","message":"overwrote"},
                {"line":3,"status":"aliasError","message":"bad format"}
            ]}"#,
        )
        .unwrap();
        let statuses: Vec<_> = response.rows().iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![AliasImportStatus::Changed, AliasImportStatus::Error]
        );
        assert_eq!(response.rows()[1].message, "bad format");
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let response = parse_response(r#"{"result":[]}"#).unwrap();
        assert!(response.is_empty());
    }

    #[test]
    fn tolerates_bom_whitespace_and_extra_fields() {
        let body = "\u{feff}  {\"result\":[{\"line\":4,\"status\":\"aliasNew\",\"message\":\"\",\"path\":\"/a\"}],\"took\":3}\n";
        let response = parse_response(body).unwrap();
        assert_eq!(response.rows()[0].line, 4);
        assert_eq!(response.rows()[0].message, "");
    }

    #[test]
    fn missing_result_field_is_malformed() {
        let err = parse_response("{}").unwrap_err();
        match err {
            ImportError::MalformedResponse { reason, raw } => {
                assert!(reason.contains("missing"));
                assert_eq!(raw, "{}");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_status_token_is_malformed() {
        let err =
            parse_response(r#"{"result":[{"line":1,"status":"unknown","message":"x"}]}"#)
                .unwrap_err();
        assert!(reason_of(err).starts_with("row 0"));
    }

    #[test]
    fn rejects_structural_mismatches() {
        let bodies = [
            "not json at all",
            "[]",
            r#"{"result":{}}"#,
            r#"{"result":[1]}"#,
            r#"{"result":[{"line":1,"status":"aliasNew"}]}"#,
            r#"{"result":[{"line":1,"status":"aliasNew","message":null}]}"#,
            r#"{"result":[{"line":"1","status":"aliasNew","message":"x"}]}"#,
            r#"{"result":[{"line":-1,"status":"aliasNew","message":"x"}]}"#,
        ];
        for body in bodies {
            assert!(
                matches!(
                    parse_response(body),
                    Err(ImportError::MalformedResponse { .. })
                ),
                "accepted {}",
                body
            );
        }
    }

    #[test]
    fn line_numbers_must_follow_file_order() {
        let zero = parse_response(r#"{"result":[{"line":0,"status":"aliasNew","message":""}]}"#);
        assert!(reason_of(zero.unwrap_err()).contains("start at 1"));

        let repeated = parse_response(
            r#"{"result":[
                {"line":3,"status":"aliasNew","message":""},
                {"line":3,"status":"aliasError","message":""}
            ]}"#,
        );
        assert!(reason_of(repeated.unwrap_err()).contains("does not follow"));
    }

    #[test]
    fn written_json_parses_back() {
        let response = ImportResponse::new(vec![
            AliasImportRow::new(1, AliasImportStatus::New, "created /a"),
            AliasImportRow::new(5, AliasImportStatus::Error, "bad mode"),
        ]);
        let json = response.to_json().unwrap();
        assert!(json.starts_with("{\"result\":["));
        assert!(json.contains("\"aliasError\""));
        assert_eq!(parse_response(&json).unwrap(), response);
    }
}
