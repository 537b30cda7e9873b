// Rust
use super::store::{find_target, save, AliasStore, AliasStoreError};
use crate::config::ServerConfig;
use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse, Responder};
use common::model::alias::{AliasMode, AliasRecord};
use common::model::alias_import::{AliasImportRow, AliasImportStatus, ImportResponse};
use common::requests::{PARAM_IMPORTFILE, PARAM_SITEROOT};
use futures_util::StreamExt;
use log::{debug, error, info, warn};
use regex::Regex;
use thiserror::Error;

/// Problems with the submitted form itself; answered with `400`.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Malformed multipart body: {0}")]
    Multipart(String),

    #[error("Missing form field '{0}'")]
    MissingField(&'static str),

    #[error("Only one import file is accepted")]
    DuplicateFile,

    #[error("The import file exceeds {0} bytes")]
    TooLarge(usize),

    #[error("The site root is not valid UTF-8 text")]
    InvalidSiteRoot,
}

/// The two form fields of an alias import.
#[derive(Debug)]
pub struct ImportUpload {
    pub site_root: String,
    pub file_name: String,
    pub content: Vec<u8>,
}

/// HTTP handler for `POST /api/aliases/import`.
///
/// - On success: `200 OK` with the `{"result": [...]}` document, one row per CSV line.
/// - On a broken form: `400 Bad Request` with the reason.
/// - On a storage failure: `500 Internal Server Error`.
pub async fn process(
    payload: Multipart,
    store: web::Data<AliasStore>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let upload = match receive_upload(payload, config.max_upload_bytes).await {
        Ok(upload) => upload,
        Err(e) => {
            warn!("Rejected alias import: {}", e);
            return HttpResponse::BadRequest().body(format!("Error: {}", e));
        }
    };

    let store = store.get_ref().clone();
    let file_name = upload.file_name.clone();
    let site_root = upload.site_root.clone();
    let handle = tokio::task::spawn_blocking(move || {
        import_aliases(&store, &upload.site_root, &upload.content)
    });

    match handle.await {
        Ok(Ok(response)) => {
            let (created, changed, failed) = count_statuses(&response);
            info!(
                "Imported '{}' into site '{}': {} new, {} changed, {} rejected",
                file_name, site_root, created, changed, failed
            );
            match response.to_json() {
                Ok(json) => HttpResponse::Ok()
                    .content_type("application/json")
                    .body(json),
                Err(e) => {
                    error!("Cannot serialize the import result of '{}': {}", file_name, e);
                    HttpResponse::InternalServerError().body(format!("Error: {}", e))
                }
            }
        }
        Ok(Err(e)) => {
            error!("Alias import of '{}' failed: {}", file_name, e);
            HttpResponse::InternalServerError().body(format!("Error: {}", e))
        }
        Err(join_err) => {
            error!("Alias import of '{}' panicked: {}", file_name, join_err);
            HttpResponse::InternalServerError().body("Error: alias import was aborted")
        }
    }
}

fn count_statuses(response: &ImportResponse) -> (usize, usize, usize) {
    response
        .rows()
        .iter()
        .fold((0, 0, 0), |(n, c, e), row| match row.status {
            AliasImportStatus::New => (n + 1, c, e),
            AliasImportStatus::Changed => (n, c + 1, e),
            AliasImportStatus::Error => (n, c, e + 1),
        })
}

/// Collects the site root and the single import file from the form.
pub async fn receive_upload(
    mut payload: Multipart,
    max_file_bytes: usize,
) -> Result<ImportUpload, UploadError> {
    let mut site_root: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| UploadError::Multipart(e.to_string()))?;
        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match field_name.as_deref() {
            Some(PARAM_IMPORTFILE) => {
                if file.is_some() {
                    return Err(UploadError::DuplicateFile);
                }
                let file_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_default();
                let content = read_field(&mut field, max_file_bytes).await?;
                file = Some((file_name, content));
            }
            Some(PARAM_SITEROOT) => {
                let bytes = read_field(&mut field, max_file_bytes).await?;
                let value = String::from_utf8(bytes).map_err(|_| UploadError::InvalidSiteRoot)?;
                site_root = Some(value.trim().to_string());
            }
            _ => {}
        }
    }

    let site_root = site_root.ok_or(UploadError::MissingField(PARAM_SITEROOT))?;
    let (file_name, content) = file.ok_or(UploadError::MissingField(PARAM_IMPORTFILE))?;
    Ok(ImportUpload {
        site_root,
        file_name,
        content,
    })
}

async fn read_field(field: &mut Field, limit: usize) -> Result<Vec<u8>, UploadError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| UploadError::Multipart(e.to_string()))?;
        if bytes.len() + chunk.len() > limit {
            return Err(UploadError::TooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Picks the separator that occurs most often in the first non-blank line.
/// Ties and lines without any candidate fall back to a comma.
pub fn detect_separator(content: &[u8]) -> u8 {
    let first_line = content
        .split(|&b| b == b'\n')
        .find(|line| line.iter().any(|b| !b.is_ascii_whitespace()))
        .unwrap_or_default();

    let mut best = (b',', first_line.iter().filter(|&&b| b == b',').count());
    for candidate in [b';', b'\t'] {
        let count = first_line.iter().filter(|&&b| b == candidate).count();
        if count > best.1 {
            best = (candidate, count);
        }
    }
    best.0
}

/// Normalised alias path: no trailing slash except for the root itself.
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Turns the fields of one CSV line into an alias, or explains why it cannot be one.
fn parse_line(fields: &[&str], path_re: &Regex) -> Result<AliasRecord, String> {
    if !(2..=3).contains(&fields.len()) {
        return Err(format!(
            "Expected 2 or 3 columns (alias path, target path, mode) but found {}",
            fields.len()
        ));
    }

    if fields[0].is_empty() {
        return Err("The alias path is empty".to_string());
    }

    let alias_path = normalize_path(fields[0]);
    let target_path = fields[1].to_string();

    if !path_re.is_match(&alias_path) {
        return Err(format!("Invalid alias path '{}'", fields[0]));
    }
    if alias_path == "/" {
        return Err("The site root itself cannot be an alias".to_string());
    }
    if !path_re.is_match(&target_path) {
        return Err(format!("Invalid target path '{}'", target_path));
    }
    if normalize_path(&target_path) == alias_path {
        return Err(format!("Alias '{}' points to itself", alias_path));
    }

    let mode = match fields.get(2) {
        Some(mode) if !mode.is_empty() => mode.parse::<AliasMode>()?,
        _ => AliasMode::default(),
    };

    Ok(AliasRecord {
        alias_path,
        target_path,
        mode,
    })
}

/// One CSV record as it appears in the file.
struct SourceRecord<'a> {
    /// 1-based line the record starts on.
    line: u32,
    bytes: &'a [u8],
}

/// Splits `content` into records, keeping the physical line each one starts on.
///
/// A newline inside a quoted field belongs to the record, so a record may span
/// several lines. The line terminator (`\n` or `\r\n`) is not part of `bytes`.
fn split_records(content: &[u8]) -> Vec<SourceRecord<'_>> {
    let mut records = Vec::new();
    let mut start = 0;
    let mut start_line = 1u32;
    let mut line = 1u32;
    let mut quoted = false;

    for (i, &b) in content.iter().enumerate() {
        match b {
            b'"' => quoted = !quoted,
            b'\n' => {
                if !quoted {
                    records.push(SourceRecord {
                        line: start_line,
                        bytes: strip_cr(&content[start..i]),
                    });
                    start = i + 1;
                    start_line = line + 1;
                }
                line += 1;
            }
            _ => {}
        }
    }
    if start < content.len() {
        records.push(SourceRecord {
            line: start_line,
            bytes: strip_cr(&content[start..]),
        });
    }
    records
}

fn strip_cr(bytes: &[u8]) -> &[u8] {
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}

/// Imports every line of `content` into `site_root` and reports one row per line.
///
/// Lines are stored in one transaction: either all accepted lines are saved or,
/// on a storage error, none are. Rejected lines never abort the import.
/// Lines holding nothing but whitespace produce no row.
pub fn import_aliases(
    store: &AliasStore,
    site_root: &str,
    content: &[u8],
) -> Result<ImportResponse, AliasStoreError> {
    let path_re = Regex::new(r"^/[^\s,;]*$")?;
    let mut fields_reader = csv::ReaderBuilder::new();
    fields_reader
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(detect_separator(content));

    let mut conn = store.connection()?;
    let tx = conn.transaction()?;
    let mut rows: Vec<AliasImportRow> = Vec::new();

    for source in split_records(content) {
        if source.bytes.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let line = source.line;

        let mut record = csv::ByteRecord::new();
        fields_reader.from_reader(source.bytes).read_byte_record(&mut record)?;

        let fields: Result<Vec<&str>, _> = record.iter().map(std::str::from_utf8).collect();
        let parsed = match fields {
            Ok(fields) => parse_line(&fields, &path_re),
            Err(_) => Err("The line is not valid UTF-8 text".to_string()),
        };

        let row = match parsed {
            Err(message) => {
                debug!("Line {} of alias import rejected: {}", line, message);
                AliasImportRow::new(line, AliasImportStatus::Error, message)
            }
            Ok(alias) => {
                let previous = find_target(&tx, site_root, &alias.alias_path)?;
                save(&tx, site_root, &alias)?;
                match previous {
                    None => AliasImportRow::new(
                        line,
                        AliasImportStatus::New,
                        format!(
                            "Created alias {} -> {} ({})",
                            alias.alias_path, alias.target_path, alias.mode
                        ),
                    ),
                    Some(old_target) => AliasImportRow::new(
                        line,
                        AliasImportStatus::Changed,
                        format!(
                            "Replaced alias {}: {} -> {} ({})",
                            alias.alias_path, old_target, alias.target_path, alias.mode
                        ),
                    ),
                }
            }
        };
        rows.push(row);
    }

    tx.commit()?;
    Ok(ImportResponse::new(rows))
}
