//! Catalog document sources
//!
//! The catalog is a JSON array of `{ "function": <label>, "phrases": [...] }`
//! entries. The top-level shape is validated as a whole; each group entry is
//! validated on its own and a malformed entry is skipped, not fatal.

use crate::error::{SheetsError, SheetsResult};
use crate::types::{Document, Field, Group, Record};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where the catalog document comes from
pub trait DocumentSource {
    /// Human-readable location, for notices and logs
    fn describe(&self) -> String;

    /// Raw UTF-8 document text
    fn fetch(&self) -> SheetsResult<String>;

    /// Fetch and parse
    fn load(&self) -> SheetsResult<Document> {
        let text = self.fetch()?;
        parse_document(&text)
    }
}

/// Catalog served over HTTP(S)
pub struct HttpSource {
    url: String,
    system_proxy: bool,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            system_proxy: true,
        }
    }

    /// Connect directly, ignoring `HTTP_PROXY` and friends
    pub fn without_proxy(mut self) -> Self {
        self.system_proxy = false;
        self
    }
}

impl DocumentSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> SheetsResult<String> {
        debug!(url = %self.url, "fetching catalog");
        let mut builder = reqwest::blocking::Client::builder();
        if !self.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| SheetsError::SourceFetch(format!("HTTP client: {}", e)))?;

        let response = client
            .get(&self.url)
            .send()
            .map_err(|e| SheetsError::SourceFetch(format!("{}: {}", self.url, e)))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(SheetsError::SourceFetch(format!(
                "{} returned HTTP {}",
                self.url,
                status.as_u16()
            )));
        }

        response
            .text()
            .map_err(|e| SheetsError::SourceFetch(format!("{}: {}", self.url, e)))
    }
}

/// Catalog saved on local disk
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DocumentSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> SheetsResult<String> {
        std::fs::read_to_string(&self.path).map_err(|e| {
            SheetsError::SourceFetch(format!("Failed to read {}: {}", self.path.display(), e))
        })
    }
}

/// Pick an HTTP source for `http(s)://` locations, a file source otherwise
pub fn source_for(location: &str) -> Box<dyn DocumentSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Parse catalog text into a [`Document`], skipping malformed group entries
pub fn parse_document(text: &str) -> SheetsResult<Document> {
    let root: Value = serde_json::from_str(text)
        .map_err(|e| SheetsError::SourceFormat(format!("Invalid JSON: {}", e)))?;

    let entries = match root {
        Value::Array(entries) => entries,
        other => {
            return Err(SheetsError::SourceFormat(format!(
                "Expected a top-level array of groups, found {}",
                json_type_name(&other)
            )))
        }
    };

    let mut document = Document::default();
    for (index, entry) in entries.iter().enumerate() {
        match parse_group(index, entry) {
            Ok(group) => document.groups.push(group),
            Err(e) => {
                warn!("Skipping entry: {}", e);
                document.skipped_entries += 1;
            }
        }
    }

    Ok(document)
}

/// Validate and convert one top-level entry
pub fn parse_group(index: usize, entry: &Value) -> SheetsResult<Group> {
    let shape_err = |reason: String| SheetsError::EntryShape { index, reason };

    let object = entry
        .as_object()
        .ok_or_else(|| shape_err(format!("expected an object, found {}", json_type_name(entry))))?;

    let label = match object.get("function") {
        Some(Value::String(label)) => label.clone(),
        Some(other) => {
            return Err(shape_err(format!(
                "'function' must be a string, found {}",
                json_type_name(other)
            )))
        }
        None => return Err(shape_err("missing 'function'".to_string())),
    };

    let phrases = match object.get("phrases") {
        Some(Value::Array(phrases)) => phrases,
        Some(other) => {
            return Err(shape_err(format!(
                "'phrases' must be an array, found {}",
                json_type_name(other)
            )))
        }
        None => return Err(shape_err("missing 'phrases'".to_string())),
    };

    let records = phrases
        .iter()
        .enumerate()
        .map(|(i, phrase)| {
            parse_record(phrase).map_err(|reason| shape_err(format!("phrase #{}: {}", i, reason)))
        })
        .collect::<SheetsResult<Vec<Record>>>()?;

    Ok(Group::new(label, records))
}

fn parse_record(phrase: &Value) -> Result<Record, String> {
    let object = phrase
        .as_object()
        .ok_or_else(|| format!("expected an object, found {}", json_type_name(phrase)))?;

    let mut record = Record::default();
    for field in Field::ALL {
        let value = match object.get(field.as_str()) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => {
                return Err(format!(
                    "'{}' must be a string, found {}",
                    field.as_str(),
                    json_type_name(other)
                ))
            }
        };
        record.set(field, value);
    }

    Ok(record)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
