//! Export output locations

use crate::error::{SheetsError, SheetsResult};
use crate::types::PhraseFile;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Receives one JSON document per exported sheet
pub trait DocumentSink {
    /// Human-readable location, for notices and logs
    fn describe(&self) -> String;

    /// Persist `document` as a new file named `file_name`
    fn write_document(&mut self, file_name: &str, document: &PhraseFile) -> SheetsResult<()>;
}

/// Serialize as UTF-8 JSON with 2-space indentation
pub fn to_pretty_json(document: &PhraseFile) -> SheetsResult<String> {
    serde_json::to_string_pretty(document)
        .map_err(|e| SheetsError::Sink(format!("Failed to serialize '{}': {}", document.function, e)))
}

/// A fresh, timestamped directory created for one export run
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create `<root>/<prefix>-export-<YYYYMMDD-HHMMSS>` (with `-2`, `-3`, ... if taken)
    pub fn create<P: AsRef<Path>>(root: P, prefix: &str) -> SheetsResult<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root).map_err(|e| {
            SheetsError::Sink(format!("Failed to create {}: {}", root.display(), e))
        })?;

        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let base = format!("{}-export-{}", prefix, stamp);

        let mut attempt: usize = 1;
        loop {
            let name = if attempt == 1 {
                base.clone()
            } else {
                format!("{}-{}", base, attempt)
            };
            let dir = root.join(name);
            match fs::create_dir(&dir) {
                Ok(()) => {
                    debug!(dir = %dir.display(), "export directory created");
                    return Ok(Self { dir });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => {
                    return Err(SheetsError::Sink(format!(
                        "Failed to create {}: {}",
                        dir.display(),
                        e
                    )))
                }
            }
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentSink for DirectorySink {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn write_document(&mut self, file_name: &str, document: &PhraseFile) -> SheetsResult<()> {
        let path = self.dir.join(file_name);
        let json = to_pretty_json(document)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| SheetsError::Sink(format!("Failed to create {}: {}", path.display(), e)))?;
        file.write_all(json.as_bytes())
            .map_err(|e| SheetsError::Sink(format!("Failed to write {}: {}", path.display(), e)))?;

        debug!(path = %path.display(), "file written");
        Ok(())
    }
}

/// Collects exported files in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Vec<(String, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(file_name, json_text)` in write order
    pub fn files(&self) -> &[(String, String)] {
        &self.files
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl DocumentSink for MemorySink {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn write_document(&mut self, file_name: &str, document: &PhraseFile) -> SheetsResult<()> {
        if self.files.iter().any(|(name, _)| name == file_name) {
            return Err(SheetsError::Sink(format!("{} already exists", file_name)));
        }
        let json = to_pretty_json(document)?;
        self.files.push((file_name.to_string(), json));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Record;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> PhraseFile {
        PhraseFile {
            function: "Petición".to_string(),
            phrases: vec![Record::new("Please", "Por favor", "", "")],
        }
    }

    #[test]
    fn test_pretty_json_two_space_indent_keeps_unicode() {
        let json = to_pretty_json(&sample()).unwrap();
        assert!(json.starts_with("{\n  \"function\": \"Petición\""));
        assert!(json.contains("\n    {\n      \"english\": \"Please\""));
    }

    #[test]
    fn test_directory_sink_fresh_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let first = DirectorySink::create(temp_dir.path(), "core").unwrap();
        let second = DirectorySink::create(temp_dir.path(), "core").unwrap();

        assert_ne!(first.dir(), second.dir());
        assert!(first.dir().is_dir());
        assert!(second.dir().is_dir());
    }

    #[test]
    fn test_directory_sink_never_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = DirectorySink::create(temp_dir.path(), "core").unwrap();

        sink.write_document("a.json", &sample()).unwrap();
        let err = sink.write_document("a.json", &sample()).unwrap_err();
        assert!(matches!(err, SheetsError::Sink(_)));

        let text = fs::read_to_string(sink.dir().join("a.json")).unwrap();
        let parsed: PhraseFile = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, sample());
        assert_eq!(fs::read_dir(sink.dir()).unwrap().count(), 1);
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        sink.write_document("x.json", &sample()).unwrap();
        assert_eq!(sink.file_names(), vec!["x.json"]);
        assert!(sink.write_document("x.json", &sample()).is_err());
    }
}
