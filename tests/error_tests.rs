//! Error handling tests

use phrase_sheets::destination::{Destination, MemoryWorkbook};
use phrase_sheets::error::{ErrorKind, SheetsError};
use phrase_sheets::exporter::Exporter;
use phrase_sheets::sink::{DocumentSink, MemorySink};
use phrase_sheets::source::parse_document;
use phrase_sheets::types::PhraseFile;

/// Sink that fails after a given number of files
struct FailingSink {
    inner: MemorySink,
    fail_after: usize,
}

impl DocumentSink for FailingSink {
    fn describe(&self) -> String {
        "failing".to_string()
    }

    fn write_document(&mut self, file_name: &str, document: &PhraseFile) -> Result<(), SheetsError> {
        if self.inner.files().len() >= self.fail_after {
            return Err(SheetsError::Sink("disk full".to_string()));
        }
        self.inner.write_document(file_name, document)
    }
}

#[test]
fn test_source_format_kind() {
    let err = parse_document("42").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SourceFormat);
    assert!(err.to_string().contains("number"));
}

#[test]
fn test_destination_kind() {
    let mut book = MemoryWorkbook::new();
    let err = book.create_sheet("bad[name]").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Destination);
}

#[test]
fn test_sink_failure_aborts_export_and_keeps_written_files() {
    let book = MemoryWorkbook::from_sheets(vec![
        ("One".to_string(), Vec::new()),
        ("Two".to_string(), Vec::new()),
        ("Three".to_string(), Vec::new()),
    ]);
    let mut sink = FailingSink {
        inner: MemorySink::new(),
        fail_after: 1,
    };

    let err = Exporter::new("p").export(&book, &mut sink).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Sink);
    assert_eq!(sink.inner.file_names(), vec!["p-01-one.json"]);
}
