//! Phrase Sheets - phrase catalog ⇄ spreadsheet bridge
//!
//! The multilingual phrase catalog is distributed as one JSON document: an
//! array of groups, each with a label (`function`) and a list of phrases with
//! four text fields (`english`, `spanish`, `domain`, `syntax`). Maintainers
//! edit it as a workbook with one sheet per group.
//!
//! # Features
//!
//! - Import: catalog → workbook, replacing every sheet (sanitized, unique sheet names)
//! - Export: workbook → one JSON file per sheet, tolerant of reordered or missing columns
//! - Merge: per-group files → one catalog document
//! - In-memory destination and sink for testing without I/O
//!
//! # Example
//!
//! ```no_run
//! use phrase_sheets::destination::MemoryWorkbook;
//! use phrase_sheets::exporter::Exporter;
//! use phrase_sheets::importer::Importer;
//! use phrase_sheets::sink::MemorySink;
//! use phrase_sheets::source::parse_document;
//!
//! let document = parse_document(r#"[{"function":"Greeting","phrases":[{"english":"Hi"}]}]"#)?;
//!
//! let mut workbook = MemoryWorkbook::new();
//! Importer::new(&mut workbook).import(&document)?;
//!
//! let mut sink = MemorySink::new();
//! let summary = Exporter::new("core-phrase-list").export(&workbook, &mut sink)?;
//! println!("Files: {}", summary.files.len());
//! # Ok::<(), phrase_sheets::error::SheetsError>(())
//! ```

pub mod cli;
pub mod config;
pub mod destination;
pub mod error;
pub mod exporter;
pub mod filter;
pub mod importer;
pub mod mapping;
pub mod merge;
pub mod naming;
pub mod sink;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use error::{SheetsError, SheetsResult};
pub use types::{Document, Field, Group, PhraseFile, Record};
