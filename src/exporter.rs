//! Exporter - every sheet → one JSON document file
//!
//! Sheets are read through a [`ColumnMap`] built from their header row, so
//! reordered or missing columns do not break the export. Blank rows are
//! dropped. One failing sheet aborts the whole run; files already written stay.

use crate::destination::{Destination, SheetInfo};
use crate::error::SheetsResult;
use crate::filter::{is_blank_record, is_blank_row};
use crate::mapping::ColumnMap;
use crate::naming::export_file_name;
use crate::sink::DocumentSink;
use crate::types::{Field, PhraseFile, Record};
use tracing::{debug, info, warn};

/// One written file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub table: String,
    pub file_name: String,
    pub records: usize,
}

/// Records extracted from one sheet grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRecords {
    pub records: Vec<Record>,
    /// Data rows dropped as blank
    pub skipped: usize,
    /// Fields whose column header was not found
    pub missing: Vec<Field>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub files: Vec<ExportedFile>,
    /// Data rows dropped as blank
    pub skipped_rows: usize,
}

pub struct Exporter {
    file_prefix: String,
}

impl Exporter {
    pub fn new(file_prefix: impl Into<String>) -> Self {
        Self {
            file_prefix: file_prefix.into(),
        }
    }

    /// Export every sheet of `destination`, in tab order, into `sink`
    pub fn export<D, S>(&self, destination: &D, sink: &mut S) -> SheetsResult<ExportSummary>
    where
        D: Destination + ?Sized,
        S: DocumentSink + ?Sized,
    {
        let mut summary = ExportSummary::default();

        for (index, sheet) in destination.sheets()?.iter().enumerate() {
            let sequence = index + 1;
            let (document, skipped) = self.read_sheet(destination, sheet)?;
            let file_name = export_file_name(&self.file_prefix, sequence, &sheet.name);

            sink.write_document(&file_name, &document)?;
            debug!(
                sheet = %sheet.name,
                file = %file_name,
                records = document.phrases.len(),
                "sheet exported"
            );

            summary.skipped_rows += skipped;
            summary.files.push(ExportedFile {
                table: sheet.name.clone(),
                file_name,
                records: document.phrases.len(),
            });
        }

        info!(
            files = summary.files.len(),
            destination = %sink.describe(),
            "export complete"
        );
        Ok(summary)
    }

    /// Convert one sheet, returning the document and the number of blank rows dropped
    fn read_sheet<D>(&self, destination: &D, sheet: &SheetInfo) -> SheetsResult<(PhraseFile, usize)>
    where
        D: Destination + ?Sized,
    {
        let grid = destination.read_grid(sheet.id)?;
        let extracted = records_from_grid(&grid);

        if !extracted.missing.is_empty() {
            warn!(
                sheet = %sheet.name,
                missing = ?extracted.missing.iter().map(|f| f.as_str()).collect::<Vec<_>>(),
                "columns not found, exported as empty"
            );
        }

        Ok((
            PhraseFile {
                function: sheet.name.clone(),
                phrases: extracted.records,
            },
            extracted.skipped,
        ))
    }
}

/// Extract records from a sheet grid whose first row is the header.
///
/// Missing columns are only reported when there are data rows to read.
pub fn records_from_grid<S: AsRef<str>>(grid: &[Vec<S>]) -> SheetRecords {
    if grid.len() < 2 {
        return SheetRecords::default();
    }

    let map = ColumnMap::from_headers(&grid[0]);
    let mut records = Vec::new();
    let mut skipped = 0;

    for row in &grid[1..] {
        if is_blank_row(row) {
            skipped += 1;
            continue;
        }

        let mut record = Record::default();
        for field in Field::ALL {
            record.set(field, map.cell(row, field).trim().to_string());
        }

        if is_blank_record(&record) {
            skipped += 1;
            continue;
        }
        records.push(record);
    }

    SheetRecords {
        records,
        skipped,
        missing: map.missing_fields(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::MemoryWorkbook;
    use crate::sink::MemorySink;
    use pretty_assertions::assert_eq;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_records_from_reordered_grid() {
        let rows = grid(&[
            &["Syntax", "English", "Spanish"],
            &["decl", " Hi ", "Hola"],
        ]);
        let extracted = records_from_grid(&rows);
        assert_eq!(extracted.records, vec![Record::new("Hi", "Hola", "", "decl")]);
        assert_eq!(extracted.skipped, 0);
        assert_eq!(extracted.missing, vec![Field::Domain]);
    }

    #[test]
    fn test_blank_rows_dropped() {
        let rows = grid(&[
            &["english", "spanish", "domain", "syntax", "notes"],
            &["", "", "", "", ""],
            &[" ", "", "\t", "", ""],
            &["", "", "", "", "only a note"],
            &["", "", "", "decl", ""],
        ]);
        let extracted = records_from_grid(&rows);
        assert_eq!(extracted.records, vec![Record::new("", "", "", "decl")]);
        assert_eq!(extracted.skipped, 3);
        assert!(extracted.missing.is_empty());
    }

    #[test]
    fn test_header_only_grid() {
        let rows = grid(&[&["english", "spanish", "domain", "syntax"]]);
        assert_eq!(records_from_grid(&rows), SheetRecords::default());
        let empty: Vec<Vec<String>> = Vec::new();
        assert_eq!(records_from_grid(&empty), SheetRecords::default());
    }

    #[test]
    fn test_export_names_and_sequence() {
        let mut book = MemoryWorkbook::from_sheets(vec![(
            "Pedir Ayuda".to_string(),
            grid(&[&["english"], &["Help"]]),
        )]);
        book.add_sheet("Empty", &Vec::<Vec<String>>::new()).unwrap();

        let mut sink = MemorySink::new();
        let summary = Exporter::new("core-phrase-list")
            .export(&book, &mut sink)
            .unwrap();

        assert_eq!(
            sink.file_names(),
            vec![
                "core-phrase-list-01-pedir-ayuda.json",
                "core-phrase-list-02-empty.json"
            ]
        );
        assert_eq!(summary.files[0].records, 1);
        assert_eq!(summary.files[1].records, 0);
    }

    #[test]
    fn test_empty_sheet_exports_empty_phrases() {
        let book = MemoryWorkbook::from_sheets(vec![(
            "Header Only".to_string(),
            grid(&[&["english", "spanish", "domain", "syntax"]]),
        )]);
        let mut sink = MemorySink::new();
        Exporter::new("p").export(&book, &mut sink).unwrap();

        let parsed: PhraseFile = serde_json::from_str(&sink.files()[0].1).unwrap();
        assert_eq!(
            parsed,
            PhraseFile {
                function: "Header Only".to_string(),
                phrases: vec![],
            }
        );
    }

    #[test]
    fn test_sequence_keeps_same_slug_files_distinct() {
        // Both slugify to "a-b"
        let book = MemoryWorkbook::from_sheets(vec![
            ("A B".to_string(), Vec::new()),
            ("a-b".to_string(), Vec::new()),
        ]);
        let mut sink = MemorySink::new();
        let summary = Exporter::new("p").export(&book, &mut sink).unwrap();
        assert_eq!(sink.file_names(), vec!["p-01-a-b.json", "p-02-a-b.json"]);
        assert_eq!(summary.files.len(), 2);
    }
}
