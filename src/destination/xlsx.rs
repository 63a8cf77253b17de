//! `.xlsx` workbook destination
//!
//! The file is read once with calamine into a [`MemoryWorkbook`]; every
//! change is staged in memory and only reaches disk on [`XlsxWorkbook::save`].

use super::{Destination, MemoryWorkbook, NameRules, SheetId, SheetInfo};
use crate::error::{SheetsError, SheetsResult};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Excel refuses longer worksheet names
pub const XLSX_MAX_SHEET_NAME_LEN: usize = 31;

/// Excel compares worksheet names case-insensitively, refuses names with an
/// apostrophe at either end and keeps `History` for itself
pub const XLSX_NAME_RULES: NameRules = NameRules {
    max_len: XLSX_MAX_SHEET_NAME_LEN,
    case_insensitive: true,
    edge_apostrophes: false,
    reserved_names: &["History"],
};

pub struct XlsxWorkbook {
    path: PathBuf,
    book: MemoryWorkbook,
}

impl XlsxWorkbook {
    /// Open an existing workbook, or start a new one if the file does not exist yet
    pub fn open<P: AsRef<Path>>(path: P) -> SheetsResult<Self> {
        let path = path.as_ref().to_path_buf();

        let book = if path.exists() {
            Self::load(&path)?
        } else {
            debug!(path = %path.display(), "workbook not found, starting a new one");
            MemoryWorkbook::new()
        };

        Ok(Self {
            path,
            book: book.with_name_rules(XLSX_NAME_RULES),
        })
    }

    /// The staged in-memory state
    pub fn workbook(&self) -> &MemoryWorkbook {
        &self.book
    }

    fn load(path: &Path) -> SheetsResult<MemoryWorkbook> {
        let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
            SheetsError::Destination(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let mut sheets = Vec::new();
        for sheet_name in workbook.sheet_names().to_vec() {
            let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
                SheetsError::Destination(format!("Failed to read sheet '{}': {}", sheet_name, e))
            })?;
            sheets.push((sheet_name, range_to_rows(&range)));
        }

        if sheets.is_empty() {
            return Err(SheetsError::Destination(format!(
                "{} contains no worksheets",
                path.display()
            )));
        }

        debug!(path = %path.display(), sheets = sheets.len(), "workbook loaded");
        Ok(MemoryWorkbook::from_sheets(sheets))
    }

    /// Write the staged workbook to its path
    pub fn save(&self) -> SheetsResult<()> {
        let mut workbook = Workbook::new();
        let active = self.book.active_id();

        for sheet in self.book.sheet_list() {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name).map_err(|e| {
                SheetsError::Destination(format!("Failed to set worksheet name: {}", e))
            })?;

            for (row_idx, row) in sheet.rows.iter().enumerate() {
                for (col_idx, value) in row.iter().enumerate() {
                    if value.is_empty() {
                        continue;
                    }
                    worksheet
                        .write_string(row_idx as u32, col_idx as u16, value)
                        .map_err(|e| {
                            SheetsError::Destination(format!("Failed to write cell: {}", e))
                        })?;
                }
            }

            if sheet.frozen_rows > 0 {
                worksheet
                    .set_freeze_panes(sheet.frozen_rows as u32, 0)
                    .map_err(|e| {
                        SheetsError::Destination(format!("Failed to freeze header: {}", e))
                    })?;
            }

            if let Some((rows, columns)) = sheet.filter {
                worksheet
                    .autofilter(0, 0, (rows - 1) as u32, (columns - 1) as u16)
                    .map_err(|e| SheetsError::Destination(format!("Failed to add filter: {}", e)))?;
            }

            if active == Some(sheet.id) {
                worksheet.set_active(true);
            }
        }

        workbook.save(&self.path).map_err(|e| {
            SheetsError::Destination(format!(
                "Failed to save {}: {}",
                self.path.display(),
                e
            ))
        })?;

        debug!(path = %self.path.display(), "workbook saved");
        Ok(())
    }
}

impl Destination for XlsxWorkbook {
    fn sheets(&self) -> SheetsResult<Vec<SheetInfo>> {
        self.book.sheets()
    }

    fn has_sheet(&self, name: &str) -> SheetsResult<bool> {
        self.book.has_sheet(name)
    }

    fn create_sheet(&mut self, name: &str) -> SheetsResult<SheetId> {
        self.book.create_sheet(name)
    }

    fn delete_sheet(&mut self, id: SheetId) -> SheetsResult<()> {
        self.book.delete_sheet(id)
    }

    fn read_grid(&self, id: SheetId) -> SheetsResult<Vec<Vec<String>>> {
        self.book.read_grid(id)
    }

    fn write_rows(
        &mut self,
        id: SheetId,
        start_row: usize,
        rows: &[Vec<String>],
    ) -> SheetsResult<()> {
        self.book.write_rows(id, start_row, rows)
    }

    fn freeze_rows(&mut self, id: SheetId, rows: usize) -> SheetsResult<()> {
        self.book.freeze_rows(id, rows)
    }

    fn set_filter(&mut self, id: SheetId, rows: usize, columns: usize) -> SheetsResult<()> {
        self.book.set_filter(id, rows, columns)
    }

    fn activate(&mut self, id: SheetId) -> SheetsResult<()> {
        self.book.activate(id)
    }
}

/// Calamine ranges start at the first used cell; re-anchor at A1
fn range_to_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    let (start_row, start_col) = match range.start() {
        Some((row, col)) => (row as usize, col as usize),
        None => return Vec::new(),
    };

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row];
    for row in range.rows() {
        let mut cells = vec![String::new(); start_col];
        cells.extend(row.iter().map(cell_to_string));
        rows.push(cells);
    }
    rows
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        other => other.to_string(),
    }
}
