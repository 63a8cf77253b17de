//! Spreadsheet destinations
//!
//! A destination is an ordered collection of named sheets, each a grid of
//! text cells. Importer and exporter only talk to the [`Destination`] trait:
//! - [`MemoryWorkbook`]: in-memory, enforces the same naming rules as a hosted spreadsheet
//! - [`XlsxWorkbook`]: a `.xlsx` file (calamine to read, rust_xlsxwriter to save)

mod memory;
mod xlsx;

pub use memory::{MemoryWorkbook, NameRules};
pub use xlsx::{XlsxWorkbook, XLSX_MAX_SHEET_NAME_LEN, XLSX_NAME_RULES};

use crate::error::SheetsResult;

/// Stable identifier of a sheet within one destination
pub type SheetId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetInfo {
    pub id: SheetId,
    pub name: String,
}

pub trait Destination {
    /// All sheets, in tab order
    fn sheets(&self) -> SheetsResult<Vec<SheetInfo>>;

    /// Exact-name lookup
    fn sheet_by_name(&self, name: &str) -> SheetsResult<Option<SheetInfo>> {
        Ok(self.sheets()?.into_iter().find(|s| s.name == name))
    }

    /// Whether `name` is already used under this destination's naming rules.
    /// Exact comparison unless the destination says otherwise.
    fn has_sheet(&self, name: &str) -> SheetsResult<bool> {
        Ok(self.sheet_by_name(name)?.is_some())
    }

    /// Append a new, empty sheet
    fn create_sheet(&mut self, name: &str) -> SheetsResult<SheetId>;

    fn delete_sheet(&mut self, id: SheetId) -> SheetsResult<()>;

    /// Used range of the sheet, starting at the first row and column.
    /// Rows are padded to equal width; trailing empty rows and columns are dropped.
    fn read_grid(&self, id: SheetId) -> SheetsResult<Vec<Vec<String>>>;

    /// Write `rows` starting at the 0-based `start_row`, column 0
    fn write_rows(&mut self, id: SheetId, start_row: usize, rows: &[Vec<String>])
        -> SheetsResult<()>;

    /// Keep the first `rows` rows visible while scrolling
    fn freeze_rows(&mut self, id: SheetId, rows: usize) -> SheetsResult<()>;

    /// Filter/sort controls over the first `rows` x `columns` block
    fn set_filter(&mut self, id: SheetId, rows: usize, columns: usize) -> SheetsResult<()>;

    /// Make the sheet the visible one
    fn activate(&mut self, id: SheetId) -> SheetsResult<()>;
}

/// Bounding box of non-empty cells, anchored at (0, 0)
pub(crate) fn used_range(rows: &[Vec<String>]) -> Vec<Vec<String>> {
    let height = rows
        .iter()
        .rposition(|row| row.iter().any(|c| !c.is_empty()))
        .map_or(0, |i| i + 1);

    let width = rows[..height]
        .iter()
        .filter_map(|row| row.iter().rposition(|c| !c.is_empty()))
        .max()
        .map_or(0, |i| i + 1);

    rows[..height]
        .iter()
        .map(|row| {
            let mut cells: Vec<String> = row.iter().take(width).cloned().collect();
            cells.resize(width, String::new());
            cells
        })
        .collect()
}
