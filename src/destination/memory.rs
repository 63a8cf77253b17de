//! In-memory workbook

use super::{used_range, Destination, SheetId, SheetInfo};
use crate::error::{SheetsError, SheetsResult};
use crate::naming::{MAX_SHEET_NAME_LEN, RESERVED_CHARS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MemorySheet {
    pub(crate) id: SheetId,
    pub(crate) name: String,
    pub(crate) rows: Vec<Vec<String>>,
    pub(crate) frozen_rows: usize,
    pub(crate) filter: Option<(usize, usize)>,
}

/// Naming rules a workbook enforces on new sheets.
///
/// Empty names and [`RESERVED_CHARS`] are always refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameRules {
    pub max_len: usize,
    /// `Greeting` and `greeting` name the same sheet
    pub case_insensitive: bool,
    /// Names may start or end with `'`
    pub edge_apostrophes: bool,
    /// Names the format keeps for itself, compared like sheet names
    pub reserved_names: &'static [&'static str],
}

impl NameRules {
    /// Hosted spreadsheet: exact-name identity, 100 characters
    pub const HOSTED: NameRules = NameRules {
        max_len: MAX_SHEET_NAME_LEN,
        case_insensitive: false,
        edge_apostrophes: true,
        reserved_names: &[],
    };

    pub fn same_name(&self, a: &str, b: &str) -> bool {
        if self.case_insensitive {
            a.to_lowercase() == b.to_lowercase()
        } else {
            a == b
        }
    }
}

/// Workbook held entirely in memory.
///
/// Applies the rules of a hosted spreadsheet by default: at least one sheet at
/// all times, unique non-empty names without reserved characters, bounded name
/// length. See [`MemoryWorkbook::with_name_rules`] for stricter formats.
#[derive(Debug, Clone)]
pub struct MemoryWorkbook {
    sheets: Vec<MemorySheet>,
    next_id: SheetId,
    active: Option<SheetId>,
    rules: NameRules,
}

impl Default for MemoryWorkbook {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryWorkbook {
    /// A fresh workbook with a single empty `Sheet1`
    pub fn new() -> Self {
        Self::from_sheets(vec![("Sheet1".to_string(), Vec::new())])
    }

    /// Build from `(name, rows)` pairs in tab order. Names are taken as-is.
    pub fn from_sheets(sheets: Vec<(String, Vec<Vec<String>>)>) -> Self {
        let mut book = Self {
            sheets: Vec::new(),
            next_id: 1,
            active: None,
            rules: NameRules::HOSTED,
        };
        for (name, rows) in sheets {
            let id = book.take_id();
            book.sheets.push(MemorySheet {
                id,
                name,
                rows,
                frozen_rows: 0,
                filter: None,
            });
        }
        book.active = book.sheets.first().map(|s| s.id);
        book
    }

    /// Enforce `rules` on sheets created from now on
    pub fn with_name_rules(mut self, rules: NameRules) -> Self {
        self.rules = rules;
        self
    }

    /// Append a sheet with content, returning its id
    pub fn add_sheet<S: AsRef<str>>(&mut self, name: &str, rows: &[Vec<S>]) -> SheetsResult<SheetId> {
        let id = self.create_sheet(name)?;
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|r| r.iter().map(|c| c.as_ref().to_string()).collect())
            .collect();
        self.write_rows(id, 0, &rows)?;
        Ok(id)
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    pub fn active_sheet_name(&self) -> Option<&str> {
        let active = self.active?;
        self.sheets
            .iter()
            .find(|s| s.id == active)
            .map(|s| s.name.as_str())
    }

    pub fn frozen_rows(&self, name: &str) -> Option<usize> {
        self.find_by_name(name).map(|s| s.frozen_rows)
    }

    /// `(rows, columns)` covered by the header filter, if any
    pub fn filter_range(&self, name: &str) -> Option<(usize, usize)> {
        self.find_by_name(name).and_then(|s| s.filter)
    }

    /// Raw rows of a sheet by name
    pub fn rows(&self, name: &str) -> Option<&[Vec<String>]> {
        self.find_by_name(name).map(|s| s.rows.as_slice())
    }

    pub(crate) fn sheet_list(&self) -> &[MemorySheet] {
        &self.sheets
    }

    pub(crate) fn active_id(&self) -> Option<SheetId> {
        self.active
    }

    fn take_id(&mut self) -> SheetId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn find_by_name(&self, name: &str) -> Option<&MemorySheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    fn name_taken(&self, name: &str) -> bool {
        self.sheets.iter().any(|s| self.rules.same_name(&s.name, name))
    }

    fn sheet(&self, id: SheetId) -> SheetsResult<&MemorySheet> {
        self.sheets
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| SheetsError::Destination(format!("No sheet with id {}", id)))
    }

    fn sheet_mut(&mut self, id: SheetId) -> SheetsResult<&mut MemorySheet> {
        self.sheets
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| SheetsError::Destination(format!("No sheet with id {}", id)))
    }

    fn validate_name(&self, name: &str) -> SheetsResult<()> {
        if name.trim().is_empty() {
            return Err(SheetsError::Destination(
                "Sheet name must not be empty".to_string(),
            ));
        }
        if name.chars().count() > self.rules.max_len {
            return Err(SheetsError::Destination(format!(
                "Sheet name '{}' is longer than {} characters",
                name, self.rules.max_len
            )));
        }
        if let Some(c) = name.chars().find(|c| RESERVED_CHARS.contains(c)) {
            return Err(SheetsError::Destination(format!(
                "Sheet name '{}' contains reserved character '{}'",
                name, c
            )));
        }
        if !self.rules.edge_apostrophes && (name.starts_with('\'') || name.ends_with('\'')) {
            return Err(SheetsError::Destination(format!(
                "Sheet name '{}' must not start or end with an apostrophe",
                name
            )));
        }
        if let Some(reserved) = self
            .rules
            .reserved_names
            .iter()
            .find(|r| self.rules.same_name(r, name))
        {
            return Err(SheetsError::Destination(format!(
                "Sheet name '{}' is reserved",
                reserved
            )));
        }
        if self.name_taken(name) {
            return Err(SheetsError::Destination(format!(
                "A sheet named '{}' already exists",
                name
            )));
        }
        Ok(())
    }
}

impl Destination for MemoryWorkbook {
    fn sheets(&self) -> SheetsResult<Vec<SheetInfo>> {
        Ok(self
            .sheets
            .iter()
            .map(|s| SheetInfo {
                id: s.id,
                name: s.name.clone(),
            })
            .collect())
    }

    fn has_sheet(&self, name: &str) -> SheetsResult<bool> {
        Ok(self.name_taken(name))
    }

    fn create_sheet(&mut self, name: &str) -> SheetsResult<SheetId> {
        self.validate_name(name)?;
        let id = self.take_id();
        self.sheets.push(MemorySheet {
            id,
            name: name.to_string(),
            rows: Vec::new(),
            frozen_rows: 0,
            filter: None,
        });
        Ok(id)
    }

    fn delete_sheet(&mut self, id: SheetId) -> SheetsResult<()> {
        let position = self
            .sheets
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| SheetsError::Destination(format!("No sheet with id {}", id)))?;

        if self.sheets.len() == 1 {
            return Err(SheetsError::Destination(
                "Cannot delete the only sheet of a workbook".to_string(),
            ));
        }

        self.sheets.remove(position);
        if self.active == Some(id) {
            self.active = self.sheets.first().map(|s| s.id);
        }
        Ok(())
    }

    fn read_grid(&self, id: SheetId) -> SheetsResult<Vec<Vec<String>>> {
        Ok(used_range(&self.sheet(id)?.rows))
    }

    fn write_rows(
        &mut self,
        id: SheetId,
        start_row: usize,
        rows: &[Vec<String>],
    ) -> SheetsResult<()> {
        let sheet = self.sheet_mut(id)?;
        let needed = start_row + rows.len();
        if sheet.rows.len() < needed {
            sheet.rows.resize(needed, Vec::new());
        }

        for (offset, row) in rows.iter().enumerate() {
            let target = &mut sheet.rows[start_row + offset];
            if target.len() < row.len() {
                target.resize(row.len(), String::new());
            }
            for (col, value) in row.iter().enumerate() {
                target[col] = value.clone();
            }
        }
        Ok(())
    }

    fn freeze_rows(&mut self, id: SheetId, rows: usize) -> SheetsResult<()> {
        self.sheet_mut(id)?.frozen_rows = rows;
        Ok(())
    }

    fn set_filter(&mut self, id: SheetId, rows: usize, columns: usize) -> SheetsResult<()> {
        if rows == 0 || columns == 0 {
            return Err(SheetsError::Destination(
                "Filter range must cover at least one cell".to_string(),
            ));
        }
        self.sheet_mut(id)?.filter = Some((rows, columns));
        Ok(())
    }

    fn activate(&mut self, id: SheetId) -> SheetsResult<()> {
        self.sheet(id)?;
        self.active = Some(id);
        Ok(())
    }
}
