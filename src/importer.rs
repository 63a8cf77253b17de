//! Importer - catalog document → one sheet per group
//!
//! Replace-all protocol:
//! 1. create a placeholder sheet (a workbook may never be empty)
//! 2. delete every other sheet
//! 3. create and fill one sheet per group, in document order
//! 4. delete the placeholder
//! 5. activate the first created sheet
//!
//! Nothing is rolled back on failure: a run that stops part-way leaves the
//! destination in whatever state the completed steps produced.

use crate::destination::{Destination, SheetId};
use crate::error::{SheetsError, SheetsResult};
use crate::naming::{allocate_unique_name, allocate_with, sanitize_table_name};
use crate::types::{Document, Field, Group};
use std::collections::HashSet;
use tracing::{debug, info};
use uuid::Uuid;

/// What an import run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Created sheet names, in document order
    pub tables: Vec<String>,
    /// Data rows written across all sheets
    pub records: usize,
    /// Sheets that existed before the run and were deleted
    pub removed_sheets: usize,
    /// Catalog entries dropped by shape validation
    pub skipped_entries: usize,
}

pub struct Importer<'a, D: Destination> {
    destination: &'a mut D,
}

impl<'a, D: Destination> Importer<'a, D> {
    pub fn new(destination: &'a mut D) -> Self {
        Self { destination }
    }

    /// Wipe the destination and rebuild it from `document`
    pub fn import(&mut self, document: &Document) -> SheetsResult<ImportSummary> {
        // Refuse before the wipe: there would be nothing to replace the placeholder with
        if document.groups.is_empty() {
            return Err(SheetsError::SourceFormat(
                "Catalog contains no valid groups".to_string(),
            ));
        }

        let mut summary = ImportSummary {
            skipped_entries: document.skipped_entries,
            ..Default::default()
        };

        let placeholder = self.create_placeholder()?;
        summary.removed_sheets = self.remove_all_except(placeholder)?;
        info!(removed = summary.removed_sheets, "destination wiped");

        let mut reserved: HashSet<String> = HashSet::new();
        let mut first_sheet: Option<SheetId> = None;

        for group in &document.groups {
            let (id, name) = self.create_group_sheet(group, &reserved)?;
            first_sheet.get_or_insert(id);
            summary.records += group.records.len();
            reserved.insert(name.clone());
            summary.tables.push(name);
        }

        self.destination.delete_sheet(placeholder)?;
        debug!("placeholder removed");

        if let Some(id) = first_sheet {
            self.destination.activate(id)?;
        }

        info!(
            tables = summary.tables.len(),
            records = summary.records,
            "import complete"
        );
        Ok(summary)
    }

    fn create_placeholder(&mut self) -> SheetsResult<SheetId> {
        let token = Uuid::new_v4().simple().to_string();
        let base = format!("~import-{}", &token[..8]);
        let destination = &*self.destination;
        let name = allocate_with(&base, |n| destination.has_sheet(n))?;

        let id = self.destination.create_sheet(&name)?;
        debug!(placeholder = %name, "placeholder created");
        Ok(id)
    }

    /// Delete every sheet but `keep`, returning how many were removed
    fn remove_all_except(&mut self, keep: SheetId) -> SheetsResult<usize> {
        let doomed: Vec<SheetId> = self
            .destination
            .sheets()?
            .into_iter()
            .map(|s| s.id)
            .filter(|id| *id != keep)
            .collect();

        for id in &doomed {
            self.destination.delete_sheet(*id)?;
        }
        Ok(doomed.len())
    }

    fn create_group_sheet(
        &mut self,
        group: &Group,
        reserved: &HashSet<String>,
    ) -> SheetsResult<(SheetId, String)> {
        let base = sanitize_table_name(&group.label);
        let destination = &*self.destination;
        let name = allocate_unique_name(&base, reserved, |n| destination.has_sheet(n))?;

        let id = self.destination.create_sheet(&name)?;

        let mut rows: Vec<Vec<String>> = Vec::with_capacity(group.records.len() + 1);
        rows.push(Field::header_row());
        rows.extend(group.records.iter().map(|r| r.to_row()));

        self.destination.write_rows(id, 0, &rows)?;
        self.destination.freeze_rows(id, 1)?;
        self.destination.set_filter(id, rows.len(), Field::ALL.len())?;

        debug!(
            sheet = %name,
            label = %group.label,
            records = group.records.len(),
            "sheet created"
        );
        Ok((id, name))
    }
}
