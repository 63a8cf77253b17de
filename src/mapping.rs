//! Header row → field position binding
//!
//! Sheets are edited by hand, so columns are located by header text rather
//! than position. Comparison ignores case and surrounding whitespace.

use crate::types::Field;

/// Column index for each canonical field, computed once per sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [Option<usize>; 4],
}

impl ColumnMap {
    /// Bind each canonical field to the first matching observed header
    pub fn from_headers<S: AsRef<str>>(observed_headers: &[S]) -> Self {
        let normalized: Vec<String> = observed_headers
            .iter()
            .map(|h| normalize_header(h.as_ref()))
            .collect();

        let mut indices = [None; 4];
        for (slot, field) in indices.iter_mut().zip(Field::ALL.iter()) {
            *slot = normalized.iter().position(|h| h == field.as_str());
        }

        Self { indices }
    }

    /// Column of `field`, `None` when no header matches
    pub fn index_of(&self, field: Field) -> Option<usize> {
        self.indices[field_slot(field)]
    }

    /// Fields whose header could not be located
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .iter()
            .copied()
            .filter(|f| self.index_of(*f).is_none())
            .collect()
    }

    /// Cell for `field` in `row`; a missing column or short row reads as empty
    pub fn cell<'a, S: AsRef<str>>(&self, row: &'a [S], field: Field) -> &'a str {
        self.index_of(field)
            .and_then(|i| row.get(i))
            .map_or("", |s| s.as_ref())
    }
}

fn field_slot(field: Field) -> usize {
    match field {
        Field::English => 0,
        Field::Spanish => 1,
        Field::Domain => 2,
        Field::Syntax => 3,
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}
