//! Blank row / record detection

use crate::types::{Field, Record};

/// A record is blank when every field is empty after trimming
pub fn is_blank_record(record: &Record) -> bool {
    Field::ALL.iter().all(|f| record.get(*f).trim().is_empty())
}

/// Cheap pre-check on a raw sheet row: every cell is the empty string.
///
/// Whitespace-only cells do not count as empty here; those rows are caught
/// by [`is_blank_record`] after field extraction.
pub fn is_blank_row<S: AsRef<str>>(row: &[S]) -> bool {
    row.iter().all(|cell| cell.as_ref().is_empty())
}
