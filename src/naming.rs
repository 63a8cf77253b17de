//! Sheet and file naming
//!
//! - Sheet names: reserved characters removed, length bounded, never empty
//! - Uniqueness: deterministic `"{base} (n)"` suffixes
//! - Export slugs: lowercase ASCII, `-` separated

use crate::error::SheetsResult;
use std::collections::HashSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Characters a destination refuses in sheet names
pub const RESERVED_CHARS: [char; 7] = [':', '\\', '/', '?', '*', '[', ']'];

/// Hard limit on sheet name length imposed by the destination
pub const MAX_SHEET_NAME_LEN: usize = 100;

/// Sanitized names stay one below the hard limit
pub const SANITIZED_NAME_LEN: usize = MAX_SHEET_NAME_LEN - 1;

/// Used when a label sanitizes to nothing
pub const FALLBACK_SHEET_NAME: &str = "Sheet";

/// Used when a sheet name slugifies to nothing
pub const FALLBACK_SLUG: &str = "phrases";

pub const MAX_SLUG_LEN: usize = 80;

/// Turn an arbitrary group label into a valid sheet name.
///
/// Reserved characters become spaces, the result is trimmed, an empty result
/// falls back to [`FALLBACK_SHEET_NAME`], and the name is cut to
/// [`SANITIZED_NAME_LEN`] characters.
pub fn sanitize_table_name(label: &str) -> String {
    let replaced: String = label
        .chars()
        .map(|c| if RESERVED_CHARS.contains(&c) { ' ' } else { c })
        .collect();

    let trimmed = replaced.trim();
    let name = if trimmed.is_empty() {
        FALLBACK_SHEET_NAME
    } else {
        trimmed
    };

    name.chars().take(SANITIZED_NAME_LEN).collect()
}

/// Pick a name not yet used in this run nor present in the destination.
///
/// Returns `base` when it is free, otherwise the first free `"{base} (i)"`
/// for i = 2, 3, ... The caller must add the result to `reserved_this_run`
/// before allocating the next name. Lookup errors abort the search.
pub fn allocate_unique_name<F>(
    base: &str,
    reserved_this_run: &HashSet<String>,
    mut exists_in_destination: F,
) -> SheetsResult<String>
where
    F: FnMut(&str) -> SheetsResult<bool>,
{
    allocate_with(base, |name| {
        Ok(reserved_this_run.contains(name) || exists_in_destination(name)?)
    })
}

/// Same suffix scheme, driven by a single `taken(name)` lookup.
pub fn allocate_with<F>(base: &str, mut taken: F) -> SheetsResult<String>
where
    F: FnMut(&str) -> SheetsResult<bool>,
{
    if !taken(base)? {
        return Ok(base.to_string());
    }

    let mut i: usize = 2;
    loop {
        let candidate = format!("{} ({})", base, i);
        if !taken(&candidate)? {
            return Ok(candidate);
        }
        i += 1;
    }
}

/// Build a file-system safe slug from a sheet name.
///
/// Lowercased, diacritics stripped, runs of anything but `[a-z0-9]` collapsed
/// to `-`, outer `-` trimmed, cut to [`MAX_SLUG_LEN`], [`FALLBACK_SLUG`] if empty.
pub fn slugify(name: &str) -> String {
    let folded: String = name
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let words: Vec<&str> = folded
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|word| !word.is_empty())
        .collect();
    let slug: String = words.join("-").chars().take(MAX_SLUG_LEN).collect();

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// `<prefix>-<NN>-<slug>.json`, with `sequence` 1-based and at least two digits wide
pub fn export_file_name(prefix: &str, sequence: usize, table_name: &str) -> String {
    format!("{}-{:02}-{}.json", prefix, sequence, slugify(table_name))
}
