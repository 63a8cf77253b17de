//! Merge per-group export files back into one catalog document
//!
//! Files named `<prefix>-*.json` in a directory are read in file-name order
//! and written as a single JSON array to `<prefix>-all.json`, the shape the
//! importer expects.

use crate::error::{SheetsError, SheetsResult};
use crate::types::PhraseFile;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub output: PathBuf,
    /// Input file names, in merge order
    pub inputs: Vec<String>,
    pub records: usize,
}

pub fn merged_file_name(prefix: &str) -> String {
    format!("{}-all.json", prefix)
}

/// Input files for `prefix` in `dir`, sorted by name
pub fn collect_inputs(dir: &Path, prefix: &str) -> SheetsResult<Vec<PathBuf>> {
    let output_name = merged_file_name(prefix);
    let wanted_prefix = format!("{}-", prefix);

    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        if path.is_file()
            && name.starts_with(&wanted_prefix)
            && name.ends_with(".json")
            && name != output_name
        {
            inputs.push(path);
        }
    }

    inputs.sort();
    Ok(inputs)
}

/// Merge the export files of `dir` into `<dir>/<prefix>-all.json`
pub fn merge_directory(dir: &Path, prefix: &str) -> SheetsResult<MergeSummary> {
    let inputs = collect_inputs(dir, prefix)?;
    if inputs.is_empty() {
        return Err(SheetsError::SourceFormat(format!(
            "No {}-*.json files in {}",
            prefix,
            dir.display()
        )));
    }

    let mut merged: Vec<PhraseFile> = Vec::with_capacity(inputs.len());
    for path in &inputs {
        let text = fs::read_to_string(path)?;
        let file: PhraseFile = serde_json::from_str(&text).map_err(|e| {
            SheetsError::SourceFormat(format!("{}: {}", path.display(), e))
        })?;
        debug!(file = %path.display(), phrases = file.phrases.len(), "merged");
        merged.push(file);
    }

    let output = dir.join(merged_file_name(prefix));
    let json = serde_json::to_string_pretty(&merged)?;
    fs::write(&output, json)
        .map_err(|e| SheetsError::Sink(format!("Failed to write {}: {}", output.display(), e)))?;

    let records: usize = merged.iter().map(|f| f.phrases.len()).sum();
    info!(files = inputs.len(), records, output = %output.display(), "merge complete");

    Ok(MergeSummary {
        output,
        inputs: inputs
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
            .collect(),
        records,
    })
}
