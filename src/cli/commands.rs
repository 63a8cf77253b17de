use crate::config::{Config, ConfigOverrides};
use crate::destination::XlsxWorkbook;
use crate::error::{SheetsError, SheetsResult};
use crate::exporter::{ExportSummary, Exporter};
use crate::importer::{ImportSummary, Importer};
use crate::merge::{merge_directory, MergeSummary};
use crate::sink::DirectorySink;
use crate::source::source_for;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::error;

/// Print the failure notice and log it, then hand the error back
fn report_failure(action: &str, err: SheetsError) -> SheetsError {
    println!(
        "{} {} ({})",
        format!("❌ {} failed:", action).bold().red(),
        err,
        err.kind().as_str()
    );
    error!(kind = err.kind().as_str(), error = %err, "{} failed", action);
    err
}

/// Execute the import command
pub fn import(overrides: &ConfigOverrides, verbose: bool) -> SheetsResult<()> {
    println!("{}", "📥 Phrase Sheets - Import".bold().green());
    let config = Config::resolve(overrides).map_err(|e| report_failure("Import", e))?;
    println!("   Source:   {}", config.source.as_deref().unwrap_or("-"));
    println!("   Workbook: {}\n", config.workbook.display());

    let summary = run_import(&config).map_err(|e| report_failure("Import", e))?;

    if verbose {
        for name in &summary.tables {
            println!("   📄 {}", name.bright_blue());
        }
        println!();
    }

    println!("{}", "✅ Import Complete!".bold().green());
    println!(
        "   {} sheets, {} phrases ({} old sheets replaced)",
        summary.tables.len(),
        summary.records,
        summary.removed_sheets
    );
    if summary.skipped_entries > 0 {
        println!(
            "{}",
            format!(
                "   ⚠️  {} malformed catalog entries skipped",
                summary.skipped_entries
            )
            .yellow()
        );
    }
    Ok(())
}

/// Fetch the catalog and rebuild the workbook from it
pub fn run_import(config: &Config) -> SheetsResult<ImportSummary> {
    let source = source_for(config.require_source()?);
    let document = source.load()?;

    let mut workbook = XlsxWorkbook::open(&config.workbook)?;
    let summary = Importer::new(&mut workbook).import(&document)?;
    workbook.save()?;

    Ok(summary)
}

/// Execute the export command
pub fn export(overrides: &ConfigOverrides, verbose: bool) -> SheetsResult<()> {
    println!("{}", "📤 Phrase Sheets - Export".bold().green());
    let config = Config::resolve(overrides).map_err(|e| report_failure("Export", e))?;
    println!("   Workbook: {}", config.workbook.display());
    println!("   Output:   {}\n", config.output_dir.display());

    let (dir, summary) = run_export(&config).map_err(|e| report_failure("Export", e))?;

    if verbose {
        for file in &summary.files {
            println!(
                "   📄 {} → {} ({} phrases)",
                file.table.bright_blue(),
                file.file_name,
                file.records
            );
        }
        println!();
    }

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   {} files in {}", summary.files.len(), dir.display());
    if summary.skipped_rows > 0 {
        println!("   {} blank rows skipped", summary.skipped_rows);
    }
    Ok(())
}

/// Write one JSON file per sheet into a fresh output directory
pub fn run_export(config: &Config) -> SheetsResult<(PathBuf, ExportSummary)> {
    if !config.workbook.exists() {
        return Err(SheetsError::Destination(format!(
            "Workbook not found: {}",
            config.workbook.display()
        )));
    }
    let workbook = XlsxWorkbook::open(&config.workbook)?;

    let mut sink = DirectorySink::create(&config.output_dir, &config.file_prefix)?;
    let summary = Exporter::new(config.file_prefix.as_str()).export(&workbook, &mut sink)?;

    Ok((sink.dir().to_path_buf(), summary))
}

/// Execute the merge command
pub fn merge(dir: &Path, overrides: &ConfigOverrides) -> SheetsResult<()> {
    println!("{}", "🧩 Phrase Sheets - Merge".bold().green());
    let config = Config::resolve(overrides).map_err(|e| report_failure("Merge", e))?;
    println!("   Directory: {}\n", dir.display());

    let summary: MergeSummary =
        merge_directory(dir, &config.file_prefix).map_err(|e| report_failure("Merge", e))?;

    println!("{}", "✅ Merge Complete!".bold().green());
    println!(
        "   {} files, {} phrases → {}",
        summary.inputs.len(),
        summary.records,
        summary.output.display()
    );
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
