use super::*;
use crate::types::PhraseFile;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const CATALOG: &str = r#"[
  {"function": "Request", "phrases": [
    {"english": "Please", "spanish": "Por favor", "domain": "courtesy", "syntax": "interj"},
    {"english": "Can you help me?", "spanish": "¿Me puedes ayudar?", "domain": "", "syntax": "question"}
  ]},
  {"function": "Reject/Refuse", "phrases": [
    {"english": "No, thanks", "spanish": "No, gracias"}
  ]}
]"#;

fn config_in(temp_dir: &TempDir) -> Config {
    let catalog = temp_dir.path().join("catalog.json");
    fs::write(&catalog, CATALOG).unwrap();

    Config::default()
        .with_overrides(
            Some(catalog.display().to_string()),
            Some(temp_dir.path().join("phrases.xlsx")),
            Some(temp_dir.path().join("exports")),
            None,
        )
        .unwrap()
}

// =========================================================================
// run_import Tests
// =========================================================================

#[test]
fn test_run_import_creates_workbook() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);

    let summary = run_import(&config).unwrap();
    assert_eq!(summary.tables, vec!["Request", "Reject Refuse"]);
    assert_eq!(summary.records, 3);
    assert!(config.workbook.exists());
}

#[test]
fn test_run_import_without_source_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        source: None,
        ..config_in(&temp_dir)
    };
    let err = run_import(&config).unwrap_err();
    assert!(matches!(err, SheetsError::Config(_)));
}

#[test]
fn test_run_import_bad_catalog_leaves_workbook_alone() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    run_import(&config).unwrap();
    let before = fs::read(&config.workbook).unwrap();

    fs::write(temp_dir.path().join("catalog.json"), r#"{"not": "an array"}"#).unwrap();
    let err = run_import(&config).unwrap_err();
    assert!(matches!(err, SheetsError::SourceFormat(_)));
    assert_eq!(fs::read(&config.workbook).unwrap(), before);
}

#[test]
fn test_import_reports_config_errors() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("phrase-sheets.yaml");
    fs::write(&path, "file_prefix: \"\"\n").unwrap();

    let overrides = ConfigOverrides {
        config_file: Some(path),
        ..Default::default()
    };
    let err = import(&overrides, false).unwrap_err();
    assert!(matches!(err, SheetsError::Config(_)));
}

// =========================================================================
// run_export Tests
// =========================================================================

#[test]
fn test_run_export_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    run_import(&config).unwrap();

    let (dir, summary) = run_export(&config).unwrap();
    assert_eq!(summary.files.len(), 2);
    assert!(dir.starts_with(&config.output_dir));

    let first = fs::read_to_string(dir.join("core-phrase-list-01-request.json")).unwrap();
    let parsed: PhraseFile = serde_json::from_str(&first).unwrap();
    assert_eq!(parsed.function, "Request");
    assert_eq!(parsed.phrases[1].spanish, "¿Me puedes ayudar?");

    let second = fs::read_to_string(dir.join("core-phrase-list-02-reject-refuse.json")).unwrap();
    let parsed: PhraseFile = serde_json::from_str(&second).unwrap();
    assert_eq!(parsed.function, "Reject Refuse");
    assert_eq!(parsed.phrases.len(), 1);
}

#[test]
fn test_run_export_twice_keeps_both_generations() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    run_import(&config).unwrap();

    let (first, _) = run_export(&config).unwrap();
    let (second, _) = run_export(&config).unwrap();
    assert_ne!(first, second);
    assert!(first.join("core-phrase-list-01-request.json").exists());
    assert!(second.join("core-phrase-list-01-request.json").exists());
}

#[test]
fn test_run_export_missing_workbook() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    let err = run_export(&config).unwrap_err();
    assert!(matches!(err, SheetsError::Destination(_)));
}

// =========================================================================
// merge Tests
// =========================================================================

#[test]
fn test_export_then_merge_restores_catalog_shape() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_in(&temp_dir);
    run_import(&config).unwrap();
    let (dir, _) = run_export(&config).unwrap();

    merge(&dir, &ConfigOverrides::default()).unwrap();

    let merged = fs::read_to_string(dir.join("core-phrase-list-all.json")).unwrap();
    let document = crate::source::parse_document(&merged).unwrap();
    assert_eq!(document.groups.len(), 2);
    assert_eq!(document.record_count(), 3);
}
