//! Configuration file (`phrase-sheets.yaml`)
//!
//! ```yaml
//! source: https://example.org/core-phrase-list-all.json
//! workbook: phrases.xlsx
//! output_dir: exports
//! file_prefix: core-phrase-list
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use crate::error::{SheetsError, SheetsResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "phrase-sheets.yaml";
pub const DEFAULT_WORKBOOK: &str = "phrases.xlsx";
pub const DEFAULT_OUTPUT_DIR: &str = "exports";
pub const DEFAULT_FILE_PREFIX: &str = "core-phrase-list";

/// Values given on the command line; each one wins over the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Explicit config file; must exist when given
    pub config_file: Option<PathBuf>,
    pub source: Option<String>,
    pub workbook: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub file_prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Catalog location: `http(s)://` URL or local path
    pub source: Option<String>,
    pub workbook: PathBuf,
    pub output_dir: PathBuf,
    pub file_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            workbook: PathBuf::from(DEFAULT_WORKBOOK),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

impl Config {
    /// Load the config file named by `overrides` (or the default one) and apply the overrides
    pub fn resolve(overrides: &ConfigOverrides) -> SheetsResult<Self> {
        Self::load(overrides.config_file.as_deref())?.with_overrides(
            overrides.source.clone(),
            overrides.workbook.clone(),
            overrides.output_dir.clone(),
            overrides.file_prefix.clone(),
        )
    }

    /// Load `path` if given (must exist), else `phrase-sheets.yaml` if present, else defaults
    pub fn load(path: Option<&Path>) -> SheetsResult<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    SheetsError::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                Self::from_yaml_str(&text)
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(Some(default_path))
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_yaml_str(text: &str) -> SheetsResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> SheetsResult<()> {
        if self.file_prefix.trim().is_empty() {
            return Err(SheetsError::Config(
                "file_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply command-line overrides
    pub fn with_overrides(
        mut self,
        source: Option<String>,
        workbook: Option<PathBuf>,
        output_dir: Option<PathBuf>,
        file_prefix: Option<String>,
    ) -> SheetsResult<Self> {
        if source.is_some() {
            self.source = source;
        }
        if let Some(workbook) = workbook {
            self.workbook = workbook;
        }
        if let Some(output_dir) = output_dir {
            self.output_dir = output_dir;
        }
        if let Some(file_prefix) = file_prefix {
            self.file_prefix = file_prefix;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn require_source(&self) -> SheetsResult<&str> {
        self.source.as_deref().ok_or_else(|| {
            SheetsError::Config(
                "No catalog source configured (set 'source' in the config file or pass --source)"
                    .to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.file_prefix, "core-phrase-list");
        assert!(config.require_source().is_err());
    }

    #[test]
    fn test_partial_yaml() {
        let config = Config::from_yaml_str("source: catalog.json\nfile_prefix: phrases\n").unwrap();
        assert_eq!(config.require_source().unwrap(), "catalog.json");
        assert_eq!(config.file_prefix, "phrases");
        assert_eq!(config.workbook, PathBuf::from(DEFAULT_WORKBOOK));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Config::from_yaml_str("sourse: typo.json\n").unwrap_err();
        assert!(matches!(err, SheetsError::Yaml(_)));
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::from_yaml_str("source: a.json\nworkbook: a.xlsx\n")
            .unwrap()
            .with_overrides(Some("b.json".to_string()), None, Some(PathBuf::from("out")), None)
            .unwrap();
        assert_eq!(config.source.as_deref(), Some("b.json"));
        assert_eq!(config.workbook, PathBuf::from("a.xlsx"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let err = Config::default()
            .with_overrides(None, None, None, Some(" ".to_string()))
            .unwrap_err();
        assert!(matches!(err, SheetsError::Config(_)));
    }

    #[test]
    fn test_resolve_reads_file_then_applies_overrides() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.yaml");
        std::fs::write(&path, "source: a.json\nfile_prefix: phrases\n").unwrap();

        let config = Config::resolve(&ConfigOverrides {
            config_file: Some(path),
            workbook: Some(PathBuf::from("b.xlsx")),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(config.source.as_deref(), Some("a.json"));
        assert_eq!(config.file_prefix, "phrases");
        assert_eq!(config.workbook, PathBuf::from("b.xlsx"));
    }

    #[test]
    fn test_resolve_rejects_unknown_key() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.yaml");
        std::fs::write(&path, "sauce: x\n").unwrap();

        let err = Config::resolve(&ConfigOverrides {
            config_file: Some(path),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/no/such/phrase-sheets.yaml"))).unwrap_err();
        assert!(matches!(err, SheetsError::Config(_)));
    }
}
