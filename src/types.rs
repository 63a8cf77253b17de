use serde::{Deserialize, Deserializer, Serialize};

//==============================================================================
// Canonical Fields
//==============================================================================

/// One of the four fixed phrase fields, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    English,
    Spanish,
    Domain,
    Syntax,
}

impl Field {
    /// All fields in canonical order (also the header order of generated sheets)
    pub const ALL: [Field; 4] = [Field::English, Field::Spanish, Field::Domain, Field::Syntax];

    /// Field name as it appears in documents and header rows
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::English => "english",
            Field::Spanish => "spanish",
            Field::Domain => "domain",
            Field::Syntax => "syntax",
        }
    }

    /// Canonical header row
    pub fn header_row() -> Vec<String> {
        Self::ALL.iter().map(|f| f.as_str().to_string()).collect()
    }
}

//==============================================================================
// Records
//==============================================================================

/// A single phrase entry. Absent or null fields are held as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, deserialize_with = "empty_if_null")]
    pub english: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub spanish: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub domain: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub syntax: String,
}

impl Record {
    pub fn new(
        english: impl Into<String>,
        spanish: impl Into<String>,
        domain: impl Into<String>,
        syntax: impl Into<String>,
    ) -> Self {
        Self {
            english: english.into(),
            spanish: spanish.into(),
            domain: domain.into(),
            syntax: syntax.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::English => &self.english,
            Field::Spanish => &self.spanish,
            Field::Domain => &self.domain,
            Field::Syntax => &self.syntax,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::English => self.english = value,
            Field::Spanish => self.spanish = value,
            Field::Domain => self.domain = value,
            Field::Syntax => self.syntax = value,
        }
    }

    /// Values in canonical order, as written to a data row
    pub fn to_row(&self) -> Vec<String> {
        Field::ALL.iter().map(|f| self.get(*f).to_string()).collect()
    }
}

fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

//==============================================================================
// Documents
//==============================================================================

/// A named group of records (`function` in the catalog)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub label: String,
    pub records: Vec<Record>,
}

impl Group {
    pub fn new(label: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            label: label.into(),
            records,
        }
    }
}

/// The whole catalog: groups in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub groups: Vec<Group>,
    /// Number of top-level entries dropped by shape validation while parsing
    pub skipped_entries: usize,
}

impl Document {
    pub fn new(groups: Vec<Group>) -> Self {
        Self {
            groups,
            skipped_entries: 0,
        }
    }

    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }
}

/// One exported file: a single group in its on-disk JSON form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseFile {
    pub function: String,
    #[serde(default)]
    pub phrases: Vec<Record>,
}

impl From<PhraseFile> for Group {
    fn from(file: PhraseFile) -> Self {
        Group::new(file.function, file.phrases)
    }
}
