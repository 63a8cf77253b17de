use thiserror::Error;

pub type SheetsResult<T> = Result<T, SheetsError>;

/// Coarse classification of a failure, reported to the user alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SourceFetch,
    SourceFormat,
    EntryShape,
    Destination,
    Sink,
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::SourceFetch => "source fetch",
            ErrorKind::SourceFormat => "source format",
            ErrorKind::EntryShape => "entry shape",
            ErrorKind::Destination => "destination",
            ErrorKind::Sink => "sink",
            ErrorKind::Config => "config",
        }
    }
}

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("Failed to fetch catalog: {0}")]
    SourceFetch(String),

    #[error("Malformed catalog: {0}")]
    SourceFormat(String),

    #[error("Malformed group entry #{index}: {reason}")]
    EntryShape { index: usize, reason: String },

    #[error("Destination error: {0}")]
    Destination(String),

    #[error("Output error: {0}")]
    Sink(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SheetsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SheetsError::SourceFetch(_) => ErrorKind::SourceFetch,
            SheetsError::SourceFormat(_) | SheetsError::Json(_) => ErrorKind::SourceFormat,
            SheetsError::EntryShape { .. } => ErrorKind::EntryShape,
            SheetsError::Destination(_) => ErrorKind::Destination,
            SheetsError::Sink(_) | SheetsError::Io(_) => ErrorKind::Sink,
            SheetsError::Config(_) | SheetsError::Yaml(_) => ErrorKind::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_wrapped_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(SheetsError::from(json_err).kind(), ErrorKind::SourceFormat);

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert_eq!(SheetsError::from(io_err).kind(), ErrorKind::Sink);
    }

    #[test]
    fn test_entry_shape_message() {
        let err = SheetsError::EntryShape {
            index: 3,
            reason: "missing 'function'".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed group entry #3: missing 'function'");
        assert_eq!(err.kind().as_str(), "entry shape");
    }
}
