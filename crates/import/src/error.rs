use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    /// A required column has no header cell matching any of its keywords.
    /// The whole file yields nothing.
    #[error("Missing required column: {column}")]
    MalformedHeader { column: String },
    #[error("Line {line}: {reason}")]
    UnparsableRow { line: u64, reason: String },
    /// Neither side carries a positive amount; skipped, not a failure.
    #[error("Line {line}: no debit or credit amount")]
    ZeroValueRow { line: u64 },
    #[error("Invalid date format: {0}")]
    InvalidDate(String),
    #[error("Parse task for {source_name} did not complete: {reason}")]
    TaskFailed { source_name: String, reason: String },
}

impl ImportError {
    /// Row-level problems skip one row; everything else affects the whole file.
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            ImportError::UnparsableRow { .. } | ImportError::ZeroValueRow { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Unknown dialect: '{0}'")]
    UnknownDialect(String),
}
