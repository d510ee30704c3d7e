pub mod config;
pub mod csv;
pub mod dialect;
pub mod error;
pub mod orchestrator;
pub mod parse;
pub mod rules;

pub use config::ImportConfig;
pub use crate::csv::{DialectParser, ParsedFile};
pub use dialect::{Column, ColumnKeywords, Dialect, Layout};
pub use error::{ConfigError, ImportError};
pub use orchestrator::{import_parsed, import_transactions, ImportSummary, Importer, ParsedSource, SourceFile};
pub use parse::{parse_amount, parse_date, DecimalSeparator, DEFAULT_DATE_FORMATS};
pub use rules::{Categorizer, CategoryRule, MatchType, RuleTable};

/// Parses one file with the named dialect (configured or built-in).
pub fn parse_with_dialect(
    config: &ImportConfig,
    dialect: &str,
    raw: &[u8],
) -> Result<Vec<tally_core::Transaction>, ConfigError> {
    let parser = DialectParser::new(config.dialect(dialect)?);
    Ok(parser.parse_bytes(raw))
}
