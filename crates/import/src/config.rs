use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::error::ConfigError;

/// Dialect definitions for a deployment. Anything named here overrides the
/// built-in dialect of the same name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportConfig {
    #[serde(default)]
    pub dialects: Vec<Dialect>,
}

impl ImportConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_content)?)
    }

    pub fn dialect(&self, name: &str) -> Result<Dialect, ConfigError> {
        self.dialects
            .iter()
            .find(|d| d.name == name)
            .cloned()
            .or_else(|| Dialect::builtin(name))
            .ok_or_else(|| ConfigError::UnknownDialect(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Layout;
    use crate::DialectParser;
    use tally_core::Direction;

    const CONFIG: &str = r#"
[[dialects]]
name = "dual_column"
layout = "dual_column"
date_formats = ["%d.%m.%Y"]
delimiter = ";"
decimal_separator = "comma"

[dialects.columns]
date = ["datum"]
description = ["buchungstext"]
debit = ["soll"]
credit = ["haben"]

[dialects.categories]
default_category = "Sonstiges"

[[dialects.categories.rules]]
category = "Miete"
keywords = ["miete"]
"#;

    #[test]
    fn configured_dialect_overrides_builtin() {
        let config = ImportConfig::from_toml(CONFIG).unwrap();
        let dialect = config.dialect("dual_column").unwrap();
        assert_eq!(dialect.date_formats, vec!["%d.%m.%Y".to_string()]);
        assert_eq!(dialect.categories.default_category, "Sonstiges");
    }

    #[test]
    fn falls_back_to_builtin() {
        let config = ImportConfig::from_toml(CONFIG).unwrap();
        assert_eq!(config.dialect("signed_amount").unwrap().layout, Layout::SignedAmount);
        assert!(matches!(
            config.dialect("qif"),
            Err(ConfigError::UnknownDialect(_))
        ));
    }

    #[test]
    fn localized_headers_and_comma_decimals() {
        let config = ImportConfig::from_toml(CONFIG).unwrap();
        let parser = DialectParser::new(config.dialect("dual_column").unwrap());
        let data = "Datum;Buchungstext;Soll;Haben\n01.04.2024;Miete April;1.250,00;\n";
        let txs = parser.parse(data);
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].amount().to_cents(), 125_000);
        assert_eq!(txs[0].direction(), Direction::Debit);
        assert_eq!(txs[0].category(), "Miete");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(matches!(
            ImportConfig::from_toml("dialects = 3"),
            Err(ConfigError::Toml(_))
        ));
    }
}
