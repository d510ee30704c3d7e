use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parse::DecimalSeparator;
use crate::rules::{CategoryRule, RuleTable};

pub const DUAL_COLUMN: &str = "dual_column";
pub const SIGNED_AMOUNT: &str = "signed_amount";

/// How a dialect expresses amount and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Separate debit and credit columns, each holding a non-negative value.
    DualColumn,
    /// One amount column; negative is an outflow.
    SignedAmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    Description,
    Debit,
    Credit,
    Amount,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Date => write!(f, "date"),
            Column::Description => write!(f, "description"),
            Column::Debit => write!(f, "debit"),
            Column::Credit => write!(f, "credit"),
            Column::Amount => write!(f, "amount"),
        }
    }
}

/// Header keywords per column. A header cell resolves a column when its
/// lower-cased text contains any of the column's keywords.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnKeywords {
    #[serde(default)]
    pub date: Vec<String>,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub debit: Vec<String>,
    #[serde(default)]
    pub credit: Vec<String>,
    #[serde(default)]
    pub amount: Vec<String>,
}

impl ColumnKeywords {
    pub fn for_column(&self, column: Column) -> &[String] {
        match column {
            Column::Date => &self.date,
            Column::Description => &self.description,
            Column::Debit => &self.debit,
            Column::Credit => &self.credit,
            Column::Amount => &self.amount,
        }
    }
}

/// One source's CSV conventions: column layout, header vocabulary, date and
/// number formats, and the rule table used to categorize its rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dialect {
    pub name: String,
    pub layout: Layout,
    pub columns: ColumnKeywords,
    pub date_formats: Vec<String>,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default)]
    pub decimal_separator: DecimalSeparator,
    #[serde(default)]
    pub categories: RuleTable,
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Dialect {
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter.as_bytes().first().copied().unwrap_or(b',')
    }

    pub fn required_columns(&self) -> &'static [Column] {
        match self.layout {
            Layout::DualColumn => &[Column::Date, Column::Description, Column::Debit, Column::Credit],
            Layout::SignedAmount => &[Column::Date, Column::Description, Column::Amount],
        }
    }

    /// Bank export with Spanish or English headers, day-first dates and
    /// separate `Débito`/`Crédito` columns.
    pub fn dual_column() -> Self {
        Dialect {
            name: DUAL_COLUMN.to_string(),
            layout: Layout::DualColumn,
            columns: ColumnKeywords {
                date: strings(&["fecha", "date"]),
                description: strings(&["descrip", "concepto"]),
                debit: strings(&["débito", "debito", "debit", "cargo"]),
                credit: strings(&["crédito", "credito", "credit", "abono"]),
                amount: Vec::new(),
            },
            date_formats: strings(&["%d/%m/%Y", "%d-%m-%Y"]),
            delimiter: default_delimiter(),
            decimal_separator: DecimalSeparator::Dot,
            categories: RuleTable {
                credit_rules: vec![
                    CategoryRule::contains("Salary", &["nomina", "nómina", "salario", "payroll"]),
                    CategoryRule::contains("Interest", &["interes", "interés", "rendimiento"]),
                ],
                rules: vec![
                    CategoryRule::contains("Transfer", &["transferencia", "transfer", "traslado"]),
                    CategoryRule::contains("Payments", &["pago", "payment"]),
                    CategoryRule::contains("Cash Withdrawal", &["retiro", "cajero"]),
                    CategoryRule::contains("Bank Fees", &["cuota de manejo", "comision", "comisión", "gmf"]),
                    CategoryRule::contains("Groceries", &["supermercado", "mercado", "grocer"]),
                    CategoryRule::contains("Dining", &["restaurante", "cafe", "café"]),
                    CategoryRule::contains("Transport", &["uber", "taxi", "gasolina", "peaje"]),
                    CategoryRule::contains("Utilities", &["energia", "energía", "acueducto", "gas natural", "internet"]),
                ],
                default_category: "Misc".to_string(),
            },
        }
    }

    /// Digital-wallet export: one signed amount column carrying a currency code,
    /// and dates in several shapes (often with a time of day).
    pub fn signed_amount() -> Self {
        Dialect {
            name: SIGNED_AMOUNT.to_string(),
            layout: Layout::SignedAmount,
            columns: ColumnKeywords {
                date: strings(&["date", "fecha"]),
                description: strings(&["description", "descrip", "detail"]),
                debit: Vec::new(),
                credit: Vec::new(),
                amount: strings(&["amount", "monto", "valor", "importe"]),
            },
            date_formats: strings(&["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"]),
            delimiter: default_delimiter(),
            decimal_separator: DecimalSeparator::Dot,
            categories: RuleTable {
                credit_rules: vec![
                    CategoryRule::contains("Income", &["deposit", "salary", "payroll", "refund"]),
                    CategoryRule::contains("Interest", &["interest", "yield"]),
                ],
                rules: vec![
                    CategoryRule::contains("Transfer", &["transfer", "top up", "top-up"]),
                    CategoryRule::contains("Investments", &["broker", "invest", "stock"]),
                    CategoryRule::contains("Subscriptions", &["netflix", "spotify", "subscription"]),
                    CategoryRule::contains("Dining", &["restaurant", "cafe", "coffee"]),
                    CategoryRule::contains("Groceries", &["market", "grocery"]),
                    CategoryRule::contains("Fees", &["fee", "commission"]),
                ],
                default_category: "Other".to_string(),
            },
        }
    }

    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            DUAL_COLUMN => Some(Self::dual_column()),
            SIGNED_AMOUNT => Some(Self::signed_amount()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup() {
        assert_eq!(Dialect::builtin("dual_column").unwrap().layout, Layout::DualColumn);
        assert_eq!(Dialect::builtin("signed_amount").unwrap().layout, Layout::SignedAmount);
        assert!(Dialect::builtin("ofx").is_none());
    }

    #[test]
    fn required_columns_follow_layout() {
        assert_eq!(Dialect::dual_column().required_columns().len(), 4);
        assert!(Dialect::signed_amount().required_columns().contains(&Column::Amount));
    }

    #[test]
    fn deserializes_from_toml_with_defaults() {
        let toml = r#"
name = "neo"
layout = "signed_amount"
date_formats = ["%Y-%m-%d"]

[columns]
date = ["booked"]
description = ["memo"]
amount = ["value"]
"#;
        let dialect: Dialect = toml::from_str(toml).unwrap();
        assert_eq!(dialect.layout, Layout::SignedAmount);
        assert_eq!(dialect.decimal_separator, DecimalSeparator::Dot);
        assert_eq!(dialect.delimiter_byte(), b',');
        assert_eq!(dialect.columns.for_column(Column::Amount), ["value".to_string()]);
        assert_eq!(dialect.categories.default_category, "Misc");
    }
}
