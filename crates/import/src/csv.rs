use csv::StringRecord;
use rust_decimal::Decimal;
use tally_core::{Direction, Money, Transaction};

use crate::dialect::{Column, Dialect, Layout};
use crate::error::ImportError;
use crate::parse::{parse_amount, parse_date};
use crate::rules::Categorizer;

/// Everything a file produced: the transactions plus the rows it had to skip.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<ImportError>,
}

#[derive(Debug, Clone, Copy)]
enum AmountColumns {
    Dual { debit: usize, credit: usize },
    Signed { amount: usize },
}

#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    date: usize,
    description: usize,
    amounts: AmountColumns,
}

impl ColumnMap {
    fn max_index(&self) -> usize {
        let amount_max = match self.amounts {
            AmountColumns::Dual { debit, credit } => debit.max(credit),
            AmountColumns::Signed { amount } => amount,
        };
        self.date.max(self.description).max(amount_max)
    }
}

/// Turns raw CSV text in one dialect into categorized transactions.
#[derive(Debug, Clone)]
pub struct DialectParser {
    dialect: Dialect,
    categorizer: Categorizer,
}

impl DialectParser {
    pub fn new(dialect: Dialect) -> Self {
        let categorizer = Categorizer::new(dialect.categories.clone());
        Self { dialect, categorizer }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    /// Fail-soft entry point: a file that can't be read yields no transactions.
    pub fn parse(&self, raw: &str) -> Vec<Transaction> {
        match self.parse_detailed(raw) {
            Ok(parsed) => parsed.transactions,
            Err(e) => {
                tracing::warn!(dialect = %self.dialect.name, "skipping file: {e}");
                Vec::new()
            }
        }
    }

    pub fn parse_bytes(&self, raw: &[u8]) -> Vec<Transaction> {
        self.parse(&String::from_utf8_lossy(raw))
    }

    pub fn parse_detailed_bytes(&self, raw: &[u8]) -> Result<ParsedFile, ImportError> {
        self.parse_detailed(&String::from_utf8_lossy(raw))
    }

    /// Parses a file, reporting every skipped row. Only a header that lacks a
    /// required column is an error; fewer than two lines is simply empty.
    pub fn parse_detailed(&self, raw: &str) -> Result<ParsedFile, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.dialect.delimiter_byte())
            .from_reader(raw.as_bytes());

        let mut records = reader
            .records()
            .filter(|r| r.as_ref().map_or(true, |rec| !is_blank(rec)));

        let header = match records.next() {
            Some(Ok(header)) => header,
            Some(Err(e)) => {
                return Err(ImportError::UnparsableRow {
                    line: 1,
                    reason: e.to_string(),
                })
            }
            None => return Ok(ParsedFile::default()),
        };

        let map = self.resolve_columns(&header)?;
        let mut parsed = ParsedFile::default();

        for result in records {
            let outcome = result
                .map_err(|e| ImportError::UnparsableRow {
                    line: e.position().map_or(0, |p| p.line()),
                    reason: e.to_string(),
                })
                .and_then(|record| self.parse_row(&record, &map));

            match outcome {
                Ok(tx) => parsed.transactions.push(tx),
                Err(e) => {
                    tracing::debug!(dialect = %self.dialect.name, "skipped row: {e}");
                    parsed.skipped.push(e);
                }
            }
        }

        Ok(parsed)
    }

    fn resolve_columns(&self, header: &StringRecord) -> Result<ColumnMap, ImportError> {
        let cells: Vec<String> = header
            .iter()
            .map(|cell| cell.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();

        let find = |column: Column| -> Result<usize, ImportError> {
            let keywords = self.dialect.columns.for_column(column);
            cells
                .iter()
                .position(|cell| keywords.iter().any(|k| cell.contains(&k.to_lowercase())))
                .ok_or_else(|| ImportError::MalformedHeader {
                    column: column.to_string(),
                })
        };

        let amounts = match self.dialect.layout {
            Layout::DualColumn => AmountColumns::Dual {
                debit: find(Column::Debit)?,
                credit: find(Column::Credit)?,
            },
            Layout::SignedAmount => AmountColumns::Signed {
                amount: find(Column::Amount)?,
            },
        };

        Ok(ColumnMap {
            date: find(Column::Date)?,
            description: find(Column::Description)?,
            amounts,
        })
    }

    fn parse_row(&self, record: &StringRecord, map: &ColumnMap) -> Result<Transaction, ImportError> {
        let line = record.position().map_or(0, |p| p.line());

        if record.len() <= map.max_index() {
            return Err(ImportError::UnparsableRow {
                line,
                reason: format!("expected at least {} fields, found {}", map.max_index() + 1, record.len()),
            });
        }

        let date = parse_date(&record[map.date], self.dialect.date_formats.as_slice()).map_err(|e| {
            ImportError::UnparsableRow {
                line,
                reason: e.to_string(),
            }
        })?;
        let description = record[map.description].trim();
        let separator = self.dialect.decimal_separator;

        let (amount, direction) = match map.amounts {
            AmountColumns::Dual { debit, credit } => {
                let debit = parse_amount(&record[debit], separator);
                let credit = parse_amount(&record[credit], separator);
                if debit > Decimal::ZERO {
                    (debit, Direction::Debit)
                } else if credit > Decimal::ZERO {
                    (credit, Direction::Credit)
                } else {
                    return Err(ImportError::ZeroValueRow { line });
                }
            }
            AmountColumns::Signed { amount } => {
                let value = parse_amount(&record[amount], separator);
                if value < Decimal::ZERO {
                    (value.abs(), Direction::Debit)
                } else {
                    (value, Direction::Credit)
                }
            }
        };

        let category = self.categorizer.categorize(description, direction);
        Transaction::new(date, description, category, Money::from_decimal(amount), direction).map_err(|e| {
            ImportError::UnparsableRow {
                line,
                reason: e.to_string(),
            }
        })
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}
