use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use tally_core::{Direction, Ledger, Money, Month, Transaction};

pub const TREND_MONTHS: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrendMetric {
    Debits,
    Credits,
    CategoryDebits(String),
}

impl TrendMetric {
    fn includes(&self, tx: &Transaction) -> bool {
        match self {
            TrendMetric::Debits => tx.direction() == Direction::Debit,
            TrendMetric::Credits => tx.direction() == Direction::Credit,
            TrendMetric::CategoryDebits(name) => {
                tx.direction() == Direction::Debit && tx.category() == name
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// e.g. "March 2024"
    pub label: String,
    pub month: Month,
    pub total: Money,
}

/// Twelve monthly totals ending with the month of `as_of`, oldest first.
pub fn monthly_trend(ledger: &Ledger, metric: &TrendMetric, as_of: NaiveDate) -> Vec<TrendPoint> {
    monthly_series(ledger, metric, as_of, TREND_MONTHS)
}

pub fn monthly_series(
    ledger: &Ledger,
    metric: &TrendMetric,
    as_of: NaiveDate,
    months: usize,
) -> Vec<TrendPoint> {
    let mut totals: HashMap<Month, Money> = HashMap::new();
    for tx in ledger.iter().filter(|t| metric.includes(t)) {
        *totals.entry(Month::of(tx.date())).or_default() += tx.amount();
    }

    Month::trailing(as_of, months)
        .into_iter()
        .map(|month| TrendPoint {
            label: month.to_string(),
            month,
            total: totals.get(&month).copied().unwrap_or_default(),
        })
        .collect()
}
