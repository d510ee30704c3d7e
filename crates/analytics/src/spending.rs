use serde::Serialize;
use std::collections::BTreeMap;
use tally_core::{Direction, Ledger, Money};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Money,
    /// Share of all debits, 0..=100.
    pub percentage: f64,
}

/// Debit totals per category, largest first. Equal totals are ordered by name.
pub fn top_spending_categories(ledger: &Ledger) -> Vec<CategoryShare> {
    let mut per_category: BTreeMap<&str, Money> = BTreeMap::new();
    for tx in ledger.iter().filter(|t| t.direction() == Direction::Debit) {
        *per_category.entry(tx.category()).or_default() += tx.amount();
    }

    let total_debits: Money = per_category.values().sum();
    let mut shares: Vec<CategoryShare> = per_category
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category: category.to_string(),
            total,
            percentage: total.ratio(total_debits) * 100.0,
        })
        .collect();
    shares.sort_by(|a, b| b.total.cmp(&a.total));
    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_core::Transaction;

    fn add(ledger: &mut Ledger, cat: &str, units: i64, dir: Direction) {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        ledger.add(Transaction::new(d, cat, cat, Money::from_units(units), dir).unwrap());
    }

    #[test]
    fn sorted_descending_with_percentages() {
        let mut ledger = Ledger::new();
        add(&mut ledger, "Food", 100, Direction::Debit);
        add(&mut ledger, "Rent", 600, Direction::Debit);
        add(&mut ledger, "Food", 100, Direction::Debit);
        add(&mut ledger, "Travel", 200, Direction::Debit);
        add(&mut ledger, "Salary", 5000, Direction::Credit);

        let top = top_spending_categories(&ledger);
        let names: Vec<_> = top.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Food", "Travel"]);
        assert!((top[0].percentage - 60.0).abs() < 1e-9);
        assert!((top[1].percentage - 20.0).abs() < 1e-9);
        let sum: f64 = top.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn ties_are_alphabetical() {
        let mut ledger = Ledger::new();
        add(&mut ledger, "Zoo", 50, Direction::Debit);
        add(&mut ledger, "Art", 50, Direction::Debit);
        let top = top_spending_categories(&ledger);
        assert_eq!(top[0].category, "Art");
        assert_eq!(top[1].category, "Zoo");
    }

    #[test]
    fn no_debits_is_empty() {
        let mut ledger = Ledger::new();
        add(&mut ledger, "Salary", 5000, Direction::Credit);
        assert!(top_spending_categories(&ledger).is_empty());
    }
}
