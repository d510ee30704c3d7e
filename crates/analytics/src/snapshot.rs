use chrono::NaiveDate;
use serde::Serialize;
use tally_core::{Account, Direction, Money};

use crate::budget::{budget_health_score, category_statuses, income_statuses, overall_status, BudgetStatus};
use crate::spending::{top_spending_categories, CategoryShare};
use crate::trend::{monthly_trend, TrendMetric, TrendPoint};

/// Everything a dashboard needs about one account, computed on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSnapshot {
    pub name: String,
    pub as_of: NaiveDate,
    pub transaction_count: usize,
    pub total_debits: Money,
    pub total_credits: Money,
    pub net_balance: Money,
    pub budget: BudgetStatus,
    pub categories: Vec<BudgetStatus>,
    pub income: Vec<BudgetStatus>,
    pub health_score: f64,
    pub debit_trend: Vec<TrendPoint>,
    pub credit_trend: Vec<TrendPoint>,
    pub top_categories: Vec<CategoryShare>,
}

impl AccountSnapshot {
    pub fn build(account: &Account, as_of: NaiveDate) -> Self {
        let ledger = &account.ledger;
        AccountSnapshot {
            name: account.name.clone(),
            as_of,
            transaction_count: ledger.len(),
            total_debits: ledger.total(Direction::Debit),
            total_credits: ledger.total(Direction::Credit),
            net_balance: ledger.net_balance(),
            budget: overall_status(account),
            categories: category_statuses(account),
            income: income_statuses(account),
            health_score: budget_health_score(account),
            debit_trend: monthly_trend(ledger, &TrendMetric::Debits, as_of),
            credit_trend: monthly_trend(ledger, &TrendMetric::Credits, as_of),
            top_categories: top_spending_categories(ledger),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::BudgetCategory;

    #[test]
    fn snapshot_collects_figures() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let mut account = Account::new("checking");
        account
            .expense_budget
            .add(BudgetCategory::new("Rent", Money::from_units(1000)))
            .unwrap();
        account.record(d, "payroll", "Salary", Money::from_units(3000), Direction::Credit).unwrap();
        account.record(d, "rent", "Rent", Money::from_units(800), Direction::Debit).unwrap();

        let snap = AccountSnapshot::build(&account, d);
        assert_eq!(snap.transaction_count, 2);
        assert_eq!(snap.net_balance, Money::from_units(2200));
        assert_eq!(snap.debit_trend.len(), 12);
        assert_eq!(snap.credit_trend[11].total, Money::from_units(3000));
        assert_eq!(snap.top_categories[0].category, "Rent");
        assert_eq!(snap.health_score, 1.0);
        assert!(!snap.budget.is_over_budget);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let snap = AccountSnapshot::build(&Account::new("empty"), d);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["name"], "empty");
        assert_eq!(json["as_of"], "2024-03-10");
        assert_eq!(json["debit_trend"].as_array().map(|a| a.len()), Some(12));
        assert_eq!(json["debit_trend"][11]["label"], "March 2024");
    }
}
