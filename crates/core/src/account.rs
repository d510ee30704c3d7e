use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ledger::Ledger;
use super::money::Money;
use super::transaction::{Direction, Transaction, TransactionId};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    #[error("Transaction amount must not be negative: {0}")]
    NegativeAmount(Money),
    #[error("Budget category already exists: {0}")]
    DuplicateBudgetCategory(String),
    #[error("Budget category not found: {0}")]
    UnknownBudgetCategory(String),
}

/// A named spending (or income) allocation for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub name: String,
    pub allocated: Money,
}

impl BudgetCategory {
    pub fn new(name: &str, allocated: Money) -> Self {
        BudgetCategory {
            name: name.to_string(),
            allocated,
        }
    }
}

/// Budget categories keyed by unique name, kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetTable {
    categories: Vec<BudgetCategory>,
}

impl BudgetTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_categories(
        categories: impl IntoIterator<Item = BudgetCategory>,
    ) -> Result<Self, LedgerError> {
        let mut table = BudgetTable::new();
        for category in categories {
            table.add(category)?;
        }
        Ok(table)
    }

    pub fn add(&mut self, category: BudgetCategory) -> Result<(), LedgerError> {
        if self.get(&category.name).is_some() {
            return Err(LedgerError::DuplicateBudgetCategory(category.name));
        }
        self.categories.push(category);
        Ok(())
    }

    pub fn set_allocation(&mut self, name: &str, allocated: Money) -> Result<(), LedgerError> {
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| LedgerError::UnknownBudgetCategory(name.to_string()))?;
        category.allocated = allocated;
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<BudgetCategory> {
        let idx = self.categories.iter().position(|c| c.name == name)?;
        Some(self.categories.remove(idx))
    }

    pub fn get(&self, name: &str) -> Option<&BudgetCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BudgetCategory> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn total_allocated(&self) -> Money {
        self.categories.iter().map(|c| c.allocated).sum()
    }
}

/// One money-movement source: its ledger plus the budgets declared against it.
#[derive(Debug, Clone, Default)]
pub struct Account {
    pub name: String,
    pub ledger: Ledger,
    pub expense_budget: BudgetTable,
    pub income_budget: BudgetTable,
}

impl Account {
    pub fn new(name: &str) -> Self {
        Account {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_budgets(mut self, expense: BudgetTable, income: BudgetTable) -> Self {
        self.expense_budget = expense;
        self.income_budget = income;
        self
    }

    /// Manual entry: builds a transaction and inserts it into the ledger.
    pub fn record(
        &mut self,
        date: NaiveDate,
        description: &str,
        category: &str,
        amount: Money,
        direction: Direction,
    ) -> Result<TransactionId, LedgerError> {
        let tx = Transaction::new(date, description, category, amount, direction)?;
        let id = tx.id();
        self.ledger.add(tx);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_table_rejects_duplicate_names() {
        let mut table = BudgetTable::new();
        table.add(BudgetCategory::new("Food", Money::from_units(300))).unwrap();
        let err = table.add(BudgetCategory::new("Food", Money::from_units(100))).unwrap_err();
        assert_eq!(err, LedgerError::DuplicateBudgetCategory("Food".to_string()));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn budget_table_update_and_remove() {
        let mut table = BudgetTable::from_categories([
            BudgetCategory::new("Food", Money::from_units(300)),
            BudgetCategory::new("Rent", Money::from_units(1000)),
        ])
        .unwrap();
        assert_eq!(table.total_allocated(), Money::from_units(1300));

        table.set_allocation("Food", Money::from_units(400)).unwrap();
        assert_eq!(table.get("Food").unwrap().allocated, Money::from_units(400));
        assert!(matches!(
            table.set_allocation("Travel", Money::zero()),
            Err(LedgerError::UnknownBudgetCategory(_))
        ));

        assert!(table.remove("Rent").is_some());
        assert!(table.remove("Rent").is_none());
        assert_eq!(table.total_allocated(), Money::from_units(400));
    }

    #[test]
    fn budget_changes_leave_ledger_untouched() {
        let mut account = Account::new("checking");
        account
            .record(
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                "Groceries",
                "Food",
                Money::from_units(50),
                Direction::Debit,
            )
            .unwrap();
        account.expense_budget.add(BudgetCategory::new("Food", Money::from_units(10))).unwrap();
        account.expense_budget.remove("Food");
        assert_eq!(account.ledger.len(), 1);
    }

    #[test]
    fn record_rejects_negative_amount() {
        let mut account = Account::new("checking");
        let result = account.record(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            "Refund",
            "Misc",
            Money::from_units(-5),
            Direction::Credit,
        );
        assert!(result.is_err());
        assert!(account.ledger.is_empty());
    }
}
