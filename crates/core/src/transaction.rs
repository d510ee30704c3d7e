use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::account::LedgerError;
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionId(pub Uuid);

impl TransactionId {
    pub fn new() -> Self {
        TransactionId(Uuid::new_v4())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Outflow.
    Debit,
    /// Inflow.
    Credit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Debit => write!(f, "debit"),
            Direction::Credit => write!(f, "credit"),
        }
    }
}

/// A single ledger entry. Fields are private so an entry can't change once
/// it has been created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    id: TransactionId,
    date: NaiveDate,
    description: String,
    category: String,
    amount: Money,
    direction: Direction,
}

/// The fields two entries must share to be considered the same movement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub direction: Direction,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
        direction: Direction,
    ) -> Result<Self, LedgerError> {
        if amount.is_negative() {
            return Err(LedgerError::NegativeAmount(amount));
        }
        Ok(Transaction {
            id: TransactionId::new(),
            date,
            description: description.into(),
            category: category.into(),
            amount,
            direction,
        })
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_debit(&self) -> bool {
        self.direction == Direction::Debit
    }

    pub fn is_credit(&self) -> bool {
        self.direction == Direction::Credit
    }

    /// Effect on the account balance: debits subtract, credits add.
    pub fn signed_amount(&self) -> Money {
        match self.direction {
            Direction::Debit => Money::zero() - self.amount,
            Direction::Credit => self.amount,
        }
    }

    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            date: self.date,
            description: self.description.clone(),
            amount: self.amount,
            direction: self.direction,
        }
    }

    /// Same date, description, amount and direction; id and category are ignored.
    pub fn is_equivalent(&self, other: &Transaction) -> bool {
        self.date == other.date
            && self.amount == other.amount
            && self.direction == other.direction
            && self.description == other.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_rejects_negative_amount() {
        let result = Transaction::new(
            date(2024, 1, 15),
            "Bad",
            "Misc",
            Money::from_cents(-100),
            Direction::Debit,
        );
        assert!(matches!(result, Err(LedgerError::NegativeAmount(_))));
    }

    #[test]
    fn signed_amount_follows_direction() {
        let debit = Transaction::new(date(2024, 1, 15), "Rent", "Housing", Money::from_units(900), Direction::Debit)
            .unwrap();
        let credit = Transaction::new(date(2024, 1, 15), "Salary", "Income", Money::from_units(900), Direction::Credit)
            .unwrap();
        assert_eq!(debit.signed_amount(), Money::from_units(-900));
        assert_eq!(credit.signed_amount(), Money::from_units(900));
        assert!(debit.is_debit());
        assert!(credit.is_credit());
    }

    #[test]
    fn ids_are_unique() {
        let a = Transaction::new(date(2024, 1, 15), "A", "Misc", Money::zero(), Direction::Credit).unwrap();
        let b = Transaction::new(date(2024, 1, 15), "A", "Misc", Money::zero(), Direction::Credit).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn equivalence_ignores_id_and_category() {
        let a = Transaction::new(date(2024, 1, 15), "Coffee", "Dining", Money::from_cents(450), Direction::Debit)
            .unwrap();
        let b = Transaction::new(date(2024, 1, 15), "Coffee", "Misc", Money::from_cents(450), Direction::Debit)
            .unwrap();
        let c = Transaction::new(date(2024, 1, 15), "Coffee", "Dining", Money::from_cents(450), Direction::Credit)
            .unwrap();
        assert!(a.is_equivalent(&b));
        assert_eq!(a.dedup_key(), b.dedup_key());
        assert!(!a.is_equivalent(&c));
    }

    #[test]
    fn direction_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Debit).unwrap(), "\"debit\"");
        assert_eq!(Direction::Credit.to_string(), "credit");
    }
}
