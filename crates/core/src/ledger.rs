use chrono::NaiveDate;
use serde::Serialize;

use super::money::Money;
use super::period::{DateRange, Month};
use super::transaction::{Direction, Transaction, TransactionId};

/// Transactions of one account, kept sorted newest first after every mutation.
///
/// Every query is a filter over the current entries, so views are never stale.
/// A ledger has no interior synchronisation: one mutator at a time.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends and re-sorts. The sort is stable, so entries sharing a date keep
    /// their insertion order.
    pub fn add(&mut self, tx: Transaction) {
        self.transactions.push(tx);
        self.sort();
    }

    pub fn add_all(&mut self, txs: impl IntoIterator<Item = Transaction>) {
        self.transactions.extend(txs);
        self.sort();
    }

    /// Removes every entry with this id and returns how many went.
    pub fn remove(&mut self, id: TransactionId) -> usize {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id() != id);
        before - self.transactions.len()
    }

    fn sort(&mut self) {
        self.transactions.sort_by(|a, b| b.date().cmp(&a.date()));
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id() == id)
    }

    pub fn contains_equivalent(&self, tx: &Transaction) -> bool {
        self.transactions.iter().any(|t| t.is_equivalent(tx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn with_direction(&self, direction: Direction) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.direction() == direction)
            .collect()
    }

    pub fn debits(&self) -> Vec<&Transaction> {
        self.with_direction(Direction::Debit)
    }

    pub fn credits(&self) -> Vec<&Transaction> {
        self.with_direction(Direction::Credit)
    }

    pub fn for_category(&self, name: &str) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.category() == name)
            .collect()
    }

    /// Inclusive on both ends.
    pub fn for_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&Transaction> {
        let range = DateRange::new(start, end);
        self.transactions
            .iter()
            .filter(|t| range.contains(t.date()))
            .collect()
    }

    /// Entries in the same calendar month as `date`.
    pub fn for_month(&self, date: NaiveDate) -> Vec<&Transaction> {
        let month = Month::of(date);
        self.transactions
            .iter()
            .filter(|t| month.contains(t.date()))
            .collect()
    }

    pub fn total(&self, direction: Direction) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.direction() == direction)
            .map(|t| t.amount())
            .sum()
    }

    pub fn category_total(&self, name: &str, direction: Direction) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.direction() == direction && t.category() == name)
            .map(|t| t.amount())
            .sum()
    }

    pub fn net_balance(&self) -> Money {
        self.transactions.iter().map(|t| t.signed_amount()).sum()
    }
}
