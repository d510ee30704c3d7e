pub mod account;
pub mod ledger;
pub mod money;
pub mod period;
pub mod transaction;

pub use account::{Account, BudgetCategory, BudgetTable, LedgerError};
pub use ledger::Ledger;
pub use money::Money;
pub use period::{DateRange, Month};
pub use transaction::{DedupKey, Direction, Transaction, TransactionId};
