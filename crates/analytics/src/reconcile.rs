use serde::{Deserialize, Serialize};
use tally_core::{Account, Direction, Money};

/// How far apart the two sides of a transfer may drift before it is flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconciliationPolicy {
    pub tolerance: Money,
}

impl Default for ReconciliationPolicy {
    fn default() -> Self {
        ReconciliationPolicy {
            tolerance: Money::from_units(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferVerdict {
    pub source: String,
    pub destination: String,
    pub category: String,
    /// Debits recorded on the sending side.
    pub outflow: Money,
    /// Credits recorded on the receiving side.
    pub inflow: Money,
    pub difference: Money,
    pub tolerance: Money,
    pub is_valid: bool,
    pub message: String,
}

impl ReconciliationPolicy {
    pub fn new(tolerance: Money) -> Self {
        ReconciliationPolicy { tolerance }
    }

    /// Compares what `source` sent under `category` with what `destination`
    /// received under the same category.
    pub fn validate_transfer(&self, source: &Account, destination: &Account, category: &str) -> TransferVerdict {
        let outflow = source.ledger.category_total(category, Direction::Debit);
        let inflow = destination.ledger.category_total(category, Direction::Credit);
        self.verdict(&source.name, &destination.name, category, outflow, inflow)
    }

    /// The opposite leg: money leaving `destination` back towards `source`.
    /// `validate_reverse_transfer(b, a, c)` reports the same difference as
    /// `validate_transfer(a, b, c)`.
    pub fn validate_reverse_transfer(
        &self,
        source: &Account,
        destination: &Account,
        category: &str,
    ) -> TransferVerdict {
        let outflow = destination.ledger.category_total(category, Direction::Debit);
        let inflow = source.ledger.category_total(category, Direction::Credit);
        self.verdict(&destination.name, &source.name, category, outflow, inflow)
    }

    fn verdict(&self, from: &str, to: &str, category: &str, outflow: Money, inflow: Money) -> TransferVerdict {
        let difference = (outflow - inflow).abs();
        let is_valid = difference < self.tolerance;
        let message = if is_valid {
            format!(
                "{from} -> {to} ({category}) reconciles: sent {outflow}, received {inflow}, difference {difference}"
            )
        } else {
            format!(
                "{from} -> {to} ({category}) does not reconcile: sent {outflow}, received {inflow}, \
                 difference {difference} exceeds tolerance {}",
                self.tolerance
            )
        };
        tracing::debug!(from, to, category, %difference, is_valid, "transfer checked");

        TransferVerdict {
            source: from.to_string(),
            destination: to.to_string(),
            category: category.to_string(),
            outflow,
            inflow,
            difference,
            tolerance: self.tolerance,
            is_valid,
            message,
        }
    }
}

pub fn validate_transfer(source: &Account, destination: &Account, category: &str) -> TransferVerdict {
    ReconciliationPolicy::default().validate_transfer(source, destination, category)
}

pub fn validate_reverse_transfer(source: &Account, destination: &Account, category: &str) -> TransferVerdict {
    ReconciliationPolicy::default().validate_reverse_transfer(source, destination, category)
}
