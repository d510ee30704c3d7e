use serde::{Deserialize, Serialize};
use tally_core::{Account, Money};

/// A position valued outside the ledgers, e.g. a brokerage balance handed in
/// by a market data collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub name: String,
    pub value: Money,
}

impl Holding {
    pub fn new(name: &str, value: Money) -> Self {
        Holding {
            name: name.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationEntry {
    pub name: String,
    pub value: Money,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapitalAllocation {
    pub entries: Vec<AllocationEntry>,
    /// Sum of the positive values only.
    pub total: Money,
}

/// Splits capital across account net balances and external holdings.
/// Overdrawn accounts are listed with their value but a zero share.
pub fn capital_allocation(accounts: &[&Account], external: &[Holding]) -> CapitalAllocation {
    let holdings: Vec<(&str, Money)> = accounts
        .iter()
        .map(|a| (a.name.as_str(), a.ledger.net_balance()))
        .chain(external.iter().map(|h| (h.name.as_str(), h.value)))
        .collect();

    let total: Money = holdings
        .iter()
        .map(|(_, value)| *value)
        .filter(|value| !value.is_negative())
        .sum();

    let entries = holdings
        .into_iter()
        .map(|(name, value)| AllocationEntry {
            name: name.to_string(),
            value,
            percentage: if value.is_negative() {
                0.0
            } else {
                value.ratio(total) * 100.0
            },
        })
        .collect();

    CapitalAllocation { entries, total }
}
