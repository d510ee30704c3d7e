use serde::Serialize;
use tally_core::{Account, BudgetTable, Direction, Ledger, Money};

/// Utilization at which a budget counts as perfectly healthy.
pub const TARGET_UTILIZATION: f64 = 0.8;
const UTILIZATION_BAND: f64 = 0.2;

/// Allocation against actual movement for one budget line (or the whole budget).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub name: String,
    pub allocated: Money,
    pub actual: Money,
    pub remaining: Money,
    pub overrun: Money,
    /// `actual / allocated`, zero when nothing is allocated.
    pub utilization: f64,
    pub is_over_budget: bool,
}

impl BudgetStatus {
    pub fn compute(name: &str, allocated: Money, actual: Money) -> Self {
        BudgetStatus {
            name: name.to_string(),
            allocated,
            actual,
            remaining: (allocated - actual).max(Money::zero()),
            overrun: (actual - allocated).max(Money::zero()),
            utilization: actual.ratio(allocated),
            is_over_budget: actual > allocated,
        }
    }
}

/// Total debits against the whole expense budget.
pub fn overall_status(account: &Account) -> BudgetStatus {
    BudgetStatus::compute(
        "Total",
        account.expense_budget.total_allocated(),
        account.ledger.total(Direction::Debit),
    )
}

pub fn category_statuses(account: &Account) -> Vec<BudgetStatus> {
    statuses(&account.ledger, &account.expense_budget, Direction::Debit)
}

/// Income budget lines, measured against credits.
pub fn income_statuses(account: &Account) -> Vec<BudgetStatus> {
    statuses(&account.ledger, &account.income_budget, Direction::Credit)
}

fn statuses(ledger: &Ledger, table: &BudgetTable, direction: Direction) -> Vec<BudgetStatus> {
    table
        .iter()
        .map(|c| BudgetStatus::compute(&c.name, c.allocated, ledger.category_total(&c.name, direction)))
        .collect()
}

/// `clamp(1 - (utilization - 0.8) / 0.2, 0, 1)`: full marks up to the target,
/// falling to zero at 100% utilization.
pub fn utilization_score(utilization: f64) -> f64 {
    (1.0 - (utilization - TARGET_UTILIZATION) / UTILIZATION_BAND).clamp(0.0, 1.0)
}

/// Mean of the share of categories within budget and the utilization score.
/// An account without budget categories has nothing over budget.
///
/// Under-spending is not penalised: any utilization at or below the target
/// scores full marks on that half.
pub fn budget_health_score(account: &Account) -> f64 {
    let categories = category_statuses(account);
    let category_score = if categories.is_empty() {
        1.0
    } else {
        let within = categories.iter().filter(|s| !s.is_over_budget).count();
        within as f64 / categories.len() as f64
    };
    let utilization = overall_status(account).utilization;
    (category_score + utilization_score(utilization)) / 2.0
}
