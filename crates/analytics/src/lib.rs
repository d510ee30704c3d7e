pub mod allocation;
pub mod budget;
pub mod reconcile;
pub mod snapshot;
pub mod spending;
pub mod totals;
pub mod trend;

pub use allocation::{capital_allocation, AllocationEntry, CapitalAllocation, Holding};
pub use budget::{
    budget_health_score, category_statuses, income_statuses, overall_status, utilization_score, BudgetStatus,
    TARGET_UTILIZATION,
};
pub use reconcile::{validate_reverse_transfer, validate_transfer, ReconciliationPolicy, TransferVerdict};
pub use snapshot::AccountSnapshot;
pub use spending::{top_spending_categories, CategoryShare};
pub use totals::{category_total, net_balance, total};
pub use trend::{monthly_series, monthly_trend, TrendMetric, TrendPoint, TREND_MONTHS};
