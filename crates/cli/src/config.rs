use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tally_analytics::{Holding, ReconciliationPolicy};
use tally_core::{Account, BudgetCategory, BudgetTable};
use tally_import::{Dialect, ImportConfig};

/// The whole `tally.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TallyConfig {
    #[serde(default)]
    pub dialects: Vec<Dialect>,
    #[serde(default)]
    pub reconciliation: ReconciliationPolicy,
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
    #[serde(default)]
    pub transfers: Vec<TransferConfig>,
    /// Positions valued outside the ledgers.
    #[serde(default)]
    pub holdings: Vec<Holding>,

    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    pub name: String,
    pub dialect: String,
    #[serde(default)]
    pub files: Vec<PathBuf>,
    #[serde(default)]
    pub expense_budget: Vec<BudgetCategory>,
    #[serde(default)]
    pub income_budget: Vec<BudgetCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferConfig {
    pub source: String,
    pub destination: String,
    pub category: String,
    /// Also check money flowing back from destination to source.
    #[serde(default)]
    pub reverse: bool,
}

impl TallyConfig {
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Unable to read config file {}", path.display()))?;
        let mut config = Self::from_toml(&content)
            .with_context(|| format!("Unable to parse config file {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn import_config(&self) -> ImportConfig {
        ImportConfig {
            dialects: self.dialects.clone(),
        }
    }

    /// Source paths are relative to the config file.
    pub fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.base_dir.join(file)
        }
    }
}

impl AccountConfig {
    /// An empty account carrying the configured budgets.
    pub fn to_account(&self) -> Result<Account> {
        let expense = BudgetTable::from_categories(self.expense_budget.iter().cloned())
            .with_context(|| format!("Invalid expense budget for account {}", self.name))?;
        let income = BudgetTable::from_categories(self.income_budget.iter().cloned())
            .with_context(|| format!("Invalid income budget for account {}", self.name))?;
        Ok(Account::new(&self.name).with_budgets(expense, income))
    }
}
