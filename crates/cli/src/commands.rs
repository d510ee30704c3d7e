use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;
use tally_analytics::{capital_allocation, AccountSnapshot, CapitalAllocation, TransferVerdict};
use tally_core::{Account, Transaction};
use tally_import::{DialectParser, ImportConfig, ImportSummary, Importer, SourceFile};
use tracing::info;

use crate::config::TallyConfig;

#[derive(Debug, Serialize)]
pub struct AccountImport {
    pub account: String,
    #[serde(flatten)]
    pub summary: ImportSummary,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub as_of: NaiveDate,
    pub imports: Vec<AccountImport>,
    pub accounts: Vec<AccountSnapshot>,
    pub allocation: CapitalAllocation,
    pub transfers: Vec<TransferVerdict>,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Unable to serialize output")?;
    println!("{json}");
    Ok(())
}

/// Reads every configured export, imports it into its account, and evaluates
/// budgets, allocation and transfers.
pub async fn report(config_path: &Path, as_of: NaiveDate) -> Result<Report> {
    let config = TallyConfig::load(config_path).await?;
    let import_config = config.import_config();

    let mut accounts = Vec::with_capacity(config.accounts.len());
    let mut imports = Vec::with_capacity(config.accounts.len());
    for account_config in &config.accounts {
        let dialect = import_config
            .dialect(&account_config.dialect)
            .with_context(|| format!("Account {}", account_config.name))?;
        let mut account = account_config.to_account()?;

        let mut sources = Vec::with_capacity(account_config.files.len());
        for file in &account_config.files {
            let path = config.resolve(file);
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Unable to read {}", path.display()))?;
            sources.push(SourceFile::new(path.display().to_string(), bytes));
        }

        let importer = Importer::new(DialectParser::new(dialect));
        let summary = importer.import_batch_concurrent(&mut account, sources).await;
        info!(account = %account.name, imported = summary.imported, "account loaded");
        imports.push(AccountImport {
            account: account.name.clone(),
            summary,
        });
        accounts.push(account);
    }

    let mut transfers = Vec::new();
    for transfer in &config.transfers {
        let source = find_account(&accounts, &transfer.source)?;
        let destination = find_account(&accounts, &transfer.destination)?;
        let policy = &config.reconciliation;
        transfers.push(policy.validate_transfer(source, destination, &transfer.category));
        if transfer.reverse {
            transfers.push(policy.validate_reverse_transfer(source, destination, &transfer.category));
        }
    }

    let refs: Vec<&Account> = accounts.iter().collect();
    let allocation = capital_allocation(&refs, &config.holdings);
    let snapshots = accounts
        .iter()
        .map(|account| AccountSnapshot::build(account, as_of))
        .collect();

    Ok(Report {
        as_of,
        imports,
        accounts: snapshots,
        allocation,
        transfers,
    })
}

/// Parses one file without touching any ledger.
pub async fn parse(config_path: Option<&Path>, dialect: &str, file: &Path) -> Result<Vec<Transaction>> {
    let import_config = match config_path {
        Some(path) => TallyConfig::load(path).await?.import_config(),
        None => ImportConfig::default(),
    };
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Unable to read {}", file.display()))?;
    Ok(tally_import::parse_with_dialect(&import_config, dialect, &bytes)?)
}

fn find_account<'a>(accounts: &'a [Account], name: &str) -> Result<&'a Account> {
    match accounts.iter().find(|a| a.name == name) {
        Some(account) => Ok(account),
        None => bail!("Transfer refers to unknown account '{name}'"),
    }
}
