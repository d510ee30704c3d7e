//! Merges parsed batches into an account's ledger without creating duplicates.
//!
//! Parsing of independent files may run concurrently; merging always happens
//! on the caller's `&mut Account`, which makes it the single writer.

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tally_core::{Account, DedupKey, Ledger, Transaction};

use crate::csv::{DialectParser, ParsedFile};
use crate::error::ImportError;

/// One file handed over by the delivery collaborator.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub source: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(source: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        SourceFile {
            source: source.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub source: String,
    pub result: Result<ParsedFile, ImportError>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub duplicates: usize,
    pub rows_skipped: usize,
    pub files_skipped: usize,
}

impl ImportSummary {
    fn absorb(&mut self, other: ImportSummary) {
        self.imported += other.imported;
        self.duplicates += other.duplicates;
        self.rows_skipped += other.rows_skipped;
        self.files_skipped += other.files_skipped;
    }
}

/// Adds every candidate whose (date, description, amount, direction) is not
/// already in the ledger or earlier in `candidates`. Returns `(imported, duplicates)`.
pub fn import_transactions(
    ledger: &mut Ledger,
    candidates: impl IntoIterator<Item = Transaction>,
) -> (usize, usize) {
    let mut seen: HashSet<DedupKey> = ledger.iter().map(|t| t.dedup_key()).collect();
    let mut fresh = Vec::new();
    let mut duplicates = 0;

    for tx in candidates {
        if seen.insert(tx.dedup_key()) {
            fresh.push(tx);
        } else {
            duplicates += 1;
        }
    }

    let imported = fresh.len();
    if imported > 0 {
        ledger.add_all(fresh);
    }
    (imported, duplicates)
}

/// Feeds files of one dialect into an account.
#[derive(Debug, Clone)]
pub struct Importer {
    parser: Arc<DialectParser>,
}

impl Importer {
    pub fn new(parser: DialectParser) -> Self {
        Self {
            parser: Arc::new(parser),
        }
    }

    pub fn parser(&self) -> &DialectParser {
        &self.parser
    }

    /// Parses and merges files in the given order. Dedup is checked against the
    /// ledger as it grows, so a repeat in a later file is suppressed too.
    pub fn import_batch(&self, account: &mut Account, files: &[SourceFile]) -> ImportSummary {
        let parsed = files
            .iter()
            .map(|file| ParsedSource {
                source: file.source.clone(),
                result: self.parser.parse_detailed_bytes(&file.bytes),
            })
            .collect();
        import_parsed(account, parsed)
    }

    /// Parses every file on the blocking pool, then merges in input order.
    pub async fn import_batch_concurrent(
        &self,
        account: &mut Account,
        files: Vec<SourceFile>,
    ) -> ImportSummary {
        let parsed = self.parse_concurrently(files).await;
        import_parsed(account, parsed)
    }

    /// Results come back in the same order as `files`.
    pub async fn parse_concurrently(&self, files: Vec<SourceFile>) -> Vec<ParsedSource> {
        let mut pending = Vec::with_capacity(files.len());
        for file in files {
            let parser = Arc::clone(&self.parser);
            let source = file.source.clone();
            let handle = tokio::task::spawn_blocking(move || parser.parse_detailed_bytes(&file.bytes));
            pending.push((source, handle));
        }

        let mut parsed = Vec::with_capacity(pending.len());
        for (source, handle) in pending {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(ImportError::TaskFailed {
                    source_name: source.clone(),
                    reason: e.to_string(),
                }),
            };
            parsed.push(ParsedSource { source, result });
        }
        parsed
    }
}

/// Merges already-parsed files into the account, in order.
pub fn import_parsed(account: &mut Account, parsed: Vec<ParsedSource>) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for ParsedSource { source, result } in parsed {
        match result {
            Ok(file) => {
                let rows_skipped = file.skipped.len();
                let (imported, duplicates) = import_transactions(&mut account.ledger, file.transactions);
                tracing::info!(
                    account = %account.name,
                    %source,
                    imported,
                    duplicates,
                    rows_skipped,
                    "imported file"
                );
                summary.absorb(ImportSummary {
                    imported,
                    duplicates,
                    rows_skipped,
                    files_skipped: 0,
                });
            }
            Err(e) => {
                tracing::warn!(account = %account.name, %source, "skipping file: {e}");
                summary.files_skipped += 1;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use tally_core::{Direction, Money};

    const STATEMENT: &str = "Fecha,Descripción,Débito,Crédito\n\
                             01/03/2024,Pago Prestamo,50000,\n\
                             02/03/2024,Supermercado,32000,\n\
                             03/03/2024,Abono nomina,,2500000\n";

    fn importer() -> Importer {
        Importer::new(DialectParser::new(Dialect::dual_column()))
    }

    fn file(name: &str, text: &str) -> SourceFile {
        SourceFile::new(name, text.as_bytes())
    }

    #[test]
    fn importing_twice_is_idempotent() {
        let mut account = Account::new("bank");
        let first = importer().import_batch(&mut account, &[file("a.csv", STATEMENT)]);
        assert_eq!(first.imported, 3);
        let second = importer().import_batch(&mut account, &[file("a.csv", STATEMENT)]);
        assert_eq!(second.imported, 0);
        assert_eq!(second.duplicates, 3);
        assert_eq!(account.ledger.len(), 3);
    }

    #[test]
    fn duplicate_row_in_same_file_imported_once() {
        let text = format!("{STATEMENT}01/03/2024,Pago Prestamo,50000,\n");
        let mut account = Account::new("bank");
        let summary = importer().import_batch(&mut account, &[file("dup.csv", &text)]);
        assert_eq!(summary.imported, 3);
        assert_eq!(summary.duplicates, 1);
    }

    #[test]
    fn overlap_in_later_file_of_same_batch_is_suppressed() {
        let later = "Fecha,Descripción,Débito,Crédito\n\
                     03/03/2024,Abono nomina,,2500000\n\
                     04/03/2024,Restaurante,45000,\n";
        let mut account = Account::new("bank");
        let summary = importer().import_batch(
            &mut account,
            &[file("feb.csv", STATEMENT), file("mar.csv", later)],
        );
        assert_eq!(summary.imported, 4);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(account.ledger.as_slice()[0].description(), "Restaurante");
    }

    #[test]
    fn bad_file_does_not_abort_batch() {
        let mut account = Account::new("bank");
        let summary = importer().import_batch(
            &mut account,
            &[file("bad.csv", "foo,bar\n1,2\n"), file("good.csv", STATEMENT)],
        );
        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.imported, 3);
    }

    #[test]
    fn same_content_different_direction_is_not_a_duplicate() {
        let mut ledger = Ledger::new();
        let day = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let out = Transaction::new(day, "Move", "Transfer", Money::from_units(10), Direction::Debit).unwrap();
        let back = Transaction::new(day, "Move", "Transfer", Money::from_units(10), Direction::Credit).unwrap();
        assert_eq!(import_transactions(&mut ledger, [out, back]), (2, 0));
    }

    #[test]
    fn ledger_sorted_after_import() {
        let mut account = Account::new("bank");
        importer().import_batch(&mut account, &[file("a.csv", STATEMENT)]);
        assert!(account
            .ledger
            .as_slice()
            .windows(2)
            .all(|w| w[0].date() >= w[1].date()));
    }

    #[tokio::test]
    async fn concurrent_parse_keeps_input_order() {
        let files = vec![
            file("empty.csv", ""),
            file("a.csv", STATEMENT),
            file("bad.csv", "x\ny\n"),
        ];
        let parsed = importer().parse_concurrently(files).await;
        let sources: Vec<_> = parsed.iter().map(|p| p.source.as_str()).collect();
        assert_eq!(sources, vec!["empty.csv", "a.csv", "bad.csv"]);
        assert!(parsed[2].result.is_err());
    }

    #[tokio::test]
    async fn concurrent_import_matches_sequential() {
        let files = vec![file("a.csv", STATEMENT), file("b.csv", STATEMENT)];

        let mut sequential = Account::new("seq");
        let seq = importer().import_batch(&mut sequential, &files);

        let mut concurrent = Account::new("conc");
        let conc = importer().import_batch_concurrent(&mut concurrent, files).await;

        assert_eq!(seq, conc);
        assert_eq!(sequential.ledger.len(), concurrent.ledger.len());
    }
}
