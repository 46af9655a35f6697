//! Turn parsed upload rows into categorized transactions ready to store.
//!
//! Rows keep a non-blank category from the file; everything else is
//! categorized from its description. Either way the category is
//! canonicalized. Confidence and suggestions are not surfaced for bulk rows.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use spendwise_core::{Categorizer, NewTransaction, TransactionKind};
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::upload::{ParsedUpload, parse_upload_csv, parse_upload_reader};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub transactions: Vec<NewTransaction>,
    pub skipped: usize,
}

impl ImportReport {
    pub fn from_upload(upload: ParsedUpload, categorizer: &Categorizer) -> Self {
        let transactions = upload
            .rows
            .into_iter()
            .map(|row| {
                let assigned = categorizer.assign(&row.description, row.category.as_deref());
                NewTransaction {
                    date: row.date,
                    amount: row.amount,
                    kind: row.kind.unwrap_or_else(|| TransactionKind::from_amount(row.amount)),
                    category: assigned.category,
                    description: row.description,
                }
            })
            .collect::<Vec<_>>();

        info!(
            rows = transactions.len(),
            skipped = upload.skipped,
            "categorized upload"
        );

        Self {
            transactions,
            skipped: upload.skipped,
        }
    }
}

pub fn import_csv(path: impl AsRef<Path>, categorizer: &Categorizer) -> Result<ImportReport> {
    let upload = parse_upload_csv(path)?;
    Ok(ImportReport::from_upload(upload, categorizer))
}

pub fn import_reader<R: Read>(reader: R, categorizer: &Categorizer) -> Result<ImportReport> {
    let upload = parse_upload_reader(reader)?;
    Ok(ImportReport::from_upload(upload, categorizer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_categorized_and_canonicalized() {
        let text = "\
date,amount,description,category
2025-11-03,-12.50,Uber ride home,
2025-11-04,-30,Corner shop,grocries
2025-11-05,2500,Monthly payroll,
2025-11-06,-8,Mystery vendor xq,na
";
        let report = import_reader(text.as_bytes(), &Categorizer::builtin()).unwrap();
        assert_eq!(report.skipped, 0);
        let cats: Vec<_> = report.transactions.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(cats, vec!["Transport", "Groceries", "Salary", "Uncategorized"]);
    }

    #[test]
    fn test_kind_defaults_from_sign() {
        let text = "\
date,amount,description,type
2025-11-03,-12.50,Uber ride,
2025-11-05,2500,Payroll,
2025-11-06,40,Refund from shop,expense
2025-11-07,(12.50),Taxi to airport,
";
        let report = import_reader(text.as_bytes(), &Categorizer::builtin()).unwrap();
        assert_eq!(report.transactions[3].amount, -12.5);
        let kinds: Vec<_> = report.transactions.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TransactionKind::Expense,
                TransactionKind::Income,
                TransactionKind::Expense,
                TransactionKind::Expense,
            ]
        );
    }

    #[test]
    fn test_skipped_rows_are_reported() {
        let text = "date,amount,description\nnope,1,Pizza\n2025-01-01,1,Pizza\n";
        let report = import_reader(text.as_bytes(), &Categorizer::builtin()).unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.transactions[0].category, "Dining");
    }
}
