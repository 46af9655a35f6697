//! Expense totals grouped by category.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use spendwise_core::Transaction;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
}

/// First day of a trailing window of `days` days ending at `today`.
pub fn days_ago(today: NaiveDate, days: i64) -> NaiveDate {
    today - Duration::days(days)
}

/// Expense totals per category on or after `since` (all time when `None`),
/// largest first; equal totals ordered by name.
pub fn category_totals(txns: &[Transaction], since: Option<NaiveDate>) -> Vec<CategoryTotal> {
    let mut groups: HashMap<&str, (f64, usize)> = HashMap::new();

    for txn in txns {
        if !txn.is_expense() {
            continue;
        }
        if since.is_some_and(|s| txn.date < s) {
            continue;
        }
        let entry = groups.entry(txn.category.as_str()).or_default();
        entry.0 += txn.amount;
        entry.1 += 1;
    }

    let mut totals: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total,
            count,
        })
        .collect();

    totals.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });
    totals
}

/// All-time expense totals per category.
pub fn summary(txns: &[Transaction]) -> Vec<CategoryTotal> {
    category_totals(txns, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendwise_core::TransactionKind;

    fn txn(
        id: u64,
        date: (i32, u32, u32),
        amount: f64,
        category: &str,
        kind: TransactionKind,
    ) -> Transaction {
        Transaction {
            id,
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            amount,
            description: format!("txn {id}"),
            category: category.to_string(),
            kind,
        }
    }

    fn sample() -> Vec<Transaction> {
        use TransactionKind::*;
        vec![
            txn(1, (2025, 10, 1), 50.0, "Dining", Expense),
            txn(2, (2025, 10, 20), 120.0, "Groceries", Expense),
            txn(3, (2025, 11, 2), 30.0, "Dining", Expense),
            txn(4, (2025, 11, 3), 3000.0, "Salary", Income),
            txn(5, (2025, 11, 5), 80.0, "Transport", Expense),
        ]
    }

    #[test]
    fn test_category_totals_window() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 10).unwrap();
        let totals = category_totals(&sample(), Some(days_ago(today, 30)));
        // 2025-10-11 onwards: Groceries 120, Transport 80, Dining 30
        let names: Vec<_> = totals.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(names, vec!["Groceries", "Transport", "Dining"]);
        assert_eq!(totals[2].total, 30.0);
    }

    #[test]
    fn test_summary_excludes_income() {
        let totals = summary(&sample());
        assert!(totals.iter().all(|t| t.category != "Salary"));
        let dining = totals.iter().find(|t| t.category == "Dining").unwrap();
        assert_eq!(dining.total, 80.0);
        assert_eq!(dining.count, 2);
    }

    #[test]
    fn test_ties_sorted_by_name() {
        use TransactionKind::*;
        let txns = vec![
            txn(1, (2025, 1, 1), 10.0, "Rent", Expense),
            txn(2, (2025, 1, 1), 10.0, "Health", Expense),
        ];
        let totals = summary(&txns);
        assert_eq!(totals[0].category, "Health");
        assert_eq!(totals[1].category, "Rent");
    }

    #[test]
    fn test_empty_input() {
        assert!(summary(&[]).is_empty());
    }
}
