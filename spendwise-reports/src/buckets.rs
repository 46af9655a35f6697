//! Calendar-month buckets for monthly totals and per-category series.
//!
//! The window runs from the first day of the month containing
//! `first_of(today) - months * 31 days` through today's month, one bucket per
//! month, empty months included as zero.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use spendwise_core::Transaction;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotal {
    /// `YYYY-MM`
    pub month: String,
    pub total: f64,
}

pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn next_month(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}

/// First day of the reporting window.
pub fn window_start(today: NaiveDate, months: u32) -> NaiveDate {
    first_of_month(first_of_month(today) - Duration::days(i64::from(months) * 31))
}

fn bucket<'a, I>(txns: I, months: u32, today: NaiveDate) -> Vec<MonthTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let start = window_start(today, months);
    let end = first_of_month(today);

    let mut agg: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut cur = Some(start);
    while let Some(month) = cur.filter(|m| *m <= end) {
        agg.insert(month, 0.0);
        cur = next_month(month);
    }

    for txn in txns {
        if let Some(total) = agg.get_mut(&first_of_month(txn.date)) {
            *total += txn.amount;
        }
    }

    agg.into_iter()
        .map(|(month, total)| MonthTotal {
            month: month_key(month),
            total,
        })
        .collect()
}

/// Per-month totals of every transaction, income and expense alike.
pub fn monthly_totals(txns: &[Transaction], months: u32, today: NaiveDate) -> Vec<MonthTotal> {
    bucket(txns, months, today)
}

/// Per-month totals for one category (exact match).
pub fn category_series(
    txns: &[Transaction],
    category: &str,
    months: u32,
    today: NaiveDate,
) -> Vec<MonthTotal> {
    bucket(txns.iter().filter(|t| t.category == category), months, today)
}
