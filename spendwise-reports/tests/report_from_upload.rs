use chrono::NaiveDate;
use spendwise_core::{Categorizer, Transaction};
use spendwise_ingest::import_csv;
use spendwise_reports::{category_series, category_totals, days_ago, monthly_totals, summary};
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join("transactions.csv")
}

fn load() -> Vec<Transaction> {
    let report = import_csv(fixture_path(), &Categorizer::builtin()).unwrap();
    assert_eq!(report.skipped, 1, "the undated row should be skipped");
    report
        .transactions
        .into_iter()
        .enumerate()
        .map(|(i, t)| Transaction::from_new(i as u64 + 1, t))
        .collect()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

/// Every fixture row lands in a known category, including the typo and the
/// user-typed lower-case category.
#[test]
fn test_fixture_categories() {
    let txns = load();
    assert_eq!(txns.len(), 24);

    let find = |desc: &str| txns.iter().find(|t| t.description == desc).unwrap();
    assert_eq!(find("Resturant downtown").category, "Dining");
    assert_eq!(find("Gift for mom").category, "Gifts");
    assert_eq!(find("xqzv 9931").category, "Uncategorized");
    assert_eq!(find("Hotel booking Goa").amount, 1050.0);

    let uncategorized = txns.iter().filter(|t| t.category == "Uncategorized").count();
    assert_eq!(uncategorized, 1);
}

/// Rent dominates all-time spending; income never appears in expense totals.
#[test]
fn test_summary_from_fixture() {
    let txns = load();
    let totals = summary(&txns);
    assert_eq!(totals[0].category, "Rent");
    assert!(approx(totals[0].total, 4800.0));
    assert!(totals.iter().all(|t| t.category != "Salary"));
}

#[test]
fn test_category_window_from_fixture() {
    let txns = load();
    let today = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();
    let totals = category_totals(&txns, Some(days_ago(today, 30)));
    let names: Vec<_> = totals.iter().map(|t| t.category.as_str()).collect();
    assert_eq!(names[0], "Rent");
    assert!(names.contains(&"Travel"));
    assert!(!names.contains(&"Health"), "August rows are outside the window");
}

#[test]
fn test_monthly_series_from_fixture() {
    let txns = load();
    let today = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();

    let monthly = monthly_totals(&txns, 3, today);
    let keys: Vec<_> = monthly.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(keys, vec!["2025-05", "2025-06", "2025-07", "2025-08", "2025-09"]);
    assert!(approx(monthly[0].total, 0.0));
    assert!(approx(monthly[1].total, 4505.69));

    let rent = category_series(&txns, "Rent", 3, today);
    assert!(rent[1..].iter().all(|m| approx(m.total, 1200.0)));
}
