//! spendwise-reports: category and monthly aggregations over stored transactions

pub mod buckets;
pub mod totals;

pub use buckets::{MonthTotal, category_series, month_key, monthly_totals, window_start};
pub use totals::{CategoryTotal, category_totals, days_ago, summary};
