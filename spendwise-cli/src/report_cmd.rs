use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;
use spendwise_core::Transaction;
use spendwise_reports::{
    CategoryTotal, MonthTotal, category_series, category_totals, days_ago, monthly_totals, summary,
};

use crate::config::ReportsSection;

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Expense totals per category over the last N days
    Category {
        #[arg(long)]
        days: Option<i64>,
    },
    /// Totals per month over the last N months
    Monthly {
        #[arg(long)]
        months: Option<u32>,
    },
    /// Monthly series for one category
    Series {
        #[arg(long)]
        category: String,
        #[arg(long)]
        months: Option<u32>,
    },
    /// All-time expense totals per category
    Summary,
}

pub fn run_report(
    cmd: ReportCommand,
    txns: &[Transaction],
    reports: &ReportsSection,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    match cmd {
        ReportCommand::Category { days } => {
            let days = days.unwrap_or(reports.default_days);
            let since = days_ago(today, days);
            let totals = category_totals(txns, Some(since));
            emit_totals(&format!("Spending by category since {since}"), &totals, json)
        }
        ReportCommand::Monthly { months } => {
            let months = months.unwrap_or(reports.default_months);
            let series = monthly_totals(txns, months, today);
            emit_months("Monthly totals", &series, json)
        }
        ReportCommand::Series { category, months } => {
            let months = months.unwrap_or(reports.default_months);
            let series = category_series(txns, &category, months, today);
            emit_months(&format!("Monthly totals: {category}"), &series, json)
        }
        ReportCommand::Summary => {
            emit_totals("All-time spending by category", &summary(txns), json)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn emit_totals(title: &str, totals: &[CategoryTotal], json: bool) -> Result<()> {
    if json {
        return print_json(totals);
    }
    println!("# {title}\n");
    if totals.is_empty() {
        println!("(no expenses)");
    }
    for t in totals {
        println!("{:<16} {:>12.2}  ({} txns)", t.category, t.total, t.count);
    }
    Ok(())
}

fn emit_months(title: &str, series: &[MonthTotal], json: bool) -> Result<()> {
    if json {
        return print_json(series);
    }
    println!("# {title}\n");
    for m in series {
        println!("{}  {:>12.2}", m.month, m.total);
    }
    Ok(())
}
