//! Parse CSV bulk uploads into typed rows.
//!
//! Headers are matched case-insensitively:
//! date, amount (or amt), description, category, type.
//! Only the date column is required.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use spendwise_core::TransactionKind;
use std::io::Read;
use std::path::Path;
use tracing::warn;

use crate::dates::parse_date;

/// One usable CSV row, before categorization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRow {
    pub date: NaiveDate,
    pub amount: f64,
    pub description: String,
    /// Category typed into the file, if any
    pub category: Option<String>,
    /// Explicit type column, if recognized
    pub kind: Option<TransactionKind>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedUpload {
    pub rows: Vec<UploadRow>,
    /// Rows dropped for a missing or unreadable date
    pub skipped: usize,
}

#[derive(Debug, Default)]
struct Columns {
    date: Option<usize>,
    amount: Option<usize>,
    description: Option<usize>,
    category: Option<usize>,
    kind: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |names: &[&str]| {
            names.iter().find_map(|name| {
                headers
                    .iter()
                    .position(|h| h.trim().eq_ignore_ascii_case(name))
            })
        };

        Columns {
            date: find(&["date"]),
            amount: find(&["amount", "amt"]),
            description: find(&["description"]),
            category: find(&["category"]),
            kind: find(&["type"]),
        }
    }
}

fn field(record: &csv::StringRecord, col: Option<usize>) -> &str {
    col.and_then(|i| record.get(i)).unwrap_or("").trim()
}

/// Strip currency symbols, spaces and thousands separators, then parse.
/// An amount wrapped in parentheses is negative. Anything unreadable counts
/// as zero.
fn parse_amount(raw: &str, noise: &Regex) -> f64 {
    let raw = raw.trim();
    let (body, negative) = match raw.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        Some(inner) => (inner, true),
        None => (raw, false),
    };
    let amount: f64 = noise.replace_all(body, "").parse().unwrap_or(0.0);
    if negative { -amount.abs() } else { amount }
}

/// Parse an upload from a file on disk.
pub fn parse_upload_csv(path: impl AsRef<Path>) -> Result<ParsedUpload> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_upload_reader(file).with_context(|| format!("parsing {}", path.as_ref().display()))
}

/// Parse an upload from any reader (headers required).
pub fn parse_upload_reader<R: Read>(reader: R) -> Result<ParsedUpload> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let cols = Columns::from_headers(rdr.headers().context("reading header row")?);
    if cols.date.is_none() {
        bail!("upload has no date column");
    }

    let noise = Regex::new(r"[^0-9.\-]")?;
    let mut out = ParsedUpload::default();

    for (line, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("reading row {}", line + 1))?;

        let raw_date = field(&record, cols.date);
        let Some(date) = parse_date(raw_date) else {
            warn!(row = line + 1, date = raw_date, "skipping row with unreadable date");
            out.skipped += 1;
            continue;
        };

        let kind = match field(&record, cols.kind) {
            "" => None,
            raw => match raw.parse::<TransactionKind>() {
                Ok(kind) => Some(kind),
                Err(err) => {
                    warn!(row = line + 1, %err, "ignoring type column");
                    None
                }
            },
        };

        let category = Some(field(&record, cols.category))
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        out.rows.push(UploadRow {
            date,
            amount: parse_amount(field(&record, cols.amount), &noise),
            description: field(&record, cols.description).to_string(),
            category,
            kind,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parses_basic_rows() {
        let text = "\
date,amount,description,category,type
2025-11-03,12.50,Uber ride home,,expense
04-11-2025,\"$1,250.00\",Salary ACME,Salary,INCOME
";
        let parsed = parse_upload_reader(text.as_bytes()).unwrap();
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.rows.len(), 2);

        let first = &parsed.rows[0];
        assert_eq!(first.date, ymd(2025, 11, 3));
        assert_eq!(first.amount, 12.5);
        assert_eq!(first.category, None);
        assert_eq!(first.kind, Some(TransactionKind::Expense));

        let second = &parsed.rows[1];
        assert_eq!(second.date, ymd(2025, 11, 4));
        assert_eq!(second.amount, 1250.0);
        assert_eq!(second.category.as_deref(), Some("Salary"));
        assert_eq!(second.kind, Some(TransactionKind::Income));
    }

    #[test]
    fn test_header_aliases_and_case() {
        let text = "\
Date,Amt,Description
2025/01/15,-40,Netflix subscription
";
        let parsed = parse_upload_reader(text.as_bytes()).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].amount, -40.0);
        assert_eq!(parsed.rows[0].description, "Netflix subscription");
        assert_eq!(parsed.rows[0].kind, None);
    }

    #[test]
    fn test_bad_dates_are_skipped_and_bad_amounts_zero() {
        let text = "\
date,amount,description
,10,no date
someday,10,bad date
2025-03-01,ten,bad amount
";
        let parsed = parse_upload_reader(text.as_bytes()).unwrap();
        assert_eq!(parsed.skipped, 2);
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].amount, 0.0);
    }

    #[test]
    fn test_parenthesised_amounts_are_negative() {
        let text = "\
date,amount,description
2025-03-01,(12.50),Uber ride
2025-03-02,\"($1,200.00)\",Rent March
2025-03-03,(oops),Unreadable
";
        let parsed = parse_upload_reader(text.as_bytes()).unwrap();
        let amounts: Vec<f64> = parsed.rows.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![-12.5, -1200.0, 0.0]);
    }

    #[test]
    fn test_unknown_type_is_ignored() {
        let text = "date,amount,description,type\n2025-03-01,5,Coffee,refund\n";
        let parsed = parse_upload_reader(text.as_bytes()).unwrap();
        assert_eq!(parsed.rows[0].kind, None);
    }

    #[test]
    fn test_missing_date_column_is_an_error() {
        let text = "amount,description\n5,Coffee\n";
        assert!(parse_upload_reader(text.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = parse_upload_csv("/definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().contains("opening"));
    }
}
