//! spendwise-ingest: CSV bulk upload parsing and per-row categorization.

pub mod bulk;
pub mod dates;
pub mod upload;

pub use bulk::{ImportReport, import_csv, import_reader};
pub use dates::parse_date;
pub use upload::{ParsedUpload, UploadRow, parse_upload_csv, parse_upload_reader};
