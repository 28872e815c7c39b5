//! Append-only log of successful weather lookups.
//!
//! Each lookup becomes one comma-delimited row; the file is created with a
//! header row on first use and is never rewritten.

pub mod file;
pub mod row;

pub use file::CsvLookupLog;
pub use row::{LogRow, HEADER};
