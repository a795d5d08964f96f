//! # tvm-time
//!
//! Calendar-date utilities for tvm-rs: parsing and formatting the fixed
//! `"Mon DD YYYY"` textual format, signed day counts, and the
//! evaluation-date-aware `today()`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Date parsing, formatting, and day counting.
pub mod date;

pub use date::{days_between, format_date, parse_date, today, DATE_FORMAT};
