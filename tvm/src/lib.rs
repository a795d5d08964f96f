//! # tvm
//!
//! Time-value-of-money instruments: interest-rate equivalence under
//! arbitrary compounding conventions, debt ledgers whose balance evolves
//! as payments are applied, and fixed-coupon bond analytics.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `tvm-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use tvm::rates::{Frequency, InterestRate};
//!
//! // A 12% nominal rate compounding monthly, expressed continuously.
//! let rate = InterestRate::new(0.12, Frequency::MONTHLY);
//! let continuous = rate.annual_equivalent(Frequency::Continuous);
//! assert!((continuous - 0.1194).abs() < 1e-3);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, error definitions, and global settings.
pub use tvm_core as core;

/// Calendar-date parsing and day counting.
pub use tvm_time as time;

/// Rate algebra, interest rates, and the risk-free reference curve.
pub use tvm_rates as rates;

/// Debt ledgers and fixed-coupon bonds.
pub use tvm_instruments as instruments;
