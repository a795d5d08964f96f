//! # tvm-instruments
//!
//! Instruments built on the tvm-rs rate engine:
//!
//! * [`DebtLedger`] — a debt whose outstanding balance evolves as payments
//!   are applied against the projected payoff at maturity.
//! * [`FixedRateBond`] — a fixed-coupon bond priced from its cash-flow
//!   schedule, with Macaulay duration and first-order rate sensitivity.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Fixed-coupon bond pricing, duration, and sensitivity.
pub mod bond;

/// The debt ledger and its lifecycle status.
pub mod debt;

/// Payment records.
pub mod payment;

/// Persistence hooks for ledger snapshots.
pub mod store;

pub use bond::{BondTerms, CouponSchedule, FixedRateBond};
pub use debt::{DebtLedger, DebtStatus, LedgerSnapshot};
pub use payment::Payment;
pub use store::{JsonFileStore, LedgerStore, NullStore};
