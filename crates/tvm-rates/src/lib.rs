//! # tvm-rates
//!
//! Interest-rate representations under arbitrary compounding conventions.
//!
//! The crate is layered leaf-first: [`algebra`] holds the pure
//! rate-equivalence and present/future-value functions, [`Frequency`] is
//! the numeric-or-continuous compounding representation they operate on,
//! [`InterestRate`] bundles a rate with its frequency, and [`curve`]
//! supplies the process-wide risk-free reference curve used to build
//! discount rates.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Pure rate-conversion and valuation functions.
pub mod algebra;

/// The risk-free reference curve: provider trait, HTTP scrape, cache.
pub mod curve;

/// Compounding frequency (periods per year or continuous).
pub mod frequency;

/// A rate paired with its compounding frequency.
pub mod interest_rate;

pub use curve::{
    install_reference_curve, reference_curve, risk_free_rate, CurveProvider, ReferenceCurve,
};
pub use frequency::Frequency;
pub use interest_rate::{InterestRate, RateSpread, SpreadBasis};
