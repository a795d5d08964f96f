//! Compounding frequency.
//!
//! A frequency is either a finite, strictly positive number of compounding
//! periods per year or the continuous sentinel.  Periods per year are kept
//! as a `Real` rather than an integer because discount rates built from a
//! tenor compound `360 / tenor_days` times per year, which is fractional
//! for the 28- and 91-day tenors.
//!
//! Named tokens (`"daily"`, `"monthly"`, …) and raw numbers are resolved
//! into this representation once, at the boundary; everything downstream
//! matches on the two variants only.

use serde::{Deserialize, Serialize};
use tvm_core::{ensure, Error, Real, Result};

/// How often a nominal annual rate compounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Frequency {
    /// Compounds `n` times per year (`n` finite and > 0, possibly
    /// fractional).
    Periods(Real),
    /// Continuous compounding — the limiting case as the number of periods
    /// grows without bound.
    Continuous,
}

impl Frequency {
    /// Daily compounding under ACT/360 (360 periods per year).
    pub const DAILY: Frequency = Frequency::Periods(360.0);
    /// Monthly compounding.
    pub const MONTHLY: Frequency = Frequency::Periods(12.0);
    /// Bimonthly compounding (every two months).
    pub const BIMONTHLY: Frequency = Frequency::Periods(6.0);
    /// Quarterly compounding.
    pub const QUARTERLY: Frequency = Frequency::Periods(4.0);
    /// Compounding every four months.
    pub const FOUR_MONTHLY: Frequency = Frequency::Periods(3.0);
    /// Semiannual compounding.
    pub const SEMIANNUAL: Frequency = Frequency::Periods(2.0);
    /// Annual compounding.
    pub const ANNUAL: Frequency = Frequency::Periods(1.0);

    /// A discrete frequency of `per_year` periods per year.
    ///
    /// Returns [`Error::Precondition`] unless `per_year` is finite and
    /// strictly positive.
    pub fn periods(per_year: Real) -> Result<Self> {
        ensure!(
            per_year.is_finite() && per_year > 0.0,
            "periods per year must be finite and positive, got {per_year}"
        );
        Ok(Frequency::Periods(per_year))
    }

    /// The frequency at which a `tenor_days`-day instrument compounds under
    /// ACT/360: `360 / tenor_days` periods per year.
    pub fn per_tenor_days(tenor_days: u32) -> Result<Self> {
        ensure!(tenor_days > 0, "tenor must be a positive number of days");
        Ok(Frequency::Periods(360.0 / tenor_days as Real))
    }

    /// Periods per year, or `None` for continuous compounding.
    pub fn periods_per_year(&self) -> Option<Real> {
        match self {
            Frequency::Periods(n) => Some(*n),
            Frequency::Continuous => None,
        }
    }

    /// `true` for the continuous sentinel.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Frequency::Continuous)
    }
}

impl std::str::FromStr for Frequency {
    type Err = Error;

    /// Resolve a named frequency token.
    ///
    /// Both the long names and the original tenor shorthands (`"1m"`,
    /// `"6m"`, `"1y"`, …) are accepted.
    fn from_str(token: &str) -> Result<Self> {
        match token {
            "daily" => Ok(Frequency::DAILY),
            "monthly" | "1m" => Ok(Frequency::MONTHLY),
            "bimonthly" | "2m" => Ok(Frequency::BIMONTHLY),
            "quarterly" | "3m" => Ok(Frequency::QUARTERLY),
            "four-monthly" | "4m" => Ok(Frequency::FOUR_MONTHLY),
            "semiannual" | "6m" => Ok(Frequency::SEMIANNUAL),
            "annual" | "1y" => Ok(Frequency::ANNUAL),
            "continuous" | "cont" => Ok(Frequency::Continuous),
            other => Err(Error::Domain(format!(
                "unknown frequency token `{other}`"
            ))),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Periods(n) => write!(f, "{n}x/year"),
            Frequency::Continuous => write!(f, "continuous"),
        }
    }
}
