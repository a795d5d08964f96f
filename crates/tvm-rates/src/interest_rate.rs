//! A nominal rate paired with its compounding frequency.

use crate::algebra::equivalent_rate;
use crate::frequency::Frequency;
use serde::{Deserialize, Serialize};
use tvm_core::{Rate, Spread};

/// An interest rate with its compounding frequency.
///
/// Immutable: conversions return new values, never mutate.  All
/// equivalence conversions funnel through
/// [`equivalent_rate`](crate::algebra::equivalent_rate).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestRate {
    rate: Rate,
    frequency: Frequency,
}

/// The common basis onto which two rates are mapped before differencing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadBasis {
    /// Compare as continuously-compounded annual rates.
    Continuous,
    /// Compare as effective annual (single-compounding) rates.
    EffectiveAnnual,
}

/// The result of a spread computation: both rates on the common basis and
/// their signed difference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSpread {
    /// This instrument's rate on the common basis.
    pub rate: Rate,
    /// The reference rate on the common basis.
    pub reference: Rate,
    /// `rate − reference`.
    pub spread: Spread,
}

impl InterestRate {
    /// Bundle a nominal annual rate with its compounding frequency.
    pub fn new(rate: Rate, frequency: Frequency) -> Self {
        Self { rate, frequency }
    }

    /// The nominal annual rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// The compounding frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// The nominal annual rate equivalent to this one at `target`.
    pub fn annual_equivalent(&self, target: Frequency) -> Rate {
        equivalent_rate(self.rate, self.frequency, target)
    }

    /// The per-period rate at `target`, ready for
    /// [`future_value`](crate::algebra::future_value) /
    /// [`present_value`](crate::algebra::present_value).
    ///
    /// For a discrete target this is the annual equivalent divided by the
    /// period count.  For a continuous target it is the continuous annual
    /// rate itself, since the continuous formulas already take an
    /// annualized exponent.
    pub fn periodic_rate(&self, target: Frequency) -> Rate {
        match target {
            Frequency::Periods(f) => self.annual_equivalent(target) / f,
            Frequency::Continuous => self.annual_equivalent(Frequency::Continuous),
        }
    }

    /// The effective annual rate (single compounding per year).
    pub fn effective_annual(&self) -> Rate {
        self.annual_equivalent(Frequency::ANNUAL)
    }

    /// Map this rate and `reference` onto `basis` and return the signed
    /// difference together with both converted rates.
    pub fn spread_against(&self, reference: &InterestRate, basis: SpreadBasis) -> RateSpread {
        let target = match basis {
            SpreadBasis::Continuous => Frequency::Continuous,
            SpreadBasis::EffectiveAnnual => Frequency::ANNUAL,
        };
        let rate = self.annual_equivalent(target);
        let reference = reference.annual_equivalent(target);
        RateSpread {
            rate,
            reference,
            spread: rate - reference,
        }
    }
}

impl std::fmt::Display for InterestRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}% {}", self.rate * 100.0, self.frequency)
    }
}

impl std::fmt::Display for RateSpread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "spread ({:.2}% - {:.2}%): {:.6}",
            self.rate * 100.0,
            self.reference * 100.0,
            self.spread
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{equivalent_annual_rate, future_value};
    use approx::assert_abs_diff_eq;

    #[test]
    fn annual_equivalent_agrees_with_algebra() {
        let ir = InterestRate::new(0.12, Frequency::MONTHLY);
        assert_abs_diff_eq!(
            ir.effective_annual(),
            equivalent_annual_rate(0.12, Frequency::MONTHLY),
            epsilon = 1e-15
        );
    }

    #[test]
    fn periodic_rate_feeds_future_value() {
        // Compounding the monthly periodic rate 12 times must equal one
        // year of monthly compounding on the nominal rate.
        let ir = InterestRate::new(0.12, Frequency::MONTHLY);
        let grown = future_value(1.0, ir.periodic_rate(Frequency::MONTHLY), 12.0);
        assert_abs_diff_eq!(grown, (1.0_f64 + 0.12 / 12.0).powi(12), epsilon = 1e-12);
    }

    #[test]
    fn continuous_periodic_rate_is_annualized() {
        let ir = InterestRate::new(0.12, Frequency::MONTHLY);
        assert_abs_diff_eq!(
            ir.periodic_rate(Frequency::Continuous),
            ir.annual_equivalent(Frequency::Continuous),
            epsilon = 1e-15
        );
    }

    #[test]
    fn spread_is_signed_difference() {
        let ir = InterestRate::new(0.12, Frequency::MONTHLY);
        let rf = InterestRate::new(0.075, Frequency::per_tenor_days(28).unwrap());
        for basis in [SpreadBasis::Continuous, SpreadBasis::EffectiveAnnual] {
            let s = ir.spread_against(&rf, basis);
            assert_abs_diff_eq!(s.spread, s.rate - s.reference, epsilon = 1e-15);
            assert!(s.spread > 0.0);
            // Swapping the operands negates the spread.
            let swapped = rf.spread_against(&ir, basis);
            assert_abs_diff_eq!(swapped.spread, -s.spread, epsilon = 1e-15);
        }
    }

    #[test]
    fn spread_report_renders() {
        let ir = InterestRate::new(0.12, Frequency::MONTHLY);
        let rf = InterestRate::new(0.075, Frequency::QUARTERLY);
        let line = ir.spread_against(&rf, SpreadBasis::Continuous).to_string();
        assert!(line.contains("spread"), "{line}");
        assert!(line.contains('%'), "{line}");
    }
}
