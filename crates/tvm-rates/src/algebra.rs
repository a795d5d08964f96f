//! Pure rate-conversion and valuation functions.
//!
//! Everything here is a total function over its stated domain; the only
//! fallible entry point is [`implied_annual_rate`].  `periods` arguments
//! may be fractional or negative — a negative period count discounts
//! instead of compounding.
//!
//! [`equivalent_rate`] is the equivalence map every rate comparison in the
//! library funnels through.  It is derived by equating effective annual
//! rates; the continuous cases use the closed forms rather than the
//! discrete formula with an unbounded exponent.

use crate::frequency::Frequency;
use tvm_core::{ensure, Rate, Real, Result, Time};

/// `capital · (1 + periodic_rate)^periods`.
pub fn future_value(capital: Real, periodic_rate: Rate, periods: Real) -> Real {
    capital * (1.0 + periodic_rate).powf(periods)
}

/// `capital · (1 + periodic_rate)^(−periods)`.
pub fn present_value(capital: Real, periodic_rate: Rate, periods: Real) -> Real {
    capital * (1.0 + periodic_rate).powf(-periods)
}

/// `capital · e^(annual_rate · years)` — continuous compounding.
pub fn continuous_future_value(capital: Real, annual_rate: Rate, years: Time) -> Real {
    capital * (annual_rate * years).exp()
}

/// `capital · e^(−annual_rate · years)` — continuous discounting.
pub fn continuous_present_value(capital: Real, annual_rate: Rate, years: Time) -> Real {
    capital * (-annual_rate * years).exp()
}

/// The annually-compounded rate that grows `initial` into `final_capital`
/// over `years`: `(final/initial)^(1/years) − 1`.
///
/// Returns a domain error if `initial ≤ 0` or `years == 0`.
pub fn implied_annual_rate(initial: Real, final_capital: Real, years: Time) -> Result<Rate> {
    ensure!(initial > 0.0, "initial capital must be positive, got {initial}");
    ensure!(years != 0.0, "years must be non-zero");
    Ok((final_capital / initial).powf(1.0 / years) - 1.0)
}

/// The effective annual rate equivalent to a nominal `rate` compounding at
/// `freq`: `(1 + rate/f)^f − 1`, or `e^rate − 1` for continuous
/// compounding.
pub fn equivalent_annual_rate(rate: Rate, freq: Frequency) -> Rate {
    match freq {
        Frequency::Periods(f) => (1.0 + rate / f).powf(f) - 1.0,
        Frequency::Continuous => rate.exp() - 1.0,
    }
}

/// The nominal annual rate at `to` equivalent to a nominal `rate` at
/// `from`, obtained by equating effective annual rates.
///
/// Discrete-to-discrete uses `f₂·[(1 + r/f₁)^(f₁/f₂) − 1]`.  A continuous
/// target uses the limiting form `f₁·ln(1 + r/f₁)`; a continuous source
/// uses its inverse `f₂·(e^(r/f₂) − 1)`.
pub fn equivalent_rate(rate: Rate, from: Frequency, to: Frequency) -> Rate {
    match (from, to) {
        (Frequency::Continuous, Frequency::Continuous) => rate,
        (Frequency::Periods(f1), Frequency::Continuous) => f1 * (1.0 + rate / f1).ln(),
        (Frequency::Continuous, Frequency::Periods(f2)) => f2 * ((rate / f2).exp() - 1.0),
        (Frequency::Periods(f1), Frequency::Periods(f2)) => {
            f2 * ((1.0 + rate / f1).powf(f1 / f2) - 1.0)
        }
    }
}

/// Fisher equation: the inflation-adjusted real rate
/// `(1 + nominal)/(1 + inflation) − 1`.
pub fn real_rate(nominal_rate: Rate, inflation_rate: Rate) -> Rate {
    (1.0 + nominal_rate) / (1.0 + inflation_rate) - 1.0
}
