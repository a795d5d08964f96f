//! Fixed-coupon bond pricing.
//!
//! All day counting is ACT/360.  The remaining life splits into
//! `integer_coupons` whole coupon periods plus an optional fractional stub
//! at the front; whole-period cash flows are discounted at the per-period
//! market rate `coupon_period_days · market_rate / 360`, and the stub
//! contributes the current coupon (dirty) or, after discounting back to
//! the last coupon date, subtracts the interest accrued since then
//! (clean).

use serde::{Deserialize, Serialize};
use tvm_core::{ensure, Rate, Real, Result};
use tvm_rates::algebra::present_value;

/// The contractual inputs of a fixed-coupon bond.  Immutable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondTerms {
    /// Face value redeemed at maturity.
    pub nominal_value: Real,
    /// Days in one coupon period.
    pub coupon_period_days: u32,
    /// Nominal annual coupon rate.
    pub coupon_rate: Rate,
    /// Nominal annual market yield.
    pub market_rate: Rate,
    /// Days until redemption.
    pub days_to_maturity: u32,
}

/// Schedule quantities derived from [`BondTerms`] once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouponSchedule {
    /// Cash paid per full coupon period:
    /// `nominal · period_days · coupon_rate / 360`.
    pub coupon_value: Real,
    /// `days_to_maturity / coupon_period_days`; possibly fractional.
    pub pending_coupons: Real,
    /// Whole coupon periods remaining.
    pub integer_coupons: u32,
    /// Fractional part of `pending_coupons`; zero means no stub.
    pub fractional_coupons: Real,
    /// Days elapsed since the last coupon date.
    pub accrued_days: Real,
    /// Days until the next coupon date.
    pub days_to_next_coupon: Real,
}

/// A fixed-coupon bond priced from its cash-flow schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRateBond {
    terms: BondTerms,
    schedule: CouponSchedule,
}

impl FixedRateBond {
    /// Build a bond, deriving its coupon schedule.
    ///
    /// Returns a domain error unless `coupon_period_days > 0`.
    pub fn new(terms: BondTerms) -> Result<Self> {
        ensure!(
            terms.coupon_period_days > 0,
            "coupon period must be a positive number of days"
        );
        let period = terms.coupon_period_days as Real;
        let pending = terms.days_to_maturity as Real / period;
        let fractional = pending.fract();
        let schedule = CouponSchedule {
            coupon_value: terms.nominal_value * period * terms.coupon_rate / 360.0,
            pending_coupons: pending,
            integer_coupons: pending.floor() as u32,
            fractional_coupons: fractional,
            accrued_days: period * (1.0 - fractional),
            days_to_next_coupon: fractional * period,
        };
        Ok(Self { terms, schedule })
    }

    /// The contractual inputs.
    pub fn terms(&self) -> &BondTerms {
        &self.terms
    }

    /// The derived coupon schedule.
    pub fn schedule(&self) -> &CouponSchedule {
        &self.schedule
    }

    /// The per-period market rate: `period_days · market_rate / 360`.
    fn periodic_market_rate(&self) -> Rate {
        self.terms.coupon_period_days as Real * self.terms.market_rate / 360.0
    }

    fn has_stub(&self) -> bool {
        self.schedule.fractional_coupons != 0.0
    }

    /// Each whole-period cash flow discounted back `j` periods; the final
    /// flow bundles the nominal redemption.
    fn discounted_coupon_flows(&self) -> Vec<Real> {
        let rate = self.periodic_market_rate();
        (1..=self.schedule.integer_coupons)
            .map(|j| {
                let cash = if j == self.schedule.integer_coupons {
                    self.schedule.coupon_value + self.terms.nominal_value
                } else {
                    self.schedule.coupon_value
                };
                present_value(cash, rate, j as Real)
            })
            .collect()
    }

    /// Price including accrued interest.
    ///
    /// The sum of the discounted whole-period flows, plus one coupon value
    /// for the current stub period when there is one.
    pub fn dirty_price(&self) -> Real {
        let whole: Real = self.discounted_coupon_flows().iter().sum();
        if self.has_stub() {
            whole + self.schedule.coupon_value
        } else {
            whole
        }
    }

    /// Price excluding accrued interest.
    ///
    /// The dirty price discounted back the stub fraction of a period to
    /// the last coupon date, minus the interest accrued since then.
    /// Equals the dirty price when there is no stub.
    pub fn clean_price(&self) -> Real {
        let dirty = self.dirty_price();
        if !self.has_stub() {
            return dirty;
        }
        let stub_fraction =
            self.schedule.days_to_next_coupon / self.terms.coupon_period_days as Real;
        let at_last_coupon = present_value(dirty, self.periodic_market_rate(), stub_fraction);
        let accrued = self.terms.nominal_value * self.terms.coupon_rate
            * self.schedule.accrued_days
            / 360.0;
        at_last_coupon - accrued
    }

    /// Macaulay duration in years: the time-weighted average of the
    /// discounted whole-period flows, normalized by the clean price.
    pub fn duration(&self) -> Real {
        let period_years = self.terms.coupon_period_days as Real / 360.0;
        let weighted: Real = self
            .discounted_coupon_flows()
            .iter()
            .enumerate()
            .map(|(i, pv)| (i + 1) as Real * period_years * pv)
            .sum();
        weighted / self.clean_price()
    }

    /// First-order price sensitivity to a yield shift:
    /// `duration / (1 + market_rate)`.
    pub fn sensitivity(&self) -> Real {
        self.duration() / (1.0 + self.terms.market_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // The worked reference example: one stub period, no whole coupons.
    fn stub_only_bond() -> FixedRateBond {
        FixedRateBond::new(BondTerms {
            nominal_value: 100.0,
            coupon_period_days: 182,
            coupon_rate: 0.082,
            market_rate: 0.085,
            days_to_maturity: 100,
        })
        .unwrap()
    }

    fn two_coupon_bond() -> FixedRateBond {
        FixedRateBond::new(BondTerms {
            nominal_value: 100.0,
            coupon_period_days: 182,
            coupon_rate: 0.082,
            market_rate: 0.085,
            days_to_maturity: 364,
        })
        .unwrap()
    }

    #[test]
    fn zero_period_is_rejected() {
        let result = FixedRateBond::new(BondTerms {
            nominal_value: 100.0,
            coupon_period_days: 0,
            coupon_rate: 0.08,
            market_rate: 0.08,
            days_to_maturity: 100,
        });
        assert!(result.is_err());
    }

    #[test]
    fn stub_schedule_matches_reference_example() {
        let bond = stub_only_bond();
        let s = bond.schedule();
        assert_abs_diff_eq!(s.pending_coupons, 100.0 / 182.0, epsilon = 1e-12);
        assert_eq!(s.integer_coupons, 0);
        assert_abs_diff_eq!(s.coupon_value, 100.0 * 182.0 * 0.082 / 360.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.days_to_next_coupon, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.accrued_days, 82.0, epsilon = 1e-9);
    }

    #[test]
    fn stub_only_dirty_price_is_one_coupon() {
        let bond = stub_only_bond();
        assert_abs_diff_eq!(bond.dirty_price(), 4.1456, epsilon = 1e-3);
        assert_abs_diff_eq!(
            bond.dirty_price(),
            bond.schedule().coupon_value,
            epsilon = 1e-12
        );
    }

    #[test]
    fn stub_only_clean_price_subtracts_accrual() {
        let bond = stub_only_bond();
        let dirty = bond.dirty_price();
        let stub_fraction = bond.schedule().fractional_coupons;
        let periodic: f64 = 182.0 * 0.085 / 360.0;
        let accrued = 100.0 * 0.082 * bond.schedule().accrued_days / 360.0;
        let expected = dirty / (1.0 + periodic).powf(stub_fraction) - accrued;
        assert_abs_diff_eq!(bond.clean_price(), expected, epsilon = 1e-9);
        assert!(bond.clean_price() < dirty);
    }

    #[test]
    fn whole_period_bond_has_no_stub() {
        let bond = two_coupon_bond();
        let s = bond.schedule();
        assert_eq!(s.integer_coupons, 2);
        assert_eq!(s.fractional_coupons, 0.0);
        assert_abs_diff_eq!(bond.clean_price(), bond.dirty_price(), epsilon = 1e-12);
    }

    #[test]
    fn whole_period_bond_discounts_each_flow() {
        let bond = two_coupon_bond();
        let coupon = bond.schedule().coupon_value;
        let i = 182.0 * 0.085 / 360.0;
        let expected = coupon / (1.0 + i) + (coupon + 100.0) / (1.0 + i).powi(2);
        assert_abs_diff_eq!(bond.dirty_price(), expected, epsilon = 1e-9);
    }

    #[test]
    fn duration_weights_each_period() {
        let bond = two_coupon_bond();
        let coupon = bond.schedule().coupon_value;
        let i = 182.0 * 0.085 / 360.0;
        let pv1 = coupon / (1.0 + i);
        let pv2 = (coupon + 100.0) / (1.0 + i).powi(2);
        let expected =
            (1.0 * pv1 + 2.0 * pv2) * (182.0 / 360.0) / bond.clean_price();
        assert_abs_diff_eq!(bond.duration(), expected, epsilon = 1e-9);
        // Just under one year for a bond dominated by its final flow.
        assert!(bond.duration() > 0.9 && bond.duration() < 1.05);
    }

    #[test]
    fn stub_only_duration_is_zero() {
        // No whole coupon periods remain, so there is nothing to weight.
        assert_abs_diff_eq!(stub_only_bond().duration(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn sensitivity_is_duration_over_gross_yield() {
        for bond in [stub_only_bond(), two_coupon_bond()] {
            assert_abs_diff_eq!(
                bond.sensitivity(),
                bond.duration() / 1.085,
                epsilon = 1e-12
            );
        }
    }
}
