use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use std::iter::FusedIterator;
use std::ops::RangeInclusive;
use tracing::trace;

use crate::types::{InvestmentResult, Money, Percent, TimeUnit, TrajectoryPoint, Years, MONTHS_PER_YEAR};

const ONE_HUNDRED: Decimal = dec!(100);

/// Integer exponents up to this many periods are compounded by repeated
/// multiplication; anything larger (or fractional) goes through `powd`.
const MAX_ITERATIVE_PERIODS: u32 = 1_200;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Compute base^n via iterative multiplication (avoids Decimal::powd drift).
/// Saturates at `Decimal::MAX`.
fn compound(base: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    for _ in 0..n {
        match result.checked_mul(base) {
            Some(next) => result = next,
            None => return Decimal::MAX,
        }
    }
    result
}

/// (1 + rate/100)^years for a possibly fractional number of years.
fn growth_factor(rate_percent: Percent, years: Years) -> Decimal {
    if years.is_zero() {
        return Decimal::ONE;
    }
    let base = Decimal::ONE.saturating_add(rate_percent / ONE_HUNDRED);
    if years.fract().is_zero() {
        if let Some(n) = years.to_u32().filter(|n| *n <= MAX_ITERATIVE_PERIODS) {
            return compound(base, n);
        }
    }
    base.checked_powd(years).unwrap_or(Decimal::MAX)
}

/// Whole number of periods in `count`; fractional periods are dropped.
fn whole_periods(count: Decimal) -> u32 {
    if count.is_sign_negative() {
        return 0;
    }
    count.trunc().to_u32().unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Lump-sum plans
// ---------------------------------------------------------------------------

/// Simple interest: ROI = P * r * t / 100, time in years.
pub fn simple_interest(principal: Money, rate_percent: Percent, time_years: Years) -> InvestmentResult {
    let roi = principal
        .saturating_mul(rate_percent)
        .saturating_mul(time_years)
        / ONE_HUNDRED;
    let result = InvestmentResult::new(principal.saturating_add(roi), roi);
    trace!(%principal, %rate_percent, %time_years, roi = %result.return_on_investment, "simple interest");
    result
}

/// Annually compounded interest: A = P * (1 + r/100)^t, time in years.
pub fn compound_interest_annual(
    principal: Money,
    rate_percent: Percent,
    time_years: Years,
) -> InvestmentResult {
    let amount = principal.saturating_mul(growth_factor(rate_percent, time_years));
    let result = InvestmentResult::new(amount, amount.saturating_sub(principal));
    trace!(%principal, %rate_percent, %time_years, amount = %result.final_amount, "compound interest");
    result
}

/// Lump-sum growth shared by the NPS, lumpsum and investment plans.
///
/// A horizon in months is converted to (fractional) years before compounding,
/// so 24 months and 2 years produce the same figure.
pub fn growth_over_time(
    principal: Money,
    rate_percent: Percent,
    time: Decimal,
    time_unit: TimeUnit,
) -> InvestmentResult {
    let years = time_unit.to_years(time);
    let amount = principal.saturating_mul(growth_factor(rate_percent, years));
    let result = InvestmentResult::new(amount, amount.saturating_sub(principal));
    trace!(%principal, %rate_percent, %years, amount = %result.final_amount, "lump-sum growth");
    result
}

// ---------------------------------------------------------------------------
// Systematic investment (SIP)
// ---------------------------------------------------------------------------

/// Monthly contribution of `principal`, each made at the start of the month
/// and compounded monthly at `rate_percent / 12`.
///
/// ROI is measured against `principal * time` when the horizon is given in
/// years, and against a single `principal` when it is given in months.
pub fn periodic_contribution(
    principal: Money,
    rate_percent: Percent,
    time: Decimal,
    time_unit: TimeUnit,
) -> InvestmentResult {
    let periods = whole_periods(time_unit.to_months(time));
    let monthly_growth = Decimal::ONE.saturating_add(rate_percent / ONE_HUNDRED / MONTHS_PER_YEAR);

    let mut amount = Decimal::ZERO;
    for _ in 0..periods {
        // contribution first, then a month of growth
        amount = amount.saturating_add(principal).saturating_mul(monthly_growth);
        if amount == Decimal::MAX {
            break;
        }
    }

    let baseline = match time_unit {
        TimeUnit::Years => principal.saturating_mul(time),
        TimeUnit::Months => principal,
    };
    let result = InvestmentResult::new(amount, amount.saturating_sub(baseline));
    trace!(%principal, %rate_percent, periods, amount = %result.final_amount, "periodic contribution");
    result
}

/// Year-wise SIP amounts for years `0..=total_years`.
///
/// Each point is an independent `periodic_contribution` call; nothing is
/// carried from one point to the next. Clone the iterator (or call this
/// again) to walk the curve a second time.
pub fn yearly_trajectory(principal: Money, rate_percent: Percent, total_years: u32) -> YearlyTrajectory {
    YearlyTrajectory {
        principal,
        rate_percent,
        years: 0..=total_years,
    }
}

/// Lazy sequence returned by [`yearly_trajectory`].
#[derive(Debug, Clone)]
pub struct YearlyTrajectory {
    principal: Money,
    rate_percent: Percent,
    years: RangeInclusive<u32>,
}

impl YearlyTrajectory {
    fn point(&self, year: u32) -> TrajectoryPoint {
        let sip = periodic_contribution(
            self.principal,
            self.rate_percent,
            Decimal::from(year),
            TimeUnit::Years,
        );
        TrajectoryPoint {
            year,
            amount: sip.final_amount,
        }
    }
}

impl Iterator for YearlyTrajectory {
    type Item = TrajectoryPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let year = self.years.next()?;
        Some(self.point(year))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.years.size_hint()
    }
}

impl DoubleEndedIterator for YearlyTrajectory {
    fn next_back(&mut self) -> Option<Self::Item> {
        let year = self.years.next_back()?;
        Some(self.point(year))
    }
}

impl FusedIterator for YearlyTrajectory {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_matches_repeated_multiplication() {
        assert_eq!(compound(dec!(1.1), 2), dec!(1.21));
        assert_eq!(compound(dec!(1.5), 0), Decimal::ONE);
    }

    #[test]
    fn test_compound_saturates() {
        assert_eq!(compound(dec!(1000), 20), Decimal::MAX);
    }

    #[test]
    fn test_growth_factor_zero_years() {
        assert_eq!(growth_factor(dec!(12), Decimal::ZERO), Decimal::ONE);
    }

    #[test]
    fn test_growth_factor_fractional_years() {
        // 1.21^0.5 = 1.1
        let f = growth_factor(dec!(21), dec!(0.5));
        assert!((f - dec!(1.1)).abs() < dec!(0.000001), "got {f}");
    }

    #[test]
    fn test_whole_periods_truncates() {
        assert_eq!(whole_periods(dec!(11.99)), 11);
        assert_eq!(whole_periods(dec!(12)), 12);
        assert_eq!(whole_periods(dec!(-3)), 0);
    }

    #[test]
    fn test_simple_interest_basic() {
        let r = simple_interest(dec!(1000), dec!(10), dec!(2));
        assert_eq!(r.final_amount, dec!(1200));
        assert_eq!(r.return_on_investment, dec!(200));
    }

    #[test]
    fn test_compound_interest_basic() {
        let r = compound_interest_annual(dec!(1000), dec!(10), dec!(2));
        assert_eq!(r.final_amount, dec!(1210));
        assert_eq!(r.return_on_investment, dec!(210));
    }

    #[test]
    fn test_sip_add_then_grow() {
        // Two months at 12% p.a.: (1000 * 1.01 + 1000) * 1.01 = 2030.10
        let r = periodic_contribution(dec!(1000), dec!(12), dec!(2), TimeUnit::Months);
        assert_eq!(r.final_amount, dec!(2030.1));
        // months baseline is a single contribution
        assert_eq!(r.return_on_investment, dec!(1030.1));
    }

    #[test]
    fn test_sip_fractional_month_contributes_nothing() {
        let whole = periodic_contribution(dec!(500), dec!(6), dec!(3), TimeUnit::Months);
        let partial = periodic_contribution(dec!(500), dec!(6), dec!(3.9), TimeUnit::Months);
        assert_eq!(whole.final_amount, partial.final_amount);
    }

    #[test]
    fn test_trajectory_reports_exact_size() {
        let t = yearly_trajectory(dec!(100), dec!(5), 10);
        assert_eq!(t.size_hint(), (11, Some(11)));
    }

    #[test]
    fn test_trajectory_from_back() {
        let mut t = yearly_trajectory(dec!(100), dec!(0), 3);
        let last = t.next_back().unwrap();
        assert_eq!(last.year, 3);
        assert_eq!(last.amount, dec!(3600));
        assert_eq!(t.count(), 3);
    }
}
