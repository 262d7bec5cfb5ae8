use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RoiCalcError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as percentages (12 = 12% per annum), as entered by the user.
pub type Percent = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

pub(crate) const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Round for display, midpoints away from zero, padded to exactly `dp` places.
pub fn round_money(value: Money, dp: u32) -> Money {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded
}

/// Unit in which the investment horizon is expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    #[default]
    #[serde(alias = "years")]
    Years,
    #[serde(alias = "months")]
    Months,
}

impl TimeUnit {
    /// Convert a horizon expressed in this unit to years.
    pub fn to_years(self, time: Decimal) -> Years {
        match self {
            TimeUnit::Years => time,
            TimeUnit::Months => time / MONTHS_PER_YEAR,
        }
    }

    /// Convert a horizon expressed in this unit to (possibly fractional) months.
    pub fn to_months(self, time: Decimal) -> Decimal {
        match self {
            TimeUnit::Years => time.saturating_mul(MONTHS_PER_YEAR),
            TimeUnit::Months => time,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Years => write!(f, "Years"),
            TimeUnit::Months => write!(f, "Months"),
        }
    }
}

impl FromStr for TimeUnit {
    type Err = RoiCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "years" | "year" | "y" => Ok(TimeUnit::Years),
            "months" | "month" | "m" => Ok(TimeUnit::Months),
            other => Err(RoiCalcError::Parse(format!(
                "Unknown time unit '{other}'. Use: Years, Months"
            ))),
        }
    }
}

/// The four values a user supplies for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentInput {
    /// Amount invested (once for lump-sum plans, every month for SIP)
    pub principal: Money,
    /// Annual rate of return, in percent
    pub rate_percent: Percent,
    /// Investment horizon, in `time_unit`
    pub time: Decimal,
    #[serde(default)]
    pub time_unit: TimeUnit,
}

impl InvestmentInput {
    pub fn new(principal: Money, rate_percent: Percent, time: Decimal, time_unit: TimeUnit) -> Self {
        Self {
            principal,
            rate_percent,
            time,
            time_unit,
        }
    }

    pub fn time_in_years(&self) -> Years {
        self.time_unit.to_years(self.time)
    }
}

/// Outcome of a single plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentResult {
    pub final_amount: Money,
    pub return_on_investment: Money,
}

impl InvestmentResult {
    pub fn new(final_amount: Money, return_on_investment: Money) -> Self {
        Self {
            final_amount,
            return_on_investment,
        }
    }

    /// The baseline the ROI was measured against.
    pub fn total_contributed(&self) -> Money {
        self.final_amount.saturating_sub(self.return_on_investment)
    }

    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            final_amount: round_money(self.final_amount, dp),
            return_on_investment: round_money(self.return_on_investment, dp),
        }
    }
}

/// One point of the year-wise SIP growth curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub year: u32,
    pub amount: Money,
}

impl TrajectoryPoint {
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            year: self.year,
            amount: round_money(self.amount, dp),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_unit_parse_is_case_insensitive() {
        assert_eq!("Years".parse::<TimeUnit>().unwrap(), TimeUnit::Years);
        assert_eq!("MONTHS".parse::<TimeUnit>().unwrap(), TimeUnit::Months);
        assert_eq!(" month ".parse::<TimeUnit>().unwrap(), TimeUnit::Months);
        assert!("weeks".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn test_time_unit_conversions() {
        assert_eq!(TimeUnit::Months.to_years(dec!(18)), dec!(1.5));
        assert_eq!(TimeUnit::Years.to_years(dec!(3)), dec!(3));
        assert_eq!(TimeUnit::Years.to_months(dec!(2.5)), dec!(30));
        assert_eq!(TimeUnit::Months.to_months(dec!(7)), dec!(7));
    }

    #[test]
    fn test_input_defaults_to_years() {
        let input: InvestmentInput =
            serde_json::from_str(r#"{"principal": 1000, "rate_percent": "8", "time": 5}"#)
                .unwrap();
        assert_eq!(input.time_unit, TimeUnit::Years);
        assert_eq!(input.principal, dec!(1000));
        assert_eq!(input.rate_percent, dec!(8));
    }

    #[test]
    fn test_input_accepts_original_unit_labels() {
        let input: InvestmentInput = serde_json::from_str(
            r#"{"principal": 1, "rate_percent": 1, "time": 1, "time_unit": "Months"}"#,
        )
        .unwrap();
        assert_eq!(input.time_unit, TimeUnit::Months);
        let input: InvestmentInput = serde_json::from_str(
            r#"{"principal": 1, "rate_percent": 1, "time": 1, "time_unit": "months"}"#,
        )
        .unwrap();
        assert_eq!(input.time_unit, TimeUnit::Months);
    }

    #[test]
    fn test_total_contributed_is_final_minus_roi() {
        let r = InvestmentResult::new(dec!(1210), dec!(210));
        assert_eq!(r.total_contributed(), dec!(1000));
    }

    #[test]
    fn test_rounded_two_places() {
        let r = InvestmentResult::new(dec!(1234.5678), dec!(0.005));
        let rounded = r.rounded(2);
        assert_eq!(rounded.final_amount, dec!(1234.57));
        assert_eq!(rounded.return_on_investment, dec!(0.01));
        assert_eq!(InvestmentResult::new(dec!(200), dec!(0)).rounded(2).final_amount.to_string(), "200.00");
    }
}
