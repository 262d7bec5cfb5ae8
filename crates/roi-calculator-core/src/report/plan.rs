use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::calculator;
use crate::error::RoiCalcError;
use crate::types::{InvestmentInput, InvestmentResult, TimeUnit};

/// The products a user can compare. NPS, lumpsum and investment are three
/// names for the same lump-sum growth formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Plan {
    SimpleInterest,
    CompoundInterest,
    Nps,
    Lumpsum,
    Investment,
    Sip,
}

impl Plan {
    /// Lump-sum plans in the order they are charted.
    pub const LUMP_SUM: [Plan; 5] = [
        Plan::SimpleInterest,
        Plan::CompoundInterest,
        Plan::Nps,
        Plan::Lumpsum,
        Plan::Investment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Plan::SimpleInterest => "Simple Interest",
            Plan::CompoundInterest => "Compound Interest",
            Plan::Nps => "NPS",
            Plan::Lumpsum => "Lumpsum",
            Plan::Investment => "Investment",
            Plan::Sip => "SIP",
        }
    }

    pub fn is_periodic(self) -> bool {
        matches!(self, Plan::Sip)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Plan {
    type Err = RoiCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "simpleinterest" | "simple" | "si" => Ok(Plan::SimpleInterest),
            "compoundinterest" | "compound" | "ci" => Ok(Plan::CompoundInterest),
            "nps" => Ok(Plan::Nps),
            "lumpsum" => Ok(Plan::Lumpsum),
            "investment" => Ok(Plan::Investment),
            "sip" => Ok(Plan::Sip),
            _ => Err(RoiCalcError::Parse(format!(
                "Unknown plan '{}'. Use: simple-interest, compound-interest, nps, lumpsum, investment, sip",
                s.trim()
            ))),
        }
    }
}

/// Run one plan against the user's inputs.
///
/// Simple and compound interest take their horizon in years, so a horizon
/// given in months is converted first.
pub fn evaluate_plan(plan: Plan, input: &InvestmentInput) -> InvestmentResult {
    let p = input.principal;
    let r = input.rate_percent;
    match plan {
        Plan::SimpleInterest => calculator::simple_interest(p, r, input.time_in_years()),
        Plan::CompoundInterest => calculator::compound_interest_annual(p, r, input.time_in_years()),
        Plan::Nps | Plan::Lumpsum | Plan::Investment => {
            calculator::growth_over_time(p, r, input.time, input.time_unit)
        }
        Plan::Sip => calculator::periodic_contribution(p, r, input.time, input.time_unit),
    }
}

/// Message attached to any result that hit the `Decimal` ceiling.
pub fn saturation_warning() -> String {
    format!(
        "Some amounts exceed the representable range and were capped at {}",
        Decimal::MAX
    )
}

/// Caveats a reader of `result` should see alongside the figures.
pub fn plan_warnings(plan: Plan, input: &InvestmentInput, result: &InvestmentResult) -> Vec<String> {
    let mut warnings = Vec::new();
    if plan.is_periodic() {
        let months = input.time_unit.to_months(input.time);
        if input.time_unit == TimeUnit::Months {
            warnings.push(format!(
                "SIP ROI for a horizon in months is measured against a single contribution of {}, \
                 not the {} monthly contributions made",
                input.principal,
                months.trunc()
            ));
        }
        if !months.fract().is_zero() {
            warnings.push(format!(
                "Partial month ignored: SIP runs {} whole monthly periods",
                months.trunc()
            ));
        }
    }
    if result.final_amount == Decimal::MAX {
        warnings.push(saturation_warning());
    }
    warnings
}
