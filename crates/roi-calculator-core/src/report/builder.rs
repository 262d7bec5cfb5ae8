use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::calculator;
use crate::report::plan::{evaluate_plan, plan_warnings, saturation_warning, Plan};
use crate::report::validation::validate_input;
use crate::types::{
    round_money, with_metadata, ComputationOutput, InvestmentInput, InvestmentResult, Money,
    TrajectoryPoint,
};
use crate::RoiCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One plan's figures, labelled for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOutcome {
    pub plan: Plan,
    pub label: String,
    pub final_amount: Money,
    pub return_on_investment: Money,
}

impl PlanOutcome {
    pub fn new(plan: Plan, result: InvestmentResult) -> Self {
        Self {
            plan,
            label: plan.label().to_string(),
            final_amount: result.final_amount,
            return_on_investment: result.return_on_investment,
        }
    }

    pub fn result(&self) -> InvestmentResult {
        InvestmentResult::new(self.final_amount, self.return_on_investment)
    }

    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            plan: self.plan,
            label: self.label.clone(),
            final_amount: round_money(self.final_amount, dp),
            return_on_investment: round_money(self.return_on_investment, dp),
        }
    }
}

/// Everything one "calculate" action produces: the ROI bar-chart data for
/// the lump-sum plans, the SIP figures, and the year-wise SIP curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiReport {
    pub plans: Vec<PlanOutcome>,
    pub sip: PlanOutcome,
    pub trajectory: Vec<TrajectoryPoint>,
}

impl RoiReport {
    /// Lump-sum plan with the highest ROI; the earlier plan wins a tie.
    pub fn best_plan(&self) -> Option<&PlanOutcome> {
        self.plans.iter().fold(None, |best: Option<&PlanOutcome>, p| match best {
            Some(b) if b.return_on_investment >= p.return_on_investment => Some(b),
            _ => Some(p),
        })
    }

    pub fn outcome(&self, plan: Plan) -> Option<&PlanOutcome> {
        if plan == self.sip.plan {
            return Some(&self.sip);
        }
        self.plans.iter().find(|p| p.plan == plan)
    }

    /// Copy with every amount rounded to `dp` decimals for display.
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            plans: self.plans.iter().map(|p| p.rounded(dp)).collect(),
            sip: self.sip.rounded(dp),
            trajectory: self.trajectory.iter().map(|t| t.rounded(dp)).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Number of whole years the SIP curve covers; a fractional horizon is
/// rounded up so the last point is not before the end of the horizon.
fn trajectory_years(input: &InvestmentInput) -> u32 {
    input.time_in_years().ceil().to_u32().unwrap_or(0)
}

/// Validate the inputs, run every plan once and assemble the report.
pub fn build_report(input: &InvestmentInput) -> RoiCalcResult<ComputationOutput<RoiReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let plans: Vec<PlanOutcome> = Plan::LUMP_SUM
        .iter()
        .map(|plan| PlanOutcome::new(*plan, evaluate_plan(*plan, input)))
        .collect();
    let sip = PlanOutcome::new(Plan::Sip, evaluate_plan(Plan::Sip, input));

    let horizon = trajectory_years(input);
    let trajectory: Vec<TrajectoryPoint> =
        calculator::yearly_trajectory(input.principal, input.rate_percent, horizon).collect();

    // --- Warnings ---
    for outcome in plans.iter().chain(std::iter::once(&sip)) {
        for w in plan_warnings(outcome.plan, input, &outcome.result()) {
            if !warnings.contains(&w) {
                warnings.push(w);
            }
        }
    }
    if input.principal.is_zero() {
        warnings.push("Principal is zero; every plan returns zero".into());
    } else if input.rate_percent.is_zero() {
        warnings.push("Rate is zero; amounts equal the contributions made".into());
    }
    let capped = saturation_warning();
    if trajectory.iter().any(|t| t.amount == Decimal::MAX) && !warnings.contains(&capped) {
        warnings.push(capped);
    }

    let report = RoiReport {
        plans,
        sip,
        trajectory,
    };
    debug!(
        plans = report.plans.len(),
        trajectory_points = report.trajectory.len(),
        warnings = warnings.len(),
        "built ROI report"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "ROI comparison (simple interest, annual compounding, lump-sum growth, monthly SIP)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "rate_percent": input.rate_percent.to_string(),
            "time": input.time.to_string(),
            "time_unit": input.time_unit.to_string(),
            "time_in_years": input.time_in_years().to_string(),
            "trajectory_years": horizon,
        }),
        warnings,
        elapsed,
        report,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
