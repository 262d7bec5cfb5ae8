use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Serialize;
use std::time::Instant;

use roi_calculator_core::calculator;
use roi_calculator_core::report::{self, Plan, PlanOutcome};
use roi_calculator_core::types::{with_metadata, InvestmentInput, TimeUnit, TrajectoryPoint};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_input(input_json: &str) -> NapiResult<InvestmentInput> {
    let input: InvestmentInput = serde_json::from_str(input_json).map_err(to_napi_error)?;
    report::validate_input(&input).map_err(to_napi_error)?;
    Ok(input)
}

fn to_json(value: &impl Serialize) -> NapiResult<String> {
    serde_json::to_string(value).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Every plan plus the SIP growth curve, the data behind both charts.
#[napi]
pub fn calculate_report(input_json: String) -> NapiResult<String> {
    let input: InvestmentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::build_report(&input).map_err(to_napi_error)?;
    to_json(&output)
}

// ---------------------------------------------------------------------------
// Single plans
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_plan(plan: String, input_json: String) -> NapiResult<String> {
    let start = Instant::now();
    let plan: Plan = plan.parse().map_err(to_napi_error)?;
    let input = parse_input(&input_json)?;
    let result = report::evaluate_plan(plan, &input);
    let warnings = report::plan_warnings(plan, &input, &result);
    let output = with_metadata(
        plan.label(),
        &input,
        warnings,
        start.elapsed().as_micros() as u64,
        PlanOutcome::new(plan, result),
    );
    to_json(&output)
}

#[napi]
pub fn yearly_trajectory(input_json: String, years: u32) -> NapiResult<String> {
    let start = Instant::now();
    let mut input = parse_input(&input_json)?;
    // the curve's horizon is `years`, whatever the document says
    input.time = Decimal::from(years);
    input.time_unit = TimeUnit::Years;
    report::validate_input(&input).map_err(to_napi_error)?;
    let points: Vec<TrajectoryPoint> =
        calculator::yearly_trajectory(input.principal, input.rate_percent, years).collect();
    let output = with_metadata(
        "Year-wise SIP amount",
        &input,
        Vec::new(),
        start.elapsed().as_micros() as u64,
        points,
    );
    to_json(&output)
}
