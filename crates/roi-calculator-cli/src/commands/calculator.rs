use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use roi_calculator_core::calculator;
use roi_calculator_core::report::{evaluate_plan, plan_warnings, validate_input, Plan, PlanOutcome};
use roi_calculator_core::types::{with_metadata, InvestmentInput, TimeUnit, TrajectoryPoint};

/// Unit of the --time flag
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitArg {
    Years,
    Months,
}

impl From<UnitArg> for TimeUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Years => TimeUnit::Years,
            UnitArg::Months => TimeUnit::Months,
        }
    }
}

/// The lump-sum growth products
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GrowthPlanArg {
    Nps,
    Lumpsum,
    Investment,
}

impl From<GrowthPlanArg> for Plan {
    fn from(plan: GrowthPlanArg) -> Self {
        match plan {
            GrowthPlanArg::Nps => Plan::Nps,
            GrowthPlanArg::Lumpsum => Plan::Lumpsum,
            GrowthPlanArg::Investment => Plan::Investment,
        }
    }
}

/// Principal, rate and horizon shared by every plan
#[derive(Args, Debug, Clone)]
pub struct InvestmentArgs {
    /// Amount invested (invested every month for SIP)
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Decimal,

    /// Annual rate of return in percent (e.g. 12 for 12%)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Decimal,

    /// Investment horizon, in --unit
    #[arg(long, allow_hyphen_values = true)]
    pub time: Decimal,

    /// Unit of --time
    #[arg(long, value_enum, default_value = "years")]
    pub unit: UnitArg,
}

impl InvestmentArgs {
    pub fn to_input(&self) -> InvestmentInput {
        InvestmentInput::new(self.principal, self.rate, self.time, self.unit.into())
    }
}

/// Arguments for lump-sum growth
#[derive(Args)]
pub struct GrowthArgs {
    #[command(flatten)]
    pub investment: InvestmentArgs,

    /// Product name the figures are reported under
    #[arg(long, value_enum, default_value = "lumpsum")]
    pub plan: GrowthPlanArg,
}

/// Arguments for the year-wise SIP curve
#[derive(Args)]
pub struct TrajectoryArgs {
    /// Monthly contribution
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Decimal,

    /// Annual rate of return in percent
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Decimal,

    /// Number of years to chart (points for years 0 through N)
    #[arg(long)]
    pub years: u32,
}

#[derive(Debug, Serialize)]
struct PlanOutput {
    #[serde(flatten)]
    outcome: PlanOutcome,
    total_contributed: Decimal,
}

fn methodology(plan: Plan) -> &'static str {
    match plan {
        Plan::SimpleInterest => "Simple interest (ROI = P * r * t / 100, t in years)",
        Plan::CompoundInterest => "Annual compounding (A = P * (1 + r/100)^t, t in years)",
        Plan::Nps | Plan::Lumpsum | Plan::Investment => {
            "Lump-sum growth (A = P * (1 + r/100)^t, months converted to years)"
        }
        Plan::Sip => "Monthly SIP (contribute, then grow at r/12 per month)",
    }
}

fn run_plan(plan: Plan, args: &InvestmentArgs, dp: u32) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let input = args.to_input();
    validate_input(&input)?;

    let result = evaluate_plan(plan, &input);
    let warnings = plan_warnings(plan, &input, &result);
    let rounded = result.rounded(dp);
    let output = PlanOutput {
        outcome: PlanOutcome::new(plan, rounded),
        total_contributed: rounded.total_contributed(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(serde_json::to_value(with_metadata(
        methodology(plan),
        &input,
        warnings,
        elapsed,
        output,
    ))?)
}

pub fn run_simple_interest(args: InvestmentArgs, dp: u32) -> Result<Value, Box<dyn std::error::Error>> {
    run_plan(Plan::SimpleInterest, &args, dp)
}

pub fn run_compound_interest(args: InvestmentArgs, dp: u32) -> Result<Value, Box<dyn std::error::Error>> {
    run_plan(Plan::CompoundInterest, &args, dp)
}

pub fn run_growth(args: GrowthArgs, dp: u32) -> Result<Value, Box<dyn std::error::Error>> {
    run_plan(args.plan.into(), &args.investment, dp)
}

pub fn run_sip(args: InvestmentArgs, dp: u32) -> Result<Value, Box<dyn std::error::Error>> {
    run_plan(Plan::Sip, &args, dp)
}

pub fn run_trajectory(args: TrajectoryArgs, dp: u32) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let input = InvestmentInput::new(
        args.principal,
        args.rate,
        Decimal::from(args.years),
        TimeUnit::Years,
    );
    validate_input(&input)?;

    let points: Vec<TrajectoryPoint> =
        calculator::yearly_trajectory(args.principal, args.rate, args.years)
            .map(|p| p.rounded(dp))
            .collect();

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(serde_json::to_value(with_metadata(
        "Year-wise SIP amount (monthly SIP evaluated at each whole year)",
        &input,
        Vec::new(),
        elapsed,
        points,
    ))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn args(principal: Decimal, rate: Decimal, time: Decimal, unit: UnitArg) -> InvestmentArgs {
        InvestmentArgs {
            principal,
            rate,
            time,
            unit,
        }
    }

    #[test]
    fn test_simple_interest_envelope() {
        let value =
            run_simple_interest(args(dec!(1000), dec!(10), dec!(2), UnitArg::Years), 2).unwrap();
        assert_eq!(value["result"]["plan"], "simple-interest");
        assert_eq!(value["result"]["return_on_investment"], "200.00");
        assert_eq!(value["result"]["total_contributed"], "1000.00");
        assert_eq!(value["assumptions"]["time_unit"], "Years");
    }

    #[test]
    fn test_negative_principal_rejected() {
        let err = run_sip(args(dec!(-5), dec!(10), dec!(2), UnitArg::Years), 2).unwrap_err();
        assert!(err.to_string().contains("principal"));
    }

    #[test]
    fn test_growth_plan_label() {
        let growth = GrowthArgs {
            investment: args(dec!(1000), dec!(12), dec!(24), UnitArg::Months),
            plan: GrowthPlanArg::Nps,
        };
        let value = run_growth(growth, 2).unwrap();
        assert_eq!(value["result"]["label"], "NPS");
        assert_eq!(value["result"]["final_amount"], "1254.40");
    }

    #[test]
    fn test_sip_months_carries_warning() {
        let value = run_sip(args(dec!(1000), dec!(12), dec!(12), UnitArg::Months), 2).unwrap();
        let warnings = value["warnings"].as_array().unwrap();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_trajectory_points() {
        let value = run_trajectory(
            TrajectoryArgs {
                principal: dec!(100),
                rate: dec!(0),
                years: 3,
            },
            2,
        )
        .unwrap();
        let points = value["result"].as_array().unwrap();
        assert_eq!(points.len(), 4);
        assert_eq!(points[3]["amount"], "3600.00");
    }
}
