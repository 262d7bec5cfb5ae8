use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use roi_calculator_core::report::{build_report, Plan, RoiReport};
use roi_calculator_core::types::{ComputationOutput, InvestmentInput, TimeUnit};

use crate::commands::calculator::UnitArg;
use crate::input;

/// Arguments for the full ROI report
#[derive(Args, Default)]
pub struct ReportArgs {
    /// Path to a JSON or YAML input file (principal, rate_percent, time, time_unit)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount invested (invested every month for SIP)
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Annual rate of return in percent
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Investment horizon, in --unit
    #[arg(long, allow_hyphen_values = true)]
    pub time: Option<Decimal>,

    /// Unit of --time
    #[arg(long, value_enum)]
    pub unit: Option<UnitArg>,
}

#[derive(Debug, Serialize)]
struct ReportOutput {
    #[serde(flatten)]
    report: RoiReport,
    best_plan: Option<Plan>,
}

impl ReportArgs {
    fn has_all_flags(&self) -> bool {
        self.principal.is_some() && self.rate.is_some() && self.time.is_some()
    }

    /// Flags given on the command line win over the document's values.
    fn apply_overrides(&self, mut base: InvestmentInput) -> InvestmentInput {
        if let Some(p) = self.principal {
            base.principal = p;
        }
        if let Some(r) = self.rate {
            base.rate_percent = r;
        }
        if let Some(t) = self.time {
            base.time = t;
        }
        if let Some(u) = self.unit {
            base.time_unit = u.into();
        }
        base
    }
}

fn resolve_input(args: &ReportArgs) -> Result<InvestmentInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        let doc: InvestmentInput = input::file::read_document(path)?;
        return Ok(args.apply_overrides(doc));
    }
    if !args.has_all_flags() {
        if let Some(data) = input::stdin::read_stdin()? {
            let doc: InvestmentInput = serde_json::from_value(data)?;
            return Ok(args.apply_overrides(doc));
        }
    }
    match (args.principal, args.rate, args.time) {
        (Some(principal), Some(rate), Some(time)) => Ok(InvestmentInput::new(
            principal,
            rate,
            time,
            args.unit.map(TimeUnit::from).unwrap_or_default(),
        )),
        _ => Err("--principal, --rate and --time (or --input <file> / stdin) required for the ROI report".into()),
    }
}

fn render(out: ComputationOutput<RoiReport>, dp: u32) -> Result<Value, Box<dyn std::error::Error>> {
    let best_plan = out.result.best_plan().map(|p| p.plan);
    let output = ComputationOutput {
        result: ReportOutput {
            report: out.result.rounded(dp),
            best_plan,
        },
        methodology: out.methodology,
        assumptions: out.assumptions,
        warnings: out.warnings,
        metadata: out.metadata,
    };
    Ok(serde_json::to_value(output)?)
}

pub fn run_report(args: ReportArgs, dp: u32) -> Result<Value, Box<dyn std::error::Error>> {
    let investment = resolve_input(&args)?;
    let out = build_report(&investment)?;
    render(out, dp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flag_args() -> ReportArgs {
        ReportArgs {
            principal: Some(dec!(1000)),
            rate: Some(dec!(10)),
            time: Some(dec!(2)),
            ..Default::default()
        }
    }

    #[test]
    fn test_report_from_flags() {
        let value = run_report(flag_args(), 2).unwrap();
        let result = &value["result"];
        assert_eq!(result["plans"].as_array().unwrap().len(), 5);
        assert_eq!(result["plans"][1]["return_on_investment"], "210.00");
        assert_eq!(result["best_plan"], "compound-interest");
        assert_eq!(result["trajectory"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_overrides_replace_document_values() {
        let doc = InvestmentInput::new(dec!(1), dec!(2), dec!(3), TimeUnit::Years);
        let args = ReportArgs {
            rate: Some(dec!(7)),
            unit: Some(UnitArg::Months),
            ..Default::default()
        };
        let merged = args.apply_overrides(doc);
        assert_eq!(merged.principal, dec!(1));
        assert_eq!(merged.rate_percent, dec!(7));
        assert_eq!(merged.time, dec!(3));
        assert_eq!(merged.time_unit, TimeUnit::Months);
    }

    #[test]
    fn test_invalid_report_input() {
        let mut args = flag_args();
        args.time = Some(dec!(-1));
        let err = run_report(args, 2).unwrap_err();
        assert!(err.to_string().contains("time"));
    }
}
