pub mod builder;
pub mod plan;
pub mod validation;

pub use builder::{build_report, PlanOutcome, RoiReport};
pub use plan::{evaluate_plan, plan_warnings, saturation_warning, Plan};
pub use validation::{validate_input, MAX_HORIZON_YEARS};
