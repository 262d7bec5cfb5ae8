use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::RoiCalcError;
use crate::types::InvestmentInput;
use crate::RoiCalcResult;

/// Longest horizon accepted for one calculation (12 000 monthly periods).
pub const MAX_HORIZON_YEARS: Decimal = dec!(1000);

fn non_negative(field: &str, value: Decimal) -> RoiCalcResult<()> {
    if value < Decimal::ZERO {
        return Err(RoiCalcError::InvalidInput {
            field: field.into(),
            reason: format!("{field} must be >= 0 (got {value})"),
        });
    }
    Ok(())
}

/// Reject inputs outside the calculator's domain before any plan runs.
pub fn validate_input(input: &InvestmentInput) -> RoiCalcResult<()> {
    non_negative("principal", input.principal)?;
    non_negative("rate_percent", input.rate_percent)?;
    non_negative("time", input.time)?;

    if input.time_in_years() > MAX_HORIZON_YEARS {
        return Err(RoiCalcError::InvalidInput {
            field: "time".into(),
            reason: format!(
                "Horizon of {} {} exceeds the {MAX_HORIZON_YEARS}-year limit",
                input.time, input.time_unit
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimeUnit;

    fn input(principal: Decimal, rate: Decimal, time: Decimal) -> InvestmentInput {
        InvestmentInput::new(principal, rate, time, TimeUnit::Years)
    }

    #[test]
    fn test_accepts_zeroes() {
        assert!(validate_input(&input(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)).is_ok());
    }

    #[test]
    fn test_rejects_negative_principal() {
        let err = validate_input(&input(dec!(-1), dec!(5), dec!(1))).unwrap_err();
        match err {
            RoiCalcError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_negative_rate_and_time() {
        assert!(validate_input(&input(dec!(1), dec!(-0.5), dec!(1))).is_err());
        assert!(validate_input(&input(dec!(1), dec!(5), dec!(-2))).is_err());
    }

    #[test]
    fn test_horizon_limit_respects_unit() {
        assert!(validate_input(&input(dec!(1), dec!(5), dec!(1000))).is_ok());
        assert!(validate_input(&input(dec!(1), dec!(5), dec!(1001))).is_err());
        let months = InvestmentInput::new(dec!(1), dec!(5), dec!(12000), TimeUnit::Months);
        assert!(validate_input(&months).is_ok());
        let months = InvestmentInput::new(dec!(1), dec!(5), dec!(12001), TimeUnit::Months);
        assert!(validate_input(&months).is_err());
    }
}
