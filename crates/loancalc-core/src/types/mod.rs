//! Domain types and input validation.

mod return_days;

pub use return_days::ReturnDays;

use crate::error::{LoanError, LoanResult};

/// Checks that a principal is finite and strictly positive.
pub fn validate_principal(field: &str, principal: f64) -> LoanResult<()> {
    if principal.is_finite() && principal > 0.0 {
        Ok(())
    } else {
        Err(LoanError::invalid_input(
            field,
            format!("must be a positive finite amount, got {principal}"),
        ))
    }
}

/// Checks that a daily interest rate is finite and non-negative.
pub fn validate_daily_rate(daily_rate: f64) -> LoanResult<()> {
    if daily_rate.is_finite() && daily_rate >= 0.0 {
        Ok(())
    } else {
        Err(LoanError::invalid_input(
            "daily_rate",
            format!("must be a non-negative finite rate, got {daily_rate}"),
        ))
    }
}
