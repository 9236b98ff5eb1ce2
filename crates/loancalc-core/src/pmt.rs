//! Constant installment value for equal-payment schedules.

use crate::error::{LoanError, LoanResult};
use crate::types::{validate_daily_rate, validate_principal};

/// Growth factor `(1 + d)^n` over `n` days.
pub(crate) fn growth(daily_rate: f64, days: u32) -> f64 {
    (1.0 + daily_rate).powf(f64::from(days))
}

/// Discount factor `1 / (1 + d)^n` over `n` days.
pub(crate) fn discount(daily_rate: f64, days: u32) -> f64 {
    1.0 / growth(daily_rate, days)
}

/// Calculates the PMT (constant payment value).
///
/// If `s` is the principal, `d` the daily interest rate and `n_1, ..., n_k`
/// the return days, then
///
/// ```text
/// PMT(s, d, (n_1, ..., n_k)) = s / Σ_j 1/(1+d)^{n_j}
/// ```
///
/// Repeated offsets are accepted here; schedules additionally require them
/// to be strictly increasing.
///
/// # Errors
///
/// Returns [`LoanError::InvalidInput`] for a non-positive principal, a
/// negative rate or an empty list of return days.
///
/// # Example
///
/// ```rust
/// use loancalc_core::pmt;
///
/// let value = pmt(1.0, 1.0, &[1, 1]).unwrap();
/// assert!((value - 1.0).abs() < 1e-12);
/// ```
pub fn pmt(principal: f64, daily_rate: f64, return_days: &[u32]) -> LoanResult<f64> {
    validate_principal("principal", principal)?;
    validate_daily_rate(daily_rate)?;
    if return_days.is_empty() {
        return Err(LoanError::invalid_input(
            "return_days",
            "at least one return day is required",
        ));
    }

    let present_value: f64 = return_days.iter().map(|&n| discount(daily_rate, n)).sum();

    Ok(principal / present_value)
}
