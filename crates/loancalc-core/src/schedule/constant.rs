//! Constant amortization (SAC) schedule.

use crate::pmt::growth;
use crate::schedule::ScheduleRule;
use crate::types::ReturnDays;

/// Constant amortization schedule.
///
/// The principal is repaid in `k` equal parts and interest accrues on the
/// outstanding balance between consecutive return days:
///
/// ```text
/// A_i = s / k
/// b_i = s (1 - i/k)
/// J_i = b_{i-1} ((1+d)^{n_i - n_{i-1}} - 1),   n_0 = 0
/// P_i = A_i + J_i
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConstantAmortization<'a> {
    principal: f64,
    daily_rate: f64,
    return_days: &'a [u32],
}

impl<'a> ConstantAmortization<'a> {
    /// Prepares the rule over already validated return days.
    #[must_use]
    pub fn new(principal: f64, daily_rate: f64, return_days: &'a ReturnDays) -> Self {
        Self {
            principal,
            daily_rate,
            return_days: return_days.as_slice(),
        }
    }

    fn installments(&self) -> f64 {
        self.return_days.len() as f64
    }
}

impl ScheduleRule for ConstantAmortization<'_> {
    fn balance(&self) -> Vec<f64> {
        let k = self.installments();
        (0..=self.return_days.len())
            .map(|i| self.principal * (1.0 - i as f64 / k))
            .collect()
    }

    fn amortizations(&self) -> Vec<f64> {
        vec![self.principal / self.installments(); self.return_days.len()]
    }

    fn interest_payments(&self) -> Vec<f64> {
        let balance = self.balance();
        let mut previous_day = 0;

        self.return_days
            .iter()
            .zip(balance)
            .map(|(&n, outstanding)| {
                let elapsed = n - previous_day;
                previous_day = n;
                outstanding * (growth(self.daily_rate, elapsed) - 1.0)
            })
            .collect()
    }

    fn due_payments(&self) -> Vec<f64> {
        self.amortizations()
            .into_iter()
            .zip(self.interest_payments())
            .map(|(a, j)| a + j)
            .collect()
    }

    fn installment(&self) -> Option<f64> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoanError;
    use approx::assert_relative_eq;

    fn days(values: &[u32]) -> ReturnDays {
        ReturnDays::try_from(values).unwrap()
    }

    #[test]
    fn test_interest_follows_gaps_between_days() {
        let days = days(&[10, 40]);
        let rule = ConstantAmortization::new(1000.0, 0.001, &days);
        let interest = rule.interest_payments();

        assert_relative_eq!(interest[0], 1000.0 * (1.001_f64.powi(10) - 1.0), epsilon = 1e-9);
        assert_relative_eq!(interest[1], 500.0 * (1.001_f64.powi(30) - 1.0), epsilon = 1e-9);
    }

    #[test]
    fn test_single_payment() {
        let days = days(&[30]);
        let rule = ConstantAmortization::new(200.0, 0.01, &days);

        assert_eq!(rule.balance(), vec![200.0, 0.0]);
        assert_eq!(rule.amortizations(), vec![200.0]);
        assert_relative_eq!(
            rule.due_payments()[0],
            200.0 * 1.01_f64.powi(30),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_zero_rate() {
        let days = days(&[1, 2, 3, 4]);
        let rule = ConstantAmortization::new(100.0, 0.0, &days);

        assert_eq!(rule.interest_payments(), vec![0.0; 4]);
        assert_eq!(rule.due_payments(), vec![25.0; 4]);
        assert!(rule.installment().is_none());
    }

    #[test]
    fn test_decreasing_days_never_reach_the_rule() {
        // elapsed days are computed as n_i - n_{i-1}
        let err = ReturnDays::try_from(&[40_u32, 10][..]).unwrap_err();
        assert!(matches!(err, LoanError::InvalidInput { .. }));

        let days = days(&[10, 40]);
        let rule = ConstantAmortization::new(100.0, 0.01, &days);
        assert!(rule.interest_payments().iter().all(|j| *j > 0.0));
    }
}
