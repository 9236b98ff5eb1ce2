//! Price-type (equal installment) schedules.
//!
//! Every installment equals the PMT of the loan. The two variants differ only
//! in how each installment is split between amortization and interest:
//!
//! - [`ProgressivePrice`] (French system): amortizations grow over time.
//! - [`RegressivePrice`]: amortizations are the present value of each
//!   installment, so they shrink over time.
//!
//! If `P` is the PMT, `s` the principal, `d` the daily rate and `n_i` the
//! return days, both variants share the balance
//!
//! ```text
//! b_i = s (1+d)^{n_i} (1 - Σ_{j≤i} 1/(1+d)^{n_j} / Σ_{j≤k} 1/(1+d)^{n_j})
//! ```
//!
//! which is the closed form of `b_i = b_{i-1} (1+d)^{n_i - n_{i-1}} - P`.

use crate::error::LoanResult;
use crate::pmt::{discount, growth, pmt};
use crate::schedule::ScheduleRule;
use crate::types::ReturnDays;

/// Inputs shared by the price-type rules.
#[derive(Debug, Clone, Copy)]
struct PriceTerms<'a> {
    principal: f64,
    daily_rate: f64,
    return_days: &'a [u32],
    pmt: f64,
}

impl<'a> PriceTerms<'a> {
    fn new(principal: f64, daily_rate: f64, return_days: &'a ReturnDays) -> LoanResult<Self> {
        let return_days = return_days.as_slice();
        Ok(Self {
            principal,
            daily_rate,
            return_days,
            pmt: pmt(principal, daily_rate, return_days)?,
        })
    }

    fn balance(&self) -> Vec<f64> {
        let discounts: Vec<f64> = self
            .return_days
            .iter()
            .map(|&n| discount(self.daily_rate, n))
            .collect();

        let mut balance = Vec::with_capacity(self.return_days.len() + 1);
        balance.push(self.principal);

        let mut accumulated = Vec::with_capacity(discounts.len());
        let mut running = 0.0;
        for v in &discounts {
            running += v;
            accumulated.push(running);
        }

        // same summation order, so the last balance is exactly zero
        let total = running;
        for (&n, partial) in self.return_days.iter().zip(accumulated) {
            balance.push(self.principal * growth(self.daily_rate, n) * (1.0 - partial / total));
        }

        balance
    }

    fn due_payments(&self) -> Vec<f64> {
        vec![self.pmt; self.return_days.len()]
    }

    fn amortization_for(&self, n: u32) -> f64 {
        self.pmt * discount(self.daily_rate, n)
    }

    fn interest_for(&self, n: u32) -> f64 {
        self.pmt * (1.0 - discount(self.daily_rate, n))
    }
}

/// Progressive Price schedule (French amortization system).
///
/// Amortizations are taken from the return days in reverse order:
///
/// ```text
/// A_i = P / (1+d)^{n_{k-i+1}}
/// J_i = P (1 - 1/(1+d)^{n_{k-i+1}})
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProgressivePrice<'a> {
    terms: PriceTerms<'a>,
}

impl<'a> ProgressivePrice<'a> {
    /// Prepares the rule, computing the loan's PMT.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LoanError::InvalidInput`] when the PMT is undefined
    /// for the principal or rate.
    pub fn new(principal: f64, daily_rate: f64, return_days: &'a ReturnDays) -> LoanResult<Self> {
        Ok(Self {
            terms: PriceTerms::new(principal, daily_rate, return_days)?,
        })
    }
}

impl ScheduleRule for ProgressivePrice<'_> {
    fn balance(&self) -> Vec<f64> {
        self.terms.balance()
    }

    fn amortizations(&self) -> Vec<f64> {
        self.terms
            .return_days
            .iter()
            .rev()
            .map(|&n| self.terms.amortization_for(n))
            .collect()
    }

    fn interest_payments(&self) -> Vec<f64> {
        self.terms
            .return_days
            .iter()
            .rev()
            .map(|&n| self.terms.interest_for(n))
            .collect()
    }

    fn due_payments(&self) -> Vec<f64> {
        self.terms.due_payments()
    }

    fn installment(&self) -> Option<f64> {
        Some(self.terms.pmt)
    }
}

/// Regressive Price schedule.
///
/// Each amortization is the present value of its installment:
///
/// ```text
/// A_i = P / (1+d)^{n_i}
/// J_i = P (1 - 1/(1+d)^{n_i})
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RegressivePrice<'a> {
    terms: PriceTerms<'a>,
}

impl<'a> RegressivePrice<'a> {
    /// Prepares the rule, computing the loan's PMT.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LoanError::InvalidInput`] when the PMT is undefined
    /// for the principal or rate.
    pub fn new(principal: f64, daily_rate: f64, return_days: &'a ReturnDays) -> LoanResult<Self> {
        Ok(Self {
            terms: PriceTerms::new(principal, daily_rate, return_days)?,
        })
    }
}

impl ScheduleRule for RegressivePrice<'_> {
    fn balance(&self) -> Vec<f64> {
        self.terms.balance()
    }

    fn amortizations(&self) -> Vec<f64> {
        self.terms
            .return_days
            .iter()
            .map(|&n| self.terms.amortization_for(n))
            .collect()
    }

    fn interest_payments(&self) -> Vec<f64> {
        self.terms
            .return_days
            .iter()
            .map(|&n| self.terms.interest_for(n))
            .collect()
    }

    fn due_payments(&self) -> Vec<f64> {
        self.terms.due_payments()
    }

    fn installment(&self) -> Option<f64> {
        Some(self.terms.pmt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn days(values: &[u32]) -> ReturnDays {
        ReturnDays::try_from(values).unwrap()
    }

    #[test]
    fn test_progressive_amortizations_increase() {
        let days = days(&[30, 60, 90, 120]);
        let rule = ProgressivePrice::new(1000.0, 0.001, &days).unwrap();
        let amortizations = rule.amortizations();

        assert!(amortizations.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_regressive_amortizations_decrease() {
        let days = days(&[30, 60, 90, 120]);
        let rule = RegressivePrice::new(1000.0, 0.001, &days).unwrap();
        let amortizations = rule.amortizations();

        assert!(amortizations.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_variants_share_balance_and_payments() {
        let days = days(&[15, 45, 75]);
        let progressive = ProgressivePrice::new(500.0, 0.002, &days).unwrap();
        let regressive = RegressivePrice::new(500.0, 0.002, &days).unwrap();

        assert_eq!(progressive.balance(), regressive.balance());
        assert_eq!(progressive.due_payments(), regressive.due_payments());
    }

    #[test]
    fn test_single_payment_is_bullet() {
        let days = days(&[30]);
        let rule = ProgressivePrice::new(100.0, 0.01, &days).unwrap();

        let expected = 100.0 * 1.01_f64.powi(30);
        assert_relative_eq!(rule.due_payments()[0], expected, epsilon = 1e-9);
        assert_relative_eq!(rule.amortizations()[0], 100.0, epsilon = 1e-9);
        assert_eq!(rule.balance(), vec![100.0, 0.0]);
    }

    #[test]
    fn test_zero_rate_has_no_interest() {
        let days = days(&[10, 20, 30, 40]);
        let rule = RegressivePrice::new(400.0, 0.0, &days).unwrap();

        assert!(rule.interest_payments().iter().all(|&j| j == 0.0));
        assert_eq!(rule.amortizations(), vec![100.0; 4]);
        assert_eq!(rule.balance(), vec![400.0, 300.0, 200.0, 100.0, 0.0]);
    }
}
