//! Pluggable amortization, tax and fee strategies used by the grossup.
//!
//! Every strategy is a trait with a blanket implementation for closures of
//! the matching shape, so callers can pass either a named strategy or an
//! ad-hoc function. Aliquots live in the strategy value itself.

use crate::error::LoanResult;
use crate::schedule::AmortizationScheduleType;

/// Produces the amortizations of a loan of the given principal.
pub trait AmortizationFunction {
    /// Amortizations for `principal`, `daily_rate` and `return_days`.
    ///
    /// # Errors
    ///
    /// Propagates the schedule's validation failures.
    fn amortizations(
        &self,
        principal: f64,
        daily_rate: f64,
        return_days: &[u32],
    ) -> LoanResult<Vec<f64>>;
}

impl AmortizationFunction for AmortizationScheduleType {
    fn amortizations(
        &self,
        principal: f64,
        daily_rate: f64,
        return_days: &[u32],
    ) -> LoanResult<Vec<f64>> {
        let schedule = self.build(principal, daily_rate, return_days)?;
        Ok(schedule.amortizations().to_vec())
    }
}

impl<F> AmortizationFunction for F
where
    F: Fn(f64, f64, &[u32]) -> Vec<f64>,
{
    fn amortizations(
        &self,
        principal: f64,
        daily_rate: f64,
        return_days: &[u32],
    ) -> LoanResult<Vec<f64>> {
        Ok(self(principal, daily_rate, return_days))
    }
}

/// Tax levied on the amortization schedule.
pub trait ReducedTax {
    /// Tax due for the given amortizations and return days.
    fn reduced_tax(&self, amortizations: &[f64], return_days: &[u32]) -> f64;
}

impl<F> ReducedTax for F
where
    F: Fn(&[f64], &[u32]) -> f64,
{
    fn reduced_tax(&self, amortizations: &[f64], return_days: &[u32]) -> f64 {
        self(amortizations, return_days)
    }
}

/// Charge computed from the gross principal alone.
///
/// Used for both the complementary tax and the service fee.
pub trait PrincipalCharge {
    /// Charge due on `principal`.
    fn charge(&self, principal: f64) -> f64;
}

impl<F> PrincipalCharge for F
where
    F: Fn(f64) -> f64,
{
    fn charge(&self, principal: f64) -> f64 {
        self(principal)
    }
}

/// A flat proportion of the principal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProportionalCharge {
    /// Proportion charged.
    pub aliquot: f64,
}

impl ProportionalCharge {
    /// Creates a proportional charge.
    #[must_use]
    pub const fn new(aliquot: f64) -> Self {
        Self { aliquot }
    }
}

impl PrincipalCharge for ProportionalCharge {
    fn charge(&self, principal: f64) -> f64 {
        self.aliquot * principal
    }
}

/// Tax accruing daily on each amortization up to a ceiling.
///
/// ```text
/// T = Σ A_i · min(n_i · daily_aliquot, cap)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CappedDailyTax {
    /// Aliquot per day of the loan.
    pub daily_aliquot: f64,
    /// Ceiling on the accumulated aliquot of a single amortization.
    pub cap: f64,
}

impl CappedDailyTax {
    /// Creates a capped daily tax.
    #[must_use]
    pub const fn new(daily_aliquot: f64, cap: f64) -> Self {
        Self { daily_aliquot, cap }
    }

    /// Effective aliquot applied to an amortization paid after `days`.
    #[must_use]
    pub fn aliquot_for(&self, days: u32) -> f64 {
        (f64::from(days) * self.daily_aliquot).min(self.cap)
    }
}

impl ReducedTax for CappedDailyTax {
    fn reduced_tax(&self, amortizations: &[f64], return_days: &[u32]) -> f64 {
        amortizations
            .iter()
            .zip(return_days)
            .map(|(a, &n)| a * self.aliquot_for(n))
            .sum()
    }
}

/// The four strategies a grossup needs, bundled by role.
#[derive(Debug, Clone, Copy)]
pub struct GrossupFunctions<A, R, C, S> {
    /// Splits a candidate principal into amortizations.
    pub amortization: A,
    /// Tax levied on the amortizations.
    pub reduced_tax: R,
    /// Tax levied on the principal.
    pub complementary_tax: C,
    /// Fee levied on the principal.
    pub service_fee: S,
}

impl<A, R, C, S> GrossupFunctions<A, R, C, S>
where
    A: AmortizationFunction,
    R: ReducedTax,
    C: PrincipalCharge,
    S: PrincipalCharge,
{
    /// Bundles the strategies.
    pub fn new(amortization: A, reduced_tax: R, complementary_tax: C, service_fee: S) -> Self {
        Self {
            amortization,
            reduced_tax,
            complementary_tax,
            service_fee,
        }
    }

    /// Principal left after every charge on `principal`.
    ///
    /// # Errors
    ///
    /// Propagates failures of the amortization function.
    pub fn net_of_charges(
        &self,
        principal: f64,
        daily_rate: f64,
        return_days: &[u32],
    ) -> LoanResult<f64> {
        let amortizations = self
            .amortization
            .amortizations(principal, daily_rate, return_days)?;

        Ok(principal
            - self.reduced_tax.reduced_tax(&amortizations, return_days)
            - self.complementary_tax.charge(principal)
            - self.service_fee.charge(principal))
    }
}
