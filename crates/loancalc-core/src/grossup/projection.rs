//! Grossup evaluated at several reference days.
//!
//! When the taxable event happens `r` days after the capitalization start,
//! the charges are computed over the shortened return days `n_i - r`. A
//! projection re-solves the grossup for each reference day independently.

use serde::Serialize;

use crate::config::CalculatorConfig;
use crate::error::LoanResult;
use crate::grossup::functions::{AmortizationFunction, GrossupFunctions, PrincipalCharge, ReducedTax};
use crate::grossup::{approximate_grossup, Grossup};
use crate::irr::IrrResult;
use crate::types::{validate_daily_rate, validate_principal, ReturnDays};

/// Grossup and effective rate at one reference day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedGrossup {
    /// Day of the taxable event, relative to the capitalization start.
    pub reference_day: u32,
    /// Grossup solved over the shifted return days.
    pub grossup: Grossup,
    /// Effective daily cost of the grossed-up loan.
    pub effective_rate: IrrResult,
}

/// Re-solves a grossup for a list of reference days.
///
/// # Example
///
/// ```rust
/// use loancalc_core::grossup::{CappedDailyTax, GrossupFunctions, GrossupProjection, ProportionalCharge};
/// use loancalc_core::schedule::AmortizationScheduleType;
/// use loancalc_core::types::ReturnDays;
///
/// let days = ReturnDays::new(vec![30, 60, 90]).unwrap();
/// let projection = GrossupProjection::new(1000.0, 0.001, days).unwrap();
/// let functions = GrossupFunctions::new(
///     AmortizationScheduleType::ProgressivePrice,
///     CappedDailyTax::new(0.000082, 0.015),
///     ProportionalCharge::new(0.0038),
///     ProportionalCharge::new(0.0),
/// );
///
/// let results = projection.project(&functions, &[0, 15, 45]);
/// assert!(results[0].is_ok());
/// assert!(results[1].is_ok());
/// assert!(results[2].is_err()); // after the first payment
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GrossupProjection {
    net_principal: f64,
    daily_rate: f64,
    return_days: ReturnDays,
    config: CalculatorConfig,
}

impl GrossupProjection {
    /// Creates a projection with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LoanError::InvalidInput`] for a non-positive net
    /// principal or a negative daily rate.
    pub fn new(net_principal: f64, daily_rate: f64, return_days: ReturnDays) -> LoanResult<Self> {
        validate_principal("net_principal", net_principal)?;
        validate_daily_rate(daily_rate)?;

        Ok(Self {
            net_principal,
            daily_rate,
            return_days,
            config: CalculatorConfig::default(),
        })
    }

    /// Replaces the configuration.
    ///
    /// The schedule type is used for the effective rate; the grossup itself
    /// follows the amortization function it is given.
    #[must_use]
    pub fn with_config(mut self, config: CalculatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Solves the grossup at a single reference day.
    ///
    /// # Errors
    ///
    /// Fails when `reference_day` falls after the first return day, or with
    /// any grossup or IRR error.
    pub fn project_one<A, R, C, S>(
        &self,
        functions: &GrossupFunctions<A, R, C, S>,
        reference_day: u32,
    ) -> LoanResult<ProjectedGrossup>
    where
        A: AmortizationFunction,
        R: ReducedTax,
        C: PrincipalCharge,
        S: PrincipalCharge,
    {
        let shifted = self.return_days.relative_to(reference_day)?;
        let grossup = approximate_grossup(
            self.net_principal,
            self.daily_rate,
            &shifted,
            functions,
            &self.config.grossup,
        )?;
        let effective_rate = grossup.effective_rate(self.config.schedule_type, &self.config.irr)?;

        Ok(ProjectedGrossup {
            reference_day,
            grossup,
            effective_rate,
        })
    }

    /// Solves the grossup at every reference day, in input order.
    ///
    /// Entries fail independently.
    #[cfg(not(feature = "parallel"))]
    pub fn project<A, R, C, S>(
        &self,
        functions: &GrossupFunctions<A, R, C, S>,
        reference_days: &[u32],
    ) -> Vec<LoanResult<ProjectedGrossup>>
    where
        A: AmortizationFunction,
        R: ReducedTax,
        C: PrincipalCharge,
        S: PrincipalCharge,
    {
        reference_days
            .iter()
            .map(|&day| self.logged(day, self.project_one(functions, day)))
            .collect()
    }

    /// Solves the grossup at every reference day in parallel, in input order.
    ///
    /// Entries fail independently.
    #[cfg(feature = "parallel")]
    pub fn project<A, R, C, S>(
        &self,
        functions: &GrossupFunctions<A, R, C, S>,
        reference_days: &[u32],
    ) -> Vec<LoanResult<ProjectedGrossup>>
    where
        A: AmortizationFunction + Sync,
        R: ReducedTax + Sync,
        C: PrincipalCharge + Sync,
        S: PrincipalCharge + Sync,
    {
        use rayon::prelude::*;

        reference_days
            .par_iter()
            .map(|&day| self.logged(day, self.project_one(functions, day)))
            .collect()
    }

    fn logged(
        &self,
        reference_day: u32,
        result: LoanResult<ProjectedGrossup>,
    ) -> LoanResult<ProjectedGrossup> {
        if let Err(err) = &result {
            log::warn!(
                "grossup projection of {} at reference day {reference_day} failed: {err}",
                self.net_principal
            );
        }
        result
    }
}
