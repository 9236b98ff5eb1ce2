//! Grossup of a loan principal.
//!
//! Given a net principal the borrower must receive, the grossup finds the
//! gross principal `S` such that
//!
//! ```text
//! S - reduced_tax(amortizations(S, d, n), n) - complementary_tax(S) - service_fee(S) = net
//! ```
//!
//! The charges are pluggable (see [`functions`]); the equation is solved
//! numerically, seeded at the net principal.
//!
//! # Example
//!
//! ```rust
//! use loancalc_core::config::GrossupConfig;
//! use loancalc_core::grossup::{approximate_grossup, CappedDailyTax, GrossupFunctions, ProportionalCharge};
//! use loancalc_core::schedule::AmortizationScheduleType;
//! use loancalc_core::types::ReturnDays;
//!
//! let functions = GrossupFunctions::new(
//!     AmortizationScheduleType::ProgressivePrice,
//!     CappedDailyTax::new(0.000082, 0.015),
//!     ProportionalCharge::new(0.0038),
//!     ProportionalCharge::new(0.01),
//! );
//! let days = ReturnDays::new(vec![30, 60, 90]).unwrap();
//!
//! let grossup = approximate_grossup(1000.0, 0.001, &days, &functions, &GrossupConfig::default()).unwrap();
//! assert!(grossup.gross_principal() > 1000.0);
//! ```

pub mod functions;
mod projection;
mod solver;

pub use functions::{
    AmortizationFunction, CappedDailyTax, GrossupFunctions, PrincipalCharge, ProportionalCharge,
    ReducedTax,
};
pub use projection::{GrossupProjection, ProjectedGrossup};
pub use solver::approximate_grossup;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::IrrConfig;
use crate::error::{LoanError, LoanResult};
use crate::irr::{irr, IrrResult};
use crate::schedule::{AmortizationSchedule, AmortizationScheduleType};
use crate::types::ReturnDays;

/// Root finder used to solve the grossup equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrossupMethod {
    /// Broyden's quasi-Newton method.
    #[default]
    Broyden,
    /// Scalar secant method.
    Secant,
}

impl GrossupMethod {
    /// Canonical kebab-case name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            GrossupMethod::Broyden => "broyden",
            GrossupMethod::Secant => "secant",
        }
    }
}

impl fmt::Display for GrossupMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for GrossupMethod {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "broyden" => Ok(GrossupMethod::Broyden),
            "secant" => Ok(GrossupMethod::Secant),
            _ => Err(LoanError::unknown_variant("grossup method", s)),
        }
    }
}

/// A solved grossup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grossup {
    net_principal: f64,
    gross_principal: f64,
    daily_rate: f64,
    return_days: ReturnDays,
    iterations: u32,
    residual: f64,
}

impl Grossup {
    /// Principal the borrower receives.
    #[must_use]
    pub fn net_principal(&self) -> f64 {
        self.net_principal
    }

    /// Principal the loan is contracted for.
    #[must_use]
    pub fn gross_principal(&self) -> f64 {
        self.gross_principal
    }

    /// Total charges, `gross - net`.
    #[must_use]
    pub fn charges(&self) -> f64 {
        self.gross_principal - self.net_principal
    }

    /// Daily interest rate of the loan.
    #[must_use]
    pub fn daily_rate(&self) -> f64 {
        self.daily_rate
    }

    /// Return days the grossup was solved for.
    #[must_use]
    pub fn return_days(&self) -> &ReturnDays {
        &self.return_days
    }

    /// Root-finder iterations.
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Absolute residual at the solution.
    #[must_use]
    pub fn residual(&self) -> f64 {
        self.residual
    }

    /// Schedule of the gross principal.
    ///
    /// # Errors
    ///
    /// Propagates schedule validation failures.
    pub fn schedule(&self, schedule_type: AmortizationScheduleType) -> LoanResult<AmortizationSchedule> {
        AmortizationSchedule::new(
            schedule_type,
            self.gross_principal,
            self.daily_rate,
            self.return_days.clone(),
        )
    }

    /// Effective daily cost of the loan to the borrower.
    ///
    /// The IRR of the net principal against the due payments of the gross
    /// schedule. Newton-Raphson starts at the loan's daily rate unless
    /// `config` sets an initial guess.
    ///
    /// # Errors
    ///
    /// Propagates schedule and IRR failures.
    pub fn effective_rate(
        &self,
        schedule_type: AmortizationScheduleType,
        config: &IrrConfig,
    ) -> LoanResult<IrrResult> {
        let schedule = self.schedule(schedule_type)?;
        let config = IrrConfig {
            initial_guess: config.initial_guess.or(Some(self.daily_rate)),
            ..*config
        };

        irr(
            self.net_principal,
            schedule.due_payments(),
            self.return_days.as_slice(),
            &config,
        )
    }
}
