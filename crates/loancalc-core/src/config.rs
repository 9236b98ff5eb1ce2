//! Calculator configuration.
//!
//! Plain serde structs with defaults for every field, so partial documents
//! deserialize. Loading from files is left to the caller; any serde format
//! works.
//!
//! # Example
//!
//! ```rust
//! use loancalc_core::config::{CalculatorConfig, Validate};
//! use loancalc_core::irr::IrrStrategy;
//!
//! let config: CalculatorConfig = serde_json::from_str(
//!     r#"{ "schedule_type": "regressive-price", "irr": { "strategy": "newton-raphson" } }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.irr.strategy, IrrStrategy::NewtonRaphson);
//! assert_eq!(config.irr.upper_bound, 10.0);
//! assert!(config.is_valid());
//! ```

use serde::{Deserialize, Serialize};

use loancalc_math::solvers::SolverConfig;

use crate::error::{LoanError, LoanResult};
use crate::grossup::GrossupMethod;
use crate::irr::IrrStrategy;
use crate::schedule::AmortizationScheduleType;

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Validates the configuration.
    ///
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    ///
    /// Several failures are folded into one [`LoanError::Config`].
    fn validate_or_error(&self) -> LoanResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => {
                let err = errors.remove(0);
                Err(LoanError::Config {
                    field: err.field,
                    message: err.message,
                })
            }
            _ => Err(LoanError::Config {
                field: errors
                    .iter()
                    .map(|e| e.field.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                message: errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            }),
        }
    }
}

fn check_tolerance(errors: &mut Vec<ValidationError>, field: &str, tolerance: f64) {
    if !(tolerance.is_finite() && tolerance > 0.0 && tolerance < 1.0) {
        errors.push(ValidationError::new(
            field,
            format!("Tolerance must be between 0 and 1, got {tolerance}"),
        ));
    }
}

fn check_iterations(errors: &mut Vec<ValidationError>, field: &str, max_iterations: u32) {
    if max_iterations == 0 || max_iterations > 10_000 {
        errors.push(ValidationError::new(
            field,
            "Max iterations must be between 1 and 10000",
        ));
    }
}

/// IRR solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrConfig {
    /// Root-finding strategy.
    #[serde(default)]
    pub strategy: IrrStrategy,

    /// Lower end of the bisection bracket, in rate space.
    #[serde(default)]
    pub lower_bound: f64,

    /// Upper end of the bisection bracket, in rate space.
    #[serde(default = "default_upper_bound")]
    pub upper_bound: f64,

    /// Newton-Raphson starting rate; zero when absent.
    #[serde(default)]
    pub initial_guess: Option<f64>,

    /// Bracket width at which bisection stops.
    #[serde(default = "default_bisection_tolerance")]
    pub bisection_tolerance: f64,

    /// Relative step size at which Newton-Raphson stops.
    #[serde(default = "default_newton_tolerance")]
    pub newton_tolerance: f64,

    /// Iteration cap shared by both strategies.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_upper_bound() -> f64 {
    10.0
}

fn default_bisection_tolerance() -> f64 {
    1e-8
}

fn default_newton_tolerance() -> f64 {
    1e-10
}

fn default_max_iterations() -> u32 {
    100
}

fn default_grossup_tolerance() -> f64 {
    1e-10
}

impl Default for IrrConfig {
    fn default() -> Self {
        Self {
            strategy: IrrStrategy::default(),
            lower_bound: 0.0,
            upper_bound: default_upper_bound(),
            initial_guess: None,
            bisection_tolerance: default_bisection_tolerance(),
            newton_tolerance: default_newton_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl IrrConfig {
    /// Default settings for the given strategy.
    #[must_use]
    pub fn with_strategy(strategy: IrrStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Sets the bisection bracket.
    #[must_use]
    pub fn with_bounds(mut self, lower_bound: f64, upper_bound: f64) -> Self {
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
        self
    }

    /// Sets the Newton-Raphson starting rate.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = Some(initial_guess);
        self
    }

    /// Solver settings for bisection.
    #[must_use]
    pub fn bisection_solver(&self) -> SolverConfig {
        SolverConfig::new(self.bisection_tolerance, self.max_iterations)
    }

    /// Solver settings for Newton-Raphson.
    #[must_use]
    pub fn newton_solver(&self) -> SolverConfig {
        SolverConfig::new(self.newton_tolerance, self.max_iterations)
    }
}

impl Validate for IrrConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.lower_bound.is_finite() && self.lower_bound > -1.0) {
            errors.push(ValidationError::new(
                "lower_bound",
                "Lower bound must be a finite rate above -1",
            ));
        }

        if !self.upper_bound.is_finite() || self.upper_bound <= self.lower_bound {
            errors.push(ValidationError::new(
                "upper_bound",
                "Upper bound must be finite and greater than the lower bound",
            ));
        }

        if let Some(guess) = self.initial_guess {
            if !(guess.is_finite() && guess > -1.0) {
                errors.push(ValidationError::new(
                    "initial_guess",
                    "Initial guess must be a finite rate above -1",
                ));
            }
        }

        check_tolerance(&mut errors, "bisection_tolerance", self.bisection_tolerance);
        check_tolerance(&mut errors, "newton_tolerance", self.newton_tolerance);
        check_iterations(&mut errors, "max_iterations", self.max_iterations);

        errors
    }
}

/// Grossup solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrossupConfig {
    /// Root-finding method.
    #[serde(default)]
    pub method: GrossupMethod,

    /// Relative step tolerance.
    #[serde(default = "default_grossup_tolerance")]
    pub tolerance: f64,

    /// Iteration cap.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

impl Default for GrossupConfig {
    fn default() -> Self {
        Self {
            method: GrossupMethod::default(),
            tolerance: default_grossup_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl GrossupConfig {
    /// Default settings for the given method.
    #[must_use]
    pub fn with_method(method: GrossupMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Solver settings.
    #[must_use]
    pub fn solver(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }
}

impl Validate for GrossupConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_tolerance(&mut errors, "tolerance", self.tolerance);
        check_iterations(&mut errors, "max_iterations", self.max_iterations);
        errors
    }
}

/// Top-level calculator settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Amortization convention of the loans.
    #[serde(default)]
    pub schedule_type: AmortizationScheduleType,

    /// IRR solver settings.
    #[serde(default)]
    pub irr: IrrConfig,

    /// Grossup solver settings.
    #[serde(default)]
    pub grossup: GrossupConfig,
}

impl Validate for CalculatorConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let prefixed = |section: &str, errors: Vec<ValidationError>| {
            errors
                .into_iter()
                .map(|e| ValidationError::new(format!("{section}.{}", e.field), e.message))
                .collect::<Vec<_>>()
        };

        let mut errors = prefixed("irr", self.irr.validate());
        errors.extend(prefixed("grossup", self.grossup.validate()));
        errors
    }
}
