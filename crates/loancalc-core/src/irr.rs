//! Internal rate of return of a payment stream.
//!
//! For a loan of `net` paid back by `r_1, ..., r_k` at days `n_1 < ... < n_k`
//! the IRR is the rate `c` solving
//!
//! ```text
//! f(X) = net · X^{n_k} - Σ r_i · X^{n_k - n_i} = 0,   X = 1 + c
//! ```
//!
//! Two strategies are available:
//!
//! - [`IrrStrategy::Bisection`]: bracketed search in rate space. Sign tests use
//!   the discounted form `f(X) / X^{n_k} = net - Σ r_i / X^{n_i}`, which has
//!   the sign of `f` for `X > 0` and stays finite for long schedules.
//! - [`IrrStrategy::NewtonRaphson`]: Newton iteration on `f` with its analytic
//!   derivative. Reaching the iteration cap is reported through
//!   [`IrrResult::converged`].
//!
//! # Example
//!
//! ```rust
//! use loancalc_core::config::IrrConfig;
//! use loancalc_core::irr::irr;
//!
//! // Borrow 1, pay back 1 after one day and 1 after two days.
//! let result = irr(1.0, &[1.0, 1.0], &[1, 2], &IrrConfig::default()).unwrap();
//! assert!((result.rate - 0.618033988749895).abs() < 1e-8);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use loancalc_math::solvers::{bisection, newton_raphson, SolverConfig};

use crate::config::{IrrConfig, Validate};
use crate::error::{LoanError, LoanResult};
use crate::types::{validate_principal, ReturnDays};

/// IRR root-finding strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IrrStrategy {
    /// Bracketed bisection, always converges on a valid bracket.
    #[default]
    Bisection,
    /// Newton-Raphson with the analytic derivative.
    NewtonRaphson,
}

impl IrrStrategy {
    /// Canonical kebab-case name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            IrrStrategy::Bisection => "bisection",
            IrrStrategy::NewtonRaphson => "newton-raphson",
        }
    }
}

impl fmt::Display for IrrStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for IrrStrategy {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "bisection" => Ok(IrrStrategy::Bisection),
            "newton-raphson" | "newton" => Ok(IrrStrategy::NewtonRaphson),
            _ => Err(LoanError::unknown_variant("IRR strategy", s)),
        }
    }
}

/// Outcome of an IRR search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrResult {
    /// Periodic (daily) rate.
    pub rate: f64,
    /// Iterations used.
    pub iterations: u32,
    /// False when Newton-Raphson stopped at its iteration cap.
    pub converged: bool,
}

/// The valuation polynomial of a payment stream.
#[derive(Debug, Clone, Copy)]
pub struct IrrPolynomial<'a> {
    net_principal: f64,
    returns: &'a [f64],
    return_days: &'a [u32],
}

impl<'a> IrrPolynomial<'a> {
    /// Validates the payment stream.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::InvalidInput`] for a non-positive principal,
    /// non-finite returns, invalid return days or mismatched lengths.
    pub fn new(net_principal: f64, returns: &'a [f64], return_days: &'a [u32]) -> LoanResult<Self> {
        validate_principal("net_principal", net_principal)?;
        ReturnDays::try_from(return_days)?;

        if returns.len() != return_days.len() {
            return Err(LoanError::invalid_input(
                "returns",
                format!(
                    "expected {} returns to match the return days, got {}",
                    return_days.len(),
                    returns.len()
                ),
            ));
        }

        if let Some(bad) = returns.iter().find(|r| !r.is_finite()) {
            return Err(LoanError::invalid_input(
                "returns",
                format!("returns must be finite, got {bad}"),
            ));
        }

        Ok(Self {
            net_principal,
            returns,
            return_days,
        })
    }

    fn last_day(&self) -> u32 {
        self.return_days[self.return_days.len() - 1]
    }

    /// Evaluates `f(X)`.
    #[must_use]
    pub fn value(&self, x: f64) -> f64 {
        let n_k = self.last_day();
        let repaid: f64 = self
            .returns
            .iter()
            .zip(self.return_days)
            .map(|(r, &n)| r * x.powf(f64::from(n_k - n)))
            .sum();

        self.net_principal * x.powf(f64::from(n_k)) - repaid
    }

    /// Evaluates `f'(X)`.
    #[must_use]
    pub fn derivative(&self, x: f64) -> f64 {
        let n_k = f64::from(self.last_day());
        let repaid: f64 = self
            .returns
            .iter()
            .zip(self.return_days)
            .map(|(r, &n)| {
                let exponent = n_k - f64::from(n);
                if exponent == 0.0 {
                    0.0
                } else {
                    exponent * r * x.powf(exponent - 1.0)
                }
            })
            .sum();

        let leading = if n_k == 0.0 {
            0.0
        } else {
            n_k * self.net_principal * x.powf(n_k - 1.0)
        };

        leading - repaid
    }

    /// Evaluates `f(X) / X^{n_k} = net - Σ r_i / X^{n_i}`.
    #[must_use]
    pub fn discounted_value(&self, x: f64) -> f64 {
        let present_value: f64 = self
            .returns
            .iter()
            .zip(self.return_days)
            .map(|(r, &n)| r / x.powf(f64::from(n)))
            .sum();

        self.net_principal - present_value
    }

    /// Bisection over the rate bracket `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::PreconditionFailed`] when the bracket is empty,
    /// reaches a rate of -1 or below, or shows no strict sign change, and
    /// [`LoanError::ConvergenceFailed`] when the iteration cap is reached.
    pub fn bisection(&self, lower: f64, upper: f64, config: &SolverConfig) -> LoanResult<IrrResult> {
        if lower <= -1.0 {
            return Err(LoanError::precondition_failed(format!(
                "bisection bracket [{lower}, {upper}] reaches a rate of -1 or below"
            )));
        }

        let result = bisection(|c| self.discounted_value(1.0 + c), lower, upper, config)?;

        log::debug!(
            "irr bisection: rate {} after {} iterations",
            result.root,
            result.iterations
        );

        Ok(IrrResult {
            rate: result.root,
            iterations: result.iterations,
            converged: true,
        })
    }

    /// Newton-Raphson seeded at the rate `initial_guess`.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::Numerical`] on a vanishing derivative or a
    /// non-finite evaluation.
    pub fn newton_raphson(&self, initial_guess: f64, config: &SolverConfig) -> LoanResult<IrrResult> {
        let result = newton_raphson(
            |x| self.value(x),
            |x| self.derivative(x),
            1.0 + initial_guess,
            config,
        )?;

        let rate = result.root - 1.0;
        if result.converged {
            log::debug!(
                "irr newton-raphson: rate {rate} after {} iterations",
                result.iterations
            );
        } else {
            log::warn!(
                "irr newton-raphson stopped at the cap of {} iterations; last rate {rate}",
                result.iterations
            );
        }

        Ok(IrrResult {
            rate,
            iterations: result.iterations,
            converged: result.converged,
        })
    }
}

/// Approximates the IRR with the strategy selected in `config`.
///
/// # Errors
///
/// Returns [`LoanError::Config`] when `config` fails validation. See also
/// [`IrrPolynomial::new`], [`IrrPolynomial::bisection`] and
/// [`IrrPolynomial::newton_raphson`].
pub fn irr(
    net_principal: f64,
    returns: &[f64],
    return_days: &[u32],
    config: &IrrConfig,
) -> LoanResult<IrrResult> {
    config.validate_or_error()?;
    let polynomial = IrrPolynomial::new(net_principal, returns, return_days)?;

    match config.strategy {
        IrrStrategy::Bisection => polynomial.bisection(
            config.lower_bound,
            config.upper_bound,
            &config.bisection_solver(),
        ),
        IrrStrategy::NewtonRaphson => polynomial.newton_raphson(
            config.initial_guess.unwrap_or(0.0),
            &config.newton_solver(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const GOLDEN: f64 = 0.618033988749895;

    #[test]
    fn test_polynomial_evaluation() {
        let returns = [1.0, 1.0];
        let polynomial = IrrPolynomial::new(1.0, &returns, &[1, 2]).unwrap();

        // X^2 - X - 1
        assert_relative_eq!(polynomial.value(2.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(polynomial.derivative(2.0), 3.0, epsilon = 1e-12);
        assert_relative_eq!(polynomial.discounted_value(2.0), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_bisection_golden_ratio() {
        let result = irr(1.0, &[1.0, 1.0], &[1, 2], &IrrConfig::default()).unwrap();

        assert_relative_eq!(result.rate, GOLDEN, epsilon = 1e-8);
        assert!(result.converged);
    }

    #[test]
    fn test_newton_golden_ratio() {
        let config = IrrConfig::with_strategy(IrrStrategy::NewtonRaphson);
        let result = irr(1.0, &[1.0, 1.0], &[1, 2], &config).unwrap();

        assert_relative_eq!(result.rate, GOLDEN, epsilon = 1e-10);
        assert!(result.converged);
    }

    #[test]
    fn test_strategies_agree_on_long_schedule() {
        let days: Vec<u32> = (1..=24).map(|m| m * 30).collect();
        let returns = vec![50.0; 24];

        let bisection = irr(1000.0, &returns, &days, &IrrConfig::default()).unwrap();
        let newton = irr(
            1000.0,
            &returns,
            &days,
            &IrrConfig::with_strategy(IrrStrategy::NewtonRaphson),
        )
        .unwrap();

        assert!(newton.converged);
        assert_relative_eq!(bisection.rate, newton.rate, epsilon = 1e-7);
    }

    #[test]
    fn test_bracket_without_sign_change() {
        let config = IrrConfig::default().with_bounds(1.0, 10.0);
        let err = irr(1.0, &[1.0, 1.0], &[1, 2], &config).unwrap_err();
        assert!(matches!(err, LoanError::PreconditionFailed { .. }));
    }

    #[test]
    fn test_inverted_bracket() {
        let returns = [1.0, 1.0];
        let polynomial = IrrPolynomial::new(1.0, &returns, &[1, 2]).unwrap();

        let err = polynomial
            .bisection(2.0, 1.0, &SolverConfig::default())
            .unwrap_err();
        assert!(matches!(err, LoanError::PreconditionFailed { .. }));
    }

    #[test]
    fn test_bracket_below_minus_one() {
        let returns = [1.0, 1.0];
        let polynomial = IrrPolynomial::new(1.0, &returns, &[1, 2]).unwrap();

        let err = polynomial
            .bisection(-1.0, 1.0, &SolverConfig::default())
            .unwrap_err();
        assert!(matches!(err, LoanError::PreconditionFailed { .. }));
    }

    #[test]
    fn test_invalid_config_is_rejected_up_front() {
        let inverted = IrrConfig::default().with_bounds(2.0, 1.0);
        let err = irr(1.0, &[1.0, 1.0], &[1, 2], &inverted).unwrap_err();
        assert!(matches!(err, LoanError::Config { ref field, .. } if field == "upper_bound"));

        let zero_tolerance = IrrConfig {
            newton_tolerance: 0.0,
            ..IrrConfig::with_strategy(IrrStrategy::NewtonRaphson)
        };
        let err = irr(1.0, &[1.0, 1.0], &[1, 2], &zero_tolerance).unwrap_err();
        assert!(matches!(err, LoanError::Config { ref field, .. } if field == "newton_tolerance"));
    }

    #[test]
    fn test_newton_cap_is_reported() {
        let config = IrrConfig {
            max_iterations: 1,
            ..IrrConfig::with_strategy(IrrStrategy::NewtonRaphson)
        };
        let result = irr(1.0, &[1.0, 1.0], &[1, 2], &config).unwrap();
        assert!(!result.converged);
    }

    #[test]
    fn test_invalid_inputs() {
        let config = IrrConfig::default();

        assert!(matches!(
            irr(1.0, &[1.0], &[1, 2], &config),
            Err(LoanError::InvalidInput { .. })
        ));
        assert!(matches!(
            irr(0.0, &[1.0, 1.0], &[1, 2], &config),
            Err(LoanError::InvalidInput { .. })
        ));
        assert!(matches!(
            irr(1.0, &[1.0, 1.0], &[2, 1], &config),
            Err(LoanError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!("bisection".parse::<IrrStrategy>().unwrap(), IrrStrategy::Bisection);
        assert_eq!(
            "newton_raphson".parse::<IrrStrategy>().unwrap(),
            IrrStrategy::NewtonRaphson
        );
        assert!(matches!(
            "regula-falsi".parse::<IrrStrategy>(),
            Err(LoanError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn test_rate_does_not_depend_on_amount() {
        for strategy in [IrrStrategy::Bisection, IrrStrategy::NewtonRaphson] {
            let config = IrrConfig::with_strategy(strategy);
            for amount in [1e-11, 1e-6, 1.0, 1e9] {
                let result = irr(amount, &[amount, amount], &[1, 2], &config).unwrap();

                assert!(result.converged);
                assert!(result.iterations > 0);
                assert_relative_eq!(result.rate, GOLDEN, epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn test_newton_is_accurate_for_small_amounts() {
        let config = IrrConfig::with_strategy(IrrStrategy::NewtonRaphson);
        let result = irr(1e-6, &[1e-6, 1e-6], &[1, 2], &config).unwrap();

        assert_relative_eq!(result.rate, GOLDEN, epsilon = 1e-10);
    }
}
