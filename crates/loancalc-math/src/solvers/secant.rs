//! Scalar secant method.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Finds a root of `f` from two starting points, without a derivative.
///
/// Each step replaces the derivative with the slope through the last two
/// iterates:
///
/// ```text
/// x_{n+1} = x_n - f(x_n) (x_n - x_{n-1}) / (f(x_n) - f(x_{n-1}))
/// ```
///
/// Stops when the step is small relative to the iterate,
/// `|x_{n+1} - x_n| <= tolerance · |x_{n+1}|`, or when `f(x_n)` is exactly
/// zero. For an affine `f` the first step lands on the root.
///
/// # Errors
///
/// * [`MathError::NonFinite`] when `f` returns NaN or infinity
/// * [`MathError::DivisionByZero`] when two iterates share the same value
/// * [`MathError::ConvergenceFailed`] when the iteration cap is reached
///
/// # Example
///
/// ```rust
/// use loancalc_math::solvers::{secant, SolverConfig};
///
/// // Gross amount that nets 100 after a 2% fee and a flat charge of 5
/// let residue = |gross: f64| gross - 0.02 * gross - 5.0 - 100.0;
///
/// let result = secant(residue, 100.0, 101.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - 105.0 / 0.98).abs() < 1e-9);
/// ```
pub fn secant<F>(f: F, x0: f64, x1: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let (mut x_old, mut x) = (x0, x1);
    let (mut fx_old, mut fx) = (f(x_old), f(x));

    for iteration in 0..config.max_iterations {
        if !(fx_old.is_finite() && fx.is_finite()) {
            return Err(MathError::non_finite("secant evaluation"));
        }

        if fx == 0.0 {
            return Ok(SolverResult::converged(x, iteration, fx));
        }

        let slope_denominator = fx - fx_old;
        if slope_denominator == 0.0 {
            return Err(MathError::DivisionByZero {
                value: slope_denominator,
            });
        }

        let step = fx * (x - x_old) / slope_denominator;
        let x_new = x - step;

        if step.abs() <= config.tolerance * x_new.abs().max(f64::MIN_POSITIVE) {
            return Ok(SolverResult::converged(x_new, iteration + 1, f(x_new)));
        }

        x_old = x;
        fx_old = fx;
        x = x_new;
        fx = f(x);
    }

    Err(MathError::convergence_failed(config.max_iterations, fx.abs()))
}
