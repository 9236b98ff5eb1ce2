//! Newton-Raphson iteration.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration `x_{n+1} = x_n - f(x_n) / f'(x_n)`.
///
/// Stops when the step is small relative to the iterate,
/// `|x_{n+1} - x_n| < tolerance · |x_{n+1}|`, or when `f(x_n)` is exactly
/// zero. The residual is never compared against the tolerance, so scaling
/// `f` by a constant does not change the root or the iteration count.
///
/// Exhausting `config.max_iterations` is not an error: the last iterate is
/// returned with [`SolverResult::converged`] set to `false` so callers can
/// decide whether a degraded estimate is acceptable.
///
/// # Errors
///
/// Returns [`MathError::DivisionByZero`] when the derivative vanishes and
/// [`MathError::NonFinite`] when an iterate leaves the finite reals.
///
/// # Example
///
/// ```rust
/// use loancalc_math::solvers::{newton_raphson, SolverConfig};
///
/// // Growth factor X = 1 + c of a loan of 1 repaid by 1 on days 1 and 2:
/// // X^2 - X - 1 = 0
/// let f = |x: f64| x * x - x - 1.0;
/// let df = |x: f64| 2.0 * x - 1.0;
///
/// let result = newton_raphson(f, df, 1.0, &SolverConfig::default()).unwrap();
/// assert!(result.converged);
/// assert!((result.root - 1.618033988749895).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = initial_guess;

    for iteration in 0..config.max_iterations {
        let fx = f(x);
        if !fx.is_finite() {
            return Err(MathError::non_finite("newton-raphson evaluation"));
        }
        if fx == 0.0 {
            return Ok(SolverResult::converged(x, iteration, fx));
        }

        let slope = df(x);
        if slope == 0.0 {
            return Err(MathError::DivisionByZero { value: slope });
        }

        let step = fx / slope;
        x -= step;
        if !x.is_finite() {
            return Err(MathError::non_finite("newton-raphson step"));
        }

        if step.abs() < config.tolerance * x.abs().max(f64::MIN_POSITIVE) {
            return Ok(SolverResult::converged(x, iteration + 1, f(x)));
        }
    }

    let residual = f(x);
    log::debug!(
        "newton-raphson reached the {}-iteration cap at x = {x} (residual {residual:.2e})",
        config.max_iterations
    );

    Ok(SolverResult {
        root: x,
        iterations: config.max_iterations,
        residual,
        converged: false,
    })
}
