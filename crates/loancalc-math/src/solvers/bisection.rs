//! Bisection root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// A simple and reliable bracketing method that works by repeatedly
/// halving the interval and selecting the subinterval containing the root.
/// Iteration stops once the bracket is no wider than `config.tolerance`;
/// the midpoint of the final bracket is returned.
///
/// Requires: `lower < upper` and `f(lower) * f(upper) < 0`. Both are checked
/// before the first evaluation of the midpoint and are never repaired.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `lower` - Lower bound of the bracket
/// * `upper` - Upper bound of the bracket
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use loancalc_math::solvers::{bisection, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bisection<F>(f: F, lower: f64, upper: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    if lower.is_nan() || upper.is_nan() || lower >= upper {
        return Err(MathError::InvalidInterval { lower, upper });
    }

    let mut lo = lower;
    let mut hi = upper;
    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if !f_lo.is_finite() || !f_hi.is_finite() {
        return Err(MathError::non_finite("bisection bracket evaluation"));
    }

    // A root sitting on an endpoint does not count as a sign change
    if f_lo * f_hi >= 0.0 {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    let mut iterations = 0;
    while hi - lo > config.tolerance {
        if iterations == config.max_iterations {
            let mid = (lo + hi) / 2.0;
            return Err(MathError::convergence_failed(iterations, f(mid).abs()));
        }
        iterations += 1;

        let mid = (lo + hi) / 2.0;
        let f_mid = f(mid);

        if f_mid == 0.0 {
            return Ok(SolverResult::converged(mid, iterations, f_mid));
        }

        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }

    let root = (lo + hi) / 2.0;
    log::debug!("bisection converged to {root} after {iterations} iterations");

    Ok(SolverResult::converged(root, iterations, f(root)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(result.converged);
    }

    #[test]
    fn test_reversed_bracket_is_rejected() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(f, 2.0, 1.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidInterval { .. })));
    }

    #[test]
    fn test_degenerate_bracket_is_rejected() {
        let f = |x: f64| x - 1.0;

        let result = bisection(f, 1.0, 1.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidInterval { .. })));
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;

        // Both endpoints have same sign
        let result = bisection(f, 2.0, 3.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_root_at_endpoint_is_not_a_sign_change() {
        let f = |x: f64| x - 1.0;

        let result = bisection(f, 0.0, 1.0, &SolverConfig::default());

        assert!(matches!(result, Err(MathError::InvalidBracket { .. })));
    }

    #[test]
    fn test_decreasing_function() {
        let f = |x: f64| 1.0 - x;

        let result = bisection(f, -3.0, 4.0, &SolverConfig::new(1e-9, 100)).unwrap();

        assert_relative_eq!(result.root, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_width_tolerance_controls_precision() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(f, 1.0, 2.0, &SolverConfig::new(1e-3, 100)).unwrap();

        assert!((result.root - std::f64::consts::SQRT_2).abs() <= 1e-3);
        assert!(result.iterations <= 10);
    }

    #[test]
    fn test_iteration_cap() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(f, 1.0, 2.0, &SolverConfig::new(1e-12, 5));

        assert!(matches!(
            result,
            Err(MathError::ConvergenceFailed { iterations: 5, .. })
        ));
    }
}
