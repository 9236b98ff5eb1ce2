//! Broyden's quasi-Newton method for systems of equations.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};
use crate::solvers::SolverConfig;

/// Relative step used for the finite-difference Jacobian, absolute at zero.
const JACOBIAN_STEP: f64 = 1.49e-8;

/// Result of a multivariate root search.
#[derive(Debug, Clone, PartialEq)]
pub struct BroydenResult {
    /// The root found.
    pub root: DVector<f64>,
    /// Number of iterations used.
    pub iterations: u32,
    /// Infinity norm of the function at the root.
    pub residual_norm: f64,
}

/// Broyden's "good" method.
///
/// Finds `x` with `f(x) = 0` for `f: R^n -> R^n` without an analytic
/// Jacobian. The Jacobian is estimated once at the initial guess with
/// forward differences and its inverse is then refreshed after each step with
/// a rank-one Sherman-Morrison update:
///
/// `H_{k+1} = H_k + (Δx - H_k Δf) Δxᵀ H_k / (Δxᵀ H_k Δf)`
///
/// Iteration stops when the step is small relative to the iterate,
/// `‖Δx‖ <= tolerance · ‖x‖`, or when `f(x)` is exactly zero. The residual
/// norm is reported but never compared against the tolerance.
///
/// # Arguments
///
/// * `f` - The system of equations
/// * `initial_guess` - Starting point, also fixes the dimension `n`
/// * `config` - Solver configuration
///
/// # Errors
///
/// * [`MathError::DimensionMismatch`] when `f` does not return `n` values
/// * [`MathError::SingularMatrix`] when the Jacobian cannot be inverted
/// * [`MathError::NonFinite`] when `f` produces NaN or infinity
/// * [`MathError::ConvergenceFailed`] when the iteration cap is reached
///
/// # Example
///
/// ```rust
/// use loancalc_math::solvers::{broyden, SolverConfig};
/// use nalgebra::DVector;
///
/// // 3x + y = 9, x + 2y = 8
/// let f = |v: &DVector<f64>| {
///     DVector::from_vec(vec![3.0 * v[0] + v[1] - 9.0, v[0] + 2.0 * v[1] - 8.0])
/// };
///
/// let guess = DVector::from_vec(vec![0.0, 0.0]);
/// let result = broyden(f, &guess, &SolverConfig::default()).unwrap();
/// assert!((result.root[0] - 2.0).abs() < 1e-8);
/// assert!((result.root[1] - 3.0).abs() < 1e-8);
/// ```
pub fn broyden<F>(
    f: F,
    initial_guess: &DVector<f64>,
    config: &SolverConfig,
) -> MathResult<BroydenResult>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
{
    let n = initial_guess.len();
    if n == 0 {
        return Err(MathError::invalid_input("Broyden needs at least one unknown"));
    }

    let mut x = initial_guess.clone();
    let mut fx = evaluate(&f, &x, n)?;

    if fx.iter().all(|v| *v == 0.0) {
        return Ok(BroydenResult {
            root: x,
            iterations: 0,
            residual_norm: fx.amax(),
        });
    }

    let mut inverse_jacobian = finite_difference_jacobian(&f, &x, &fx)?
        .try_inverse()
        .ok_or(MathError::SingularMatrix)?;

    for iteration in 0..config.max_iterations {
        let dx = -(&inverse_jacobian * &fx);
        let x_next = &x + &dx;
        let f_next = evaluate(&f, &x_next, n)?;

        if dx.norm() <= config.tolerance * x_next.norm().max(f64::MIN_POSITIVE) {
            log::debug!(
                "broyden converged after {} iterations (residual {:.2e})",
                iteration + 1,
                f_next.amax()
            );
            return Ok(BroydenResult {
                root: x_next,
                iterations: iteration + 1,
                residual_norm: f_next.amax(),
            });
        }

        let df = &f_next - &fx;
        let h_df = &inverse_jacobian * &df;
        let denom = dx.dot(&h_df);
        if denom.abs() < 1e-300 {
            return Err(MathError::SingularMatrix);
        }

        inverse_jacobian += (&dx - &h_df) * (dx.transpose() * &inverse_jacobian) / denom;

        x = x_next;
        fx = f_next;
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        fx.amax(),
    ))
}

fn evaluate<F>(f: &F, x: &DVector<f64>, n: usize) -> MathResult<DVector<f64>>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
{
    let fx = f(x);
    if fx.len() != n {
        return Err(MathError::DimensionMismatch {
            unknowns: n,
            equations: fx.len(),
        });
    }
    if fx.iter().any(|v| !v.is_finite()) {
        return Err(MathError::non_finite("broyden function evaluation"));
    }
    Ok(fx)
}

fn finite_difference_jacobian<F>(
    f: &F,
    x: &DVector<f64>,
    fx: &DVector<f64>,
) -> MathResult<DMatrix<f64>>
where
    F: Fn(&DVector<f64>) -> DVector<f64>,
{
    let n = x.len();
    let mut jacobian = DMatrix::zeros(n, n);

    for j in 0..n {
        let magnitude = x[j].abs();
        let h = JACOBIAN_STEP * if magnitude > 0.0 { magnitude } else { 1.0 };
        let mut shifted = x.clone();
        shifted[j] += h;
        let column = (evaluate(f, &shifted, n)? - fx) / h;
        jacobian.set_column(j, &column);
    }

    Ok(jacobian)
}
