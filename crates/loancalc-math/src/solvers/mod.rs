//! Root-finding algorithms.
//!
//! This module provides numerical solvers for finding roots of equations:
//!
//! - [`bisection`]: Simple and reliable bracketing method
//! - [`newton_raphson`]: Fast quadratic convergence when derivative is available
//! - [`secant`]: Derivative-free method using finite differences
//! - [`broyden`]: Derivative-free quasi-Newton method for systems of equations
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Secant | Fast (superlinear) | May diverge | Two guesses |
//! | Broyden | Fast (superlinear) | May diverge | Initial guess |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//!
//! # Example: Periodic Rate of a Two-Payment Loan
//!
//! ```rust
//! use loancalc_math::solvers::{bisection, SolverConfig};
//!
//! // Borrow 1.0, repay 1.0 after one period and 1.0 after two periods.
//! // Discounted value of the repayments minus the principal:
//! let f = |c: f64| 1.0 / (1.0 + c) + 1.0 / (1.0 + c).powi(2) - 1.0;
//!
//! let config = SolverConfig::new(1e-10, 100);
//! let result = bisection(f, 0.0, 10.0, &config).unwrap();
//! assert!((result.root - 0.618033988749895).abs() < 1e-8);
//! ```

mod bisection;
mod broyden;
mod newton;
mod secant;

pub use bisection::bisection;
pub use broyden::{broyden, BroydenResult};
pub use newton::newton_raphson;
pub use secant::secant;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a scalar root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found (or the last iterate when `converged` is false).
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
    /// Whether the tolerance was met before the iteration cap.
    pub converged: bool,
}

impl SolverResult {
    pub(crate) fn converged(root: f64, iterations: u32, residual: f64) -> Self {
        Self {
            root,
            iterations,
            residual,
            converged: true,
        }
    }
}
