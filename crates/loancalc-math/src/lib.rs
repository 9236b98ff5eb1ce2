//! # loancalc Math
//!
//! Numerical root finders for the loancalc loan analytics library.
//!
//! This crate provides:
//!
//! - **Bracketing**: [`solvers::bisection`] over a sign-changing interval
//! - **Derivative-based**: [`solvers::newton_raphson`] with an analytic derivative
//! - **Derivative-free**: [`solvers::secant`] for scalar equations and
//!   [`solvers::broyden`] for systems of equations
//!
//! ## Design Philosophy
//!
//! - **Explicit outcomes**: every solver reports iterations and residuals
//! - **No silent failures**: invalid brackets and exhausted caps are errors
//! - **Plain `f64`**: schedules and rates are floating point throughout

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        bisection, broyden, newton_raphson, secant, BroydenResult, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
