//! # loancalc
//!
//! Loan cash-flow schedules, grossup and IRR in one import.
//!
//! Re-exports the public API of [`loancalc_core`] and the root finders of
//! [`loancalc_math`].
//!
//! ## Example
//!
//! ```rust
//! use loancalc::prelude::*;
//!
//! let functions = GrossupFunctions::new(
//!     AmortizationScheduleType::RegressivePrice,
//!     CappedDailyTax::new(0.0075, 0.015),
//!     ProportionalCharge::new(0.09),
//!     ProportionalCharge::new(0.4),
//! );
//! let days = ReturnDays::new(vec![1, 2]).unwrap();
//!
//! let grossup = approximate_grossup(1.0, 1.0, &days, &functions, &GrossupConfig::default()).unwrap();
//! assert!((grossup.gross_principal() - 2.0).abs() < 1e-8);
//! ```

#![warn(missing_docs)]

pub use loancalc_core::{config, error, grossup, irr, pmt, schedule, types, LoanError, LoanResult};

/// Root finders.
pub mod math {
    pub use loancalc_math::solvers::*;
    pub use loancalc_math::{MathError, MathResult};
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use loancalc_core::prelude::*;
}
