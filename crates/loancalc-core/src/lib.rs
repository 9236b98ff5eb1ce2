//! # loancalc Core
//!
//! Loan cash-flow schedules and the inverse problems solved over them.
//!
//! This crate provides:
//!
//! - **PMT**: [`pmt`], the constant installment of an equal-payment loan
//! - **Schedules**: progressive Price, regressive Price and constant
//!   amortization ([`schedule`])
//! - **Grossup**: the gross principal that nets to a target after taxes and
//!   fees ([`grossup`])
//! - **IRR**: the periodic rate implied by a payment stream ([`irr`])
//! - **Configuration**: serde-backed solver settings ([`config`])
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every computation works on in-memory values, with no
//!   I/O and no shared state
//! - **Pluggable charges**: taxes and fees are traits with closure impls
//! - **Explicit failures**: invalid inputs and solver failures surface as
//!   [`LoanError`] variants
//!
//! ## Example
//!
//! ```rust
//! use loancalc_core::prelude::*;
//!
//! let days = ReturnDays::new((1..=10).collect()).unwrap();
//! let schedule =
//!     AmortizationSchedule::new(AmortizationScheduleType::ProgressivePrice, 8530.20, 0.03, days)
//!         .unwrap();
//!
//! assert!((schedule.due_payments()[0] - 1000.0).abs() < 1e-2);
//! assert!((schedule.total_interest() - 1469.80).abs() < 1e-2);
//! ```

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
#![allow(clippy::float_cmp)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod config;
pub mod error;
pub mod grossup;
pub mod irr;
mod pmt;
pub mod schedule;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{CalculatorConfig, GrossupConfig, IrrConfig, Validate};
    pub use crate::error::{LoanError, LoanResult};
    pub use crate::grossup::{
        approximate_grossup, AmortizationFunction, CappedDailyTax, Grossup, GrossupFunctions,
        GrossupMethod, GrossupProjection, PrincipalCharge, ProjectedGrossup, ProportionalCharge,
        ReducedTax,
    };
    pub use crate::irr::{irr, IrrResult, IrrStrategy};
    pub use crate::pmt::pmt;
    pub use crate::schedule::{AmortizationSchedule, AmortizationScheduleType, ScheduleRule};
    pub use crate::types::ReturnDays;
}

pub use error::{LoanError, LoanResult};
pub use pmt::pmt;
