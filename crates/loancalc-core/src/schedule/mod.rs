//! Amortization schedules.
//!
//! A schedule splits a loan of principal `s`, daily rate `d` and return days
//! `n_1 < ... < n_k` into four sequences:
//!
//! - `balance[0..=k]`: outstanding principal at day 0 and after each payment
//! - `amortizations[1..=k]`: principal repaid by each payment
//! - `interest_payments[1..=k]`: interest paid by each payment
//! - `due_payments[1..=k]`: amortization plus interest
//!
//! Three conventions are supported, selected by [`AmortizationScheduleType`]:
//!
//! | Type | Installment | Amortizations |
//! |------|-------------|---------------|
//! | [`ProgressivePrice`] | constant PMT | increasing |
//! | [`RegressivePrice`] | constant PMT | decreasing |
//! | [`ConstantAmortization`] | decreasing | constant |
//!
//! # Example
//!
//! ```rust
//! use loancalc_core::schedule::{AmortizationSchedule, AmortizationScheduleType};
//! use loancalc_core::types::ReturnDays;
//!
//! let days = ReturnDays::new((1..=5).collect()).unwrap();
//! let schedule = AmortizationSchedule::new(
//!     AmortizationScheduleType::ConstantAmortization,
//!     800.0,
//!     0.8,
//!     days,
//! )
//! .unwrap();
//!
//! assert!((schedule.total_interest() - 1920.0).abs() < 1e-9);
//! assert!((schedule.total_paid() - 2720.0).abs() < 1e-9);
//! ```

mod constant;
mod price;

pub use constant::ConstantAmortization;
pub use price::{ProgressivePrice, RegressivePrice};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LoanError, LoanResult};
use crate::types::{validate_daily_rate, validate_principal, ReturnDays};

/// The four sequences every amortization convention must provide.
///
/// Implementors are built from validated inputs; none of the operations can
/// fail. There are no default implementations.
pub trait ScheduleRule {
    /// Outstanding balance at day 0 and after each payment (`k + 1` values).
    fn balance(&self) -> Vec<f64>;

    /// Principal repaid by each payment.
    fn amortizations(&self) -> Vec<f64>;

    /// Interest paid by each payment.
    fn interest_payments(&self) -> Vec<f64>;

    /// Total value of each payment.
    fn due_payments(&self) -> Vec<f64>;

    /// The constant installment, for conventions that have one.
    fn installment(&self) -> Option<f64>;
}

/// Amortization convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmortizationScheduleType {
    /// Equal installments with increasing amortizations (French system).
    #[default]
    ProgressivePrice,
    /// Equal installments with decreasing amortizations.
    RegressivePrice,
    /// Equal amortizations with decreasing installments.
    ConstantAmortization,
}

impl AmortizationScheduleType {
    /// All supported conventions.
    pub const ALL: [AmortizationScheduleType; 3] = [
        AmortizationScheduleType::ProgressivePrice,
        AmortizationScheduleType::RegressivePrice,
        AmortizationScheduleType::ConstantAmortization,
    ];

    /// Canonical kebab-case name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            AmortizationScheduleType::ProgressivePrice => "progressive-price",
            AmortizationScheduleType::RegressivePrice => "regressive-price",
            AmortizationScheduleType::ConstantAmortization => "constant-amortization",
        }
    }

    /// Returns true for the equal-installment conventions.
    #[must_use]
    pub const fn is_price(&self) -> bool {
        matches!(
            self,
            AmortizationScheduleType::ProgressivePrice | AmortizationScheduleType::RegressivePrice
        )
    }

    /// Builds a schedule of this type from raw return days.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::InvalidInput`] when any input is out of domain.
    pub fn build(
        self,
        principal: f64,
        daily_rate: f64,
        return_days: &[u32],
    ) -> LoanResult<AmortizationSchedule> {
        AmortizationSchedule::new(self, principal, daily_rate, ReturnDays::try_from(return_days)?)
    }
}

impl fmt::Display for AmortizationScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for AmortizationScheduleType {
    type Err = LoanError;

    /// Parses a convention name.
    ///
    /// Accepts kebab-case or snake_case, with or without a `-schedule`
    /// suffix: `progressive-price`, `regressive_price_schedule`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        let normalized = normalized
            .strip_suffix("-schedule")
            .unwrap_or(&normalized);

        match normalized {
            "progressive-price" => Ok(AmortizationScheduleType::ProgressivePrice),
            "regressive-price" => Ok(AmortizationScheduleType::RegressivePrice),
            "constant-amortization" => Ok(AmortizationScheduleType::ConstantAmortization),
            _ => Err(LoanError::unknown_variant("amortization schedule type", s)),
        }
    }
}

/// A fully computed amortization schedule.
///
/// Immutable once built. Guarantees `due[i] = amortization[i] + interest[i]`,
/// `balance[0] = principal`, `balance[k] ≈ 0` and `Σ amortizations ≈ principal`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmortizationSchedule {
    schedule_type: AmortizationScheduleType,
    principal: f64,
    daily_rate: f64,
    return_days: ReturnDays,
    pmt: Option<f64>,
    balance: Vec<f64>,
    amortizations: Vec<f64>,
    interest_payments: Vec<f64>,
    due_payments: Vec<f64>,
}

impl AmortizationSchedule {
    /// Computes the schedule for the given convention.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::InvalidInput`] for a non-positive principal or a
    /// negative or non-finite daily rate.
    pub fn new(
        schedule_type: AmortizationScheduleType,
        principal: f64,
        daily_rate: f64,
        return_days: ReturnDays,
    ) -> LoanResult<Self> {
        validate_principal("principal", principal)?;
        validate_daily_rate(daily_rate)?;

        let days = &return_days;
        let sequences = match schedule_type {
            AmortizationScheduleType::ProgressivePrice => {
                Sequences::from_rule(&ProgressivePrice::new(principal, daily_rate, days)?)
            }
            AmortizationScheduleType::RegressivePrice => {
                Sequences::from_rule(&RegressivePrice::new(principal, daily_rate, days)?)
            }
            AmortizationScheduleType::ConstantAmortization => {
                Sequences::from_rule(&ConstantAmortization::new(principal, daily_rate, days))
            }
        };

        Ok(Self {
            schedule_type,
            principal,
            daily_rate,
            return_days,
            pmt: sequences.pmt,
            balance: sequences.balance,
            amortizations: sequences.amortizations,
            interest_payments: sequences.interest_payments,
            due_payments: sequences.due_payments,
        })
    }

    /// Convention used to build the schedule.
    #[must_use]
    pub fn schedule_type(&self) -> AmortizationScheduleType {
        self.schedule_type
    }

    /// Loan principal.
    #[must_use]
    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// Daily interest rate.
    #[must_use]
    pub fn daily_rate(&self) -> f64 {
        self.daily_rate
    }

    /// Return days of the payments.
    #[must_use]
    pub fn return_days(&self) -> &ReturnDays {
        &self.return_days
    }

    /// Number of payments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.return_days.len()
    }

    /// Always false, a schedule has at least one payment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.return_days.is_empty()
    }

    /// Constant installment of price schedules, `None` otherwise.
    #[must_use]
    pub fn pmt(&self) -> Option<f64> {
        self.pmt
    }

    /// Outstanding balance at day 0 and after each payment.
    #[must_use]
    pub fn balance(&self) -> &[f64] {
        &self.balance
    }

    /// Principal repaid by each payment.
    #[must_use]
    pub fn amortizations(&self) -> &[f64] {
        &self.amortizations
    }

    /// Interest paid by each payment.
    #[must_use]
    pub fn interest_payments(&self) -> &[f64] {
        &self.interest_payments
    }

    /// Total value of each payment.
    #[must_use]
    pub fn due_payments(&self) -> &[f64] {
        &self.due_payments
    }

    /// Sum of the amortizations.
    #[must_use]
    pub fn total_amortization(&self) -> f64 {
        self.amortizations.iter().sum()
    }

    /// Sum of the interest payments.
    #[must_use]
    pub fn total_interest(&self) -> f64 {
        self.interest_payments.iter().sum()
    }

    /// Sum of the due payments.
    #[must_use]
    pub fn total_paid(&self) -> f64 {
        self.due_payments.iter().sum()
    }
}

struct Sequences {
    pmt: Option<f64>,
    balance: Vec<f64>,
    amortizations: Vec<f64>,
    interest_payments: Vec<f64>,
    due_payments: Vec<f64>,
}

impl Sequences {
    fn from_rule(rule: &impl ScheduleRule) -> Self {
        Self {
            pmt: rule.installment(),
            balance: rule.balance(),
            amortizations: rule.amortizations(),
            interest_payments: rule.interest_payments(),
            due_payments: rule.due_payments(),
        }
    }
}
