//! Return-day offsets of a payment plan.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LoanError, LoanResult};

/// Days elapsed from the capitalization start to each payment's due date.
///
/// The offsets are non-empty and strictly increasing. They are fixed once
/// constructed; shifting to another reference day produces a new value.
///
/// # Example
///
/// ```rust
/// use loancalc_core::types::ReturnDays;
///
/// let days = ReturnDays::new(vec![30, 60, 90]).unwrap();
/// assert_eq!(days.len(), 3);
/// assert_eq!(days.last(), 90);
///
/// assert!(ReturnDays::new(vec![30, 30]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct ReturnDays(Vec<u32>);

impl ReturnDays {
    /// Validates and wraps the given offsets.
    pub fn new(days: Vec<u32>) -> LoanResult<Self> {
        if days.is_empty() {
            return Err(LoanError::invalid_input(
                "return_days",
                "at least one return day is required",
            ));
        }

        if let Some(pair) = days.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(LoanError::invalid_input(
                "return_days",
                format!(
                    "offsets must be strictly increasing, found {} followed by {}",
                    pair[0], pair[1]
                ),
            ));
        }

        Ok(Self(days))
    }

    /// Returns the offsets as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Number of payments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Offset of the first payment.
    #[must_use]
    pub fn first(&self) -> u32 {
        self.0[0]
    }

    /// Offset of the last payment.
    #[must_use]
    pub fn last(&self) -> u32 {
        self.0[self.0.len() - 1]
    }

    /// Iterates over the offsets.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Re-expresses the offsets relative to a later reference day.
    ///
    /// Fails when the reference falls after the first payment.
    pub fn relative_to(&self, reference: u32) -> LoanResult<Self> {
        if reference > self.first() {
            return Err(LoanError::invalid_input(
                "reference_day",
                format!(
                    "reference day {reference} falls after the first return day {}",
                    self.first()
                ),
            ));
        }

        Ok(Self(self.0.iter().map(|day| day - reference).collect()))
    }
}

impl TryFrom<Vec<u32>> for ReturnDays {
    type Error = LoanError;

    fn try_from(days: Vec<u32>) -> LoanResult<Self> {
        Self::new(days)
    }
}

impl TryFrom<&[u32]> for ReturnDays {
    type Error = LoanError;

    fn try_from(days: &[u32]) -> LoanResult<Self> {
        Self::new(days.to_vec())
    }
}

impl From<ReturnDays> for Vec<u32> {
    fn from(days: ReturnDays) -> Self {
        days.0
    }
}

impl AsRef<[u32]> for ReturnDays {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

impl fmt::Display for ReturnDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
