//! Errors raised when a statistic cannot be computed.

use thiserror::Error;

/// A statistic that is undefined for the given data.
///
/// These are reported to the user as "undefined" rather than printed as
/// NaN or infinity.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// The statistic divides by a standard deviation that is zero (or too
    /// small to be distinguished from zero).
    #[error("{statistic} is undefined: division by zero (standard deviation is {std_dev:e})")]
    DivisionByZero {
        statistic: &'static str,
        std_dev: f64,
    },

    /// Not enough non-missing observations.
    #[error("{statistic} needs at least {required} observations, got {actual}")]
    InsufficientData {
        statistic: &'static str,
        required: usize,
        actual: usize,
    },

    /// The reference distribution could not be constructed.
    #[error("reference distribution for {statistic}: {message}")]
    Distribution {
        statistic: &'static str,
        message: String,
    },
}

impl StatsError {
    /// True when the failure is a zero-variance division.
    #[must_use]
    pub const fn is_division_by_zero(&self) -> bool {
        matches!(self, Self::DivisionByZero { .. })
    }
}

pub type StatsResult<T> = Result<T, StatsError>;
