//! Domain error types for the subscription calendar backend.

use thiserror::Error;

pub type CalendarResult<T> = std::result::Result<T, CalendarError>;

/// Validation failures raised by calendar operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("Invalid month: {0}. Must be between 1 and 12")]
    InvalidMonth(u32),

    #[error("Invalid year: {0}. Must be between 1 and 9999")]
    InvalidYear(i32),
}
