use thiserror::Error;

/// Error taxonomy for the booking flow. All variants are recoverable;
/// `StaleResponse` is discarded internally and never shown to a user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Incomplete selection, missing: {}", missing.join(", "))]
    IncompleteSelection { missing: Vec<&'static str> },

    #[error("Stale response for {0}, discarded")]
    StaleResponse(String),

    #[error("Remote service error: {0}")]
    Remote(String),
}

impl BookingError {
    pub fn validation(msg: impl Into<String>) -> Self {
        BookingError::Validation(msg.into())
    }

    /// True for errors a user can recover from by adjusting their
    /// selection, as opposed to service failures that need a retry.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            BookingError::Validation(_) | BookingError::IncompleteSelection { .. }
        )
    }
}
