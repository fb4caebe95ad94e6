//! Error types for the conversation crate.
//!
//! Classification never fails: unknown input is a regular outcome. The only
//! failures are record storage failures during a terminal step or a listing.
//! The router wraps the storage report with a `DialogError` naming the step
//! and user, via `.context()`.

use studio_bot_core::UserId;
use std::fmt;

/// Errors from applying a dialog transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// Persisting a reservation failed.
    ReservationFailed { user: UserId },
    /// Removing reservations failed.
    CancellationFailed { user: UserId },
    /// Archiving feedback failed.
    FeedbackFailed { user: UserId },
    /// Reading the reservation list failed.
    ListingFailed { user: UserId },
}

impl DialogError {
    /// The user whose message failed.
    #[must_use]
    pub fn user(&self) -> UserId {
        match self {
            Self::ReservationFailed { user }
            | Self::CancellationFailed { user }
            | Self::FeedbackFailed { user }
            | Self::ListingFailed { user } => *user,
        }
    }
}

impl fmt::Display for DialogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReservationFailed { user } => {
                write!(f, "failed to store reservation for {user}")
            }
            Self::CancellationFailed { user } => {
                write!(f, "failed to cancel reservation for {user}")
            }
            Self::FeedbackFailed { user } => {
                write!(f, "failed to store feedback from {user}")
            }
            Self::ListingFailed { user } => {
                write!(f, "failed to list reservations for {user}")
            }
        }
    }
}

impl std::error::Error for DialogError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_error_display() {
        let err = DialogError::CancellationFailed {
            user: UserId::new(9),
        };
        assert_eq!(err.to_string(), "failed to cancel reservation for usr_9");
        assert_eq!(err.user(), UserId::new(9));
    }
}
