use crate::domain::entities::{BookingStatus, RoomStatus};
use crate::domain::errors::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
}

impl From<TransitionError> for DomainError {
    fn from(err: TransitionError) -> Self {
        DomainError::InvalidInput(err.to_string())
    }
}

/// Validates if a booking status transition is allowed
pub fn validate_transition(from: BookingStatus, to: BookingStatus) -> Result<(), TransitionError> {
    use BookingStatus::*;

    match (from, to) {
        // Same state is always valid (no-op)
        (a, b) if a == b => Ok(()),

        (Active, CheckedOut) => Ok(()),
        (Active, Cancelled) => Ok(()),

        // Checked-out and cancelled bookings are final
        _ => Err(TransitionError::InvalidTransition { from, to }),
    }
}

/// Room status implied by moving a booking into `to`, if any.
pub fn room_status_after(to: BookingStatus) -> Option<RoomStatus> {
    match to {
        BookingStatus::Active => None,
        BookingStatus::CheckedOut | BookingStatus::Cancelled => Some(RoomStatus::Empty),
    }
}
