use thiserror::Error;

use availability_cell::AvailabilityError;
use shared_models::RepositoryError;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("{0}")]
    Validation(String),

    #[error("Provider not found")]
    ProviderNotFound,

    #[error("Appointment type not found")]
    AppointmentTypeNotFound,

    #[error("This time slot is no longer available")]
    SlotUnavailable,

    #[error("Booking not found")]
    BookingNotFound,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Booking is already cancelled")]
    AlreadyCancelled,

    #[error("Scheduling data error: {0}")]
    Schedule(#[from] AvailabilityError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl BookingError {
    /// Tag of a business-rule rejection, `None` for infrastructure faults.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            BookingError::Validation(_) => Some("validation_error"),
            BookingError::ProviderNotFound => Some("provider_not_found"),
            BookingError::AppointmentTypeNotFound => Some("appointment_type_not_found"),
            BookingError::SlotUnavailable => Some("slot_unavailable"),
            BookingError::BookingNotFound => Some("booking_not_found"),
            BookingError::InvalidToken => Some("invalid_token"),
            BookingError::AlreadyCancelled => Some("already_cancelled"),
            BookingError::Schedule(_) | BookingError::Repository(_) => None,
        }
    }

    pub fn is_fault(&self) -> bool {
        self.code().is_none()
    }
}
