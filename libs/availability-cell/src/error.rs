use thiserror::Error;

use shared_models::RepositoryError;
use shared_utils::TimeFormatError;

#[derive(Error, Debug)]
pub enum AvailabilityError {
    #[error("Missing required params: {0}")]
    MissingParams(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Malformed schedule data: {0}")]
    InvalidTime(#[from] TimeFormatError),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Appointment type not found: {0}")]
    AppointmentTypeNotFound(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
