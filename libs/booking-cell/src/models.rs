use serde::{Deserialize, Serialize};

use shared_config::ValidationConfig;
use shared_models::Booking;

use crate::error::BookingError;

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: Option<String>,
}

/// Booking request as received from the caller; nothing is trusted yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingInput {
    pub appointment_type_id: String,
    pub provider_id: String,
    pub date: String,
    pub time: String,
    pub patient: PatientDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CancelRequest {
    pub booking_id: String,
    pub token: String,
    pub reason: Option<String>,
}

// ==============================================================================
// VALIDATION MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    pub require_email: bool,
    pub require_phone: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            require_email: true,
            require_phone: false,
        }
    }
}

impl From<&ValidationConfig> for ValidationOptions {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            require_email: config.require_email,
            require_phone: config.require_phone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Verdict of a caller-supplied validation hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomValidation {
    pub valid: bool,
    pub message: Option<String>,
}

impl CustomValidation {
    pub fn accept() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn reject(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

// ==============================================================================
// RESPONSE MODELS
// ==============================================================================

/// A freshly admitted booking plus its cancel token, handed to the creator only.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfirmation {
    pub booking: Booking,
    pub token: String,
}

/// Wire shape of a booking or cancellation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BookingResponse {
    pub fn confirmed(confirmation: BookingConfirmation) -> Self {
        Self {
            success: true,
            booking: Some(confirmation.booking),
            token: Some(confirmation.token),
            error: None,
            message: None,
        }
    }

    pub fn cancelled(booking: Booking) -> Self {
        Self {
            success: true,
            booking: Some(booking),
            token: None,
            error: None,
            message: None,
        }
    }

    pub fn rejected(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            booking: None,
            token: None,
            error: Some(code.to_string()),
            message: Some(message.into()),
        }
    }

    /// Shapes an admission outcome. Faults are handed back as `Err` untouched.
    pub fn from_result(
        result: Result<BookingConfirmation, BookingError>,
    ) -> Result<Self, BookingError> {
        match result {
            Ok(confirmation) => Ok(Self::confirmed(confirmation)),
            Err(error) => Self::from_error(error),
        }
    }

    pub fn from_error(error: BookingError) -> Result<Self, BookingError> {
        match error.code() {
            Some(code) => Ok(Self::rejected(code, error.to_string())),
            None => Err(error),
        }
    }
}
