// Structural booking validation. Never consults stored data.

use async_trait::async_trait;
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use shared_utils::{is_time_in_past_at, TimeFormatError};

use crate::models::{BookingInput, CustomValidation, ValidationOptions, ValidationResult};

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern compiles"));

static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("time pattern compiles"));

/// Caller-supplied validation run after the structural checks.
#[async_trait]
pub trait BookingValidator: Send + Sync {
    async fn validate(&self, input: &BookingInput) -> CustomValidation;
}

/// Checks required fields and date/time shape, collecting every failure.
pub fn validate_booking_input(input: &BookingInput, options: &ValidationOptions) -> ValidationResult {
    let mut errors = Vec::new();

    if input.appointment_type_id.is_empty() {
        errors.push("Appointment type is required".to_string());
    }
    if input.provider_id.is_empty() {
        errors.push("Provider is required".to_string());
    }
    if !DATE_PATTERN.is_match(&input.date) {
        errors.push("Invalid date format".to_string());
    }
    if !TIME_PATTERN.is_match(&input.time) {
        errors.push("Invalid time format".to_string());
    }
    if input.patient.name.is_empty() {
        errors.push("Patient name is required".to_string());
    }
    if options.require_email && input.patient.email.is_empty() {
        errors.push("Patient email is required".to_string());
    }
    if options.require_phone && input.patient.phone.is_empty() {
        errors.push("Patient phone is required".to_string());
    }

    if !errors.is_empty() {
        debug!("Booking input rejected with {} errors", errors.len());
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
    }
}

/// True when `date time` starts less than `min_notice_hours` from the local clock.
pub fn is_time_in_past(date: &str, time: &str, min_notice_hours: u32) -> Result<bool, TimeFormatError> {
    is_time_in_past_at(date, time, min_notice_hours, Local::now().naive_local())
}
