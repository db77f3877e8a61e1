use serde::{Deserialize, Serialize};

use shared_models::{AppointmentType, BlockedTime, Booking, Provider};

// ==============================================================================
// QUERY / RESULT MODELS
// ==============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvailabilityQuery {
    pub provider_id: String,
    pub appointment_type_id: String,
    pub date: String,
}

impl AvailabilityQuery {
    pub fn new(provider_id: &str, appointment_type_id: &str, date: &str) -> Self {
        Self {
            provider_id: provider_id.to_string(),
            appointment_type_id: appointment_type_id.to_string(),
            date: date.to_string(),
        }
    }

    /// Names of the required parameters left empty.
    pub fn missing_params(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.provider_id.is_empty() {
            missing.push("providerId");
        }
        if self.appointment_type_id.is_empty() {
            missing.push("appointmentTypeId");
        }
        if self.date.is_empty() {
            missing.push("date");
        }
        missing
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSummary {
    pub id: String,
    pub name: String,
}

impl From<&Provider> for ProviderSummary {
    fn from(provider: &Provider) -> Self {
        Self {
            id: provider.id.clone(),
            name: provider.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentTypeSummary {
    pub id: String,
    pub name: String,
    pub duration: u32,
}

impl From<&AppointmentType> for AppointmentTypeSummary {
    fn from(appointment_type: &AppointmentType) -> Self {
        Self {
            id: appointment_type.id.clone(),
            name: appointment_type.name.clone(),
            duration: appointment_type.duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    pub date: String,
    pub provider: ProviderSummary,
    pub appointment_type: AppointmentTypeSummary,
    pub available_slots: Vec<String>,
}

// ==============================================================================
// CONFLICT FILTER INPUTS
// ==============================================================================

/// Time already taken by a booking, before buffer padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookedInterval {
    pub time: String,
    pub duration: u32,
}

impl BookedInterval {
    pub fn new(time: &str, duration: u32) -> Self {
        Self {
            time: time.to_string(),
            duration,
        }
    }
}

impl From<&Booking> for BookedInterval {
    fn from(booking: &Booking) -> Self {
        Self::new(&booking.time, booking.duration)
    }
}

/// Provider unavailability for the queried day.
///
/// A partial window missing either bound blocks nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockedWindow {
    pub all_day: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl BlockedWindow {
    pub fn all_day() -> Self {
        Self {
            all_day: true,
            start_time: None,
            end_time: None,
        }
    }

    pub fn between(start: &str, end: &str) -> Self {
        Self {
            all_day: false,
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
        }
    }
}

impl From<&BlockedTime> for BlockedWindow {
    fn from(blocked: &BlockedTime) -> Self {
        Self {
            all_day: blocked.all_day,
            start_time: blocked.start_time.clone(),
            end_time: blocked.end_time.clone(),
        }
    }
}
