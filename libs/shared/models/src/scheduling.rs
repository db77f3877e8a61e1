use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==============================================================================
// PROVIDERS
// ==============================================================================

/// One working window of a provider on a given weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHoursEntry {
    pub day_of_week: u8, // 0 = Sunday, 1 = Monday, etc.
    pub start_time: String,
    pub end_time: String,
}

impl WorkingHoursEntry {
    pub fn new(day_of_week: u8, start_time: &str, end_time: &str) -> Self {
        Self {
            day_of_week,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default, alias = "schedule")]
    pub working_hours: Vec<WorkingHoursEntry>,
    #[serde(default)]
    pub buffer_minutes: u32,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl Provider {
    /// Every working-hours entry for the weekday, in stored order.
    pub fn working_hours_on(&self, day_of_week: u8) -> Vec<&WorkingHoursEntry> {
        self.working_hours
            .iter()
            .filter(|entry| entry.day_of_week == day_of_week)
            .collect()
    }
}

// ==============================================================================
// APPOINTMENT TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Minutes, always positive.
    pub duration: u32,
    #[serde(default)]
    pub price: Option<f64>,
    /// Single owning provider, if any.
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub providers: Vec<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    /// `None` or `Some(0)` means no daily limit.
    #[serde(default)]
    pub max_per_day: Option<u32>,
    #[serde(default)]
    pub requires_new_patient: bool,
    #[serde(default)]
    pub buffer_before: u32,
    #[serde(default)]
    pub buffer_after: u32,
}

impl AppointmentType {
    /// Whether the provider is named as `provider` or listed in `providers`.
    pub fn is_offered_by(&self, provider_id: &str) -> bool {
        self.provider.as_deref() == Some(provider_id)
            || self.providers.iter().any(|p| p == provider_id)
    }
}

// ==============================================================================
// BOOKINGS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl BookingStatus {
    /// Cancelled bookings neither occupy time nor count toward daily quotas.
    pub fn is_active(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::NoShow => "no-show",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[serde(alias = "appointmentType")]
    pub appointment_type_id: String,
    #[serde(alias = "provider")]
    pub provider_id: String,
    pub date: String,
    pub time: String,
    /// Snapshotted at creation, independent of later appointment-type edits.
    pub duration: u32,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub patient_email: String,
    #[serde(default)]
    pub patient_phone: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: BookingStatus,
    #[serde(default)]
    pub confirmation_number: Option<String>,
    /// Bearer secret; only ever handed back to the creator.
    #[serde(default, skip_serializing)]
    pub cancel_token: Option<String>,
    #[serde(default)]
    pub confirmation_sent: bool,
    #[serde(default)]
    pub reminder_sent: bool,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancel_reason: Option<String>,
}

impl Booking {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Fields handed to the collaborator when the admission protocol creates a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub appointment_type_id: String,
    pub provider_id: String,
    pub date: String,
    pub time: String,
    pub duration: u32,
    pub end_time: String,
    pub patient_name: String,
    pub patient_email: String,
    pub patient_phone: String,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub confirmation_number: String,
    pub cancel_token: String,
}

impl NewBooking {
    pub fn into_booking(self, id: String) -> Booking {
        Booking {
            id,
            appointment_type_id: self.appointment_type_id,
            provider_id: self.provider_id,
            date: self.date,
            time: self.time,
            duration: self.duration,
            end_time: Some(self.end_time),
            patient_name: self.patient_name,
            patient_email: self.patient_email,
            patient_phone: self.patient_phone,
            notes: self.notes,
            status: self.status,
            confirmation_number: Some(self.confirmation_number),
            cancel_token: Some(self.cancel_token),
            confirmation_sent: false,
            reminder_sent: false,
            cancelled_at: None,
            cancel_reason: None,
        }
    }
}

// ==============================================================================
// BLOCKED TIME
// ==============================================================================

/// Recurrence marker carried as data. Only the literal date range is ever blocked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedTime {
    pub id: String,
    #[serde(alias = "provider")]
    pub provider_id: String,
    #[serde(default)]
    pub reason: Option<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub recurring: Recurrence,
}

impl BlockedTime {
    /// Inclusive `start_date..=end_date` check on `YYYY-MM-DD` strings.
    pub fn covers(&self, date: &str) -> bool {
        self.start_date.as_str() <= date && date <= self.end_date.as_str()
    }
}

fn default_true() -> bool {
    true
}
