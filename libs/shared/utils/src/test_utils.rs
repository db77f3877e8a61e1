use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use shared_config::{SchedulingConfig, ValidationConfig};
use shared_models::{
    AppointmentType, BlockedTime, Booking, BookingStatus, Provider, Recurrence, WorkingHoursEntry,
};

/// Installs a test-friendly subscriber once; later calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

pub struct TestConfig {
    pub slot_interval: u32,
    pub min_notice: u32,
    pub require_email: bool,
    pub require_phone: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            slot_interval: 30,
            min_notice: 24,
            require_email: true,
            require_phone: false,
        }
    }
}

impl TestConfig {
    pub fn to_scheduling_config(&self) -> SchedulingConfig {
        SchedulingConfig {
            slot_interval: self.slot_interval,
            min_notice: self.min_notice,
            validation: ValidationConfig {
                require_email: self.require_email,
                require_phone: self.require_phone,
            },
            ..SchedulingConfig::default()
        }
    }
}

pub struct TestProvider {
    pub id: String,
    pub name: String,
    pub buffer_minutes: u32,
    pub working_hours: Vec<WorkingHoursEntry>,
}

impl Default for TestProvider {
    /// Monday to Friday, 09:00-17:00, no buffer.
    fn default() -> Self {
        Self::new("provider-1").working(&[1, 2, 3, 4, 5], "09:00", "17:00")
    }
}

impl TestProvider {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: "Dr. Jane Smith".to_string(),
            buffer_minutes: 0,
            working_hours: Vec::new(),
        }
    }

    pub fn working(mut self, days: &[u8], start: &str, end: &str) -> Self {
        self.working_hours
            .extend(days.iter().map(|day| WorkingHoursEntry::new(*day, start, end)));
        self
    }

    pub fn with_buffer(mut self, minutes: u32) -> Self {
        self.buffer_minutes = minutes;
        self
    }

    pub fn to_provider(&self) -> Provider {
        Provider {
            id: self.id.clone(),
            name: self.name.clone(),
            email: Some("provider@example.com".to_string()),
            active: true,
            working_hours: self.working_hours.clone(),
            buffer_minutes: self.buffer_minutes,
            timezone: None,
        }
    }
}

pub struct TestAppointmentType {
    pub id: String,
    pub name: String,
    pub duration: u32,
    pub max_per_day: Option<u32>,
    pub buffer_before: u32,
    pub buffer_after: u32,
}

impl Default for TestAppointmentType {
    fn default() -> Self {
        Self {
            id: "type-1".to_string(),
            name: "Initial Consultation".to_string(),
            duration: 30,
            max_per_day: None,
            buffer_before: 0,
            buffer_after: 0,
        }
    }
}

impl TestAppointmentType {
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = minutes;
        self
    }

    pub fn with_max_per_day(mut self, limit: u32) -> Self {
        self.max_per_day = Some(limit);
        self
    }

    pub fn with_buffers(mut self, before: u32, after: u32) -> Self {
        self.buffer_before = before;
        self.buffer_after = after;
        self
    }

    pub fn to_appointment_type(&self) -> AppointmentType {
        AppointmentType {
            id: self.id.clone(),
            name: self.name.clone(),
            slug: self.name.to_lowercase().replace(' ', "-"),
            description: None,
            duration: self.duration,
            price: None,
            provider: Some("provider-1".to_string()),
            providers: Vec::new(),
            color: None,
            active: true,
            max_per_day: self.max_per_day,
            requires_new_patient: false,
            buffer_before: self.buffer_before,
            buffer_after: self.buffer_after,
        }
    }
}

/// A booking of the default provider and appointment type.
pub fn booking_at(date: &str, time: &str, duration: u32, status: BookingStatus) -> Booking {
    Booking {
        id: Uuid::new_v4().to_string(),
        appointment_type_id: "type-1".to_string(),
        provider_id: "provider-1".to_string(),
        date: date.to_string(),
        time: time.to_string(),
        duration,
        end_time: None,
        patient_name: "John Doe".to_string(),
        patient_email: "john.doe@test.com".to_string(),
        patient_phone: String::new(),
        notes: None,
        status,
        confirmation_number: None,
        cancel_token: None,
        confirmation_sent: false,
        reminder_sent: false,
        cancelled_at: None,
        cancel_reason: None,
    }
}

pub fn all_day_block(date: &str) -> BlockedTime {
    BlockedTime {
        id: Uuid::new_v4().to_string(),
        provider_id: "provider-1".to_string(),
        reason: Some("Vacation".to_string()),
        start_date: date.to_string(),
        end_date: date.to_string(),
        all_day: true,
        start_time: None,
        end_time: None,
        recurring: Recurrence::None,
    }
}

pub fn partial_block(date: &str, start: &str, end: &str) -> BlockedTime {
    BlockedTime {
        all_day: false,
        start_time: Some(start.to_string()),
        end_time: Some(end.to_string()),
        reason: Some("Staff meeting".to_string()),
        ..all_day_block(date)
    }
}
