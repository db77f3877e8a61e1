//! Storage collaborator contract consumed by the scheduling core.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use shared_models::{AppointmentType, BlockedTime, Booking, NewBooking, Provider, RepositoryResult};

/// Record access required by the availability and booking services.
///
/// # Concurrency contract
/// The admission protocol only performs an optimistic check-then-act. An
/// implementation must either reject a second active booking for the same
/// `(provider, date, time)` from `create_booking_record` with
/// `RepositoryError::UniqueViolation`, or serialize count-then-insert per
/// provider-day. Timeouts are the implementation's own business; whatever
/// error it raises is propagated unchanged.
#[async_trait]
pub trait SchedulingRepository: Send + Sync {
    async fn find_provider(&self, id: &str) -> RepositoryResult<Option<Provider>>;

    async fn find_appointment_type(&self, id: &str) -> RepositoryResult<Option<AppointmentType>>;

    async fn find_active_providers(&self) -> RepositoryResult<Vec<Provider>>;

    /// Active appointment types, restricted to those offered by `provider_id` when given.
    async fn find_active_appointment_types(
        &self,
        provider_id: Option<&str>,
    ) -> RepositoryResult<Vec<AppointmentType>>;

    /// All bookings of the provider on the date, whatever their status.
    async fn find_bookings_for_date(
        &self,
        provider_id: &str,
        date: &str,
    ) -> RepositoryResult<Vec<Booking>>;

    /// Blocked periods of the provider whose date range covers `date`.
    async fn find_blocked_times_for_date(
        &self,
        provider_id: &str,
        date: &str,
    ) -> RepositoryResult<Vec<BlockedTime>>;

    /// Number of bookings recorded for the provider on the date, cancelled ones included.
    async fn count_bookings_for_date(&self, provider_id: &str, date: &str) -> RepositoryResult<u32>;

    async fn create_booking_record(&self, record: NewBooking) -> RepositoryResult<Booking>;

    async fn find_booking(&self, id: &str) -> RepositoryResult<Option<Booking>>;

    /// Marks the booking cancelled and returns the updated record.
    async fn cancel_booking_record(
        &self,
        id: &str,
        reason: String,
        cancelled_at: DateTime<Utc>,
    ) -> RepositoryResult<Booking>;
}
