//! In-memory scheduling repository.
//!
//! Keeps every record in process memory behind a single lock, which gives the
//! per-provider-day serialization the admission protocol relies on. Used by the
//! CLI and by the test suites.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use shared_models::{
    AppointmentType, BlockedTime, Booking, BookingStatus, NewBooking, Provider, RepositoryError,
    RepositoryResult,
};

use crate::repository::SchedulingRepository;

/// Records loaded into an [`InMemoryRepository`] at start-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedData {
    pub providers: Vec<Provider>,
    pub appointment_types: Vec<AppointmentType>,
    pub bookings: Vec<Booking>,
    pub blocked_times: Vec<BlockedTime>,
}

/// On-disk form of a booking. Unlike the read shape it keeps `cancelToken`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredBooking<'a> {
    #[serde(flatten)]
    booking: &'a Booking,
    #[serde(skip_serializing_if = "Option::is_none")]
    cancel_token: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredSeed<'a> {
    providers: &'a [Provider],
    appointment_types: &'a [AppointmentType],
    bookings: Vec<StoredBooking<'a>>,
    blocked_times: &'a [BlockedTime],
}

impl<'a> From<&'a SeedData> for StoredSeed<'a> {
    fn from(seed: &'a SeedData) -> Self {
        Self {
            providers: &seed.providers,
            appointment_types: &seed.appointment_types,
            bookings: seed
                .bookings
                .iter()
                .map(|booking| StoredBooking {
                    booking,
                    cancel_token: booking.cancel_token.as_deref(),
                })
                .collect(),
            blocked_times: &seed.blocked_times,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    data: Arc<RwLock<SeedData>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: SeedData) -> Self {
        Self {
            data: Arc::new(RwLock::new(seed)),
        }
    }

    pub async fn from_seed_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref();
        debug!("Loading seed data from {}", path.display());

        let raw = tokio::fs::read_to_string(path).await?;
        let seed: SeedData = serde_json::from_str(&raw)?;

        debug!(
            "Seeded {} providers, {} appointment types, {} bookings, {} blocked times",
            seed.providers.len(),
            seed.appointment_types.len(),
            seed.bookings.len(),
            seed.blocked_times.len()
        );

        Ok(Self::from_seed(seed))
    }

    /// Writes the current contents in the seed file shape, cancel tokens included,
    /// so that [`InMemoryRepository::from_seed_file`] restores them.
    pub async fn save_to_file(&self, path: impl AsRef<Path>) -> RepositoryResult<()> {
        let path = path.as_ref();
        let raw = {
            let data = self.data.read().await;
            serde_json::to_string_pretty(&StoredSeed::from(&*data))?
        };

        // Replace the file in one step so a failed write leaves the old seed intact.
        let staging = path.with_extension("json.tmp");
        tokio::fs::write(&staging, raw).await?;
        tokio::fs::rename(&staging, path).await?;

        debug!("Saved repository contents to {}", path.display());
        Ok(())
    }

    /// Copy of the current contents, in the seed file shape.
    pub async fn snapshot(&self) -> SeedData {
        self.data.read().await.clone()
    }

    pub async fn insert_provider(&self, provider: Provider) {
        self.data.write().await.providers.push(provider);
    }

    pub async fn insert_appointment_type(&self, appointment_type: AppointmentType) {
        self.data.write().await.appointment_types.push(appointment_type);
    }

    pub async fn insert_booking(&self, booking: Booking) {
        self.data.write().await.bookings.push(booking);
    }

    pub async fn insert_blocked_time(&self, blocked_time: BlockedTime) {
        self.data.write().await.blocked_times.push(blocked_time);
    }
}

#[async_trait]
impl SchedulingRepository for InMemoryRepository {
    async fn find_provider(&self, id: &str) -> RepositoryResult<Option<Provider>> {
        let data = self.data.read().await;
        Ok(data.providers.iter().find(|p| p.id == id).cloned())
    }

    async fn find_appointment_type(&self, id: &str) -> RepositoryResult<Option<AppointmentType>> {
        let data = self.data.read().await;
        Ok(data.appointment_types.iter().find(|t| t.id == id).cloned())
    }

    async fn find_active_providers(&self) -> RepositoryResult<Vec<Provider>> {
        let data = self.data.read().await;
        Ok(data.providers.iter().filter(|p| p.active).cloned().collect())
    }

    async fn find_active_appointment_types(
        &self,
        provider_id: Option<&str>,
    ) -> RepositoryResult<Vec<AppointmentType>> {
        let data = self.data.read().await;
        Ok(data
            .appointment_types
            .iter()
            .filter(|t| t.active)
            .filter(|t| provider_id.map_or(true, |id| t.is_offered_by(id)))
            .cloned()
            .collect())
    }

    async fn find_bookings_for_date(
        &self,
        provider_id: &str,
        date: &str,
    ) -> RepositoryResult<Vec<Booking>> {
        let data = self.data.read().await;
        let mut bookings: Vec<Booking> = data
            .bookings
            .iter()
            .filter(|b| b.provider_id == provider_id && b.date == date)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| a.time.cmp(&b.time));
        Ok(bookings)
    }

    async fn find_blocked_times_for_date(
        &self,
        provider_id: &str,
        date: &str,
    ) -> RepositoryResult<Vec<BlockedTime>> {
        let data = self.data.read().await;
        Ok(data
            .blocked_times
            .iter()
            .filter(|bt| bt.provider_id == provider_id && bt.covers(date))
            .cloned()
            .collect())
    }

    async fn count_bookings_for_date(&self, provider_id: &str, date: &str) -> RepositoryResult<u32> {
        let data = self.data.read().await;
        let count = data
            .bookings
            .iter()
            .filter(|b| b.provider_id == provider_id && b.date == date)
            .count();
        Ok(count as u32)
    }

    async fn create_booking_record(&self, record: NewBooking) -> RepositoryResult<Booking> {
        let mut data = self.data.write().await;

        let taken = data.bookings.iter().any(|b| {
            b.is_active()
                && b.provider_id == record.provider_id
                && b.date == record.date
                && b.time == record.time
        });
        if taken {
            warn!(
                "Rejecting duplicate booking for provider {} on {} at {}",
                record.provider_id, record.date, record.time
            );
            return Err(RepositoryError::UniqueViolation(format!(
                "{}/{}/{}",
                record.provider_id, record.date, record.time
            )));
        }

        let booking = record.into_booking(Uuid::new_v4().to_string());
        data.bookings.push(booking.clone());

        debug!("Stored booking {} ({:?})", booking.id, booking.confirmation_number);
        Ok(booking)
    }

    async fn find_booking(&self, id: &str) -> RepositoryResult<Option<Booking>> {
        let data = self.data.read().await;
        Ok(data.bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn cancel_booking_record(
        &self,
        id: &str,
        reason: String,
        cancelled_at: DateTime<Utc>,
    ) -> RepositoryResult<Booking> {
        let mut data = self.data.write().await;
        let booking = data
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("booking {}", id)))?;

        booking.status = BookingStatus::Cancelled;
        booking.cancelled_at = Some(cancelled_at);
        booking.cancel_reason = Some(reason);

        Ok(booking.clone())
    }
}
