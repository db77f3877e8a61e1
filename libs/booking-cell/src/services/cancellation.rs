use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use shared_database::SchedulingRepository;
use shared_models::Booking;

use crate::error::BookingError;
use crate::models::CancelRequest;
use crate::services::tokens::tokens_match;

/// Self-service cancellation authorised by the booking's cancel token.
pub struct CancellationService {
    repository: Arc<dyn SchedulingRepository>,
}

impl CancellationService {
    pub fn new(repository: Arc<dyn SchedulingRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, request), fields(booking = %request.booking_id))]
    pub async fn cancel_booking(&self, request: CancelRequest) -> Result<Booking, BookingError> {
        if request.booking_id.is_empty() || request.token.is_empty() {
            return Err(BookingError::Validation("Missing bookingId and token".to_string()));
        }

        let booking = self
            .repository
            .find_booking(&request.booking_id)
            .await?
            .ok_or(BookingError::BookingNotFound)?;

        let authorised = booking
            .cancel_token
            .as_deref()
            .is_some_and(|stored| tokens_match(&request.token, stored));
        if !authorised {
            warn!("Cancel token mismatch for booking {}", booking.id);
            return Err(BookingError::InvalidToken);
        }

        if !booking.is_active() {
            return Err(BookingError::AlreadyCancelled);
        }

        let cancelled = self
            .repository
            .cancel_booking_record(
                &booking.id,
                request.reason.unwrap_or_default(),
                Utc::now(),
            )
            .await?;

        info!("Booking {} cancelled", cancelled.id);
        Ok(cancelled)
    }
}
