use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use availability_cell::{get_available_slots, AvailabilityError};
use shared_config::SchedulingConfig;
use shared_database::SchedulingRepository;
use shared_models::{BookingStatus, NewBooking};
use shared_utils::{format_time, parse_time};

use crate::error::BookingError;
use crate::models::{BookingConfirmation, BookingInput, ValidationOptions};
use crate::services::tokens::{confirmation_number, generate_cancel_token};
use crate::services::validation::{validate_booking_input, BookingValidator};

const DEFAULT_CUSTOM_VALIDATION_MESSAGE: &str = "Custom validation failed";

/// Admits booking requests against live availability.
///
/// Every stage either proceeds or returns a tagged rejection. Availability is
/// recomputed from the repository at write time instead of trusting whatever
/// the client last saw; exclusivity of the final insert is the repository's
/// job (see [`SchedulingRepository`]).
pub struct BookingAdmissionService {
    repository: Arc<dyn SchedulingRepository>,
    config: SchedulingConfig,
    custom_validator: Option<Arc<dyn BookingValidator>>,
}

impl BookingAdmissionService {
    pub fn new(repository: Arc<dyn SchedulingRepository>, config: SchedulingConfig) -> Self {
        Self {
            repository,
            config,
            custom_validator: None,
        }
    }

    pub fn with_custom_validator(mut self, validator: Arc<dyn BookingValidator>) -> Self {
        self.custom_validator = Some(validator);
        self
    }

    #[instrument(
        skip(self, input),
        fields(provider = %input.provider_id, date = %input.date, time = %input.time)
    )]
    pub async fn process_booking(
        &self,
        input: BookingInput,
    ) -> Result<BookingConfirmation, BookingError> {
        info!("Processing booking request for type {}", input.appointment_type_id);

        // **Step 1: Structural validation**
        let validation =
            validate_booking_input(&input, &ValidationOptions::from(&self.config.validation));
        if !validation.valid {
            warn!("Booking validation failed: {:?}", validation.errors);
            return Err(BookingError::Validation(validation.errors.join(", ")));
        }

        // **Step 2: Caller hook**
        if let Some(validator) = &self.custom_validator {
            let outcome = validator.validate(&input).await;
            if !outcome.valid {
                warn!("Custom booking validation failed: {:?}", outcome.message);
                return Err(BookingError::Validation(
                    outcome
                        .message
                        .unwrap_or_else(|| DEFAULT_CUSTOM_VALIDATION_MESSAGE.to_string()),
                ));
            }
        }

        // **Step 3-4: Reference data**
        let provider = self
            .repository
            .find_provider(&input.provider_id)
            .await?
            .ok_or_else(|| {
                warn!("Provider not found: {}", input.provider_id);
                BookingError::ProviderNotFound
            })?;

        let appointment_type = self
            .repository
            .find_appointment_type(&input.appointment_type_id)
            .await?
            .ok_or_else(|| {
                warn!("Appointment type not found: {}", input.appointment_type_id);
                BookingError::AppointmentTypeNotFound
            })?;

        // **Step 5: Re-check the slot against current state**
        let bookings = self
            .repository
            .find_bookings_for_date(&input.provider_id, &input.date)
            .await?;
        let blocked_times = self
            .repository
            .find_blocked_times_for_date(&input.provider_id, &input.date)
            .await?;

        let availability = match get_available_slots(
            &provider,
            &appointment_type,
            &input.date,
            &bookings,
            &blocked_times,
            &self.config,
        ) {
            Ok(availability) => availability,
            Err(AvailabilityError::InvalidDate(date)) => {
                warn!("No slots can exist on invalid date {}", date);
                return Err(BookingError::SlotUnavailable);
            }
            Err(e) => return Err(e.into()),
        };

        if !availability.available_slots.contains(&input.time) {
            warn!(
                "Slot {} on {} no longer available for provider {}",
                input.time, input.date, input.provider_id
            );
            return Err(BookingError::SlotUnavailable);
        }

        // **Step 6-8: Derived fields**
        let sequence = self
            .repository
            .count_bookings_for_date(&input.provider_id, &input.date)
            .await?
            + 1;
        let confirmation = confirmation_number(&input.date, sequence);
        let cancel_token = generate_cancel_token();
        let end_time = parse_time(&input.time)
            .map(|start| format_time(start + appointment_type.duration as i32))
            .map_err(AvailabilityError::from)?;

        debug!("Assigned confirmation {} ending at {}", confirmation, end_time);

        // **Step 9: Persist**
        let record = NewBooking {
            appointment_type_id: input.appointment_type_id,
            provider_id: input.provider_id,
            date: input.date,
            time: input.time,
            duration: appointment_type.duration,
            end_time,
            patient_name: input.patient.name,
            patient_email: input.patient.email,
            patient_phone: input.patient.phone,
            notes: input.patient.notes,
            status: BookingStatus::Confirmed,
            confirmation_number: confirmation,
            cancel_token: cancel_token.clone(),
        };

        let booking = match self.repository.create_booking_record(record).await {
            Ok(booking) => booking,
            Err(e) if e.is_unique_violation() => {
                warn!("Lost race for slot: {}", e);
                return Err(BookingError::SlotUnavailable);
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            "Booking {} confirmed as {:?}",
            booking.id, booking.confirmation_number
        );

        Ok(BookingConfirmation {
            booking,
            token: cancel_token,
        })
    }
}
