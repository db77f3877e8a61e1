use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, instrument, warn};

use shared_config::SchedulingConfig;
use shared_database::SchedulingRepository;
use shared_models::{AppointmentType, BlockedTime, Booking, Provider};
use shared_utils::{day_of_week, is_time_in_past_at};

use crate::error::AvailabilityError;
use crate::models::{
    AppointmentTypeSummary, AvailabilityQuery, AvailabilityResult, BlockedWindow, BookedInterval,
    ProviderSummary,
};
use crate::services::conflict::filter_conflicts;
use crate::services::slots::generate_slots;

/// Computes the bookable slots of a provider for one appointment type and date.
///
/// Pure function of its inputs. A day without working hours, or a day on which
/// the provider's active bookings already reach the type's `max_per_day`,
/// yields an empty slot list rather than an error.
pub fn get_available_slots(
    provider: &Provider,
    appointment_type: &AppointmentType,
    date: &str,
    bookings: &[Booking],
    blocked_times: &[BlockedTime],
    config: &SchedulingConfig,
) -> Result<AvailabilityResult, AvailabilityError> {
    let weekday = day_of_week(date).map_err(|_| AvailabilityError::InvalidDate(date.to_string()))?;

    let day_schedule = provider.working_hours_on(weekday);
    if day_schedule.is_empty() {
        debug!("Provider {} does not work on day {} ({})", provider.id, weekday, date);
        return Ok(build_result(provider, appointment_type, date, Vec::new()));
    }

    let active_bookings: Vec<&Booking> = bookings.iter().filter(|b| b.is_active()).collect();

    // Zero means no limit.
    if let Some(max_per_day) = appointment_type.max_per_day.filter(|limit| *limit > 0) {
        if active_bookings.len() >= max_per_day as usize {
            debug!(
                "Daily limit of {} reached for provider {} on {}: {} active bookings",
                max_per_day,
                provider.id,
                date,
                active_bookings.len()
            );
            return Ok(build_result(provider, appointment_type, date, Vec::new()));
        }
    }

    let mut candidates = Vec::new();
    for entry in day_schedule {
        candidates.extend(generate_slots(&entry.start_time, &entry.end_time, config.slot_interval)?);
    }
    // Zero-padded HH:MM sorts chronologically; overlapping entries must not publish twice.
    candidates.sort();
    candidates.dedup();

    let total_buffer =
        provider.buffer_minutes + appointment_type.buffer_before + appointment_type.buffer_after;

    let booked: Vec<BookedInterval> = active_bookings.iter().map(|b| BookedInterval::from(*b)).collect();
    let blocked: Vec<BlockedWindow> = blocked_times
        .iter()
        .filter(|bt| bt.covers(date))
        .map(BlockedWindow::from)
        .collect();

    let available = filter_conflicts(
        &candidates,
        appointment_type.duration,
        &booked,
        &blocked,
        total_buffer,
    )?;

    Ok(build_result(provider, appointment_type, date, available))
}

fn build_result(
    provider: &Provider,
    appointment_type: &AppointmentType,
    date: &str,
    slots: Vec<String>,
) -> AvailabilityResult {
    AvailabilityResult {
        date: date.to_string(),
        provider: ProviderSummary::from(provider),
        appointment_type: AppointmentTypeSummary::from(appointment_type),
        available_slots: slots,
    }
}

/// Filter stage dropping slots that start less than `min_notice_hours` after `now`.
///
/// Not applied by [`get_available_slots`]; callers opt in.
pub fn apply_min_notice(
    mut result: AvailabilityResult,
    min_notice_hours: u32,
    now: NaiveDateTime,
) -> Result<AvailabilityResult, AvailabilityError> {
    let mut kept = Vec::with_capacity(result.available_slots.len());
    for slot in result.available_slots {
        if !is_time_in_past_at(&result.date, &slot, min_notice_hours, now)? {
            kept.push(slot);
        }
    }
    result.available_slots = kept;
    Ok(result)
}

/// Whether `date` falls within `[today, today + window_days]`.
pub fn is_within_booking_window(
    date: &str,
    window_days: u32,
    today: NaiveDate,
) -> Result<bool, AvailabilityError> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AvailabilityError::InvalidDate(date.to_string()))?;
    Ok(date >= today && date <= today + Duration::days(window_days as i64))
}

/// Availability lookups backed by the storage collaborator.
pub struct AvailabilityService {
    repository: Arc<dyn SchedulingRepository>,
    config: SchedulingConfig,
}

impl AvailabilityService {
    pub fn new(repository: Arc<dyn SchedulingRepository>, config: SchedulingConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &SchedulingConfig {
        &self.config
    }

    /// Fetches the provider's records for the query date and computes its slots.
    #[instrument(skip(self), fields(provider = %query.provider_id, date = %query.date))]
    pub async fn check_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityResult, AvailabilityError> {
        let missing = query.missing_params();
        if !missing.is_empty() {
            return Err(AvailabilityError::MissingParams(missing.join(", ")));
        }

        let (provider, appointment_type, bookings, blocked_times) = tokio::try_join!(
            self.repository.find_provider(&query.provider_id),
            self.repository.find_appointment_type(&query.appointment_type_id),
            self.repository.find_bookings_for_date(&query.provider_id, &query.date),
            self.repository.find_blocked_times_for_date(&query.provider_id, &query.date),
        )?;

        let provider = provider.ok_or_else(|| {
            warn!("Provider not found: {}", query.provider_id);
            AvailabilityError::ProviderNotFound(query.provider_id.clone())
        })?;
        let appointment_type = appointment_type.ok_or_else(|| {
            warn!("Appointment type not found: {}", query.appointment_type_id);
            AvailabilityError::AppointmentTypeNotFound(query.appointment_type_id.clone())
        })?;

        let result = get_available_slots(
            &provider,
            &appointment_type,
            &query.date,
            &bookings,
            &blocked_times,
            &self.config,
        )?;

        debug!("Found {} available slots", result.available_slots.len());
        Ok(result)
    }
}
