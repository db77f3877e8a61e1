use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::NaiveDate;

use availability_cell::{
    apply_min_notice, get_available_slots, is_within_booking_window, AvailabilityError,
    AvailabilityQuery, AvailabilityService,
};
use shared_config::SchedulingConfig;
use shared_database::{InMemoryRepository, SeedData};
use shared_models::BookingStatus;
use shared_utils::test_utils::{
    all_day_block, booking_at, init_test_tracing, partial_block, TestAppointmentType, TestConfig,
    TestProvider,
};
use shared_utils::to_datetime;

const MONDAY: &str = "2024-03-18";
const TUESDAY: &str = "2024-03-19";
const WEDNESDAY: &str = "2024-03-20";

fn config() -> SchedulingConfig {
    TestConfig::default().to_scheduling_config()
}

#[test]
fn provider_not_working_that_day_has_no_slots() {
    let provider = TestProvider::new("provider-1")
        .working(&[1, 3], "09:00", "17:00")
        .to_provider();
    let appointment_type = TestAppointmentType::default().to_appointment_type();

    let tuesday = get_available_slots(&provider, &appointment_type, TUESDAY, &[], &[], &config()).unwrap();
    assert!(tuesday.available_slots.is_empty());
    assert_eq!(tuesday.date, TUESDAY);
    assert_eq!(tuesday.provider.id, "provider-1");

    let wednesday =
        get_available_slots(&provider, &appointment_type, WEDNESDAY, &[], &[], &config()).unwrap();
    assert_eq!(wednesday.available_slots.len(), 16);
    assert_eq!(wednesday.available_slots.first().map(String::as_str), Some("09:00"));
    assert_eq!(wednesday.available_slots.last().map(String::as_str), Some("16:30"));
}

#[test]
fn existing_booking_removes_its_slot() {
    let provider = TestProvider::default().to_provider();
    let appointment_type = TestAppointmentType::default().to_appointment_type();
    let bookings = vec![booking_at(MONDAY, "10:00", 30, BookingStatus::Confirmed)];

    let result =
        get_available_slots(&provider, &appointment_type, MONDAY, &bookings, &[], &config()).unwrap();

    assert!(!result.available_slots.contains(&"10:00".to_string()));
    assert!(result.available_slots.contains(&"09:30".to_string()));
    assert!(result.available_slots.contains(&"10:30".to_string()));
}

#[test]
fn daily_limit_counts_only_active_bookings() {
    let provider = TestProvider::default().to_provider();
    let appointment_type = TestAppointmentType::default().with_max_per_day(2).to_appointment_type();

    let full = vec![
        booking_at(MONDAY, "09:00", 30, BookingStatus::Confirmed),
        booking_at(MONDAY, "11:00", 30, BookingStatus::Confirmed),
    ];
    let result = get_available_slots(&provider, &appointment_type, MONDAY, &full, &[], &config()).unwrap();
    assert!(result.available_slots.is_empty());

    let one_cancelled = vec![
        booking_at(MONDAY, "09:00", 30, BookingStatus::Confirmed),
        booking_at(MONDAY, "11:00", 30, BookingStatus::Cancelled),
    ];
    let result =
        get_available_slots(&provider, &appointment_type, MONDAY, &one_cancelled, &[], &config())
            .unwrap();
    assert!(!result.available_slots.is_empty());
    // The cancelled booking no longer occupies its time either.
    assert!(result.available_slots.contains(&"11:00".to_string()));
    assert!(!result.available_slots.contains(&"09:00".to_string()));
}

#[test]
fn daily_limit_counts_every_active_booking_of_the_provider() {
    let provider = TestProvider::default().to_provider();
    let appointment_type = TestAppointmentType::default().with_max_per_day(2).to_appointment_type();

    let mut follow_ups = vec![
        booking_at(MONDAY, "09:00", 30, BookingStatus::Confirmed),
        booking_at(MONDAY, "14:00", 30, BookingStatus::Confirmed),
    ];
    for booking in &mut follow_ups {
        booking.appointment_type_id = "type-2".to_string();
    }

    let result =
        get_available_slots(&provider, &appointment_type, MONDAY, &follow_ups, &[], &config()).unwrap();
    assert!(result.available_slots.is_empty());
}

#[test]
fn zero_daily_limit_means_unlimited() {
    let provider = TestProvider::default().to_provider();
    let appointment_type = TestAppointmentType::default().with_max_per_day(0).to_appointment_type();
    let bookings = vec![booking_at(MONDAY, "09:00", 30, BookingStatus::Confirmed)];

    let result =
        get_available_slots(&provider, &appointment_type, MONDAY, &bookings, &[], &config()).unwrap();
    assert_eq!(result.available_slots.len(), 15);
    assert!(!result.available_slots.contains(&"09:00".to_string()));
}

#[test]
fn all_day_block_empties_the_day() {
    let provider = TestProvider::default().to_provider();
    let appointment_type = TestAppointmentType::default().to_appointment_type();
    let bookings = vec![booking_at(MONDAY, "10:00", 30, BookingStatus::Confirmed)];

    let result = get_available_slots(
        &provider,
        &appointment_type,
        MONDAY,
        &bookings,
        &[all_day_block(MONDAY)],
        &config(),
    )
    .unwrap();
    assert!(result.available_slots.is_empty());
}

#[test]
fn blocks_outside_the_date_are_ignored() {
    let provider = TestProvider::default().to_provider();
    let appointment_type = TestAppointmentType::default().to_appointment_type();

    let result = get_available_slots(
        &provider,
        &appointment_type,
        MONDAY,
        &[],
        &[all_day_block(TUESDAY)],
        &config(),
    )
    .unwrap();
    assert_eq!(result.available_slots.len(), 16);
}

#[test]
fn partial_block_removes_covered_slots() {
    let provider = TestProvider::default().to_provider();
    let appointment_type = TestAppointmentType::default().to_appointment_type();

    let result = get_available_slots(
        &provider,
        &appointment_type,
        MONDAY,
        &[],
        &[partial_block(MONDAY, "12:00", "13:00")],
        &config(),
    )
    .unwrap();
    assert!(!result.available_slots.contains(&"12:00".to_string()));
    assert!(!result.available_slots.contains(&"12:30".to_string()));
    assert!(result.available_slots.contains(&"11:30".to_string()));
    assert!(result.available_slots.contains(&"13:00".to_string()));
}

#[test]
fn provider_and_type_buffers_are_summed() {
    let provider = TestProvider::default().with_buffer(10).to_provider();
    let appointment_type = TestAppointmentType::default().with_buffers(5, 15).to_appointment_type();
    let bookings = vec![booking_at(MONDAY, "12:00", 30, BookingStatus::Confirmed)];

    // Total buffer of 30 turns the booking into [11:30, 13:00).
    let result =
        get_available_slots(&provider, &appointment_type, MONDAY, &bookings, &[], &config()).unwrap();
    for taken in ["11:30", "12:00", "12:30"] {
        assert!(!result.available_slots.contains(&taken.to_string()), "{} should be taken", taken);
    }
    assert!(result.available_slots.contains(&"11:00".to_string()));
    assert!(result.available_slots.contains(&"13:00".to_string()));
}

#[test]
fn split_and_overlapping_shifts_publish_each_slot_once() {
    let provider = TestProvider::new("provider-1")
        .working(&[1], "13:00", "15:00")
        .working(&[1], "09:00", "11:00")
        .working(&[1], "10:00", "12:00")
        .to_provider();
    let appointment_type = TestAppointmentType::default().to_appointment_type();

    let result = get_available_slots(&provider, &appointment_type, MONDAY, &[], &[], &config()).unwrap();
    assert_eq!(
        result.available_slots,
        vec!["09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "13:00", "13:30", "14:00", "14:30"]
    );
}

#[test]
fn result_projects_provider_and_type() {
    let provider = TestProvider::default().to_provider();
    let appointment_type = TestAppointmentType::default().with_duration(45).to_appointment_type();

    let result = get_available_slots(&provider, &appointment_type, MONDAY, &[], &[], &config()).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["date"], MONDAY);
    assert_eq!(json["provider"], serde_json::json!({"id": "provider-1", "name": "Dr. Jane Smith"}));
    assert_eq!(
        json["appointmentType"],
        serde_json::json!({"id": "type-1", "name": "Initial Consultation", "duration": 45})
    );
    assert!(json["availableSlots"].is_array());
}

#[test]
fn repeated_queries_are_identical() {
    let provider = TestProvider::default().with_buffer(5).to_provider();
    let appointment_type = TestAppointmentType::default().to_appointment_type();
    let bookings = vec![booking_at(MONDAY, "14:00", 60, BookingStatus::Confirmed)];
    let blocked = vec![partial_block(MONDAY, "09:00", "10:00")];

    let first =
        get_available_slots(&provider, &appointment_type, MONDAY, &bookings, &blocked, &config()).unwrap();
    let second =
        get_available_slots(&provider, &appointment_type, MONDAY, &bookings, &blocked, &config()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn newly_booked_slot_disappears_on_requery() {
    let provider = TestProvider::default().to_provider();
    let appointment_type = TestAppointmentType::default().to_appointment_type();

    let before = get_available_slots(&provider, &appointment_type, MONDAY, &[], &[], &config()).unwrap();
    assert!(before.available_slots.contains(&"15:00".to_string()));

    let bookings = vec![booking_at(MONDAY, "15:00", 30, BookingStatus::Confirmed)];
    let after =
        get_available_slots(&provider, &appointment_type, MONDAY, &bookings, &[], &config()).unwrap();
    assert!(!after.available_slots.contains(&"15:00".to_string()));
}

#[test]
fn invalid_date_is_reported() {
    let provider = TestProvider::default().to_provider();
    let appointment_type = TestAppointmentType::default().to_appointment_type();

    let result = get_available_slots(&provider, &appointment_type, "2024-02-30", &[], &[], &config());
    assert_matches!(result, Err(AvailabilityError::InvalidDate(_)));
}

#[test]
fn min_notice_stage_drops_near_term_slots() {
    let provider = TestProvider::default().to_provider();
    let appointment_type = TestAppointmentType::default().to_appointment_type();
    let result = get_available_slots(&provider, &appointment_type, MONDAY, &[], &[], &config()).unwrap();

    let now = to_datetime("2024-03-17", "12:00").unwrap();
    let filtered = apply_min_notice(result, 24, now).unwrap();

    assert_eq!(filtered.available_slots.first().map(String::as_str), Some("12:00"));
    assert!(!filtered.available_slots.contains(&"11:30".to_string()));
}

#[test]
fn booking_window_is_inclusive() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();

    assert!(is_within_booking_window("2024-03-18", 60, today).unwrap());
    assert!(is_within_booking_window("2024-05-17", 60, today).unwrap());
    assert!(!is_within_booking_window("2024-05-18", 60, today).unwrap());
    assert!(!is_within_booking_window("2024-03-17", 60, today).unwrap());
    assert_matches!(
        is_within_booking_window("soon", 60, today),
        Err(AvailabilityError::InvalidDate(_))
    );
}

fn seeded_service() -> AvailabilityService {
    let repository = InMemoryRepository::from_seed(SeedData {
        providers: vec![TestProvider::default().to_provider()],
        appointment_types: vec![TestAppointmentType::default().to_appointment_type()],
        bookings: vec![
            booking_at(MONDAY, "10:00", 30, BookingStatus::Confirmed),
            booking_at(MONDAY, "11:00", 30, BookingStatus::Cancelled),
        ],
        blocked_times: vec![partial_block(MONDAY, "16:00", "17:00")],
    });
    AvailabilityService::new(Arc::new(repository), config())
}

#[tokio::test]
async fn service_queries_repository() {
    init_test_tracing();
    let service = seeded_service();

    let result = service
        .check_availability(&AvailabilityQuery::new("provider-1", "type-1", MONDAY))
        .await
        .unwrap();

    assert!(!result.available_slots.contains(&"10:00".to_string()));
    assert!(result.available_slots.contains(&"11:00".to_string()));
    assert!(!result.available_slots.contains(&"16:00".to_string()));
    assert_eq!(result.available_slots.last().map(String::as_str), Some("15:30"));
}

#[tokio::test]
async fn service_reports_missing_records_and_params() {
    let service = seeded_service();

    let missing = service
        .check_availability(&AvailabilityQuery::new("", "type-1", ""))
        .await;
    assert_matches!(missing, Err(AvailabilityError::MissingParams(ref p)) if p == "providerId, date");

    let provider = service
        .check_availability(&AvailabilityQuery::new("ghost", "type-1", MONDAY))
        .await;
    assert_matches!(provider, Err(AvailabilityError::ProviderNotFound(_)));

    let appointment_type = service
        .check_availability(&AvailabilityQuery::new("provider-1", "ghost", MONDAY))
        .await;
    assert_matches!(appointment_type, Err(AvailabilityError::AppointmentTypeNotFound(_)));
}
