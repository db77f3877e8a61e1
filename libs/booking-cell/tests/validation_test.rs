use booking_cell::models::{BookingInput, PatientDetails, ValidationOptions};
use booking_cell::services::validation::{is_time_in_past, validate_booking_input};

fn valid_input() -> BookingInput {
    BookingInput {
        appointment_type_id: "type-1".to_string(),
        provider_id: "provider-1".to_string(),
        date: "2024-03-18".to_string(),
        time: "10:00".to_string(),
        patient: PatientDetails {
            name: "John Doe".to_string(),
            email: "john.doe@test.com".to_string(),
            phone: String::new(),
            notes: None,
        },
    }
}

#[test]
fn accepts_complete_input() {
    let result = validate_booking_input(&valid_input(), &ValidationOptions::default());
    assert!(result.valid);
    assert!(result.errors.is_empty());
}

#[test]
fn collects_every_failure() {
    let result = validate_booking_input(&BookingInput::default(), &ValidationOptions::default());

    assert!(!result.valid);
    assert_eq!(
        result.errors,
        vec![
            "Appointment type is required",
            "Provider is required",
            "Invalid date format",
            "Invalid time format",
            "Patient name is required",
            "Patient email is required",
        ]
    );
}

#[test]
fn date_must_be_four_two_two_digits() {
    for date in ["2024-3-18", "18-03-2024", "2024/03/18", "２０２４-03-18", ""] {
        let input = BookingInput {
            date: date.to_string(),
            ..valid_input()
        };
        let result = validate_booking_input(&input, &ValidationOptions::default());
        assert_eq!(result.errors, vec!["Invalid date format"], "date {:?}", date);
    }

    // Shape only: calendar validity is not checked here.
    let input = BookingInput {
        date: "2024-02-30".to_string(),
        ..valid_input()
    };
    assert!(validate_booking_input(&input, &ValidationOptions::default()).valid);
}

#[test]
fn time_must_be_24_hour_clock() {
    for time in ["00:00", "09:05", "19:59", "23:59"] {
        let input = BookingInput {
            time: time.to_string(),
            ..valid_input()
        };
        assert!(validate_booking_input(&input, &ValidationOptions::default()).valid, "{}", time);
    }

    for time in ["24:00", "9:00", "12:60", "12:5", "noon", "12:00:00"] {
        let input = BookingInput {
            time: time.to_string(),
            ..valid_input()
        };
        let result = validate_booking_input(&input, &ValidationOptions::default());
        assert_eq!(result.errors, vec!["Invalid time format"], "time {:?}", time);
    }
}

#[test]
fn email_requirement_can_be_disabled() {
    let mut input = valid_input();
    input.patient.email.clear();

    assert!(!validate_booking_input(&input, &ValidationOptions::default()).valid);

    let options = ValidationOptions {
        require_email: false,
        require_phone: false,
    };
    assert!(validate_booking_input(&input, &options).valid);
}

#[test]
fn phone_only_required_when_enabled() {
    let options = ValidationOptions {
        require_email: true,
        require_phone: true,
    };
    let result = validate_booking_input(&valid_input(), &options);
    assert_eq!(result.errors, vec!["Patient phone is required"]);

    let mut input = valid_input();
    input.patient.phone = "+1 555 0100".to_string();
    assert!(validate_booking_input(&input, &options).valid);
}

#[test]
fn time_in_past_uses_the_local_clock() {
    assert!(is_time_in_past("2000-01-01", "09:00", 0).unwrap());
    assert!(!is_time_in_past("2999-01-01", "09:00", 24).unwrap());
    assert!(is_time_in_past("not-a-date", "09:00", 0).is_err());
}
