pub mod admission;
pub mod cancellation;
pub mod tokens;
pub mod validation;

pub use admission::BookingAdmissionService;
pub use cancellation::CancellationService;
pub use tokens::{confirmation_number, generate_cancel_token, tokens_match};
pub use validation::{is_time_in_past, validate_booking_input, BookingValidator};
