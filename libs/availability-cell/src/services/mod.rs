pub mod availability;
pub mod conflict;
pub mod slots;

pub use availability::{
    apply_min_notice, get_available_slots, is_within_booking_window, AvailabilityService,
};
pub use conflict::{filter_conflicts, intervals_overlap};
pub use slots::generate_slots;
