use tracing::warn;

use shared_utils::{format_time, parse_time, TimeFormatError};

/// Candidate start times from `start`, stepping by `interval` minutes.
///
/// A candidate is emitted only while `candidate + interval <= end`, so the
/// result is empty whenever the window is shorter than one interval. The real
/// appointment duration is applied later by the conflict filter.
pub fn generate_slots(start: &str, end: &str, interval: u32) -> Result<Vec<String>, TimeFormatError> {
    let start = parse_time(start)?;
    let end = parse_time(end)?;

    if interval == 0 {
        warn!("Slot interval of zero requested, no slots generated");
        return Ok(Vec::new());
    }

    let step = interval as i32;
    let mut slots = Vec::new();
    let mut current = start;

    while current + step <= end {
        slots.push(format_time(current));
        current += step;
    }

    Ok(slots)
}
