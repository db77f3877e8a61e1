use tracing::debug;

use shared_utils::{parse_time, TimeFormatError};

use crate::models::{BlockedWindow, BookedInterval};

/// Half-open overlap test: `[a_start, a_end)` against `[b_start, b_end)`.
/// Touching endpoints do not overlap.
pub fn intervals_overlap(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> bool {
    a_start < b_end && a_end > b_start
}

/// Removes every slot whose `[start, start + appointment_duration)` interval
/// collides with a buffered booking or a partial-day block.
///
/// `buffer_minutes` pads both sides of every booking; blocks are never padded.
/// Any all-day window empties the result. Input order is preserved.
pub fn filter_conflicts(
    slots: &[String],
    appointment_duration: u32,
    bookings: &[BookedInterval],
    blocked_windows: &[BlockedWindow],
    buffer_minutes: u32,
) -> Result<Vec<String>, TimeFormatError> {
    if blocked_windows.iter().any(|window| window.all_day) {
        debug!("All-day block present, no slots available");
        return Ok(Vec::new());
    }

    let buffer = buffer_minutes as i32;

    let occupied = bookings
        .iter()
        .map(|booking| {
            let start = parse_time(&booking.time)?;
            Ok((start - buffer, start + booking.duration as i32 + buffer))
        })
        .collect::<Result<Vec<(i32, i32)>, TimeFormatError>>()?;

    let mut blocked = Vec::with_capacity(blocked_windows.len());
    for window in blocked_windows {
        if let (Some(start), Some(end)) = (&window.start_time, &window.end_time) {
            blocked.push((parse_time(start)?, parse_time(end)?));
        }
    }

    let mut available = Vec::with_capacity(slots.len());
    for slot in slots {
        let slot_start = parse_time(slot)?;
        let slot_end = slot_start + appointment_duration as i32;

        let collides = occupied
            .iter()
            .chain(blocked.iter())
            .any(|&(start, end)| intervals_overlap(slot_start, slot_end, start, end));

        if !collides {
            available.push(slot.clone());
        }
    }

    debug!(
        "Conflict filter kept {} of {} slots ({} bookings, {} partial blocks, buffer {}m)",
        available.len(),
        slots.len(),
        occupied.len(),
        blocked.len(),
        buffer_minutes
    );

    Ok(available)
}
