use crate::domain::entities::{Booking, PriceRule, Room, StayInterval};
use chrono::NaiveDate;

/// Three-way conflict test between an existing booking `[b_start, b_end)` and a
/// requested stay `[r_start, r_end)`:
/// the booking starts inside the request, ends inside it, or surrounds it.
pub fn booking_conflicts(booking: &StayInterval, request: &StayInterval) -> bool {
    let (b_start, b_end) = (booking.check_in, booking.check_out);
    let (r_start, r_end) = (request.check_in, request.check_out);

    (b_start >= r_start && b_start < r_end)
        || (b_end > r_start && b_end <= r_end)
        || (b_start <= r_start && b_end >= r_end)
}

/// Same disjunction on closed intervals, used to decide whether a rule is offered
/// as a candidate for a stay at all.
pub fn rule_overlaps(
    rule_start: NaiveDate,
    rule_end: NaiveDate,
    request_start: NaiveDate,
    request_end: NaiveDate,
) -> bool {
    (rule_start >= request_start && rule_start <= request_end)
        || (rule_end >= request_start && rule_end <= request_end)
        || (rule_start <= request_start && rule_end >= request_end)
}

/// Capacity and service-status gate applied before any overlap check.
pub fn is_candidate(room: &Room, guest_count: u32) -> bool {
    room.capacity >= guest_count && room.is_in_service()
}

/// First active booking of `room_id` that conflicts with `request`.
/// `exclude` skips one booking id, used when re-validating an edited booking.
pub fn find_conflict<'a>(
    room_id: &str,
    bookings: &'a [Booking],
    request: &StayInterval,
    exclude: Option<&str>,
) -> Option<&'a Booking> {
    bookings
        .iter()
        .filter(|b| b.room_id == room_id && b.is_active())
        .filter(|b| exclude.map_or(true, |id| b.id != id))
        .find(|b| booking_conflicts(&b.stay(), request))
}

pub fn is_available(room: &Room, bookings: &[Booking], request: &StayInterval) -> bool {
    find_conflict(&room.id, bookings, request, None).is_none()
}

/// Rules scoped to `room_id` (or to every room) whose validity overlaps the stay,
/// in their original order.
pub fn applicable_rules(room_id: &str, rules: &[PriceRule], stay: &StayInterval) -> Vec<PriceRule> {
    rules
        .iter()
        .filter(|rule| rule.room_id.includes(room_id))
        .filter(|rule| rule_overlaps(rule.start_date, rule.end_date, stay.check_in, stay.check_out))
        .cloned()
        .collect()
}
