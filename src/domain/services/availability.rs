use super::overlap_filter::{applicable_rules, is_available, is_candidate};
use super::price_resolver::{resolve_stay_total, RuleSelection};
use crate::domain::entities::{Booking, PriceRule, Room, StayInterval};
use crate::domain::errors::{DomainError, DomainResult};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityQuery {
    pub stay: StayInterval,
    pub guest_count: u32,
    pub selection: RuleSelection,
}

impl AvailabilityQuery {
    /// Validate raw request values. `rules` is an optional comma-separated id list.
    pub fn parse(start: &str, end: &str, guests: &str, rules: Option<&str>) -> DomainResult<Self> {
        let stay = StayInterval::parse(start, end)?;

        let guest_count: i64 = guests.trim().parse().map_err(|_| {
            DomainError::InvalidInput(format!("invalid guest count: {}", guests))
        })?;
        if guest_count <= 0 {
            return Err(DomainError::InvalidInput(
                "guest count must be positive".to_string(),
            ));
        }
        let guest_count = u32::try_from(guest_count).map_err(|_| {
            DomainError::InvalidInput(format!("guest count too large: {}", guest_count))
        })?;

        Ok(Self {
            stay,
            guest_count,
            selection: rules.map(RuleSelection::parse_csv).unwrap_or_default(),
        })
    }
}

/// A free room enriched with its price for the queried stay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableRoom {
    #[serde(flatten)]
    pub room: Room,
    pub nights: i64,
    pub price_per_night: f64,
    pub total_price: f64,
    pub applicable_rules: Vec<PriceRule>,
}

/// Rooms that can host the query, in room order, each priced over the stay.
pub fn find_available_rooms(
    rooms: &[Room],
    bookings: &[Booking],
    rules: &[PriceRule],
    query: &AvailabilityQuery,
) -> DomainResult<Vec<AvailableRoom>> {
    let mut available = Vec::new();

    for room in rooms {
        if !is_candidate(room, query.guest_count) {
            continue;
        }
        if !is_available(room, bookings, &query.stay) {
            continue;
        }

        let candidates = applicable_rules(&room.id, rules, &query.stay);
        let price = resolve_stay_total(room.base_price, &candidates, &query.selection, &query.stay)?;

        available.push(AvailableRoom {
            room: room.clone(),
            nights: price.nights,
            price_per_night: price.price_per_night,
            total_price: price.total_price,
            applicable_rules: candidates,
        });
    }

    Ok(available)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{BookingStatus, PriceType, RoomStatus, RoomType, RuleScope};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn room(id: &str, capacity: u32, base_price: f64, status: RoomStatus) -> Room {
        Room {
            id: id.to_string(),
            number: format!("10{}", id),
            room_type: RoomType::Double,
            capacity,
            base_price,
            status,
        }
    }

    fn active_booking(room_id: &str, start: &str, end: &str) -> Booking {
        Booking {
            id: "b1".to_string(),
            room_id: room_id.to_string(),
            guest_name: "Ada".to_string(),
            phone: String::new(),
            check_in: date(start),
            check_out: date(end),
            status: BookingStatus::Active,
            base_price: 100.0,
            price_per_night: 100.0,
            nights: 3,
            total_price: 300.0,
            selected_rule_ids: vec![],
            notes: String::new(),
        }
    }

    fn query(guests: &str, rules: Option<&str>) -> AvailabilityQuery {
        AvailabilityQuery::parse("2024-06-01", "2024-06-04", guests, rules).unwrap()
    }

    #[test]
    fn test_empty_hotel_room_is_available_at_base_price() {
        let rooms = vec![room("1", 2, 100.0, RoomStatus::Empty)];
        let result = find_available_rooms(&rooms, &[], &[], &query("2", None)).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].nights, 3);
        assert_eq!(result[0].price_per_night, 100.0);
        assert_eq!(result[0].total_price, 300.0);
        assert!(result[0].applicable_rules.is_empty());
    }

    #[test]
    fn test_overlapping_active_booking_rejects_room() {
        let rooms = vec![room("1", 2, 100.0, RoomStatus::Empty)];
        let bookings = vec![active_booking("1", "2024-06-02", "2024-06-05")];
        let result = find_available_rooms(&rooms, &bookings, &[], &query("2", None)).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_out_of_service_and_small_rooms_are_never_offered() {
        let rooms = vec![
            room("1", 4, 100.0, RoomStatus::OutOfService),
            room("2", 1, 80.0, RoomStatus::Empty),
            room("3", 3, 120.0, RoomStatus::Occupied),
        ];
        let result = find_available_rooms(&rooms, &[], &[], &query("2", None)).unwrap();
        let ids: Vec<&str> = result.iter().map(|r| r.room.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn test_rules_are_scoped_and_applied_per_room() {
        let rooms = vec![
            room("1", 2, 100.0, RoomStatus::Empty),
            room("2", 2, 200.0, RoomStatus::Empty),
        ];
        let rules = vec![
            PriceRule {
                id: "1".to_string(),
                room_id: RuleScope::Room("2".to_string()),
                start_date: date("2024-06-01"),
                end_date: date("2024-06-30"),
                price_type: PriceType::Percentage,
                price_value: -10.0,
                name: "June promo".to_string(),
            },
            PriceRule {
                id: "2".to_string(),
                room_id: RuleScope::AllRooms,
                start_date: date("2024-12-24"),
                end_date: date("2024-12-26"),
                price_type: PriceType::Fixed,
                price_value: 500.0,
                name: "Christmas".to_string(),
            },
        ];

        let result = find_available_rooms(&rooms, &[], &rules, &query("1", None)).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].total_price, 300.0);
        assert!(result[0].applicable_rules.is_empty());
        assert!((result[1].price_per_night - 180.0).abs() < 1e-9);
        assert_eq!(result[1].applicable_rules.len(), 1);
    }

    #[test]
    fn test_explicit_selection_limits_applied_rules() {
        let rooms = vec![room("1", 2, 100.0, RoomStatus::Empty)];
        let rules = vec![PriceRule {
            id: "5".to_string(),
            room_id: RuleScope::AllRooms,
            start_date: date("2024-06-01"),
            end_date: date("2024-06-30"),
            price_type: PriceType::Fixed,
            price_value: 150.0,
            name: String::new(),
        }];

        let selected = find_available_rooms(&rooms, &[], &rules, &query("1", Some("5"))).unwrap();
        assert_eq!(selected[0].price_per_night, 150.0);

        let other = find_available_rooms(&rooms, &[], &rules, &query("1", Some("6"))).unwrap();
        assert_eq!(other[0].price_per_night, 100.0);
        // still listed as a candidate for the user to pick
        assert_eq!(other[0].applicable_rules.len(), 1);
    }

    #[test]
    fn test_query_validation() {
        assert!(matches!(
            AvailabilityQuery::parse("2024-06-01", "2024-06-04", "0", None),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            AvailabilityQuery::parse("2024-06-01", "2024-06-04", "two", None),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            AvailabilityQuery::parse("2024-06-04", "2024-06-01", "2", None),
            Err(DomainError::InvalidInterval(_))
        ));
        assert!(matches!(
            AvailabilityQuery::parse("not-a-date", "2024-06-01", "2", None),
            Err(DomainError::InvalidInput(_))
        ));
    }
}
