//! Mapping between sheet rows and domain entities.
//!
//! Decoders return `Ok(None)` for blank (cleared) rows. Legacy booking rows may
//! stop after the status column; their price snapshot is rebuilt from the stored
//! total and the stay length.

use crate::domain::entities::*;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::sheet_store::{Row, Sheet};

fn cell(row: &Row, index: usize) -> &str {
    row.get(index).map(|s| s.trim()).unwrap_or("")
}

fn is_blank(row: &Row) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

fn malformed(sheet: Sheet, row: &Row, what: &str) -> DomainError {
    DomainError::Storage(format!(
        "malformed {} row {}: {}",
        sheet,
        cell(row, 0),
        what
    ))
}

fn parse_f64(sheet: Sheet, row: &Row, index: usize, what: &str) -> DomainResult<f64> {
    cell(row, index)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| malformed(sheet, row, what))
}

fn optional_f64(row: &Row, index: usize) -> Option<f64> {
    cell(row, index).parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_row_date(sheet: Sheet, row: &Row, index: usize, what: &str) -> DomainResult<chrono::NaiveDate> {
    parse_date(cell(row, index)).map_err(|_| malformed(sheet, row, what))
}

/// Numeric id of a row, used for next-id allocation.
pub fn numeric_id(row: &Row) -> Option<u64> {
    cell(row, 0).parse().ok()
}

pub fn room_to_row(room: &Room) -> Row {
    vec![
        room.id.clone(),
        room.number.clone(),
        room.room_type.to_string(),
        room.capacity.to_string(),
        room.base_price.to_string(),
        room.status.to_string(),
    ]
}

pub fn room_from_row(row: &Row) -> DomainResult<Option<Room>> {
    let sheet = Sheet::Rooms;
    if is_blank(row) {
        return Ok(None);
    }

    Ok(Some(Room {
        id: cell(row, 0).to_string(),
        number: cell(row, 1).to_string(),
        room_type: cell(row, 2)
            .parse()
            .map_err(|_| malformed(sheet, row, "type"))?,
        capacity: cell(row, 3)
            .parse()
            .map_err(|_| malformed(sheet, row, "capacity"))?,
        base_price: parse_f64(sheet, row, 4, "base price")?,
        status: cell(row, 5)
            .parse()
            .map_err(|_| malformed(sheet, row, "status"))?,
    }))
}

pub fn booking_to_row(booking: &Booking) -> Row {
    vec![
        booking.id.clone(),
        booking.room_id.clone(),
        booking.guest_name.clone(),
        booking.phone.clone(),
        booking.check_in.format("%Y-%m-%d").to_string(),
        booking.check_out.format("%Y-%m-%d").to_string(),
        booking.total_price.to_string(),
        booking.status.to_string(),
        booking.base_price.to_string(),
        booking.price_per_night.to_string(),
        booking.nights.to_string(),
        booking.selected_rule_ids.join(","),
        booking.notes.clone(),
    ]
}

pub fn booking_from_row(row: &Row) -> DomainResult<Option<Booking>> {
    let sheet = Sheet::Bookings;
    if is_blank(row) {
        return Ok(None);
    }

    let check_in = parse_row_date(sheet, row, 4, "check in")?;
    let check_out = parse_row_date(sheet, row, 5, "check out")?;
    let total_price = parse_f64(sheet, row, 6, "total price")?;
    let status = cell(row, 7)
        .parse()
        .map_err(|_| malformed(sheet, row, "status"))?;

    let nights = cell(row, 10)
        .parse::<i64>()
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or_else(|| (check_out - check_in).num_days().max(1));
    let price_per_night = optional_f64(row, 9).unwrap_or(total_price / nights as f64);
    let base_price = optional_f64(row, 8).unwrap_or(price_per_night);

    let selected_rule_ids = cell(row, 11)
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    Ok(Some(Booking {
        id: cell(row, 0).to_string(),
        room_id: cell(row, 1).to_string(),
        guest_name: cell(row, 2).to_string(),
        phone: cell(row, 3).to_string(),
        check_in,
        check_out,
        status,
        base_price,
        price_per_night,
        nights,
        total_price,
        selected_rule_ids,
        notes: cell(row, 12).to_string(),
    }))
}

pub fn price_rule_to_row(rule: &PriceRule) -> Row {
    vec![
        rule.id.clone(),
        rule.room_id.to_string(),
        rule.start_date.format("%Y-%m-%d").to_string(),
        rule.end_date.format("%Y-%m-%d").to_string(),
        rule.price_type.to_string(),
        rule.price_value.to_string(),
        rule.name.clone(),
    ]
}

pub fn price_rule_from_row(row: &Row) -> DomainResult<Option<PriceRule>> {
    let sheet = Sheet::Prices;
    if is_blank(row) {
        return Ok(None);
    }

    let price_type = match cell(row, 4) {
        "" => PriceType::Fixed,
        value => value
            .parse()
            .map_err(|_| malformed(sheet, row, "price type"))?,
    };

    Ok(Some(PriceRule {
        id: cell(row, 0).to_string(),
        room_id: RuleScope::from(cell(row, 1).to_string()),
        start_date: parse_row_date(sheet, row, 2, "start date")?,
        end_date: parse_row_date(sheet, row, 3, "end date")?,
        price_type,
        price_value: parse_f64(sheet, row, 5, "price value")?,
        name: cell(row, 6).to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_room_row_round_trip() {
        let room = Room {
            id: "3".to_string(),
            number: "203".to_string(),
            room_type: RoomType::Family,
            capacity: 4,
            base_price: 149.5,
            status: RoomStatus::OutOfService,
        };
        let encoded = room_to_row(&room);
        assert_eq!(encoded[5], "out-of-service");
        assert_eq!(room_from_row(&encoded).unwrap(), Some(room));
    }

    #[test]
    fn test_blank_rows_decode_to_none() {
        assert_eq!(room_from_row(&row(&[])).unwrap(), None);
        assert_eq!(booking_from_row(&row(&["", "", ""])).unwrap(), None);
        assert_eq!(price_rule_from_row(&row(&[" "])).unwrap(), None);
    }

    #[test]
    fn test_booking_snapshot_survives_encoding() {
        let booking = Booking {
            id: "12".to_string(),
            room_id: "3".to_string(),
            guest_name: "Grace Hopper".to_string(),
            phone: "+1 555 0100".to_string(),
            check_in: date("2024-06-01"),
            check_out: date("2024-06-04"),
            status: BookingStatus::Active,
            base_price: 100.0,
            price_per_night: 100.33333333333333,
            nights: 3,
            total_price: 301.0,
            selected_rule_ids: vec!["4".to_string(), "2".to_string()],
            notes: "late arrival".to_string(),
        };
        let encoded = booking_to_row(&booking);
        assert_eq!(encoded.len(), Sheet::Bookings.width());
        assert_eq!(encoded[11], "4,2");
        assert_eq!(booking_from_row(&encoded).unwrap(), Some(booking));
    }

    #[test]
    fn test_legacy_booking_row_rebuilds_snapshot() {
        let legacy = row(&[
            "1", "2", "Alan", "", "2024-06-01", "2024-06-03", "240", "checked-out",
        ]);
        let booking = booking_from_row(&legacy).unwrap().unwrap();
        assert_eq!(booking.nights, 2);
        assert_eq!(booking.price_per_night, 120.0);
        assert_eq!(booking.base_price, 120.0);
        assert!(booking.selected_rule_ids.is_empty());
        assert_eq!(booking.status, BookingStatus::CheckedOut);
    }

    #[test]
    fn test_price_rule_defaults_to_fixed() {
        let rule = price_rule_from_row(&row(&["1", "all", "2024-12-24", "2024-12-26", "", "250"]))
            .unwrap()
            .unwrap();
        assert_eq!(rule.price_type, PriceType::Fixed);
        assert_eq!(rule.room_id, RuleScope::AllRooms);
        assert_eq!(rule.name, "");
    }

    #[test]
    fn test_malformed_rows_are_storage_errors() {
        let bad_capacity = row(&["1", "101", "single", "many", "80", "empty"]);
        assert!(matches!(
            room_from_row(&bad_capacity),
            Err(DomainError::Storage(_))
        ));

        let bad_value = row(&["1", "all", "2024-06-01", "2024-06-02", "percentage", "NaN"]);
        assert!(matches!(
            price_rule_from_row(&bad_value),
            Err(DomainError::Storage(_))
        ));
    }
}
