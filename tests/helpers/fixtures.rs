use chrono::NaiveDate;
use hotelier::domain::entities::*;
use hotelier::infrastructure::http::middleware::AppState;

pub const EPSILON: f64 = 1e-9;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {}, got {}",
        expected,
        actual
    );
}

pub async fn create_room(
    state: &AppState,
    number: &str,
    room_type: RoomType,
    capacity: u32,
    base_price: f64,
) -> Room {
    state
        .room_service
        .create_room(CreateRoomRequest {
            number: number.to_string(),
            room_type,
            capacity,
            base_price,
            status: None,
        })
        .await
        .expect("Failed to create room")
}

pub async fn create_rule(
    state: &AppState,
    room_id: &str,
    start: &str,
    end: &str,
    price_type: PriceType,
    price_value: f64,
) -> PriceRule {
    state
        .price_rule_service
        .create_rule(PriceRuleRequest {
            room_id: room_id.to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            price_type,
            price_value,
            name: format!("{} {}", price_type, price_value),
        })
        .await
        .expect("Failed to create pricing rule")
}

pub fn booking_request(room_id: &str, check_in: &str, check_out: &str) -> CreateBookingRequest {
    CreateBookingRequest {
        room_id: room_id.to_string(),
        guest_name: "Ada Lovelace".to_string(),
        phone: "+44 20 7946 0000".to_string(),
        check_in: check_in.to_string(),
        check_out: check_out.to_string(),
        selected_rule_ids: vec![],
        notes: String::new(),
        base_price: None,
        price_per_night: None,
        nights: None,
        total_price: None,
    }
}

pub async fn create_booking(
    state: &AppState,
    room_id: &str,
    check_in: &str,
    check_out: &str,
) -> Booking {
    state
        .booking_service
        .create_booking(booking_request(room_id, check_in, check_out))
        .await
        .expect("Failed to create booking")
}
