use super::stay::StayInterval;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Active,
    CheckedOut,
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Active => write!(f, "active"),
            BookingStatus::CheckedOut => write!(f, "checked-out"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(BookingStatus::Active),
            "checked-out" => Ok(BookingStatus::CheckedOut),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

/// A reservation. The price fields are a snapshot taken when the booking was
/// priced and are never recomputed when rules change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub room_id: String,
    pub guest_name: String,
    pub phone: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: BookingStatus,
    pub base_price: f64,
    pub price_per_night: f64,
    pub nights: i64,
    pub total_price: f64,
    pub selected_rule_ids: Vec<String>,
    pub notes: String,
}

impl Booking {
    pub fn stay(&self) -> StayInterval {
        StayInterval {
            check_in: self.check_in,
            check_out: self.check_out,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Active
    }

    pub fn price_snapshot(&self) -> PriceSnapshot {
        PriceSnapshot {
            base_price: self.base_price,
            price_per_night: self.price_per_night,
            nights: self.nights,
            total_price: self.total_price,
        }
    }

    pub fn set_price_snapshot(&mut self, snapshot: PriceSnapshot) {
        self.base_price = snapshot.base_price;
        self.price_per_night = snapshot.price_per_night;
        self.nights = snapshot.nights;
        self.total_price = snapshot.total_price;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    pub base_price: f64,
    pub price_per_night: f64,
    pub nights: i64,
    pub total_price: f64,
}

/// DTO for creating a booking. A complete price snapshot may be supplied by the
/// caller (for example after the user confirmed a quote); otherwise it is computed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub room_id: String,
    pub guest_name: String,
    #[serde(default)]
    pub phone: String,
    pub check_in: String,
    pub check_out: String,
    #[serde(default)]
    pub selected_rule_ids: Vec<String>,
    #[serde(default)]
    pub notes: String,
    pub base_price: Option<f64>,
    pub price_per_night: Option<f64>,
    pub nights: Option<i64>,
    pub total_price: Option<f64>,
}

impl CreateBookingRequest {
    pub fn supplied_snapshot(&self) -> Option<PriceSnapshot> {
        complete_snapshot(
            self.base_price,
            self.price_per_night,
            self.nights,
            self.total_price,
        )
    }
}

/// DTO for updating a booking; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub room_id: Option<String>,
    pub guest_name: Option<String>,
    pub phone: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub status: Option<BookingStatus>,
    pub selected_rule_ids: Option<Vec<String>>,
    pub notes: Option<String>,
    pub base_price: Option<f64>,
    pub price_per_night: Option<f64>,
    pub nights: Option<i64>,
    pub total_price: Option<f64>,
}

impl UpdateBookingRequest {
    pub fn supplied_snapshot(&self) -> Option<PriceSnapshot> {
        complete_snapshot(
            self.base_price,
            self.price_per_night,
            self.nights,
            self.total_price,
        )
    }
}

fn complete_snapshot(
    base_price: Option<f64>,
    price_per_night: Option<f64>,
    nights: Option<i64>,
    total_price: Option<f64>,
) -> Option<PriceSnapshot> {
    match (base_price, price_per_night, nights, total_price) {
        (Some(base_price), Some(price_per_night), Some(nights), Some(total_price))
            if nights > 0 =>
        {
            Some(PriceSnapshot {
                base_price,
                price_per_night,
                nights,
                total_price,
            })
        }
        _ => None,
    }
}
