use crate::domain::entities::{Booking, BookingStatus, Room, RoomStatus};
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl std::str::FromStr for ReportPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(ReportPeriod::Daily),
            "weekly" => Ok(ReportPeriod::Weekly),
            "monthly" => Ok(ReportPeriod::Monthly),
            _ => Err(DomainError::InvalidInput(
                "Valid period is required (daily, weekly, or monthly)".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyOccupancy {
    pub date: NaiveDate,
    pub occupancy_rate: f64,
    pub occupied_rooms: usize,
    pub total_rooms: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyReport {
    pub total_rooms: usize,
    pub occupied_rooms: usize,
    pub empty_rooms: usize,
    pub out_of_service_rooms: usize,
    pub occupancy_rate: f64,
    pub daily_occupancy: Vec<DailyOccupancy>,
    pub report_type: ReportPeriod,
    pub report_date: NaiveDate,
}

fn rate(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Days covered by a report: the date itself, the week centred on it, or its month.
pub fn report_days(period: ReportPeriod, date: NaiveDate) -> DomainResult<Vec<NaiveDate>> {
    let out_of_range = || {
        DomainError::InvalidInput(format!("report date {} is out of range", date))
    };
    match period {
        ReportPeriod::Daily => Ok(vec![date]),
        ReportPeriod::Weekly => {
            let start = date
                .checked_sub_signed(Duration::days(3))
                .ok_or_else(out_of_range)?;
            (0..7)
                .map(|i| {
                    start
                        .checked_add_signed(Duration::days(i))
                        .ok_or_else(out_of_range)
                })
                .collect()
        }
        ReportPeriod::Monthly => {
            let mut day = date.with_day(1).unwrap_or(date);
            let mut days = Vec::with_capacity(31);
            while day.month() == date.month() {
                days.push(day);
                match day.succ_opt() {
                    Some(next) => day = next,
                    None => break,
                }
            }
            Ok(days)
        }
    }
}

/// Distinct rooms whose night of `day` is held by an active booking.
pub fn occupied_room_ids<'a>(bookings: &'a [Booking], day: NaiveDate) -> HashSet<&'a str> {
    bookings
        .iter()
        .filter(|b| b.is_active() && b.stay().covers_night(day))
        .map(|b| b.room_id.as_str())
        .collect()
}

/// Revenue earned on the night of `day`: each active or checked-out booking
/// holding that night contributes its average nightly rate.
pub fn revenue_on(bookings: &[Booking], day: NaiveDate) -> f64 {
    bookings
        .iter()
        .filter(|b| matches!(b.status, BookingStatus::Active | BookingStatus::CheckedOut))
        .filter(|b| b.stay().covers_night(day))
        .map(|b| {
            let nights = b.stay().nights().max(1);
            b.total_price / nights as f64
        })
        .sum()
}

pub fn build_report(
    period: ReportPeriod,
    date: NaiveDate,
    rooms: &[Room],
    bookings: &[Booking],
) -> DomainResult<OccupancyReport> {
    let total_rooms = rooms.len();
    let count = |status: RoomStatus| rooms.iter().filter(|r| r.status == status).count();
    let occupied_rooms = count(RoomStatus::Occupied);

    let daily_occupancy = report_days(period, date)?
        .into_iter()
        .map(|day| {
            let occupied = occupied_room_ids(bookings, day).len();
            DailyOccupancy {
                date: day,
                occupancy_rate: rate(occupied, total_rooms),
                occupied_rooms: occupied,
                total_rooms,
                revenue: revenue_on(bookings, day),
            }
        })
        .collect();

    Ok(OccupancyReport {
        total_rooms,
        occupied_rooms,
        empty_rooms: count(RoomStatus::Empty),
        out_of_service_rooms: count(RoomStatus::OutOfService),
        occupancy_rate: rate(occupied_rooms, total_rooms),
        daily_occupancy,
        report_type: period,
        report_date: date,
    })
}

/// Status a room should carry on `today` given its bookings.
/// Out-of-service is a manual state and is never derived away.
pub fn derive_room_status(room: &Room, bookings: &[Booking], today: NaiveDate) -> RoomStatus {
    if room.status == RoomStatus::OutOfService {
        return RoomStatus::OutOfService;
    }
    let occupied = bookings
        .iter()
        .any(|b| b.room_id == room.id && b.is_active() && b.stay().covers_night(today));
    if occupied {
        RoomStatus::Occupied
    } else {
        RoomStatus::Empty
    }
}
