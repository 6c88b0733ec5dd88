use crate::domain::errors::DomainResult;
use crate::domain::ports::booking_repository::BookingRepository;
use crate::domain::ports::room_repository::RoomRepository;
use crate::domain::services::{build_report, OccupancyReport, ReportPeriod};
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReportService {
    room_repo: Arc<dyn RoomRepository>,
    booking_repo: Arc<dyn BookingRepository>,
}

impl ReportService {
    pub fn new(
        room_repo: Arc<dyn RoomRepository>,
        booking_repo: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            room_repo,
            booking_repo,
        }
    }

    pub async fn report(&self, period: ReportPeriod, date: NaiveDate) -> DomainResult<OccupancyReport> {
        let (rooms, bookings) = tokio::try_join!(
            self.room_repo.list_rooms(),
            self.booking_repo.list_bookings()
        )?;
        build_report(period, date, &rooms, &bookings)
    }
}
