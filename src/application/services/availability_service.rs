use crate::domain::errors::DomainResult;
use crate::domain::ports::booking_repository::BookingRepository;
use crate::domain::ports::price_rule_repository::PriceRuleRepository;
use crate::domain::ports::room_repository::RoomRepository;
use crate::domain::services::{find_available_rooms, AvailabilityQuery, AvailableRoom};
use crate::infrastructure::observability;
use std::sync::Arc;

#[derive(Clone)]
pub struct AvailabilityService {
    room_repo: Arc<dyn RoomRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    rule_repo: Arc<dyn PriceRuleRepository>,
}

impl AvailabilityService {
    pub fn new(
        room_repo: Arc<dyn RoomRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        rule_repo: Arc<dyn PriceRuleRepository>,
    ) -> Self {
        Self {
            room_repo,
            booking_repo,
            rule_repo,
        }
    }

    /// Rooms free for the whole stay and large enough for the party, priced.
    pub async fn search(&self, query: &AvailabilityQuery) -> DomainResult<Vec<AvailableRoom>> {
        let (rooms, bookings, rules) = tokio::try_join!(
            self.room_repo.list_rooms(),
            self.booking_repo.list_bookings(),
            self.rule_repo.list_price_rules()
        )?;

        let available = find_available_rooms(&rooms, &bookings, &rules, query)?;

        observability::record_availability_query(available.len());
        tracing::debug!(
            "Availability {} to {} for {} guests: {} of {} rooms",
            query.stay.check_in,
            query.stay.check_out,
            query.guest_count,
            available.len(),
            rooms.len()
        );
        Ok(available)
    }
}
