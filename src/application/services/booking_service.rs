use crate::domain::entities::{
    parse_date, Booking, BookingStatus, CreateBookingRequest, PriceSnapshot, Room, RoomStatus,
    StayInterval, UpdateBookingRequest,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::booking_repository::BookingRepository;
use crate::domain::ports::price_rule_repository::PriceRuleRepository;
use crate::domain::ports::room_repository::RoomRepository;
use crate::domain::services::{
    applicable_rules, find_conflict, resolve_stay_total, room_status_after, validate_transition,
    RuleSelection,
};
use crate::infrastructure::observability;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct BookingService {
    booking_repo: Arc<dyn BookingRepository>,
    room_repo: Arc<dyn RoomRepository>,
    rule_repo: Arc<dyn PriceRuleRepository>,
    /// Serializes availability check and write so two requests cannot both win a room.
    write_lock: Arc<Mutex<()>>,
}

fn required_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidInput(
            "Guest name is required".to_string(),
        ));
    }
    Ok(name.to_string())
}

impl BookingService {
    pub fn new(
        booking_repo: Arc<dyn BookingRepository>,
        room_repo: Arc<dyn RoomRepository>,
        rule_repo: Arc<dyn PriceRuleRepository>,
    ) -> Self {
        Self {
            booking_repo,
            room_repo,
            rule_repo,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn list_bookings(&self) -> DomainResult<Vec<Booking>> {
        self.booking_repo.list_bookings().await
    }

    pub async fn get_booking(&self, id: &str) -> DomainResult<Booking> {
        self.booking_repo
            .get_booking(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Booking {} not found", id)))
    }

    async fn find_room(&self, room_id: &str) -> DomainResult<Room> {
        self.room_repo
            .get_room(room_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Room {} not found", room_id)))
    }

    async fn bookable_room(&self, room_id: &str) -> DomainResult<Room> {
        let room = self.find_room(room_id).await?;
        if room.status == RoomStatus::OutOfService {
            return Err(DomainError::Conflict(format!(
                "Room {} is out of service",
                room.number
            )));
        }
        Ok(room)
    }

    async fn ensure_free(
        &self,
        room: &Room,
        stay: &StayInterval,
        exclude: Option<&str>,
    ) -> DomainResult<()> {
        let bookings = self.booking_repo.list_bookings().await?;
        if let Some(existing) = find_conflict(&room.id, &bookings, stay, exclude) {
            observability::record_booking_conflict();
            tracing::warn!(
                "Room {} already booked by {} from {} to {}",
                room.id,
                existing.id,
                existing.check_in,
                existing.check_out
            );
            return Err(DomainError::Conflict(format!(
                "Room {} is not available for the selected dates",
                room.number
            )));
        }
        Ok(())
    }

    async fn price(
        &self,
        room: &Room,
        stay: &StayInterval,
        selected_rule_ids: &[String],
    ) -> DomainResult<PriceSnapshot> {
        let rules = self.rule_repo.list_price_rules().await?;
        let candidates = applicable_rules(&room.id, &rules, stay);
        let selection = RuleSelection::from_ids(selected_rule_ids.to_vec());
        let breakdown = resolve_stay_total(room.base_price, &candidates, &selection, stay)?;
        observability::record_price_resolution("booking");

        Ok(PriceSnapshot {
            base_price: breakdown.base_price,
            price_per_night: breakdown.price_per_night,
            nights: breakdown.nights,
            total_price: breakdown.total_price,
        })
    }

    /// Set a room's status, leaving out-of-service rooms untouched.
    async fn set_room_status(&self, room_id: &str, status: RoomStatus) -> DomainResult<()> {
        let Some(mut room) = self.room_repo.get_room(room_id).await? else {
            tracing::warn!("Room {} referenced by a booking no longer exists", room_id);
            return Ok(());
        };
        if room.status == RoomStatus::OutOfService || room.status == status {
            return Ok(());
        }
        room.status = status;
        self.room_repo.update_room(&room).await
    }

    pub async fn create_booking(&self, request: CreateBookingRequest) -> DomainResult<Booking> {
        let guest_name = required_name(&request.guest_name)?;
        let stay = StayInterval::parse(&request.check_in, &request.check_out)?;

        let _guard = self.write_lock.lock().await;

        let room = self.bookable_room(&request.room_id).await?;
        self.ensure_free(&room, &stay, None).await?;

        let snapshot = match request.supplied_snapshot() {
            Some(snapshot) => snapshot,
            None => self.price(&room, &stay, &request.selected_rule_ids).await?,
        };

        let mut booking = Booking {
            id: String::new(),
            room_id: room.id.clone(),
            guest_name,
            phone: request.phone.trim().to_string(),
            check_in: stay.check_in,
            check_out: stay.check_out,
            status: BookingStatus::Active,
            base_price: 0.0,
            price_per_night: 0.0,
            nights: 0,
            total_price: 0.0,
            selected_rule_ids: request.selected_rule_ids,
            notes: request.notes,
        };
        booking.set_price_snapshot(snapshot);

        let booking = self.booking_repo.create_booking(booking).await?;
        self.set_room_status(&room.id, RoomStatus::Occupied).await?;

        observability::record_booking_created();
        tracing::info!(
            "Booking created: id={}, room={}, {} nights, total={}",
            booking.id,
            booking.room_id,
            booking.nights,
            booking.total_price
        );
        Ok(booking)
    }

    pub async fn update_booking(
        &self,
        id: &str,
        request: UpdateBookingRequest,
    ) -> DomainResult<Booking> {
        let _guard = self.write_lock.lock().await;

        let mut booking = self.get_booking(id).await?;
        let previous = booking.clone();

        let status = request.status.unwrap_or(previous.status);
        validate_transition(previous.status, status)?;
        booking.status = status;

        if let Some(guest_name) = &request.guest_name {
            booking.guest_name = required_name(guest_name)?;
        }
        if let Some(phone) = &request.phone {
            booking.phone = phone.trim().to_string();
        }
        if let Some(notes) = &request.notes {
            booking.notes = notes.clone();
        }
        if let Some(room_id) = &request.room_id {
            booking.room_id = room_id.trim().to_string();
        }
        if let Some(ids) = &request.selected_rule_ids {
            booking.selected_rule_ids = ids.clone();
        }

        let check_in = match &request.check_in {
            Some(value) => parse_date(value)?,
            None => previous.check_in,
        };
        let check_out = match &request.check_out {
            Some(value) => parse_date(value)?,
            None => previous.check_out,
        };
        let stay = StayInterval::new(check_in, check_out)?;
        booking.check_in = stay.check_in;
        booking.check_out = stay.check_out;

        let room_changed = booking.room_id != previous.room_id;
        let dates_changed = stay != previous.stay();
        let rules_changed = booking.selected_rule_ids != previous.selected_rule_ids;

        if room_changed || dates_changed || rules_changed {
            let room = if booking.is_active() {
                self.bookable_room(&booking.room_id).await?
            } else {
                self.find_room(&booking.room_id).await?
            };
            if booking.is_active() && (room_changed || dates_changed) {
                self.ensure_free(&room, &stay, Some(&booking.id)).await?;
            }
            if request.supplied_snapshot().is_none() {
                let snapshot = self.price(&room, &stay, &booking.selected_rule_ids).await?;
                booking.set_price_snapshot(snapshot);
            }
        }
        if let Some(snapshot) = request.supplied_snapshot() {
            booking.set_price_snapshot(snapshot);
        }

        self.booking_repo.update_booking(&booking).await?;

        if room_changed && previous.is_active() {
            self.set_room_status(&previous.room_id, RoomStatus::Empty)
                .await?;
            if booking.is_active() {
                self.set_room_status(&booking.room_id, RoomStatus::Occupied)
                    .await?;
            }
        }
        if status != previous.status {
            // Only the room the booking held before this update changes hands
            if let Some(room_status) = room_status_after(status) {
                self.set_room_status(&previous.room_id, room_status).await?;
            }
            tracing::info!(
                "Booking {} status {} -> {}",
                booking.id,
                previous.status,
                status
            );
        }

        tracing::info!("Booking updated: id={}", booking.id);
        Ok(booking)
    }
}
