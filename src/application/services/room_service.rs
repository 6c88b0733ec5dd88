use crate::domain::entities::{CreateRoomRequest, Room, RoomStatus, UpdateRoomRequest};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::booking_repository::BookingRepository;
use crate::domain::ports::room_repository::RoomRepository;
use crate::domain::services::derive_room_status;
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct RoomService {
    room_repo: Arc<dyn RoomRepository>,
    booking_repo: Arc<dyn BookingRepository>,
}

fn validate_room(number: &str, capacity: u32, base_price: f64) -> DomainResult<()> {
    if number.trim().is_empty() {
        return Err(DomainError::InvalidInput(
            "Room number is required".to_string(),
        ));
    }
    if capacity == 0 {
        return Err(DomainError::InvalidInput(
            "Room capacity must be positive".to_string(),
        ));
    }
    if !base_price.is_finite() || base_price <= 0.0 {
        return Err(DomainError::InvalidInput(
            "Room base price must be positive".to_string(),
        ));
    }
    Ok(())
}

impl RoomService {
    pub fn new(
        room_repo: Arc<dyn RoomRepository>,
        booking_repo: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            room_repo,
            booking_repo,
        }
    }

    pub async fn list_rooms(&self) -> DomainResult<Vec<Room>> {
        self.room_repo.list_rooms().await
    }

    pub async fn get_room(&self, id: &str) -> DomainResult<Room> {
        self.room_repo
            .get_room(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Room {} not found", id)))
    }

    pub async fn create_room(&self, request: CreateRoomRequest) -> DomainResult<Room> {
        validate_room(&request.number, request.capacity, request.base_price)?;

        let room = Room::new(
            request.number.trim().to_string(),
            request.room_type,
            request.capacity,
            request.base_price,
            request.status.unwrap_or(RoomStatus::Empty),
        );
        let room = self.room_repo.create_room(room).await?;

        tracing::info!("Room created: id={}, number={}", room.id, room.number);
        Ok(room)
    }

    pub async fn update_room(&self, id: &str, request: UpdateRoomRequest) -> DomainResult<Room> {
        validate_room(&request.number, request.capacity, request.base_price)?;

        let mut room = self.get_room(id).await?;
        room.number = request.number.trim().to_string();
        room.room_type = request.room_type;
        room.capacity = request.capacity;
        room.base_price = request.base_price;
        room.status = request.status;

        self.room_repo.update_room(&room).await?;
        tracing::info!("Room updated: id={}", room.id);
        Ok(room)
    }

    /// Delete a room that no active booking references.
    pub async fn delete_room(&self, id: &str) -> DomainResult<()> {
        self.get_room(id).await?;

        let bookings = self.booking_repo.list_bookings().await?;
        if bookings.iter().any(|b| b.room_id == id && b.is_active()) {
            return Err(DomainError::Conflict(format!(
                "Room {} has active bookings",
                id
            )));
        }

        self.room_repo.delete_room(id).await?;
        tracing::info!("Room deleted: id={}", id);
        Ok(())
    }

    /// Re-derive every room's status from the active bookings covering `today`.
    /// Returns the rooms whose status changed.
    pub async fn reconcile_statuses(&self, today: NaiveDate) -> DomainResult<Vec<Room>> {
        let (rooms, bookings) = tokio::try_join!(
            self.room_repo.list_rooms(),
            self.booking_repo.list_bookings()
        )?;

        let mut changed = Vec::new();
        for mut room in rooms {
            let status = derive_room_status(&room, &bookings, today);
            if status == room.status {
                continue;
            }
            tracing::info!(
                "Reconciling room {} status {} -> {}",
                room.id,
                room.status,
                status
            );
            room.status = status;
            self.room_repo.update_room(&room).await?;
            changed.push(room);
        }

        Ok(changed)
    }
}
