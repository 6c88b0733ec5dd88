use crate::domain::entities::Room;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Rooms in storage order
    async fn list_rooms(&self) -> DomainResult<Vec<Room>>;

    async fn get_room(&self, id: &str) -> DomainResult<Option<Room>>;

    /// Store a new room; the returned room carries the allocated id
    async fn create_room(&self, room: Room) -> DomainResult<Room>;

    /// Replace a stored room, keyed by `room.id`
    async fn update_room(&self, room: &Room) -> DomainResult<()>;

    async fn delete_room(&self, id: &str) -> DomainResult<()>;
}
