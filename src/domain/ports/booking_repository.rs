use crate::domain::entities::Booking;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list_bookings(&self) -> DomainResult<Vec<Booking>>;

    async fn get_booking(&self, id: &str) -> DomainResult<Option<Booking>>;

    /// Store a new booking; the returned booking carries the allocated id
    async fn create_booking(&self, booking: Booking) -> DomainResult<Booking>;

    async fn update_booking(&self, booking: &Booking) -> DomainResult<()>;
}
