use super::codec;
use crate::domain::entities::{Booking, PriceRule, Room};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::booking_repository::BookingRepository;
use crate::domain::ports::price_rule_repository::PriceRuleRepository;
use crate::domain::ports::room_repository::RoomRepository;
use crate::domain::ports::sheet_store::{Row, Sheet, SheetStore};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

type Decoder<T> = fn(&Row) -> DomainResult<Option<T>>;

/// Entity repositories over any row store.
///
/// Ids are sequential numbers allocated as one more than the largest numeric
/// id in the sheet. Deleted entities leave a blank row behind.
#[derive(Clone)]
pub struct SheetRepository {
    store: Arc<dyn SheetStore>,
    write_lock: Arc<Mutex<()>>,
}

impl SheetRepository {
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Make sure every sheet carries its full header row.
    pub async fn initialize(&self) -> DomainResult<()> {
        for sheet in [Sheet::Rooms, Sheet::Bookings, Sheet::Prices] {
            self.store.ensure_header(sheet).await?;
        }
        Ok(())
    }

    async fn load<T>(&self, sheet: Sheet, decode: Decoder<T>) -> DomainResult<Vec<T>> {
        let rows = self.store.get_rows(sheet).await?;
        let mut entities = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            match decode(row) {
                Ok(Some(entity)) => entities.push(entity),
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!("Skipping {} row {}: {}", sheet, index, err);
                }
            }
        }
        Ok(entities)
    }

    /// Position of the row carrying `id`.
    async fn locate(&self, sheet: Sheet, id: &str) -> DomainResult<Option<usize>> {
        let rows = self.store.get_rows(sheet).await?;
        Ok(rows
            .iter()
            .position(|row| row.first().map(|cell| cell.trim()) == Some(id)))
    }

    async fn next_id(&self, sheet: Sheet) -> DomainResult<String> {
        let rows = self.store.get_rows(sheet).await?;
        let max = rows.iter().filter_map(codec::numeric_id).max().unwrap_or(0);
        Ok((max + 1).to_string())
    }

    /// Allocate an id and append the encoded entity under the write lock.
    async fn insert<T>(
        &self,
        sheet: Sheet,
        mut entity: T,
        set_id: fn(&mut T, String),
        encode: fn(&T) -> Row,
    ) -> DomainResult<T> {
        let _guard = self.write_lock.lock().await;
        let id = self.next_id(sheet).await?;
        set_id(&mut entity, id.clone());
        self.store.append_row(sheet, encode(&entity)).await?;
        tracing::info!("Created {} row id={}", sheet, id);
        Ok(entity)
    }

    async fn replace(&self, sheet: Sheet, id: &str, row: Row) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;
        let index = self
            .locate(sheet, id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("{} {} not found", sheet, id)))?;
        self.store.update_row(sheet, index, row).await?;
        tracing::debug!("Updated {} row id={}", sheet, id);
        Ok(())
    }

    async fn remove(&self, sheet: Sheet, id: &str) -> DomainResult<()> {
        let _guard = self.write_lock.lock().await;
        let index = self
            .locate(sheet, id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("{} {} not found", sheet, id)))?;
        self.store.clear_row(sheet, index).await?;
        tracing::info!("Cleared {} row id={}", sheet, id);
        Ok(())
    }
}

#[async_trait]
impl RoomRepository for SheetRepository {
    async fn list_rooms(&self) -> DomainResult<Vec<Room>> {
        self.load(Sheet::Rooms, codec::room_from_row).await
    }

    async fn get_room(&self, id: &str) -> DomainResult<Option<Room>> {
        let rooms = self.list_rooms().await?;
        Ok(rooms.into_iter().find(|room| room.id == id))
    }

    async fn create_room(&self, room: Room) -> DomainResult<Room> {
        self.insert(Sheet::Rooms, room, |r, id| r.id = id, codec::room_to_row)
            .await
    }

    async fn update_room(&self, room: &Room) -> DomainResult<()> {
        self.replace(Sheet::Rooms, &room.id, codec::room_to_row(room))
            .await
    }

    async fn delete_room(&self, id: &str) -> DomainResult<()> {
        self.remove(Sheet::Rooms, id).await
    }
}

#[async_trait]
impl BookingRepository for SheetRepository {
    async fn list_bookings(&self) -> DomainResult<Vec<Booking>> {
        self.load(Sheet::Bookings, codec::booking_from_row).await
    }

    async fn get_booking(&self, id: &str) -> DomainResult<Option<Booking>> {
        let bookings = self.list_bookings().await?;
        Ok(bookings.into_iter().find(|booking| booking.id == id))
    }

    async fn create_booking(&self, booking: Booking) -> DomainResult<Booking> {
        self.insert(
            Sheet::Bookings,
            booking,
            |b, id| b.id = id,
            codec::booking_to_row,
        )
        .await
    }

    async fn update_booking(&self, booking: &Booking) -> DomainResult<()> {
        self.replace(Sheet::Bookings, &booking.id, codec::booking_to_row(booking))
            .await
    }
}

#[async_trait]
impl PriceRuleRepository for SheetRepository {
    async fn list_price_rules(&self) -> DomainResult<Vec<PriceRule>> {
        self.load(Sheet::Prices, codec::price_rule_from_row).await
    }

    async fn get_price_rule(&self, id: &str) -> DomainResult<Option<PriceRule>> {
        let rules = self.list_price_rules().await?;
        Ok(rules.into_iter().find(|rule| rule.id == id))
    }

    async fn create_price_rule(&self, rule: PriceRule) -> DomainResult<PriceRule> {
        self.insert(
            Sheet::Prices,
            rule,
            |r, id| r.id = id,
            codec::price_rule_to_row,
        )
        .await
    }

    async fn update_price_rule(&self, rule: &PriceRule) -> DomainResult<()> {
        self.replace(Sheet::Prices, &rule.id, codec::price_rule_to_row(rule))
            .await
    }

    async fn delete_price_rule(&self, id: &str) -> DomainResult<()> {
        self.remove(Sheet::Prices, id).await
    }
}
