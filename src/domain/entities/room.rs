use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Single,
    Double,
    Family,
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomType::Single => write!(f, "single"),
            RoomType::Double => write!(f, "double"),
            RoomType::Family => write!(f, "family"),
        }
    }
}

impl std::str::FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(RoomType::Single),
            "double" => Ok(RoomType::Double),
            "family" => Ok(RoomType::Family),
            _ => Err(format!("Invalid room type: {}", s)),
        }
    }
}

/// Stored occupancy status. Kept in sync by booking flows, see `RoomService::reconcile_statuses`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomStatus {
    Empty,
    Occupied,
    OutOfService,
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomStatus::Empty => write!(f, "empty"),
            RoomStatus::Occupied => write!(f, "occupied"),
            RoomStatus::OutOfService => write!(f, "out-of-service"),
        }
    }
}

impl std::str::FromStr for RoomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "empty" => Ok(RoomStatus::Empty),
            "occupied" => Ok(RoomStatus::Occupied),
            "out-of-service" => Ok(RoomStatus::OutOfService),
            _ => Err(format!("Invalid room status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub capacity: u32,
    pub base_price: f64,
    pub status: RoomStatus,
}

impl Room {
    /// Build a room that has not been stored yet; the repository assigns the id.
    pub fn new(
        number: String,
        room_type: RoomType,
        capacity: u32,
        base_price: f64,
        status: RoomStatus,
    ) -> Self {
        Self {
            id: String::new(),
            number,
            room_type,
            capacity,
            base_price,
            status,
        }
    }

    pub fn is_in_service(&self) -> bool {
        matches!(self.status, RoomStatus::Empty | RoomStatus::Occupied)
    }
}

/// DTO for creating a room
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub capacity: u32,
    pub base_price: f64,
    pub status: Option<RoomStatus>,
}

/// DTO for replacing a room's fields
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub capacity: u32,
    pub base_price: f64,
    pub status: RoomStatus,
}
