pub mod auth;
pub mod availability;
pub mod bookings;
pub mod price_rules;
pub mod reports;
pub mod rooms;
