pub mod booking_repository;
pub mod credential_provider;
pub mod price_rule_repository;
pub mod room_repository;
pub mod sheet_store;
