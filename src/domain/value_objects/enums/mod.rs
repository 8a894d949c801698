pub mod booking_statuses;
pub mod discount_types;
pub mod photo_types;
pub mod roles;
pub mod settlement_statuses;
pub mod user_statuses;
