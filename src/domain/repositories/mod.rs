pub mod availability;
pub mod bookings;
pub mod cars;
pub mod coupons;
pub mod notifications;
pub mod payments;
pub mod push_tokens;
pub mod storage;
pub mod users;
