pub mod availability;
pub mod bookings;
pub mod cars;
pub mod coupons;
pub mod push_tokens;
pub mod users;
