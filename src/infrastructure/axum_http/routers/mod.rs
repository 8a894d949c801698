pub mod admin;
pub mod bookings;
pub mod coupons;
pub mod host_trips;
pub mod search;
