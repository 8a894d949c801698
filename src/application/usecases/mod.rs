pub mod availability;
pub mod bookings;
pub mod coupons;
pub mod settlements;
pub mod trips;
