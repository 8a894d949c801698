pub mod availability;
pub mod bookings;
pub mod coupons;
pub mod enums;
pub mod payments;
