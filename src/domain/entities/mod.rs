pub mod cars;
pub mod coupons;
pub mod reservation_photos;
pub mod reservations;
pub mod users;
