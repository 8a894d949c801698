pub mod s3;
pub mod trip_photos;
