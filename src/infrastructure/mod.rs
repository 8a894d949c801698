pub mod axum_http;
pub mod notify;
pub mod payments;
pub mod postgres;
pub mod storages;
