use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    response::IntoResponse,
    routing::put,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    application::{errors::AppError, usecases::trips::TripUseCase},
    auth::AuthUser,
    domain::{
        repositories::{bookings::BookingRepository, storage::PhotoStorageClient},
        value_objects::bookings::PhotoUpload,
    },
    infrastructure::{
        postgres::{postgres_connection::PgPoolSquad, repositories::bookings::BookingPostgres},
        storages::trip_photos::TripPhotoStorage,
    },
};

#[derive(Debug, Serialize)]
pub struct TripPhotosResponse {
    pub success: bool,
    pub message: String,
    pub photo_urls: Vec<String>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>, photo_storage: Arc<TripPhotoStorage>) -> Router {
    let booking_repository = BookingPostgres::new(Arc::clone(&db_pool));
    let usecase = TripUseCase::new(Arc::new(booking_repository), photo_storage);

    Router::new()
        .route("/bookings/:reservation_id/start", put(start_trip))
        .route("/bookings/:reservation_id/complete", put(complete_trip))
        .with_state(Arc::new(usecase))
}

pub async fn start_trip<B, S>(
    State(usecase): State<Arc<TripUseCase<B, S>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(reservation_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError>
where
    B: BookingRepository + Send + Sync + 'static,
    S: PhotoStorageClient + Send + Sync + 'static,
{
    let photos = read_trip_form(multipart).await?;
    let photo_urls = usecase.start_trip(user_id, reservation_id, photos).await?;

    Ok(Json(TripPhotosResponse {
        success: true,
        message: "Trip started".to_string(),
        photo_urls,
    }))
}

pub async fn complete_trip<B, S>(
    State(usecase): State<Arc<TripUseCase<B, S>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(reservation_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError>
where
    B: BookingRepository + Send + Sync + 'static,
    S: PhotoStorageClient + Send + Sync + 'static,
{
    let photos = read_trip_form(multipart).await?;
    let photo_urls = usecase
        .complete_trip(user_id, reservation_id, photos)
        .await?;

    Ok(Json(TripPhotosResponse {
        success: true,
        message: "Trip completed".to_string(),
        photo_urls,
    }))
}

async fn read_trip_form(mut multipart: Multipart) -> Result<Vec<PhotoUpload>, AppError> {
    let mut photos = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::validation("Invalid multipart payload"))?
    {
        let name = field.name().map(str::to_string);
        if name.as_deref() != Some("photos") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "photo.jpg".to_string());
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|_| AppError::validation("Failed to read uploaded photo"))?;

        photos.push(PhotoUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Ok(photos)
}
