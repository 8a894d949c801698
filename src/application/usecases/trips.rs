use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    application::errors::AppError,
    domain::{
        entities::reservation_photos::InsertReservationPhotoEntity,
        repositories::{bookings::BookingRepository, storage::PhotoStorageClient},
        value_objects::{
            bookings::PhotoUpload,
            enums::{booking_statuses::BookingStatus, photo_types::PhotoType},
        },
    },
};

const PICKUP_FOLDER: &str = "pickup_photos";
const DROP_FOLDER: &str = "drop_photos";

/// Host-side trip transitions: photo evidence plus a status move, persisted
/// together.
pub struct TripUseCase<B, S>
where
    B: BookingRepository + Send + Sync,
    S: PhotoStorageClient + Send + Sync,
{
    booking_repository: Arc<B>,
    photo_storage: Arc<S>,
}

impl<B, S> TripUseCase<B, S>
where
    B: BookingRepository + Send + Sync,
    S: PhotoStorageClient + Send + Sync,
{
    pub fn new(booking_repository: Arc<B>, photo_storage: Arc<S>) -> Self {
        Self {
            booking_repository,
            photo_storage,
        }
    }

    pub async fn start_trip(
        &self,
        host_id: Uuid,
        reservation_id: Uuid,
        photos: Vec<PhotoUpload>,
    ) -> Result<Vec<String>, AppError> {
        let urls = self
            .transition_with_photos(
                host_id,
                reservation_id,
                photos,
                BookingStatus::Start,
                PhotoType::Pickup,
                PICKUP_FOLDER,
            )
            .await?;

        info!(%host_id, %reservation_id, "trips: reservation started");
        Ok(urls)
    }

    pub async fn complete_trip(
        &self,
        host_id: Uuid,
        reservation_id: Uuid,
        photos: Vec<PhotoUpload>,
    ) -> Result<Vec<String>, AppError> {
        let urls = self
            .transition_with_photos(
                host_id,
                reservation_id,
                photos,
                BookingStatus::Completed,
                PhotoType::Drop,
                DROP_FOLDER,
            )
            .await?;

        info!(%host_id, %reservation_id, "trips: reservation completed");
        Ok(urls)
    }

    async fn transition_with_photos(
        &self,
        host_id: Uuid,
        reservation_id: Uuid,
        photos: Vec<PhotoUpload>,
        to: BookingStatus,
        photo_type: PhotoType,
        folder: &str,
    ) -> Result<Vec<String>, AppError> {
        let reservation = self
            .booking_repository
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found"))?;

        if reservation.host_id != host_id {
            return Err(AppError::forbidden("You are not the host of this booking"));
        }

        // Guard the transition before touching storage.
        let current = BookingStatus::try_from_str(&reservation.status)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("unknown booking status")))?;
        current
            .transition(to)
            .map_err(|error| AppError::conflict(error.to_string()))?;

        if photos.is_empty() {
            return Err(AppError::validation("At least one photo is required"));
        }

        let mut urls = Vec::with_capacity(photos.len());
        let mut photo_entities = Vec::with_capacity(photos.len());
        for photo in &photos {
            let url = self
                .photo_storage
                .upload_photo(reservation_id, folder, photo)
                .await?;
            photo_entities.push(InsertReservationPhotoEntity {
                reservation_id,
                photo_url: url.clone(),
                photo_type: photo_type.to_string(),
                created_at: Utc::now(),
            });
            urls.push(url);
        }

        let now = Utc::now();
        let updated = match to {
            BookingStatus::Start => {
                self.booking_repository
                    .start_trip(reservation_id, photo_entities, now)
                    .await?
            }
            BookingStatus::Completed => {
                self.booking_repository
                    .complete_trip(reservation_id, photo_entities, now)
                    .await?
            }
            _ => unreachable!("trip transitions only target START or COMPLETED"),
        };

        // The repository re-checks the status at write time; losing that
        // race is the same conflict as reading a wrong status up front.
        if !updated {
            return Err(AppError::conflict(
                "Reservation status changed, refresh and try again",
            ));
        }

        Ok(urls)
    }
}
