use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::{
        reservation_photos::{InsertReservationPhotoEntity, ReservationPhotoEntity},
        reservations::{InsertReservationEntity, ReservationEntity},
    },
    value_objects::bookings::{CarSummaryModel, ReservationInsertOutcome},
};

#[async_trait]
#[automock]
pub trait BookingRepository {
    /// Checks the requested window against active reservations and inserts
    /// the confirmed row inside one serializable transaction.
    async fn create_confirmed(
        &self,
        insert_reservation_entity: InsertReservationEntity,
    ) -> Result<ReservationInsertOutcome>;

    async fn find_by_id(&self, reservation_id: Uuid) -> Result<Option<ReservationEntity>>;

    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(ReservationEntity, CarSummaryModel)>>;

    async fn find_with_car(
        &self,
        reservation_id: Uuid,
    ) -> Result<Option<(ReservationEntity, CarSummaryModel)>>;

    async fn list_photos(&self, reservation_id: Uuid) -> Result<Vec<ReservationPhotoEntity>>;

    /// Moves the reservation to `START` if it still sits on a startable
    /// status. Returns `false` when a concurrent writer changed the status
    /// first; nothing is written in that case.
    async fn start_trip(
        &self,
        reservation_id: Uuid,
        photos: Vec<InsertReservationPhotoEntity>,
        picked_up_at: DateTime<Utc>,
    ) -> Result<bool>;

    /// Moves the reservation from `START` to `COMPLETED`; `false` means the
    /// status had already moved.
    async fn complete_trip(
        &self,
        reservation_id: Uuid,
        photos: Vec<InsertReservationPhotoEntity>,
        dropped_at: DateTime<Utc>,
    ) -> Result<bool>;

    /// Cancels the reservation if it is still on an active status; `false`
    /// means the status had already moved.
    async fn cancel(&self, reservation_id: Uuid) -> Result<bool>;

    async fn count_non_pending_for_user(&self, user_id: Uuid) -> Result<i64>;

    async fn update_settlement_status(
        &self,
        reservation_id: Uuid,
        settlement_status: String,
    ) -> Result<()>;

    async fn list_completed(&self) -> Result<Vec<ReservationEntity>>;
}
