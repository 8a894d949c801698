use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::{
    application::errors::AppError,
    domain::{
        repositories::bookings::BookingRepository,
        value_objects::{
            bookings::SettlementReportModel,
            enums::settlement_statuses::SettlementStatus,
        },
    },
};

/// Admin-side payout processing over completed reservations.
pub struct SettlementUseCase<B>
where
    B: BookingRepository + Send + Sync,
{
    booking_repository: Arc<B>,
}

impl<B> SettlementUseCase<B>
where
    B: BookingRepository + Send + Sync,
{
    pub fn new(booking_repository: Arc<B>) -> Self {
        Self { booking_repository }
    }

    pub async fn update_status(
        &self,
        reservation_id: Uuid,
        target: SettlementStatus,
    ) -> Result<(), AppError> {
        let reservation = self
            .booking_repository
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found"))?;

        let current = SettlementStatus::try_from_str(&reservation.settlement_status)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("unknown settlement status")))?;
        current
            .transition(target)
            .map_err(|error| AppError::conflict(error.to_string()))?;

        self.booking_repository
            .update_settlement_status(reservation_id, target.to_string())
            .await?;

        info!(%reservation_id, settlement_status = %target, "settlements: status updated");
        Ok(())
    }

    pub async fn report(&self) -> Result<Vec<SettlementReportModel>, AppError> {
        let reservations = self.booking_repository.list_completed().await?;

        Ok(reservations
            .into_iter()
            .map(|entity| SettlementReportModel {
                reservation_id: entity.id,
                host_id: entity.host_id,
                amount: entity.amount,
                drop_at: entity.drop_at,
                settlement_status: SettlementStatus::try_from_str(&entity.settlement_status)
                    .unwrap_or_default(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::reservations::ReservationEntity, repositories::bookings::MockBookingRepository,
        value_objects::enums::booking_statuses::BookingStatus,
    };
    use chrono::{Duration, Utc};
    use mockall::predicate::eq;

    fn completed_reservation(id: Uuid, settlement: SettlementStatus) -> ReservationEntity {
        let now = Utc::now();
        ReservationEntity {
            id,
            user_id: Uuid::new_v4(),
            car_id: Uuid::new_v4(),
            host_id: Uuid::new_v4(),
            start_date: now - Duration::hours(8),
            end_date: now - Duration::hours(2),
            pickup_at: Some(now - Duration::hours(8)),
            drop_at: Some(now - Duration::hours(2)),
            amount: 960.0,
            total_hours: Some(6.0),
            order_id: None,
            payment_id: None,
            coupon_code: None,
            status: BookingStatus::Completed.to_string(),
            settlement_status: settlement.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn pending_settlement_moves_to_processing() {
        let reservation_id = Uuid::new_v4();

        let mut repo = MockBookingRepository::new();
        repo.expect_find_by_id().returning(move |id| {
            let reservation = completed_reservation(id, SettlementStatus::Pending);
            Box::pin(async move { Ok(Some(reservation)) })
        });
        repo.expect_update_settlement_status()
            .with(eq(reservation_id), eq("PROCESSING".to_string()))
            .returning(|_, _| Box::pin(async { Ok(()) }));

        let usecase = SettlementUseCase::new(Arc::new(repo));
        usecase
            .update_status(reservation_id, SettlementStatus::Processing)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn settled_reservation_cannot_be_reopened() {
        let reservation_id = Uuid::new_v4();

        let mut repo = MockBookingRepository::new();
        repo.expect_find_by_id().returning(move |id| {
            let reservation = completed_reservation(id, SettlementStatus::Settled);
            Box::pin(async move { Ok(Some(reservation)) })
        });
        repo.expect_update_settlement_status().never();

        let usecase = SettlementUseCase::new(Arc::new(repo));
        let result = usecase
            .update_status(reservation_id, SettlementStatus::Processing)
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}
