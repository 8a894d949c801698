use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{
    RunQueryDsl, insert_into,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
    update,
};
use uuid::Uuid;

use crate::{
    domain::{
        entities::{
            reservation_photos::{InsertReservationPhotoEntity, ReservationPhotoEntity},
            reservations::{InsertReservationEntity, ReservationEntity},
        },
        repositories::bookings::BookingRepository,
        value_objects::{
            availability::ConflictWindow,
            bookings::{CarSummaryModel, ReservationInsertOutcome},
            enums::booking_statuses::BookingStatus,
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{cars, reservation_photos, reservations},
    },
};

type CarSummaryRow = (String, String, f64, f64, String, String, i32, i32, i32);

const CAR_SUMMARY_COLUMNS: (
    cars::columns::title,
    cars::columns::city,
    cars::columns::price_per_hour,
    cars::columns::security_deposit,
    cars::columns::fuel_type,
    cars::columns::transmission_type,
    cars::columns::seats,
    cars::columns::doors,
    cars::columns::luggage_capacity,
) = (
    cars::title,
    cars::city,
    cars::price_per_hour,
    cars::security_deposit,
    cars::fuel_type,
    cars::transmission_type,
    cars::seats,
    cars::doors,
    cars::luggage_capacity,
);

fn to_car_summary(row: CarSummaryRow) -> CarSummaryModel {
    let (
        title,
        city,
        price_per_hour,
        security_deposit,
        fuel_type,
        transmission_type,
        seats,
        doors,
        luggage_capacity,
    ) = row;
    CarSummaryModel {
        title,
        city,
        price_per_hour,
        security_deposit,
        fuel_type,
        transmission_type,
        seats,
        doors,
        luggage_capacity,
    }
}

pub struct BookingPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl BookingPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl BookingRepository for BookingPostgres {
    async fn create_confirmed(
        &self,
        insert_reservation_entity: InsertReservationEntity,
    ) -> Result<ReservationInsertOutcome> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // The conflict check and the insert must observe the same snapshot;
        // a serialization failure means a concurrent writer won the window.
        let result = conn.build_transaction().serializable().run(|conn| {
            let conflicts = reservations::table
                .filter(reservations::car_id.eq(insert_reservation_entity.car_id))
                .filter(reservations::status.eq_any(BookingStatus::active_set()))
                .filter(reservations::end_date.gt(insert_reservation_entity.start_date))
                .filter(reservations::start_date.lt(insert_reservation_entity.end_date))
                .select((reservations::start_date, reservations::end_date))
                .load::<(DateTime<Utc>, DateTime<Utc>)>(conn)?;

            if !conflicts.is_empty() {
                let windows = conflicts
                    .into_iter()
                    .map(|(start_date, end_date)| ConflictWindow {
                        start_date,
                        end_date,
                    })
                    .collect();
                return Ok(ReservationInsertOutcome::Conflict(windows));
            }

            let reservation_id = insert_into(reservations::table)
                .values(&insert_reservation_entity)
                .returning(reservations::id)
                .get_result::<Uuid>(conn)?;

            Ok(ReservationInsertOutcome::Created(reservation_id))
        });

        match result {
            Ok(outcome) => Ok(outcome),
            Err(DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _)) => {
                Ok(ReservationInsertOutcome::Conflict(Vec::new()))
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn find_by_id(&self, reservation_id: Uuid) -> Result<Option<ReservationEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = reservations::table
            .filter(reservations::id.eq(reservation_id))
            .select(ReservationEntity::as_select())
            .first::<ReservationEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(ReservationEntity, CarSummaryModel)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = reservations::table
            .inner_join(cars::table)
            .filter(reservations::user_id.eq(user_id))
            .order(reservations::start_date.desc())
            .select((ReservationEntity::as_select(), CAR_SUMMARY_COLUMNS))
            .load::<(ReservationEntity, CarSummaryRow)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(entity, car)| (entity, to_car_summary(car)))
            .collect())
    }

    async fn find_with_car(
        &self,
        reservation_id: Uuid,
    ) -> Result<Option<(ReservationEntity, CarSummaryModel)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = reservations::table
            .inner_join(cars::table)
            .filter(reservations::id.eq(reservation_id))
            .select((ReservationEntity::as_select(), CAR_SUMMARY_COLUMNS))
            .first::<(ReservationEntity, CarSummaryRow)>(&mut conn)
            .optional()?;

        Ok(row.map(|(entity, car)| (entity, to_car_summary(car))))
    }

    async fn list_photos(&self, reservation_id: Uuid) -> Result<Vec<ReservationPhotoEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = reservation_photos::table
            .filter(reservation_photos::reservation_id.eq(reservation_id))
            .order(reservation_photos::created_at.asc())
            .select(ReservationPhotoEntity::as_select())
            .load::<ReservationPhotoEntity>(&mut conn)?;

        Ok(results)
    }

    async fn start_trip(
        &self,
        reservation_id: Uuid,
        photos: Vec<InsertReservationPhotoEntity>,
        picked_up_at: DateTime<Utc>,
    ) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // The status predicate re-checks the edge at write time; the usecase
        // guard alone cannot stop a writer that raced in after its read.
        let updated = conn.transaction::<_, DieselError, _>(|conn| {
            let rows = update(reservations::table)
                .filter(reservations::id.eq(reservation_id))
                .filter(reservations::status.eq_any([
                    BookingStatus::Pending.to_string(),
                    BookingStatus::Confirmed.to_string(),
                ]))
                .set((
                    reservations::status.eq(BookingStatus::Start.to_string()),
                    reservations::pickup_at.eq(Some(picked_up_at)),
                    reservations::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;

            if rows == 0 {
                return Ok(false);
            }

            insert_into(reservation_photos::table)
                .values(&photos)
                .execute(conn)?;

            Ok(true)
        })?;

        Ok(updated)
    }

    async fn complete_trip(
        &self,
        reservation_id: Uuid,
        photos: Vec<InsertReservationPhotoEntity>,
        dropped_at: DateTime<Utc>,
    ) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let updated = conn.transaction::<_, DieselError, _>(|conn| {
            let rows = update(reservations::table)
                .filter(reservations::id.eq(reservation_id))
                .filter(reservations::status.eq(BookingStatus::Start.to_string()))
                .set((
                    reservations::status.eq(BookingStatus::Completed.to_string()),
                    reservations::drop_at.eq(Some(dropped_at)),
                    reservations::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;

            if rows == 0 {
                return Ok(false);
            }

            insert_into(reservation_photos::table)
                .values(&photos)
                .execute(conn)?;

            Ok(true)
        })?;

        Ok(updated)
    }

    async fn cancel(&self, reservation_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = update(reservations::table)
            .filter(reservations::id.eq(reservation_id))
            .filter(reservations::status.eq_any(BookingStatus::active_set()))
            .set((
                reservations::status.eq(BookingStatus::Cancelled.to_string()),
                reservations::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(rows == 1)
    }

    async fn count_non_pending_for_user(&self, user_id: Uuid) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = reservations::table
            .filter(reservations::user_id.eq(user_id))
            .filter(reservations::status.ne(BookingStatus::Pending.to_string()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn update_settlement_status(
        &self,
        reservation_id: Uuid,
        settlement_status: String,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(reservations::table)
            .filter(reservations::id.eq(reservation_id))
            .set((
                reservations::settlement_status.eq(settlement_status),
                reservations::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn list_completed(&self) -> Result<Vec<ReservationEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = reservations::table
            .filter(reservations::status.eq(BookingStatus::Completed.to_string()))
            .order(reservations::drop_at.desc())
            .select(ReservationEntity::as_select())
            .load::<ReservationEntity>(&mut conn)?;

        Ok(results)
    }
}
