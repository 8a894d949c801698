use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{
        entities::cars::CarEntity,
        repositories::availability::AvailabilityRepository,
        value_objects::{
            availability::ConflictWindow, enums::booking_statuses::BookingStatus,
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{car_features, car_images, cars, reservations},
    },
};

pub struct AvailabilityPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AvailabilityPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl AvailabilityRepository for AvailabilityPostgres {
    async fn list_city_cars(&self, city: &str) -> Result<Vec<CarEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = cars::table
            .filter(cars::city.eq(city))
            .filter(cars::is_approved.eq(true))
            .filter(cars::car_enabled.eq(true))
            .filter(cars::repair_mode.eq(false))
            .select(CarEntity::as_select())
            .load::<CarEntity>(&mut conn)?;

        Ok(results)
    }

    async fn conflicting_windows(
        &self,
        car_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ConflictWindow>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Half-open intervals: a reservation ending exactly at `start` does
        // not block the window.
        let rows = reservations::table
            .filter(reservations::car_id.eq(car_id))
            .filter(reservations::status.eq_any(BookingStatus::active_set()))
            .filter(reservations::end_date.gt(start))
            .filter(reservations::start_date.lt(end))
            .select((reservations::start_date, reservations::end_date))
            .load::<(DateTime<Utc>, DateTime<Utc>)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(start_date, end_date)| ConflictWindow {
                start_date,
                end_date,
            })
            .collect())
    }

    async fn car_images(&self, car_id: Uuid) -> Result<Vec<String>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = car_images::table
            .filter(car_images::car_id.eq(car_id))
            .select(car_images::image_path)
            .load::<String>(&mut conn)?;

        Ok(results)
    }

    async fn car_features(&self, car_id: Uuid) -> Result<Vec<String>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = car_features::table
            .filter(car_features::car_id.eq(car_id))
            .select(car_features::feature)
            .load::<String>(&mut conn)?;

        Ok(results)
    }
}
