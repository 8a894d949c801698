use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{entities::cars::CarEntity, repositories::cars::CarRepository},
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::cars},
};

pub struct CarPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CarPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CarRepository for CarPostgres {
    async fn find_by_id(&self, car_id: Uuid) -> Result<Option<CarEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = cars::table
            .filter(cars::id.eq(car_id))
            .select(CarEntity::as_select())
            .first::<CarEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }
}
