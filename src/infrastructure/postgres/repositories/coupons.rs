use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{RunQueryDsl, prelude::*};
use uuid::Uuid;

use crate::{
    domain::{entities::coupons::CouponEntity, repositories::coupons::CouponRepository},
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{coupons, reservations},
    },
};

pub struct CouponPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl CouponPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CouponRepository for CouponPostgres {
    async fn find_valid(&self, code: &str, now: DateTime<Utc>) -> Result<Option<CouponEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = coupons::table
            .filter(coupons::code.eq(code))
            .filter(coupons::starts_at.le(now))
            .filter(coupons::ends_at.ge(now))
            .select(CouponEntity::as_select())
            .first::<CouponEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn usage_count(&self, user_id: Uuid, code: &str) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = reservations::table
            .filter(reservations::user_id.eq(user_id))
            .filter(reservations::coupon_code.eq(code))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }
}
