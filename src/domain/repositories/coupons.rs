use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::coupons::CouponEntity;

#[async_trait]
#[automock]
pub trait CouponRepository {
    /// The coupon by code if its validity window contains `now`.
    async fn find_valid(&self, code: &str, now: DateTime<Utc>) -> Result<Option<CouponEntity>>;

    /// How many of the user's reservations already carry this code.
    async fn usage_count(&self, user_id: Uuid, code: &str) -> Result<i64>;
}
