use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::coupons;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = coupons)]
pub struct CouponEntity {
    pub id: Uuid,
    pub code: String,
    pub discount_type: String,
    pub discount_value: f64,
    pub min_amount: f64,
    pub max_discount: Option<f64>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub usage_limit: i32,
    pub created_at: DateTime<Utc>,
}
