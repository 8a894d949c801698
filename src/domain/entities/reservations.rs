use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::reservations;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = reservations)]
pub struct ReservationEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub host_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub pickup_at: Option<DateTime<Utc>>,
    pub drop_at: Option<DateTime<Utc>>,
    pub amount: f64,
    pub total_hours: Option<f64>,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub coupon_code: Option<String>,
    pub status: String,
    pub settlement_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reservations)]
pub struct InsertReservationEntity {
    pub user_id: Uuid,
    pub car_id: Uuid,
    pub host_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub amount: f64,
    pub total_hours: Option<f64>,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub coupon_code: Option<String>,
    pub status: String,
    pub settlement_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
