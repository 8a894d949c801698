use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::cars;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = cars)]
pub struct CarEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub city: String,
    pub price_per_hour: f64,
    pub security_deposit: f64,
    pub seats: i32,
    pub doors: i32,
    pub luggage_capacity: i32,
    pub fuel_type: String,
    pub transmission_type: String,
    pub category: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_approved: bool,
    pub car_enabled: bool,
    pub repair_mode: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
