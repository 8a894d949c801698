use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::reservation_photos;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = reservation_photos)]
pub struct ReservationPhotoEntity {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub photo_url: String,
    pub photo_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reservation_photos)]
pub struct InsertReservationPhotoEntity {
    pub reservation_id: Uuid,
    pub photo_url: String,
    pub photo_type: String,
    pub created_at: DateTime<Utc>,
}
