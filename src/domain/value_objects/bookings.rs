use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::reservations::{InsertReservationEntity, ReservationEntity},
    value_objects::{
        availability::ConflictWindow,
        enums::{booking_statuses::BookingStatus, settlement_statuses::SettlementStatus},
    },
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderModel {
    pub car_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub amount: f64,
    pub total_hours: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentModel {
    pub car_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub amount: f64,
    pub total_hours: Option<f64>,
    pub coupon_code: Option<String>,
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

impl VerifyPaymentModel {
    pub fn to_entity(&self, user_id: Uuid, host_id: Uuid) -> InsertReservationEntity {
        InsertReservationEntity {
            user_id,
            car_id: self.car_id,
            host_id,
            start_date: self.start_date,
            end_date: self.end_date,
            amount: self.amount,
            total_hours: self.total_hours,
            order_id: Some(self.order_id.clone()),
            payment_id: Some(self.payment_id.clone()),
            coupon_code: self.coupon_code.clone(),
            status: BookingStatus::Confirmed.to_string(),
            settlement_status: SettlementStatus::Pending.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

/// Result of the transactional check-and-insert: either the reservation id or
/// the windows that blocked it.
#[derive(Debug, Clone)]
pub enum ReservationInsertOutcome {
    Created(Uuid),
    Conflict(Vec<ConflictWindow>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarSummaryModel {
    pub title: String,
    pub city: String,
    pub price_per_hour: f64,
    pub security_deposit: f64,
    pub fuel_type: String,
    pub transmission_type: String,
    pub seats: i32,
    pub doors: i32,
    pub luggage_capacity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingModel {
    pub id: Uuid,
    pub car_id: Uuid,
    pub host_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub pickup_at: Option<DateTime<Utc>>,
    pub drop_at: Option<DateTime<Utc>>,
    pub amount: f64,
    pub coupon_code: Option<String>,
    pub status: BookingStatus,
    pub settlement_status: SettlementStatus,
    pub car: CarSummaryModel,
}

impl BookingModel {
    pub fn from_entity(entity: ReservationEntity, car: CarSummaryModel) -> Self {
        Self {
            id: entity.id,
            car_id: entity.car_id,
            host_id: entity.host_id,
            start_date: entity.start_date,
            end_date: entity.end_date,
            pickup_at: entity.pickup_at,
            drop_at: entity.drop_at,
            amount: entity.amount,
            coupon_code: entity.coupon_code,
            status: BookingStatus::try_from_str(&entity.status).unwrap_or_default(),
            settlement_status: SettlementStatus::try_from_str(&entity.settlement_status)
                .unwrap_or_default(),
            car,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingListModel {
    pub upcoming: Vec<BookingModel>,
    pub past: Vec<BookingModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostContactModel {
    pub name: Option<String>,
    pub phone_number: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetailModel {
    #[serde(flatten)]
    pub booking: BookingModel,
    pub security_deposit: f64,
    pub host: HostContactModel,
    pub pickup_photos: Vec<String>,
    pub drop_photos: Vec<String>,
}

/// One uploaded photo file, fully buffered by the multipart extractor.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReportModel {
    pub reservation_id: Uuid,
    pub host_id: Uuid,
    pub amount: f64,
    pub drop_at: Option<DateTime<Utc>>,
    pub settlement_status: SettlementStatus,
}
