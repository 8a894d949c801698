use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    application::{errors::AppError, usecases::settlements::SettlementUseCase},
    auth::AuthUser,
    domain::{
        repositories::bookings::BookingRepository,
        value_objects::{
            bookings::SettlementReportModel,
            enums::{roles::Role, settlement_statuses::SettlementStatus},
        },
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad, repositories::bookings::BookingPostgres,
    },
};

#[derive(Debug, Deserialize)]
pub struct UpdateSettlementRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SettlementReportResponse {
    pub success: bool,
    pub settlements: Vec<SettlementReportModel>,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let booking_repository = BookingPostgres::new(Arc::clone(&db_pool));
    let usecase = SettlementUseCase::new(Arc::new(booking_repository));

    Router::new()
        .route("/settlements/report", get(settlement_report))
        .route("/settlements/:reservation_id", put(update_settlement))
        .with_state(Arc::new(usecase))
}

fn require_admin(role: Role) -> Result<(), AppError> {
    if role != Role::Admin {
        return Err(AppError::forbidden("Admin access required"));
    }
    Ok(())
}

pub async fn update_settlement<B>(
    State(usecase): State<Arc<SettlementUseCase<B>>>,
    AuthUser { role, .. }: AuthUser,
    Path(reservation_id): Path<Uuid>,
    Json(request): Json<UpdateSettlementRequest>,
) -> Result<impl IntoResponse, AppError>
where
    B: BookingRepository + Send + Sync + 'static,
{
    require_admin(role)?;

    let target = SettlementStatus::try_from_str(&request.status)
        .ok_or_else(|| AppError::validation("Unknown settlement status"))?;

    usecase.update_status(reservation_id, target).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Settlement status updated".to_string(),
    }))
}

pub async fn settlement_report<B>(
    State(usecase): State<Arc<SettlementUseCase<B>>>,
    AuthUser { role, .. }: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    B: BookingRepository + Send + Sync + 'static,
{
    require_admin(role)?;

    let settlements = usecase.report().await?;

    Ok(Json(SettlementReportResponse {
        success: true,
        settlements,
    }))
}
