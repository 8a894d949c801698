use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    application::{errors::AppError, usecases::availability::AvailabilityUseCase},
    domain::{
        repositories::availability::AvailabilityRepository,
        value_objects::availability::SearchResultModel,
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad, repositories::availability::AvailabilityPostgres,
    },
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub city: String,
    pub pickup_date_time: String,
    pub drop_date_time: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: SearchResultModel,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let availability_repository = AvailabilityPostgres::new(Arc::clone(&db_pool));
    let usecase = AvailabilityUseCase::new(Arc::new(availability_repository));

    Router::new()
        .route("/cars", get(search_cars))
        .with_state(Arc::new(usecase))
}

pub async fn search_cars<A>(
    State(usecase): State<Arc<AvailabilityUseCase<A>>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError>
where
    A: AvailabilityRepository + Send + Sync + 'static,
{
    let pickup = parse_rfc3339(&query.pickup_date_time, "pickupDateTime")?;
    let drop = parse_rfc3339(&query.drop_date_time, "dropDateTime")?;

    let result = usecase.search_cars(&query.city, pickup, drop).await?;

    Ok(Json(SearchResponse {
        success: true,
        result,
    }))
}

fn parse_rfc3339(raw: &str, field: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::validation(format!("{field} must be an RFC 3339 timestamp")))
}
