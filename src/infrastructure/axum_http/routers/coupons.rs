use std::sync::Arc;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use serde::Serialize;

use crate::{
    application::{errors::AppError, usecases::coupons::CouponUseCase},
    auth::AuthUser,
    domain::{
        repositories::coupons::CouponRepository,
        value_objects::coupons::{ApplyCouponModel, DiscountQuote},
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad, repositories::coupons::CouponPostgres,
    },
};

#[derive(Debug, Serialize)]
pub struct ApplyCouponResponse {
    pub success: bool,
    pub discount: f64,
    pub final_amount: f64,
}

impl From<DiscountQuote> for ApplyCouponResponse {
    fn from(quote: DiscountQuote) -> Self {
        Self {
            success: true,
            discount: quote.discount,
            final_amount: quote.final_amount,
        }
    }
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let coupon_repository = CouponPostgres::new(Arc::clone(&db_pool));
    let usecase = CouponUseCase::new(Arc::new(coupon_repository));

    Router::new()
        .route("/apply", post(apply_coupon))
        .with_state(Arc::new(usecase))
}

pub async fn apply_coupon<C>(
    State(usecase): State<Arc<CouponUseCase<C>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(apply_coupon_model): Json<ApplyCouponModel>,
) -> Result<impl IntoResponse, AppError>
where
    C: CouponRepository + Send + Sync + 'static,
{
    let quote = usecase.apply(user_id, apply_coupon_model).await?;

    Ok(Json(ApplyCouponResponse::from(quote)))
}
