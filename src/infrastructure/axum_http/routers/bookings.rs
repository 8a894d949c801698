use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    application::{errors::AppError, usecases::bookings::BookingUseCase},
    auth::AuthUser,
    config::config_model::DotEnvyConfig,
    domain::{
        repositories::{
            bookings::BookingRepository, cars::CarRepository, notifications::BookingNotifier,
            payments::PaymentGateway, users::UserRepository,
        },
        value_objects::bookings::{
            BookingDetailModel, BookingListModel, CreateOrderModel, VerifyPaymentModel,
        },
    },
    infrastructure::{
        notify::push::PushNotifier,
        payments::razorpay::RazorpayClient,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{bookings::BookingPostgres, cars::CarPostgres, users::UserPostgres},
        },
    },
};

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
    pub booking_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub success: bool,
    #[serde(flatten)]
    pub bookings: BookingListModel,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub success: bool,
    pub booking: BookingDetailModel,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

pub fn routes(
    db_pool: Arc<PgPoolSquad>,
    config: Arc<DotEnvyConfig>,
    notifier: Arc<PushNotifier>,
) -> Router {
    let booking_repository = BookingPostgres::new(Arc::clone(&db_pool));
    let car_repository = CarPostgres::new(Arc::clone(&db_pool));
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let payment_gateway = RazorpayClient::new(
        config.payment.base_url.clone(),
        config.payment.key_id.clone(),
        config.payment.key_secret.clone(),
    );

    let usecase = BookingUseCase::new(
        Arc::new(booking_repository),
        Arc::new(car_repository),
        Arc::new(user_repository),
        Arc::new(payment_gateway),
        notifier,
        config.payment.key_secret.clone(),
    );

    Router::new()
        .route("/create-order", post(create_order))
        .route("/verify-payment", post(verify_payment))
        .route("/orders", get(list_orders))
        .route("/orders/:reservation_id", get(get_booking))
        .route("/cancel-booking/:reservation_id", put(cancel_booking))
        .with_state(Arc::new(usecase))
}

pub async fn create_order<B, C, U, P, N>(
    State(usecase): State<Arc<BookingUseCase<B, C, U, P, N>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(create_order_model): Json<CreateOrderModel>,
) -> Result<impl IntoResponse, AppError>
where
    B: BookingRepository + Send + Sync + 'static,
    C: CarRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
    N: BookingNotifier + Send + Sync + 'static,
{
    info!(%user_id, "bookings: create-order request received");
    let order = usecase.create_order(user_id, create_order_model).await?;

    Ok(Json(CreateOrderResponse {
        success: true,
        order_id: order.order_id,
        amount: order.amount_minor,
        currency: order.currency,
    }))
}

pub async fn verify_payment<B, C, U, P, N>(
    State(usecase): State<Arc<BookingUseCase<B, C, U, P, N>>>,
    AuthUser { user_id, .. }: AuthUser,
    Json(verify_payment_model): Json<VerifyPaymentModel>,
) -> Result<impl IntoResponse, AppError>
where
    B: BookingRepository + Send + Sync + 'static,
    C: CarRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
    N: BookingNotifier + Send + Sync + 'static,
{
    info!(%user_id, "bookings: verify-payment request received");
    let booking_id = usecase.verify_payment(user_id, verify_payment_model).await?;

    Ok(Json(VerifyPaymentResponse {
        success: true,
        message: "Payment verified & booking confirmed".to_string(),
        booking_id,
    }))
}

pub async fn list_orders<B, C, U, P, N>(
    State(usecase): State<Arc<BookingUseCase<B, C, U, P, N>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    B: BookingRepository + Send + Sync + 'static,
    C: CarRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
    N: BookingNotifier + Send + Sync + 'static,
{
    let bookings = usecase.list_bookings(user_id).await?;

    Ok(Json(OrdersResponse {
        success: true,
        bookings,
    }))
}

pub async fn get_booking<B, C, U, P, N>(
    State(usecase): State<Arc<BookingUseCase<B, C, U, P, N>>>,
    AuthUser { user_id, .. }: AuthUser,
    Path(reservation_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    B: BookingRepository + Send + Sync + 'static,
    C: CarRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
    N: BookingNotifier + Send + Sync + 'static,
{
    let booking = usecase.get_booking(user_id, reservation_id).await?;

    Ok(Json(BookingResponse {
        success: true,
        booking,
    }))
}

pub async fn cancel_booking<B, C, U, P, N>(
    State(usecase): State<Arc<BookingUseCase<B, C, U, P, N>>>,
    AuthUser { user_id, role, .. }: AuthUser,
    Path(reservation_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    B: BookingRepository + Send + Sync + 'static,
    C: CarRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PaymentGateway + Send + Sync + 'static,
    N: BookingNotifier + Send + Sync + 'static,
{
    info!(%user_id, %reservation_id, "bookings: cancel request received");
    usecase.cancel(user_id, role, reservation_id).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Booking cancelled successfully".to_string(),
    }))
}
