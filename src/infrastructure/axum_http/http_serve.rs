use crate::{
    config::config_model::DotEnvyConfig,
    infrastructure::{
        axum_http::{default_routers, routers},
        notify::push::PushNotifier,
        postgres::{
            postgres_connection::PgPoolSquad, repositories::push_tokens::PushTokenPostgres,
        },
        storages::{s3::S3Config, trip_photos::TripPhotoStorage},
    },
};
use anyhow::Result;
use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Result<()> {
    let push_token_repository = PushTokenPostgres::new(Arc::clone(&db_pool));
    let notifier = Arc::new(PushNotifier::new(
        config.push.endpoint.clone(),
        Arc::new(push_token_repository),
    ));

    let photo_storage = Arc::new(
        TripPhotoStorage::new(S3Config {
            endpoint: config.storage.endpoint.clone(),
            region: config.storage.region.clone(),
            bucket: config.storage.bucket.clone(),
            access_key: config.storage.access_key.clone(),
            secret_key: config.storage.secret_key.clone(),
            public_base_url: config.storage.public_base_url.clone(),
        })
        .await?,
    );

    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest(
            "/api/booking",
            routers::bookings::routes(
                Arc::clone(&db_pool),
                Arc::clone(&config),
                Arc::clone(&notifier),
            ),
        )
        .nest(
            "/api/host",
            routers::host_trips::routes(Arc::clone(&db_pool), Arc::clone(&photo_storage)),
        )
        .nest("/api/search", routers::search::routes(Arc::clone(&db_pool)))
        .nest(
            "/api/coupon",
            routers::coupons::routes(Arc::clone(&db_pool)),
        )
        .nest("/api/admin", routers::admin::routes(Arc::clone(&db_pool)))
        .route("/api/health-check", get(default_routers::health_check))
        .layer(TimeoutLayer::new(Duration::from_secs(config.server.timeout)))
        .layer(RequestBodyLimitLayer::new(
            (config.server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::PUT,
                    Method::DELETE,
                ])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(Any), // TODO Add the domain later
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
    };

    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}
