use std::sync::Arc;

use axum::{routing::get, Router};
use dotenvy::dotenv;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod errors;
mod handlers;
pub mod logger;
pub mod models;
pub mod repositories;
pub mod state;

pub use errors::{Errors, StartupError};
pub use state::AppState;

use repositories::MongoCustomerRepository;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/customers",
            get(handlers::customer::get_all)
                .post(handlers::customer::create)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/customers/search",
            get(handlers::customer::search).fallback(handlers::method_not_allowed),
        )
        .route(
            "/customers/type/:type",
            get(handlers::customer::get_by_type).fallback(handlers::method_not_allowed),
        )
        .route(
            "/customers/state/:state",
            get(handlers::customer::get_by_state).fallback(handlers::method_not_allowed),
        )
        .route(
            "/customers/age/:age",
            get(handlers::customer::get_by_age).fallback(handlers::method_not_allowed),
        )
        .route(
            "/health",
            get(handlers::health).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::fallback)
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> Result<(), StartupError> {
    dotenv().ok();

    let config = config::Config::from_env()?;
    logger::init(&config.log);

    let addr = config.server_addr()?;
    let connection = db::Connection::open(&config.mongo).await?;

    let customers = MongoCustomerRepository::new(connection.database());
    let app = app(AppState::new(Arc::new(customers)));

    tracing::info!("listening on {}", addr);
    let served = axum::Server::try_bind(&addr)?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await;

    connection.close().await;

    Ok(served?)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down");
}
