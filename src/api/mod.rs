//! HTTP layer - router, shared state and server lifecycle.
//!
//! Routes under `/api` map one-to-one onto core operations. CORS, request tracing
//! and a per-request timeout are applied to every route.

/// HTTP error mapping
pub mod error;
/// Request handlers for every route
pub mod handlers;

use crate::{config::ServerConfig, errors::Result};
use axum::{Router, http::HeaderValue, routing::get};
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info, instrument, warn};

/// Shared data available to all request handlers.
/// Holds the process-wide database connection, cloned cheaply per request.
#[derive(Clone)]
pub struct ApiState {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
}

impl ApiState {
    /// Creates a new `ApiState` around an open database connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

/// Routes mounted under `/api`.
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route(
            "/plantas",
            get(handlers::list_plantas).post(handlers::create_planta),
        )
        .route("/plantas/:id", get(handlers::get_planta))
        .route("/tipos-planta", get(handlers::list_tipos_planta))
        .route("/promocoes", get(handlers::list_promocoes))
        .route(
            "/relatorios/tipos-planta",
            get(handlers::relatorio_por_tipo),
        )
        .with_state(state)
}

/// Builds the complete application router with its middleware stack.
pub fn app(state: ApiState, config: &ServerConfig) -> Router {
    with_middleware(
        Router::new()
            .route("/", get(handlers::health))
            .nest("/api", api_routes(state)),
        config,
    )
}

/// Applies the request timeout (408 on expiry), CORS and request tracing.
fn with_middleware(router: Router, config: &ServerConfig) -> Router {
    router
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Binds the configured address and serves until Ctrl-C is received.
///
/// The connection is not closed here; the caller owns it and closes it once this
/// returns.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
#[instrument(skip(config, database), fields(addr = %config.socket_addr()))]
pub async fn serve(config: &ServerConfig, database: DatabaseConnection) -> Result<()> {
    let listener = TcpListener::bind(config.socket_addr()).await?;
    info!("Servidor rodando em http://{}", listener.local_addr()?);

    axum::serve(listener, app(ApiState::new(database), config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
