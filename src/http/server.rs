//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, request ID, timeout, CORS)
//! - Serve on a listener until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::{CorsConfig, ServiceConfig};
use crate::http::handlers;
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::ShutdownListener;
use crate::orders::{InMemoryOrderStore, OrderStore};
use crate::webhook::{PermissiveVerifier, SignatureVerifier};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OrderStore>,
    pub verifier: Arc<dyn SignatureVerifier>,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    /// In-memory store and the permissive verifier.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryOrderStore::new()))
    }

    pub fn with_store(config: ServiceConfig, store: Arc<dyn OrderStore>) -> Self {
        Self {
            store,
            verifier: Arc::new(PermissiveVerifier),
            config: Arc::new(config),
        }
    }
}

/// Build the application router.
///
/// Middleware layers are not applied here so tests can drive the bare
/// router; `HttpServer` wraps it.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.security.max_body_size;

    Router::new()
        .route("/", get(handlers::root))
        .route("/api/webhook/paypal", post(handlers::paypal_webhook))
        .route("/api/orders", get(handlers::list_orders))
        .route("/api/orders/{order_id}", get(handlers::get_order))
        .route("/api/health", get(handlers::health))
        .route("/api/verify-credentials", get(handlers::verify_credentials))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// CORS restricted to the configured origins, credentials allowed.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(config.allow_credentials)
}

/// HTTP server for the order service.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_state(AppState::new(config))
    }

    pub fn with_state(state: AppState) -> Self {
        let router = Self::app(state.clone());
        Self { router, state }
    }

    /// Router with the full middleware stack.
    #[allow(deprecated)]
    pub fn app(state: AppState) -> Router {
        let config = state.config.clone();
        let middleware = ServiceBuilder::new()
            .layer(set_request_id_layer())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_request_span)
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(propagate_request_id_layer())
            .layer(cors_layer(&config.cors))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        build_router(state).layer(middleware)
    }

    /// Serve until a shutdown message arrives, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownListener,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            environment = %self.state.config.service.environment,
            base_url = %self.state.config.base_url(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let reason = shutdown.wait().await;
                tracing::info!(reason = reason.as_str(), "Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
