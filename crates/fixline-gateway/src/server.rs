// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP/WebSocket server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use fixline_assignment::AssignmentService;
use fixline_core::traits::{ReportStore, WorkerDirectory};
use fixline_core::FixlineError;
use fixline_presence::{ConnectionRegistry, MessageRouter, PresenceHandler};

use crate::auth::{auth_middleware, AuthConfig};
use crate::handlers;
use crate::ws;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub store: Arc<dyn ReportStore>,
    pub directory: Arc<dyn WorkerDirectory>,
    pub assignments: Arc<AssignmentService>,
    pub presence: PresenceHandler,
    pub router: MessageRouter,
    /// Read access for the presence listing endpoint.
    pub registry: Arc<dyn ConnectionRegistry>,
    pub auth: AuthConfig,
    /// Process start time for the health endpoint's uptime field.
    pub started_at: std::time::Instant,
}

/// Gateway server configuration (mirrors `ServerConfig` from
/// `fixline-config` to avoid a dependency on the config crate here).
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Bearer token for `/v1` auth (None = auth disabled).
    pub bearer_token: Option<String>,
    /// Allowed CORS origin (None = permissive, for local development).
    pub cors_origin: Option<String>,
}

/// Start the gateway server.
///
/// Routes:
/// - GET  /health (public liveness)
/// - GET  /v1/reports, POST /v1/reports, PATCH /v1/reports/{id}
/// - GET  /v1/reports/assigned/{identity}
/// - POST /v1/workers
/// - GET  /v1/presence
/// - GET  /ws (join/chat transport; identity is claimed in-band at join)
pub async fn start_server(config: &GatewayConfig, state: GatewayState) -> Result<(), FixlineError> {
    let app = build_router(&state, cors_layer(config)?);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| FixlineError::Transport {
            message: format!("failed to bind gateway to {addr}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| FixlineError::Transport {
            message: "gateway server error".to_string(),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

fn build_router(state: &GatewayState, cors: CorsLayer) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route(
            "/v1/reports",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .route("/v1/reports/{id}", patch(handlers::patch_report))
        .route(
            "/v1/reports/assigned/{identity}",
            get(handlers::list_assigned_reports),
        )
        .route("/v1/workers", post(handlers::register_worker))
        .route("/v1/presence", get(handlers::get_presence))
        .route_layer(axum_middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ))
        .with_state(state.clone());

    // WebSocket route is unauthenticated: identity is claimed via the
    // in-band join event.
    let ws_routes = Router::new()
        .route("/ws", get(ws::ws_handler))
        .with_state(state.clone());

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .merge(ws_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &GatewayConfig) -> Result<CorsLayer, FixlineError> {
    match config.cors_origin {
        Some(ref origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .map_err(|e| FixlineError::Config(format!("invalid cors origin: {e}")))?;
            Ok(CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any))
        }
        None => Ok(CorsLayer::permissive()),
    }
}
