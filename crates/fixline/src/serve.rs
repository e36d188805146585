// SPDX-FileCopyrightText: 2026 Fixline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `fixline serve` command implementation.
//!
//! Wires the SQLite store, presence registry, assignment service, and
//! gateway together, then runs the server until SIGINT.

use std::sync::Arc;

use tracing::info;

use fixline_assignment::AssignmentService;
use fixline_config::model::FixlineConfig;
use fixline_core::FixlineError;
use fixline_gateway::auth::AuthConfig;
use fixline_gateway::{GatewayConfig, GatewayState};
use fixline_presence::{ChannelNotifier, InMemoryRegistry, MessageRouter, PresenceHandler};
use fixline_storage::SqliteStore;

/// Runs the `fixline serve` command.
pub async fn run_serve(config: FixlineConfig) -> Result<(), FixlineError> {
    init_tracing(&config.service.log_level);

    info!("starting fixline serve");

    let store = Arc::new(SqliteStore::new(config.storage.clone()));
    store.initialize().await?;

    let registry = InMemoryRegistry::shared();
    let assignments = Arc::new(AssignmentService::new(
        store.clone(),
        store.clone(),
        ChannelNotifier::new(registry.clone()),
    ));

    let state = GatewayState {
        store: store.clone(),
        directory: store.clone(),
        assignments,
        presence: PresenceHandler::new(registry.clone()),
        router: MessageRouter::new(registry.clone()),
        registry,
        auth: AuthConfig {
            bearer_token: config.server.bearer_token.clone(),
        },
        started_at: std::time::Instant::now(),
    };

    let gateway_config = GatewayConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        bearer_token: config.server.bearer_token.clone(),
        cors_origin: config.server.cors_origin.clone(),
    };

    tokio::select! {
        result = fixline_gateway::start_server(&gateway_config, state) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    store.close().await?;
    info!("fixline serve shutdown complete");
    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fixline={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
