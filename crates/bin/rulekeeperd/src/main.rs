//! # rulekeeperd: rulekeeper daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the rule store and the action executor (adapters)
//! - Construct application services, injecting adapters via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;
mod executor;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rulekeeper_adapter_http_axum::state::AppState;
use rulekeeper_adapter_storage_sqlite_sqlx::{Config as DatabaseConfig, SqliteRuleStore};
use rulekeeper_app::engine::RuleEngine;
use rulekeeper_app::services::rule_service::RuleService;

use crate::config::Config;
use crate::executor::TracingActionExecutor;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log.filter)?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database
    let db = DatabaseConfig {
        database_url: config.storage.database_url.clone(),
    }
    .build()
    .await?;
    tracing::info!("database ready");

    // Adapters
    let rule_store = SqliteRuleStore::new(db.pool().clone());
    let executor = TracingActionExecutor;

    // Services
    let rule_service = RuleService::new(rule_store.clone());
    let engine = RuleEngine::new(rule_store, executor);

    // HTTP
    let state = AppState::new(rule_service, engine);
    let app = rulekeeper_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(address = %bind_addr, "rulekeeperd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("rulekeeperd stopped");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "unable to listen for Ctrl-C");
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
                tracing::error!(error = %err, "unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
