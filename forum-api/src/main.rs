//! Forum API Main Entry Point
//!
//! Binds the HTTP listener and serves the forum routes over the wired-up
//! vote ledger and content service.
use dotenv::dotenv;
use forum_api::http::{router, AppState};
use forum_api::{Dependencies, StartupError};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("forum_api=info,forum_ledger=info,forum_repository=info")
    });

    if env::var("LOG_JSON").is_ok() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();
    }

    info!(
        service_name = "forum-api",
        service_version = env!("CARGO_PKG_VERSION"),
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    let deps = match Dependencies::new().await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let state = AppState {
        ledger: deps.ledger,
        content: deps.content,
    };

    let listener = tokio::net::TcpListener::bind(&deps.config.bind_addr).await?;
    info!(addr = %deps.config.bind_addr, "Listening");
    axum::serve(listener, router(state)).await?;

    Ok(())
}
