//! tickwatch - A clock, stopwatch and dual countdown timer with alarms
//!
//! This is the main entry point for the tickwatch application.

use std::{io, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use tickwatch::{
    api::create_router,
    clock::SystemClock,
    config::Config,
    preferences::Preferences,
    state::AppState,
    tasks::{display_task, tick_task},
    utils::shutdown_signal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the display
    tracing_subscriber::fmt()
        .with_env_filter(format!("tickwatch={},tower_http=info", config.log_level()))
        .with_writer(io::stderr)
        .init();

    info!("Starting tickwatch v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, mode={}, tick={}ms",
          config.host, config.port, config.mode, config.tick_ms);

    let preferences_path = config.preferences_path();
    let preferences = Preferences::load(&preferences_path);

    // Create application state
    let state = Arc::new(AppState::new(
        Arc::new(SystemClock),
        config.mode,
        preferences,
        preferences_path,
        config.port,
        config.host.clone(),
    ));

    // Start the periodic tick task
    let tick_state = Arc::clone(&state);
    let tick_period = config.tick_period();
    tokio::spawn(async move {
        tick_task(tick_state, tick_period).await;
    });

    if !config.headless {
        tokio::spawn(display_task(Arc::clone(&state)));
    }

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Control API on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /toggle, /reset, /mode/next     - Displayed mode controls");
    info!("  PUT  /mode                           - Select displayed mode");
    info!("  POST /timers/:mode/:action           - start|stop|toggle|reset a mode");
    info!("  PUT  /fields/:field                  - Set hours|minutes|seconds");
    info!("  POST /fields/:field/increase|decrease");
    info!("  POST /fields/:field/press/:direction - Press and hold; /release to stop");
    info!("  GET|PUT /preferences, POST /preferences/save");
    info!("  GET  /status, /health");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if !config.headless {
        println!();
    }
    info!("Shutdown complete");
    Ok(())
}
