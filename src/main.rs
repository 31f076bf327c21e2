mod api;
mod config;
mod engine;
mod error;
mod geo;
mod models;
mod observability;
mod seed;
mod state;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::engine::clock::PlaybackClock;

#[tokio::main]
async fn main() -> Result<(), error::AppError> {
    let config = config::Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let clock = PlaybackClock::new(
        config.replay_date,
        config.replay_start_offset_secs,
        config.replay_window_secs,
        config.replay_speedup,
    );

    let (app_state, command_rx) = state::AppState::new(
        clock,
        config.command_queue_size,
        config.event_buffer_size,
    );
    let shared_state = Arc::new(app_state);

    if let Some(dir) = &config.data_dir {
        seed::load_from_dir(&shared_state, dir)?;
    }

    let app = api::rest::router(shared_state.clone());

    tokio::spawn(engine::playback::run_playback_engine(
        shared_state.clone(),
        command_rx,
        Duration::from_millis(config.tick_interval_ms),
    ));

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| error::AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(http_port = config.http_port, "http server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| error::AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
