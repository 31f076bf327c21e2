use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::control::{PlaybackCommand, send_command};
use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/playback", get(playback_status))
        .route("/playback/play", post(play))
        .route("/playback/pause", post(pause))
        .route("/playback/seek", post(seek))
}

#[derive(Serialize)]
pub struct PlaybackStatus {
    pub playing: bool,
    pub position_secs: f64,
    pub progress: f64,
    pub simulated_time: DateTime<Utc>,
    pub time_of_day: String,
}

async fn playback_status(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    let clock = state.clock.read().await;

    Json(PlaybackStatus {
        playing: clock.is_playing(),
        position_secs: clock.position_secs(),
        progress: clock.progress(),
        simulated_time: clock.current_time(),
        time_of_day: clock.time_of_day().to_string(),
    })
}

async fn play(State(state): State<Arc<AppState>>) -> Result<StatusCode, AppError> {
    send_command(&state, PlaybackCommand::Play).await?;
    Ok(StatusCode::ACCEPTED)
}

async fn pause(State(state): State<Arc<AppState>>) -> Result<StatusCode, AppError> {
    send_command(&state, PlaybackCommand::Pause).await?;
    Ok(StatusCode::ACCEPTED)
}

#[derive(Deserialize)]
pub struct SeekRequest {
    /// Simulated seconds since the start of the replay window.
    pub position_secs: f64,
}

async fn seek(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SeekRequest>,
) -> Result<StatusCode, AppError> {
    if !payload.position_secs.is_finite() || payload.position_secs < 0.0 {
        return Err(AppError::BadRequest(
            "position_secs must be a non-negative number".to_string(),
        ));
    }

    send_command(&state, PlaybackCommand::SeekTo(payload.position_secs)).await?;
    Ok(StatusCode::ACCEPTED)
}
