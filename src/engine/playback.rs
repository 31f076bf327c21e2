use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::control::PlaybackCommand;
use crate::engine::sampler;
use crate::models::position::PositionEvent;
use crate::state::AppState;

/// Drives the replay: applies playback commands, ticks the clock, and
/// broadcasts an interpolated position for every rental in flight at
/// the current simulated instant.
pub async fn run_playback_engine(
    state: Arc<AppState>,
    mut command_rx: mpsc::Receiver<PlaybackCommand>,
    tick_interval: Duration,
) {
    info!(tick_ms = tick_interval.as_millis() as u64, "playback engine started");

    let mut ticker = tokio::time::interval(tick_interval);

    loop {
        tokio::select! {
            maybe_command = command_rx.recv() => {
                match maybe_command {
                    Some(command) => {
                        state.metrics.commands_in_queue.dec();
                        apply_command(&state, command).await;
                    }
                    None => {
                        warn!("playback engine stopped: command channel closed");
                        return;
                    }
                }
            }
            _ = ticker.tick() => {
                let start = Instant::now();
                if let Some(active) = replay_tick(&state, tick_interval).await {
                    state
                        .metrics
                        .tick_latency_seconds
                        .observe(start.elapsed().as_secs_f64());
                    state.metrics.rentals_active.set(active as i64);
                }
            }
        }
    }
}

async fn apply_command(state: &AppState, command: PlaybackCommand) {
    let mut clock = state.clock.write().await;

    match command {
        PlaybackCommand::Play => {
            clock.play();
            info!(time_of_day = %clock.time_of_day(), "playback started");
        }
        PlaybackCommand::Pause => {
            clock.pause();
            info!(time_of_day = %clock.time_of_day(), "playback paused");
        }
        PlaybackCommand::SeekTo(position_secs) => {
            clock.seek_to(position_secs);
            info!(
                position_secs = clock.position_secs(),
                time_of_day = %clock.time_of_day(),
                "playback seeked"
            );
        }
    }
}

/// One replay step. Returns the number of rentals in flight, or `None`
/// when the clock is paused and nothing was sampled.
async fn replay_tick(state: &Arc<AppState>, wall_dt: Duration) -> Option<usize> {
    let now = {
        let mut clock = state.clock.write().await;
        if !clock.is_playing() {
            return None;
        }
        clock.advance(wall_dt);
        state.metrics.replay_progress.set(clock.progress());
        clock.current_time()
    };

    let mut active = 0;

    for entry in state.rentals.iter() {
        let rental = entry.value();

        let Some(progress) = sampler::progress_at(rental, now) else {
            continue;
        };

        // TODO: round trips share a start and end station, so no route
        // is stored for them and they never animate.
        let Some(route) = state.routes.get(&rental.route_key()) else {
            continue;
        };

        active += 1;

        match sampler::point_along(route.value(), progress) {
            Some(position) => {
                state
                    .metrics
                    .positions_total
                    .with_label_values(&["emitted"])
                    .inc();

                let _ = state.position_events_tx.send(PositionEvent {
                    rental_id: rental.id,
                    position,
                    progress,
                    at: now,
                });
            }
            None => {
                // The requested distance overshot the route; leave the
                // marker unplaced for this tick.
                state
                    .metrics
                    .positions_total
                    .with_label_values(&["unreachable"])
                    .inc();
                debug!(rental_id = %rental.id, progress, "no coordinate at requested distance");
            }
        }
    }

    Some(active)
}
