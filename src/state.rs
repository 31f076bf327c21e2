use dashmap::DashMap;
use tokio::sync::{RwLock, broadcast, mpsc};
use uuid::Uuid;

use crate::engine::clock::PlaybackClock;
use crate::engine::control::PlaybackCommand;
use crate::models::position::PositionEvent;
use crate::models::rental::Rental;
use crate::models::route::Route;
use crate::observability::metrics::Metrics;

pub struct AppState {
    /// Routes keyed by `"<start>-<end>"`.
    pub routes: DashMap<String, Route>,
    pub rentals: DashMap<Uuid, Rental>,
    pub clock: RwLock<PlaybackClock>,
    pub command_tx: mpsc::Sender<PlaybackCommand>,
    pub position_events_tx: broadcast::Sender<PositionEvent>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(
        clock: PlaybackClock,
        command_queue_size: usize,
        event_buffer_size: usize,
    ) -> (Self, mpsc::Receiver<PlaybackCommand>) {
        let (command_tx, command_rx) = mpsc::channel(command_queue_size);
        let (position_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        (
            Self {
                routes: DashMap::new(),
                rentals: DashMap::new(),
                clock: RwLock::new(clock),
                command_tx,
                position_events_tx,
                metrics: Metrics::new(),
            },
            command_rx,
        )
    }
}
