use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::GeoPoint;

/// Interpolated marker position for one rental at a simulated instant.
/// This is the unit streamed to websocket subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionEvent {
    pub rental_id: Uuid,
    pub position: GeoPoint,
    /// Fraction of the (capped) rental duration already elapsed, in `[0, 1)`.
    pub progress: f64,
    pub at: DateTime<Utc>,
}
