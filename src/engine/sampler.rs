use chrono::{DateTime, Utc};

use crate::geo::{self, GeoPoint};
use crate::models::position::PositionEvent;
use crate::models::rental::Rental;
use crate::models::route::Route;

/// Rentals longer than this replay as if they took this long, so a bike
/// parked out all afternoon still finishes its traversal on screen.
const RENTAL_DURATION_CAP_SECS: f64 = 5.0 * 60.0 * 60.0;

/// Fraction of the rental already travelled at simulated time `now`,
/// in `[0, 1)`. `None` before the rental starts and once it completes.
pub fn progress_at(rental: &Rental, now: DateTime<Utc>) -> Option<f64> {
    if now < rental.started_at {
        return None;
    }

    let duration = (rental.duration_secs as f64).min(RENTAL_DURATION_CAP_SECS);
    if duration <= 0.0 {
        return None;
    }

    let elapsed = (now - rental.started_at).num_milliseconds() as f64 / 1_000.0;
    if elapsed >= duration {
        return None;
    }

    Some(elapsed / duration)
}

/// Point reached after travelling `progress` of the route's length.
pub fn point_along(route: &Route, progress: f64) -> Option<GeoPoint> {
    geo::coord_at_distance(&route.line, progress * route.length)
}

/// Marker position for a rental at simulated time `now`, or `None`
/// when the rental is not in flight (or its route cannot place it).
pub fn position_at(rental: &Rental, route: &Route, now: DateTime<Utc>) -> Option<PositionEvent> {
    let progress = progress_at(rental, now)?;
    let position = point_along(route, progress)?;

    Some(PositionEvent {
        rental_id: rental.id,
        position,
        progress,
        at: now,
    })
}
