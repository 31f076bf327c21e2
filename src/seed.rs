use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::rental::Rental;
use crate::models::route::{LineString, Route};
use crate::state::AppState;

#[derive(Deserialize)]
struct RouteRecord {
    start_station: String,
    end_station: String,
    geometry: LineString,
}

#[derive(Deserialize)]
struct RentalRecord {
    start_station: String,
    end_station: String,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
}

/// Loads `routes.json` and `rentals.json` from `dir`. Either file may
/// be absent; malformed content is an error.
pub fn load_from_dir(state: &AppState, dir: &Path) -> Result<(), AppError> {
    let routes_path = dir.join("routes.json");
    if routes_path.exists() {
        let records: Vec<RouteRecord> = read_json(&routes_path)?;
        let total = records.len();
        for record in records {
            let route =
                Route::from_geometry(record.start_station, record.end_station, record.geometry)?;
            state.routes.insert(route.key(), route);
        }
        info!(count = total, path = %routes_path.display(), "routes loaded");
    } else {
        warn!(path = %routes_path.display(), "no routes file; skipping");
    }

    let rentals_path = dir.join("rentals.json");
    if rentals_path.exists() {
        let records: Vec<RentalRecord> = read_json(&rentals_path)?;
        let total = records.len();
        for record in records {
            let rental = Rental::new(
                record.start_station,
                record.end_station,
                record.started_at,
                record.ended_at,
            )?;
            state.rentals.insert(rental.id, rental);
        }
        info!(count = total, path = %rentals_path.display(), "rentals loaded");
    } else {
        warn!(path = %rentals_path.display(), "no rentals file; skipping");
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|err| AppError::Internal(format!("failed to read {}: {err}", path.display())))?;

    serde_json::from_str(&raw)
        .map_err(|err| AppError::Internal(format!("failed to parse {}: {err}", path.display())))
}
