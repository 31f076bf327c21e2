use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::sampler;
use crate::error::AppError;
use crate::geo::GeoPoint;
use crate::models::rental::Rental;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rentals", post(create_rental).get(list_rentals))
        .route("/rentals/:id", get(get_rental))
        .route("/rentals/:id/position", get(get_rental_position))
}

#[derive(Deserialize)]
pub struct CreateRentalRequest {
    pub start_station: String,
    pub end_station: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

async fn create_rental(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRentalRequest>,
) -> Result<Json<Rental>, AppError> {
    let rental = Rental::new(
        payload.start_station,
        payload.end_station,
        payload.started_at,
        payload.ended_at,
    )?;

    state.rentals.insert(rental.id, rental.clone());
    Ok(Json(rental))
}

async fn list_rentals(State(state): State<Arc<AppState>>) -> Json<Vec<Rental>> {
    let rentals = state
        .rentals
        .iter()
        .map(|entry| entry.value().clone())
        .collect();
    Json(rentals)
}

async fn get_rental(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Rental>, AppError> {
    let rental = state
        .rentals
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("rental {} not found", id)))?;

    Ok(Json(rental.value().clone()))
}

#[derive(Deserialize)]
pub struct PositionQuery {
    pub at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct PositionResponse {
    pub rental_id: Uuid,
    pub at: DateTime<Utc>,
    /// `None` when the rental is not in flight at `at`, has no stored
    /// route, or the route cannot place it. All are normal outcomes.
    pub progress: Option<f64>,
    pub position: Option<GeoPoint>,
}

async fn get_rental_position(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<PositionQuery>,
) -> Result<Json<PositionResponse>, AppError> {
    let rental = state
        .rentals
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("rental {} not found", id)))?;

    let event = state
        .routes
        .get(&rental.route_key())
        .and_then(|route| sampler::position_at(rental.value(), route.value(), query.at));

    Ok(Json(PositionResponse {
        rental_id: id,
        at: query.at,
        progress: event.as_ref().map(|event| event.progress),
        position: event.map(|event| event.position),
    }))
}
