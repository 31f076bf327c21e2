use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::geo;
use crate::models::route::{LineString, Route};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/routes", post(create_route).get(list_routes))
        .route("/routes/:key", get(get_route))
}

#[derive(Deserialize)]
pub struct CreateRouteRequest {
    pub start_station: String,
    pub end_station: String,
    pub geometry: LineString,
}

#[derive(Serialize)]
pub struct RouteSummary {
    pub key: String,
    pub start_station: String,
    pub end_station: String,
    pub points: usize,
    pub length_km: f64,
}

impl RouteSummary {
    fn of(route: &Route) -> Self {
        Self {
            key: route.key(),
            start_station: route.start_station.clone(),
            end_station: route.end_station.clone(),
            points: route.line.len(),
            length_km: geo::to_km(route.length),
        }
    }
}

async fn create_route(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRouteRequest>,
) -> Result<Json<RouteSummary>, AppError> {
    let route = Route::from_geometry(payload.start_station, payload.end_station, payload.geometry)?;

    let key = route.key();
    if state.routes.contains_key(&key) {
        return Err(AppError::Conflict(format!("route {key} already exists")));
    }

    let summary = RouteSummary::of(&route);
    state.routes.insert(key, route);

    Ok(Json(summary))
}

async fn list_routes(State(state): State<Arc<AppState>>) -> Json<Vec<RouteSummary>> {
    let routes = state
        .routes
        .iter()
        .map(|entry| RouteSummary::of(entry.value()))
        .collect();
    Json(routes)
}

async fn get_route(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<Route>, AppError> {
    let route = state
        .routes
        .get(&key)
        .ok_or_else(|| AppError::NotFound(format!("route {} not found", key)))?;

    Ok(Json(route.value().clone()))
}
