use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::geo::{self, GeoPoint};

/// GeoJSON-style geometry as it arrives on the wire. Only `LineString`
/// is meaningful for a route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineString {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: Vec<[f64; 2]>,
}

/// Path between a pair of stations, keyed by `"<start>-<end>"`.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    pub start_station: String,
    pub end_station: String,
    pub line: Vec<GeoPoint>,
    /// Total length as a haversine central angle, cached at ingest.
    pub length: f64,
}

pub fn route_key(start_station: &str, end_station: &str) -> String {
    format!("{start_station}-{end_station}")
}

impl Route {
    pub fn from_geometry(
        start_station: String,
        end_station: String,
        geometry: LineString,
    ) -> Result<Self, AppError> {
        if start_station.trim().is_empty() || end_station.trim().is_empty() {
            return Err(AppError::BadRequest(
                "station codes cannot be empty".to_string(),
            ));
        }

        if geometry.geometry_type != "LineString" {
            return Err(AppError::BadRequest(format!(
                "unsupported geometry type: {}",
                geometry.geometry_type
            )));
        }

        let line: Vec<GeoPoint> = geometry.coordinates.into_iter().map(GeoPoint::from).collect();
        let length = geo::line_length(&line);

        Ok(Self {
            start_station,
            end_station,
            line,
            length,
        })
    }

    pub fn key(&self) -> String {
        route_key(&self.start_station, &self.end_station)
    }
}
