use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::route::route_key;

/// One bike rental: a trip from a start station to an end station over
/// a known wall-clock window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rental {
    pub id: Uuid,
    pub start_station: String,
    pub end_station: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_secs: i64,
}

impl Rental {
    pub fn new(
        start_station: String,
        end_station: String,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        if start_station.trim().is_empty() || end_station.trim().is_empty() {
            return Err(AppError::BadRequest(
                "station codes cannot be empty".to_string(),
            ));
        }

        if ended_at <= started_at {
            return Err(AppError::BadRequest(
                "rental must end after it starts".to_string(),
            ));
        }

        let duration_secs = (ended_at - started_at).num_seconds();

        Ok(Self {
            id: Uuid::new_v4(),
            start_station,
            end_station,
            started_at,
            ended_at,
            duration_secs,
        })
    }

    /// Key of the route this rental travels along.
    pub fn route_key(&self) -> String {
        route_key(&self.start_station, &self.end_station)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::Rental;

    #[test]
    fn duration_is_derived_from_the_trip_window() {
        let started = Utc.with_ymd_and_hms(2011, 5, 18, 9, 0, 0).unwrap();
        let ended = Utc.with_ymd_and_hms(2011, 5, 18, 9, 20, 0).unwrap();

        let rental = Rental::new("A1".to_string(), "B2".to_string(), started, ended).unwrap();
        assert_eq!(rental.duration_secs, 20 * 60);
        assert_eq!(rental.route_key(), "A1-B2");
    }

    #[test]
    fn rental_ending_before_it_starts_is_rejected() {
        let started = Utc.with_ymd_and_hms(2011, 5, 18, 9, 0, 0).unwrap();
        let ended = Utc.with_ymd_and_hms(2011, 5, 18, 8, 0, 0).unwrap();
        assert!(Rental::new("A1".to_string(), "B2".to_string(), started, ended).is_err());
    }

    #[test]
    fn zero_length_rental_is_rejected() {
        let at = Utc.with_ymd_and_hms(2011, 5, 18, 9, 0, 0).unwrap();
        assert!(Rental::new("A1".to_string(), "B2".to_string(), at, at).is_err());
    }
}
