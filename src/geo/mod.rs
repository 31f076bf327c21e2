use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// WGS84 coordinate in decimal degrees, GeoJSON axis order (lon first).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl From<[f64; 2]> for GeoPoint {
    fn from(pair: [f64; 2]) -> Self {
        Self {
            lon: pair[0],
            lat: pair[1],
        }
    }
}

/// Great-circle central angle between two points, in radians.
/// Scale with [`to_km`] or [`to_m`] to get a real-world distance.
pub fn haversine(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let sin_lat = (delta_lat / 2.0).sin();
    let sin_lon = (delta_lon / 2.0).sin();

    let h = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lon * sin_lon;
    2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

pub fn to_km(central_angle: f64) -> f64 {
    central_angle * EARTH_RADIUS_KM
}

pub fn to_m(central_angle: f64) -> f64 {
    central_angle * EARTH_RADIUS_KM * 1_000.0
}

/// Total length of a polyline as a central angle. Lines with fewer than
/// two points have length zero.
pub fn line_length(line: &[GeoPoint]) -> f64 {
    line.windows(2).map(|pair| haversine(&pair[0], &pair[1])).sum()
}

/// Coordinate at `dist` (central angle) along the polyline, measured from
/// its first point. Interpolates lon and lat linearly within the segment
/// where the cumulative length first reaches `dist`.
///
/// Returns `None` for an empty line and for `dist` beyond the total
/// length; overshoot is a normal query outcome and is never clamped to
/// the endpoint here.
pub fn coord_at_distance(line: &[GeoPoint], dist: f64) -> Option<GeoPoint> {
    let first = line.first()?;
    if dist == 0.0 {
        return Some(*first);
    }

    let mut travelled = 0.0;
    for pair in line.windows(2) {
        let segment = haversine(&pair[0], &pair[1]);
        if travelled + segment >= dist {
            let part = if segment > 0.0 {
                (dist - travelled) / segment
            } else {
                0.0
            };
            return Some(GeoPoint {
                lon: pair[0].lon + (pair[1].lon - pair[0].lon) * part,
                lat: pair[0].lat + (pair[1].lat - pair[0].lat) * part,
            });
        }
        travelled += segment;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::{GeoPoint, coord_at_distance, haversine, line_length, to_km};

    fn pt(lon: f64, lat: f64) -> GeoPoint {
        GeoPoint { lon, lat }
    }

    #[test]
    fn zero_distance_for_same_point() {
        let p = pt(-93.2513, 44.9745);
        assert!(haversine(&p, &p) < 1e-12);
    }

    #[test]
    fn haversine_is_symmetric() {
        let a = pt(-93.25, 44.97);
        let b = pt(-93.20, 44.98);
        assert!((haversine(&a, &b) - haversine(&b, &a)).abs() < 1e-15);
    }

    #[test]
    fn london_to_paris_is_around_343_km() {
        let london = pt(-0.1278, 51.5074);
        let paris = pt(2.3522, 48.8566);
        let distance = to_km(haversine(&london, &paris));
        assert!((distance - 343.0).abs() < 5.0);
    }

    #[test]
    fn degenerate_lines_have_zero_length() {
        assert_eq!(line_length(&[]), 0.0);
        assert_eq!(line_length(&[pt(-93.25, 44.97)]), 0.0);
    }

    #[test]
    fn repeated_points_contribute_nothing() {
        let line = [pt(0.0, 0.0), pt(0.0, 0.0), pt(0.0, 1.0)];
        let expected = haversine(&pt(0.0, 0.0), &pt(0.0, 1.0));
        assert!((line_length(&line) - expected).abs() < 1e-15);
    }

    #[test]
    fn appending_a_point_never_shrinks_the_line() {
        let mut line = vec![pt(0.0, 0.0), pt(0.0, 1.0)];
        let before = line_length(&line);
        line.push(pt(1.0, 1.0));
        assert!(line_length(&line) >= before);
    }

    #[test]
    fn two_equal_meridian_segments() {
        let line = [pt(0.0, 0.0), pt(0.0, 1.0), pt(0.0, 2.0)];
        let one_degree = haversine(&pt(0.0, 0.0), &pt(0.0, 1.0));
        assert!((line_length(&line) - 2.0 * one_degree).abs() < 1e-12);
    }

    #[test]
    fn zero_distance_returns_first_point() {
        let line = [pt(-93.25, 44.97), pt(-93.20, 44.98)];
        assert_eq!(coord_at_distance(&line, 0.0), Some(line[0]));
        // Defined even for a single-point line.
        assert_eq!(coord_at_distance(&line[..1], 0.0), Some(line[0]));
    }

    #[test]
    fn empty_line_has_no_coordinates() {
        assert_eq!(coord_at_distance(&[], 0.0), None);
        assert_eq!(coord_at_distance(&[], 0.1), None);
    }

    #[test]
    fn overshoot_is_unreachable() {
        let line = [pt(0.0, 0.0), pt(0.0, 1.0)];
        let total = line_length(&line);
        assert!(coord_at_distance(&line, total + 1e-9).is_none());
    }

    #[test]
    fn full_length_lands_on_the_last_point() {
        let line = [pt(0.0, 0.0), pt(0.0, 1.0), pt(0.0, 2.0)];
        let end = coord_at_distance(&line, line_length(&line)).unwrap();
        assert!((end.lon - 0.0).abs() < 1e-9);
        assert!((end.lat - 2.0).abs() < 1e-9);
    }

    #[test]
    fn interior_vertex_is_recovered_at_its_cumulative_distance() {
        let line = [pt(0.0, 0.0), pt(0.0, 1.0), pt(0.0, 2.0)];
        let one_degree = haversine(&pt(0.0, 0.0), &pt(0.0, 1.0));
        let mid = coord_at_distance(&line, one_degree).unwrap();
        assert!((mid.lon - 0.0).abs() < 1e-9);
        assert!((mid.lat - 1.0).abs() < 1e-9);
    }

    #[test]
    fn half_length_of_a_short_segment_is_near_the_midpoint() {
        let line = [pt(-93.25, 44.97), pt(-93.20, 44.98)];
        let half = line_length(&line) / 2.0;
        let mid = coord_at_distance(&line, half).unwrap();
        assert!((mid.lon - (-93.225)).abs() < 1e-6);
        assert!((mid.lat - 44.975).abs() < 1e-6);
    }

    #[test]
    fn repeated_queries_agree() {
        let line = [pt(-93.25, 44.97), pt(-93.22, 44.99), pt(-93.20, 44.98)];
        let dist = line_length(&line) * 0.37;
        assert_eq!(
            coord_at_distance(&line, dist),
            coord_at_distance(&line, dist)
        );
    }
}
