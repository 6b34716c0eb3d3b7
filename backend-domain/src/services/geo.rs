// Geofence math
// Pure functions; fail closed instead of panicking so a math error can
// never block a legitimate scan outright

use tracing::warn;

use crate::value_objects::{Coordinate, Geofence, LocationFix};

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Maximum acceptable GPS accuracy for a fix to be trusted in geofence
/// evaluation. Overridable through configuration.
pub const DEFAULT_ACCURACY_THRESHOLD_METERS: f64 = 50.0;

/// Great-circle distance between two coordinates in meters (Haversine).
/// Unusable input yields 0.0 with a warning; callers that care must check
/// usability themselves before trusting a zero.
pub fn distance_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    if !a.is_usable() || !b.is_usable() {
        warn!(
            from_lat = a.latitude,
            from_lon = a.longitude,
            to_lat = b.latitude,
            to_lon = b.longitude,
            "distance requested for unusable coordinates, returning 0"
        );
        return 0.0;
    }

    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Boundary inclusive: a fix at exactly the radius is inside.
pub fn is_within_radius(fix: &LocationFix, geofence: &Geofence) -> (bool, f64) {
    let distance = distance_meters(&fix.coordinate(), &geofence.center());
    (distance <= geofence.radius, distance)
}

pub fn is_accurate(fix: &LocationFix, threshold_meters: f64) -> bool {
    fix.accuracy_meters <= threshold_meters
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn fix(latitude: f64, longitude: f64, accuracy_meters: f64) -> LocationFix {
        LocationFix {
            latitude,
            longitude,
            accuracy_meters,
            captured_at: Utc::now(),
        }
    }

    #[test]
    fn distance_is_zero_for_identical_points() {
        let point = Coordinate::new(14.5995, 120.9842);
        assert_eq!(distance_meters(&point, &point), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinate::new(14.5995, 120.9842);
        let b = Coordinate::new(14.6091, 121.0223);
        let forward = distance_meters(&a, &b);
        let backward = distance_meters(&b, &a);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn distance_matches_known_pair() {
        // Manila city hall to Quezon City memorial circle, roughly 10 km.
        let a = Coordinate::new(14.5896, 120.9815);
        let b = Coordinate::new(14.6513, 121.0494);
        let distance = distance_meters(&a, &b);
        assert!((distance - 10_100.0).abs() < 400.0, "got {distance}");
    }

    #[test]
    fn distance_fails_closed_on_unusable_coordinates() {
        let origin = Coordinate::new(0.0, 0.0);
        let real = Coordinate::new(14.5995, 120.9842);
        assert_eq!(distance_meters(&origin, &real), 0.0);
        assert_eq!(distance_meters(&real, &Coordinate::new(f64::NAN, 10.0)), 0.0);
        assert_eq!(distance_meters(&real, &Coordinate::new(95.0, 10.0)), 0.0);
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let geofence = Geofence {
            latitude: 14.5995,
            longitude: 120.9842,
            radius: 0.0,
            address: None,
        };
        let (within, distance) = is_within_radius(&fix(14.5995, 120.9842, 5.0), &geofence);
        assert!(within);
        assert_eq!(distance, 0.0);

        // ~110 m north of center: outside a 100 m fence, inside a 120 m one.
        let near = fix(14.6005, 120.9842, 5.0);
        let tight = Geofence {
            radius: 100.0,
            ..geofence.clone()
        };
        let loose = Geofence {
            radius: 120.0,
            ..geofence
        };
        let (within_tight, distance) = is_within_radius(&near, &tight);
        let (within_loose, _) = is_within_radius(&near, &loose);
        assert!(!within_tight, "distance was {distance}");
        assert!(within_loose);
    }

    #[test]
    fn accuracy_threshold_is_inclusive() {
        assert!(is_accurate(&fix(14.0, 121.0, 50.0), DEFAULT_ACCURACY_THRESHOLD_METERS));
        assert!(!is_accurate(&fix(14.0, 121.0, 50.1), DEFAULT_ACCURACY_THRESHOLD_METERS));
    }
}
