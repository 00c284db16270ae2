//! Great-circle kinematics on a spherical Earth.

use crate::types::{EARTH_RADIUS_KM, Position};

/// Great-circle distance in km (haversine).
pub fn distance(a: Position, b: Position) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Initial bearing from `a` to `b` in radians, clockwise from north.
///
/// Returns 0.0 for coincident points rather than an arbitrary angle.
pub fn bearing(a: Position, b: Position) -> f64 {
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let y = d_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();
    if y == 0.0 && x == 0.0 {
        return 0.0;
    }
    y.atan2(x)
}

/// Point reached after travelling `distance_km` from `origin` along `bearing` (radians).
pub fn project(origin: Position, bearing: f64, distance_km: f64) -> Position {
    let angular = distance_km / EARTH_RADIUS_KM;
    let lat1 = origin.lat.to_radians();
    let lng1 = origin.lng.to_radians();

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let lng2 = lng1
        + (bearing.sin() * angular.sin() * lat1.cos()).atan2(angular.cos() - lat1.sin() * lat2.sin());

    Position::new(lat2.to_degrees(), wrap_longitude(lng2.to_degrees()))
}

/// Folds a longitude in degrees into [-180, 180).
pub fn wrap_longitude(lng: f64) -> f64 {
    (lng + 540.0).rem_euclid(360.0) - 180.0
}
