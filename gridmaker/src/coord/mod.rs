//! Geodesy helpers
//!
//! Great-circle destination points on a spherical Earth and the bearing
//! convention used by the grid generator.

mod types;

pub use types::{CoordError, GeoPoint, EARTH_RADIUS_M, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Converts degrees to radians.
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

/// Converts radians to degrees.
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Converts a grid rotation into a compass bearing for the row axis.
///
/// Rotation is measured clockwise from east, so a rotation of 0° yields a
/// bearing of 90° (due east) and a rotation of 90° yields 0° (due north).
/// The result is always in `[0, 360)`.
#[inline]
pub fn row_axis_bearing(rotation_deg: f64) -> f64 {
    (90.0 - rotation_deg).rem_euclid(360.0)
}

/// Computes the point reached by travelling `distance_m` meters from
/// `origin` along the initial great-circle `bearing_deg`.
///
/// Uses a spherical Earth of radius [`EARTH_RADIUS_M`].
pub fn destination_point(origin: GeoPoint, distance_m: f64, bearing_deg: f64) -> GeoPoint {
    let angular = distance_m / EARTH_RADIUS_M;
    let lat1 = deg_to_rad(origin.lat);
    let lon1 = deg_to_rad(origin.lon);
    let bearing = deg_to_rad(bearing_deg);

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * angular.sin() * lat1.cos())
            .atan2(angular.cos() - lat1.sin() * lat2.sin());

    GeoPoint {
        lon: rad_to_deg(lon2),
        lat: rad_to_deg(lat2),
    }
}
