use kurbo::Point;

use crate::foundation::core::GeoPoint;

/// Sphere radius used by spherical web-Mercator (WGS84 semi-major axis), in meters.
pub(crate) const MERCATOR_RADIUS_M: f64 = 6_378_137.0;

/// Mean earth radius for great-circle distances, in meters.
pub(crate) const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Spherical web-Mercator projection to planar meters (y grows northwards).
pub(crate) fn mercator_meters(p: GeoPoint) -> Point {
    let x = MERCATOR_RADIUS_M * p.lon_rad();
    let y = MERCATOR_RADIUS_M * (std::f64::consts::FRAC_PI_4 + p.lat_rad() / 2.0).tan().ln();
    Point::new(x, y)
}

/// Great-circle distance in meters.
pub(crate) fn haversine_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let dlat = b.lat_rad() - a.lat_rad();
    let dlon = b.lon_rad() - a.lon_rad();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat_rad().cos() * b.lat_rad().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
