//! Field of view and the size of the focus plane.
//!
//! Focus distances are measured from the sensor plane, like the distance scale
//! engraved on a lens. The (thin) lens sits one focal length in front of the
//! sensor, so the subject is `s - f` away from it and the focus plane is the
//! sensor scaled by `(s - f) / f`.

use glam::DVec2;

use super::{SensorGeometry, MM_PER_M};

/// Diagonal angle of view, in degrees.
pub fn fov_degrees(sensor: &SensorGeometry, focal_length_mm: f64) -> f64 {
    (2.0 * (sensor.diagonal_mm() / (2.0 * focal_length_mm)).atan()).to_degrees()
}

/// Width and height, in meters, of the area in sharp focus at `focus_distance_m`.
pub fn focus_plane_m(sensor: &SensorGeometry, focal_length_mm: f64, focus_distance_m: f64) -> DVec2 {
    let subject_m = focus_distance_m - focal_length_mm / MM_PER_M;
    sensor.size_mm() * (subject_m / focal_length_mm)
}
