use glam::DVec2;
use serde::Serialize;

use crate::error::{positive_mm, Quantity, Result};
use crate::format::{format_distance_m, INFINITY_LIMIT_M};
use crate::math::{clip, NonlinearScale};
use crate::optics::{
    diffraction, dof, fov, ApertureStop, ConfusionMode, ConfusionSetting, DepthOfField,
    SensorGeometry,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Config {
    /// Closest near bound the focus control exposes, and the left end of its scale.
    pub near_limit_m: f64,
    /// Right end of the focus scale, standing in for infinity.
    pub max_distance_m: f64,
    pub min_focal_length_mm: f64,
    pub max_focal_length_mm: f64,
    /// Highest index of the focus control.
    pub scale_positions: u32,
}

impl Config {
    const DEFAULT: Self = Self {
        near_limit_m: 0.125,
        max_distance_m: 999.0,
        min_focal_length_mm: 1.0,
        max_focal_length_mm: 1000.0,
        scale_positions: 999,
    };

    pub fn scale(&self) -> NonlinearScale {
        NonlinearScale::new(self.near_limit_m, self.max_distance_m, self.scale_positions)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything needed to work out what is sharp: sensor, lens, aperture,
/// circle of confusion and focus distance.
///
/// Every query is computed from the current parameters; nothing is cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    pub config: Config,
    sensor: SensorGeometry,
    focal_length_mm: f64,
    aperture: ApertureStop,
    confusion: ConfusionSetting,
    // as requested, clamped on read against the current minimum focus
    focus_distance_m: f64,
}

impl Camera {
    const DEFAULT: Self = Self {
        config: Config::DEFAULT,
        sensor: SensorGeometry::APS_C,
        focal_length_mm: 24.0,
        aperture: ApertureStop::F8,
        confusion: ConfusionSetting::DEFAULT,
        focus_distance_m: 3.0,
    };

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::DEFAULT
        }
    }

    pub fn sensor(&self) -> &SensorGeometry {
        &self.sensor
    }

    pub fn set_sensor(&mut self, sensor: SensorGeometry) {
        self.sensor = sensor;
    }

    pub fn focal_length_mm(&self) -> f64 {
        self.focal_length_mm
    }

    /// Fails on non-positive lengths, clamps positive ones into the configured range.
    pub fn set_focal_length_mm(&mut self, focal_length_mm: f64) -> Result<()> {
        let requested = positive_mm(Quantity::FocalLength, focal_length_mm)?;
        let clamped = clip(
            requested,
            self.config.min_focal_length_mm,
            self.config.max_focal_length_mm,
        );
        if clamped != requested {
            log::debug!("focal length {requested} mm clamped to {clamped} mm");
        }
        self.focal_length_mm = clamped;
        Ok(())
    }

    pub fn aperture(&self) -> ApertureStop {
        self.aperture
    }

    /// True f-number of the selected stop.
    pub fn f_number(&self) -> f64 {
        self.aperture.f_number()
    }

    pub fn set_aperture_stop(&mut self, stop: ApertureStop) {
        self.aperture = stop;
    }

    /// Selects the stop with the nearest nominal value.
    pub fn set_f_number(&mut self, f_number: f64) {
        let stop = ApertureStop::nearest(f_number);
        if stop.nominal() != f_number {
            log::debug!("f/{f_number} snapped to f/{}", stop.nominal());
        }
        self.aperture = stop;
    }

    pub fn confusion(&self) -> &ConfusionSetting {
        &self.confusion
    }

    pub fn confusion_mm(&self) -> f64 {
        self.confusion.value_mm(&self.sensor)
    }

    pub fn set_confusion_mode(&mut self, mode: ConfusionMode) {
        self.confusion.set_mode(mode);
    }

    pub fn set_custom_confusion_mm(&mut self, confusion_mm: f64) -> Result<()> {
        self.confusion.set_custom_mm(confusion_mm)
    }

    /// The focus distance, clamped into `[minimum_focus_distance_m, max_distance_m]`.
    pub fn focus_distance_m(&self) -> f64 {
        clip(
            self.focus_distance_m,
            self.minimum_focus_distance_m(),
            self.config.max_distance_m,
        )
    }

    pub fn set_focus_distance_m(&mut self, distance_m: f64) {
        if distance_m.is_nan() {
            log::warn!("ignoring NaN focus distance");
            return;
        }
        self.focus_distance_m = distance_m;
        let clamped = self.focus_distance_m();
        if clamped != distance_m {
            log::debug!("focus distance {distance_m} m clamped to {clamped} m");
        }
    }

    pub fn minimum_focus_distance_m(&self) -> f64 {
        dof::minimum_focus_m(
            self.hyperfocal_m(),
            self.focal_length_mm,
            self.config.near_limit_m,
        )
    }

    pub fn depth_of_field(&self) -> DepthOfField {
        DepthOfField::new(
            self.focal_length_mm,
            self.f_number(),
            self.confusion_mm(),
            self.focus_distance_m(),
        )
    }

    pub fn hyperfocal_m(&self) -> f64 {
        dof::hyperfocal_m(self.focal_length_mm, self.f_number(), self.confusion_mm())
    }

    pub fn near_bound_m(&self) -> f64 {
        self.depth_of_field().near_m
    }

    /// Infinite exactly when focused at or beyond the hyperfocal distance.
    pub fn far_bound_m(&self) -> f64 {
        self.depth_of_field().far_m
    }

    pub fn depth_of_field_m(&self) -> f64 {
        self.depth_of_field().depth_m()
    }

    pub fn fov_degrees(&self) -> f64 {
        fov::fov_degrees(&self.sensor, self.focal_length_mm)
    }

    pub fn focus_plane_m(&self) -> DVec2 {
        fov::focus_plane_m(&self.sensor, self.focal_length_mm, self.focus_distance_m())
    }

    pub fn plane_width_m(&self) -> f64 {
        self.focus_plane_m().x
    }

    pub fn plane_height_m(&self) -> f64 {
        self.focus_plane_m().y
    }

    pub fn airy_diameter_mm(&self) -> f64 {
        diffraction::airy_diameter_mm(self.f_number())
    }

    pub fn is_diffraction_limited(&self) -> bool {
        diffraction::is_diffraction_limited(self.f_number(), self.confusion_mm())
    }

    pub fn format_distance(&self, distance_m: f64) -> String {
        format_distance_m(distance_m, INFINITY_LIMIT_M)
    }

    pub fn scale(&self) -> NonlinearScale {
        self.config.scale()
    }

    pub fn scale_position_to_distance_m(&self, position: u32) -> f64 {
        self.scale().position_to_distance(position)
    }

    pub fn distance_to_scale_position(&self, distance_m: f64) -> u32 {
        self.scale().distance_to_position(distance_m)
    }

    pub fn focus_scale_position(&self) -> u32 {
        self.distance_to_scale_position(self.focus_distance_m())
    }

    pub fn set_focus_scale_position(&mut self, position: u32) {
        self.set_focus_distance_m(self.scale_position_to_distance_m(position));
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::Error;
    use crate::optics::ConfusionFormula;

    fn full_frame(focal_length_mm: f64, f_number: f64, focus_m: f64) -> Camera {
        let mut camera = Camera::new();
        camera.set_sensor(SensorGeometry::FULL_FRAME);
        camera.set_focal_length_mm(focal_length_mm).unwrap();
        camera.set_f_number(f_number);
        camera.set_focus_distance_m(focus_m);
        camera
    }

    #[test]
    fn defaults() {
        let camera = Camera::new();
        assert_eq!(camera.focal_length_mm(), 24.0);
        assert_eq!(camera.aperture().nominal(), 8.0);
        assert_eq!(camera.focus_distance_m(), 3.0);
        assert_eq!(
            camera.confusion().mode(),
            ConfusionMode::Derived(ConfusionFormula::Zeiss)
        );
    }

    #[test]
    fn focal_length_is_validated_then_clamped() {
        let mut camera = Camera::new();
        assert!(matches!(
            camera.set_focal_length_mm(0.0),
            Err(Error::InvalidGeometry {
                quantity: Quantity::FocalLength,
                ..
            })
        ));
        assert_eq!(camera.focal_length_mm(), 24.0);

        camera.set_focal_length_mm(0.5).unwrap();
        assert_eq!(camera.focal_length_mm(), 1.0);
        camera.set_focal_length_mm(4000.0).unwrap();
        assert_eq!(camera.focal_length_mm(), 1000.0);
    }

    #[test]
    fn focus_is_clamped_not_rejected() {
        let mut camera = full_frame(24.0, 2.8, 3.0);
        camera.set_focus_distance_m(0.01);
        assert_relative_eq!(camera.focus_distance_m(), camera.minimum_focus_distance_m());
        assert_relative_eq!(camera.near_bound_m(), 0.125, max_relative = 1e-9);

        camera.set_focus_distance_m(1e9);
        assert_eq!(camera.focus_distance_m(), 999.0);

        camera.set_focus_distance_m(f64::NAN);
        assert_eq!(camera.focus_distance_m(), 999.0);
    }

    #[test]
    fn focus_request_survives_aperture_change() {
        let mut camera = full_frame(10.0, 22.0, 0.2);
        let minimum_at_f22 = camera.minimum_focus_distance_m();
        assert!(minimum_at_f22 > 0.2);
        assert_eq!(camera.focus_distance_m(), minimum_at_f22);

        camera.set_f_number(1.4);
        assert!(camera.minimum_focus_distance_m() < 0.2);
        assert_eq!(camera.focus_distance_m(), 0.2);
    }

    #[test]
    fn long_lens_cannot_focus_inside_its_image_distance() {
        let mut camera = full_frame(400.0, 5.6, 3.0);
        camera.set_focus_distance_m(0.2);
        assert_relative_eq!(camera.focus_distance_m(), 1.6);

        let focus = camera.focus_distance_m();
        assert!(camera.near_bound_m() < focus && focus < camera.far_bound_m());
        assert!(camera.plane_width_m() > 0.0 && camera.plane_height_m() > 0.0);
    }

    #[test]
    fn far_bound_goes_infinite_at_hyperfocal() {
        let mut camera = full_frame(24.0, 8.0, 1.0);
        let hyperfocal = camera.hyperfocal_m();
        assert!(camera.far_bound_m().is_finite());
        camera.set_focus_distance_m(hyperfocal);
        assert!(camera.far_bound_m().is_infinite());
        assert!(camera.depth_of_field_m().is_infinite());
        assert_relative_eq!(camera.near_bound_m(), hyperfocal / 2.0, max_relative = 1e-9);
    }

    #[test]
    fn queries_follow_parameters() {
        let mut camera = full_frame(50.0, 8.0, 5.05);
        assert_relative_eq!(camera.plane_width_m(), 3.6, max_relative = 1e-9);
        assert_relative_eq!(camera.plane_height_m(), 2.4, max_relative = 1e-9);
        let wide = camera.fov_degrees();
        camera.set_focal_length_mm(100.0).unwrap();
        assert!(camera.fov_degrees() < wide);
    }

    #[test]
    fn diffraction_flag_follows_aperture_and_confusion() {
        let mut camera = full_frame(50.0, 5.6, 3.0);
        assert!(!camera.is_diffraction_limited());
        camera.set_f_number(22.0);
        assert!(camera.is_diffraction_limited());
        camera.set_custom_confusion_mm(0.05).unwrap();
        assert!(!camera.is_diffraction_limited());
    }

    #[test]
    fn custom_confusion_isolated_from_mode_switch() {
        let mut camera = Camera::new();
        camera.set_custom_confusion_mm(0.02).unwrap();
        camera.set_confusion_mode(ConfusionMode::Derived(ConfusionFormula::Digital));
        assert_ne!(camera.confusion_mm(), 0.02);
        camera.set_sensor(SensorGeometry::FULL_FRAME);
        camera.set_confusion_mode(ConfusionMode::Custom);
        assert_eq!(camera.confusion_mm(), 0.02);
    }

    #[test]
    fn scale_positions() {
        let mut camera = full_frame(24.0, 8.0, 3.0);
        let position = camera.focus_scale_position();
        assert!(position > 0 && position < 999);
        assert!(camera.scale_position_to_distance_m(position) <= 3.0);

        camera.set_focus_scale_position(999);
        assert_eq!(camera.focus_distance_m(), 999.0);
        camera.set_focus_scale_position(0);
        assert_eq!(camera.focus_distance_m(), camera.minimum_focus_distance_m());
    }

    #[test]
    fn formats_with_default_limit() {
        let camera = Camera::new();
        assert_eq!(camera.format_distance(0.0005), "500 µm");
        assert_eq!(camera.format_distance(f64::INFINITY), "inf");
    }
}
