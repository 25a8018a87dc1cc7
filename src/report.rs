use std::fmt;

use serde::Serialize;

use crate::camera::Camera;
use crate::format::{
    format_depth_m, format_distance_m, significant, DEPTH_INFINITY_LIMIT_M, INFINITY_LIMIT_M,
};
use crate::optics::{diffraction, ConfusionMode, DepthOfField};
use crate::ruler::{self, DistanceTick, FocusMarkers, StopTick};

/// Everything there is to show about one camera setup.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub sensor_mm: [f64; 2],
    pub crop_factor: f64,
    pub focal_length_mm: f64,
    pub f_number: f64,
    pub f_number_nominal: f64,
    pub confusion_mode: ConfusionMode,
    pub confusion_mm: f64,
    pub fov_degrees: f64,
    pub focus_plane_m: [f64; 2],
    pub focus_distance_m: f64,
    pub minimum_focus_m: f64,
    pub focus_position: u32,
    pub depth_of_field: DepthOfField,
    pub depth_text: String,
    pub airy_diameter_mm: f64,
    pub diffraction_limited: bool,
    /// Nominal f-number of the first stop limited by diffraction.
    pub diffraction_from: Option<f64>,
    pub markers: FocusMarkers,
    pub distance_ticks: Vec<DistanceTick>,
    pub aperture_ticks: Vec<StopTick>,
}

impl Report {
    pub fn new(camera: &Camera) -> Self {
        let sensor = camera.sensor();
        let depth_of_field = camera.depth_of_field();
        let confusion_mm = camera.confusion_mm();

        Self {
            sensor_mm: sensor.size_mm().to_array(),
            crop_factor: sensor.crop_factor(),
            focal_length_mm: camera.focal_length_mm(),
            f_number: camera.f_number(),
            f_number_nominal: camera.aperture().nominal(),
            confusion_mode: camera.confusion().mode(),
            confusion_mm,
            fov_degrees: camera.fov_degrees(),
            focus_plane_m: camera.focus_plane_m().to_array(),
            focus_distance_m: camera.focus_distance_m(),
            minimum_focus_m: camera.minimum_focus_distance_m(),
            focus_position: camera.focus_scale_position(),
            depth_of_field,
            depth_text: format_depth_m(depth_of_field.depth_m()),
            airy_diameter_mm: camera.airy_diameter_mm(),
            diffraction_limited: camera.is_diffraction_limited(),
            diffraction_from: diffraction::first_limited_stop(confusion_mm)
                .map(|stop| stop.nominal()),
            markers: ruler::focus_markers(camera),
            distance_ticks: ruler::distance_ticks(&camera.scale()),
            aperture_ticks: ruler::aperture_ticks(camera),
        }
    }
}

fn distance(distance_m: f64) -> String {
    format_distance_m(distance_m, INFINITY_LIMIT_M)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [width_mm, height_mm] = self.sensor_mm;
        let dof = &self.depth_of_field;
        let far = if dof.far_m >= DEPTH_INFINITY_LIMIT_M {
            "infinity".to_owned()
        } else {
            distance(dof.far_m)
        };

        writeln!(
            f,
            "sensor:           {} x {} mm (crop x{})",
            significant(width_mm, 3),
            significant(height_mm, 3),
            significant(self.crop_factor, 3),
        )?;
        writeln!(f, "focal length:     {} mm", significant(self.focal_length_mm, 4))?;
        writeln!(f, "aperture:         f/{}", significant(self.f_number_nominal, 3))?;
        writeln!(
            f,
            "confusion:        {} ({} µm)",
            self.confusion_mode,
            significant(self.confusion_mm * 1000.0, 3),
        )?;
        writeln!(f, "field of view:    {}°", significant(self.fov_degrees, 3))?;
        writeln!(
            f,
            "focus plane:      {} x {}",
            distance(self.focus_plane_m[0]),
            distance(self.focus_plane_m[1]),
        )?;
        writeln!(
            f,
            "focus:            {} (position {}, closest {})",
            distance(self.focus_distance_m),
            self.focus_position,
            distance(self.minimum_focus_m),
        )?;
        writeln!(f, "hyperfocal:       {}", distance(dof.hyperfocal_m))?;
        writeln!(f, "sharp from:       {} to {}", distance(dof.near_m), far)?;
        writeln!(f, "depth of field:   {}", self.depth_text)?;
        write!(
            f,
            "airy disk:        {} µm",
            significant(self.airy_diameter_mm * 1000.0, 3)
        )?;
        if self.diffraction_limited {
            write!(f, ", diffraction limited")?;
        } else if let Some(nominal) = self.diffraction_from {
            write!(f, ", diffraction limited from f/{}", significant(nominal, 3))?;
        }
        writeln!(f)
    }
}
