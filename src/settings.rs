use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::optics::{ConfusionFormula, ConfusionMode};

/// Last used parameters, as stored between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sensor: Option<String>,
    /// Takes precedence over `focal_length_mm` when it names a catalog lens.
    pub lens: Option<String>,
    pub focal_length_mm: Option<f64>,
    pub confusion: ConfusionMode,
    pub custom_confusion_mm: f64,
    pub f_number: f64,
    pub focus_distance_m: f64,
}

impl Settings {
    const DEFAULT: Self = Self {
        sensor: None,
        lens: None,
        focal_length_mm: None,
        confusion: ConfusionMode::Derived(ConfusionFormula::Zeiss),
        custom_confusion_mm: 0.015,
        f_number: 5.6,
        focus_distance_m: 3.5,
    };

    /// Snapshot of `camera`. Sensor and lens names are kept as given, they are
    /// not stored in the camera itself.
    pub fn capture(camera: &Camera, sensor: Option<&str>, lens: Option<&str>) -> Self {
        Self {
            sensor: sensor.map(str::to_owned),
            lens: lens.map(str::to_owned),
            focal_length_mm: Some(camera.focal_length_mm()),
            confusion: camera.confusion().mode(),
            custom_confusion_mm: camera.confusion().custom_mm(),
            f_number: camera.aperture().nominal(),
            focus_distance_m: camera.focus_distance_m(),
        }
    }

    /// Loads these settings into `camera`. Names missing from `catalog` are
    /// skipped with a warning. Invalid lengths are errors and leave `camera`
    /// untouched.
    pub fn apply(&self, camera: &mut Camera, catalog: &Catalog) -> Result<()> {
        let mut next = *camera;

        if let Some(name) = &self.sensor {
            match catalog.sensor(name) {
                Ok(sensor) => next.set_sensor(sensor),
                Err(err) => log::warn!("{err}, keeping the current sensor"),
            }
        }

        let lens_focal_mm = self.lens.as_deref().and_then(|name| match catalog.lens(name) {
            Ok(focal_length_mm) => Some(focal_length_mm),
            Err(err) => {
                log::warn!("{err}");
                None
            }
        });
        if let Some(focal_length_mm) = lens_focal_mm.or(self.focal_length_mm) {
            next.set_focal_length_mm(focal_length_mm)?;
        }

        next.set_custom_confusion_mm(self.custom_confusion_mm)?;
        next.set_confusion_mode(self.confusion);
        next.set_f_number(self.f_number);
        next.set_focus_distance_m(self.focus_distance_m);

        *camera = next;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::SensorGeometry;

    #[test]
    fn defaults_apply_cleanly() {
        let mut camera = Camera::new();
        Settings::default().apply(&mut camera, &Catalog::builtin()).unwrap();
        assert_eq!(camera.aperture().nominal(), 5.6);
        assert_eq!(camera.focus_distance_m(), 3.5);
        assert_eq!(camera.confusion().custom_mm(), 0.015);
        assert_eq!(
            camera.confusion().mode(),
            ConfusionMode::Derived(ConfusionFormula::Zeiss)
        );
    }

    #[test]
    fn lens_wins_over_focal_length() {
        let settings = Settings {
            sensor: Some("Full frame".to_owned()),
            lens: Some("Standard 50 mm".to_owned()),
            focal_length_mm: Some(17.0),
            ..Settings::default()
        };
        let mut camera = Camera::new();
        settings.apply(&mut camera, &Catalog::builtin()).unwrap();
        assert_eq!(camera.sensor(), &SensorGeometry::FULL_FRAME);
        assert_eq!(camera.focal_length_mm(), 50.0);
    }

    #[test]
    fn unknown_names_are_skipped() {
        let settings = Settings {
            sensor: Some("Pinhole".to_owned()),
            lens: Some("Mystery".to_owned()),
            focal_length_mm: Some(17.0),
            ..Settings::default()
        };
        let mut camera = Camera::new();
        settings.apply(&mut camera, &Catalog::builtin()).unwrap();
        assert_eq!(camera.sensor(), &SensorGeometry::APS_C);
        assert_eq!(camera.focal_length_mm(), 17.0);
    }

    #[test]
    fn invalid_lengths_fail() {
        let settings = Settings {
            custom_confusion_mm: -1.0,
            ..Settings::default()
        };
        assert!(settings.apply(&mut Camera::new(), &Catalog::new()).is_err());
    }

    #[test]
    fn failed_apply_leaves_camera_untouched() {
        let settings = Settings {
            sensor: Some("Full frame".to_owned()),
            lens: Some("Portrait 85 mm".to_owned()),
            custom_confusion_mm: 0.0,
            ..Settings::default()
        };
        let mut camera = Camera::new();
        assert!(settings.apply(&mut camera, &Catalog::builtin()).is_err());
        assert_eq!(camera, Camera::new());
    }

    #[test]
    fn long_lens_focus_is_pulled_out() {
        let settings = Settings {
            sensor: Some("Full frame".to_owned()),
            lens: Some("Super telephoto 400 mm".to_owned()),
            focus_distance_m: 0.3,
            ..Settings::default()
        };
        let mut camera = Camera::new();
        settings.apply(&mut camera, &Catalog::builtin()).unwrap();

        let focus = camera.focus_distance_m();
        assert!(focus >= 1.6);
        assert!(camera.near_bound_m() < focus);
        assert!(camera.plane_width_m() > 0.0);
    }

    #[test]
    fn capture_then_apply() {
        let mut camera = Camera::new();
        camera.set_focal_length_mm(85.0).unwrap();
        camera.set_f_number(2.0);
        camera.set_custom_confusion_mm(0.02).unwrap();
        camera.set_confusion_mode(ConfusionMode::Derived(ConfusionFormula::Digital));
        camera.set_focus_distance_m(7.0);

        let settings = Settings::capture(&camera, None, None);
        let json = serde_json::to_string(&settings).unwrap();
        let settings: Settings = serde_json::from_str(&json).unwrap();

        let mut restored = Camera::new();
        settings.apply(&mut restored, &Catalog::new()).unwrap();
        assert_eq!(restored, camera);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"f_number": 11}"#).unwrap();
        assert_eq!(settings.f_number, 11.0);
        assert_eq!(settings.focus_distance_m, 3.5);
    }
}
