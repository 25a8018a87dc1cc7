use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::{positive_mm, Error, Quantity, Result};
use crate::optics::SensorGeometry;

/// Named sensors and lenses the user can pick from.
///
/// Stored as `{"SENSOR_SIZES": {name: [width_mm, height_mm]}, "LENS_FOCALS": {name: focal_mm}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "SENSOR_SIZES", default)]
    sensors: HashMap<String, SensorGeometry>,
    #[serde(rename = "LENS_FOCALS", default)]
    lenses: HashMap<String, f64>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handful of common formats and prime lenses.
    pub fn builtin() -> Self {
        const SENSORS: [(&str, f64, f64); 7] = [
            ("Medium format 44x33", 43.8, 32.9),
            ("Full frame", 36.0, 24.0),
            ("APS-H", 27.9, 18.6),
            ("APS-C", 23.6, 15.6),
            ("APS-C Canon", 22.2, 14.8),
            ("Micro Four Thirds", 17.3, 13.0),
            ("1-inch", 13.2, 8.8),
        ];
        const LENSES: [(&str, f64); 8] = [
            ("Ultra wide 14 mm", 14.0),
            ("Wide 24 mm", 24.0),
            ("Wide 35 mm", 35.0),
            ("Standard 50 mm", 50.0),
            ("Portrait 85 mm", 85.0),
            ("Telephoto 135 mm", 135.0),
            ("Telephoto 200 mm", 200.0),
            ("Super telephoto 400 mm", 400.0),
        ];

        let sensors = SENSORS
            .iter()
            .filter_map(|&(name, width_mm, height_mm)| {
                let sensor = SensorGeometry::new(width_mm, height_mm).ok()?;
                Some((name.to_owned(), sensor))
            })
            .collect();
        let lenses = LENSES
            .iter()
            .map(|&(name, focal_length_mm)| (name.to_owned(), focal_length_mm))
            .collect();

        Self { sensors, lenses }
    }

    /// Sensor sizes are checked while deserializing; focal lengths are checked here.
    pub fn validate(&self) -> Result<()> {
        for &focal_length_mm in self.lenses.values() {
            positive_mm(Quantity::FocalLength, focal_length_mm)?;
        }
        Ok(())
    }

    pub fn add_sensor(&mut self, name: impl Into<String>, sensor: SensorGeometry) {
        self.sensors.insert(name.into(), sensor);
    }

    pub fn add_lens(&mut self, name: impl Into<String>, focal_length_mm: f64) -> Result<()> {
        let focal_length_mm = positive_mm(Quantity::FocalLength, focal_length_mm)?;
        self.lenses.insert(name.into(), focal_length_mm);
        Ok(())
    }

    pub fn sensor(&self, name: &str) -> Result<SensorGeometry> {
        self.sensors
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownSensor(name.to_owned()))
    }

    pub fn lens(&self, name: &str) -> Result<f64> {
        self.lenses
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownLens(name.to_owned()))
    }

    /// Sensor names, largest sensor first.
    pub fn sensor_names(&self) -> Vec<&str> {
        let mut sensors = self.sensors.iter().collect::<Vec<_>>();
        sensors.sort_by(|(a_name, a), (b_name, b)| {
            b.diagonal_mm()
                .total_cmp(&a.diagonal_mm())
                .then_with(|| a_name.cmp(b_name))
        });
        sensors.into_iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Lens names, shortest focal length first.
    pub fn lens_names(&self) -> Vec<&str> {
        let mut lenses = self.lenses.iter().collect::<Vec<_>>();
        lenses.sort_by(|(a_name, a), (b_name, b)| a.total_cmp(b).then_with(|| a_name.cmp(b_name)));
        lenses.into_iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty() && self.lenses.is_empty()
    }
}
