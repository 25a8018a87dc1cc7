use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::{positive_mm, Quantity, Result};

/// Physical size of the image sensor, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct SensorGeometry {
    size_mm: DVec2,
}

impl SensorGeometry {
    /// 36 x 24 mm, "full frame".
    pub const FULL_FRAME: Self = Self {
        size_mm: DVec2::new(36.0, 24.0),
    };

    /// Canon APS-C, 22.2 x 14.8 mm.
    pub const APS_C: Self = Self {
        size_mm: DVec2::new(22.2, 14.8),
    };

    pub fn new(width_mm: f64, height_mm: f64) -> Result<Self> {
        let width_mm = positive_mm(Quantity::SensorWidth, width_mm)?;
        let height_mm = positive_mm(Quantity::SensorHeight, height_mm)?;
        Ok(Self {
            size_mm: DVec2::new(width_mm, height_mm),
        })
    }

    pub fn width_mm(&self) -> f64 {
        self.size_mm.x
    }

    pub fn height_mm(&self) -> f64 {
        self.size_mm.y
    }

    pub fn size_mm(&self) -> DVec2 {
        self.size_mm
    }

    pub fn diagonal_mm(&self) -> f64 {
        self.size_mm.length()
    }

    /// Ratio of the full-frame diagonal to this one.
    pub fn crop_factor(&self) -> f64 {
        Self::FULL_FRAME.diagonal_mm() / self.diagonal_mm()
    }
}

impl Default for SensorGeometry {
    fn default() -> Self {
        Self::APS_C
    }
}

impl TryFrom<[f64; 2]> for SensorGeometry {
    type Error = crate::error::Error;

    fn try_from([width_mm, height_mm]: [f64; 2]) -> Result<Self> {
        Self::new(width_mm, height_mm)
    }
}

impl From<SensorGeometry> for [f64; 2] {
    fn from(sensor: SensorGeometry) -> Self {
        sensor.size_mm.to_array()
    }
}
