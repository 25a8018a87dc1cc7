use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    SensorWidth,
    SensorHeight,
    FocalLength,
    Confusion,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SensorWidth => "sensor width",
            Self::SensorHeight => "sensor height",
            Self::FocalLength => "focal length",
            Self::Confusion => "circle of confusion",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{quantity} must be a positive length in millimeters, got {value}")]
    InvalidGeometry { quantity: Quantity, value: f64 },
    #[error("aperture stop {0} does not exist, stops run from 0 to 24")]
    InvalidStop(u8),
    #[error("no sensor named `{0}` in the catalog")]
    UnknownSensor(String),
    #[error("no lens named `{0}` in the catalog")]
    UnknownLens(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Rejects anything that is not a strictly positive, finite length.
pub fn positive_mm(quantity: Quantity, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidGeometry { quantity, value })
    }
}
