pub mod aperture;
pub mod confusion;
pub mod diffraction;
pub mod dof;
pub mod fov;
pub mod sensor;

pub use self::aperture::{ApertureStop, NOMINAL_F_NUMBERS};
pub use self::confusion::{ConfusionFormula, ConfusionMode, ConfusionSetting};
pub use self::dof::DepthOfField;
pub use self::sensor::SensorGeometry;

/// Lens and sensor figures are in millimeters, distances to the subject in meters.
pub const MM_PER_M: f64 = 1000.0;
