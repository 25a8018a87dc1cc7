use std::fmt;

use serde::{Deserialize, Serialize};

use super::SensorGeometry;
use crate::error::{positive_mm, Quantity, Result};

/// Rule of thumb used to derive the circle of confusion from the sensor diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfusionFormula {
    /// `diagonal / 1442`, the usual value for digital photography.
    Digital,
    /// `diagonal / 1730`, stricter, inherited from film-era lens tables.
    Zeiss,
}

impl ConfusionFormula {
    pub const ALL: [Self; 2] = [Self::Digital, Self::Zeiss];

    fn divisor(self) -> f64 {
        match self {
            Self::Digital => 1442.0,
            Self::Zeiss => 1730.0,
        }
    }

    pub fn derive(self, diagonal_mm: f64) -> f64 {
        diagonal_mm / self.divisor()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Digital => "Digital",
            Self::Zeiss => "Zeiss",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfusionMode {
    Derived(ConfusionFormula),
    Custom,
}

impl Default for ConfusionMode {
    fn default() -> Self {
        Self::Derived(ConfusionFormula::Zeiss)
    }
}

/// The active circle of confusion: either derived from the sensor, or a value
/// typed in by the user. The custom value survives switching to a derived
/// mode and back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfusionSetting {
    mode: ConfusionMode,
    custom_mm: f64,
}

impl ConfusionSetting {
    pub const DEFAULT: Self = Self {
        mode: ConfusionMode::Derived(ConfusionFormula::Zeiss),
        custom_mm: 0.015,
    };

    pub fn derived(formula: ConfusionFormula) -> Self {
        Self {
            mode: ConfusionMode::Derived(formula),
            ..Self::DEFAULT
        }
    }

    pub fn custom(custom_mm: f64) -> Result<Self> {
        let mut setting = Self::DEFAULT;
        setting.set_custom_mm(custom_mm)?;
        Ok(setting)
    }

    pub fn mode(&self) -> ConfusionMode {
        self.mode
    }

    pub fn custom_mm(&self) -> f64 {
        self.custom_mm
    }

    pub fn set_mode(&mut self, mode: ConfusionMode) {
        self.mode = mode;
    }

    /// Stores a user-supplied diameter and makes it the active one.
    pub fn set_custom_mm(&mut self, custom_mm: f64) -> Result<()> {
        self.custom_mm = positive_mm(Quantity::Confusion, custom_mm)?;
        self.mode = ConfusionMode::Custom;
        Ok(())
    }

    pub fn value_mm(&self, sensor: &SensorGeometry) -> f64 {
        match self.mode {
            ConfusionMode::Derived(formula) => formula.derive(sensor.diagonal_mm()),
            ConfusionMode::Custom => self.custom_mm,
        }
    }

    /// Every selectable mode with a label showing the diameter it would give
    /// on `sensor`, in the order a picker lists them.
    pub fn choices(&self, sensor: &SensorGeometry) -> Vec<(ConfusionMode, String)> {
        let mut choices = ConfusionFormula::ALL
            .iter()
            .map(|&formula| {
                let um = formula.derive(sensor.diagonal_mm()) * 1000.0;
                let label = format!("{} ({:.1} µm)", formula.name(), um);
                (ConfusionMode::Derived(formula), label)
            })
            .collect::<Vec<_>>();
        choices.push((ConfusionMode::Custom, ConfusionMode::Custom.to_string()));
        choices
    }
}

impl Default for ConfusionSetting {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ConfusionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Derived(formula) => f.write_str(formula.name()),
            Self::Custom => f.write_str("Custom..."),
        }
    }
}
