use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Nominal f-numbers of the one-third stop series, as printed on lenses.
pub const NOMINAL_F_NUMBERS: [f64; ApertureStop::COUNT] = [
    1.4, 1.6, 1.8, 2.0, 2.2, 2.5, 2.8, 3.2, 3.5, 4.0, 4.5, 5.0, 5.6, 6.3, 7.1, 8.0, 9.0, 10.0, 11.0,
    13.0, 14.0, 16.0, 18.0, 20.0, 22.0,
];

/// One of the 25 one-third stops between f/1.4 and f/22.
///
/// The true f-number of stop `i` is `2^((i + 3) / 6)`; that value drives every
/// calculation, the nominal value is only for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct ApertureStop(u8);

impl ApertureStop {
    pub const COUNT: usize = 25;
    pub const WIDEST: Self = Self(0);
    pub const NARROWEST: Self = Self(Self::COUNT as u8 - 1);
    pub const F8: Self = Self(15);

    /// Out of range indices clamp to the narrowest stop.
    pub fn from_index(index: usize) -> Self {
        Self(index.min(Self::COUNT - 1) as u8)
    }

    /// The stop whose nominal value is nearest to `f_number`.
    pub fn nearest(f_number: f64) -> Self {
        let index = NOMINAL_F_NUMBERS
            .iter()
            .map(|nominal| (nominal - f_number).abs())
            .enumerate()
            .fold((0, f64::INFINITY), |best, (index, delta)| {
                if delta < best.1 {
                    (index, delta)
                } else {
                    best
                }
            })
            .0;
        Self::from_index(index)
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(Self::from_index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn f_number(self) -> f64 {
        2.0_f64.powf((self.0 as f64 + 3.0) / 6.0)
    }

    pub fn nominal(self) -> f64 {
        NOMINAL_F_NUMBERS[self.index()]
    }

    /// Whole stops (1.4, 2, 2.8, 4, ...) fall on every third index.
    pub fn is_full_stop(self) -> bool {
        self.0 % 3 == 0
    }
}

impl TryFrom<u8> for ApertureStop {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self> {
        if (index as usize) < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(Error::InvalidStop(index))
        }
    }
}

impl Default for ApertureStop {
    fn default() -> Self {
        Self::F8
    }
}
