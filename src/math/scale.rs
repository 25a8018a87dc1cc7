//! Cube-root compression of distances onto a bounded control.
//!
//! A slider that has to cover everything from a few centimeters to infinity
//! cannot be linear: nearly all of its travel would be spent beyond a hundred
//! meters. [`NonlinearScale`] maps a distance `x` to a fraction of the control
//! with `1 - a * exp(-cbrt(x))`, which spreads near distances out and packs
//! far ones towards the right end without ever reaching it. The constant `a`
//! is picked so that `origin` lands exactly on `0`.

use serde::Serialize;

use super::Interpolate;

// largest f64 below 1.0
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NonlinearScale {
    origin_m: f64,
    max_m: f64,
    positions: u32,
}

impl NonlinearScale {
    const DEFAULT: Self = Self {
        origin_m: 0.125,
        max_m: 999.0,
        positions: 999,
    };

    /// `positions` is the highest control index; the control runs over
    /// `0..=positions` and has at least two positions.
    pub fn new(origin_m: f64, max_m: f64, positions: u32) -> Self {
        debug_assert!(origin_m > 0.0 && max_m > origin_m);
        Self {
            origin_m,
            max_m,
            positions: positions.max(1),
        }
    }

    pub fn origin_m(&self) -> f64 {
        self.origin_m
    }

    pub fn max_m(&self) -> f64 {
        self.max_m
    }

    pub fn positions(&self) -> u32 {
        self.positions
    }

    // ln(a), kept in log space so the forward map never overflows
    fn log_a(&self) -> f64 {
        self.origin_m.cbrt()
    }

    /// Distance to control fraction in `[0, 1)`.
    pub fn forward(&self, distance_m: f64) -> f64 {
        if distance_m >= self.origin_m {
            // exp underflows past epsilon beyond ~55 km
            (1.0 - (self.log_a() - distance_m.cbrt()).exp()).min(BELOW_ONE)
        } else {
            0.0
        }
    }

    /// Control fraction back to a distance. Fractions at or past the right end
    /// saturate to `max_m`, which stands in for infinity.
    pub fn inverse(&self, fraction: f64) -> f64 {
        if fraction < 0.0 {
            self.origin_m
        } else if fraction < 1.0 {
            // ln(-a / (fraction - 1)) == ln(a) - ln(1 - fraction)
            (self.log_a() - (-fraction).ln_1p()).powi(3)
        } else {
            self.max_m
        }
    }

    pub fn fraction_to_position(&self, fraction: f64) -> u32 {
        0_u32.lerp(self.positions, fraction.clamp(0.0, 1.0))
    }

    pub fn position_to_fraction(&self, position: u32) -> f64 {
        position.min(self.positions).inverse_lerp(0, self.positions)
    }

    pub fn distance_to_position(&self, distance_m: f64) -> u32 {
        self.fraction_to_position(self.forward(distance_m))
    }

    pub fn position_to_distance(&self, position: u32) -> f64 {
        self.inverse(self.position_to_fraction(position))
    }
}

impl Default for NonlinearScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}
