pub mod scale;

pub use self::scale::NonlinearScale;

pub trait Interpolate {
    fn lerp(self, other: Self, factor: f64) -> Self;

    /// Where `self` sits between `min` and `max`, as a factor for [`Interpolate::lerp`].
    fn inverse_lerp(self, min: Self, max: Self) -> f64;
}

impl Interpolate for f64 {
    fn lerp(self, other: Self, factor: f64) -> Self {
        self + (other - self) * factor
    }

    fn inverse_lerp(self, min: Self, max: Self) -> f64 {
        (self - min) / (max - min)
    }
}

impl Interpolate for u32 {
    fn lerp(self, other: Self, factor: f64) -> Self {
        // truncates toward the lower position
        (self as f64).lerp(other as f64, factor) as u32
    }

    fn inverse_lerp(self, min: Self, max: Self) -> f64 {
        (self as f64).inverse_lerp(min as f64, max as f64)
    }
}

/// Like [`f64::clamp`], but never panics when the bounds cross: `min` wins.
pub fn clip(x: f64, min: f64, max: f64) -> f64 {
    if x > max {
        max.max(min)
    } else if x < min {
        min
    } else {
        x
    }
}
