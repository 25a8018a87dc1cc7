use serde::Serialize;

use super::MM_PER_M;

/// Hyperfocal distance in meters.
pub fn hyperfocal_m(focal_length_mm: f64, f_number: f64, confusion_mm: f64) -> f64 {
    let f = focal_length_mm;
    (f + f * f / (f_number * confusion_mm)) / MM_PER_M
}

/// Nearest distance still acceptably sharp when focused at `focus_m`.
pub fn near_bound_m(hyperfocal_m: f64, focal_length_mm: f64, focus_m: f64) -> f64 {
    let f_m = focal_length_mm / MM_PER_M;
    let (h, s) = (hyperfocal_m, focus_m);
    s * (h - f_m) / (h + s - 2.0 * f_m)
}

/// Farthest distance still acceptably sharp, infinite once focused at or past
/// the hyperfocal distance.
pub fn far_bound_m(hyperfocal_m: f64, focal_length_mm: f64, focus_m: f64) -> f64 {
    let (h, s) = (hyperfocal_m, focus_m);
    if h - s <= 0.0 {
        return f64::INFINITY;
    }
    let f_m = focal_length_mm / MM_PER_M;
    s * (h - f_m) / (h - s)
}

/// Closest sensor-referred focus distance, in focal lengths, at which a thin
/// lens still forms a real image (subject and image both at `2f`).
pub const MIN_FOCUS_FOCAL_LENGTHS: f64 = 4.0;

/// The focus distance whose near bound is `near_limit_m`, i.e. [`near_bound_m`]
/// solved for the focus distance.
///
/// The near bound grows towards `H - f` as focus moves out. If that is still
/// short of `near_limit_m` there is no such distance and `near_limit_m` itself
/// is returned. The result is never below `near_limit_m`, nor below
/// [`MIN_FOCUS_FOCAL_LENGTHS`] focal lengths.
pub fn minimum_focus_m(hyperfocal_m: f64, focal_length_mm: f64, near_limit_m: f64) -> f64 {
    let f_m = focal_length_mm / MM_PER_M;
    let (h, dn) = (hyperfocal_m, near_limit_m);
    let floor_m = near_limit_m.max(MIN_FOCUS_FOCAL_LENGTHS * f_m);
    let denominator = dn + f_m - h;
    if denominator >= 0.0 {
        return floor_m;
    }
    let s = dn * (2.0 * f_m - h) / denominator;
    s.max(floor_m)
}

/// Snapshot of the sharp zone for one set of lens parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthOfField {
    pub hyperfocal_m: f64,
    pub near_m: f64,
    /// `f64::INFINITY` when focused at or beyond the hyperfocal distance.
    pub far_m: f64,
}

impl DepthOfField {
    pub fn new(focal_length_mm: f64, f_number: f64, confusion_mm: f64, focus_m: f64) -> Self {
        let hyperfocal_m = hyperfocal_m(focal_length_mm, f_number, confusion_mm);
        Self {
            hyperfocal_m,
            near_m: near_bound_m(hyperfocal_m, focal_length_mm, focus_m),
            far_m: far_bound_m(hyperfocal_m, focal_length_mm, focus_m),
        }
    }

    pub fn depth_m(&self) -> f64 {
        self.far_m - self.near_m
    }

    pub fn is_infinite(&self) -> bool {
        self.far_m.is_infinite()
    }

    /// Near bound when focused exactly at the hyperfocal distance.
    pub fn hyperfocal_near_m(&self) -> f64 {
        self.hyperfocal_m / 2.0
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn hyperfocal_reference() {
        // 24 mm at f/8 on full frame
        let h = hyperfocal_m(24.0, 8.0, 0.0186);
        assert_abs_diff_eq!(h, 3.87, epsilon = 0.03);
    }

    #[test]
    fn focus_inside_sharp_zone() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..5_000 {
            let f = rng.gen_range(1.0..1000.0);
            let n = rng.gen_range(1.4..22.7);
            let c = rng.gen_range(0.005..0.035);
            let h = hyperfocal_m(f, n, c);
            let s_min = minimum_focus_m(h, f, 0.125);
            if s_min >= h {
                continue;
            }
            let s = rng.gen_range(s_min..h);
            let dof = DepthOfField::new(f, n, c, s);
            assert!(dof.near_m < s && s < dof.far_m, "{dof:?} around {s}");
        }
    }

    #[test]
    fn infinite_exactly_from_hyperfocal() {
        let h = hyperfocal_m(50.0, 5.6, 0.03);
        assert!(DepthOfField::new(50.0, 5.6, 0.03, h).is_infinite());
        assert!(DepthOfField::new(50.0, 5.6, 0.03, h * 1.5).is_infinite());
        assert!(!DepthOfField::new(50.0, 5.6, 0.03, h * 0.999).is_infinite());
        assert_eq!(DepthOfField::new(50.0, 5.6, 0.03, h).depth_m(), f64::INFINITY);
    }

    #[test]
    fn near_bound_at_hyperfocal_is_about_half() {
        let dof = DepthOfField::new(24.0, 8.0, 0.015, hyperfocal_m(24.0, 8.0, 0.015));
        assert_relative_eq!(dof.near_m, dof.hyperfocal_near_m(), max_relative = 0.01);
    }

    #[test]
    fn minimum_focus_inverts_near_bound() {
        for (f, n, c) in [(24.0, 8.0, 0.015), (10.0, 1.4, 0.025), (18.0, 22.6, 0.03)] {
            let h = hyperfocal_m(f, n, c);
            let s = minimum_focus_m(h, f, 0.125);
            assert!(s > 0.125);
            assert_relative_eq!(near_bound_m(h, f, s), 0.125, max_relative = 1e-9);
        }
    }

    #[test]
    fn minimum_focus_without_solution() {
        // 1 mm lens at f/22: hyperfocal is 2.5 mm, the near bound never gets to 12.5 cm
        let h = hyperfocal_m(1.0, 22.6, 0.03);
        assert_eq!(minimum_focus_m(h, 1.0, 0.125), 0.125);
    }

    #[test]
    fn long_lens_focuses_no_closer_than_four_focal_lengths() {
        // the inverse alone would allow about 0.125 m with a 400 mm lens
        let (f, n, c) = (400.0, 5.6, 0.025);
        let h = hyperfocal_m(f, n, c);
        let s = minimum_focus_m(h, f, 0.125);
        assert_relative_eq!(s, 1.6);

        let dof = DepthOfField::new(f, n, c, s);
        assert!(dof.near_m < s && s < dof.far_m, "{dof:?} around {s}");
        assert!(dof.near_m > 0.125);
    }
}
