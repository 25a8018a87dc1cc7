use super::ApertureStop;

/// Reference wavelength for the Airy disk, green light.
pub const WAVELENGTH_M: f64 = 550e-9;

/// Diameter of the Airy disk (to the first dark ring) at aperture `f_number`.
pub fn airy_diameter_mm(f_number: f64) -> f64 {
    2.44 * WAVELENGTH_M * f_number * 1000.0
}

/// How many times larger the Airy disk is than the circle of confusion.
/// Anything above `1.0` means diffraction, not focus, limits sharpness.
pub fn airy_ratio(f_number: f64, confusion_mm: f64) -> f64 {
    airy_diameter_mm(f_number) / confusion_mm
}

pub fn is_diffraction_limited(f_number: f64, confusion_mm: f64) -> bool {
    airy_diameter_mm(f_number) > confusion_mm
}

/// The widest stop that is already diffraction limited, if any is.
pub fn first_limited_stop(confusion_mm: f64) -> Option<ApertureStop> {
    ApertureStop::iter().find(|stop| is_diffraction_limited(stop.f_number(), confusion_mm))
}
