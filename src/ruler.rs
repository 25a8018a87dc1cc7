//! Where things go on the focus and aperture controls.
//!
//! Positions are fractions of the control width in `[0, 1]`; turning them into
//! pixels is up to whoever draws the control.

use bitflags::bitflags;
use serde::Serialize;

use crate::camera::Camera;
use crate::format::{significant, DEPTH_INFINITY_LIMIT_M};
use crate::math::{Interpolate, NonlinearScale};
use crate::optics::{diffraction, ApertureStop};

/// Labelled distances on the focus scale, below the origin they are dropped.
pub const MAJOR_DISTANCES_M: [f64; 10] = [0.125, 0.25, 1.0, 2.0, 3.0, 4.0, 6.0, 10.0, 20.0, 50.0];

/// Unlabelled dots between the major distances.
pub const MINOR_DISTANCES_M: [f64; 4] = [0.5, 1.5, 2.5, 5.0];

bitflags! {
    #[derive(Default, Serialize)]
    pub struct StopFlags: u8 {
        const FULL_STOP = 0x1;
        const DIFFRACTION_LIMITED = 0x2;
        const SELECTED = 0x4;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceTick {
    pub distance_m: f64,
    pub fraction: f64,
    /// `None` for minor ticks.
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopTick {
    pub stop: ApertureStop,
    pub fraction: f64,
    pub label: Option<String>,
    pub flags: StopFlags,
}

/// Focus control markers. `far` is pinned to the right end once the far
/// bound runs off the scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FocusMarkers {
    pub focus: f64,
    pub near: f64,
    pub far: f64,
    pub far_at_infinity: bool,
    pub hyperfocal: f64,
    /// Start of the zone that is sharp when focused at the hyperfocal distance.
    pub hyperfocal_near: f64,
}

pub fn distance_ticks(scale: &NonlinearScale) -> Vec<DistanceTick> {
    let origin = scale.origin_m();
    let tick = |distance_m: f64, labelled: bool| DistanceTick {
        distance_m,
        fraction: scale.forward(distance_m),
        label: labelled.then(|| significant(distance_m, 3)),
    };

    let mut ticks = vec![tick(origin, true)];
    ticks.extend(
        MAJOR_DISTANCES_M
            .iter()
            .filter(|&&distance_m| distance_m > origin)
            .map(|&distance_m| tick(distance_m, true)),
    );
    ticks.extend(
        MINOR_DISTANCES_M
            .iter()
            .filter(|&&distance_m| distance_m > origin)
            .map(|&distance_m| tick(distance_m, false)),
    );
    ticks
}

pub fn focus_markers(camera: &Camera) -> FocusMarkers {
    let scale = camera.scale();
    let dof = camera.depth_of_field();
    let far_at_infinity = dof.far_m >= DEPTH_INFINITY_LIMIT_M;

    FocusMarkers {
        focus: scale.forward(camera.focus_distance_m()),
        near: scale.forward(dof.near_m),
        far: if far_at_infinity {
            1.0
        } else {
            scale.forward(dof.far_m)
        },
        far_at_infinity,
        hyperfocal: scale.forward(dof.hyperfocal_m),
        hyperfocal_near: scale.forward(dof.hyperfocal_near_m()),
    }
}

/// Every stop, evenly spaced, labelled on full stops and flagged when
/// diffraction outgrows the camera's circle of confusion.
pub fn aperture_ticks(camera: &Camera) -> Vec<StopTick> {
    let confusion_mm = camera.confusion_mm();
    let last = ApertureStop::COUNT as u32 - 1;

    ApertureStop::iter()
        .map(|stop| {
            let mut flags = StopFlags::empty();
            flags.set(StopFlags::FULL_STOP, stop.is_full_stop());
            flags.set(
                StopFlags::DIFFRACTION_LIMITED,
                diffraction::is_diffraction_limited(stop.f_number(), confusion_mm),
            );
            flags.set(StopFlags::SELECTED, stop == camera.aperture());

            StopTick {
                stop,
                fraction: (stop.index() as u32).inverse_lerp(0, last),
                label: stop
                    .is_full_stop()
                    .then(|| significant(stop.nominal(), 3)),
                flags,
            }
        })
        .collect()
}
