//! Segment geometry: entry index <-> angular slice, and rotation -> winner.
//!
//! Angles are degrees, measured clockwise from the pointer axis. Segment `i`
//! of an `n`-entry wheel spans `[i * 360/n, (i + 1) * 360/n)` in wheel space.
//! The pointer is fixed at screen angle 0 and the wheel turns beneath it.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::api::types::Entry;

pub const FULL_TURN: f64 = 360.0;

/// Labels sit on the segment bisector at this fraction of the radius.
pub const LABEL_RADIUS_FRACTION: f64 = 0.3;

/// One entry's slice of the wheel, in wheel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub index: usize,
    pub start_degrees: f64,
    pub end_degrees: f64,
}

impl Segment {
    pub fn width(&self) -> f64 {
        self.end_degrees - self.start_degrees
    }

    /// Angle of the bisector.
    pub fn mid_degrees(&self) -> f64 {
        (self.start_degrees + self.end_degrees) / 2.0
    }

    /// Half-open containment, `start <= angle < end`.
    pub fn contains(&self, angle: f64) -> bool {
        angle >= self.start_degrees && angle < self.end_degrees
    }
}

/// Width of each segment on an `n`-entry wheel. `None` for an empty wheel.
pub fn segment_width(n: usize) -> Option<f64> {
    if n == 0 {
        None
    } else {
        Some(FULL_TURN / n as f64)
    }
}

/// All segments of an `n`-entry wheel, in list order.
pub fn segments(n: usize) -> Vec<Segment> {
    let Some(width) = segment_width(n) else {
        return Vec::new();
    };
    (0..n)
        .map(|i| Segment {
            index: i,
            start_degrees: i as f64 * width,
            end_degrees: if i + 1 == n { FULL_TURN } else { (i + 1) as f64 * width },
        })
        .collect()
}

/// Wheel-space angle sitting under the pointer after `rotation` degrees.
///
/// `((360 - (rotation % 360)) % 360)` with a truncating remainder. Inverted
/// because the wheel turns clockwise beneath a fixed pointer.
pub fn pointer_angle(rotation: f64) -> f64 {
    (FULL_TURN - (rotation % FULL_TURN)) % FULL_TURN
}

/// Segment index containing a wheel-space angle, clamped to `[0, n-1]`.
fn index_for_angle(n: usize, angle: f64) -> Option<usize> {
    let width = segment_width(n)?;
    if !angle.is_finite() {
        return None;
    }
    let raw = (angle / width).floor();
    // Floating-point drift at the last boundary can produce exactly n.
    Some((raw.max(0.0) as usize).min(n - 1))
}

/// Winning index for a final rotation on an `n`-entry wheel.
/// `None` when the wheel is empty or the rotation is not finite.
pub fn resolve_index(n: usize, rotation: f64) -> Option<usize> {
    index_for_angle(n, pointer_angle(rotation))
}

/// Winning entry for a final rotation.
pub fn resolve(entries: &[Entry], rotation: f64) -> Option<(usize, &Entry)> {
    let index = resolve_index(entries.len(), rotation)?;
    entries.get(index).map(|entry| (index, entry))
}

/// Segment containing an arbitrary wheel-space angle (any real, wrapped).
pub fn segment_at(n: usize, angle: f64) -> Option<usize> {
    index_for_angle(n, angle.rem_euclid(FULL_TURN))
}

/// Screen-space offset from the wheel center where segment `index` draws its
/// label, for a wheel of the given radius at the given rotation.
/// Screen space is y-down with angle 0 along +x (the pointer side).
pub fn label_anchor(index: usize, n: usize, radius: f64, rotation: f64) -> Option<DVec2> {
    let width = segment_width(n)?;
    if index >= n {
        return None;
    }
    let angle = ((index as f64 + 0.5) * width + rotation).to_radians();
    Some(DVec2::from_angle(angle) * radius * LABEL_RADIUS_FRACTION)
}
