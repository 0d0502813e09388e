//! Geometry shared by selection and whatever draws the wheel: each valid
//! entry owns an arc proportional to its weight, laid out clockwise from 0°,
//! and a spin lands the pointer inside the arc of the entry actually picked.

use crate::{
    entry::Entry,
    error::RegistryError,
    selection::{
        effective_weight,
        total_weight,
    },
};
use std::time::Duration;

pub const FULL_TURN: f64 = 360.0;
/// Whole turns added before settling on the winner.
pub const SPIN_TURNS: u32 = 5;
pub const SPIN_DURATION: Duration = Duration::from_millis(5_000);
/// The landing point stays within this fraction of the winning arc, centred.
const LANDING_SPREAD: f64 = 0.8;

/// Half-open angular range `[start, end)` in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn centre(&self) -> f64 {
        self.start + self.span() / 2.0
    }

    pub fn contains(&self, angle: f64) -> bool {
        angle >= self.start && angle < self.end
    }
}

/// Degrees covered by one unit of weight.
pub fn degrees_per_unit(entries: &[Entry], equal_weights: bool) -> Option<f64> {
    match total_weight(entries, equal_weights) {
        0 => None,
        total => Some(FULL_TURN / f64::from(total)),
    }
}

/// Each entry's fraction of the wheel, in order.
pub fn shares(entries: &[Entry], equal_weights: bool) -> Vec<f64> {
    let total = f64::from(total_weight(entries, equal_weights));
    if total == 0.0 {
        return vec![0.0; entries.len()];
    }
    entries
        .iter()
        .map(|e| f64::from(effective_weight(e, equal_weights)) / total)
        .collect()
}

pub fn segments(entries: &[Entry], equal_weights: bool) -> Vec<Segment> {
    let Some(per_unit) = degrees_per_unit(entries, equal_weights) else {
        return Vec::new();
    };
    let mut start = 0.0;
    entries
        .iter()
        .map(|e| {
            let end = start + f64::from(effective_weight(e, equal_weights)) * per_unit;
            let segment = Segment { start, end };
            start = end;
            segment
        })
        .collect()
}

/// Angular range of the entry at `winning_index`.
pub fn map_winner_to_angle(
    entries: &[Entry],
    winning_index: usize,
    equal_weights: bool,
) -> Result<Segment, RegistryError> {
    let segments = segments(entries, equal_weights);
    if segments.is_empty() {
        return Err(RegistryError::EmptySelection);
    }
    segments
        .get(winning_index)
        .copied()
        .ok_or(RegistryError::IndexOutOfRange {
            index: winning_index,
            len: segments.len(),
        })
}

/// Index of the segment under the pointer for a wheel rotated by `rotation`
/// degrees clockwise. The pointer sits at 0°.
pub fn segment_at_pointer(segments: &[Segment], rotation: f64) -> Option<usize> {
    let angle = (FULL_TURN - rotation.rem_euclid(FULL_TURN)).rem_euclid(FULL_TURN);
    segments.iter().position(|s| s.contains(angle))
}

/// Rotation target for one spin animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinPlan {
    pub start_rotation: f64,
    pub final_rotation: f64,
    pub duration: Duration,
}

impl SpinPlan {
    /// `jitter` in `[0, 1)` picks where inside the winning arc the pointer
    /// stops; 0.5 is dead centre.
    pub fn new(current_rotation: f64, winner: Segment, jitter: f64) -> Self {
        let offset = (jitter - 0.5) * winner.span() * LANDING_SPREAD;
        let target = FULL_TURN - winner.centre();
        let final_rotation = current_rotation
            + f64::from(SPIN_TURNS) * FULL_TURN
            + target
            + offset
            - current_rotation.rem_euclid(FULL_TURN);
        Self {
            start_rotation: current_rotation,
            final_rotation,
            duration: SPIN_DURATION,
        }
    }

    /// Rotation after `elapsed`, eased out so the wheel slows down at the end.
    pub fn rotation_at(&self, elapsed: Duration) -> f64 {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
        };
        let eased = 1.0 - (1.0 - t).powi(3);
        self.start_rotation + (self.final_rotation - self.start_rotation) * eased
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}
