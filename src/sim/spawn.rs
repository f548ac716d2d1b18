//! Stochastic target generation
//!
//! Targets are drawn from a fixed four-entry score table, uniformly over
//! entries (not weighted by point value). All randomness flows through the
//! session RNG so a seed replays the same spawn sequence.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use super::rect::Rect;
use super::state::{Target, TargetKind};
use crate::consts::{TARGET_SPEED_MAX, TARGET_SPEED_MIN};

/// Spawn a single target somewhere inside `area`.
///
/// Kind is uniform over the score table; position is uniform in `area` inset
/// by the kind's radius on all sides; speed is uniform in [25, 65] px/s with
/// a uniform heading.
pub fn spawn_target(rng: &mut Pcg32, area: &Rect) -> Target {
    let kind = TargetKind::ALL[rng.random_range(0..TargetKind::ALL.len())];
    let radius = kind.radius();

    let inner = area.inset(radius);
    let pos = Vec2::new(
        rng.random_range(inner.min.x..=inner.max.x),
        rng.random_range(inner.min.y..=inner.max.y),
    );

    let speed = rng.random_range(TARGET_SPEED_MIN..=TARGET_SPEED_MAX);
    let heading = rng.random_range(0.0..TAU);

    Target {
        kind,
        pos,
        vel: Vec2::new(heading.cos() * speed, heading.sin() * speed),
        radius,
    }
}
