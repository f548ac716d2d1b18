//! Skydrop - a top-down drone bombing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, impact resolution, upgrades)
//!
//! Rendering, input polling and audio are external collaborators: they drive
//! [`sim::tick`] with wall-clock `dt` and input intent, read the returned
//! state views, and map [`sim::GameEvent`]s to audio/visual feedback. The
//! simulation core never performs I/O.

pub mod sim;

pub use sim::{
    Drone, DroneStats, GameEvent, GameState, Rect, Target, TargetKind, TickInput, UpgradeKind,
    UpgradeResult, tick,
};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference fixed simulation timestep (120 Hz); the tick accepts any dt
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Defensive dt clamp applied at the tick boundary
    pub const MAX_DT: f32 = 1.0;

    /// Live target count the spawner maintains
    pub const TARGET_POPULATION: usize = 10;
    /// Playfield inset keeping the drone away from the edges
    pub const DRONE_MARGIN: f32 = 10.0;

    /// Drone stat defaults
    pub const DRONE_SPEED: f32 = 240.0;
    pub const DRONE_RELOAD_TIME: f32 = 1.20;
    pub const BOMB_RADIUS: f32 = 42.0;
    pub const BOMB_FALL_TIME: f32 = 0.55;

    /// Stat caps (upgrades saturate here but keep costing)
    pub const MAX_DRONE_SPEED: f32 = 520.0;
    pub const MIN_RELOAD_TIME: f32 = 0.25;
    pub const MAX_BOMB_RADIUS: f32 = 110.0;

    /// Per-purchase stat steps
    pub const SPEED_STEP: f32 = 35.0;
    pub const RELOAD_STEP: f32 = 0.12;
    pub const RADIUS_STEP: f32 = 6.0;

    /// Target speed magnitude range (px/s)
    pub const TARGET_SPEED_MIN: f32 = 25.0;
    pub const TARGET_SPEED_MAX: f32 = 65.0;
    /// Fallback radius for target kinds without a specific one
    pub const DEFAULT_TARGET_RADIUS: f32 = 12.0;
}

/// Euclidean distance between two points
#[inline]
pub fn dist(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}
