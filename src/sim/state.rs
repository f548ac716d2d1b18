//! Game state and core simulation types
//!
//! All gameplay state lives in [`GameState`], an explicit value owned by the
//! host loop. The rendering collaborator only ever reads it; mutation happens
//! exclusively inside [`tick`](super::tick::tick) and
//! [`request_upgrade`](super::upgrade::request_upgrade).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::spawn::spawn_target;
use super::upgrade::UpgradeLevels;
use crate::consts::*;

/// Drone flight and weapon stats
///
/// Mutated only by the upgrade economy; each field saturates at a fixed cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DroneStats {
    /// Flight speed (px/s)
    pub speed: f32,
    /// Seconds between bomb drops
    pub reload_time: f32,
    /// Blast radius of dropped bombs (px)
    pub bomb_radius: f32,
    /// Seconds a bomb falls before impact
    pub bomb_fall_time: f32,
}

impl Default for DroneStats {
    fn default() -> Self {
        Self {
            speed: DRONE_SPEED,
            reload_time: DRONE_RELOAD_TIME,
            bomb_radius: BOMB_RADIUS,
            bomb_fall_time: BOMB_FALL_TIME,
        }
    }
}

/// The player-controlled drone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drone {
    pub pos: Vec2,
    /// Facing direction (radians); holds its last value while hovering
    pub heading: f32,
    pub stats: DroneStats,
    /// Seconds until the next drop is ready (0 = ready)
    pub reload_left: f32,
}

impl Drone {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            heading: 0.0,
            stats: DroneStats::default(),
            reload_left: 0.0,
        }
    }

    /// A drop is permitted once the reload timer has run out
    pub fn can_drop(&self) -> bool {
        self.reload_left <= 0.0
    }

    /// Count the reload timer down, clamped at zero
    pub fn tick_reload(&mut self, dt: f32) {
        self.reload_left = (self.reload_left - dt).max(0.0);
    }

    /// Arm the reload timer; called exactly once per successful drop
    pub fn start_reload(&mut self) {
        self.reload_left = self.stats.reload_time;
    }
}

/// A falling bomb
///
/// Position and radius are fixed at drop time. The radius is a snapshot of
/// the drone's `bomb_radius`, so upgrades purchased while a bomb is airborne
/// do not change its blast.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bomb {
    pub pos: Vec2,
    /// Seconds until impact
    pub t_left: f32,
    /// Blast radius snapshot
    pub radius: f32,
}

impl Bomb {
    pub fn update(&mut self, dt: f32) {
        self.t_left -= dt;
    }

    pub fn impacted(&self) -> bool {
        self.t_left <= 0.0
    }
}

/// Target classes, fixed point values and sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    Scout,
    Tent,
    Ammo,
    Vehicle,
}

impl TargetKind {
    /// All kinds, in score-table order (spawner picks uniformly)
    pub const ALL: [TargetKind; 4] = [
        TargetKind::Scout,
        TargetKind::Tent,
        TargetKind::Ammo,
        TargetKind::Vehicle,
    ];

    /// Score awarded when destroyed
    pub fn points(&self) -> u32 {
        match self {
            TargetKind::Scout => 10,
            TargetKind::Tent => 20,
            TargetKind::Ammo => 50,
            TargetKind::Vehicle => 100,
        }
    }

    /// Collision radius (px)
    pub fn radius(&self) -> f32 {
        match self {
            TargetKind::Scout => 10.0,
            TargetKind::Tent => 14.0,
            TargetKind::Ammo => DEFAULT_TARGET_RADIUS,
            TargetKind::Vehicle => 18.0,
        }
    }

    /// Display color (0xRRGGBB); the simulation never reads this
    pub fn color(&self) -> u32 {
        match self {
            TargetKind::Scout => 0x46_dc_78,
            TargetKind::Tent => 0xeb_dc_5a,
            TargetKind::Ammo => 0x50_d2_e6,
            TargetKind::Vehicle => 0xdc_46_46,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Scout => "scout",
            TargetKind::Tent => "tent",
            TargetKind::Ammo => "ammo",
            TargetKind::Vehicle => "vehicle",
        }
    }
}

/// A moving ground target
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Target {
    pub kind: TargetKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Target {
    pub fn points(&self) -> u32 {
        self.kind.points()
    }

    /// Integrate position, then reflect elastically off the playfield edges.
    ///
    /// Each axis is handled independently: if the circle crosses an edge the
    /// center snaps to boundary +/- radius and that velocity component
    /// negates. A corner crossing fires both axes in the same tick.
    pub fn update(&mut self, dt: f32, bounds: &Rect) {
        self.pos += self.vel * dt;

        if self.pos.x - self.radius < bounds.min.x {
            self.pos.x = bounds.min.x + self.radius;
            self.vel.x = -self.vel.x;
        }
        if self.pos.x + self.radius > bounds.max.x {
            self.pos.x = bounds.max.x - self.radius;
            self.vel.x = -self.vel.x;
        }
        if self.pos.y - self.radius < bounds.min.y {
            self.pos.y = bounds.min.y + self.radius;
            self.vel.y = -self.vel.y;
        }
        if self.pos.y + self.radius > bounds.max.y {
            self.pos.y = bounds.max.y - self.radius;
            self.vel.y = -self.vel.y;
        }
    }
}

/// Events emitted by a tick, for the collaborator to map to audio/visual
/// feedback. Order within the Vec is emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A bomb was released
    Drop,
    /// A bomb reached the ground (fires whether or not it destroyed anything)
    Impact,
    /// Exactly one target destroyed this tick
    Hit { points: u32 },
    /// More than one target destroyed this tick
    Combo { count: u32, points: u32 },
    /// Bombs impacted this tick but destroyed nothing
    Miss,
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed, kept for reproducibility reporting
    pub seed: u64,
    /// Deterministic RNG driving the spawner
    pub rng: Pcg32,
    /// Playfield bounds
    pub bounds: Rect,
    pub drone: Drone,
    /// In-flight bombs, in drop order
    pub bombs: Vec<Bomb>,
    /// Live targets; population held at [`TARGET_POPULATION`]
    pub targets: Vec<Target>,
    /// Spendable score, never negative
    pub score: u32,
    pub levels: UpgradeLevels,
    /// Whether the upgrade menu is open (suspends movement and drops)
    pub menu_open: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Start a new session: drone centered, full target population, zero
    /// score and upgrade levels.
    pub fn new_session(bounds: Rect, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let targets = (0..TARGET_POPULATION)
            .map(|_| spawn_target(&mut rng, &bounds))
            .collect();

        log::info!(
            "New session: seed={} playfield={}x{}",
            seed,
            bounds.width(),
            bounds.height()
        );

        Self {
            seed,
            rng,
            bounds,
            drone: Drone::new(bounds.center()),
            bombs: Vec::new(),
            targets,
            score: 0,
            levels: UpgradeLevels::default(),
            menu_open: false,
            time_ticks: 0,
        }
    }
}
