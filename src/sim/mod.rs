//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied dt only, clamped at the boundary
//! - Seeded RNG only, owned by the state
//! - Stable iteration order (bombs in drop order, targets in spawn order)
//! - No rendering, audio or platform dependencies - side effects are
//!   reported as [`GameEvent`]s for the host to act on

pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod upgrade;

pub use rect::Rect;
pub use spawn::spawn_target;
pub use state::{Bomb, Drone, DroneStats, GameEvent, GameState, Target, TargetKind};
pub use tick::{TickInput, tick};
pub use upgrade::{UpgradeKind, UpgradeLevels, UpgradeResult, request_upgrade, upgrade_cost};
