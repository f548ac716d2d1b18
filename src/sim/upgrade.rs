//! Upgrade economy
//!
//! Score doubles as currency. Each upgrade kind has a base cost that grows
//! linearly with the level already purchased, and a capped stat effect.
//! Purchases past the cap still cost and still level - a deliberate money
//! sink once a stat saturates.

use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::consts::*;

/// The three purchasable stat upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeKind {
    Speed,
    Reload,
    Radius,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 3] = [UpgradeKind::Speed, UpgradeKind::Reload, UpgradeKind::Radius];

    /// Cost of the first purchase; later levels scale this linearly
    pub fn base_cost(&self) -> u32 {
        match self {
            UpgradeKind::Speed => 120,
            UpgradeKind::Reload => 140,
            UpgradeKind::Radius => 160,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeKind::Speed => "speed",
            UpgradeKind::Reload => "reload",
            UpgradeKind::Radius => "radius",
        }
    }
}

/// Purchased upgrade levels per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pub speed: u32,
    pub reload: u32,
    pub radius: u32,
}

impl UpgradeLevels {
    pub fn get(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::Speed => self.speed,
            UpgradeKind::Reload => self.reload,
            UpgradeKind::Radius => self.radius,
        }
    }

    fn bump(&mut self, kind: UpgradeKind) {
        match kind {
            UpgradeKind::Speed => self.speed += 1,
            UpgradeKind::Reload => self.reload += 1,
            UpgradeKind::Radius => self.radius += 1,
        }
    }
}

/// Outcome of an upgrade request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeResult {
    /// Purchase went through at `cost`; `level` is the new level
    Applied { cost: u32, level: u32 },
    /// Score was below `cost`; nothing changed
    InsufficientFunds { cost: u32 },
}

/// Price of the next level of `kind`: `base * (1 + level)`
pub fn upgrade_cost(levels: &UpgradeLevels, kind: UpgradeKind) -> u32 {
    kind.base_cost() * (1 + levels.get(kind))
}

/// Attempt to buy one level of `kind` against the session score.
///
/// On success the cost is deducted, the level increments, and the stat
/// effect applies saturating at its cap. On insufficient funds nothing
/// changes.
pub fn request_upgrade(state: &mut GameState, kind: UpgradeKind) -> UpgradeResult {
    let cost = upgrade_cost(&state.levels, kind);
    if state.score < cost {
        return UpgradeResult::InsufficientFunds { cost };
    }

    state.score -= cost;
    state.levels.bump(kind);

    let stats = &mut state.drone.stats;
    match kind {
        UpgradeKind::Speed => {
            stats.speed = (stats.speed + SPEED_STEP).min(MAX_DRONE_SPEED);
        }
        UpgradeKind::Reload => {
            stats.reload_time = (stats.reload_time - RELOAD_STEP).max(MIN_RELOAD_TIME);
        }
        UpgradeKind::Radius => {
            stats.bomb_radius = (stats.bomb_radius + RADIUS_STEP).min(MAX_BOMB_RADIUS);
        }
    }

    let level = state.levels.get(kind);
    log::info!("Upgrade {} -> level {} (cost {})", kind.as_str(), level, cost);

    UpgradeResult::Applied { cost, level }
}
