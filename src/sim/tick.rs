//! Per-tick simulation step
//!
//! Advances the whole simulation by one time slice. The update order is
//! fixed to avoid feedback artifacts within a tick: drone movement, reload,
//! target kinematics, bomb countdowns, impact resolution, population
//! maintenance, then drop handling.

use glam::Vec2;

use super::spawn::spawn_target;
use super::state::{Bomb, GameEvent, GameState};
use crate::consts::{DRONE_MARGIN, MAX_DT, TARGET_POPULATION};
use crate::dist;

/// Input intent for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Movement direction; zero means hover (heading holds its last value).
    /// Any magnitude is accepted - the tick normalizes.
    pub move_dir: Vec2,
    /// Release a bomb this tick (silently ignored while reloading)
    pub drop: bool,
    /// Flip the upgrade menu open/closed
    pub toggle_menu: bool,
}

/// Advance the simulation by `dt` seconds.
///
/// Returns the events this tick produced, in emission order, for the
/// collaborator to turn into audio/visual feedback. The state is always
/// valid and continuable afterwards, whatever the inputs.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    // Defensive boundary clamp; a NaN or negative dt becomes a no-op tick.
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 };

    let mut events = Vec::new();

    if input.toggle_menu {
        state.menu_open = !state.menu_open;
    }

    state.time_ticks += 1;

    // Movement is suspended while the upgrade menu is open
    if !state.menu_open {
        if input.move_dir.length_squared() > 0.0 {
            let dir = input.move_dir.normalize();
            state.drone.heading = dir.y.atan2(dir.x);
            state.drone.pos += dir * state.drone.stats.speed * dt;
        }
        let inset = state.bounds.inset(DRONE_MARGIN);
        state.drone.pos = inset.clamp_point(state.drone.pos);
    }

    // Reload keeps counting even while the menu is open
    state.drone.tick_reload(dt);

    for target in &mut state.targets {
        target.update(dt, &state.bounds);
    }

    for bomb in &mut state.bombs {
        bomb.update(dt);
    }

    // Impacted bombs leave the live set this tick
    let (impacted, falling): (Vec<Bomb>, Vec<Bomb>) =
        state.bombs.drain(..).partition(|b| b.impacted());
    state.bombs = falling;

    if !impacted.is_empty() {
        let mut removed = vec![false; state.targets.len()];
        let mut destroyed_count: u32 = 0;
        let mut destroyed_points: u32 = 0;

        // First bomb in drop order claims a contested target; a single bomb
        // may destroy any number of targets in its radius.
        for bomb in &impacted {
            events.push(GameEvent::Impact);
            for (i, target) in state.targets.iter().enumerate() {
                if removed[i] {
                    continue;
                }
                if dist(bomb.pos, target.pos) <= bomb.radius + target.radius {
                    removed[i] = true;
                    destroyed_count += 1;
                    destroyed_points += target.points();
                }
            }
        }

        if destroyed_count > 0 {
            state.score += destroyed_points;
            let mut idx = 0;
            state.targets.retain(|_| {
                let keep = !removed[idx];
                idx += 1;
                keep
            });
        }

        match destroyed_count {
            0 => events.push(GameEvent::Miss),
            1 => events.push(GameEvent::Hit {
                points: destroyed_points,
            }),
            count => {
                log::debug!("Combo x{count} (+{destroyed_points})");
                events.push(GameEvent::Combo {
                    count,
                    points: destroyed_points,
                });
            }
        }

        // Restore the population before the next tick
        while state.targets.len() < TARGET_POPULATION {
            let target = spawn_target(&mut state.rng, &state.bounds);
            state.targets.push(target);
        }
    }

    // Drop handling; silently rejected while reloading or in the menu
    if input.drop && !state.menu_open && state.drone.can_drop() {
        state.bombs.push(Bomb {
            pos: state.drone.pos,
            t_left: state.drone.stats.bomb_fall_time,
            radius: state.drone.stats.bomb_radius,
        });
        state.drone.start_reload();
        events.push(GameEvent::Drop);
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::rect::Rect;
    use crate::sim::state::{Target, TargetKind};
    use crate::sim::upgrade::{UpgradeKind, request_upgrade};

    fn test_state(seed: u64) -> GameState {
        GameState::new_session(Rect::from_size(780.0, 700.0), seed)
    }

    /// Place a lone target, keeping the population count intact by parking
    /// the rest far away from any blast.
    fn isolate_target(state: &mut GameState, target: Target) {
        for (i, t) in state.targets.iter_mut().enumerate() {
            t.pos = Vec2::new(700.0, 20.0 + i as f32 * 60.0);
            t.vel = Vec2::ZERO;
        }
        state.targets[0] = target;
    }

    #[test]
    fn test_drop_creates_bomb_and_reloads() {
        let mut state = test_state(1);
        let input = TickInput {
            drop: true,
            ..Default::default()
        };

        let events = tick(&mut state, &input, SIM_DT);
        assert_eq!(state.bombs.len(), 1);
        assert!(events.contains(&GameEvent::Drop));
        assert!(!state.drone.can_drop());

        // Second drop while reloading is a silent no-op
        let events = tick(&mut state, &input, SIM_DT);
        assert_eq!(state.bombs.len(), 1);
        assert!(!events.contains(&GameEvent::Drop));
    }

    #[test]
    fn test_menu_suspends_movement_but_not_reload() {
        let mut state = test_state(2);
        tick(
            &mut state,
            &TickInput {
                drop: true,
                ..Default::default()
            },
            SIM_DT,
        );
        let reload_before = state.drone.reload_left;
        let pos_before = state.drone.pos;

        // Open the menu, then push hard on the stick
        let input = TickInput {
            move_dir: Vec2::new(1.0, 0.0),
            toggle_menu: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.1);

        assert!(state.menu_open);
        assert_eq!(state.drone.pos, pos_before);
        assert!(state.drone.reload_left < reload_before);
    }

    #[test]
    fn test_menu_suspends_drop() {
        let mut state = test_state(2);
        state.menu_open = true;
        let events = tick(
            &mut state,
            &TickInput {
                drop: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert!(state.bombs.is_empty());
        assert!(!events.contains(&GameEvent::Drop));
    }

    #[test]
    fn test_heading_holds_on_zero_intent() {
        let mut state = test_state(3);
        tick(
            &mut state,
            &TickInput {
                move_dir: Vec2::new(0.0, 1.0),
                ..Default::default()
            },
            SIM_DT,
        );
        let heading = state.drone.heading;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.drone.heading, heading);
    }

    #[test]
    fn test_drone_clamped_to_margin() {
        let mut state = test_state(4);
        let input = TickInput {
            move_dir: Vec2::new(-1.0, -1.0),
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.drone.pos, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_impact_boundary_is_inclusive() {
        let mut state = test_state(5);
        isolate_target(
            &mut state,
            Target {
                kind: TargetKind::Scout,
                // Exactly touching: distance 15 == bomb radius 10 + target radius 5
                pos: Vec2::new(115.0, 100.0),
                vel: Vec2::ZERO,
                radius: 5.0,
            },
        );
        state.bombs.push(Bomb {
            pos: Vec2::new(100.0, 100.0),
            t_left: 0.0,
            radius: 10.0,
        });

        let events = tick(&mut state, &TickInput::default(), 0.0);
        assert!(events.contains(&GameEvent::Hit { points: 10 }));
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_multi_kill_emits_single_combo() {
        let mut state = test_state(6);
        isolate_target(
            &mut state,
            Target {
                kind: TargetKind::Scout,
                pos: Vec2::new(90.0, 100.0),
                vel: Vec2::ZERO,
                radius: 10.0,
            },
        );
        state.targets[1] = Target {
            kind: TargetKind::Vehicle,
            pos: Vec2::new(110.0, 100.0),
            vel: Vec2::ZERO,
            radius: 18.0,
        };
        state.bombs.push(Bomb {
            pos: Vec2::new(100.0, 100.0),
            t_left: 0.0,
            radius: 42.0,
        });

        let events = tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(
            events,
            vec![
                GameEvent::Impact,
                GameEvent::Combo {
                    count: 2,
                    points: 110
                }
            ]
        );
        assert_eq!(state.score, 110);
        assert_eq!(state.targets.len(), TARGET_POPULATION);
    }

    #[test]
    fn test_contested_target_scored_once() {
        let mut state = test_state(7);
        isolate_target(
            &mut state,
            Target {
                kind: TargetKind::Ammo,
                pos: Vec2::new(100.0, 100.0),
                vel: Vec2::ZERO,
                radius: 12.0,
            },
        );
        // Two bombs both covering the same target, impacting the same tick
        for _ in 0..2 {
            state.bombs.push(Bomb {
                pos: Vec2::new(100.0, 100.0),
                t_left: 0.0,
                radius: 42.0,
            });
        }

        let events = tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.score, 50);
        assert!(events.contains(&GameEvent::Hit { points: 50 }));
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::Impact).count(),
            2
        );
    }

    #[test]
    fn test_miss_event_when_nothing_destroyed() {
        let mut state = test_state(8);
        for t in &mut state.targets {
            t.pos = Vec2::new(700.0, 650.0);
            t.vel = Vec2::ZERO;
        }
        state.bombs.push(Bomb {
            pos: Vec2::new(50.0, 50.0),
            t_left: 0.0,
            radius: 42.0,
        });

        let events = tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(events, vec![GameEvent::Impact, GameEvent::Miss]);
        assert_eq!(state.score, 0);
        assert_eq!(state.targets.len(), TARGET_POPULATION);
    }

    #[test]
    fn test_bomb_radius_is_a_drop_time_snapshot() {
        let mut state = test_state(9);
        state.score = 1000;
        tick(
            &mut state,
            &TickInput {
                drop: true,
                ..Default::default()
            },
            SIM_DT,
        );
        let radius_at_drop = state.bombs[0].radius;

        // Buying a radius upgrade mid-flight must not touch the bomb
        request_upgrade(&mut state, UpgradeKind::Radius);
        assert!(state.drone.stats.bomb_radius > radius_at_drop);
        assert_eq!(state.bombs[0].radius, radius_at_drop);
    }

    #[test]
    fn test_end_to_end_drop_and_score() {
        let mut state = test_state(10);
        state.drone.pos = Vec2::new(100.0, 100.0);
        isolate_target(
            &mut state,
            Target {
                kind: TargetKind::Scout,
                pos: Vec2::new(100.0, 100.0),
                vel: Vec2::ZERO,
                radius: 10.0,
            },
        );

        let events = tick(
            &mut state,
            &TickInput {
                drop: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(events, vec![GameEvent::Drop]);
        assert_eq!(state.bombs.len(), 1);

        // 0.6s > 0.55s fall time: the bomb lands this tick, distance 0 <= 52
        let events = tick(&mut state, &TickInput::default(), 0.6);
        assert!(state.bombs.is_empty());
        assert!(events.contains(&GameEvent::Impact));
        assert!(events.contains(&GameEvent::Hit { points: 10 }));
        assert_eq!(state.score, 10);
        assert_eq!(state.targets.len(), TARGET_POPULATION);
    }

    #[test]
    fn test_pathological_dt_is_a_noop() {
        let mut state = test_state(11);
        let snapshot_pos: Vec<Vec2> = state.targets.iter().map(|t| t.pos).collect();

        tick(&mut state, &TickInput::default(), f32::NAN);
        tick(&mut state, &TickInput::default(), -5.0);

        let after: Vec<Vec2> = state.targets.iter().map(|t| t.pos).collect();
        assert_eq!(snapshot_pos, after);
    }

    #[test]
    fn test_determinism() {
        let mut a = test_state(99_999);
        let mut b = test_state(99_999);

        let inputs = [
            TickInput {
                move_dir: Vec2::new(1.0, 0.0),
                ..Default::default()
            },
            TickInput {
                drop: true,
                ..Default::default()
            },
            TickInput {
                move_dir: Vec2::new(0.0, -1.0),
                drop: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..300 {
            for input in &inputs {
                let ea = tick(&mut a, input, SIM_DT);
                let eb = tick(&mut b, input, SIM_DT);
                assert_eq!(ea, eb);
            }
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.drone.pos, b.drone.pos);
        assert_eq!(a.targets.len(), b.targets.len());
        for (ta, tb) in a.targets.iter().zip(&b.targets) {
            assert_eq!(ta.pos, tb.pos);
            assert_eq!(ta.vel, tb.vel);
        }
    }
}

#[cfg(test)]
mod invariants {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::rect::Rect;
    use proptest::prelude::*;

    fn input_strategy() -> impl Strategy<Value = TickInput> {
        (-1i8..=1, -1i8..=1, any::<bool>()).prop_map(|(dx, dy, drop)| TickInput {
            move_dir: Vec2::new(dx as f32, dy as f32),
            drop,
            toggle_menu: false,
        })
    }

    proptest! {
        /// Every target's circle stays inside the playfield through any
        /// tick sequence, and the population never drifts from 10.
        #[test]
        fn targets_stay_in_bounds_and_population_holds(
            seed in any::<u64>(),
            steps in proptest::collection::vec((input_strategy(), 0.0f32..0.3), 1..120),
        ) {
            let bounds = Rect::from_size(780.0, 700.0);
            let mut state = GameState::new_session(bounds, seed);

            for (input, dt) in steps {
                tick(&mut state, &input, dt);

                prop_assert_eq!(state.targets.len(), TARGET_POPULATION);
                for t in &state.targets {
                    prop_assert!(t.pos.x >= bounds.min.x + t.radius - 1e-3);
                    prop_assert!(t.pos.x <= bounds.max.x - t.radius + 1e-3);
                    prop_assert!(t.pos.y >= bounds.min.y + t.radius - 1e-3);
                    prop_assert!(t.pos.y <= bounds.max.y - t.radius + 1e-3);
                }
            }
        }

        /// The drone can never escape the margin-inset playfield.
        #[test]
        fn drone_stays_inside_margin(
            seed in any::<u64>(),
            steps in proptest::collection::vec(input_strategy(), 1..200),
        ) {
            let bounds = Rect::from_size(780.0, 700.0);
            let mut state = GameState::new_session(bounds, seed);
            let inset = bounds.inset(crate::consts::DRONE_MARGIN);

            for input in steps {
                tick(&mut state, &input, SIM_DT);
                prop_assert!(inset.contains(state.drone.pos));
            }
        }
    }
}
