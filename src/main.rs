//! Headless autopilot runner
//!
//! Drives the simulation core without any renderer: the drone circles the
//! playfield center dropping bombs on a fixed cadence and buys upgrades when
//! it can afford them. Useful for smoke-testing the sim and for producing
//! reproducible run summaries.

use clap::Parser;
use glam::Vec2;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use skydrop::consts::SIM_DT;
use skydrop::sim::{
    GameEvent, GameState, Rect, TickInput, UpgradeKind, request_upgrade, tick, upgrade_cost,
};

#[derive(Parser)]
#[command(name = "skydrop", about = "Headless autopilot run of the Skydrop simulation")]
struct Cli {
    /// Session seed (default: derived from the system clock)
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated seconds to run
    #[arg(long, default_value_t = 30.0)]
    seconds: f32,
    /// Maximum ticks (0 = no limit)
    #[arg(long, default_value_t = 0)]
    ticks: u64,
    /// Playfield width in pixels
    #[arg(long, default_value_t = 780.0)]
    width: f32,
    /// Playfield height in pixels
    #[arg(long, default_value_t = 700.0)]
    height: f32,
    /// Print the run summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

/// End-of-run report
#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    sim_seconds: f32,
    score: u32,
    drops: u32,
    impacts: u32,
    hits: u32,
    combos: u32,
    misses: u32,
    targets_destroyed: u32,
    upgrades_bought: u32,
}

impl RunSummary {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Drop => self.drops += 1,
            GameEvent::Impact => self.impacts += 1,
            GameEvent::Hit { .. } => {
                self.hits += 1;
                self.targets_destroyed += 1;
            }
            GameEvent::Combo { count, .. } => {
                self.combos += 1;
                self.targets_destroyed += count;
            }
            GameEvent::Miss => self.misses += 1,
        }
    }
}

/// Steering for one autopilot tick: circle the center, drop on a cadence.
fn autopilot_input(state: &GameState, t: f32) -> TickInput {
    let ang = t * 1.2;
    let center = state.bounds.center();
    let desired = center + Vec2::new(ang.cos() * 120.0, ang.sin() * 80.0);

    TickInput {
        move_dir: desired - state.drone.pos,
        drop: state.drone.can_drop() && (t * 10.0) as u64 % 6 == 0,
        toggle_menu: false,
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let mut state = GameState::new_session(Rect::from_size(cli.width, cli.height), seed);
    let mut summary = RunSummary {
        seed,
        ..Default::default()
    };

    let mut t = 0.0_f32;
    while t < cli.seconds && (cli.ticks == 0 || state.time_ticks < cli.ticks) {
        let input = autopilot_input(&state, t);
        for event in tick(&mut state, &input, SIM_DT) {
            summary.record(&event);
        }
        t += SIM_DT;

        // Spend winnings as soon as anything is affordable
        for kind in UpgradeKind::ALL {
            if state.score >= upgrade_cost(&state.levels, kind) {
                request_upgrade(&mut state, kind);
                summary.upgrades_bought += 1;
            }
        }
    }

    summary.ticks = state.time_ticks;
    summary.sim_seconds = t;
    summary.score = state.score;
    log::info!(
        "Run finished: {} ticks, score {}, {} drops",
        summary.ticks,
        summary.score,
        summary.drops
    );

    if cli.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Summary serialization failed: {e}"),
        }
    } else {
        println!(
            "seed {}  ticks {}  score {}  drops {}  impacts {}  hits {}  combos {}  misses {}  upgrades {}",
            summary.seed,
            summary.ticks,
            summary.score,
            summary.drops,
            summary.impacts,
            summary.hits,
            summary.combos,
            summary.misses,
            summary.upgrades_bought,
        );
    }
}
