#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that hosts a headless Lane Clash match.
//!
//! The binary stands in for the rendering collaborator: it pumps input into
//! the placement system, drives the tick loop, and reads the world's views
//! to report the result. Player input comes from an encoded deployment
//! scenario, from seeded improvisation, or not at all.

mod scenario_transfer;
mod session;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use lane_clash_core::{MatchConfig, MatchOutcome, Team, UnitKind};
use lane_clash_system_bootstrap::Bootstrap;
use lane_clash_system_placement::PlacementInput;
use lane_clash_world::query;

use scenario_transfer::{DeploymentScript, ScriptStep};
use session::Session;

/// Interval between improvised deployments in random-player mode.
const IMPROV_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Parser)]
#[command(
    name = "lane-clash",
    about = "Runs a headless Lane Clash match and prints the outcome"
)]
struct Args {
    /// Seed shared by the opponent driver and the randomized player.
    #[arg(long, default_value_t = 0xc0ff_ee11)]
    seed: u64,

    /// Simulated milliseconds advanced per tick.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Simulated seconds before an undecided match is called off.
    #[arg(long, default_value_t = 180)]
    time_limit: u64,

    /// Encoded deployment script replayed for the player side.
    #[arg(long)]
    scenario: Option<String>,

    /// Improvise random player deployments instead of replaying a script.
    #[arg(long)]
    random_player: bool,

    /// Print a starter scenario string and exit.
    #[arg(long)]
    sample_scenario: bool,
}

/// Entry point for the Lane Clash command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let config = MatchConfig::default();

    if args.sample_scenario {
        println!("{}", sample_scenario(&config).encode());
        return Ok(());
    }

    let mut steps = match &args.scenario {
        Some(encoded) => {
            let script =
                DeploymentScript::decode(encoded).context("invalid scenario string")?;
            let (width, height) = (config.arena.width as u32, config.arena.height as u32);
            if script.width != width || script.height != height {
                anyhow::bail!(
                    "scenario was authored for a {}x{} arena, expected {width}x{height}",
                    script.width,
                    script.height,
                );
            }
            script.steps
        }
        None => Vec::new(),
    };
    steps.sort_by_key(|step| step.at_ms);

    run_match(&args, config, &steps);
    Ok(())
}

fn sample_scenario(config: &MatchConfig) -> DeploymentScript {
    let lane = config.arena.width / 2.0;
    let back_row = config.arena.height - 100.0;
    DeploymentScript {
        width: config.arena.width as u32,
        height: config.arena.height as u32,
        steps: vec![
            ScriptStep {
                at_ms: 1000,
                unit: "knight".to_owned(),
                x: lane,
                y: config.arena.height / 2.0 + 40.0,
            },
            ScriptStep {
                at_ms: 6000,
                unit: "archer".to_owned(),
                x: lane - 120.0,
                y: back_row,
            },
            ScriptStep {
                at_ms: 12_000,
                unit: "giant".to_owned(),
                x: lane + 120.0,
                y: back_row,
            },
        ],
    }
}

fn run_match(args: &Args, config: MatchConfig, steps: &[ScriptStep]) {
    let mut session = Session::new(config, args.seed);
    let bootstrap = Bootstrap::default();
    println!("{}", bootstrap.welcome_banner(session.world()));

    session.start();
    let dt = Duration::from_millis(args.tick_ms.max(1));
    let time_limit = Duration::from_secs(args.time_limit);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut elapsed = Duration::ZERO;
    let mut next_step = 0;
    let mut next_improv = IMPROV_INTERVAL;

    while session.is_running() && elapsed < time_limit {
        let input = if next_step < steps.len() && steps[next_step].at() <= elapsed {
            let step = &steps[next_step];
            next_step += 1;
            PlacementInput::new(Some(step.kind()), Some(step.position()), false)
        } else if args.random_player && elapsed >= next_improv {
            next_improv += IMPROV_INTERVAL;
            improvise(&mut rng, &session)
        } else {
            PlacementInput::default()
        };

        let _ = session.advance(dt, input);
        elapsed = elapsed.saturating_add(dt);
    }
    session.stop();

    print_report(&session);
}

fn improvise(rng: &mut ChaCha8Rng, session: &Session) -> PlacementInput {
    let zone = query::arena(session.world()).deploy_zone(Team::Player);
    let kind = UnitKind::ALL[rng.gen_range(0..UnitKind::ALL.len())];
    let point = Vec2::new(
        rng.gen_range(zone.min().x..=zone.max().x),
        rng.gen_range(zone.min().y..=zone.max().y),
    );
    PlacementInput::new(Some(kind), Some(point), false)
}

fn print_report(session: &Session) {
    let report = session.report();
    let verdict = match session.outcome() {
        Some(MatchOutcome::Victory) => "victory",
        Some(MatchOutcome::Defeat) => "defeat",
        None => "undecided",
    };

    println!(
        "outcome: {verdict} after {:.1}s simulated",
        report.duration.as_secs_f64()
    );
    for tower in query::tower_view(session.world()).iter() {
        let side = match tower.team {
            Team::Player => "player",
            Team::Enemy => "enemy",
        };
        println!(
            "{side} tower: {}/{} hp",
            tower.health.get(),
            tower.max_health
        );
    }
    println!(
        "deployed: {} player / {} enemy",
        report.player_deployed, report.enemy_deployed
    );
    println!(
        "damage dealt: {} player / {} enemy",
        report.player_damage, report.enemy_damage
    );
    println!("projectiles fired: {}", report.projectiles_fired);
    println!("elixir spent: {}", report.elixir_spent);
}
