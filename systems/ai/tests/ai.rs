use std::time::Duration;

use lane_clash_core::{Command, Event, MatchConfig, MatchOutcome, Team};
use lane_clash_system_ai::{Config, Opponent};
use lane_clash_world::{self as world, query, World};

fn time_advanced(millis: u64) -> Event {
    Event::TimeAdvanced {
        dt: Duration::from_millis(millis),
    }
}

#[test]
fn no_deployment_before_the_interval_accrues() {
    let world = World::new(MatchConfig::default());
    let zone = query::arena(&world).deploy_zone(Team::Enemy);
    let mut opponent = Opponent::new(Config::with_seed(42));

    let mut commands = Vec::new();
    opponent.handle(&[time_advanced(2999)], zone, &mut commands);

    assert!(commands.is_empty());
}

#[test]
fn one_deployment_per_accrued_interval() {
    let world = World::new(MatchConfig::default());
    let zone = query::arena(&world).deploy_zone(Team::Enemy);
    let mut opponent = Opponent::new(Config::with_seed(42));

    let mut commands = Vec::new();
    opponent.handle(&[time_advanced(3000)], zone, &mut commands);
    assert_eq!(commands.len(), 1);

    commands.clear();
    opponent.handle(&[time_advanced(6500)], zone, &mut commands);
    assert_eq!(commands.len(), 2);
}

#[test]
fn deployments_land_inside_the_enemy_half_and_spawn_for_free() {
    let mut world = World::new(MatchConfig::default());
    let zone = query::arena(&world).deploy_zone(Team::Enemy);
    let mut opponent = Opponent::new(Config::with_seed(0xfeed));

    let mut commands = Vec::new();
    for _ in 0..10 {
        opponent.handle(&[time_advanced(3000)], zone, &mut commands);
    }
    assert_eq!(commands.len(), 10);

    let elixir_before = query::elixir(&world);
    let mut events = Vec::new();
    for command in commands {
        match command {
            Command::DeployUnit { team, position, .. } => {
                assert_eq!(team, Team::Enemy);
                assert!(zone.contains(position));
            }
            other => panic!("unexpected command {other:?}"),
        }
        world::apply(&mut world, command, &mut events);
    }

    assert_eq!(query::unit_view(&world).into_vec().len(), 10);
    assert_eq!(query::elixir(&world), elixir_before);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::DeployRejected { .. })));
}

#[test]
fn identical_seeds_produce_identical_deployments() {
    let world = World::new(MatchConfig::default());
    let zone = query::arena(&world).deploy_zone(Team::Enemy);
    let mut first = Opponent::new(Config::with_seed(1234));
    let mut second = Opponent::new(Config::with_seed(1234));

    let mut first_commands = Vec::new();
    let mut second_commands = Vec::new();
    for _ in 0..5 {
        first.handle(&[time_advanced(3000)], zone, &mut first_commands);
        second.handle(&[time_advanced(3000)], zone, &mut second_commands);
    }

    assert_eq!(first_commands, second_commands);
    assert!(!first_commands.is_empty());
}

#[test]
fn the_driver_halts_once_the_match_ends() {
    let world = World::new(MatchConfig::default());
    let zone = query::arena(&world).deploy_zone(Team::Enemy);
    let mut opponent = Opponent::new(Config::with_seed(9));

    let mut commands = Vec::new();
    opponent.handle(
        &[
            Event::MatchEnded {
                outcome: MatchOutcome::Victory,
            },
            time_advanced(30_000),
        ],
        zone,
        &mut commands,
    );

    assert!(commands.is_empty());
}
