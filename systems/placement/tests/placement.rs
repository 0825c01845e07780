use glam::Vec2;
use lane_clash_core::{Command, DeployError, Event, MatchConfig, Team, UnitKind};
use lane_clash_system_placement::{Placement, PlacementInput};
use lane_clash_world::{self as world, query, World};

fn pump(
    world: &mut World,
    placement: &mut Placement,
    events: &[Event],
    input: PlacementInput,
) -> Vec<Event> {
    let mut commands = Vec::new();
    placement.handle(
        events,
        input,
        query::elixir(world),
        |kind| query::unit_cost(world, kind),
        &mut commands,
    );

    let mut out_events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut out_events);
    }
    out_events
}

#[test]
fn selected_card_spawns_at_the_committed_point() {
    let mut world = World::new(MatchConfig::default());
    let mut placement = Placement::new();
    let point = Vec2::new(250.0, 450.0);

    let events = pump(
        &mut world,
        &mut placement,
        &[],
        PlacementInput::new(Some(UnitKind::Archer), None, false),
    );
    assert!(events.is_empty(), "selection alone must not mutate the world");

    let events = pump(
        &mut world,
        &mut placement,
        &[],
        PlacementInput::new(None, Some(point), false),
    );

    assert!(events
        .iter()
        .any(|event| matches!(event, Event::UnitDeployed { team: Team::Player, kind: UnitKind::Archer, .. })));
    let units = query::unit_view(&world).into_vec();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].position, point);
}

#[test]
fn out_of_zone_commits_are_rejected_by_the_world() {
    let mut world = World::new(MatchConfig::default());
    let mut placement = Placement::new();
    let elixir_before = query::elixir(&world);

    let _ = pump(
        &mut world,
        &mut placement,
        &[],
        PlacementInput::new(Some(UnitKind::Knight), None, false),
    );
    let events = pump(
        &mut world,
        &mut placement,
        &[],
        PlacementInput::new(None, Some(Vec2::new(400.0, 100.0)), false),
    );

    assert!(events.iter().any(|event| matches!(
        event,
        Event::DeployRejected {
            reason: DeployError::OutOfZone,
            ..
        }
    )));
    assert!(query::unit_view(&world).iter().next().is_none());
    assert_eq!(query::elixir(&world), elixir_before);
    assert_eq!(placement.pending_card(), None);
}

#[test]
fn unaffordable_cards_never_reach_the_world() {
    let mut config = MatchConfig::default();
    config.elixir.initial = 2;
    let world = World::new(config);
    let mut placement = Placement::new();

    let mut commands = Vec::new();
    placement.handle(
        &[],
        PlacementInput::new(Some(UnitKind::Giant), None, false),
        query::elixir(&world),
        |kind| query::unit_cost(&world, kind),
        &mut commands,
    );
    placement.handle(
        &[],
        PlacementInput::new(None, Some(Vec2::new(300.0, 500.0)), false),
        query::elixir(&world),
        |kind| query::unit_cost(&world, kind),
        &mut commands,
    );

    assert!(commands.is_empty());
    assert_eq!(placement.pending_card(), None);
}

#[test]
fn world_re_validates_the_spend_even_when_the_mirror_is_stale() {
    let mut config = MatchConfig::default();
    config.elixir.initial = 2;
    let mut world = World::new(config);

    // Bypass the optimistic mirror entirely: the authoritative check alone
    // must refuse the spend.
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::DeployUnit {
            team: Team::Player,
            kind: UnitKind::Archer,
            position: Vec2::new(300.0, 500.0),
        },
        &mut events,
    );

    assert!(events.iter().any(|event| matches!(
        event,
        Event::DeployRejected {
            reason: DeployError::InsufficientElixir,
            ..
        }
    )));
    assert!(query::unit_view(&world).iter().next().is_none());
}
