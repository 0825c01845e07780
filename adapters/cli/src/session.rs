use std::time::Duration;

use lane_clash_core::{Command, Event, MatchConfig, MatchOutcome, StatsReport, Team};
use lane_clash_system_ai::{Config as OpponentConfig, Opponent};
use lane_clash_system_analytics::Analytics;
use lane_clash_system_placement::{Placement, PlacementInput};
use lane_clash_world::{self as world, query, World};

/// Owns one match: the authoritative world plus the systems that feed it
/// command batches between ticks.
///
/// The host loop calls [`Session::advance`] once per frame. Systems consume
/// the previous tick's events, standing in for the interleaved timer
/// callbacks of a rendering host: the placement system and the opponent
/// driver run first, their commands apply, and only then does the world tick.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    placement: Placement,
    opponent: Opponent,
    analytics: Analytics,
    running: bool,
    last_events: Vec<Event>,
}

impl Session {
    /// Creates a session for a fresh match.
    pub(crate) fn new(config: MatchConfig, opponent_seed: u64) -> Self {
        Self {
            world: World::new(config),
            placement: Placement::new(),
            opponent: Opponent::new(OpponentConfig::with_seed(opponent_seed)),
            analytics: Analytics::new(),
            running: false,
            last_events: Vec::new(),
        }
    }

    /// Begins the match loop. Calling it again is a no-op.
    pub(crate) fn start(&mut self) {
        self.running = true;
    }

    /// Halts the match loop and the opponent driver. Idempotent.
    pub(crate) fn stop(&mut self) {
        self.running = false;
    }

    /// Whether the loop is currently running.
    pub(crate) fn is_running(&self) -> bool {
        self.running
    }

    /// Read-only access to the authoritative world.
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// The running analytics report for this match.
    pub(crate) fn report(&self) -> &StatsReport {
        self.analytics.report()
    }

    /// Terminal outcome of the match, once one exists.
    pub(crate) fn outcome(&self) -> Option<MatchOutcome> {
        query::match_outcome(&self.world)
    }

    /// Advances the match by one frame, returning the events it produced.
    ///
    /// A stopped session ignores the call entirely.
    pub(crate) fn advance(&mut self, dt: Duration, input: PlacementInput) -> Vec<Event> {
        if !self.running {
            return Vec::new();
        }

        let mut commands = Vec::new();
        self.placement.handle(
            &self.last_events,
            input,
            query::elixir(&self.world),
            |kind| query::unit_cost(&self.world, kind),
            &mut commands,
        );
        let zone = query::arena(&self.world).deploy_zone(Team::Enemy);
        self.opponent.handle(&self.last_events, zone, &mut commands);

        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);

        self.analytics.handle(&events);
        if query::match_outcome(&self.world).is_some() {
            self.stop();
        }
        self.last_events.clone_from(&events);
        events
    }
}
