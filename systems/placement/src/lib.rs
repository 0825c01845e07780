#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure placement system that turns card selection input into deploy commands.
//!
//! The system owns the card-selection state machine for the player side:
//! selecting a card arms a placement drag, committing a point emits a
//! [`Command::DeployUnit`], and every commit attempt clears the selection
//! whether or not it produced a command. The world remains the authority on
//! zone legality and elixir; the affordability check here is the optimistic
//! collaborator-side mirror.

use glam::Vec2;
use lane_clash_core::{Command, Elixir, Event, Team, UnitKind};

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PlacementInput {
    /// Card the player picked up on this frame, if any.
    pub select: Option<UnitKind>,
    /// Point the player committed a placement at on this frame, if any.
    pub commit: Option<Vec2>,
    /// Whether the player abandoned the pending selection on this frame.
    pub cancel: bool,
}

impl PlacementInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(select: Option<UnitKind>, commit: Option<Vec2>, cancel: bool) -> Self {
        Self {
            select,
            commit,
            cancel,
        }
    }
}

/// Placement system that translates card selection into deploy commands.
#[derive(Clone, Debug, Default)]
pub struct Placement {
    pending: Option<UnitKind>,
    drag_active: bool,
    match_over: bool,
}

impl Placement {
    /// Creates a new placement system with no pending selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: None,
            drag_active: false,
            match_over: false,
        }
    }

    /// Card currently pending placement, if any.
    #[must_use]
    pub const fn pending_card(&self) -> Option<UnitKind> {
        self.pending
    }

    /// Whether a placement drag is currently armed.
    #[must_use]
    pub const fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    /// Consumes world events and adapter input to emit deploy commands.
    ///
    /// The `cost_of` closure should mirror the world's `query::unit_cost`
    /// helper so the system can skip commits the player visibly cannot
    /// afford; the world re-validates the spend authoritatively either way.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        input: PlacementInput,
        elixir: Elixir,
        cost_of: F,
        out: &mut Vec<Command>,
    ) where
        F: Fn(UnitKind) -> u32,
    {
        for event in events {
            if matches!(event, Event::MatchEnded { .. }) {
                self.match_over = true;
            }
        }
        if self.match_over {
            self.clear();
            return;
        }

        if input.cancel {
            self.clear();
        }

        if let Some(kind) = input.select {
            self.pending = Some(kind);
            self.drag_active = true;
        }

        if let Some(point) = input.commit {
            if let Some(kind) = self.pending {
                if cost_of(kind) <= elixir.get() {
                    out.push(Command::DeployUnit {
                        team: Team::Player,
                        kind,
                        position: point,
                    });
                }
            }
            // The selection clears after every commit attempt, spawn or not.
            self.clear();
        }
    }

    fn clear(&mut self) {
        self.pending = None;
        self.drag_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{Placement, PlacementInput};
    use glam::Vec2;
    use lane_clash_core::{Command, Elixir, Event, MatchOutcome, Team, UnitKind};

    fn select(kind: UnitKind) -> PlacementInput {
        PlacementInput::new(Some(kind), None, false)
    }

    fn commit(point: Vec2) -> PlacementInput {
        PlacementInput::new(None, Some(point), false)
    }

    fn preset_cost(kind: UnitKind) -> u32 {
        lane_clash_core::UnitStats::preset(kind).cost
    }

    #[test]
    fn selecting_a_card_arms_the_drag() {
        let mut placement = Placement::new();
        let mut out = Vec::new();

        placement.handle(
            &[],
            select(UnitKind::Wizard),
            Elixir::new(10),
            preset_cost,
            &mut out,
        );

        assert_eq!(placement.pending_card(), Some(UnitKind::Wizard));
        assert!(placement.is_drag_active());
        assert!(out.is_empty());
    }

    #[test]
    fn committing_emits_a_player_deploy_command() {
        let mut placement = Placement::new();
        let mut out = Vec::new();
        let point = Vec2::new(250.0, 420.0);

        placement.handle(
            &[],
            select(UnitKind::Knight),
            Elixir::new(5),
            preset_cost,
            &mut out,
        );
        placement.handle(&[], commit(point), Elixir::new(5), preset_cost, &mut out);

        assert_eq!(
            out,
            vec![Command::DeployUnit {
                team: Team::Player,
                kind: UnitKind::Knight,
                position: point,
            }],
        );
        assert_eq!(placement.pending_card(), None);
        assert!(!placement.is_drag_active());
    }

    #[test]
    fn committing_without_a_selection_is_silent() {
        let mut placement = Placement::new();
        let mut out = Vec::new();

        placement.handle(
            &[],
            commit(Vec2::new(100.0, 400.0)),
            Elixir::new(10),
            preset_cost,
            &mut out,
        );

        assert!(out.is_empty());
    }

    #[test]
    fn unaffordable_commits_are_skipped_but_still_clear_the_selection() {
        let mut placement = Placement::new();
        let mut out = Vec::new();

        placement.handle(
            &[],
            select(UnitKind::Giant),
            Elixir::new(2),
            preset_cost,
            &mut out,
        );
        placement.handle(
            &[],
            commit(Vec2::new(300.0, 500.0)),
            Elixir::new(2),
            preset_cost,
            &mut out,
        );

        assert!(out.is_empty());
        assert_eq!(placement.pending_card(), None);
        assert!(!placement.is_drag_active());
    }

    #[test]
    fn cancel_clears_the_pending_selection() {
        let mut placement = Placement::new();
        let mut out = Vec::new();

        placement.handle(
            &[],
            select(UnitKind::Archer),
            Elixir::new(10),
            preset_cost,
            &mut out,
        );
        placement.handle(
            &[],
            PlacementInput::new(None, None, true),
            Elixir::new(10),
            preset_cost,
            &mut out,
        );

        assert_eq!(placement.pending_card(), None);
        assert!(!placement.is_drag_active());
        assert!(out.is_empty());
    }

    #[test]
    fn the_system_goes_quiet_after_the_match_ends() {
        let mut placement = Placement::new();
        let mut out = Vec::new();
        let ended = [Event::MatchEnded {
            outcome: MatchOutcome::Victory,
        }];

        placement.handle(
            &ended,
            select(UnitKind::Knight),
            Elixir::new(10),
            preset_cost,
            &mut out,
        );
        placement.handle(
            &[],
            commit(Vec2::new(300.0, 500.0)),
            Elixir::new(10),
            preset_cost,
            &mut out,
        );

        assert!(out.is_empty());
        assert_eq!(placement.pending_card(), None);
    }
}
