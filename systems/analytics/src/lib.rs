#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic analytics system that folds match events into a report.
//!
//! The fold is append-only: every event batch the world broadcasts is
//! consumed exactly once, and the running [`StatsReport`] reflects everything
//! observed so far. Damage is credited to the side that dealt it, which is
//! the opponent of whichever combatant absorbed it.

use lane_clash_core::{Event, StatsReport, Team};

/// Pure analytics system exposing a running match report.
#[derive(Debug, Default)]
pub struct Analytics {
    report: StatsReport,
}

impl Analytics {
    /// Creates a new analytics system with an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The report folded from every event batch handled so far.
    #[must_use]
    pub const fn report(&self) -> &StatsReport {
        &self.report
    }

    /// Consumes one batch of world events, updating the running report.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => {
                    self.report.duration = self.report.duration.saturating_add(*dt);
                }
                Event::UnitDeployed { team, .. } => match team {
                    Team::Player => self.report.player_deployed += 1,
                    Team::Enemy => self.report.enemy_deployed += 1,
                },
                Event::UnitDamaged { team, amount, .. }
                | Event::TowerDamaged { team, amount, .. } => {
                    // The victim's team identifies the dealer by opposition.
                    match team.opponent() {
                        Team::Player => self.report.player_damage += u64::from(*amount),
                        Team::Enemy => self.report.enemy_damage += u64::from(*amount),
                    }
                }
                Event::ProjectileFired { .. } => self.report.projectiles_fired += 1,
                Event::ElixirSpent { amount, .. } => self.report.elixir_spent += amount,
                Event::MatchEnded { outcome } => self.report.outcome = Some(*outcome),
                _ => {}
            }
        }
    }
}
