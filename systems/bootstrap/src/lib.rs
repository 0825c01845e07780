#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Lane Clash experience.

use lane_clash_core::UnitKind;
use lane_clash_world::{query, Arena, World};

/// Produces data adapters need before the first frame.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the playfield geometry required for rendering.
    #[must_use]
    pub fn arena<'world>(&self, world: &'world World) -> &'world Arena {
        query::arena(world)
    }

    /// Enumerates the card bar: every deployable kind with its elixir price.
    #[must_use]
    pub fn card_roster(&self, world: &World) -> Vec<(UnitKind, u32)> {
        UnitKind::ALL
            .iter()
            .map(|kind| (*kind, query::unit_cost(world, *kind)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Bootstrap;
    use lane_clash_core::{MatchConfig, UnitKind};
    use lane_clash_world::World;

    #[test]
    fn card_roster_lists_every_kind_in_card_bar_order() {
        let world = World::new(MatchConfig::default());
        let bootstrap = Bootstrap;

        let roster = bootstrap.card_roster(&world);

        assert_eq!(
            roster,
            vec![
                (UnitKind::Knight, 3),
                (UnitKind::Archer, 3),
                (UnitKind::Giant, 5),
                (UnitKind::Wizard, 4),
            ],
        );
    }
}
