//! Playfield geometry: bounds, per-team deploy zones, and tower anchors.

use glam::Vec2;
use lane_clash_core::{ArenaConfig, Team, WorldRect};

/// Distance between a tower anchor and its team's edge of the playfield.
const TOWER_MARGIN: f32 = 80.0;

/// Fixed rectangular playfield split into two deploy halves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    width: f32,
    height: f32,
}

impl Arena {
    /// Creates an arena with the configured dimensions.
    #[must_use]
    pub(crate) const fn new(config: ArenaConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
        }
    }

    /// Playfield width in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Playfield height in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Full playfield bounds. Units and projectiles never leave this
    /// rectangle alive.
    #[must_use]
    pub fn bounds(&self) -> WorldRect {
        WorldRect::from_min_max(Vec2::ZERO, Vec2::new(self.width, self.height))
    }

    /// Half of the playfield where the given team may legally deploy.
    ///
    /// The player half covers the lower portion of the field, the enemy half
    /// the upper portion; the dividing line belongs to both halves.
    #[must_use]
    pub fn deploy_zone(&self, team: Team) -> WorldRect {
        let midline = self.height / 2.0;
        match team {
            Team::Player => WorldRect::from_min_max(
                Vec2::new(0.0, midline),
                Vec2::new(self.width, self.height),
            ),
            Team::Enemy => {
                WorldRect::from_min_max(Vec2::ZERO, Vec2::new(self.width, midline))
            }
        }
    }

    /// Fixed spawn position of the given team's base tower.
    #[must_use]
    pub fn tower_anchor(&self, team: Team) -> Vec2 {
        let x = self.width / 2.0;
        match team {
            Team::Player => Vec2::new(x, self.height - TOWER_MARGIN),
            Team::Enemy => Vec2::new(x, TOWER_MARGIN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Arena;
    use glam::Vec2;
    use lane_clash_core::{ArenaConfig, Team};

    fn arena() -> Arena {
        Arena::new(ArenaConfig {
            width: 800.0,
            height: 600.0,
        })
    }

    #[test]
    fn deploy_zones_split_the_field_at_the_midline() {
        let arena = arena();
        let player = arena.deploy_zone(Team::Player);
        let enemy = arena.deploy_zone(Team::Enemy);

        assert!(player.contains(Vec2::new(400.0, 599.0)));
        assert!(!player.contains(Vec2::new(400.0, 299.0)));
        assert!(enemy.contains(Vec2::new(400.0, 1.0)));
        assert!(!enemy.contains(Vec2::new(400.0, 301.0)));

        // The midline belongs to both halves.
        assert!(player.contains(Vec2::new(400.0, 300.0)));
        assert!(enemy.contains(Vec2::new(400.0, 300.0)));
    }

    #[test]
    fn tower_anchors_sit_inside_their_team_zone() {
        let arena = arena();
        let player_anchor = arena.tower_anchor(Team::Player);
        let enemy_anchor = arena.tower_anchor(Team::Enemy);

        assert!(arena.deploy_zone(Team::Player).contains(player_anchor));
        assert!(arena.deploy_zone(Team::Enemy).contains(enemy_anchor));
        assert_eq!(player_anchor, Vec2::new(400.0, 520.0));
        assert_eq!(enemy_anchor, Vec2::new(400.0, 80.0));
    }
}
