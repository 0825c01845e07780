#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Lane Clash.
//!
//! The world owns every combatant and projectile in the match. Adapters and
//! systems mutate it exclusively through [`apply`], which executes one
//! command and broadcasts the resulting [`Event`] values. A tick runs a fixed
//! phase sequence: elixir regeneration, unit advance, projectile flight,
//! tower fire, melee clash, projectile impacts, cleanup, and the win check.
//! Each phase completes before the next starts, and deaths earlier in a tick
//! are observable by everything that runs later in the same tick.

mod arena;
mod combat;

pub use arena::Arena;

use std::time::Duration;

use glam::Vec2;
use lane_clash_core::{
    direction_between, Command, DeployError, Elixir, Event, Health, MatchConfig, MatchOutcome,
    ProjectileId, ProjectileStats, TargetRef, Team, TowerId, UnitId, UnitKind, UnitStats,
    UNIT_ATTACK_COOLDOWN, WELCOME_BANNER,
};

/// Simulated time that must accumulate before one elixir regeneration step.
const REGEN_QUANTUM: Duration = Duration::from_secs(1);

/// Represents the authoritative Lane Clash match state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: MatchConfig,
    arena: Arena,
    clock: Duration,
    units: Vec<UnitState>,
    towers: Vec<TowerState>,
    projectiles: Vec<ProjectileState>,
    next_unit_id: u32,
    next_projectile_id: u32,
    elixir: Elixir,
    regen_accumulator: Duration,
    outcome: Option<MatchOutcome>,
}

impl World {
    /// Creates a new match ready for simulation.
    ///
    /// Both base towers spawn immediately at their fixed anchors; everything
    /// else joins through [`Command::DeployUnit`].
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        let arena = Arena::new(config.arena);
        let health = Health::new(config.tower.max_health);
        let towers = vec![
            TowerState::at(
                TowerId::new(0),
                Team::Player,
                arena.tower_anchor(Team::Player),
                health,
            ),
            TowerState::at(
                TowerId::new(1),
                Team::Enemy,
                arena.tower_anchor(Team::Enemy),
                health,
            ),
        ];
        Self {
            banner: WELCOME_BANNER,
            arena,
            clock: Duration::ZERO,
            units: Vec::new(),
            towers,
            projectiles: Vec::new(),
            next_unit_id: 0,
            next_projectile_id: 0,
            elixir: Elixir::new(config.elixir.initial),
            regen_accumulator: Duration::ZERO,
            outcome: None,
            config,
        }
    }

    fn advance(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.clock = self.clock.saturating_add(dt);
        out_events.push(Event::TimeAdvanced { dt });

        self.regenerate_elixir(dt, out_events);
        self.advance_units(dt, out_events);
        self.advance_projectiles(dt);
        self.advance_towers(out_events);
        combat::resolve_melee_clash(self, out_events);
        combat::resolve_projectile_impacts(self, out_events);
        self.remove_dead();
        self.resolve_outcome(out_events);
    }

    fn regenerate_elixir(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.regen_accumulator = self.regen_accumulator.saturating_add(dt);
        if self.regen_accumulator < REGEN_QUANTUM {
            return;
        }

        // The excess is discarded rather than carried over: a long frame
        // grants a single regeneration step, never several.
        self.regen_accumulator = Duration::ZERO;
        self.elixir = self
            .elixir
            .gained(self.config.elixir.regen, self.config.elixir.cap);
        out_events.push(Event::ElixirRegenerated { total: self.elixir });
    }

    fn advance_units(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let ids: Vec<UnitId> = self.units.iter().map(|unit| unit.id).collect();
        for id in ids {
            let Some(index) = self.unit_index(id) else {
                continue;
            };
            if !self.units[index].alive {
                continue;
            }

            let target = self.acquire_unit_target(index);
            self.units[index].target = target;
            let Some(target) = target else {
                continue;
            };
            let Some(target_point) = self.target_position(target) else {
                continue;
            };

            let unit = &self.units[index];
            let distance = unit.position.distance(target_point);
            if distance > unit.stats.attack_range {
                let step = unit.stats.speed * dt.as_secs_f32();
                let next = unit.position + direction_between(unit.position, target_point) * step;
                self.units[index].position = self.arena.bounds().clamp_point(next);
            } else {
                self.attempt_unit_attack(index, target, target_point, out_events);
            }
        }
    }

    fn advance_projectiles(&mut self, dt: Duration) {
        let bounds = self.arena.bounds();
        let step_seconds = dt.as_secs_f32();
        for projectile in &mut self.projectiles {
            if !projectile.alive {
                continue;
            }

            let direction = direction_between(projectile.position, projectile.target);
            projectile.position += direction * projectile.speed * step_seconds;

            if projectile.position.distance(projectile.target) <= projectile.impact_radius
                || !bounds.contains(projectile.position)
            {
                projectile.alive = false;
            }
        }
    }

    fn advance_towers(&mut self, out_events: &mut Vec<Event>) {
        for tower_index in 0..self.towers.len() {
            let (team, position, alive, last_attack) = {
                let tower = &self.towers[tower_index];
                (tower.team, tower.position, tower.alive, tower.last_attack)
            };
            if !alive {
                continue;
            }

            // Candidates beyond the tower's range are excluded outright; the
            // closest in-range unit wins, or nothing does.
            let mut best: Option<(f32, Vec2)> = None;
            for unit in &self.units {
                if !unit.alive || unit.team == team {
                    continue;
                }
                let distance = position.distance(unit.position);
                if distance > self.config.tower.attack_range {
                    continue;
                }
                let closer = match best {
                    Some((best_distance, _)) => distance < best_distance,
                    None => true,
                };
                if closer {
                    best = Some((distance, unit.position));
                }
            }
            let Some((_, target_point)) = best else {
                continue;
            };

            if self.clock.saturating_sub(last_attack) < self.config.tower.cooldown {
                continue;
            }
            self.towers[tower_index].last_attack = self.clock;
            self.spawn_projectile(
                team,
                position,
                target_point,
                self.config.tower.projectile,
                self.config.tower.damage,
                out_events,
            );
        }
    }

    fn attempt_unit_attack(
        &mut self,
        index: usize,
        target: TargetRef,
        target_point: Vec2,
        out_events: &mut Vec<Event>,
    ) {
        let ready =
            self.clock.saturating_sub(self.units[index].last_attack) >= UNIT_ATTACK_COOLDOWN;
        if !ready {
            return;
        }
        self.units[index].last_attack = self.clock;

        let (team, origin, damage, projectile) = {
            let unit = &self.units[index];
            (
                unit.team,
                unit.position,
                unit.stats.damage,
                unit.stats.projectile,
            )
        };
        match projectile {
            None => self.damage_target(target, damage, out_events),
            Some(stats) => {
                self.spawn_projectile(team, origin, target_point, stats, damage, out_events);
            }
        }
    }

    fn unit_index(&self, id: UnitId) -> Option<usize> {
        self.units.iter().position(|unit| unit.id == id)
    }

    fn acquire_unit_target(&self, index: usize) -> Option<TargetRef> {
        let unit = &self.units[index];

        let mut best: Option<(f32, UnitId)> = None;
        for (other_index, other) in self.units.iter().enumerate() {
            if other_index == index || !other.alive || other.team == unit.team {
                continue;
            }
            let distance = unit.position.distance(other.position);
            let closer = match best {
                Some((best_distance, _)) => distance < best_distance,
                None => true,
            };
            if closer {
                best = Some((distance, other.id));
            }
        }
        if let Some((_, id)) = best {
            return Some(TargetRef::Unit(id));
        }

        // No opposing unit anywhere: advance on the nearest standing tower.
        let mut best_tower: Option<(f32, TowerId)> = None;
        for tower in &self.towers {
            if !tower.alive || tower.team == unit.team {
                continue;
            }
            let distance = unit.position.distance(tower.position);
            let closer = match best_tower {
                Some((best_distance, _)) => distance < best_distance,
                None => true,
            };
            if closer {
                best_tower = Some((distance, tower.id));
            }
        }
        best_tower.map(|(_, id)| TargetRef::Tower(id))
    }

    fn target_position(&self, target: TargetRef) -> Option<Vec2> {
        match target {
            TargetRef::Unit(id) => self
                .units
                .iter()
                .find(|unit| unit.id == id && unit.alive)
                .map(|unit| unit.position),
            TargetRef::Tower(id) => self
                .towers
                .iter()
                .find(|tower| tower.id == id && tower.alive)
                .map(|tower| tower.position),
        }
    }

    fn damage_target(&mut self, target: TargetRef, amount: u32, out_events: &mut Vec<Event>) {
        match target {
            TargetRef::Unit(id) => self.damage_unit(id, amount, out_events),
            TargetRef::Tower(id) => self.damage_tower(id, amount, out_events),
        }
    }

    fn damage_unit(&mut self, id: UnitId, amount: u32, out_events: &mut Vec<Event>) {
        let Some(unit) = self.units.iter_mut().find(|unit| unit.id == id && unit.alive) else {
            return;
        };
        unit.health = unit.health.damaged(amount);
        out_events.push(Event::UnitDamaged {
            unit: id,
            team: unit.team,
            amount,
            remaining: unit.health,
        });
        if unit.health.is_depleted() {
            unit.alive = false;
            out_events.push(Event::UnitDied {
                unit: id,
                team: unit.team,
                kind: unit.kind,
            });
        }
    }

    fn damage_tower(&mut self, id: TowerId, amount: u32, out_events: &mut Vec<Event>) {
        let Some(tower) = self
            .towers
            .iter_mut()
            .find(|tower| tower.id == id && tower.alive)
        else {
            return;
        };
        tower.health = tower.health.damaged(amount);
        out_events.push(Event::TowerDamaged {
            tower: id,
            team: tower.team,
            amount,
            remaining: tower.health,
        });
        if tower.health.is_depleted() {
            tower.alive = false;
            out_events.push(Event::TowerDestroyed {
                tower: id,
                team: tower.team,
            });
        }
    }

    fn spawn_projectile(
        &mut self,
        team: Team,
        origin: Vec2,
        target: Vec2,
        stats: ProjectileStats,
        damage: u32,
        out_events: &mut Vec<Event>,
    ) {
        let id = ProjectileId::new(self.next_projectile_id);
        self.next_projectile_id = self.next_projectile_id.wrapping_add(1);
        self.projectiles.push(ProjectileState {
            id,
            team,
            position: origin,
            target,
            speed: stats.speed,
            impact_radius: stats.impact_radius,
            damage,
            alive: true,
        });
        out_events.push(Event::ProjectileFired {
            projectile: id,
            team,
            origin,
            target,
        });
    }

    fn remove_dead(&mut self) {
        self.units.retain(|unit| unit.alive);
        self.projectiles.retain(|projectile| projectile.alive);
    }

    fn resolve_outcome(&mut self, out_events: &mut Vec<Event>) {
        // The player tower is checked first, so a double knockout in the
        // same tick resolves to defeat.
        let player_tower_down = self
            .towers
            .iter()
            .any(|tower| tower.team == Team::Player && !tower.alive);
        let enemy_tower_down = self
            .towers
            .iter()
            .any(|tower| tower.team == Team::Enemy && !tower.alive);

        let outcome = if player_tower_down {
            Some(MatchOutcome::Defeat)
        } else if enemy_tower_down {
            Some(MatchOutcome::Victory)
        } else {
            None
        };
        if let Some(outcome) = outcome {
            self.outcome = Some(outcome);
            out_events.push(Event::MatchEnded { outcome });
        }
    }

    fn deploy(&mut self, team: Team, kind: UnitKind, position: Vec2, out_events: &mut Vec<Event>) {
        if !self.arena.deploy_zone(team).contains(position) {
            out_events.push(Event::DeployRejected {
                team,
                kind,
                position,
                reason: DeployError::OutOfZone,
            });
            return;
        }

        // Only the player side pays; the opponent driver deploys for free.
        if team == Team::Player {
            let cost = self.config.units.stats(kind).cost;
            match self.elixir.spent(cost) {
                Some(remaining) => {
                    self.elixir = remaining;
                    out_events.push(Event::ElixirSpent {
                        amount: cost,
                        remaining,
                    });
                }
                None => {
                    out_events.push(Event::DeployRejected {
                        team,
                        kind,
                        position,
                        reason: DeployError::InsufficientElixir,
                    });
                    return;
                }
            }
        }

        let stats = self.config.units.stats(kind);
        let id = UnitId::new(self.next_unit_id);
        self.next_unit_id = self.next_unit_id.wrapping_add(1);
        self.units.push(UnitState {
            id,
            kind,
            team,
            position,
            health: Health::new(stats.max_health),
            stats,
            alive: true,
            last_attack: self.clock,
            target: None,
        });
        out_events.push(Event::UnitDeployed {
            unit: id,
            team,
            kind,
            position,
        });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the match reached a terminal outcome, ticks become no-ops and
/// deployments are rejected with [`DeployError::MatchOver`].
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            if world.outcome.is_none() {
                world.advance(dt, out_events);
            }
        }
        Command::DeployUnit {
            team,
            kind,
            position,
        } => {
            if world.outcome.is_some() {
                out_events.push(Event::DeployRejected {
                    team,
                    kind,
                    position,
                    reason: DeployError::MatchOver,
                });
            } else {
                world.deploy(team, kind, position, out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Arena, World};
    use lane_clash_core::{
        Elixir, MatchConfig, MatchOutcome, ProjectileSnapshot, ProjectileView, TowerSnapshot,
        TowerView, UnitKind, UnitSnapshot, UnitView,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the playfield geometry.
    #[must_use]
    pub fn arena(world: &World) -> &Arena {
        &world.arena
    }

    /// Provides read-only access to the configuration the match was built with.
    #[must_use]
    pub fn config(world: &World) -> &MatchConfig {
        &world.config
    }

    /// Current elixir balance of the player side.
    #[must_use]
    pub fn elixir(world: &World) -> Elixir {
        world.elixir
    }

    /// Elixir price of deploying the given unit kind.
    #[must_use]
    pub fn unit_cost(world: &World, kind: UnitKind) -> u32 {
        world.config.units.stats(kind).cost
    }

    /// Terminal outcome of the match, once one exists.
    #[must_use]
    pub fn match_outcome(world: &World) -> Option<MatchOutcome> {
        world.outcome
    }

    /// Captures a read-only view of the live units in the arena.
    #[must_use]
    pub fn unit_view(world: &World) -> UnitView {
        let snapshots: Vec<UnitSnapshot> = world
            .units
            .iter()
            .map(|unit| UnitSnapshot {
                id: unit.id,
                kind: unit.kind,
                team: unit.team,
                position: unit.position,
                health: unit.health,
                max_health: unit.stats.max_health,
                target: unit.target,
            })
            .collect();
        UnitView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of both base towers.
    ///
    /// Destroyed towers stay in the view with their `alive` flag cleared.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        let snapshots: Vec<TowerSnapshot> = world
            .towers
            .iter()
            .map(|tower| TowerSnapshot {
                id: tower.id,
                team: tower.team,
                position: tower.position,
                health: tower.health,
                max_health: world.config.tower.max_health,
                alive: tower.alive,
            })
            .collect();
        TowerView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of the live projectiles.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        let snapshots: Vec<ProjectileSnapshot> = world
            .projectiles
            .iter()
            .map(|projectile| ProjectileSnapshot {
                id: projectile.id,
                team: projectile.team,
                position: projectile.position,
                target: projectile.target,
            })
            .collect();
        ProjectileView::from_snapshots(snapshots)
    }
}

#[derive(Clone, Debug)]
struct UnitState {
    id: UnitId,
    kind: UnitKind,
    team: Team,
    position: Vec2,
    health: Health,
    stats: UnitStats,
    alive: bool,
    last_attack: Duration,
    target: Option<TargetRef>,
}

#[derive(Clone, Debug)]
struct TowerState {
    id: TowerId,
    team: Team,
    position: Vec2,
    health: Health,
    alive: bool,
    last_attack: Duration,
}

impl TowerState {
    fn at(id: TowerId, team: Team, position: Vec2, health: Health) -> Self {
        Self {
            id,
            team,
            position,
            health,
            alive: true,
            last_attack: Duration::ZERO,
        }
    }
}

#[derive(Clone, Debug)]
struct ProjectileState {
    id: ProjectileId,
    team: Team,
    position: Vec2,
    target: Vec2,
    speed: f32,
    impact_radius: f32,
    damage: u32,
    alive: bool,
}
