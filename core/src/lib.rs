#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Clash engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

mod geometry;

pub use geometry::{direction_between, WorldRect};

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Lane Clash.";

/// Minimum simulated time a unit must wait between cooldown-gated attacks.
pub const UNIT_ATTACK_COOLDOWN: Duration = Duration::from_millis(1000);

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a unit join the battle for the given team.
    DeployUnit {
        /// Team the unit fights for once deployed.
        team: Team,
        /// Kind of unit requested for deployment.
        kind: UnitKind,
        /// Requested spawn point in world units.
        position: Vec2,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the player side gained a regeneration step of elixir.
    ElixirRegenerated {
        /// Elixir balance after applying the regeneration step and cap.
        total: Elixir,
    },
    /// Confirms that the player side paid for a deployment.
    ElixirSpent {
        /// Amount of elixir removed from the balance.
        amount: u32,
        /// Elixir balance remaining after the spend.
        remaining: Elixir,
    },
    /// Confirms that a unit joined the battle.
    UnitDeployed {
        /// Identifier assigned to the new unit by the world.
        unit: UnitId,
        /// Team the unit fights for.
        team: Team,
        /// Kind of unit that was deployed.
        kind: UnitKind,
        /// Spawn point of the unit in world units.
        position: Vec2,
    },
    /// Reports that a deployment request was rejected.
    DeployRejected {
        /// Team named in the rejected request.
        team: Team,
        /// Kind of unit named in the rejected request.
        kind: UnitKind,
        /// Spawn point named in the rejected request.
        position: Vec2,
        /// Specific reason the deployment failed.
        reason: DeployError,
    },
    /// Confirms that a combatant launched a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile by the world.
        projectile: ProjectileId,
        /// Team that owns the projectile.
        team: Team,
        /// Launch point of the projectile.
        origin: Vec2,
        /// Captured target point the projectile flies toward.
        target: Vec2,
    },
    /// Reports that a unit absorbed damage.
    UnitDamaged {
        /// Identifier of the damaged unit.
        unit: UnitId,
        /// Team the damaged unit fights for.
        team: Team,
        /// Amount of damage applied.
        amount: u32,
        /// Health remaining after the damage was applied.
        remaining: Health,
    },
    /// Announces that a unit's health reached zero.
    UnitDied {
        /// Identifier of the unit that died.
        unit: UnitId,
        /// Team the unit fought for.
        team: Team,
        /// Kind of the unit that died.
        kind: UnitKind,
    },
    /// Reports that a tower absorbed damage.
    TowerDamaged {
        /// Identifier of the damaged tower.
        tower: TowerId,
        /// Team the damaged tower belongs to.
        team: Team,
        /// Amount of damage applied.
        amount: u32,
        /// Health remaining after the damage was applied.
        remaining: Health,
    },
    /// Announces that a tower's health reached zero.
    ///
    /// The tower stays in the world to mark the terminal state; it simply
    /// stops acquiring targets and firing.
    TowerDestroyed {
        /// Identifier of the destroyed tower.
        tower: TowerId,
        /// Team the tower belonged to.
        team: Team,
    },
    /// Announces that the match reached a terminal outcome.
    MatchEnded {
        /// Outcome from the player side's perspective.
        outcome: MatchOutcome,
    },
}

/// Side of the arena a combatant fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// The human-controlled side deploying from the lower half.
    Player,
    /// The scripted opposing side deploying from the upper half.
    Enemy,
}

impl Team {
    /// Returns the opposing team.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// Kinds of units that can be deployed into the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Melee bruiser with balanced stats.
    Knight,
    /// Fragile ranged attacker with long reach.
    Archer,
    /// Slow melee tank with heavy damage and health.
    Giant,
    /// Mid-range projectile caster.
    Wizard,
}

impl UnitKind {
    /// Every deployable unit kind, in card-bar order.
    pub const ALL: [Self; 4] = [Self::Knight, Self::Archer, Self::Giant, Self::Wizard];

    /// Stable lowercase name used by adapters and scenario scripts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Knight => "knight",
            Self::Archer => "archer",
            Self::Giant => "giant",
            Self::Wizard => "wizard",
        }
    }

    /// Resolves a unit kind from its name.
    ///
    /// Unknown names fall back to [`UnitKind::Knight`] so malformed lookups
    /// never interrupt the simulation.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "archer" => Self::Archer,
            "giant" => Self::Giant,
            "wizard" => Self::Wizard,
            _ => Self::Knight,
        }
    }
}

/// Unique identifier assigned to a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates a new unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Non-owning reference to a combatant, re-validated at every point of use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRef {
    /// Reference to a unit by identifier.
    Unit(UnitId),
    /// Reference to a tower by identifier.
    Tower(TowerId),
}

/// Remaining hit points of a combatant.
///
/// Damage saturates at zero; health never goes negative and never recovers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(u32);

impl Health {
    /// Creates a health pool with the provided hit points.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Remaining hit points.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the health remaining after absorbing the given damage.
    #[must_use]
    pub const fn damaged(self, amount: u32) -> Self {
        Self(self.0.saturating_sub(amount))
    }

    /// Reports whether the health pool is exhausted.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 == 0
    }
}

/// Regenerating currency gating player-side deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Elixir(u32);

impl Elixir {
    /// Creates an elixir balance with the provided amount.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Current elixir amount.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the balance after gaining `amount`, clamped to `cap`.
    #[must_use]
    pub const fn gained(self, amount: u32, cap: u32) -> Self {
        let total = self.0.saturating_add(amount);
        if total > cap {
            Self(cap)
        } else {
            Self(total)
        }
    }

    /// Returns the balance after spending `cost`, or `None` when the balance
    /// cannot cover it. A failed spend leaves the balance untouched.
    #[must_use]
    pub const fn spent(self, cost: u32) -> Option<Self> {
        if self.0 >= cost {
            Some(Self(self.0 - cost))
        } else {
            None
        }
    }
}

/// Reasons a deployment request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeployError {
    /// The match already reached a terminal outcome.
    MatchOver,
    /// The requested spawn point lies outside the team's deploy zone.
    OutOfZone,
    /// The player side cannot afford the unit's elixir cost.
    InsufficientElixir,
}

/// Terminal result of a match, seen from the player side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// The enemy tower was destroyed first.
    Victory,
    /// The player tower was destroyed. Checked first, so a double knockout
    /// in the same tick resolves to defeat.
    Defeat,
}

/// Flight profile of the projectile launched by a ranged combatant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectileStats {
    /// Flight speed in world units per second.
    pub speed: f32,
    /// Distance from the captured target point at which the projectile
    /// expires.
    pub impact_radius: f32,
}

/// Combat profile for a unit kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    /// Elixir price the player side pays to deploy the unit.
    pub cost: u32,
    /// Hit points the unit spawns with.
    pub max_health: u32,
    /// Damage dealt per attack or projectile impact.
    pub damage: u32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Distance within which the unit attacks instead of advancing.
    pub attack_range: f32,
    /// Collision footprint radius used by projectile impacts.
    pub radius: f32,
    /// Projectile profile for ranged kinds; `None` marks a melee attacker.
    pub projectile: Option<ProjectileStats>,
}

impl UnitStats {
    /// Default combat profile shipped for the given unit kind.
    #[must_use]
    pub const fn preset(kind: UnitKind) -> Self {
        match kind {
            UnitKind::Knight => Self {
                cost: 3,
                max_health: 1200,
                damage: 150,
                speed: 60.0,
                attack_range: 40.0,
                radius: 15.0,
                projectile: None,
            },
            UnitKind::Archer => Self {
                cost: 3,
                max_health: 600,
                damage: 120,
                speed: 50.0,
                attack_range: 180.0,
                radius: 12.0,
                projectile: Some(ProjectileStats {
                    speed: 300.0,
                    impact_radius: 10.0,
                }),
            },
            UnitKind::Giant => Self {
                cost: 5,
                max_health: 3000,
                damage: 200,
                speed: 35.0,
                attack_range: 45.0,
                radius: 22.0,
                projectile: None,
            },
            UnitKind::Wizard => Self {
                cost: 4,
                max_health: 800,
                damage: 180,
                speed: 45.0,
                attack_range: 150.0,
                radius: 14.0,
                projectile: Some(ProjectileStats {
                    speed: 250.0,
                    impact_radius: 10.0,
                }),
            },
        }
    }
}

/// Combat profile shared by both base towers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    /// Hit points each tower starts the match with.
    pub max_health: u32,
    /// Damage carried by each tower projectile.
    pub damage: u32,
    /// Maximum distance at which the tower acquires targets.
    pub attack_range: f32,
    /// Collision footprint radius used by projectile impacts.
    pub radius: f32,
    /// Minimum simulated time between tower shots.
    pub cooldown: Duration,
    /// Flight profile of tower projectiles.
    pub projectile: ProjectileStats,
}

impl Default for TowerStats {
    fn default() -> Self {
        Self {
            max_health: 2500,
            damage: 200,
            attack_range: 150.0,
            radius: 30.0,
            cooldown: Duration::from_millis(800),
            projectile: ProjectileStats {
                speed: 350.0,
                impact_radius: 15.0,
            },
        }
    }
}

/// Per-kind stat table consumed by the world at construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitRoster {
    /// Stats applied to deployed knights.
    pub knight: UnitStats,
    /// Stats applied to deployed archers.
    pub archer: UnitStats,
    /// Stats applied to deployed giants.
    pub giant: UnitStats,
    /// Stats applied to deployed wizards.
    pub wizard: UnitStats,
}

impl UnitRoster {
    /// Looks up the stats for the given unit kind.
    #[must_use]
    pub const fn stats(&self, kind: UnitKind) -> UnitStats {
        match kind {
            UnitKind::Knight => self.knight,
            UnitKind::Archer => self.archer,
            UnitKind::Giant => self.giant,
            UnitKind::Wizard => self.wizard,
        }
    }
}

impl Default for UnitRoster {
    fn default() -> Self {
        Self {
            knight: UnitStats::preset(UnitKind::Knight),
            archer: UnitStats::preset(UnitKind::Archer),
            giant: UnitStats::preset(UnitKind::Giant),
            wizard: UnitStats::preset(UnitKind::Wizard),
        }
    }
}

/// Dimensions of the rectangular playfield.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Playfield width in world units.
    pub width: f32,
    /// Playfield height in world units.
    pub height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Elixir economy parameters for the player side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElixirConfig {
    /// Balance the player side starts the match with.
    pub initial: u32,
    /// Maximum elixir the balance can hold.
    pub cap: u32,
    /// Amount granted per full regeneration second.
    pub regen: u32,
}

impl Default for ElixirConfig {
    fn default() -> Self {
        Self {
            initial: 5,
            cap: 10,
            regen: 1,
        }
    }
}

/// Construction-time configuration consumed by the world.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Playfield dimensions.
    pub arena: ArenaConfig,
    /// Per-kind unit stat table.
    pub units: UnitRoster,
    /// Shared tower profile.
    pub tower: TowerStats,
    /// Player-side elixir economy.
    pub elixir: ElixirConfig,
}

/// Immutable representation of a single unit's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitSnapshot {
    /// Unique identifier assigned to the unit.
    pub id: UnitId,
    /// Kind of the unit.
    pub kind: UnitKind,
    /// Team the unit fights for.
    pub team: Team,
    /// Current position in world units.
    pub position: Vec2,
    /// Remaining hit points.
    pub health: Health,
    /// Hit points the unit spawned with.
    pub max_health: u32,
    /// Combatant the unit most recently locked onto, if any.
    pub target: Option<TargetRef>,
}

/// Read-only snapshot describing all live units in the arena.
#[derive(Clone, Debug, Default)]
pub struct UnitView {
    snapshots: Vec<UnitSnapshot>,
}

impl UnitView {
    /// Creates a new unit view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<UnitSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured unit snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<UnitSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Team the tower belongs to.
    pub team: Team,
    /// Fixed position of the tower in world units.
    pub position: Vec2,
    /// Remaining hit points.
    pub health: Health,
    /// Hit points the tower started the match with.
    pub max_health: u32,
    /// Whether the tower still stands. Destroyed towers remain in the view
    /// to mark the terminal state.
    pub alive: bool,
}

/// Read-only snapshot describing both base towers.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile by the world.
    pub id: ProjectileId,
    /// Team that owns the projectile.
    pub team: Team,
    /// Current position in world units.
    pub position: Vec2,
    /// Captured target point the projectile flies toward.
    pub target: Vec2,
}

/// Read-only snapshot describing all live projectiles.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectile snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Aggregated match statistics folded from the event stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsReport {
    /// Total simulated time the match has run.
    pub duration: Duration,
    /// Units the player side deployed.
    pub player_deployed: u32,
    /// Units the enemy side deployed.
    pub enemy_deployed: u32,
    /// Damage the player side dealt to enemy combatants.
    pub player_damage: u64,
    /// Damage the enemy side dealt to player combatants.
    pub enemy_damage: u64,
    /// Projectiles launched by either side.
    pub projectiles_fired: u32,
    /// Elixir the player side spent on deployments.
    pub elixir_spent: u32,
    /// Terminal outcome, once the match ends.
    pub outcome: Option<MatchOutcome>,
}
