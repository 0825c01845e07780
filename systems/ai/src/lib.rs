#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic opponent driver that deploys enemy units on a fixed cadence.
//!
//! The driver stands in for a second player: every time a full deploy
//! interval of simulated time accrues, it picks a uniformly random unit kind
//! and a uniformly random point inside the enemy half and emits a
//! [`Command::DeployUnit`] for the enemy team. Enemy deployments carry no
//! elixir cost, so the driver needs no resource bookkeeping.

use std::time::Duration;

use glam::Vec2;
use lane_clash_core::{Command, Event, Team, UnitKind, WorldRect};

const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1;

/// Interval between enemy deployments used by default configurations.
pub const DEFAULT_DEPLOY_INTERVAL: Duration = Duration::from_millis(3000);

/// Configuration parameters required to construct the opponent driver.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    deploy_interval: Duration,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided cadence and seed.
    #[must_use]
    pub const fn new(deploy_interval: Duration, rng_seed: u64) -> Self {
        Self {
            deploy_interval,
            rng_seed,
        }
    }

    /// Creates a configuration with the default 3000 ms cadence.
    #[must_use]
    pub const fn with_seed(rng_seed: u64) -> Self {
        Self::new(DEFAULT_DEPLOY_INTERVAL, rng_seed)
    }
}

/// Pure system that deterministically emits enemy deploy commands.
#[derive(Debug)]
pub struct Opponent {
    deploy_interval: Duration,
    accumulator: Duration,
    rng_state: u64,
    match_over: bool,
}

impl Opponent {
    /// Creates a new opponent driver using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            deploy_interval: config.deploy_interval,
            accumulator: Duration::ZERO,
            rng_state: config.rng_seed,
            match_over: false,
        }
    }

    /// Consumes events and the enemy deploy zone to emit deploy commands.
    pub fn handle(&mut self, events: &[Event], deploy_zone: WorldRect, out: &mut Vec<Command>) {
        for event in events {
            if matches!(event, Event::MatchEnded { .. }) {
                self.match_over = true;
            }
        }
        if self.match_over || self.deploy_interval.is_zero() {
            return;
        }

        let mut accumulated = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                accumulated = accumulated.saturating_add(*dt);
            }
        }
        if accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        let attempts = self.resolve_deploy_attempts();

        for _ in 0..attempts {
            let kind = self.select_kind();
            let position = self.select_position(deploy_zone);
            out.push(Command::DeployUnit {
                team: Team::Enemy,
                kind,
                position,
            });
        }
    }

    fn resolve_deploy_attempts(&mut self) -> usize {
        let mut attempts = 0;
        while self.accumulator >= self.deploy_interval {
            self.accumulator -= self.deploy_interval;
            attempts += 1;
        }
        attempts
    }

    fn select_kind(&mut self) -> UnitKind {
        let value = self.advance_rng();
        let index = (value % UnitKind::ALL.len() as u64) as usize;
        UnitKind::ALL[index]
    }

    fn select_position(&mut self, zone: WorldRect) -> Vec2 {
        let x = zone.min().x + self.random_fraction() * zone.width();
        let y = zone.min().y + self.random_fraction() * zone.height();
        zone.clamp_point(Vec2::new(x, y))
    }

    fn random_fraction(&mut self) -> f32 {
        // Top 24 bits keep the conversion exact in f32.
        (self.advance_rng() >> 40) as f32 / (1u64 << 24) as f32
    }

    fn advance_rng(&mut self) -> u64 {
        self.rng_state = self
            .rng_state
            .wrapping_mul(RNG_MULTIPLIER)
            .wrapping_add(RNG_INCREMENT);
        self.rng_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_stay_in_the_unit_interval() {
        let mut opponent = Opponent::new(Config::with_seed(7));
        for _ in 0..1000 {
            let fraction = opponent.random_fraction();
            assert!((0.0..1.0).contains(&fraction));
        }
    }

    #[test]
    fn attempts_accrue_once_per_full_interval() {
        let mut opponent = Opponent::new(Config::new(Duration::from_secs(3), 1));
        opponent.accumulator = Duration::from_secs(7);
        assert_eq!(opponent.resolve_deploy_attempts(), 2);
        assert_eq!(opponent.accumulator, Duration::from_secs(1));
    }
}
