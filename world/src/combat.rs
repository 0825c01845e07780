//! Collision passes resolved after combatants and projectiles advance.

use lane_clash_core::Event;

use crate::World;

/// Proximity clash between opposing unit pairs.
///
/// Any unit closer to an opposing unit than its own attack range lands a blow
/// this tick, bypassing the cooldown-gated attack path entirely. Both
/// directions of a pair are decided before either blow is applied, so a
/// lethal hit does not cancel the counter-hit landing in the same tick.
pub(crate) fn resolve_melee_clash(world: &mut World, out_events: &mut Vec<Event>) {
    for first in 0..world.units.len() {
        for second in (first + 1)..world.units.len() {
            if !world.units[first].alive || !world.units[second].alive {
                continue;
            }
            if world.units[first].team == world.units[second].team {
                continue;
            }

            let separation = world.units[first]
                .position
                .distance(world.units[second].position);
            let first_strikes = separation < world.units[first].stats.attack_range;
            let second_strikes = separation < world.units[second].stats.attack_range;

            let (first_id, first_damage) =
                (world.units[first].id, world.units[first].stats.damage);
            let (second_id, second_damage) =
                (world.units[second].id, world.units[second].stats.damage);

            if first_strikes {
                world.damage_unit(second_id, first_damage, out_events);
            }
            if second_strikes {
                world.damage_unit(first_id, second_damage, out_events);
            }
        }
    }
}

/// Impact resolution between live projectiles and opposing combatants.
///
/// Each projectile damages at most one victim: the first live opposing unit
/// in list order whose footprint contains the projectile's position. Ties are
/// broken by list order, not distance. When no unit is struck the pass falls
/// back to the opposing towers, which is how ranged attackers wear a base
/// down.
pub(crate) fn resolve_projectile_impacts(world: &mut World, out_events: &mut Vec<Event>) {
    for projectile_index in 0..world.projectiles.len() {
        if !world.projectiles[projectile_index].alive {
            continue;
        }
        let (team, position, damage) = {
            let projectile = &world.projectiles[projectile_index];
            (projectile.team, projectile.position, projectile.damage)
        };

        let victim = world
            .units
            .iter()
            .find(|unit| {
                unit.alive
                    && unit.team != team
                    && unit.position.distance(position) <= unit.stats.radius
            })
            .map(|unit| unit.id);
        if let Some(unit) = victim {
            world.projectiles[projectile_index].alive = false;
            world.damage_unit(unit, damage, out_events);
            continue;
        }

        let tower_radius = world.config.tower.radius;
        let struck_tower = world
            .towers
            .iter()
            .find(|tower| {
                tower.alive
                    && tower.team != team
                    && tower.position.distance(position) <= tower_radius
            })
            .map(|tower| tower.id);
        if let Some(tower) = struck_tower {
            world.projectiles[projectile_index].alive = false;
            world.damage_tower(tower, damage, out_events);
        }
    }
}
