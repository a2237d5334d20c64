//! Tests for the scripted world.

use rts_core::{Race, Tick, UnitType};
use rts_task::{BuildLocation, TaskIssuer, TaskKind};

use crate::world::World;

fn count(world: &World, unit_type: UnitType) -> usize {
    world
        .bases
        .iter()
        .flat_map(|b| &b.buildings)
        .filter(|b| b.unit_type == unit_type)
        .count()
}

// ── Zerg morphs ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod morph_tests {
    use super::*;

    #[test]
    fn colony_morphs_in_place() {
        let mut world = World::new(Race::Zerg, Vec::new());
        world.tasks.bank_mut().deposit(500, 0);
        world.tasks.build(UnitType::CreepColony, TaskKind::Defense, BuildLocation::Base);
        world.tasks.build(UnitType::SunkenColony, TaskKind::Defense, BuildLocation::Base);

        let events = world.advance(Tick(1));
        assert_eq!(events.started.len(), 2);
        assert_eq!(count(&world, UnitType::CreepColony), 0);
        assert_eq!(count(&world, UnitType::SunkenColony), 1);

        world.advance(Tick(301));
        let sunken = world.bases[0]
            .buildings
            .iter()
            .find(|b| b.unit_type == UnitType::SunkenColony);
        assert!(sunken.is_some_and(|b| b.completed));
        assert_eq!(count(&world, UnitType::SunkenColony), 1);
    }

    #[test]
    fn lone_defense_is_placed_fresh() {
        let mut world = World::new(Race::Terran, Vec::new());
        world.tasks.bank_mut().deposit(500, 0);
        world.tasks.build(UnitType::MissileTurret, TaskKind::Defense, BuildLocation::Base);

        world.advance(Tick(1));
        assert_eq!(count(&world, UnitType::MissileTurret), 1);
    }
}
