//! Read-only economy snapshot passed into every reconciliation call.

use rts_core::{BaseId, Race, Tick, UnitType};

/// A building standing (or under construction) at a base.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BuildingSnapshot {
    pub unit_type: UnitType,
    pub completed: bool,
}

/// One of our active bases, as seen this tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseSnapshot {
    pub id:            BaseId,
    /// When the base's resource depot became active.
    pub activate_tick: Tick,
    /// Geysers without a refinery on them.
    pub free_geysers:  usize,
    /// Mineral fields left at the base.
    pub minerals:      usize,
    pub buildings:     Vec<BuildingSnapshot>,
}

impl BaseSnapshot {
    pub fn new(id: BaseId, activate_tick: Tick) -> Self {
        Self { id, activate_tick, free_geysers: 0, minerals: 0, buildings: Vec::new() }
    }

    pub fn with_resources(mut self, minerals: usize, free_geysers: usize) -> Self {
        self.minerals = minerals;
        self.free_geysers = free_geysers;
        self
    }

    pub fn with_building(mut self, unit_type: UnitType, completed: bool) -> Self {
        self.buildings.push(BuildingSnapshot { unit_type, completed });
        self
    }
}

/// Signals from resource accounting.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceSignals {
    /// Gas income is below what the build order wants.
    pub requires_refineries: bool,
    /// Existing bases cannot absorb more workers.
    pub saturated:           bool,
}

/// Which reconciliation categories the build order currently enables.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BuildOrderFlags {
    pub refinery_manager:  bool,
    pub expansion_manager: bool,
}

impl Default for BuildOrderFlags {
    fn default() -> Self {
        Self { refinery_manager: true, expansion_manager: true }
    }
}

/// Technology-requirement checks.
pub trait TechTree {
    /// `true` when every building and upgrade `unit_type` needs is available.
    fn has_requirements(&self, unit_type: UnitType) -> bool;
}

/// A [`TechTree`] with everything researched.
pub struct AllTech;

impl TechTree for AllTech {
    fn has_requirements(&self, _unit_type: UnitType) -> bool {
        true
    }
}

/// Everything the reconciliation loop reads in one tick.
///
/// Built once per tick by the driver and shared immutably across the three
/// categories.
pub struct EconomyContext<'a> {
    pub tick:         Tick,
    pub race:         Race,
    pub enemy_races:  &'a [Race],
    /// Our active bases.
    pub bases:        &'a [BaseSnapshot],
    /// Supply capacity in engine units (doubled).
    pub supply_total: u32,
    pub signals:      ResourceSignals,
    pub orders:       BuildOrderFlags,
    pub tech:         &'a dyn TechTree,
}

impl EconomyContext<'_> {
    pub fn is_enemy_race(&self, race: Race) -> bool {
        self.enemy_races.contains(&race)
    }
}
