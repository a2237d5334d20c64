//! Squad goal and group lookup for the unit phase.

use std::collections::HashMap;

use rts_behavior::{Goal, UnitGroup};
use rts_core::UnitId;

/// Maps every unit to the goal and group of its squad.
///
/// Units without a squad see the idle goal and an empty group.
#[derive(Default)]
pub struct SquadAssignments {
    squads:     Vec<(Goal, UnitGroup)>,
    membership: HashMap<UnitId, usize>,
    unassigned: (Goal, UnitGroup),
}

impl SquadAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a squad; every member of `group` is assigned to it.
    pub fn add_squad(&mut self, goal: Goal, group: UnitGroup) {
        let index = self.squads.len();
        for (unit, _) in group.members() {
            self.membership.insert(unit, index);
        }
        self.squads.push((goal, group));
    }

    pub fn squad_count(&self) -> usize {
        self.squads.len()
    }

    pub fn assignment(&self, unit: UnitId) -> (&Goal, &UnitGroup) {
        let (goal, group) = self
            .membership
            .get(&unit)
            .map(|&i| &self.squads[i])
            .unwrap_or(&self.unassigned);
        (goal, group)
    }
}
