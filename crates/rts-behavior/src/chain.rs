//! `ActionChain`: ordered behaviors for one unit.

use std::collections::VecDeque;

use rts_core::{UnitId, UnitType};
use tracing::debug;

use crate::{ActionFactory, Goal, TacticalAction, UnitGroup, default_actions};

/// Prioritized list of [`TacticalAction`]s bound to one unit.
///
/// The front of the list has the highest priority.  The chain owns its
/// actions; dropping it detaches the unit from every action first.
pub struct ActionChain {
    unit:    Option<UnitId>,
    actions: VecDeque<Box<dyn TacticalAction>>,
}

impl ActionChain {
    /// Build the default chain for a unit of `unit_type`.
    pub fn for_unit(unit: UnitId, unit_type: UnitType, factory: &dyn ActionFactory) -> Self {
        let (kinds, targets) = default_actions(unit_type);
        let actions = kinds
            .into_iter()
            .map(|kind| factory.create(unit, kind, &targets))
            .collect();
        debug!(%unit, %unit_type, "built default action chain");
        Self { unit: Some(unit), actions }
    }

    /// Build a chain from an explicit action list, highest priority first.
    pub fn with_actions(unit: UnitId, actions: Vec<Box<dyn TacticalAction>>) -> Self {
        Self { unit: Some(unit), actions: actions.into() }
    }

    /// The bound unit, or `None` after [`on_detach`][Self::on_detach].
    pub fn unit(&self) -> Option<UnitId> {
        self.unit
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Insert `action` with the highest priority.
    pub fn add_action(&mut self, action: Box<dyn TacticalAction>) {
        self.actions.push_front(action);
    }

    /// Offer the tick to each action in priority order, stopping at the first
    /// that handles it, then drop every ended action.
    ///
    /// Returns the index (before reaping) of the handling action, if any.
    pub fn update(&mut self, goal: &Goal, group: &UnitGroup) -> Option<usize> {
        let handled = self
            .actions
            .iter_mut()
            .position(|action| action.update(goal, group));

        let before = self.actions.len();
        self.actions.retain(|action| !action.has_ended());
        let reaped = before - self.actions.len();
        if reaped > 0 {
            debug!(unit = ?self.unit, reaped, "reaped ended actions");
        }

        handled
    }

    /// Detach the unit from every action and empty the chain.
    ///
    /// Must run before the unit's id is recycled by the host.
    pub fn on_detach(&mut self) {
        if let Some(unit) = self.unit.take() {
            for action in self.actions.iter_mut() {
                action.remove_unit(unit);
            }
        }
        self.actions.clear();
    }
}

impl Drop for ActionChain {
    fn drop(&mut self) {
        self.on_detach();
    }
}
