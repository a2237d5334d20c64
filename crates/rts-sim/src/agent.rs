//! The `Agent` struct and its per-tick pass.

use rts_behavior::{ActionChain, ActionFactory, TacticalAction};
use rts_core::{AgentConfig, Tick, UnitId, UnitType};
use rts_economy::{EconomyContext, ExpansionManager, ReconcileReport};
use rts_task::{Task, TaskIssuer};
use tracing::{debug, trace};

use crate::{AgentError, AgentObserver, AgentResult, SquadAssignments};

#[cfg(feature = "fx-hash")]
type ChainMap = rustc_hash::FxHashMap<UnitId, ActionChain>;
#[cfg(not(feature = "fx-hash"))]
type ChainMap = std::collections::HashMap<UnitId, ActionChain>;

/// Everything the agent reads in one tick.
pub struct TickInput<'a> {
    pub economy: EconomyContext<'a>,
    pub squads:  &'a SquadAssignments,
}

/// What happened during one [`Agent::on_tick`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:    Tick,
    /// Units whose chain was updated.
    pub units:   usize,
    /// Units where some action took control.
    pub handled: usize,
    pub economy: ReconcileReport,
}

/// Decision core of one player.
///
/// Owns one [`ActionChain`] per controlled unit and the economy
/// [`ExpansionManager`].  Create via [`AgentBuilder`][crate::AgentBuilder].
pub struct Agent<T> {
    pub(crate) config:  AgentConfig,
    pub(crate) chains:  ChainMap,
    pub(crate) economy: ExpansionManager<T>,
}

impl<T: Task> Agent<T> {
    pub(crate) fn new(config: AgentConfig) -> Self {
        Self {
            economy: ExpansionManager::new(config.clone()),
            config,
            chains:  ChainMap::default(),
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn economy(&self) -> &ExpansionManager<T> {
        &self.economy
    }

    pub fn unit_count(&self) -> usize {
        self.chains.len()
    }

    pub fn chain(&self, unit: UnitId) -> Option<&ActionChain> {
        self.chains.get(&unit)
    }

    // ── Unit lifecycle ────────────────────────────────────────────────────

    /// Build the default chain for a newly controlled unit.
    pub fn on_unit_created(
        &mut self,
        unit:      UnitId,
        unit_type: UnitType,
        factory:   &dyn ActionFactory,
    ) -> AgentResult<()> {
        if self.chains.contains_key(&unit) {
            return Err(AgentError::DuplicateUnit(unit));
        }
        self.chains.insert(unit, ActionChain::for_unit(unit, unit_type, factory));
        Ok(())
    }

    /// Control a unit with an explicit chain.
    pub fn attach_chain(&mut self, unit: UnitId, chain: ActionChain) -> AgentResult<()> {
        if self.chains.contains_key(&unit) {
            return Err(AgentError::DuplicateUnit(unit));
        }
        self.chains.insert(unit, chain);
        Ok(())
    }

    /// Detach and drop the unit's chain.  Call before the host recycles the id.
    pub fn on_unit_destroyed(&mut self, unit: UnitId) -> AgentResult<()> {
        let mut chain = self.chains.remove(&unit).ok_or(AgentError::UnknownUnit(unit))?;
        chain.on_detach();
        debug!(%unit, "unit chain detached");
        Ok(())
    }

    /// Push a transient override on top of the unit's chain.
    pub fn add_action(&mut self, unit: UnitId, action: Box<dyn TacticalAction>) -> AgentResult<()> {
        let chain = self.chains.get_mut(&unit).ok_or(AgentError::UnknownUnit(unit))?;
        chain.add_action(action);
        Ok(())
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Run one decision pass: unit chains first, then the economy.
    pub fn on_tick<I, O>(
        &mut self,
        input:    &TickInput<'_>,
        issuer:   &mut I,
        observer: &mut O,
    ) -> TickSummary
    where
        I: TaskIssuer<Handle = T>,
        O: AgentObserver,
    {
        let tick = input.economy.tick;
        observer.on_tick_start(tick);

        let handled = self.update_units(input.squads);
        trace!(tick = tick.0, units = self.chains.len(), handled, "unit phase done");

        let economy = self.economy.update(&input.economy, issuer);
        observer.on_reconcile(tick, &economy);

        let summary = TickSummary { tick, units: self.chains.len(), handled, economy };
        observer.on_tick_end(tick, &summary);
        summary
    }

    /// Update every chain; returns how many had an action take control.
    fn update_units(&mut self, squads: &SquadAssignments) -> usize {
        #[cfg(not(feature = "parallel"))]
        {
            self.chains
                .iter_mut()
                .map(|(&unit, chain)| {
                    let (goal, group) = squads.assignment(unit);
                    chain.update(goal, group).is_some() as usize
                })
                .sum()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.chains
                .par_iter_mut()
                .map(|(&unit, chain)| {
                    let (goal, group) = squads.assignment(unit);
                    chain.update(goal, group).is_some() as usize
                })
                .sum()
        }
    }
}
