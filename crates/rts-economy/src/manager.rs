//! `ExpansionManager`: refinery, defense, and expansion reconciliation.

use std::ops::AddAssign;

use rts_core::{AgentConfig, Race, UnitType};
use rts_task::{BuildLocation, Task, TaskIssuer, TaskKind};
use tracing::{debug, info, warn};

use crate::{Commitment, EconomyContext, TrackedTasks};

/// Work issued and cancelled by one reconciliation call.
///
/// Both counts are tasks, so a two-step commitment counts as two.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub issued:    usize,
    pub cancelled: usize,
}

impl AddAssign for Outcome {
    fn add_assign(&mut self, rhs: Outcome) {
        self.issued += rhs.issued;
        self.cancelled += rhs.cancelled;
    }
}

/// Per-category outcomes of one [`ExpansionManager::update`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub refineries: Outcome,
    pub defense:    Outcome,
    pub expansions: Outcome,
}

impl ReconcileReport {
    pub fn total(&self) -> Outcome {
        let mut total = self.refineries;
        total += self.defense;
        total += self.expansions;
        total
    }
}

/// Owns the tracked commitments of every category for the lifetime of a game.
pub struct ExpansionManager<T> {
    config:     AgentConfig,
    refineries: TrackedTasks<T>,
    defenses:   TrackedTasks<T>,
    expansions: TrackedTasks<T>,
    /// Outstanding power-structure request for unpowered bases.
    power:      Option<T>,
}

impl<T: Task> ExpansionManager<T> {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            refineries: TrackedTasks::new(),
            defenses:   TrackedTasks::new(),
            expansions: TrackedTasks::new(),
            power:      None,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn refinery_tasks(&self) -> &TrackedTasks<T> {
        &self.refineries
    }

    pub fn defense_tasks(&self) -> &TrackedTasks<T> {
        &self.defenses
    }

    pub fn expansion_tasks(&self) -> &TrackedTasks<T> {
        &self.expansions
    }

    pub fn power_task(&self) -> Option<&T> {
        self.power.as_ref()
    }

    /// Run the enabled categories in their fixed order.
    pub fn update<I>(&mut self, ctx: &EconomyContext<'_>, issuer: &mut I) -> ReconcileReport
    where
        I: TaskIssuer<Handle = T>,
    {
        let mut report = ReconcileReport::default();
        if ctx.orders.refinery_manager {
            report.refineries = self.update_refineries(ctx, issuer);
        }
        if ctx.orders.expansion_manager {
            report.defense = self.update_defense(ctx, issuer);
            report.expansions = self.update_expands(ctx, issuer);
        }
        report
    }

    // ── Refineries ────────────────────────────────────────────────────────

    /// One refinery per free geyser at every base old enough for a refinery
    /// started at activation to be finished by now.
    pub fn update_refineries<I>(&mut self, ctx: &EconomyContext<'_>, issuer: &mut I) -> Outcome
    where
        I: TaskIssuer<Handle = T>,
    {
        let mut outcome = Outcome::default();
        let Some(refinery) = ctx.race.refinery() else {
            return outcome;
        };

        let build_time = refinery.build_time();
        let mut needed: i64 = ctx
            .bases
            .iter()
            .filter(|base| base.activate_tick.offset(build_time) <= ctx.tick)
            .map(|base| base.free_geysers as i64)
            .sum();

        self.refineries.reap();
        needed -= self.refineries.pending() as i64;
        debug!(
            tick = ctx.tick.0,
            needed,
            tracked = self.refineries.len(),
            "refinery reconciliation"
        );

        if ctx.signals.requires_refineries
            && needed > 0
            && ctx.tick.on_interval(self.config.refinery_throttle_ticks)
        {
            let task = issuer.build(refinery, TaskKind::Refinery, BuildLocation::Base);
            info!(tick = ctx.tick.0, task = %task.id(), %refinery, "refinery requested");
            self.refineries.track(Commitment::single(refinery, task));
            outcome.issued += 1;
        } else if needed < 0 {
            let surplus = needed.unsigned_abs() as usize;
            outcome.cancelled = self.cancel(Category::Refinery, None, surplus);
        }
        outcome
    }

    // ── Defense ───────────────────────────────────────────────────────────

    /// Pick the defense structures for our race and provision each.
    pub fn update_defense<I>(&mut self, ctx: &EconomyContext<'_>, issuer: &mut I) -> Outcome
    where
        I: TaskIssuer<Handle = T>,
    {
        let per_base = if ctx.is_enemy_race(Race::Zerg) {
            self.config.defense_per_base_vs_zerg
        } else {
            self.config.defense_per_base
        };

        let mut outcome = Outcome::default();
        match ctx.race {
            Race::Protoss => {
                outcome += self.update_defense_for(ctx, issuer, UnitType::PhotonCannon, per_base);
            }
            Race::Terran => {
                outcome += self.update_defense_for(ctx, issuer, UnitType::MissileTurret, per_base);
            }
            Race::Zerg => {
                let sunken = self.config.zerg_sunken_per_base;
                let spore = self.config.zerg_spore_per_base;
                outcome += self.update_defense_for(ctx, issuer, UnitType::SunkenColony, sunken);
                outcome += self.update_defense_for(ctx, issuer, UnitType::SporeColony, spore);
            }
            Race::Unknown => {}
        }
        outcome
    }

    /// Provision `per_base` structures of `defense_type` at every mining base.
    pub fn update_defense_for<I>(
        &mut self,
        ctx:          &EconomyContext<'_>,
        issuer:       &mut I,
        defense_type: UnitType,
        per_base:     i32,
    ) -> Outcome
    where
        I: TaskIssuer<Handle = T>,
    {
        let mut outcome = Outcome::default();
        if !ctx.tech.has_requirements(defense_type) {
            return outcome;
        }
        if ctx.bases.len() < self.config.min_bases_for_defense {
            return outcome;
        }

        let intermediate = defense_type.intermediate();
        let power = ctx.race.power_provider();
        let per_base = per_base.max(0) as i64;
        let mut needed: i64 = 0;

        for base in ctx.bases {
            if base.minerals == 0 {
                continue;
            }

            let mut existing: i64 = 0;
            let mut powered = !defense_type.requires_psi();
            for building in &base.buildings {
                if building.unit_type == defense_type || Some(building.unit_type) == intermediate {
                    existing += 1;
                }
                if Some(building.unit_type) == power && building.completed {
                    powered = true;
                }
            }

            if powered {
                needed += per_base - existing.min(per_base);
            } else if ctx.supply_total >= self.config.psi_supply_threshold
                && self.power.as_ref().is_none_or(|t| t.has_ended())
            {
                if let Some(provider) = power {
                    let task = issuer.build(provider, TaskKind::Defense, BuildLocation::Base);
                    info!(
                        tick = ctx.tick.0,
                        base = %base.id,
                        task = %task.id(),
                        "power structure requested"
                    );
                    self.power = Some(task);
                    outcome.issued += 1;
                }
            }
        }

        self.defenses.reap();
        needed -= self.defenses.pending_of(defense_type) as i64;
        debug!(tick = ctx.tick.0, %defense_type, needed, "defense reconciliation");

        if needed > 0 {
            for _ in 0..needed {
                let commitment = match intermediate {
                    Some(step_type) => {
                        let step =
                            issuer.build(step_type, TaskKind::Defense, BuildLocation::Base);
                        let last =
                            issuer.build(defense_type, TaskKind::Defense, BuildLocation::Base);
                        outcome.issued += 2;
                        Commitment::with_steps(defense_type, last, vec![step])
                    }
                    None => {
                        let task =
                            issuer.build(defense_type, TaskKind::Defense, BuildLocation::Base);
                        outcome.issued += 1;
                        Commitment::single(defense_type, task)
                    }
                };
                info!(tick = ctx.tick.0, %defense_type, "built defense");
                self.defenses.track(commitment);
            }
        } else if needed < 0 {
            outcome.cancelled +=
                self.cancel(Category::Defense, Some(defense_type), needed.unsigned_abs() as usize);
        }
        outcome
    }

    // ── Expansions ────────────────────────────────────────────────────────

    /// Found one new base while the economy is saturated and no earlier
    /// expansion is still waiting to start.  Expansions are never cancelled.
    pub fn update_expands<I>(&mut self, ctx: &EconomyContext<'_>, issuer: &mut I) -> Outcome
    where
        I: TaskIssuer<Handle = T>,
    {
        let mut outcome = Outcome::default();
        self.expansions.reap();
        let unstarted = self.expansions.pending() > 0;

        if ctx.signals.saturated && !unstarted {
            if let Some(center) = ctx.race.center() {
                let task = issuer.build(center, TaskKind::Expansion, BuildLocation::Expansion);
                info!(tick = ctx.tick.0, task = %task.id(), "expanding: economy saturated");
                self.expansions.track(Commitment::single(center, task));
                outcome.issued += 1;
            }
        }
        outcome
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Cancel up to `n` commitments, newest first; returns the tasks cancelled.
    fn cancel(&mut self, category: Category, unit_type: Option<UnitType>, n: usize) -> usize {
        let tracked = match category {
            Category::Refinery => &mut self.refineries,
            Category::Defense  => &mut self.defenses,
        };
        let live_before = tracked.live_tasks();
        let commitments = match unit_type {
            Some(t) => tracked.cancel_newest_of(t, n),
            None    => tracked.cancel_newest(n),
        };
        let tasks = live_before - tracked.live_tasks();
        if commitments < n {
            warn!(?category, requested = n, commitments, "over-provisioned beyond tracked work");
        }
        info!(?category, commitments, tasks, "cancelled surplus work");
        tasks
    }
}

#[derive(Copy, Clone, Debug)]
enum Category {
    Refinery,
    Defense,
}
