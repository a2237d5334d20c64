//! Scripted stand-in for the game engine: bases, income, units and the
//! build queue the agent issues into.

use std::collections::HashMap;

use rand::Rng;
use rand::rngs::SmallRng;
use rts_core::{BaseId, Position, Race, TaskId, Tick, UnitId, UnitType};
use rts_economy::{BaseSnapshot, BuildingSnapshot, ResourceSignals};
use rts_sim::SiteIndex;
use rts_task::{Bank, TaskEvents, TaskKind, TaskManager};
use tracing::info;

// ── Constants ─────────────────────────────────────────────────────────────────

const HOME:                 Position = Position { x: 64, y: 64 };
const MINERAL_FIELDS:       usize    = 8;
const GEYSERS_PER_BASE:     usize    = 1;
const WORKERS_PER_BASE:     usize    = 12;
const GAS_PER_REFINERY:     u32      = 1;
const DEPLETION_CHANCE:     f64      = 0.0005; // per base per tick
const GAS_WANTED:           u32      = 300;

pub struct World {
    pub race:      Race,
    pub bases:     Vec<BaseSnapshot>,
    pub tasks:     TaskManager<SiteIndex>,
    refineries:    usize,
    /// Base and type of every build that started and has not finished.
    placed:        HashMap<TaskId, (usize, UnitType)>,
    next_unit:     u32,
    pub workers:   Vec<UnitId>,
    pub army:      Vec<UnitId>,
}

impl World {
    pub fn new(race: Race, expansion_sites: impl IntoIterator<Item = Position>) -> Self {
        let main = BaseSnapshot::new(BaseId(0), Tick::ZERO)
            .with_resources(MINERAL_FIELDS, GEYSERS_PER_BASE);
        let main = match race.center() {
            Some(center) => main.with_building(center, true),
            None => main,
        };
        Self {
            race,
            bases: vec![main],
            tasks: TaskManager::with_placement(
                Bank::new(50, 0),
                SiteIndex::new(HOME, expansion_sites),
            ),
            refineries: 0,
            placed: HashMap::new(),
            next_unit: 0,
            workers: Vec::new(),
            army: Vec::new(),
        }
    }

    pub fn home(&self) -> Position {
        HOME
    }

    /// Advance the build queue and reflect its events in the base snapshots.
    pub fn advance(&mut self, tick: Tick) -> TaskEvents {
        let events = self.tasks.update(tick);

        // Cancellations are settled first, so undo what they placed.
        for id in &events.released {
            let Some((i, unit_type)) = self.placed.remove(id) else { continue };
            let base = &mut self.bases[i];
            if Some(unit_type) == self.race.refinery() {
                base.free_geysers += 1;
            } else if let Some(at) =
                base.buildings.iter().position(|b| b.unit_type == unit_type && !b.completed)
            {
                base.buildings.remove(at);
            }
        }

        for id in &events.started {
            let Ok(task) = self.tasks.get(*id) else { continue };
            let (unit_type, kind) = (task.unit_type(), task.kind());
            match kind {
                TaskKind::Refinery => {
                    if let Some(i) = self.bases.iter().position(|b| b.free_geysers > 0) {
                        self.bases[i].free_geysers -= 1;
                        self.placed.insert(*id, (i, unit_type));
                    }
                }
                TaskKind::Defense => {
                    let morphed =
                        unit_type.intermediate().and_then(|from| self.morph(from, unit_type));
                    let i = match morphed {
                        Some(i) => i,
                        None => {
                            let i = self.least_built(unit_type);
                            let building = BuildingSnapshot { unit_type, completed: false };
                            self.bases[i].buildings.push(building);
                            i
                        }
                    };
                    self.placed.insert(*id, (i, unit_type));
                }
                TaskKind::Expansion => {}
            }
        }

        for build in &events.completed {
            match build.kind {
                TaskKind::Expansion => {
                    let id = BaseId(self.bases.len() as u32);
                    info!(tick = tick.0, base = %id, site = %build.site, "expansion finished");
                    self.bases.push(
                        BaseSnapshot::new(id, tick)
                            .with_resources(MINERAL_FIELDS, GEYSERS_PER_BASE)
                            .with_building(build.unit_type, true),
                    );
                }
                TaskKind::Refinery => self.refineries += 1,
                TaskKind::Defense => {
                    let Some(&(i, _)) = self.placed.get(&build.id) else { continue };
                    if let Some(b) = self.bases[i]
                        .buildings
                        .iter_mut()
                        .find(|b| b.unit_type == build.unit_type && !b.completed)
                    {
                        b.completed = true;
                    }
                }
            }
            self.placed.remove(&build.id);
        }
        events
    }

    /// Mine for one tick and let mineral fields run dry now and then.
    pub fn mine(&mut self, rng: &mut SmallRng) {
        let mining = self.bases.iter().filter(|b| b.minerals > 0).count();
        let workers = self.workers.len().min(mining * WORKERS_PER_BASE) as u32;
        let minerals = workers / 4 + rng.gen_range(0..=1);
        let gas = self.refineries as u32 * GAS_PER_REFINERY;
        self.tasks.bank_mut().deposit(minerals, gas);

        for base in &mut self.bases {
            if base.minerals > 0 && rng.gen_bool(DEPLETION_CHANCE) {
                base.minerals -= 1;
            }
        }
    }

    pub fn signals(&self) -> ResourceSignals {
        let mining = self.bases.iter().filter(|b| b.minerals > 0).count();
        ResourceSignals {
            requires_refineries: self.tasks.bank().gas < GAS_WANTED,
            saturated:           self.workers.len() >= mining * WORKERS_PER_BASE,
        }
    }

    /// Supply capacity in engine units.
    pub fn supply_total(&self) -> u32 {
        ((self.workers.len() + self.army.len()) as u32 * 4).min(400)
    }

    pub fn spawn(&mut self, worker: bool) -> (UnitId, UnitType) {
        let id = UnitId(self.next_unit);
        self.next_unit += 1;
        let (unit_type, list) = if worker {
            (worker_type(self.race), &mut self.workers)
        } else {
            (army_type(self.race), &mut self.army)
        };
        list.push(id);
        (id, unit_type)
    }

    pub fn kill_random(&mut self, rng: &mut SmallRng) -> Option<UnitId> {
        if self.army.is_empty() {
            return None;
        }
        let i = rng.gen_range(0..self.army.len());
        Some(self.army.swap_remove(i))
    }

    /// Turn one standing `from` structure into an unfinished `into`.
    ///
    /// Returns the base it stands at, or `None` when there is nothing to morph.
    fn morph(&mut self, from: UnitType, into: UnitType) -> Option<usize> {
        self.bases.iter_mut().enumerate().find_map(|(i, base)| {
            let building = base.buildings.iter_mut().find(|b| b.unit_type == from)?;
            building.unit_type = into;
            building.completed = false;
            Some(i)
        })
    }

    /// Index of the base with the fewest structures of `unit_type`.
    fn least_built(&self, unit_type: UnitType) -> usize {
        self.bases
            .iter()
            .enumerate()
            .min_by_key(|(_, b)| b.buildings.iter().filter(|s| s.unit_type == unit_type).count())
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

fn worker_type(race: Race) -> UnitType {
    match race {
        Race::Terran => UnitType::Scv,
        Race::Zerg => UnitType::Drone,
        _ => UnitType::Probe,
    }
}

fn army_type(race: Race) -> UnitType {
    match race {
        Race::Terran => UnitType::Marine,
        Race::Zerg => UnitType::Zergling,
        _ => UnitType::Zealot,
    }
}
