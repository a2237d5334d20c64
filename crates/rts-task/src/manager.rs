//! `TaskManager`: a reference [`TaskIssuer`] with a simple resource model.
//!
//! Builds are started strictly in request order as soon as the [`Bank`] can
//! pay for them and the [`Placement`] collaborator finds a site.  A started
//! build completes `UnitType::build_time()` ticks later.
//!
//! Cancellation is recorded by the handle immediately, but the manager only
//! settles it (site released, partial refund paid) on its next
//! [`update`][TaskManager::update], so a freshly cancelled task's resources
//! are never available within the tick that cancelled it.

use rts_core::{Position, TaskId, Tick, UnitType};
use tracing::{debug, info};

use crate::{
    AnywherePlacement, BuildLocation, Placement, Task, TaskError, TaskHandle, TaskIssuer,
    TaskKind, TaskResult, TaskState,
};

/// Share of the cost returned when an in-progress build is cancelled.
const CANCEL_REFUND_NUM: u32 = 3;
const CANCEL_REFUND_DEN: u32 = 4;

// ── Bank ──────────────────────────────────────────────────────────────────────

/// Spendable resources.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Bank {
    pub minerals: u32,
    pub gas:      u32,
}

impl Bank {
    pub fn new(minerals: u32, gas: u32) -> Self {
        Self { minerals, gas }
    }

    pub fn can_afford(&self, (minerals, gas): (u32, u32)) -> bool {
        self.minerals >= minerals && self.gas >= gas
    }

    pub fn deposit(&mut self, minerals: u32, gas: u32) {
        self.minerals += minerals;
        self.gas += gas;
    }

    fn spend(&mut self, (minerals, gas): (u32, u32)) {
        self.minerals -= minerals;
        self.gas -= gas;
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

/// A build that finished during an update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletedBuild {
    pub id:        TaskId,
    pub unit_type: UnitType,
    pub kind:      TaskKind,
    pub site:      Position,
}

/// What changed during one [`TaskManager::update`].
#[derive(Clone, Debug, Default)]
pub struct TaskEvents {
    pub started:   Vec<TaskId>,
    pub completed: Vec<CompletedBuild>,
    /// Cancelled tasks whose reservations were released.
    pub released:  Vec<TaskId>,
}

// ── TaskManager ───────────────────────────────────────────────────────────────

struct Entry {
    handle:     TaskHandle,
    started_at: Option<Tick>,
}

pub struct TaskManager<P: Placement = AnywherePlacement> {
    next_id:   u32,
    entries:   Vec<Entry>,
    bank:      Bank,
    placement: P,
}

impl TaskManager<AnywherePlacement> {
    pub fn new(bank: Bank) -> Self {
        Self::with_placement(bank, AnywherePlacement)
    }
}

impl<P: Placement> TaskManager<P> {
    pub fn with_placement(bank: Bank, placement: P) -> Self {
        Self { next_id: 0, entries: Vec::new(), bank, placement }
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut Bank {
        &mut self.bank
    }

    pub fn placement(&self) -> &P {
        &self.placement
    }

    /// Number of live (not yet settled) tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a live task by id.
    pub fn get(&self, id: TaskId) -> TaskResult<&TaskHandle> {
        self.entries
            .iter()
            .map(|e| &e.handle)
            .find(|h| h.id() == id)
            .ok_or(TaskError::UnknownTask(id))
    }

    /// Live tasks in request order.
    pub fn tasks(&self) -> impl Iterator<Item = &TaskHandle> + '_ {
        self.entries.iter().map(|e| &e.handle)
    }

    /// Settle cancellations, finish due builds, then start affordable ones.
    pub fn update(&mut self, now: Tick) -> TaskEvents {
        let mut events = TaskEvents::default();

        // ── Settle cancellations recorded since the last update ───────────
        for entry in &self.entries {
            if entry.handle.state() != TaskState::Cancelled {
                continue;
            }
            if let Some(site) = entry.handle.site() {
                let (minerals, gas) = entry.handle.unit_type().cost();
                self.bank.deposit(
                    minerals * CANCEL_REFUND_NUM / CANCEL_REFUND_DEN,
                    gas * CANCEL_REFUND_NUM / CANCEL_REFUND_DEN,
                );
                self.placement.release(site);
            }
            debug!(tick = now.0, task = %entry.handle.id(), "released cancelled task");
            events.released.push(entry.handle.id());
        }

        // ── Finish builds whose duration has elapsed ──────────────────────
        for entry in &self.entries {
            let Some(started_at) = entry.started_at else { continue };
            let handle = &entry.handle;
            if handle.in_progress()
                && now.since(started_at) >= handle.unit_type().build_time()
                && handle.finish().is_ok()
            {
                info!(
                    tick = now.0,
                    task = %handle.id(),
                    unit_type = %handle.unit_type(),
                    "build completed"
                );
                events.completed.push(CompletedBuild {
                    id:        handle.id(),
                    unit_type: handle.unit_type(),
                    kind:      handle.kind(),
                    site:      handle.site().unwrap_or_default(),
                });
            }
        }

        self.entries.retain(|e| !e.handle.has_ended());

        // ── Start queued builds in request order ──────────────────────────
        for entry in &mut self.entries {
            if entry.handle.state() != TaskState::Queued {
                continue;
            }
            let cost = entry.handle.unit_type().cost();
            if !self.bank.can_afford(cost) {
                break;
            }
            let (unit_type, location) = (entry.handle.unit_type(), entry.handle.location());
            let Some(site) = self.placement.reserve(unit_type, location) else {
                continue;
            };
            if entry.handle.begin(site).is_ok() {
                self.bank.spend(cost);
                entry.started_at = Some(now);
                debug!(tick = now.0, task = %entry.handle.id(), %site, "build started");
                events.started.push(entry.handle.id());
            }
        }

        events
    }
}

impl<P: Placement> TaskIssuer for TaskManager<P> {
    type Handle = TaskHandle;

    fn build(
        &mut self,
        unit_type: UnitType,
        kind:      TaskKind,
        location:  BuildLocation,
    ) -> TaskHandle {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let handle = TaskHandle::new(id, unit_type, kind, location);
        debug!(task = %id, %unit_type, ?kind, ?location, "build queued");
        self.entries.push(Entry { handle: handle.clone(), started_at: None });
        handle
    }
}
