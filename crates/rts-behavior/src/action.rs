//! The `TacticalAction` trait and the small building blocks actions share.

use rts_core::UnitId;
use tracing::debug;

use crate::{Goal, UnitGroup};

/// One behavior strategy bound to a single unit.
///
/// Implementations must never panic out of [`update`][Self::update]; an
/// action that cannot act this tick returns `false`.
pub trait TacticalAction: Send {
    /// Offer the tick to this action.  Returns `true` iff it took control of
    /// the unit.
    fn update(&mut self, goal: &Goal, group: &UnitGroup) -> bool;

    /// Once `true`, stays `true`.
    fn has_ended(&self) -> bool;

    /// Drop the reference to `unit`.  Called by the owning chain before the
    /// unit goes away.
    fn remove_unit(&mut self, unit: UnitId);
}

// ── BoundUnit ─────────────────────────────────────────────────────────────────

/// Non-owning reference from an action to the unit it controls.
///
/// Holds only the id; the unit's storage belongs to the game state.  Once
/// detached it stays detached.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoundUnit(Option<UnitId>);

impl BoundUnit {
    pub fn new(unit: UnitId) -> Self {
        BoundUnit(Some(unit))
    }

    pub fn get(&self) -> Option<UnitId> {
        self.0
    }

    /// Detach if currently bound to `unit`.
    pub fn detach(&mut self, unit: UnitId) {
        if self.0 == Some(unit) {
            self.0 = None;
        }
    }
}

// ── Completion ────────────────────────────────────────────────────────────────

/// Monotonic completion latch backing `has_ended()`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Completion(bool);

impl Completion {
    pub fn finish(&mut self) {
        self.0 = true;
    }

    pub fn is_finished(&self) -> bool {
        self.0
    }
}

// ── Built-in actions ──────────────────────────────────────────────────────────

/// An action that never takes control and never ends.
///
/// Stand-in for behaviors that have no implementation in the host.
pub struct PassiveAction {
    unit: BoundUnit,
}

impl PassiveAction {
    pub fn new(unit: UnitId) -> Self {
        Self { unit: BoundUnit::new(unit) }
    }

    pub fn unit(&self) -> Option<UnitId> {
        self.unit.get()
    }
}

impl TacticalAction for PassiveAction {
    fn update(&mut self, _goal: &Goal, _group: &UnitGroup) -> bool {
        false
    }

    fn has_ended(&self) -> bool {
        false
    }

    fn remove_unit(&mut self, unit: UnitId) {
        self.unit.detach(unit);
    }
}

/// Transient override that owns the unit for a fixed number of ticks.
///
/// Meant to be pushed on the front of a chain with
/// [`ActionChain::add_action`][crate::ActionChain::add_action] so it preempts
/// the default behaviors until it runs out.
pub struct ForcedRetreat {
    unit:      BoundUnit,
    remaining: u32,
    done:      Completion,
}

impl ForcedRetreat {
    pub fn new(unit: UnitId, ticks: u32) -> Self {
        let mut done = Completion::default();
        if ticks == 0 {
            done.finish();
        }
        Self { unit: BoundUnit::new(unit), remaining: ticks, done }
    }
}

impl TacticalAction for ForcedRetreat {
    fn update(&mut self, _goal: &Goal, _group: &UnitGroup) -> bool {
        let Some(unit) = self.unit.get() else {
            self.done.finish();
            return false;
        };
        if self.done.is_finished() {
            return false;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            debug!(%unit, "forced retreat finished");
            self.done.finish();
        }
        true
    }

    fn has_ended(&self) -> bool {
        self.done.is_finished()
    }

    fn remove_unit(&mut self, unit: UnitId) {
        self.unit.detach(unit);
    }
}
