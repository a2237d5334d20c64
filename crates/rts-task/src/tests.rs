//! Unit tests for rts-task.

use rts_core::{Position, Tick, UnitType};

use crate::{
    Bank, BuildLocation, Placement, Task, TaskHandle, TaskIssuer, TaskKind, TaskManager,
    TaskState,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn rich() -> Bank {
    Bank::new(10_000, 10_000)
}

/// Placement that has a fixed number of sites and records releases.
struct CountedSites {
    free:     u32,
    released: Vec<Position>,
}

impl Placement for CountedSites {
    fn reserve(&mut self, _unit_type: UnitType, _location: BuildLocation) -> Option<Position> {
        if self.free == 0 {
            return None;
        }
        self.free -= 1;
        Some(Position::new(self.free as i32, 0))
    }

    fn release(&mut self, site: Position) {
        self.free += 1;
        self.released.push(site);
    }
}

// ── TaskHandle ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod handle_tests {
    use rts_core::TaskId;

    use super::*;

    fn handle() -> TaskHandle {
        TaskHandle::new(TaskId(1), UnitType::Pylon, TaskKind::Defense, BuildLocation::Base)
    }

    #[test]
    fn starts_queued() {
        let h = handle();
        assert_eq!(h.state(), TaskState::Queued);
        assert!(!h.in_progress());
        assert!(!h.has_ended());
    }

    #[test]
    fn clones_share_state() {
        let h = handle();
        let other = h.clone();
        h.begin(Position::new(3, 4)).unwrap();
        assert!(other.in_progress());
        assert_eq!(other.site(), Some(Position::new(3, 4)));
        other.finish().unwrap();
        assert!(h.has_ended());
        assert!(!h.in_progress());
    }

    #[test]
    fn cancel_is_terminal_and_idempotent() {
        let h = handle();
        h.cancel();
        h.cancel();
        assert_eq!(h.state(), TaskState::Cancelled);
        assert!(h.has_ended());
    }

    #[test]
    fn cancel_after_completion_keeps_completed() {
        let h = handle();
        h.begin(Position::ORIGIN).unwrap();
        h.finish().unwrap();
        h.cancel();
        assert_eq!(h.state(), TaskState::Completed);
    }

    #[test]
    fn finish_requires_start() {
        let h = handle();
        assert!(h.finish().is_err());
        assert_eq!(h.state(), TaskState::Queued);
    }
}

// ── TaskManager ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod manager_tests {
    use super::*;

    #[test]
    fn build_returns_queued_handle() {
        let mut tm = TaskManager::new(rich());
        let h = tm.build(UnitType::Assimilator, TaskKind::Refinery, BuildLocation::Base);
        assert_eq!(h.state(), TaskState::Queued);
        assert_eq!(tm.len(), 1);
        assert_eq!(tm.get(h.id()).unwrap().unit_type(), UnitType::Assimilator);
    }

    #[test]
    fn starts_then_completes_after_build_time() {
        let mut tm = TaskManager::new(rich());
        let h = tm.build(UnitType::Pylon, TaskKind::Defense, BuildLocation::Base);

        let events = tm.update(Tick(10));
        assert_eq!(events.started, vec![h.id()]);
        assert!(h.in_progress());
        assert_eq!(tm.bank().minerals, 10_000 - 100);

        let events = tm.update(Tick(10 + UnitType::Pylon.build_time() - 1));
        assert!(events.completed.is_empty());

        let events = tm.update(Tick(10 + UnitType::Pylon.build_time()));
        assert_eq!(events.completed.len(), 1);
        assert_eq!(events.completed[0].unit_type, UnitType::Pylon);
        assert!(h.has_ended());
        assert!(tm.is_empty());
    }

    #[test]
    fn unaffordable_head_blocks_queue() {
        let mut tm = TaskManager::new(Bank::new(120, 0));
        let nexus = tm.build(UnitType::Nexus, TaskKind::Expansion, BuildLocation::Expansion);
        let pylon = tm.build(UnitType::Pylon, TaskKind::Defense, BuildLocation::Base);
        let events = tm.update(Tick(0));
        assert!(events.started.is_empty());
        assert!(!nexus.in_progress());
        assert!(!pylon.in_progress());
    }

    #[test]
    fn cancelled_queued_task_released_next_update() {
        let mut tm = TaskManager::new(Bank::new(0, 0));
        let h = tm.build(UnitType::PhotonCannon, TaskKind::Defense, BuildLocation::Base);
        tm.update(Tick(0));
        h.cancel();
        // Still tracked until the manager settles it.
        assert_eq!(tm.len(), 1);
        let events = tm.update(Tick(1));
        assert_eq!(events.released, vec![h.id()]);
        assert!(tm.is_empty());
        assert_eq!(*tm.bank(), Bank::new(0, 0));
    }

    #[test]
    fn cancelled_in_progress_refunds_and_frees_site() {
        let placement = CountedSites { free: 1, released: vec![] };
        let mut tm = TaskManager::with_placement(Bank::new(400, 0), placement);
        let h = tm.build(UnitType::Nexus, TaskKind::Expansion, BuildLocation::Expansion);
        tm.update(Tick(0));
        assert!(h.in_progress());
        assert_eq!(tm.bank().minerals, 0);

        h.cancel();
        // Nothing is paid back within the cancelling tick.
        assert_eq!(tm.bank().minerals, 0);

        tm.update(Tick(1));
        assert_eq!(tm.bank().minerals, 300);
        assert_eq!(tm.placement().free, 1);
        assert_eq!(tm.placement().released.len(), 1);
    }

    #[test]
    fn no_site_keeps_task_queued_but_later_tasks_start() {
        let placement = CountedSites { free: 1, released: vec![] };
        let mut tm = TaskManager::with_placement(rich(), placement);
        let first = tm.build(UnitType::Pylon, TaskKind::Defense, BuildLocation::Base);
        let second = tm.build(UnitType::Pylon, TaskKind::Defense, BuildLocation::Base);
        tm.update(Tick(0));
        assert!(first.in_progress());
        assert_eq!(second.state(), TaskState::Queued);
    }

    #[test]
    fn ids_are_unique() {
        let mut tm = TaskManager::new(rich());
        let a = tm.build(UnitType::Pylon, TaskKind::Defense, BuildLocation::Base);
        let b = tm.build(UnitType::Pylon, TaskKind::Defense, BuildLocation::Base);
        assert_ne!(a.id(), b.id());
    }
}
