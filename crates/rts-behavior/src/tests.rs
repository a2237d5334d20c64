//! Unit tests for rts-behavior.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rts_core::{Position, UnitId, UnitType};

use crate::{
    ActionChain, ActionFactory, ActionKind, BoundUnit, Completion, Goal, GoalKind,
    NoopActionFactory, TacticalAction, TargetPriorities, UnitGroup,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const UNIT: UnitId = UnitId(7);

/// Stub action that counts `update` calls and answers from a script.
struct Probe {
    unit:       BoundUnit,
    calls:      Arc<AtomicUsize>,
    handles:    bool,
    ends_after: Option<usize>,
    done:       Completion,
    detached:   Arc<AtomicUsize>,
}

impl Probe {
    fn new(handles: bool) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let probe = Probe {
            unit:       BoundUnit::new(UNIT),
            calls:      calls.clone(),
            handles,
            ends_after: None,
            done:       Completion::default(),
            detached:   Arc::new(AtomicUsize::new(0)),
        };
        (probe, calls)
    }

    fn ending_after(mut self, n: usize) -> Self {
        self.ends_after = Some(n);
        self
    }

    fn counting_detach(mut self, counter: &Arc<AtomicUsize>) -> Self {
        self.detached = counter.clone();
        self
    }
}

impl TacticalAction for Probe {
    fn update(&mut self, _goal: &Goal, _group: &UnitGroup) -> bool {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.ends_after.is_some_and(|limit| n >= limit) {
            self.done.finish();
        }
        self.handles
    }

    fn has_ended(&self) -> bool {
        self.done.is_finished()
    }

    fn remove_unit(&mut self, unit: UnitId) {
        self.unit.detach(unit);
        if self.unit.get().is_none() {
            self.detached.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn tick(chain: &mut ActionChain) -> Option<usize> {
    chain.update(&Goal::idle(), &UnitGroup::default())
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch_tests {
    use super::*;

    #[test]
    fn first_handler_stops_iteration() {
        let mut counters = Vec::new();
        let mut actions: Vec<Box<dyn TacticalAction>> = Vec::new();
        for i in 0..5 {
            let (probe, calls) = Probe::new(i == 2);
            counters.push(calls);
            actions.push(Box::new(probe));
        }
        let mut chain = ActionChain::with_actions(UNIT, actions);

        assert_eq!(tick(&mut chain), Some(2));
        let calls: Vec<usize> = counters.iter().map(|c| c.load(Ordering::SeqCst)).collect();
        assert_eq!(calls, vec![1, 1, 1, 0, 0]);
    }

    #[test]
    fn no_handler_offers_tick_to_everyone() {
        let (a, ca) = Probe::new(false);
        let (b, cb) = Probe::new(false);
        let mut chain = ActionChain::with_actions(UNIT, vec![Box::new(a), Box::new(b)]);
        assert_eq!(tick(&mut chain), None);
        assert_eq!(ca.load(Ordering::SeqCst), 1);
        assert_eq!(cb.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn added_action_preempts_defaults() {
        let (default, default_calls) = Probe::new(true);
        let mut chain = ActionChain::with_actions(UNIT, vec![Box::new(default)]);
        let (override_action, override_calls) = Probe::new(true);
        chain.add_action(Box::new(override_action));

        assert_eq!(tick(&mut chain), Some(0));
        assert_eq!(override_calls.load(Ordering::SeqCst), 1);
        assert_eq!(default_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn context_is_passed_through() {
        struct Recorder(Arc<Mutex<Vec<(GoalKind, usize)>>>);
        impl TacticalAction for Recorder {
            fn update(&mut self, goal: &Goal, group: &UnitGroup) -> bool {
                self.0.lock().unwrap().push((goal.kind, group.len()));
                false
            }
            fn has_ended(&self) -> bool { false }
            fn remove_unit(&mut self, _unit: UnitId) {}
        }

        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut chain = ActionChain::with_actions(UNIT, vec![Box::new(Recorder(seen.clone()))]);
        let goal = Goal::new(GoalKind::Attack, Position::new(10, 10));
        let group = UnitGroup::new(vec![(UNIT, Position::ORIGIN), (UnitId(8), Position::ORIGIN)]);
        chain.update(&goal, &group);
        assert_eq!(*seen.lock().unwrap(), vec![(GoalKind::Attack, 2)]);
    }
}

// ── Reaping ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod reap_tests {
    use super::*;

    #[test]
    fn action_reaped_in_the_tick_it_acted_and_ended() {
        let (once, _) = Probe::new(true);
        let (fallback, fallback_calls) = Probe::new(true);
        let mut chain = ActionChain::with_actions(
            UNIT,
            vec![Box::new(once.ending_after(1)), Box::new(fallback)],
        );

        assert_eq!(tick(&mut chain), Some(0));
        assert_eq!(chain.len(), 1);
        assert_eq!(tick(&mut chain), Some(0));
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn ended_action_reaped_even_if_not_dispatched() {
        struct AlreadyEnded;
        impl TacticalAction for AlreadyEnded {
            fn update(&mut self, _: &Goal, _: &UnitGroup) -> bool { false }
            fn has_ended(&self) -> bool { true }
            fn remove_unit(&mut self, _unit: UnitId) {}
        }

        let (head, _) = Probe::new(true);
        let mut chain =
            ActionChain::with_actions(UNIT, vec![Box::new(head), Box::new(AlreadyEnded)]);
        tick(&mut chain);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn repeated_updates_are_idempotent() {
        let (a, _) = Probe::new(false);
        let (b, _) = Probe::new(false);
        let (c, _) = Probe::new(false);
        let mut chain = ActionChain::with_actions(
            UNIT,
            vec![Box::new(a), Box::new(b.ending_after(1)), Box::new(c)],
        );
        tick(&mut chain);
        assert_eq!(chain.len(), 2);
        for _ in 0..10 {
            tick(&mut chain);
            assert_eq!(chain.len(), 2);
        }
    }

    #[test]
    fn forced_retreat_runs_for_its_duration_then_yields() {
        let (default, default_calls) = Probe::new(true);
        let mut chain = ActionChain::with_actions(UNIT, vec![Box::new(default)]);
        chain.add_action(Box::new(crate::ForcedRetreat::new(UNIT, 3)));

        for _ in 0..3 {
            assert_eq!(tick(&mut chain), Some(0));
        }
        assert_eq!(chain.len(), 1);
        assert_eq!(default_calls.load(Ordering::SeqCst), 0);
        tick(&mut chain);
        assert_eq!(default_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn completion_is_monotonic() {
        let mut done = Completion::default();
        assert!(!done.is_finished());
        done.finish();
        done.finish();
        assert!(done.is_finished());
    }
}

// ── Detach ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod detach_tests {
    use super::*;

    #[test]
    fn on_detach_releases_every_action() {
        let detached = Arc::new(AtomicUsize::new(0));
        let (a, _) = Probe::new(false);
        let (b, _) = Probe::new(false);
        let mut chain = ActionChain::with_actions(
            UNIT,
            vec![
                Box::new(a.counting_detach(&detached)),
                Box::new(b.counting_detach(&detached)),
            ],
        );
        chain.on_detach();
        assert_eq!(detached.load(Ordering::SeqCst), 2);
        assert!(chain.is_empty());
        assert_eq!(chain.unit(), None);
    }

    #[test]
    fn drop_detaches_once() {
        let detached = Arc::new(AtomicUsize::new(0));
        let (a, _) = Probe::new(false);
        {
            let mut chain =
                ActionChain::with_actions(UNIT, vec![Box::new(a.counting_detach(&detached))]);
            chain.on_detach();
        }
        assert_eq!(detached.load(Ordering::SeqCst), 1);

        let (b, _) = Probe::new(false);
        drop(ActionChain::with_actions(UNIT, vec![Box::new(b.counting_detach(&detached))]));
        assert_eq!(detached.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn bound_unit_ignores_other_ids() {
        let mut bound = BoundUnit::new(UNIT);
        bound.detach(UnitId(99));
        assert_eq!(bound.get(), Some(UNIT));
        bound.detach(UNIT);
        assert_eq!(bound.get(), None);
    }
}

// ── Default chain policy ──────────────────────────────────────────────────────

#[cfg(test)]
mod policy_tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::{default_actions, first_targets};

    use crate::ActionKind::*;

    fn kinds(t: UnitType) -> Vec<ActionKind> {
        default_actions(t).0
    }

    #[test]
    fn every_chain_ends_with_engage_then_goal() {
        for t in [UnitType::Marine, UnitType::Zealot, UnitType::Overlord, UnitType::Queen] {
            let k = kinds(t);
            assert_eq!(&k[k.len() - 2..], &[Engage, PursueGoal]);
        }
    }

    #[test]
    fn zealot_chain_and_targets() {
        assert_eq!(kinds(UnitType::Zealot), vec![KillUndetected, MineDrag, Engage, PursueGoal]);
        assert_eq!(
            first_targets(UnitType::Zealot),
            BTreeSet::from([UnitType::SiegeTankSiegeMode]),
        );
    }

    #[test]
    fn zergling_chain_and_targets() {
        assert_eq!(kinds(UnitType::Zergling), vec![MineDrag, Burrow, Engage, PursueGoal]);
        assert_eq!(
            first_targets(UnitType::Zergling),
            BTreeSet::from([
                UnitType::SpiderMine,
                UnitType::HighTemplar,
                UnitType::SiegeTankSiegeMode,
                UnitType::DarkArchon,
            ]),
        );
    }

    #[test]
    fn casters_and_detectors() {
        assert_eq!(kinds(UnitType::HighTemplar), vec![PsiStorm, Engage, PursueGoal]);
        assert_eq!(kinds(UnitType::Observer), vec![Detector, Engage, PursueGoal]);
        assert_eq!(kinds(UnitType::Arbiter), vec![Arbiter, Engage, PursueGoal]);
        assert_eq!(kinds(UnitType::Reaver), vec![TrainScarab, Engage, PursueGoal]);
        assert_eq!(kinds(UnitType::Queen), vec![Queen, Engage, PursueGoal]);
        assert_eq!(kinds(UnitType::Lurker), vec![Burrow, Engage, PursueGoal]);
    }

    #[test]
    fn archon_kills_undetected_without_mine_drag() {
        assert_eq!(kinds(UnitType::Archon), vec![KillUndetected, Engage, PursueGoal]);
        assert!(first_targets(UnitType::Archon).contains(&UnitType::SpiderMine));
    }

    #[test]
    fn air_counters() {
        assert_eq!(
            first_targets(UnitType::Corsair),
            BTreeSet::from([UnitType::SpiderMine, UnitType::Scourge]),
        );
        assert_eq!(
            first_targets(UnitType::Scourge),
            BTreeSet::from([UnitType::SpiderMine, UnitType::Corsair]),
        );
    }

    #[test]
    fn plain_unit_only_fears_mines() {
        assert_eq!(kinds(UnitType::Marine), vec![Engage, PursueGoal]);
        assert_eq!(first_targets(UnitType::Marine), BTreeSet::from([UnitType::SpiderMine]));
    }

    #[test]
    fn target_rank() {
        let (_, targets) = default_actions(UnitType::Hydralisk);
        assert_eq!(targets.rank(UnitType::HighTemplar), Some(0));
        assert_eq!(targets.rank(UnitType::Marine), None);
    }

    #[test]
    fn factory_builds_one_action_per_kind() {
        struct Tally(Mutex<Vec<ActionKind>>);
        impl ActionFactory for Tally {
            fn create(
                &self,
                unit: UnitId,
                kind: ActionKind,
                targets: &TargetPriorities,
            ) -> Box<dyn TacticalAction> {
                if kind == Engage {
                    assert_eq!(targets.tiers().len(), 1);
                }
                self.0.lock().unwrap().push(kind);
                NoopActionFactory.create(unit, kind, targets)
            }
        }

        let tally = Tally(Mutex::new(Vec::new()));
        let chain = ActionChain::for_unit(UNIT, UnitType::Zealot, &tally);
        assert_eq!(chain.len(), 4);
        assert_eq!(*tally.0.lock().unwrap(), kinds(UnitType::Zealot));
    }

    #[test]
    fn passive_default_chain_never_handles() {
        let mut chain = ActionChain::for_unit(UNIT, UnitType::HighTemplar, &NoopActionFactory);
        assert_eq!(tick(&mut chain), None);
        assert_eq!(chain.len(), 3);
    }
}

// ── Context ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod context_tests {
    use super::*;

    #[test]
    fn group_center() {
        let group = UnitGroup::new(vec![
            (UnitId(1), Position::new(0, 0)),
            (UnitId(2), Position::new(10, 20)),
        ]);
        assert_eq!(group.center(), Some(Position::new(5, 10)));
        assert!(group.contains(UnitId(2)));
        assert_eq!(UnitGroup::default().center(), None);
    }
}
