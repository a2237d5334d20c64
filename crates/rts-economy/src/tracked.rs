//! Bookkeeping of the work a category has already committed.

use std::collections::VecDeque;

use rts_core::UnitType;
use rts_task::Task;

/// One unit of requested work: the task for the final structure plus any
/// intermediate steps issued with it.
///
/// A commitment counts as *pending* (not yet started) until its primary task
/// starts or ends, or a step is observed in progress.  From then on the
/// structure shows up in the base building list, so it must not be counted
/// twice.  A step that ends without ever being seen in progress was
/// cancelled, and leaves the commitment pending.
#[derive(Debug)]
pub struct Commitment<T> {
    unit_type:    UnitType,
    primary:      T,
    steps:        Vec<T>,
    step_started: bool,
}

impl<T: Task> Commitment<T> {
    pub fn single(unit_type: UnitType, task: T) -> Self {
        Self { unit_type, primary: task, steps: Vec::new(), step_started: false }
    }

    pub fn with_steps(unit_type: UnitType, primary: T, steps: Vec<T>) -> Self {
        Self { unit_type, primary, steps, step_started: false }
    }

    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    pub fn primary(&self) -> &T {
        &self.primary
    }

    /// Every task of the commitment, steps first.
    pub fn tasks(&self) -> impl Iterator<Item = &T> + '_ {
        self.steps.iter().chain(std::iter::once(&self.primary))
    }

    /// All tasks have reached a terminal state.
    pub fn has_ended(&self) -> bool {
        self.tasks().all(|t| t.has_ended())
    }

    /// Nothing has started yet.
    pub fn is_pending(&self) -> bool {
        !self.step_started && !self.primary.in_progress() && !self.primary.has_ended()
    }

    /// Number of tasks that have not ended.
    pub fn live_tasks(&self) -> usize {
        self.tasks().filter(|t| !t.has_ended()).count()
    }

    fn observe(&mut self) {
        if self.steps.iter().any(|s| s.in_progress()) {
            self.step_started = true;
        }
    }

    fn cancel(&self) {
        for task in self.tasks() {
            if !task.has_ended() {
                task.cancel();
            }
        }
    }
}

/// Commitments of one category, newest first.
#[derive(Debug)]
pub struct TrackedTasks<T> {
    entries: VecDeque<Commitment<T>>,
}

impl<T> Default for TrackedTasks<T> {
    fn default() -> Self {
        Self { entries: VecDeque::new() }
    }
}

impl<T: Task> TrackedTasks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `commitment` as the newest entry.
    pub fn track(&mut self, commitment: Commitment<T>) {
        self.entries.push_front(commitment);
    }

    /// Refresh start observations and drop ended commitments.
    ///
    /// Returns how many were dropped.
    pub fn reap(&mut self) -> usize {
        for entry in self.entries.iter_mut() {
            entry.observe();
        }
        let before = self.entries.len();
        self.entries.retain(|entry| !entry.has_ended());
        before - self.entries.len()
    }

    /// Tracked commitments that have not started.
    pub fn pending(&self) -> usize {
        self.entries.iter().filter(|e| e.is_pending()).count()
    }

    /// Same as [`pending`][Self::pending], restricted to one structure type.
    pub fn pending_of(&self, unit_type: UnitType) -> usize {
        self.entries
            .iter()
            .filter(|e| e.unit_type == unit_type && e.is_pending())
            .count()
    }

    /// Cancel and untrack up to `n` commitments, newest first.
    ///
    /// Stops early when the list runs out; returns how many were cancelled.
    pub fn cancel_newest(&mut self, n: usize) -> usize {
        self.cancel_newest_where(n, |_| true)
    }

    /// Same as [`cancel_newest`][Self::cancel_newest], restricted to one
    /// structure type.
    pub fn cancel_newest_of(&mut self, unit_type: UnitType, n: usize) -> usize {
        self.cancel_newest_where(n, |e| e.unit_type == unit_type)
    }

    fn cancel_newest_where(&mut self, n: usize, matches: impl Fn(&Commitment<T>) -> bool) -> usize {
        let mut cancelled = 0;
        self.entries.retain(|entry| {
            if cancelled < n && matches(entry) {
                entry.cancel();
                cancelled += 1;
                false
            } else {
                true
            }
        });
        cancelled
    }

    /// Number of tracked commitments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tracked tasks that have not ended, across all commitments.
    pub fn live_tasks(&self) -> usize {
        self.entries.iter().map(Commitment::live_tasks).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Commitment<T>> + '_ {
        self.entries.iter()
    }
}
