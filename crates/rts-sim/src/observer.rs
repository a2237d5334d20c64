//! Observer trait for progress reporting and decision logging.

use rts_core::Tick;
use rts_economy::ReconcileReport;

use crate::TickSummary;

/// Callbacks invoked by [`Agent::on_tick`][crate::Agent::on_tick].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait AgentObserver {
    /// Called before any unit is updated.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called right after the economy reconciliation ran.
    fn on_reconcile(&mut self, _tick: Tick, _report: &ReconcileReport) {}

    /// Called once the tick is complete.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}
}

/// An [`AgentObserver`] that does nothing.
pub struct NoopObserver;

impl AgentObserver for NoopObserver {}
