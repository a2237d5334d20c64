//! Action kinds and the seam through which concrete behaviors are created.

use rts_core::UnitId;

use crate::{PassiveAction, TacticalAction, TargetPriorities};

/// The behaviors a default chain can contain.
///
/// Concrete implementations live with the host; the chain policy only
/// decides which kinds a unit gets and in what order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ActionKind {
    /// Melee units fighting cloaked enemies they cannot see.
    KillUndetected,
    /// Keep a detector over cloaked threats.
    Detector,
    /// Arbiter stasis and recall.
    Arbiter,
    /// Keep a reaver stocked with scarabs.
    TrainScarab,
    /// Psionic storm casting.
    PsiStorm,
    /// Drag enemy spider mines into enemy units.
    MineDrag,
    /// Queen spell casting.
    Queen,
    /// Burrow to dodge or ambush.
    Burrow,
    /// Engage the nearest valid target, honoring target priorities.
    Engage,
    /// Fall back to the squad goal.
    PursueGoal,
}

/// Creates the concrete action for a kind, bound to `unit`.
///
/// `targets` is only meaningful for [`ActionKind::Engage`].
pub trait ActionFactory {
    fn create(
        &self,
        unit:    UnitId,
        kind:    ActionKind,
        targets: &TargetPriorities,
    ) -> Box<dyn TacticalAction>;
}

/// An [`ActionFactory`] that hands out [`PassiveAction`]s for every kind.
pub struct NoopActionFactory;

impl ActionFactory for NoopActionFactory {
    fn create(
        &self,
        unit:     UnitId,
        _kind:    ActionKind,
        _targets: &TargetPriorities,
    ) -> Box<dyn TacticalAction> {
        Box::new(PassiveAction::new(unit))
    }
}
