//! Default chain policy.
//!
//! Both the behavior list and the first-priority target set are derived from
//! unit-type capability predicates through the tables below, so the result
//! for a given type is fixed data.

use std::collections::BTreeSet;

use rts_core::UnitType;

use crate::ActionKind;

/// Tiers of preferred targets, most preferred first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetPriorities(Vec<BTreeSet<UnitType>>);

impl TargetPriorities {
    pub fn new(tiers: Vec<BTreeSet<UnitType>>) -> Self {
        Self(tiers)
    }

    pub fn tiers(&self) -> &[BTreeSet<UnitType>] {
        &self.0
    }

    /// Tier index of `unit_type`, or `None` when it has no preference.
    pub fn rank(&self, unit_type: UnitType) -> Option<usize> {
        self.0.iter().position(|tier| tier.contains(&unit_type))
    }
}

// ── Capability predicates ─────────────────────────────────────────────────────

fn is_not_zealot(t: UnitType) -> bool {
    t != UnitType::Zealot
}

fn is_corsair(t: UnitType) -> bool {
    t == UnitType::Corsair
}

fn fights_undetected(t: UnitType) -> bool {
    matches!(t, UnitType::Zealot | UnitType::Archon)
}

fn is_zerg_ground_army(t: UnitType) -> bool {
    matches!(t, UnitType::Zergling | UnitType::Hydralisk | UnitType::Lurker)
}

fn is_scourge(t: UnitType) -> bool {
    t == UnitType::Scourge
}

fn is_detector(t: UnitType) -> bool {
    t.is_detector()
}

fn is_arbiter(t: UnitType) -> bool {
    t == UnitType::Arbiter
}

fn carries_scarabs(t: UnitType) -> bool {
    t == UnitType::Reaver
}

fn casts_storm(t: UnitType) -> bool {
    t == UnitType::HighTemplar
}

fn drags_mines(t: UnitType) -> bool {
    matches!(t, UnitType::Zealot | UnitType::Zergling)
}

fn is_queen(t: UnitType) -> bool {
    t == UnitType::Queen
}

fn can_burrow(t: UnitType) -> bool {
    t.is_burrowable()
}

type Predicate = fn(UnitType) -> bool;

/// `(capability, targets added to the first-priority tier)`.
const TARGET_RULES: &[(Predicate, &[UnitType])] = &[
    (is_not_zealot,      &[UnitType::SpiderMine]),
    (is_corsair,         &[UnitType::Scourge]),
    (fights_undetected,  &[UnitType::SiegeTankSiegeMode]),
    (
        is_zerg_ground_army,
        &[UnitType::HighTemplar, UnitType::SiegeTankSiegeMode, UnitType::DarkArchon],
    ),
    (is_scourge,         &[UnitType::Corsair]),
];

/// `(capability, behavior)` in precedence order.
const ACTION_RULES: &[(Predicate, ActionKind)] = &[
    (fights_undetected, ActionKind::KillUndetected),
    (is_detector,       ActionKind::Detector),
    (is_arbiter,        ActionKind::Arbiter),
    (carries_scarabs,   ActionKind::TrainScarab),
    (casts_storm,       ActionKind::PsiStorm),
    (drags_mines,       ActionKind::MineDrag),
    (is_queen,          ActionKind::Queen),
    (can_burrow,        ActionKind::Burrow),
];

/// First-priority targets for `unit_type`.
pub fn first_targets(unit_type: UnitType) -> BTreeSet<UnitType> {
    TARGET_RULES
        .iter()
        .filter(|(applies, _)| applies(unit_type))
        .flat_map(|(_, targets)| targets.iter().copied())
        .collect()
}

/// Behavior kinds for `unit_type`, highest priority first, always ending in
/// `Engage` then `PursueGoal`, together with the engage target priorities.
pub fn default_actions(unit_type: UnitType) -> (Vec<ActionKind>, TargetPriorities) {
    let mut kinds: Vec<ActionKind> = ACTION_RULES
        .iter()
        .filter(|(applies, _)| applies(unit_type))
        .map(|&(_, kind)| kind)
        .collect();
    kinds.push(ActionKind::Engage);
    kinds.push(ActionKind::PursueGoal);
    (kinds, TargetPriorities::new(vec![first_targets(unit_type)]))
}
