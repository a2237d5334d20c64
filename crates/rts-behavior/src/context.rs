//! Read-only squad context passed to every action each tick.

use rts_core::{Position, UnitId};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum GoalKind {
    #[default]
    Idle,
    Attack,
    Defend,
    Hold,
    Retreat,
}

/// What the unit's squad is trying to achieve this tick.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Goal {
    pub kind:     GoalKind,
    /// Where the goal applies; `None` for goals without a location.
    pub position: Option<Position>,
}

impl Goal {
    pub fn new(kind: GoalKind, position: Position) -> Self {
        Self { kind, position: Some(position) }
    }

    pub fn idle() -> Self {
        Self::default()
    }
}

/// The squad a unit belongs to, as seen at the start of the tick.
#[derive(Clone, Debug, Default)]
pub struct UnitGroup {
    members: Vec<(UnitId, Position)>,
}

impl UnitGroup {
    pub fn new(members: Vec<(UnitId, Position)>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, unit: UnitId) -> bool {
        self.members.iter().any(|&(id, _)| id == unit)
    }

    pub fn members(&self) -> impl Iterator<Item = (UnitId, Position)> + '_ {
        self.members.iter().copied()
    }

    /// Mean member position, or `None` for an empty group.
    pub fn center(&self) -> Option<Position> {
        if self.members.is_empty() {
            return None;
        }
        let n = self.members.len() as i64;
        let (sx, sy) = self
            .members
            .iter()
            .fold((0i64, 0i64), |(sx, sy), (_, p)| (sx + p.x as i64, sy + p.y as i64));
        Some(Position::new((sx / n) as i32, (sy / n) as i32))
    }
}
