//! Seams between the decision core and the outside world.

use rts_core::{Position, UnitType};

use crate::{BuildLocation, Task, TaskKind};

/// Accepts build requests and hands back a pollable handle immediately.
///
/// Whether and when the work actually starts is the issuer's business; a task
/// that can never be afforded simply stays queued.
pub trait TaskIssuer {
    type Handle: Task;

    fn build(
        &mut self,
        unit_type: UnitType,
        kind:      TaskKind,
        location:  BuildLocation,
    ) -> Self::Handle;
}

/// Chooses concrete build sites.
pub trait Placement {
    /// Claim a site for `unit_type`; `None` means no site is available yet.
    fn reserve(&mut self, unit_type: UnitType, location: BuildLocation) -> Option<Position>;

    /// Give a previously reserved site back.
    fn release(&mut self, site: Position);
}

/// A [`Placement`] that accepts every request at the origin.
///
/// Useful in tests where sites don't matter.
pub struct AnywherePlacement;

impl Placement for AnywherePlacement {
    fn reserve(&mut self, _unit_type: UnitType, _location: BuildLocation) -> Option<Position> {
        Some(Position::ORIGIN)
    }

    fn release(&mut self, _site: Position) {}
}
