//! The task query surface and the shared handle type.

use std::cell::Cell;
use std::rc::Rc;

use rts_core::{Position, TaskId, UnitType};

use crate::{TaskError, TaskResult};

/// Polling surface of one outstanding commitment.
///
/// Implementations are cheap handles; the issuer and the consumer hold clones
/// of the same underlying state.
pub trait Task {
    fn id(&self) -> TaskId;

    /// Terminal state reached: completed or cancelled.
    fn has_ended(&self) -> bool;

    /// Construction has actually started (resources committed).
    fn in_progress(&self) -> bool;

    /// Request cancellation.  Calling it on an ended task is a no-op.
    fn cancel(&self);
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TaskState {
    Queued,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Cancelled)
    }

    pub fn name(self) -> &'static str {
        match self {
            TaskState::Queued     => "queued",
            TaskState::InProgress => "in-progress",
            TaskState::Completed  => "completed",
            TaskState::Cancelled  => "cancelled",
        }
    }
}

/// Which reconciliation category asked for the work.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TaskKind {
    Refinery,
    Defense,
    Expansion,
}

/// Where the placement collaborator should look for a build site.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum BuildLocation {
    /// Inside an existing base.
    #[default]
    Base,
    /// A new base location.
    Expansion,
}

#[derive(Debug)]
struct TaskCell {
    id:        TaskId,
    unit_type: UnitType,
    kind:      TaskKind,
    location:  BuildLocation,
    state:     Cell<TaskState>,
    site:      Cell<Option<Position>>,
}

/// Reference-counted handle to one build commitment.
///
/// Cloning is cheap and every clone observes the same state.  The issuing
/// side drives [`begin`][Self::begin] and [`finish`][Self::finish]; the
/// consuming side only polls and cancels.
#[derive(Clone, Debug)]
pub struct TaskHandle(Rc<TaskCell>);

impl TaskHandle {
    pub fn new(id: TaskId, unit_type: UnitType, kind: TaskKind, location: BuildLocation) -> Self {
        TaskHandle(Rc::new(TaskCell {
            id,
            unit_type,
            kind,
            location,
            state: Cell::new(TaskState::Queued),
            site:  Cell::new(None),
        }))
    }

    pub fn unit_type(&self) -> UnitType {
        self.0.unit_type
    }

    pub fn kind(&self) -> TaskKind {
        self.0.kind
    }

    pub fn location(&self) -> BuildLocation {
        self.0.location
    }

    pub fn state(&self) -> TaskState {
        self.0.state.get()
    }

    /// Build site assigned when construction started, if any.
    pub fn site(&self) -> Option<Position> {
        self.0.site.get()
    }

    /// Queued → InProgress.
    pub fn begin(&self, site: Position) -> TaskResult<()> {
        self.transition(TaskState::Queued, TaskState::InProgress)?;
        self.0.site.set(Some(site));
        Ok(())
    }

    /// InProgress → Completed.
    pub fn finish(&self) -> TaskResult<()> {
        self.transition(TaskState::InProgress, TaskState::Completed)
    }

    fn transition(&self, from: TaskState, to: TaskState) -> TaskResult<()> {
        let current = self.state();
        if current != from {
            return Err(TaskError::InvalidTransition {
                id:   self.0.id,
                from: current.name(),
                to:   to.name(),
            });
        }
        self.0.state.set(to);
        Ok(())
    }
}

impl Task for TaskHandle {
    fn id(&self) -> TaskId {
        self.0.id
    }

    fn has_ended(&self) -> bool {
        self.state().is_terminal()
    }

    fn in_progress(&self) -> bool {
        self.state() == TaskState::InProgress
    }

    fn cancel(&self) {
        if !self.state().is_terminal() {
            self.0.state.set(TaskState::Cancelled);
        }
    }
}
