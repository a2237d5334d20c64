use rts_core::TaskId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("task {0} is not tracked by this issuer")]
    UnknownTask(TaskId),

    #[error("task {id} cannot go from {from} to {to}")]
    InvalidTransition {
        id:   TaskId,
        from: &'static str,
        to:   &'static str,
    },
}

pub type TaskResult<T> = Result<T, TaskError>;
