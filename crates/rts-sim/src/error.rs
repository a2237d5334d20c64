use rts_core::{RtsError, UnitId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent configuration error: {0}")]
    Config(#[from] RtsError),

    #[error("unit {0} already has an action chain")]
    DuplicateUnit(UnitId),

    #[error("unit {0} has no action chain")]
    UnknownUnit(UnitId),
}

pub type AgentResult<T> = Result<T, AgentError>;
