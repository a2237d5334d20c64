//! Fluent builder for constructing an [`Agent`].

use rts_core::AgentConfig;
use rts_task::Task;

use crate::{Agent, AgentResult};

/// Fluent builder for [`Agent<T>`].
///
/// | Method        | Default                   |
/// |---------------|---------------------------|
/// | `.config(c)`  | `AgentConfig::default()`  |
///
/// ```rust,ignore
/// let agent: Agent<TaskHandle> = AgentBuilder::new().config(config).build()?;
/// ```
#[derive(Default)]
pub struct AgentBuilder {
    config: Option<AgentConfig>,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Validate the configuration and return a ready agent with no units.
    pub fn build<T: Task>(self) -> AgentResult<Agent<T>> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        Ok(Agent::new(config))
    }
}
