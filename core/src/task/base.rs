use async_trait::async_trait;

use crate::error::TaskError;
use crate::logging::LogControl;

use super::config::TaskConfig;
use super::message::{RunMessage, RunOptions};
use super::output::TaskResponse;
use super::r#trait::Task;
use super::state::TaskState;

/// A task with state and lifecycle defaults but no work of its own.
#[derive(Debug, Clone, Default)]
pub struct BaseTask {
    state: TaskState,
}

impl BaseTask {
    pub fn new(state: TaskState) -> Self {
        Self { state }
    }

    pub fn from_config(config: TaskConfig, log: &LogControl) -> Result<Self, TaskError> {
        Ok(Self::new(TaskState::from_config(config, log)?))
    }
}

#[async_trait]
impl Task for BaseTask {
    fn state(&self) -> &TaskState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut TaskState {
        &mut self.state
    }

    async fn run(
        &mut self,
        _message: Option<RunMessage>,
        _stream: bool,
        _options: RunOptions,
    ) -> Result<TaskResponse, TaskError> {
        Err(TaskError::not_implemented("BaseTask", "run"))
    }
}
