use async_trait::async_trait;

use crate::error::TaskError;

use super::message::{RunMessage, RunOptions};
use super::output::TaskResponse;
use super::snapshot::TaskSnapshot;
use super::state::TaskState;

/// A unit of work an assistant can prepare and run.
///
/// Implementors own a [`TaskState`] and provide `run`. Everything else has a
/// default built on the state.
#[async_trait]
pub trait Task: Send + Sync {
    fn state(&self) -> &TaskState;

    fn state_mut(&mut self) -> &mut TaskState;

    /// Whether `run` can return [`TaskResponse::Stream`].
    fn streamable(&self) -> bool {
        false
    }

    fn set_task_id(&mut self) {
        self.state_mut().set_task_id();
    }

    /// Called before `run`. Overrides must keep assigning the task id.
    async fn prepare_task(&mut self) -> Result<(), TaskError> {
        self.set_task_id();
        Ok(())
    }

    async fn run(
        &mut self,
        message: Option<RunMessage>,
        stream: bool,
        options: RunOptions,
    ) -> Result<TaskResponse, TaskError>;

    fn to_dict(&self) -> TaskSnapshot {
        self.state().snapshot()
    }
}
