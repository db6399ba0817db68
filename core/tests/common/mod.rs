#![allow(dead_code)]

use std::any::Any;

use assistant_task::api::{
    AssistantMemory, RunMessage, RunOptions, Task, TaskError, TaskResponse, TaskState,
};
use async_trait::async_trait;

/// Memory store that only knows its name.
pub struct StubMemory {
    pub name: String,
}

impl AssistantMemory for StubMemory {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Echoes the message back, word by word when streaming.
pub struct EchoTask {
    pub state: TaskState,
    pub prepared_runs: usize,
}

impl EchoTask {
    pub fn new(state: TaskState) -> Self {
        Self {
            state,
            prepared_runs: 0,
        }
    }
}

#[async_trait]
impl Task for EchoTask {
    fn state(&self) -> &TaskState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut TaskState {
        &mut self.state
    }

    fn streamable(&self) -> bool {
        true
    }

    async fn prepare_task(&mut self) -> Result<(), TaskError> {
        self.set_task_id();
        self.prepared_runs += 1;
        Ok(())
    }

    async fn run(
        &mut self,
        message: Option<RunMessage>,
        stream: bool,
        options: RunOptions,
    ) -> Result<TaskResponse, TaskError> {
        let text = match message {
            Some(RunMessage::Text(text)) => text,
            Some(other) => other.to_value().to_string(),
            None => return Err(TaskError::Validation("message is required".into())),
        };
        if options.get("upper").and_then(|v| v.as_bool()) == Some(true) {
            return Ok(TaskResponse::Text(text.to_uppercase()));
        }
        if stream {
            let chunks: Vec<Result<String, TaskError>> = text
                .split_inclusive(' ')
                .map(|w| Ok(w.to_string()))
                .collect();
            return Ok(TaskResponse::Stream(Box::pin(futures::stream::iter(chunks))));
        }
        Ok(TaskResponse::Text(text))
    }
}
