use std::fmt;

use serde_json::Value;

use crate::config::TaskDefaultsConfig;
use crate::error::TaskError;
use crate::logging::LogControl;
use crate::memory::SharedMemory;

use super::config::TaskConfig;
use super::id_gen::generate_task_id;
use super::message::{RunMessage, TaskData};
use super::output::OutputModel;
use super::phase::TaskPhase;
use super::snapshot::TaskSnapshot;

/// Fields shared by every task.
///
/// `task_id` is private: once assigned it never changes.
#[derive(Clone)]
pub struct TaskState {
    task_id: Option<String>,
    pub task_name: Option<String>,

    pub assistant_name: Option<String>,
    pub assistant_memory: Option<SharedMemory>,

    pub run_id: Option<String>,
    pub run_message: Option<RunMessage>,
    pub run_task_data: Option<TaskData>,

    pub output_model: Option<OutputModel>,
    /// If true, recorded output is coerced into `output_model`.
    pub parse_output: bool,
    pub output: Option<Value>,
    /// If true, the assistant surfaces this task's output.
    pub show_output: bool,

    debug_mode: bool,
}

impl Default for TaskState {
    fn default() -> Self {
        Self {
            task_id: None,
            task_name: None,
            assistant_name: None,
            assistant_memory: None,
            run_id: None,
            run_message: None,
            run_task_data: None,
            output_model: None,
            parse_output: true,
            output: None,
            show_output: true,
            debug_mode: false,
        }
    }
}

impl TaskState {
    /// Validate `config` and build the state. A `debug_mode` of true raises
    /// `log` to DEBUG.
    pub fn from_config(config: TaskConfig, log: &LogControl) -> Result<Self, TaskError> {
        config.validate()?;

        let mut state = Self {
            task_id: config.task_id,
            task_name: config.task_name,
            assistant_name: config.assistant_name,
            assistant_memory: None,
            run_id: config.run_id,
            run_message: config.run_message,
            run_task_data: config.run_task_data,
            output_model: config.output_model,
            parse_output: config.parse_output,
            output: config.output,
            show_output: config.show_output,
            debug_mode: false,
        };
        state.set_debug_mode(config.debug_mode, log);
        Ok(state)
    }

    pub fn from_value(
        value: Value,
        defaults: &TaskDefaultsConfig,
        log: &LogControl,
    ) -> Result<Self, TaskError> {
        let config = TaskConfig::from_value(value, defaults)?;
        Self::from_config(config, log)
    }

    pub fn with_memory(mut self, memory: SharedMemory) -> Self {
        self.assistant_memory = Some(memory);
        self
    }

    pub fn with_output_model(mut self, model: OutputModel) -> Self {
        self.output_model = Some(model);
        self
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    /// Assign a fresh id if none is set. Returns the id in effect.
    pub fn set_task_id(&mut self) -> &str {
        self.task_id.get_or_insert_with(|| {
            let id = generate_task_id();
            tracing::debug!(task_id = %id, "task id assigned");
            id
        })
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn set_debug_mode(&mut self, on: bool, log: &LogControl) {
        self.debug_mode = on;
        if on {
            log.enable_debug();
            tracing::debug!("Debug logs enabled");
        }
    }

    pub fn phase(&self) -> TaskPhase {
        match (&self.task_id, &self.output) {
            (None, _) => TaskPhase::Unprepared,
            (Some(_), None) => TaskPhase::Prepared,
            (Some(_), Some(_)) => TaskPhase::Executed,
        }
    }

    /// Store a run result, coercing it into `output_model` when `parse_output`
    /// is set. On a coercion failure the previous output is kept.
    pub fn record_output(&mut self, raw: Value) -> Result<(), TaskError> {
        let value = match self.output_model.as_ref() {
            Some(model) if self.parse_output => model.coerce(raw)?,
            _ => raw,
        };
        self.output = Some(value);
        Ok(())
    }

    /// Clear run-scoped fields so the task can serve an unrelated run.
    pub fn reset_run(&mut self) {
        self.run_id = None;
        self.run_message = None;
        self.run_task_data = None;
        self.output = None;
    }

    pub fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot {
            task_id: self.task_id.clone(),
            task_name: self.task_name.clone(),
            output: self.output.clone(),
        }
    }
}

impl fmt::Debug for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskState")
            .field("task_id", &self.task_id)
            .field("task_name", &self.task_name)
            .field("assistant_name", &self.assistant_name)
            .field(
                "assistant_memory",
                &self.assistant_memory.as_ref().map(|m| m.name()),
            )
            .field("run_id", &self.run_id)
            .field("run_message", &self.run_message)
            .field("run_task_data", &self.run_task_data)
            .field("output_model", &self.output_model)
            .field("parse_output", &self.parse_output)
            .field("output", &self.output)
            .field("show_output", &self.show_output)
            .field("debug_mode", &self.debug_mode)
            .finish()
    }
}
