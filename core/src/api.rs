//! Stable re-exports for consumers.
//!
//! Prefer importing from `assistant_task::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, load_from_path, AppConfig, LoggingConfig, TaskDefaultsConfig,
};
pub use crate::error::TaskError;
pub use crate::logging::{init_tracing, LogControl};
pub use crate::memory::{AssistantMemory, SharedMemory};
pub use crate::task::{
    generate_task_id, BaseTask, OutputModel, RunMessage, RunOptions, Task, TaskConfig, TaskData,
    TaskPhase, TaskResponse, TaskSnapshot, TaskState, TypeDescriptor,
};
