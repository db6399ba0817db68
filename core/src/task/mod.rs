mod base;
mod config;
mod id_gen;
mod message;
mod output;
mod phase;
mod snapshot;
mod state;
pub mod r#trait;

pub use base::BaseTask;
pub use config::TaskConfig;
pub use id_gen::generate_task_id;
pub use message::{RunMessage, RunOptions, TaskData};
pub use output::{OutputModel, TaskResponse, TypeDescriptor};
pub use phase::TaskPhase;
pub use r#trait::Task;
pub use snapshot::TaskSnapshot;
pub use state::TaskState;
