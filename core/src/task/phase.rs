use serde::{Deserialize, Serialize};

/// Where a task sits in its lifecycle, derived from its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPhase {
    /// No `task_id` yet.
    Unprepared,
    /// `task_id` assigned, no output recorded.
    Prepared,
    /// Output recorded.
    Executed,
}
