use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Public view of a task. Run-scoped fields, the memory reference and the
/// debug flag never appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub task_id: Option<String>,
    pub task_name: Option<String>,
    pub output: Option<Value>,
}
