use thiserror::Error;

/// Errors surfaced by task construction, execution and output handling.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("{operation} is not implemented for {task}")]
    NotImplemented {
        task: &'static str,
        operation: &'static str,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("output parse error: {0}")]
    OutputParse(String),
}

impl TaskError {
    pub fn not_implemented(task: &'static str, operation: &'static str) -> Self {
        Self::NotImplemented { task, operation }
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented { .. })
    }
}

impl From<serde_json::Error> for TaskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation(err.to_string())
    }
}
