use uuid::Uuid;

/// Fresh task identifier: a hyphenated UUID v4.
pub fn generate_task_id() -> String {
    Uuid::new_v4().to_string()
}
