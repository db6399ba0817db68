use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::TaskDefaultsConfig;
use crate::error::TaskError;

use super::message::{RunMessage, TaskData};
use super::output::OutputModel;

/// Options a task is constructed from.
///
/// The schema is closed: unknown keys are rejected. `assistant_memory` is a
/// recognised key, but a memory store can only be attached through
/// `TaskState::with_memory`, so anything other than `null` fails.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub task_name: Option<String>,

    #[serde(default)]
    pub assistant_name: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    assistant_memory: Option<MemoryPlaceholder>,

    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub run_message: Option<RunMessage>,
    #[serde(default)]
    pub run_task_data: Option<TaskData>,

    #[serde(default)]
    pub output_model: Option<OutputModel>,
    #[serde(default = "default_true")]
    pub parse_output: bool,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default = "default_true")]
    pub show_output: bool,

    #[serde(default)]
    pub debug_mode: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone)]
enum MemoryPlaceholder {}

impl<'de> Deserialize<'de> for MemoryPlaceholder {
    fn deserialize<D>(_deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Err(de::Error::custom(
            "assistant_memory cannot be deserialized; attach it with TaskState::with_memory",
        ))
    }
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self::from_defaults(&TaskDefaultsConfig::default())
    }
}

impl TaskConfig {
    pub fn from_defaults(defaults: &TaskDefaultsConfig) -> Self {
        Self {
            task_id: None,
            task_name: None,
            assistant_name: None,
            assistant_memory: None,
            run_id: None,
            run_message: None,
            run_task_data: None,
            output_model: None,
            parse_output: defaults.parse_output,
            output: None,
            show_output: defaults.show_output,
            debug_mode: defaults.debug_mode,
        }
    }

    /// Build from an untyped JSON object laid over `defaults`.
    pub fn from_value(value: Value, defaults: &TaskDefaultsConfig) -> Result<Self, TaskError> {
        let Value::Object(options) = value else {
            return Err(TaskError::Validation(
                "task options must be a JSON object".into(),
            ));
        };

        let mut merged = match serde_json::to_value(defaults)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        merged.extend(options);

        let cfg: TaskConfig = serde_json::from_value(Value::Object(merged))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), TaskError> {
        if let Some(id) = self.task_id.as_deref() {
            if id.trim().is_empty() {
                return Err(TaskError::Validation("task_id must not be empty".into()));
            }
        }
        if let Some(model) = self.output_model.as_ref() {
            model.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_apply_when_keys_are_missing() {
        let defaults = TaskDefaultsConfig {
            show_output: false,
            ..TaskDefaultsConfig::default()
        };
        let cfg = TaskConfig::from_value(json!({"task_name": "summarise"}), &defaults).unwrap();
        assert_eq!(cfg.task_name.as_deref(), Some("summarise"));
        assert!(cfg.parse_output);
        assert!(!cfg.show_output);
        assert!(!cfg.debug_mode);
    }

    #[test]
    fn explicit_keys_override_defaults() {
        let defaults = TaskDefaultsConfig::default();
        let cfg = TaskConfig::from_value(json!({"parse_output": false}), &defaults).unwrap();
        assert!(!cfg.parse_output);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = TaskConfig::from_value(json!({"priority": 3}), &TaskDefaultsConfig::default())
            .unwrap_err();
        assert!(matches!(err, TaskError::Validation(ref m) if m.contains("priority")));
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let defaults = TaskDefaultsConfig::default();
        assert!(TaskConfig::from_value(json!({"task_name": 7}), &defaults).is_err());
        assert!(TaskConfig::from_value(json!({"debug_mode": "yes"}), &defaults).is_err());
        assert!(TaskConfig::from_value(json!({"run_task_data": [1, 2]}), &defaults).is_err());
    }

    #[test]
    fn non_object_input_is_rejected() {
        let err = TaskConfig::from_value(json!(["task"]), &TaskDefaultsConfig::default())
            .unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));
    }

    #[test]
    fn memory_key_accepts_only_null() {
        let defaults = TaskDefaultsConfig::default();
        assert!(TaskConfig::from_value(json!({"assistant_memory": null}), &defaults).is_ok());
        let err = TaskConfig::from_value(json!({"assistant_memory": {"runs": []}}), &defaults)
            .unwrap_err();
        assert!(err.to_string().contains("with_memory"), "{err}");
    }

    #[test]
    fn empty_task_id_is_rejected() {
        let err = TaskConfig::from_value(json!({"task_id": "  "}), &TaskDefaultsConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("task_id"));
    }

    #[test]
    fn output_model_forms() {
        let defaults = TaskDefaultsConfig::default();
        let cfg = TaskConfig::from_value(json!({"output_model": "Summary"}), &defaults).unwrap();
        assert!(matches!(cfg.output_model, Some(OutputModel::Schema(ref n)) if n == "Summary"));

        let cfg =
            TaskConfig::from_value(json!({"output_model": ["a", "b"]}), &defaults).unwrap();
        assert!(matches!(cfg.output_model, Some(OutputModel::Choices(ref v)) if v.len() == 2));

        assert!(TaskConfig::from_value(json!({"output_model": []}), &defaults).is_err());
        assert!(TaskConfig::from_value(json!({"output_model": {"x": 1}}), &defaults).is_err());
    }
}
