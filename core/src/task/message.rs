use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Auxiliary data attached to a run, in order.
pub type TaskData = Vec<Map<String, Value>>;

/// Open-ended options passed through to `Task::run`.
pub type RunOptions = Map<String, Value>;

/// Message that triggered a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunMessage {
    Text(String),
    List(Vec<Value>),
    Map(Map<String, Value>),
}

impl RunMessage {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(items.clone()),
            Self::Map(map) => Value::Object(map.clone()),
        }
    }
}

impl From<&str> for RunMessage {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RunMessage {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<Value>> for RunMessage {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<Map<String, Value>> for RunMessage {
    fn from(map: Map<String, Value>) -> Self {
        Self::Map(map)
    }
}
