use std::fmt;

use futures::stream::BoxStream;
use futures::TryStreamExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::TaskError;

/// Desired shape of a task's output.
#[derive(Debug, Clone)]
pub enum OutputModel {
    /// A Rust type the output must deserialize into.
    Typed(TypeDescriptor),
    /// A named schema; the output must be JSON.
    Schema(String),
    /// The output must equal one of these values.
    Choices(Vec<Value>),
}

impl OutputModel {
    pub fn typed<T>() -> Self
    where
        T: DeserializeOwned + Serialize,
    {
        Self::Typed(TypeDescriptor::of::<T>())
    }

    pub(crate) fn validate(&self) -> Result<(), TaskError> {
        match self {
            Self::Schema(name) if name.trim().is_empty() => Err(TaskError::Validation(
                "output_model schema name must not be empty".into(),
            )),
            Self::Choices(values) if values.is_empty() => Err(TaskError::Validation(
                "output_model choices must not be empty".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Convert a raw result into this model.
    pub fn coerce(&self, raw: Value) -> Result<Value, TaskError> {
        match self {
            Self::Schema(_) => parse_json_value(raw),
            Self::Typed(desc) => desc.coerce_raw(raw),
            Self::Choices(allowed) => {
                let candidate = match raw {
                    Value::String(s) => Value::String(s.trim().to_string()),
                    other => other,
                };
                allowed
                    .iter()
                    .find(|v| **v == candidate)
                    .cloned()
                    .ok_or_else(|| {
                        TaskError::OutputParse(format!("{candidate} is not an allowed value"))
                    })
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OutputModelRepr {
    Schema(String),
    Choices(Vec<Value>),
}

// Typed models carry a Rust type and can only be attached through the API.
impl<'de> Deserialize<'de> for OutputModel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match OutputModelRepr::deserialize(deserializer)? {
            OutputModelRepr::Schema(name) => Self::Schema(name),
            OutputModelRepr::Choices(values) => Self::Choices(values),
        })
    }
}

/// Type-erased handle to a Rust output type.
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    type_name: &'static str,
    coerce: fn(Value) -> Result<Value, String>,
}

impl TypeDescriptor {
    pub fn of<T>() -> Self
    where
        T: DeserializeOwned + Serialize,
    {
        Self {
            type_name: std::any::type_name::<T>(),
            coerce: coerce_into::<T>,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Text is tried as JSON first, then as a plain string.
    fn coerce_raw(&self, raw: Value) -> Result<Value, TaskError> {
        let result = match raw {
            Value::String(text) => serde_json::from_str::<Value>(strip_code_fence(&text))
                .map_err(|e| e.to_string())
                .and_then(self.coerce)
                .or_else(|err| (self.coerce)(Value::String(text)).map_err(|_| err)),
            other => (self.coerce)(other),
        };
        result.map_err(|e| TaskError::OutputParse(format!("{}: {e}", self.type_name)))
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeDescriptor").field(&self.type_name).finish()
    }
}

fn coerce_into<T>(value: Value) -> Result<Value, String>
where
    T: DeserializeOwned + Serialize,
{
    let typed: T = serde_json::from_value(value).map_err(|e| e.to_string())?;
    serde_json::to_value(typed).map_err(|e| e.to_string())
}

fn parse_json_value(raw: Value) -> Result<Value, TaskError> {
    match raw {
        Value::String(text) => serde_json::from_str(strip_code_fence(&text))
            .map_err(|e| TaskError::OutputParse(e.to_string())),
        other => Ok(other),
    }
}

/// Models often wrap JSON in a Markdown fence; keep only the body.
fn strip_code_fence(text: &str) -> &str {
    let t = text.trim();
    let Some(rest) = t.strip_prefix("```") else {
        return t;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    let body = match rest.find('\n') {
        Some(i) if !rest[..i].trim_start().starts_with(['{', '[']) => &rest[i + 1..],
        _ => rest,
    };
    body.trim()
}

/// What a run produced.
pub enum TaskResponse {
    /// Partial text chunks, delivered lazily.
    Stream(BoxStream<'static, Result<String, TaskError>>),
    Text(String),
    Structured(Value),
}

impl TaskResponse {
    pub fn is_stream(&self) -> bool {
        matches!(self, Self::Stream(_))
    }

    /// Drain the response into one value. Stream chunks are concatenated.
    pub async fn collect(self) -> Result<Value, TaskError> {
        match self {
            Self::Stream(stream) => {
                let chunks: Vec<String> = stream.try_collect().await?;
                Ok(Value::String(chunks.concat()))
            }
            Self::Text(text) => Ok(Value::String(text)),
            Self::Structured(value) => Ok(value),
        }
    }
}

impl fmt::Debug for TaskResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream(_) => f.write_str("Stream(..)"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Structured(value) => f.debug_tuple("Structured").field(value).finish(),
        }
    }
}
