// src/health/checker.rs
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A component that can report on its own health.
///
/// `check` runs once per health request, in registration order, so it should
/// only inspect the component's own state.
#[async_trait]
pub trait HealthChecker: Send + Sync {
    /// Identity shown in the report's `name` field.
    fn name(&self) -> &str;

    async fn check(&self) -> CheckOutcome;
}

/// What a single checker returned.
#[derive(Debug)]
pub struct CheckOutcome {
    pub healthy: bool,
    pub error: Option<anyhow::Error>,
    pub messages: Messages,
}

impl CheckOutcome {
    pub fn healthy() -> Self {
        Self {
            healthy: true,
            error: None,
            messages: Messages::default(),
        }
    }

    pub fn unhealthy(error: Option<anyhow::Error>) -> Self {
        Self {
            healthy: false,
            error,
            messages: Messages::default(),
        }
    }

    pub fn with_messages(mut self, messages: impl Into<Messages>) -> Self {
        self.messages = messages.into();
        self
    }
}

/// Free-form detail attached to a check.
///
/// Stored as an ordered list of strings. Key/value input is flattened to
/// `"key: value"` entries in iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Messages(Vec<String>);

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    pub fn push_pair(&mut self, key: &str, value: impl Into<Value>) {
        self.0.push(flatten_pair(key, &value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

fn flatten_pair(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) => format!("{}: {}", key, s),
        other => format!("{}: {}", key, other),
    }
}

impl From<Vec<String>> for Messages {
    fn from(messages: Vec<String>) -> Self {
        Self(messages)
    }
}

impl From<Vec<&str>> for Messages {
    fn from(messages: Vec<&str>) -> Self {
        Self(messages.into_iter().map(String::from).collect())
    }
}

impl From<serde_json::Map<String, Value>> for Messages {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.iter().map(|(k, v)| (k.as_str(), v.clone())).collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Messages
where
    K: AsRef<str>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| flatten_pair(k.as_ref(), &v.into()))
                .collect(),
        )
    }
}
