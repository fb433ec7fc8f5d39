use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::utils::parse_date;

/// An order document. Only `id` and `date` carry meaning to the service; every
/// other field is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Order(Map<String, Value>);

impl Order {
    /// Decodes a stored value. Documents saved as a JSON-encoded string are
    /// unwrapped; anything that is not an object yields `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            Value::String(raw) => match serde_json::from_str(&raw) {
                Ok(Value::Object(map)) => Some(Self(map)),
                _ => None,
            },
            _ => None,
        }
    }

    /// The `id` when it is a non-empty string.
    pub fn id(&self) -> Option<&str> {
        self.0
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.0.get("date").and_then(Value::as_str).and_then(parse_date)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

impl From<Map<String, Value>> for Order {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
