use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message returned when the backend accepts a delete
pub const DELETE_SUCCESS_MESSAGE: &str = "Employee deleted successfully";

/// An employee record as the backend defines it.
///
/// The shape belongs to the backend. It is sent and returned exactly as
/// given; the accessors below only read it for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Employee(pub Value);

impl Employee {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The record id, if the backend includes one (`_id` or `id`)
    pub fn id(&self) -> Option<String> {
        ["_id", "id"].iter().find_map(|key| match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Best-effort name for listings
    pub fn display_name(&self) -> String {
        let field = |key: &str| {
            self.0
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        if let Some(name) = field("name") {
            return name.to_string();
        }
        match (field("firstName"), field("lastName")) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(one), None) | (None, Some(one)) => one.to_string(),
            (None, None) => field("email").unwrap_or("(unnamed)").to_string(),
        }
    }
}

impl From<Value> for Employee {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Acknowledgement produced locally when a delete succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub success: bool,
    pub message: String,
}

impl DeleteConfirmation {
    pub fn deleted() -> Self {
        Self {
            success: true,
            message: DELETE_SUCCESS_MESSAGE.to_string(),
        }
    }
}
