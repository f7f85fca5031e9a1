//! Coercion of user-entered metadata values.

use serde_json::Value;

/// A metadata value as entered by the user.
///
/// The raw text is always kept as the display form. Text that parses to
/// a JSON object or array is stored structured; everything else,
/// including JSON scalars such as `false` or `1234`, stays a string so
/// the displayed value never changes type behind the user's back.
/// Scalars read from the backend keep their JSON type until edited.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    /// Plain text.
    Text(String),
    /// A JSON object or array with the text it was parsed from.
    Json {
        /// Parsed value.
        value: Value,
        /// Text as entered.
        raw: String,
    },
    /// A stored number, boolean or null.
    Scalar {
        /// Stored value.
        value: Value,
        /// Rendered form.
        raw: String,
    },
}

impl MetadataValue {
    /// Coerce raw input text.
    pub fn from_input(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value @ (Value::Object(_) | Value::Array(_))) => Self::Json {
                value,
                raw: raw.to_string(),
            },
            _ => Self::Text(raw.to_string()),
        }
    }

    /// Wrap a value stored by the backend.
    pub fn from_stored(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s.clone()),
            Value::Object(_) | Value::Array(_) => Self::Json {
                value: value.clone(),
                raw: value.to_string(),
            },
            other => Self::Scalar {
                value: other.clone(),
                raw: other.to_string(),
            },
        }
    }

    /// The value after the user submits `raw`. Unchanged text keeps the
    /// current value, so saving an untouched row never retypes it.
    pub fn edited(&self, raw: &str) -> Self {
        if raw == self.display() {
            self.clone()
        } else {
            Self::from_input(raw)
        }
    }

    /// The value sent to the backend.
    pub fn to_wire(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Json { value, .. } | Self::Scalar { value, .. } => value.clone(),
        }
    }

    /// The text shown to the user.
    pub fn display(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Json { raw, .. } | Self::Scalar { raw, .. } => raw,
        }
    }

    /// Whether the value is stored structured.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Json { .. })
    }
}
