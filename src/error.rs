//! Crate-wide error type.
//!
//! Nothing in the reading flow surfaces these to the reader: the web layer logs
//! them and degrades to a no-op. They exist so internal helpers can use `?`.

use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, NarrativeError>;

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("missing element: {0}")]
    MissingElement(String),

    #[error("invalid step index {value:?}")]
    InvalidStep { value: String },

    #[error("unknown winner tag {0:?} (expected \"rats\" or \"newyorkers\")")]
    UnknownWinner(String),

    #[error("unknown scroll direction {0:?} (expected \"up\" or \"down\")")]
    UnknownDirection(String),

    #[error("step index {0} declared more than once")]
    DuplicateStep(u32),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("javascript error: {0}")]
    Js(String),
}

impl NarrativeError {
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingElement(what.into())
    }
}

impl From<JsValue> for NarrativeError {
    fn from(value: JsValue) -> Self {
        let text = value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Js(text)
    }
}

impl From<NarrativeError> for JsValue {
    fn from(err: NarrativeError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let e = NarrativeError::UnknownWinner("cats".into());
        assert!(e.to_string().contains("\"cats\""));
        let e = NarrativeError::DuplicateStep(3);
        assert_eq!(e.to_string(), "step index 3 declared more than once");
    }

    #[test]
    fn test_json_errors_convert() {
        let err: NarrativeError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, NarrativeError::ConfigParse(_)));
    }
}
