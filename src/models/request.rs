use super::style::StyleOptions;
use serde_json::Value;

/// A request body as it arrived, before any field has been checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGenerateRequest {
    pub prompt: Option<Value>,
    pub style_options: Option<Value>,
}

impl RawGenerateRequest {
    /// Picks the known fields out of any JSON value; non-objects yield empty fields.
    pub fn from_value(value: &Value) -> Self {
        Self {
            prompt: value.get("prompt").cloned(),
            style_options: value.get("styleOptions").cloned(),
        }
    }

    pub fn new(prompt: impl Into<String>, style_options: &StyleOptions) -> Self {
        Self {
            prompt: Some(Value::String(prompt.into())),
            style_options: serde_json::to_value(style_options).ok(),
        }
    }
}

/// A request that passed validation. `prompt` is already sanitized and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub style_options: StyleOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::style::{ArtStyle, ColorTone};
    use serde_json::json;

    #[test]
    fn test_from_value_reads_camel_case_fields() {
        let raw = RawGenerateRequest::from_value(&json!({
            "prompt": "a cat",
            "styleOptions": {"artStyle": "유화", "colorTone": "흑백"}
        }));
        assert_eq!(raw.prompt, Some(json!("a cat")));
        assert_eq!(raw.style_options.unwrap()["artStyle"], "유화");
    }

    #[test]
    fn test_from_value_tolerates_non_objects() {
        assert_eq!(
            RawGenerateRequest::from_value(&json!([1, 2, 3])),
            RawGenerateRequest::default()
        );
    }

    #[test]
    fn test_new_serializes_style_options() {
        let raw = RawGenerateRequest::new(
            "a dog",
            &StyleOptions::new(ArtStyle::PenAndInk, ColorTone::Dark),
        );
        assert_eq!(raw.style_options, Some(json!({"artStyle": "펜화", "colorTone": "어두운"})));
    }
}
