//! Mood filter: the structured output of the inference service.

use serde::{Deserialize, Serialize};

/// Structured filter extracted from a free-text mood description.
///
/// `explanation` is mandatory — it is shown to the user verbatim. The two
/// optional fields become query constraints; an absent field is simply
/// omitted from the directory query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub explanation: String,
}

/// Generation knobs for free-text completion requests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_parses_with_optional_fields_absent() {
        let f: MoodFilter = serde_json::from_str(r#"{"explanation": "just vibes"}"#).unwrap();
        assert!(f.country.is_none());
        assert!(f.tag.is_none());
        assert_eq!(f.explanation, "just vibes");
    }

    #[test]
    fn filter_rejects_missing_explanation() {
        let err = serde_json::from_str::<MoodFilter>(r#"{"tag": "jazz"}"#);
        assert!(err.is_err());
    }
}
