//! Inference service client (OpenAI-style chat completions).
//!
//! Two operations: free-text completion and structured mood extraction. The
//! structured path asks for a JSON object and parses it against the
//! `{country?, tag?, explanation}` shape; anything that does not parse is a
//! `MalformedResponse`, which the mood planner recovers from with its fixed
//! fallback filter.

use serde::{Deserialize, Serialize};
use serde_json::json;
use terradio_proto::config::InferenceConfig;
use terradio_proto::mood::{GenerationOptions, MoodFilter};
use tracing::debug;

use super::{InferenceSource, SourceError};

/// System prompt for the structured extraction call.
const MOOD_SYSTEM_PROMPT: &str = "You map a listener's mood description to radio \
station filters. Respond with a JSON object: optional \"country\" (full English \
country name), optional \"tag\" (a single lowercase genre token), and a required \
\"explanation\" (one short, evocative sentence for the listener). Omit a field \
rather than guessing.";

pub struct HttpInferenceSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    default_opts: GenerationOptions,
}

impl HttpInferenceSource {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            default_opts: GenerationOptions::default(),
        }
    }

    /// Reads the API key from the environment variable named in the config.
    pub fn from_config(client: reqwest::Client, config: &InferenceConfig) -> anyhow::Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            anyhow::anyhow!("inference API key not set (expected ${})", config.api_key_env)
        })?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
            model: config.model.clone(),
            default_opts: GenerationOptions {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            },
        })
    }

    async fn chat(
        &self,
        system_prompt: &str,
        text: &str,
        opts: &GenerationOptions,
        json_mode: bool,
    ) -> Result<String, SourceError> {
        let url = format!("{}/chat/completions", self.base_url);
        let mut body = json!({
            "model": self.model,
            "temperature": opts.temperature,
            "max_tokens": opts.max_output_tokens,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": text },
            ],
        });
        if json_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }

        debug!(%url, model = %self.model, json_mode, "inference request");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let completion: ChatCompletion = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| SourceError::MalformedResponse {
                reason: "completion carried no choices".to_string(),
            })
    }
}

impl InferenceSource for HttpInferenceSource {
    async fn complete(
        &self,
        system_prompt: &str,
        text: &str,
        opts: &GenerationOptions,
    ) -> Result<String, SourceError> {
        let content = self.chat(system_prompt, text, opts, false).await?;
        Ok(content.trim().to_string())
    }

    async fn extract_mood(&self, text: &str) -> Result<MoodFilter, SourceError> {
        let content = self
            .chat(MOOD_SYSTEM_PROMPT, text, &self.default_opts, true)
            .await?;
        parse_mood_content(&content)
    }
}

/// Parses the model's output against the mood-filter shape. Tolerates the
/// content arriving wrapped in a markdown code fence.
fn parse_mood_content(content: &str) -> Result<MoodFilter, SourceError> {
    let trimmed = strip_code_fence(content.trim());
    serde_json::from_str(trimmed).map_err(|err| SourceError::MalformedResponse {
        reason: err.to_string(),
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the language hint on the opening fence line, if any.
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

// ── Wire shapes ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json_content() {
        let filter = parse_mood_content(
            r#"{"country": "Japan", "tag": "jazz", "explanation": "smoky downtempo vibes"}"#,
        )
        .unwrap();
        assert_eq!(filter.country.as_deref(), Some("Japan"));
        assert_eq!(filter.tag.as_deref(), Some("jazz"));
        assert_eq!(filter.explanation, "smoky downtempo vibes");
    }

    #[test]
    fn parses_fenced_json_content() {
        let content = "```json\n{\"tag\": \"ambient\", \"explanation\": \"slow drift\"}\n```";
        let filter = parse_mood_content(content).unwrap();
        assert_eq!(filter.tag.as_deref(), Some("ambient"));
        assert!(filter.country.is_none());
    }

    #[test]
    fn prose_is_a_malformed_response() {
        let err = parse_mood_content("Sure! Here are some stations you might like.");
        assert!(matches!(err, Err(SourceError::MalformedResponse { .. })));
    }

    #[test]
    fn missing_explanation_is_malformed() {
        let err = parse_mood_content(r#"{"tag": "jazz"}"#);
        assert!(matches!(err, Err(SourceError::MalformedResponse { .. })));
    }
}
