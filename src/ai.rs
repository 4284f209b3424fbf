//! The external generation service.
//!
//! Everything creative on the site — one-off kaomoji, variations of an
//! existing face, descriptions, category summaries, and multi-line text
//! art — is delegated to an OpenAI-compatible chat-completions endpoint.
//! The endpoint is an opaque collaborator: prompt in, string out, can fail.
//! No streaming, no retries; a failure is surfaced once to the caller.
//!
//! [`GenerationService`] is the seam. Production uses
//! [`HttpGenerationService`] (blocking reqwest); tests use
//! [`ScriptedGenerationService`].

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Settings for the generation endpoint, loaded from the `[ai]` section of
/// `config.toml`. The API key is read from the environment, never from the
/// config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AiConfig {
    /// Base URL of an OpenAI-compatible API.
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Request timeout. The upstream service has none; 30s keeps a hung
    /// request from wedging the CLI.
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("AI features are unavailable because {0} is not set")]
    MissingKey(String),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Request timeout after {0} seconds")]
    Timeout(u64),
    #[error("The AI response format was invalid: {0}")]
    InvalidResponse(String),
    #[error("The AI returned an empty response")]
    Empty,
}

/// The five creative operations the site delegates out.
///
/// Implementations must be deterministic about failure: an unusable or
/// empty response is an `Err`, never a silently degraded `Ok`.
pub trait GenerationService {
    /// One new kaomoji for a free-text prompt.
    fn generate_kaomoji(&self, prompt: &str) -> Result<String, GenerationError>;
    /// Around four variations of an existing kaomoji. Fails when zero
    /// usable variations come back.
    fn generate_variations(&self, seed: &str) -> Result<Vec<String>, GenerationError>;
    /// One-to-two sentence description of a kaomoji's meaning and usage.
    fn generate_description(&self, value: &str) -> Result<String, GenerationError>;
    /// Paragraph summary of a category's tone and use cases.
    fn generate_category_summary(&self, label: &str) -> Result<String, GenerationError>;
    /// Multi-line text art; every line padded or trimmed to `line_width`
    /// characters.
    fn generate_art(&self, prompt: &str, line_width: usize) -> Result<String, GenerationError>;
}

/// Blocking client for an OpenAI-compatible chat-completions API.
pub struct HttpGenerationService {
    config: AiConfig,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl HttpGenerationService {
    /// Build a client from config. Fails up front when the key variable is
    /// unset so every subcommand reports the same clear message.
    pub fn new(config: AiConfig) -> Result<Self, GenerationError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| GenerationError::MissingKey(config.api_key_env.clone()))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Http(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// One chat round-trip: system + user message, plain text back.
    fn run_chat(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String, GenerationError> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        );
        let body = serde_json::json!({
            "model": self.config.model,
            "temperature": temperature,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout(self.config.timeout_secs)
                } else {
                    GenerationError::Http(format!("request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            return Err(GenerationError::Http(format!(
                "HTTP {} from generation endpoint",
                response.status()
            )));
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| GenerationError::InvalidResponse(format!("bad response body: {e}")))?;

        let text = json
            .get("choices")
            .and_then(|v| v.get(0))
            .and_then(|v| v.get("message"))
            .and_then(|v| v.get("content"))
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(GenerationError::Empty)?;

        Ok(text.to_string())
    }
}

/// Strip markdown code fences models add despite instructions.
fn sanitize_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

fn parse_json_field(text: &str, field: &str) -> Result<serde_json::Value, GenerationError> {
    let json: serde_json::Value = serde_json::from_str(&sanitize_fences(text))
        .map_err(|e| GenerationError::InvalidResponse(format!("not valid JSON: {e}")))?;
    json.get(field)
        .cloned()
        .ok_or_else(|| GenerationError::InvalidResponse(format!("missing {field:?} field")))
}

fn parse_string_field(text: &str, field: &str) -> Result<String, GenerationError> {
    let value = parse_json_field(text, field)?;
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| GenerationError::InvalidResponse(format!("{field:?} is not a string")))
}

/// Pad or trim every line of `art` to exactly `line_width` characters.
///
/// The model is asked for exact-width lines but rarely complies, so the
/// contract is enforced here.
pub fn normalize_art(art: &str, line_width: usize) -> String {
    art.lines()
        .map(|line| {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() >= line_width {
                chars[..line_width].iter().collect::<String>()
            } else {
                let mut padded: String = chars.iter().collect();
                padded.push_str(&" ".repeat(line_width - chars.len()));
                padded
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl GenerationService for HttpGenerationService {
    fn generate_kaomoji(&self, prompt: &str) -> Result<String, GenerationError> {
        let text = self.run_chat(
            "You craft playful kaomojis. Always reply with strict JSON: \
             {\"kaomoji\": \"<value>\"} and nothing else.",
            &format!("Generate a single, unique kaomoji based on this description: \"{prompt}\"."),
            0.85,
        )?;
        parse_string_field(&text, "kaomoji")
    }

    fn generate_variations(&self, seed: &str) -> Result<Vec<String>, GenerationError> {
        let text = self.run_chat(
            "You invent kaomoji variations. Always return JSON: \
             {\"variations\": [\"...\"]} with exactly four unique entries.",
            &format!("Create four creative kaomoji based on \"{seed}\". Do not repeat the original kaomoji."),
            0.8,
        )?;
        let value = parse_json_field(&text, "variations")?;
        let variations: Vec<String> = value
            .as_array()
            .ok_or_else(|| {
                GenerationError::InvalidResponse("\"variations\" is not an array".to_string())
            })?
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::trim)
            .filter(|v| v.chars().count() > 1)
            .map(str::to_string)
            .collect();
        if variations.is_empty() {
            return Err(GenerationError::Empty);
        }
        Ok(variations)
    }

    fn generate_description(&self, value: &str) -> Result<String, GenerationError> {
        let text = self.run_chat(
            "You explain kaomoji meanings. Always return JSON: \
             {\"description\": \"<text>\"} describing emotion and usage in 1-2 sentences.",
            &format!("Describe the kaomoji \"{value}\"."),
            0.65,
        )?;
        parse_string_field(&text, "description")
    }

    fn generate_category_summary(&self, label: &str) -> Result<String, GenerationError> {
        let text = self.run_chat(
            "You summarize kaomoji categories. Always return JSON: \
             {\"description\": \"<text>\"} capturing tone, use cases, and vibe.",
            &format!("Explain what the \"{label}\" kaomoji category represents in one paragraph."),
            0.65,
        )?;
        parse_string_field(&text, "description")
    }

    fn generate_art(&self, prompt: &str, line_width: usize) -> Result<String, GenerationError> {
        let text = self.run_chat(
            &format!(
                "You are an expert ASCII/Unicode artist. ONLY output the art itself without \
                 code fences. Every line must be exactly {line_width} characters wide."
            ),
            &format!(
                "Create a multi-line text illustration using symbols, kaomojis, and emojis \
                 inspired by: \"{prompt}\". Use spaces to pad lines to {line_width} characters."
            ),
            0.55,
        )?;
        let art = text.replace("```", "");
        let art = art.trim();
        if art.is_empty() {
            return Err(GenerationError::Empty);
        }
        Ok(normalize_art(art, line_width))
    }
}

/// Deterministic service double: answers from a fixed script, in order,
/// repeating the last response once the script runs out.
#[derive(Default)]
pub struct ScriptedGenerationService {
    responses: std::sync::Mutex<Vec<Result<String, GenerationError>>>,
    calls: std::sync::Mutex<usize>,
}

impl ScriptedGenerationService {
    pub fn new(responses: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses),
            calls: std::sync::Mutex::new(0),
        }
    }

    pub fn always(value: &str) -> Self {
        Self::new(vec![Ok(value.to_string())])
    }

    pub fn always_error(error: GenerationError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn next(&self) -> Result<String, GenerationError> {
        *self.calls.lock().unwrap() += 1;
        let mut responses = self.responses.lock().unwrap();
        match responses.len() {
            0 => Err(GenerationError::Empty),
            1 => responses[0].clone(),
            _ => responses.remove(0),
        }
    }
}

impl GenerationService for ScriptedGenerationService {
    fn generate_kaomoji(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.next()
    }

    fn generate_variations(&self, _seed: &str) -> Result<Vec<String>, GenerationError> {
        self.next().map(|joined| {
            joined
                .split('\n')
                .map(str::to_string)
                .collect()
        })
    }

    fn generate_description(&self, _value: &str) -> Result<String, GenerationError> {
        self.next()
    }

    fn generate_category_summary(&self, _label: &str) -> Result<String, GenerationError> {
        self.next()
    }

    fn generate_art(&self, _prompt: &str, line_width: usize) -> Result<String, GenerationError> {
        self.next().map(|art| normalize_art(&art, line_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn parse_string_field_strips_fences() {
        let text = "```json\n{\"kaomoji\": \"(^ω^)\"}\n```";
        assert_eq!(parse_string_field(text, "kaomoji").unwrap(), "(^ω^)");
    }

    #[test]
    fn parse_string_field_rejects_missing_field() {
        let err = parse_string_field("{\"other\": 1}", "kaomoji").unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }

    #[test]
    fn parse_string_field_rejects_non_json() {
        let err = parse_string_field("not json at all", "kaomoji").unwrap_err();
        assert!(matches!(err, GenerationError::InvalidResponse(_)));
    }

    #[test]
    fn normalize_art_pads_short_lines() {
        let art = normalize_art("ab\ncdef", 4);
        assert_eq!(art, "ab  \ncdef");
    }

    #[test]
    fn normalize_art_trims_long_lines() {
        let art = normalize_art("abcdefgh", 4);
        assert_eq!(art, "abcd");
    }

    #[test]
    fn normalize_art_counts_chars_not_bytes() {
        let art = normalize_art("★★", 4);
        assert_eq!(art.chars().count(), 4);
        assert!(art.starts_with("★★"));
    }

    #[test]
    fn scripted_service_replays_in_order() {
        let service = ScriptedGenerationService::new(vec![
            Ok("(^ω^)".to_string()),
            Err(GenerationError::Empty),
        ]);
        assert_eq!(service.generate_kaomoji("x").unwrap(), "(^ω^)");
        assert!(service.generate_kaomoji("x").is_err());
        assert_eq!(service.call_count(), 2);
    }

    #[test]
    fn scripted_service_repeats_last_response() {
        let service = ScriptedGenerationService::always("(・o・)");
        assert_eq!(service.generate_kaomoji("a").unwrap(), "(・o・)");
        assert_eq!(service.generate_kaomoji("b").unwrap(), "(・o・)");
    }
}
