//! Gemini `generateContent` wire types

use serde::{Deserialize, Serialize};

use super::GenerationConfig;

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfigBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfigBody {
    pub temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
}

impl GenerateContentRequest {
    /// Single-turn user prompt
    pub fn new(prompt: &str, config: &GenerationConfig) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfigBody {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One part of a content block; non-text parts decode with `text: None`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(rename = "finishReason", default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Response of a generation call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Generation {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl Generation {
    /// Build a response holding a single text candidate
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: vec![Part {
                        text: Some(text.into()),
                    }],
                }),
                finish_reason: Some("STOP".to_string()),
            }],
        }
    }

    /// Text of the first part of the first candidate, if it is non-empty text
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builds_correctly() {
        let config = GenerationConfig {
            temperature: 0.25,
            max_output_tokens: 512,
        };
        let json = serde_json::to_value(GenerateContentRequest::new("Hello", &config)).unwrap();
        assert_eq!(
            json,
            json!({
                "contents": [{"role": "user", "parts": [{"text": "Hello"}]}],
                "generationConfig": {"temperature": 0.25, "maxOutputTokens": 512}
            })
        );
    }

    #[test]
    fn test_first_text_from_api_response() {
        let generation: Generation = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hi there"}, {"text": "ignored"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"totalTokenCount": 9}
        }))
        .unwrap();
        assert_eq!(generation.first_text(), Some("Hi there"));
    }

    #[test]
    fn test_first_text_missing() {
        let blocked: Generation = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        assert_eq!(blocked.first_text(), None);

        let no_content: Generation =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert_eq!(no_content.first_text(), None);

        let inline_data: Generation = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"inlineData": {"mimeType": "image/png"}}]}}]
        }))
        .unwrap();
        assert_eq!(inline_data.first_text(), None);

        assert_eq!(Generation::from_text("").first_text(), None);
    }
}
