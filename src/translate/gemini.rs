//! OpenAI-to-Gemini body translation
//!
//! Gemini has no system role and rejects consecutive same-role turns, so
//! system messages fold into user turns and strictly-adjacent runs of the
//! same mapped role merge into a single multi-part turn. Sampling parameters
//! map onto `generationConfig`; presence/frequency penalties have no Gemini
//! equivalent and are dropped.

use serde::{Deserialize, Serialize};

/// Inbound OpenAI-style chat body
#[derive(Debug, Clone, Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    pub model: Option<String>,
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub top_p: Option<f64>,
    #[serde(default)]
    pub presence_penalty: Option<f64>,
    #[serde(default)]
    pub frequency_penalty: Option<f64>,
    #[serde(default)]
    pub stream: Option<bool>,
}

/// One inbound chat message
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Gemini generation request body
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One Gemini conversation turn
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

/// One content part within a turn
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Part {
    pub text: String,
}

/// Gemini sampling parameters
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(rename = "topP", skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

/// Map an OpenAI role onto Gemini's role set. Unknown roles pass through.
pub fn map_role(role: &str) -> &str {
    match role {
        "assistant" => "model",
        "system" => "user",
        other => other,
    }
}

/// Translate an OpenAI-style chat body into a Gemini generation request
pub fn translate_chat_body(body: &ChatBody) -> GeminiRequest {
    let mut contents: Vec<Content> = Vec::new();

    for message in &body.messages {
        let role = map_role(&message.role);
        let part = Part {
            text: message.content.clone(),
        };

        match contents.last_mut() {
            Some(turn) if turn.role == role => turn.parts.push(part),
            _ => contents.push(Content {
                role: role.to_string(),
                parts: vec![part],
            }),
        }
    }

    let generation_config = if body.temperature.is_some() || body.top_p.is_some() {
        Some(GenerationConfig {
            temperature: body.temperature,
            top_p: body.top_p,
        })
    } else {
        None
    };

    GeminiRequest {
        contents,
        generation_config,
    }
}
