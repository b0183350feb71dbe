//! Translation layer for provider-native request schemas
//!
//! The proxy speaks OpenAI's chat-completion shape on the inbound side; this
//! module converts that shape into provider-native bodies for upstreams that
//! do not accept it. Gemini is the only such provider today.

pub mod gemini;

pub use gemini::{translate_chat_body, ChatBody, ChatMessage};
