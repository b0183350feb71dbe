//! Model availability table
//!
//! Static model defaults merged with the `CUSTOM_MODELS` override string,
//! plus the per-request allow-list check that can refuse explicitly disabled
//! models before a request ever reaches an upstream provider.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::warn;

/// Models known to the proxy by default, all available unless overridden
pub const DEFAULT_MODELS: &[&str] = &[
    "gpt-3.5-turbo",
    "gpt-3.5-turbo-16k",
    "gpt-4",
    "gpt-4-32k",
    "gpt-4-turbo-preview",
    "gpt-4-vision-preview",
    "gemini-pro",
];

/// Availability entry for one model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelEntry {
    pub available: bool,
}

/// Just the field the allow-list check needs from a chat body
#[derive(Debug, Deserialize)]
struct ModelField {
    model: Option<String>,
}

/// Merge the static defaults with a comma-separated override string.
///
/// Override tokens: `-name` disables a model, `+name` or `name` enables one
/// (inserting it if unknown), and `-all` / `+all` / `all` flip every default
/// at once. Tokens apply left to right.
pub fn collect_model_table(custom_models: &str) -> HashMap<String, ModelEntry> {
    let mut table: HashMap<String, ModelEntry> = DEFAULT_MODELS
        .iter()
        .map(|name| (name.to_string(), ModelEntry { available: true }))
        .collect();

    for token in custom_models.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let (available, name) = match token.strip_prefix('-') {
            Some(rest) => (false, rest),
            None => (true, token.strip_prefix('+').unwrap_or(token)),
        };

        if name == "all" {
            for entry in table.values_mut() {
                entry.available = available;
            }
        } else {
            table.insert(name.to_string(), ModelEntry { available });
        }
    }

    table
}

/// Inspect a buffered request body and return the model name when the body
/// parses and names a model whose availability is explicitly `false`.
///
/// Anything else, including malformed JSON and models absent from the table,
/// yields `None`: the check only ever blocks, it never validates.
pub fn find_disabled_model(body: &[u8], table: &HashMap<String, ModelEntry>) -> Option<String> {
    let parsed: ModelField = match serde_json::from_slice(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "Model filter could not parse request body, allowing");
            return None;
        }
    };

    let model = parsed.model?;
    match table.get(&model) {
        Some(entry) if !entry.available => Some(model),
        _ => None,
    }
}
