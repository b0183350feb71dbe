//! Proxy module
//!
//! Routing decisions, header construction, Copilot credential exchange, and
//! the forwarding core shared by all provider routes.

pub mod copilot;
pub mod headers;
pub mod relay;
pub mod routing;
pub mod token_cache;

pub use copilot::CopilotAuth;
pub use relay::{relay, ProviderTarget};
pub use token_cache::TokenCache;
