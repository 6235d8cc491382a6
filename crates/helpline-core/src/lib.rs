//! helpline-core: Headless core for the helpline support-chat client
//!
//! This crate provides everything below the terminal layer:
//! - Conversation state (append-only turn sequence)
//! - Chat service client for the `POST /chat` exchange
//! - Configuration loading and endpoint resolution

pub mod client;
pub mod config;
pub mod conversation;

// Re-export commonly used types
pub use client::{ChatClient, ChatReply, ChatRequest, ClientError, UNREACHABLE_REPLY};
pub use config::{Config, ConfigError, ENDPOINT_ENV_VAR};
pub use conversation::{Conversation, Sender, Turn};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
