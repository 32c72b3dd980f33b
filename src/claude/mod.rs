//! Claude API integration
//!
//! Provides API key management, the HTTP client with streaming support,
//! and the Claude-backed question supply.

pub mod auth;
pub mod client;
pub mod error;
pub mod generator;
pub mod models;
pub mod streaming;

pub use auth::ApiKeyManager;
pub use client::ClaudeClient;
pub use error::ClaudeError;
pub use generator::ClaudeSupply;
pub use models::{ClaudeModel, CreateMessageRequest, Message, Role};
