//! # Promptloom Core
//!
//! Domain types, traits, and error definitions for the Promptloom generation
//! engine. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Content nodes reference each other by id through an explicit lookup map
//! rather than by ownership, so the same store can back predecessor chains
//! and folder groupings at once. The model backend is defined here as a
//! trait; implementations live in `promptloom-providers`.

pub mod content;
pub mod error;
pub mod message;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use content::{Content, ContentMap, ContentMeta, ContextLinks, EditSpec};
pub use error::{Error, ProviderError, Result};
pub use message::{Message, Role};
pub use provider::{
    EmbeddingRequest, EmbeddingResponse, Provider, ProviderRequest, ProviderResponse, Usage,
};
