//! Common types and utilities for Apicanon
//!
//! This crate contains the canonical API model, error types, and the
//! spec-store capability shared by the parser, generator, and CLI components.

mod model;
mod store;

pub use model::*;
pub use store::{MemorySpecStore, SpecStore};

use thiserror::Error;

/// Errors that can occur while canonicalizing a document or generating artifacts
#[derive(Error, Debug)]
pub enum CanonError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Endpoint not found: {0}")]
    EndpointNotFound(String),

    #[error("Schema not found: {0}")]
    SchemaNotFound(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for apicanon operations
pub type Result<T> = std::result::Result<T, CanonError>;
