//! Error types for the few fallible edges of the overlay engine.
//!
//! Rendering and highlighting never fail: missing markers, unresolvable carets and empty
//! queries all degrade to a "draw nothing" outcome. Errors only surface where the host hands
//! us something that must be parsed (regex queries, JSON configuration).

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced by the search matcher.
pub enum SearchError {
    #[error("invalid regex: {0}")]
    /// The provided regex pattern failed to compile.
    InvalidRegex(#[from] regex::Error),
}

#[derive(Debug, Error)]
/// Errors produced while loading an [`OverlayConfig`](crate::OverlayConfig).
pub enum ConfigError {
    #[error("config parse error: {0}")]
    /// The JSON payload could not be deserialized.
    Parse(#[from] serde_json::Error),

    #[error("invalid tick spacing: {0}")]
    /// Tick intervals must be positive and nested (`minor | labeled | major`).
    InvalidTickSpacing(&'static str),
}
