//! Error types for nnsketch operations.
//!
//! This module provides the main error type [`NnsketchError`] which wraps
//! the error conditions that can occur while turning a description into SVG.

use std::io;

use thiserror::Error;

use nnsketch_core::error::DrawError;

/// The main error type for nnsketch operations.
#[derive(Debug, Error)]
pub enum NnsketchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Description error: {0}")]
    Description(String),

    #[error("Drawing error: {0}")]
    Draw(#[from] DrawError),
}

impl From<toml::de::Error> for NnsketchError {
    fn from(err: toml::de::Error) -> Self {
        Self::Description(err.to_string())
    }
}
