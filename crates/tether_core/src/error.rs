//! Bridge error types

use thiserror::Error;

/// Errors raised inside the input pipeline
///
/// None of these are fatal. Queue tasks report them and the drain loop keeps
/// going; configuration errors surface to whoever loads the config.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// A queued task reported a failure
    #[error("Queued task failed: {0}")]
    TaskFailed(String),

    /// A queued task panicked while running on the render thread
    #[error("Queued task panicked: {0}")]
    TaskPanicked(String),

    /// A motion event referenced a pointer index it does not carry
    #[error("Pointer index {index} out of range ({count} pointers)")]
    InvalidPointerIndex { index: usize, count: usize },

    /// Failed to read a configuration file
    #[error("Failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// Failed to parse a configuration document
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Generic bridge error
    #[error("Bridge error: {0}")]
    Other(String),
}

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
