//! Error types for the circuit canvas.
//!
//! This module provides a unified error type [`CanvasError`] for every
//! operation that can be rejected outright: explicit mutations that name an
//! unknown component or wire, malformed property patches, bad configuration,
//! and session script failures.
//!
//! Circuit validation problems are *not* errors. They are reported as
//! [`ValidationIssue`](crate::circuit::ValidationIssue) values so the editor can
//! show them next to the canvas.

use thiserror::Error;

/// Result type alias using [`CanvasError`].
pub type Result<T> = std::result::Result<T, CanvasError>;

/// Unified error type for all canvas operations.
#[derive(Error, Debug)]
pub enum CanvasError {
    // ============ Graph Errors ============
    /// Unknown component kind label
    #[error("Unknown component kind '{label}' (expected 'Voltage Source' or 'Resistor')")]
    UnknownComponentKind { label: String },

    /// Unknown terminal name
    #[error("Unknown terminal '{name}' (expected positive, negative, input or output)")]
    UnknownTerminal { name: String },

    /// Component not found in the store
    #[error("Component '{id}' not found")]
    ComponentNotFound { id: String },

    /// Wire not found in the store
    #[error("Wire '{id}' not found")]
    WireNotFound { id: String },

    /// Property patch names a field the component kind does not carry
    #[error("{kind} has no '{field}' property")]
    PropertyMismatch { kind: &'static str, field: &'static str },

    /// Terminal does not exist on the component's kind
    #[error("{kind} has no '{terminal}' terminal")]
    TerminalMismatch { kind: &'static str, terminal: &'static str },

    // ============ Configuration Errors ============
    /// Invalid canvas configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ============ Script Errors ============
    /// Error while parsing a session script
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Script refers to an alias that was never bound
    #[error("Unknown reference '{name}' at line {line}")]
    UnknownAlias { line: usize, name: String },

    /// A script command failed against the store
    #[error("Line {line}: {source}")]
    CommandFailed {
        line: usize,
        #[source]
        source: Box<CanvasError>,
    },

    // ============ I/O Errors ============
    /// Failed to encode output as JSON
    #[error("Failed to encode JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error reading a script file
    #[error("Failed to read script '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CanvasError {
    /// Create a component-not-found error
    pub fn component_not_found(id: impl Into<String>) -> Self {
        Self::ComponentNotFound { id: id.into() }
    }

    /// Create a wire-not-found error
    pub fn wire_not_found(id: impl Into<String>) -> Self {
        Self::WireNotFound { id: id.into() }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Attach a script line number to an error raised by the store.
    pub fn at_line(self, line: usize) -> Self {
        match self {
            // Already positioned
            Self::ParseError { .. } | Self::UnknownAlias { .. } | Self::CommandFailed { .. } => self,
            other => Self::CommandFailed {
                line,
                source: Box::new(other),
            },
        }
    }
}
