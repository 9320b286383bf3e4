//! Core types for circuit representation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CanvasError;

/// A unique identifier for a component on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub String);

impl ComponentId {
    /// Borrow the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A unique identifier for a wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireId(pub String);

impl WireId {
    /// Borrow the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WireId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for WireId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Which edge of a component's box a terminal sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A connection point on a component.
///
/// Voltage sources expose `Positive`/`Negative`, resistors `Input`/`Output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminal {
    Positive,
    Negative,
    Input,
    Output,
}

impl Terminal {
    /// Edge of the component box this terminal is drawn on.
    pub fn side(&self) -> Side {
        match self {
            Terminal::Negative | Terminal::Input => Side::Left,
            Terminal::Positive | Terminal::Output => Side::Right,
        }
    }

    /// Lowercase name as used by the presentation layer.
    pub fn name(&self) -> &'static str {
        match self {
            Terminal::Positive => "positive",
            Terminal::Negative => "negative",
            Terminal::Input => "input",
            Terminal::Output => "output",
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Terminal {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "positive" | "pos" | "+" => Ok(Terminal::Positive),
            "negative" | "neg" | "-" => Ok(Terminal::Negative),
            "input" | "in" => Ok(Terminal::Input),
            "output" | "out" => Ok(Terminal::Output),
            _ => Err(CanvasError::UnknownTerminal {
                name: s.to_string(),
            }),
        }
    }
}

/// One end of a wire: a terminal on a specific component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(rename = "componentId")]
    pub component: ComponentId,
    pub terminal: Terminal,
}

impl Endpoint {
    /// Create a new endpoint.
    pub fn new(component: impl Into<ComponentId>, terminal: Terminal) -> Self {
        Self {
            component: component.into(),
            terminal,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.terminal)
    }
}

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by a delta.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
