//! Component models for the canvas.
//!
//! This module provides the two supported circuit elements:
//! - Sources: Voltage Source
//! - Linear: Resistor
//!
//! Each [`Component`] carries a [`Properties`] variant holding only the
//! fields its kind uses, so a resistor can never carry a voltage.

mod linear;
mod sources;

pub use linear::Resistor;
pub use sources::VoltageSource;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::circuit::{ComponentId, Point, Terminal};
use crate::error::{CanvasError, Result};

/// Kinds of component that can be placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    VoltageSource,
    Resistor,
}

impl ComponentKind {
    /// Human-readable label, also the default component label.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::VoltageSource => "Voltage Source",
            ComponentKind::Resistor => "Resistor",
        }
    }

    /// Lowercase, dash-separated form used as the id prefix.
    pub fn slug(&self) -> &'static str {
        match self {
            ComponentKind::VoltageSource => "voltage-source",
            ComponentKind::Resistor => "resistor",
        }
    }

    /// Terminals of this kind, left edge first.
    pub fn terminals(&self) -> [Terminal; 2] {
        match self {
            ComponentKind::VoltageSource => VoltageSource::TERMINALS,
            ComponentKind::Resistor => Resistor::TERMINALS,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComponentKind {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "voltage-source" | "source" | "vs" | "v" => Ok(ComponentKind::VoltageSource),
            "resistor" | "r" => Ok(ComponentKind::Resistor),
            _ => Err(CanvasError::UnknownComponentKind {
                label: s.to_string(),
            }),
        }
    }
}

/// Kind-specific component properties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Properties {
    VoltageSource(VoltageSource),
    Resistor(Resistor),
}

impl Properties {
    /// Default properties for a freshly added component.
    pub fn defaults(kind: ComponentKind, voltage: f64, resistance: f64) -> Self {
        match kind {
            ComponentKind::VoltageSource => Properties::VoltageSource(VoltageSource::new(voltage)),
            ComponentKind::Resistor => Properties::Resistor(Resistor::new(resistance)),
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Properties::VoltageSource(_) => ComponentKind::VoltageSource,
            Properties::Resistor(_) => ComponentKind::Resistor,
        }
    }
}

/// A partial property update.
///
/// `None` fields are left untouched. Naming a field the target kind does not
/// carry rejects the whole patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyPatch {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub voltage: Option<f64>,
    #[serde(default)]
    pub resistance: Option<f64>,
}

impl PropertyPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_voltage(mut self, voltage: f64) -> Self {
        self.voltage = Some(voltage);
        self
    }

    pub fn with_resistance(mut self, resistance: f64) -> Self {
        self.resistance = Some(resistance);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.voltage.is_none() && self.resistance.is_none()
    }
}

/// A circuit element placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub label: String,
    /// Top-left corner of the component box
    pub position: Point,
    pub properties: Properties,
}

impl Component {
    /// Create a component with the given id, position and properties.
    /// The label defaults to the kind label.
    pub fn new(id: ComponentId, position: Point, properties: Properties) -> Self {
        Self {
            id,
            label: properties.kind().label().to_string(),
            position,
            properties,
        }
    }

    /// Get the component kind.
    pub fn kind(&self) -> ComponentKind {
        self.properties.kind()
    }

    /// Whether `terminal` belongs to this component's kind.
    pub fn has_terminal(&self, terminal: Terminal) -> bool {
        self.kind().terminals().contains(&terminal)
    }

    /// Source voltage, if this is a voltage source.
    pub fn voltage(&self) -> Option<f64> {
        match &self.properties {
            Properties::VoltageSource(v) => Some(v.voltage),
            Properties::Resistor(_) => None,
        }
    }

    /// Resistance, if this is a resistor.
    pub fn resistance(&self) -> Option<f64> {
        match &self.properties {
            Properties::Resistor(r) => Some(r.resistance),
            Properties::VoltageSource(_) => None,
        }
    }

    /// Check the patch against this component's kind without applying it.
    pub fn check_patch(&self, patch: &PropertyPatch) -> Result<()> {
        let kind = self.kind();
        match kind {
            ComponentKind::VoltageSource if patch.resistance.is_some() => {
                Err(CanvasError::PropertyMismatch {
                    kind: kind.label(),
                    field: "resistance",
                })
            }
            ComponentKind::Resistor if patch.voltage.is_some() => Err(CanvasError::PropertyMismatch {
                kind: kind.label(),
                field: "voltage",
            }),
            _ => Ok(()),
        }
    }

    /// Merge a property patch, preserving unspecified fields.
    pub fn apply_patch(&mut self, patch: &PropertyPatch) -> Result<()> {
        self.check_patch(patch)?;

        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        match &mut self.properties {
            Properties::VoltageSource(v) => {
                if let Some(voltage) = patch.voltage {
                    v.voltage = voltage;
                }
            }
            Properties::Resistor(r) => {
                if let Some(resistance) = patch.resistance {
                    r.resistance = resistance;
                }
            }
        }
        Ok(())
    }
}
