//! Circuit validation.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use super::{ComponentId, Wire};
use crate::components::{Component, Properties};

/// A problem that prevents the circuit from being simulated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("No components in circuit")]
    NoComponents,

    #[error("Circuit requires at least one voltage source")]
    NoVoltageSource,

    #[error("No connections in circuit")]
    NoConnections,

    /// Components not referenced by any wire endpoint
    #[error("{count} component(s) not connected")]
    Unconnected { count: usize },

    #[error("{label} has invalid voltage value")]
    InvalidVoltage { id: ComponentId, label: String },

    #[error("{label} has invalid resistance value")]
    InvalidResistance { id: ComponentId, label: String },
}

/// Outcome of [`validate_circuit`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// User-facing messages, in check order.
    pub fn errors(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("ValidationReport", 2)?;
        s.serialize_field("isValid", &self.is_valid())?;
        s.serialize_field("errors", &self.errors())?;
        s.end()
    }
}

/// Validate a circuit for simulation.
///
/// Checks (all run, in this order):
/// - At least one component
/// - At least one voltage source
/// - At least one wire
/// - Every component touched by some wire
/// - Source voltages and resistances present and positive
pub fn validate_circuit(components: &[Component], wires: &[Wire]) -> ValidationReport {
    let mut issues = Vec::new();

    if components.is_empty() {
        issues.push(ValidationIssue::NoComponents);
    }

    if !components
        .iter()
        .any(|c| matches!(c.properties, Properties::VoltageSource(_)))
    {
        issues.push(ValidationIssue::NoVoltageSource);
    }

    if wires.is_empty() {
        issues.push(ValidationIssue::NoConnections);
    }

    let connected: HashSet<&ComponentId> = wires.iter().flat_map(|w| w.components()).collect();
    let isolated = components.iter().filter(|c| !connected.contains(&c.id)).count();
    if isolated > 0 {
        issues.push(ValidationIssue::Unconnected { count: isolated });
    }

    for component in components {
        if let Properties::VoltageSource(v) = &component.properties {
            if !v.is_valid() {
                issues.push(ValidationIssue::InvalidVoltage {
                    id: component.id.clone(),
                    label: component.label.clone(),
                });
            }
        }
    }

    for component in components {
        if let Properties::Resistor(r) = &component.properties {
            if !r.is_valid() {
                issues.push(ValidationIssue::InvalidResistance {
                    id: component.id.clone(),
                    label: component.label.clone(),
                });
            }
        }
    }

    ValidationReport { issues }
}
