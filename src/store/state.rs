//! Immutable snapshot of the editor state.

use serde::Serialize;

use super::wiring::WiringState;
use crate::circuit::{validate_circuit, ComponentId, ValidationReport, Wire, WireId};
use crate::analysis::{analyze_circuit, SimulationResult};
use crate::components::Component;

/// What the user has selected. A component and a wire can never both be
/// selected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Selection {
    #[default]
    None,
    Component(ComponentId),
    Wire(WireId),
}

impl Selection {
    pub fn component(&self) -> Option<&ComponentId> {
        match self {
            Selection::Component(id) => Some(id),
            _ => None,
        }
    }

    pub fn wire(&self) -> Option<&WireId> {
        match self {
            Selection::Wire(id) => Some(id),
            _ => None,
        }
    }
}

/// Everything the presentation layer renders from.
///
/// The store swaps in a whole new `CircuitState` per mutation, so an
/// observer never sees a half-applied change.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CircuitState {
    pub components: Vec<Component>,
    pub wires: Vec<Wire>,
    pub selection: Selection,
    pub wiring: WiringState,
}

impl CircuitState {
    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| c.id == *id)
    }

    pub fn wire(&self, id: &WireId) -> Option<&Wire> {
        self.wires.iter().find(|w| w.id == *id)
    }

    pub(crate) fn component_mut(&mut self, id: &ComponentId) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.id == *id)
    }

    /// Validate the circuit held by this snapshot.
    pub fn validate(&self) -> ValidationReport {
        validate_circuit(&self.components, &self.wires)
    }

    /// Analyze the circuit held by this snapshot.
    pub fn analyze(&self) -> Option<SimulationResult> {
        analyze_circuit(&self.components, &self.wires)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_accessors() {
        let sel = Selection::Component(ComponentId::from("resistor-1"));
        assert_eq!(sel.component().map(|c| c.as_str()), Some("resistor-1"));
        assert!(sel.wire().is_none());
        assert!(Selection::None.component().is_none());
    }

    #[test]
    fn test_selection_serializes_tagged() {
        let json = serde_json::to_value(Selection::Wire(WireId::from("wire-2"))).unwrap();
        assert_eq!(json["kind"], "wire");
        assert_eq!(json["id"], "wire-2");
    }
}
