//! Wires between component terminals.

use serde::{Deserialize, Serialize};

use super::types::{ComponentId, Endpoint, WireId};

/// An undirected connection between two terminals.
///
/// `from`/`to` record the order the wire was drawn in, but equality of
/// connections is always checked on the unordered pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wire {
    pub id: WireId,
    pub from: Endpoint,
    pub to: Endpoint,
}

impl Wire {
    /// Create a new wire.
    pub fn new(id: WireId, from: Endpoint, to: Endpoint) -> Self {
        Self { id, from, to }
    }

    /// Check if either end of this wire sits on the given component.
    pub fn involves(&self, component: &ComponentId) -> bool {
        self.from.component == *component || self.to.component == *component
    }

    /// Check if this wire joins `a` and `b`, in either direction.
    pub fn connects(&self, a: &Endpoint, b: &Endpoint) -> bool {
        (self.from == *a && self.to == *b) || (self.from == *b && self.to == *a)
    }

    /// Both endpoint component ids.
    pub fn components(&self) -> [&ComponentId; 2] {
        [&self.from.component, &self.to.component]
    }
}
