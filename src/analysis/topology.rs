//! Series / parallel classification from the wire graph.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::circuit::{ComponentId, Wire};
use crate::components::Component;

/// How the resistors are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Topology {
    #[serde(rename = "Series")]
    Series,
    #[serde(rename = "Parallel/Complex")]
    ParallelComplex,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Series => f.write_str("Series"),
            Topology::ParallelComplex => f.write_str("Parallel/Complex"),
        }
    }
}

/// Undirected component adjacency. Parallel edges are kept: every wire adds
/// one neighbor entry in each direction.
#[derive(Debug, Clone, Default)]
pub struct Adjacency<'a> {
    neighbors: HashMap<&'a ComponentId, Vec<&'a ComponentId>>,
}

impl<'a> Adjacency<'a> {
    pub fn build(components: &'a [Component], wires: &'a [Wire]) -> Self {
        let mut neighbors: HashMap<&ComponentId, Vec<&ComponentId>> =
            components.iter().map(|c| (&c.id, Vec::new())).collect();

        for wire in wires {
            let (a, b) = (&wire.from.component, &wire.to.component);
            neighbors.entry(a).or_default().push(b);
            neighbors.entry(b).or_default().push(a);
        }

        Self { neighbors }
    }

    /// Number of neighbor entries for a component (0 if unknown).
    pub fn degree(&self, id: &ComponentId) -> usize {
        self.neighbors(id).len()
    }

    /// Components wired to `id`, one entry per wire.
    pub fn neighbors(&self, id: &ComponentId) -> &[&'a ComponentId] {
        self.neighbors.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Series iff every component has exactly two neighbor entries.
///
/// This is a degree heuristic, not a proof: e.g. two parallel pairs wired
/// end-to-end in a loop also have degree two everywhere.
pub fn classify(components: &[Component], adjacency: &Adjacency<'_>) -> Topology {
    if components.iter().all(|c| adjacency.degree(&c.id) == 2) {
        Topology::Series
    } else {
        Topology::ParallelComplex
    }
}
