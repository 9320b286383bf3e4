//! Topology analysis.
//!
//! The analyzer does not solve the circuit. It builds the component
//! adjacency from the wires, decides whether the circuit is a single series
//! loop or something else, and applies Ohm's law to the combined resistance:
//!
//! ```text
//! Series:           R = R1 + R2 + ... + Rn
//! Parallel/Complex: R = 1 / (1/R1 + 1/R2 + ... + 1/Rn)
//! I = V / R   (0 when R = 0)
//! P = V * I
//! ```
//!
//! General nodal analysis is out of reach on purpose; anything that is not
//! degree-2 everywhere is treated as a parallel bank across the source.

mod analyzer;
mod topology;

pub use analyzer::{analyze_circuit, DisplayResult, ResistorReading, SimulationResult};
pub use topology::{classify, Adjacency, Topology};
