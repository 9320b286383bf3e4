//! # Circuit Canvas
//!
//! The state and analysis core of a schematic editor for simple DC circuits.
//!
//! This library provides:
//! - A graph store owning components, wires, selection and the wiring gesture
//! - Terminal geometry for drawing wires on a canvas
//! - Structural and property validation
//! - A topology-based Ohm's-law analyzer (series vs. parallel)
//! - A line-oriented session script to drive the store headless
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`circuit`] - Ids, terminals, wires, geometry and validation
//! - [`components`] - Voltage source and resistor models
//! - [`store`] - The graph store and wiring state machine
//! - [`analysis`] - Topology classification and current/power computation
//! - [`script`] - Parser and runner for session scripts
//! - [`config`] - Canvas configuration
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! circuit-canvas series.canvas --json
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmCircuitEditor } from 'circuit_canvas';
//!
//! const editor = new WasmCircuitEditor();
//! const source = editor.add_component("Voltage Source");
//! ```
//!
//! ### Library
//!
//! ```
//! use circuit_canvas::{CircuitStore, ComponentKind, Endpoint, Terminal, Topology};
//!
//! let mut store = CircuitStore::new();
//! let v = store.add_component(ComponentKind::VoltageSource);
//! let r = store.add_component(ComponentKind::Resistor);
//!
//! store.start_wiring(Endpoint::new(v.clone(), Terminal::Positive)).unwrap();
//! store.complete_wiring(Endpoint::new(r.clone(), Terminal::Input));
//! store.start_wiring(Endpoint::new(r.clone(), Terminal::Output)).unwrap();
//! store.complete_wiring(Endpoint::new(v.clone(), Terminal::Negative));
//!
//! assert!(store.validate_circuit().is_valid());
//! let result = store.analyze_circuit().unwrap();
//! assert_eq!(result.topology, Topology::Series);
//! assert_eq!(result.display().current, "0.0500");
//! ```

pub mod analysis;
pub mod circuit;
pub mod components;
pub mod config;
pub mod error;
pub mod script;
pub mod store;

// Re-export main types for convenience
pub use analysis::{analyze_circuit, SimulationResult, Topology};
pub use circuit::{
    validate_circuit, ComponentId, Endpoint, Point, Terminal, ValidationReport, Wire, WireId,
};
pub use components::{Component, ComponentKind, PropertyPatch};
pub use config::CanvasConfig;
pub use error::{CanvasError, Result};
pub use store::{CircuitState, CircuitStore, Selection, WiringOutcome, WiringState};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuitEditor;

/// Default component box width in canvas units
pub const DEFAULT_COMPONENT_WIDTH: f64 = 120.0;

/// Default component box height in canvas units
pub const DEFAULT_COMPONENT_HEIGHT: f64 = 50.0;

/// Voltage of a newly added source (volts)
pub const DEFAULT_VOLTAGE: f64 = 5.0;

/// Resistance of a newly added resistor (ohms)
pub const DEFAULT_RESISTANCE: f64 = 100.0;
