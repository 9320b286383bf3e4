//! WASM bindings for Circuit Canvas.
//!
//! This module provides JavaScript-friendly bindings for a browser
//! presentation layer. Ids, kinds and terminals cross the boundary as
//! strings; snapshots and reports cross as JSON.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuitEditor } from 'circuit_canvas';
//!
//! await init();
//!
//! const editor = new WasmCircuitEditor();
//! const v = editor.add_component("Voltage Source");
//! const r = editor.add_component("Resistor");
//!
//! // Pointer down on a terminal, pointer move, pointer up on another terminal
//! editor.start_wiring(v, "positive");
//! editor.update_wire_draft(event.clientX, event.clientY);
//! editor.complete_wiring(r, "input");
//!
//! const state = JSON.parse(editor.snapshot_json());
//! const analysis = JSON.parse(editor.analyze_json()); // null if it cannot simulate
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::{ComponentId, Endpoint, Point, Terminal, WireId};
use crate::components::{ComponentKind, PropertyPatch};
use crate::config::CanvasConfig;
use crate::error::CanvasError;
use crate::store::{CircuitStore, WiringOutcome};

/// Initialize panic hook and console logging for the browser.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        log::warn!("console logger not installed: {}", e);
    }
}

fn to_js(e: CanvasError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn endpoint(component_id: &str, terminal: &str) -> Result<Endpoint, JsValue> {
    let terminal: Terminal = terminal.parse().map_err(to_js)?;
    Ok(Endpoint::new(component_id, terminal))
}

fn point_to_array(p: Point) -> Vec<f64> {
    vec![p.x, p.y]
}

/// WASM-compatible editor store.
///
/// This struct wraps the native [`CircuitStore`] and exposes the operations
/// the canvas UI dispatches.
#[wasm_bindgen]
pub struct WasmCircuitEditor {
    store: CircuitStore,
}

#[wasm_bindgen]
impl WasmCircuitEditor {
    /// Create an editor with the default 120x50 component size.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmCircuitEditor {
        WasmCircuitEditor {
            store: CircuitStore::new(),
        }
    }

    /// Create an editor whose components are drawn at a custom size.
    #[wasm_bindgen]
    pub fn with_component_size(width: f64, height: f64) -> Result<WasmCircuitEditor, JsValue> {
        let config = CanvasConfig::new().with_component_size(width, height);
        let store = CircuitStore::with_config(config).map_err(to_js)?;
        Ok(WasmCircuitEditor { store })
    }

    /// Add a component. `kind` is "Voltage Source" or "Resistor".
    /// Returns the new component id.
    #[wasm_bindgen]
    pub fn add_component(&mut self, kind: &str) -> Result<String, JsValue> {
        let kind: ComponentKind = kind.parse().map_err(to_js)?;
        Ok(self.store.add_component(kind).0)
    }

    /// Drag a component by a relative delta.
    #[wasm_bindgen]
    pub fn update_position(&mut self, id: &str, dx: f64, dy: f64) -> Result<(), JsValue> {
        self.store
            .update_position(&ComponentId::from(id), dx, dy)
            .map_err(to_js)
    }

    /// Merge a JSON patch such as `{"resistance": 220}` into a component.
    #[wasm_bindgen]
    pub fn update_component_properties(&mut self, id: &str, patch_json: &str) -> Result<(), JsValue> {
        let patch: PropertyPatch =
            serde_json::from_str(patch_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.store
            .update_component_properties(&ComponentId::from(id), &patch)
            .map_err(to_js)
    }

    /// Select a component, or clear the selection with `undefined`.
    #[wasm_bindgen]
    pub fn select_component(&mut self, id: Option<String>) -> Result<(), JsValue> {
        let id = id.map(ComponentId::from);
        self.store.select_component(id.as_ref()).map_err(to_js)
    }

    /// Select a wire, or clear the selection with `undefined`.
    #[wasm_bindgen]
    pub fn select_wire(&mut self, id: Option<String>) -> Result<(), JsValue> {
        let id = id.map(WireId::from);
        self.store.select_wire(id.as_ref()).map_err(to_js)
    }

    /// Delete a component and its wires. Returns false if it did not exist.
    #[wasm_bindgen]
    pub fn delete_component(&mut self, id: &str) -> bool {
        self.store.delete_component(&ComponentId::from(id))
    }

    /// Delete a wire. Returns false if it did not exist.
    #[wasm_bindgen]
    pub fn delete_wire(&mut self, id: &str) -> bool {
        self.store.delete_wire(&WireId::from(id))
    }

    #[wasm_bindgen]
    pub fn start_wiring(&mut self, component_id: &str, terminal: &str) -> Result<(), JsValue> {
        let source = endpoint(component_id, terminal)?;
        self.store.start_wiring(source).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn update_wire_draft(&mut self, x: f64, y: f64) {
        self.store.update_wire_draft(x, y);
    }

    /// Drop the wire on a terminal. Returns the new wire id, or `undefined`
    /// when no wire was created.
    #[wasm_bindgen]
    pub fn complete_wiring(&mut self, component_id: &str, terminal: &str) -> Result<Option<String>, JsValue> {
        let target = endpoint(component_id, terminal)?;
        Ok(match self.store.complete_wiring(target) {
            WiringOutcome::Created(id) => Some(id.0),
            _ => None,
        })
    }

    /// Abandon the wire being dragged (click on empty canvas).
    #[wasm_bindgen]
    pub fn cancel_wiring(&mut self) {
        self.store.cancel_wiring();
    }

    #[wasm_bindgen(getter)]
    pub fn is_wiring(&self) -> bool {
        self.store.wiring().is_wiring()
    }

    /// `[x, y]` of a terminal, or `undefined` if the component is gone.
    #[wasm_bindgen]
    pub fn get_connection_point(&self, component_id: &str, terminal: &str) -> Result<Option<Vec<f64>>, JsValue> {
        let terminal: Terminal = terminal.parse().map_err(to_js)?;
        Ok(self
            .store
            .connection_point(&ComponentId::from(component_id), terminal)
            .map(point_to_array))
    }

    /// `[x1, y1, x2, y2]` of a wire, or `undefined`.
    #[wasm_bindgen]
    pub fn wire_path(&self, wire_id: &str) -> Option<Vec<f64>> {
        self.store
            .wire_path(&WireId::from(wire_id))
            .map(|(a, b)| vec![a.x, a.y, b.x, b.y])
    }

    /// `[x1, y1, x2, y2]` of the wire being dragged, or `undefined`.
    #[wasm_bindgen]
    pub fn draft_path(&self) -> Option<Vec<f64>> {
        self.store.draft_path().map(|(a, b)| vec![a.x, a.y, b.x, b.y])
    }

    /// The whole editor state as JSON.
    #[wasm_bindgen]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        to_json(self.store.state())
    }

    /// `{"isValid": bool, "errors": [string]}`.
    #[wasm_bindgen]
    pub fn validate_json(&self) -> Result<String, JsValue> {
        to_json(&self.store.validate_circuit())
    }

    /// Rounded analysis (`current`/`power` as 4-decimal strings) or `null`.
    #[wasm_bindgen]
    pub fn analyze_json(&self) -> Result<String, JsValue> {
        to_json(&self.store.analyze_circuit().map(|r| r.display()))
    }
}

impl Default for WasmCircuitEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
