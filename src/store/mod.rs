//! The graph store: sole owner of components, wires, selection and the
//! wiring gesture.
//!
//! Every mutating call builds the next [`CircuitState`] completely, swaps it
//! in, then hands it to subscribed observers once. Calls that change nothing
//! publish nothing.
//!
//! ```
//! use circuit_canvas::{CircuitStore, ComponentKind, Endpoint, Terminal};
//!
//! let mut store = CircuitStore::new();
//! let source = store.add_component(ComponentKind::VoltageSource);
//! let load = store.add_component(ComponentKind::Resistor);
//!
//! store.start_wiring(Endpoint::new(source.clone(), Terminal::Positive)).unwrap();
//! store.update_wire_draft(210.0, 180.0);
//! let outcome = store.complete_wiring(Endpoint::new(load.clone(), Terminal::Input));
//! assert!(outcome.created().is_some());
//! assert_eq!(store.wires().len(), 1);
//! ```

mod ids;
mod state;
mod wiring;

pub use ids::{system_clock, Clock, IdGenerator};
pub use state::{CircuitState, Selection};
pub use wiring::{WiringOutcome, WiringState};

use std::fmt;
use std::rc::Rc;

use log::{debug, trace};

use crate::analysis::SimulationResult;
use crate::circuit::{
    ComponentId, Endpoint, Geometry, Point, Terminal, ValidationReport, Wire, WireId,
};
use crate::components::{Component, ComponentKind, Properties, PropertyPatch};
use crate::config::CanvasConfig;
use crate::error::{CanvasError, Result};

/// Handle returned by [`CircuitStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Rc<CircuitState>)>;

/// Owner of the editor graph.
pub struct CircuitStore {
    state: Rc<CircuitState>,
    config: CanvasConfig,
    geometry: Geometry,
    ids: IdGenerator,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl CircuitStore {
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        let config = CanvasConfig::default();
        Self {
            state: Rc::new(CircuitState::default()),
            geometry: config.geometry(),
            config,
            ids: IdGenerator::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create an empty store with a custom configuration.
    pub fn with_config(config: CanvasConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            geometry: config.geometry(),
            config,
            ..Self::new()
        })
    }

    /// Replace the id generator (e.g. with a fixed clock).
    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    // ============ Snapshot Access ============

    /// Current snapshot. Cheap to clone and never changes after the fact.
    pub fn snapshot(&self) -> Rc<CircuitState> {
        Rc::clone(&self.state)
    }

    pub fn state(&self) -> &CircuitState {
        &self.state
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn components(&self) -> &[Component] {
        &self.state.components
    }

    pub fn wires(&self) -> &[Wire] {
        &self.state.wires
    }

    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.state.component(id)
    }

    pub fn wire(&self, id: &WireId) -> Option<&Wire> {
        self.state.wire(id)
    }

    pub fn selection(&self) -> &Selection {
        &self.state.selection
    }

    pub fn wiring(&self) -> &WiringState {
        &self.state.wiring
    }

    /// Validate the current circuit. Recomputed on every call.
    pub fn validate_circuit(&self) -> ValidationReport {
        self.state.validate()
    }

    /// Analyze the current circuit. Recomputed on every call.
    pub fn analyze_circuit(&self) -> Option<SimulationResult> {
        self.state.analyze()
    }

    // ============ Observers ============

    /// Register a listener called with each new snapshot.
    pub fn subscribe(&mut self, listener: impl FnMut(&Rc<CircuitState>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn commit<R>(&mut self, change: impl FnOnce(&mut CircuitState) -> R) -> R {
        let mut next = CircuitState::clone(&self.state);
        let out = change(&mut next);
        self.publish(next);
        out
    }

    fn try_commit<R>(&mut self, change: impl FnOnce(&mut CircuitState) -> Result<R>) -> Result<R> {
        let mut next = CircuitState::clone(&self.state);
        let out = change(&mut next)?;
        self.publish(next);
        Ok(out)
    }

    fn publish(&mut self, next: CircuitState) {
        self.state = Rc::new(next);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }

    // ============ Components ============

    /// Add a component of the given kind at the next staggered slot.
    pub fn add_component(&mut self, kind: ComponentKind) -> ComponentId {
        let (x, y) = self.config.slot(self.state.components.len());
        let id = self.ids.component(kind);
        let properties =
            Properties::defaults(kind, self.config.default_voltage, self.config.default_resistance);
        let component = Component::new(id.clone(), Point::new(x, y), properties);

        self.commit(|state| state.components.push(component));
        debug!("added {} '{}' at ({}, {})", kind, id, x, y);
        id
    }

    /// Move a component by a relative delta.
    pub fn update_position(&mut self, id: &ComponentId, dx: f64, dy: f64) -> Result<()> {
        self.try_commit(|state| {
            let component = state
                .component_mut(id)
                .ok_or_else(|| CanvasError::component_not_found(id.as_str()))?;
            component.position = component.position.offset(dx, dy);
            Ok(())
        })
    }

    /// Merge a property patch into a component.
    pub fn update_component_properties(&mut self, id: &ComponentId, patch: &PropertyPatch) -> Result<()> {
        if patch.is_empty() {
            trace!("empty property patch for '{}' ignored", id);
            return self.component(id).map(|_| ()).ok_or_else(|| CanvasError::component_not_found(id.as_str()));
        }
        self.try_commit(|state| {
            state
                .component_mut(id)
                .ok_or_else(|| CanvasError::component_not_found(id.as_str()))?
                .apply_patch(patch)
        })?;
        debug!("updated properties of '{}': {:?}", id, patch);
        Ok(())
    }

    /// Delete a component and every wire touching it.
    ///
    /// Returns false if no such component exists. An in-progress wiring
    /// gesture is left alone, even if it starts on this component.
    pub fn delete_component(&mut self, id: &ComponentId) -> bool {
        if self.component(id).is_none() {
            trace!("delete of unknown component '{}' ignored", id);
            return false;
        }

        let removed_wires = self.commit(|state| {
            state.components.retain(|c| c.id != *id);
            let (removed, kept): (Vec<Wire>, Vec<Wire>) =
                std::mem::take(&mut state.wires).into_iter().partition(|w| w.involves(id));
            state.wires = kept;

            let clear = match &state.selection {
                Selection::Component(selected) => selected == id,
                Selection::Wire(selected) => removed.iter().any(|w| w.id == *selected),
                Selection::None => false,
            };
            if clear {
                state.selection = Selection::None;
            }
            removed.len()
        });

        debug!("deleted component '{}' and {} wire(s)", id, removed_wires);
        true
    }

    // ============ Wires ============

    /// Delete a wire. Returns false if no such wire exists.
    pub fn delete_wire(&mut self, id: &WireId) -> bool {
        if self.wire(id).is_none() {
            trace!("delete of unknown wire '{}' ignored", id);
            return false;
        }

        self.commit(|state| {
            state.wires.retain(|w| w.id != *id);
            if state.selection.wire() == Some(id) {
                state.selection = Selection::None;
            }
        });
        debug!("deleted wire '{}'", id);
        true
    }

    // ============ Selection ============

    /// Select a component (clearing any wire selection), or clear the selection.
    pub fn select_component(&mut self, id: Option<&ComponentId>) -> Result<()> {
        let next = match id {
            Some(id) if self.component(id).is_none() => {
                return Err(CanvasError::component_not_found(id.as_str()))
            }
            Some(id) => Selection::Component(id.clone()),
            None => Selection::None,
        };
        self.set_selection(next);
        Ok(())
    }

    /// Select a wire (clearing any component selection), or clear the selection.
    pub fn select_wire(&mut self, id: Option<&WireId>) -> Result<()> {
        let next = match id {
            Some(id) if self.wire(id).is_none() => return Err(CanvasError::wire_not_found(id.as_str())),
            Some(id) => Selection::Wire(id.clone()),
            None => Selection::None,
        };
        self.set_selection(next);
        Ok(())
    }

    fn set_selection(&mut self, next: Selection) {
        if self.state.selection != next {
            self.commit(|state| state.selection = next);
        }
    }

    // ============ Wiring ============

    /// Begin dragging a wire out of `source`. Clears the selection.
    ///
    /// Starting while already wiring replaces the source terminal.
    pub fn start_wiring(&mut self, source: Endpoint) -> Result<()> {
        let component = self
            .component(&source.component)
            .ok_or_else(|| CanvasError::component_not_found(source.component.as_str()))?;
        if !component.has_terminal(source.terminal) {
            return Err(CanvasError::TerminalMismatch {
                kind: component.kind().label(),
                terminal: source.terminal.name(),
            });
        }

        debug!("wiring started at {}", source);
        self.commit(|state| {
            state.selection = Selection::None;
            state.wiring = WiringState::Wiring {
                source,
                pointer: Point::ORIGIN,
            };
        });
        Ok(())
    }

    /// Track the pointer while wiring. Returns false when not wiring.
    pub fn update_wire_draft(&mut self, x: f64, y: f64) -> bool {
        if !self.state.wiring.is_wiring() {
            trace!("wire draft update while idle ignored");
            return false;
        }

        self.commit(|state| {
            if let WiringState::Wiring { pointer, .. } = &mut state.wiring {
                *pointer = Point::new(x, y);
            }
        });
        true
    }

    /// Finish the wiring gesture on `target`.
    ///
    /// Returns to idle in every case except [`WiringOutcome::NotWiring`];
    /// only [`WiringOutcome::Created`] adds a wire.
    pub fn complete_wiring(&mut self, target: Endpoint) -> WiringOutcome {
        let Some(source) = self.state.wiring.source().cloned() else {
            trace!("complete_wiring while idle ignored");
            return WiringOutcome::NotWiring;
        };

        let target_fits = self
            .component(&target.component)
            .map(|c| c.has_terminal(target.terminal));

        let outcome = if self.component(&source.component).is_none() {
            WiringOutcome::SourceMissing
        } else if target_fits.is_none() {
            WiringOutcome::TargetMissing
        } else if target_fits == Some(false) {
            WiringOutcome::ForeignTerminal
        } else if source.component == target.component {
            WiringOutcome::SameComponent
        } else if let Some(existing) = self.state.wires.iter().find(|w| w.connects(&source, &target)) {
            WiringOutcome::Duplicate(existing.id.clone())
        } else {
            WiringOutcome::Created(self.ids.wire())
        };

        match &outcome {
            WiringOutcome::Created(id) => debug!("wire '{}' created: {} -> {}", id, source, target),
            other => debug!("wiring {} -> {} aborted: {:?}", source, target, other),
        }

        let wire = outcome
            .created()
            .map(|id| Wire::new(id.clone(), source, target));
        self.commit(|state| {
            state.wiring = WiringState::Idle;
            state.wires.extend(wire);
        });
        outcome
    }

    /// Abandon the wiring gesture. Returns false when not wiring.
    pub fn cancel_wiring(&mut self) -> bool {
        if !self.state.wiring.is_wiring() {
            return false;
        }
        debug!("wiring cancelled");
        self.commit(|state| state.wiring = WiringState::Idle);
        true
    }

    // ============ Geometry ============

    /// Canvas point of a terminal, or `None` if the component is gone or has
    /// no such terminal.
    pub fn connection_point(&self, id: &ComponentId, terminal: Terminal) -> Option<Point> {
        self.component(id)
            .filter(|c| c.has_terminal(terminal))
            .map(|c| self.geometry.terminal_point(c, terminal))
    }

    /// Both end points of a wire, or `None` if the wire or either end is gone.
    pub fn wire_path(&self, id: &WireId) -> Option<(Point, Point)> {
        let wire = self.wire(id)?;
        let from = self.connection_point(&wire.from.component, wire.from.terminal)?;
        let to = self.connection_point(&wire.to.component, wire.to.terminal)?;
        Some((from, to))
    }

    /// Line from the wiring source to the pointer, or `None` when idle or the
    /// source component is gone.
    pub fn draft_path(&self) -> Option<(Point, Point)> {
        match &self.state.wiring {
            WiringState::Wiring { source, pointer } => self
                .connection_point(&source.component, source.terminal)
                .map(|start| (start, *pointer)),
            WiringState::Idle => None,
        }
    }
}

impl Default for CircuitStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CircuitStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitStore")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn frozen() -> u64 {
        42
    }

    fn store() -> CircuitStore {
        CircuitStore::new().with_id_generator(IdGenerator::with_clock(frozen))
    }

    fn ep(id: &ComponentId, terminal: Terminal) -> Endpoint {
        Endpoint::new(id.clone(), terminal)
    }

    fn connect(store: &mut CircuitStore, a: Endpoint, b: Endpoint) -> WiringOutcome {
        store.start_wiring(a).unwrap();
        store.complete_wiring(b)
    }

    #[test]
    fn test_add_component_ids_are_distinct() {
        let mut s = store();
        let ids: Vec<ComponentId> = (0..10)
            .map(|i| {
                if i % 2 == 0 {
                    s.add_component(ComponentKind::Resistor)
                } else {
                    s.add_component(ComponentKind::VoltageSource)
                }
            })
            .collect();
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_add_component_defaults_and_placement() {
        let mut s = store();
        let v = s.add_component(ComponentKind::VoltageSource);
        let r = s.add_component(ComponentKind::Resistor);
        for _ in 0..2 {
            s.add_component(ComponentKind::Resistor);
        }

        assert_eq!(s.component(&v).unwrap().voltage(), Some(5.0));
        assert_eq!(s.component(&r).unwrap().resistance(), Some(100.0));
        assert_eq!(s.component(&v).unwrap().label, "Voltage Source");

        let positions: Vec<Point> = s.components().iter().map(|c| c.position).collect();
        assert_eq!(
            positions,
            vec![
                Point::new(150.0, 150.0),
                Point::new(300.0, 150.0),
                Point::new(450.0, 150.0),
                Point::new(150.0, 250.0),
            ]
        );
    }

    #[test]
    fn test_update_position_is_relative() {
        let mut s = store();
        let r = s.add_component(ComponentKind::Resistor);
        s.update_position(&r, 10.0, -20.0).unwrap();
        s.update_position(&r, 5.0, 5.0).unwrap();
        assert_eq!(s.component(&r).unwrap().position, Point::new(165.0, 135.0));

        let missing = ComponentId::from("resistor-0");
        assert!(matches!(
            s.update_position(&missing, 1.0, 1.0),
            Err(CanvasError::ComponentNotFound { .. })
        ));
    }

    #[test]
    fn test_update_properties_merges() {
        let mut s = store();
        let v = s.add_component(ComponentKind::VoltageSource);
        s.update_component_properties(&v, &PropertyPatch::new().with_voltage(9.0))
            .unwrap();
        s.update_component_properties(&v, &PropertyPatch::new().with_label("Battery"))
            .unwrap();
        let c = s.component(&v).unwrap();
        assert_eq!(c.voltage(), Some(9.0));
        assert_eq!(c.label, "Battery");

        let err = s.update_component_properties(&v, &PropertyPatch::new().with_resistance(1.0));
        assert!(matches!(err, Err(CanvasError::PropertyMismatch { .. })));
    }

    #[test]
    fn test_delete_component_cascades_and_is_idempotent() {
        let mut s = store();
        let v = s.add_component(ComponentKind::VoltageSource);
        let r1 = s.add_component(ComponentKind::Resistor);
        let r2 = s.add_component(ComponentKind::Resistor);
        connect(&mut s, ep(&v, Terminal::Positive), ep(&r1, Terminal::Input));
        connect(&mut s, ep(&r1, Terminal::Output), ep(&r2, Terminal::Input));
        connect(&mut s, ep(&r2, Terminal::Output), ep(&v, Terminal::Negative));
        s.select_component(Some(&r1)).unwrap();

        assert!(s.delete_component(&r1));
        assert!(s.component(&r1).is_none());
        assert_eq!(s.wires().len(), 1);
        assert!(s.wires().iter().all(|w| !w.involves(&r1)));
        assert_eq!(*s.selection(), Selection::None);

        let wires_before = s.wires().to_vec();
        assert!(!s.delete_component(&r1));
        assert_eq!(s.wires(), wires_before.as_slice());
    }

    #[test]
    fn test_delete_component_clears_selected_cascaded_wire() {
        let mut s = store();
        let v = s.add_component(ComponentKind::VoltageSource);
        let r = s.add_component(ComponentKind::Resistor);
        let w = connect(&mut s, ep(&v, Terminal::Positive), ep(&r, Terminal::Input));
        let w = w.created().unwrap().clone();
        s.select_wire(Some(&w)).unwrap();

        s.delete_component(&r);
        assert_eq!(*s.selection(), Selection::None);
    }

    #[test]
    fn test_selection_is_exclusive() {
        let mut s = store();
        let v = s.add_component(ComponentKind::VoltageSource);
        let r = s.add_component(ComponentKind::Resistor);
        let w = connect(&mut s, ep(&v, Terminal::Positive), ep(&r, Terminal::Input));
        let w = w.created().unwrap().clone();

        s.select_component(Some(&v)).unwrap();
        assert_eq!(s.selection().component(), Some(&v));
        s.select_wire(Some(&w)).unwrap();
        assert_eq!(s.selection().wire(), Some(&w));
        assert!(s.selection().component().is_none());
        s.select_component(None).unwrap();
        assert_eq!(*s.selection(), Selection::None);

        assert!(s.select_wire(Some(&WireId::from("wire-0"))).is_err());
    }

    #[test]
    fn test_start_wiring_clears_selection() {
        let mut s = store();
        let v = s.add_component(ComponentKind::VoltageSource);
        s.select_component(Some(&v)).unwrap();
        s.start_wiring(ep(&v, Terminal::Positive)).unwrap();
        assert_eq!(*s.selection(), Selection::None);
        assert!(s.wiring().is_wiring());
    }

    #[test]
    fn test_start_wiring_on_missing_component_fails() {
        let mut s = store();
        let err = s.start_wiring(Endpoint::new("resistor-0", Terminal::Input));
        assert!(err.is_err());
        assert!(!s.wiring().is_wiring());
    }

    #[test]
    fn test_update_draft_moves_pointer_only() {
        let mut s = store();
        let v = s.add_component(ComponentKind::VoltageSource);
        assert!(!s.update_wire_draft(1.0, 1.0));

        s.start_wiring(ep(&v, Terminal::Positive)).unwrap();
        assert!(s.update_wire_draft(300.0, 210.0));
        assert_eq!(s.wiring().pointer(), Some(Point::new(300.0, 210.0)));
        assert_eq!(s.wiring().source(), Some(&ep(&v, Terminal::Positive)));
        assert!(s.wires().is_empty());
    }

    #[test]
    fn test_same_component_wire_rejected() {
        let mut s = store();
        let r = s.add_component(ComponentKind::Resistor);
        let outcome = connect(&mut s, ep(&r, Terminal::Input), ep(&r, Terminal::Output));
        assert_eq!(outcome, WiringOutcome::SameComponent);
        assert!(s.wires().is_empty());
        assert_eq!(*s.wiring(), WiringState::Idle);
    }

    #[test]
    fn test_duplicate_wire_rejected_in_both_directions() {
        let mut s = store();
        let v = s.add_component(ComponentKind::VoltageSource);
        let r = s.add_component(ComponentKind::Resistor);
        let a = ep(&v, Terminal::Positive);
        let b = ep(&r, Terminal::Input);

        let first = connect(&mut s, a.clone(), b.clone());
        let id = first.created().unwrap().clone();

        assert_eq!(connect(&mut s, a.clone(), b.clone()), WiringOutcome::Duplicate(id.clone()));
        assert_eq!(connect(&mut s, b.clone(), a.clone()), WiringOutcome::Duplicate(id));
        assert_eq!(s.wires().len(), 1);
        assert_eq!(*s.wiring(), WiringState::Idle);

        // Same components, different terminals is a new wire
        let other = connect(&mut s, ep(&v, Terminal::Negative), ep(&r, Terminal::Output));
        assert!(other.created().is_some());
        assert_eq!(s.wires().len(), 2);
    }

    #[test]
    fn test_stale_source_aborts() {
        let mut s = store();
        let v = s.add_component(ComponentKind::VoltageSource);
        let r = s.add_component(ComponentKind::Resistor);
        s.start_wiring(ep(&v, Terminal::Positive)).unwrap();
        s.delete_component(&v);

        // Deleting does not cancel the gesture
        assert!(s.wiring().is_wiring());
        assert!(s.draft_path().is_none());

        assert_eq!(s.complete_wiring(ep(&r, Terminal::Input)), WiringOutcome::SourceMissing);
        assert!(s.wires().is_empty());
        assert_eq!(*s.wiring(), WiringState::Idle);
    }

    #[test]
    fn test_missing_target_aborts() {
        let mut s = store();
        let v = s.add_component(ComponentKind::VoltageSource);
        s.start_wiring(ep(&v, Terminal::Positive)).unwrap();
        let outcome = s.complete_wiring(Endpoint::new("resistor-0", Terminal::Input));
        assert_eq!(outcome, WiringOutcome::TargetMissing);
        assert!(s.wires().is_empty());
    }

    #[test]
    fn test_start_wiring_on_foreign_terminal_fails() {
        let mut s = store();
        let v = s.add_component(ComponentKind::VoltageSource);
        let r = s.add_component(ComponentKind::Resistor);
        s.select_component(Some(&r)).unwrap();

        let err = s.start_wiring(ep(&v, Terminal::Input)).unwrap_err();
        assert!(matches!(
            err,
            CanvasError::TerminalMismatch { kind: "Voltage Source", terminal: "input" }
        ));
        assert_eq!(*s.wiring(), WiringState::Idle);
        assert_eq!(*s.selection(), Selection::Component(r.clone()));

        assert!(s.start_wiring(ep(&r, Terminal::Positive)).is_err());
        assert!(!s.wiring().is_wiring());
    }

    #[test]
    fn test_foreign_target_terminal_aborts() {
        let mut s = store();
        let v = s.add_component(ComponentKind::VoltageSource);
        let r = s.add_component(ComponentKind::Resistor);

        let outcome = connect(&mut s, ep(&v, Terminal::Positive), ep(&r, Terminal::Positive));
        assert_eq!(outcome, WiringOutcome::ForeignTerminal);
        assert!(s.wires().is_empty());
        assert_eq!(*s.wiring(), WiringState::Idle);

        // Left-edge terminals share a point; only the real one can be wired
        assert!(connect(&mut s, ep(&v, Terminal::Negative), ep(&r, Terminal::Input))
            .created()
            .is_some());
        assert_eq!(
            connect(&mut s, ep(&r, Terminal::Input), ep(&v, Terminal::Input)),
            WiringOutcome::ForeignTerminal
        );
        assert_eq!(s.wires().len(), 1);
    }

    #[test]
    fn test_restarting_wiring_replaces_source() {
        let mut s = store();
        let v = s.add_component(ComponentKind::VoltageSource);
        let r1 = s.add_component(ComponentKind::Resistor);
        let r2 = s.add_component(ComponentKind::Resistor);

        s.start_wiring(ep(&v, Terminal::Positive)).unwrap();
        s.start_wiring(ep(&r1, Terminal::Output)).unwrap();
        assert_eq!(s.wiring().source(), Some(&ep(&r1, Terminal::Output)));

        let id = s.complete_wiring(ep(&r2, Terminal::Input)).created().unwrap().clone();
        let wire = s.wire(&id).unwrap();
        assert_eq!(wire.from, ep(&r1, Terminal::Output));
        assert_eq!(wire.to, ep(&r2, Terminal::Input));
        assert!(!wire.involves(&v));
    }

    #[test]
    fn test_complete_and_cancel_while_idle() {
        let mut s = store();
        let r = s.add_component(ComponentKind::Resistor);
        assert_eq!(s.complete_wiring(ep(&r, Terminal::Input)), WiringOutcome::NotWiring);
        assert!(!s.cancel_wiring());

        s.start_wiring(ep(&r, Terminal::Input)).unwrap();
        assert!(s.cancel_wiring());
        assert_eq!(*s.wiring(), WiringState::Idle);
        assert!(s.wires().is_empty());
    }

    #[test]
    fn test_delete_wire() {
        let mut s = store();
        let v = s.add_component(ComponentKind::VoltageSource);
        let r = s.add_component(ComponentKind::Resistor);
        let w = connect(&mut s, ep(&v, Terminal::Positive), ep(&r, Terminal::Input));
        let w = w.created().unwrap().clone();
        s.select_wire(Some(&w)).unwrap();

        assert!(s.delete_wire(&w));
        assert!(s.wires().is_empty());
        assert_eq!(*s.selection(), Selection::None);
        assert!(!s.delete_wire(&w));
    }

    #[test]
    fn test_connection_points() {
        let mut s = store();
        let v = s.add_component(ComponentKind::VoltageSource);
        assert_eq!(s.connection_point(&v, Terminal::Negative), Some(Point::new(150.0, 175.0)));
        assert_eq!(s.connection_point(&v, Terminal::Positive), Some(Point::new(270.0, 175.0)));
        assert_eq!(s.connection_point(&ComponentId::from("nope"), Terminal::Positive), None);
        assert_eq!(s.connection_point(&v, Terminal::Input), None);
        assert_eq!(s.connection_point(&v, Terminal::Output), None);
    }

    #[test]
    fn test_wire_and_draft_paths() {
        let mut s = store();
        let v = s.add_component(ComponentKind::VoltageSource);
        let r = s.add_component(ComponentKind::Resistor);
        let w = connect(&mut s, ep(&v, Terminal::Positive), ep(&r, Terminal::Input));
        let w = w.created().unwrap().clone();

        assert_eq!(
            s.wire_path(&w),
            Some((Point::new(270.0, 175.0), Point::new(300.0, 175.0)))
        );

        s.start_wiring(ep(&r, Terminal::Output)).unwrap();
        s.update_wire_draft(500.0, 90.0);
        assert_eq!(
            s.draft_path(),
            Some((Point::new(420.0, 175.0), Point::new(500.0, 90.0)))
        );
    }

    #[test]
    fn test_custom_geometry() {
        let config = CanvasConfig::new().with_component_size(80.0, 40.0);
        let mut s = CircuitStore::with_config(config).unwrap();
        let r = s.add_component(ComponentKind::Resistor);
        assert_eq!(s.connection_point(&r, Terminal::Output), Some(Point::new(230.0, 170.0)));
    }

    #[test]
    fn test_observers_see_one_snapshot_per_mutation() {
        let mut s = store();
        let calls = Rc::new(Cell::new(0usize));
        let seen = Rc::clone(&calls);
        let sub = s.subscribe(move |_| seen.set(seen.get() + 1));

        let v = s.add_component(ComponentKind::VoltageSource);
        let r = s.add_component(ComponentKind::Resistor);
        connect(&mut s, ep(&v, Terminal::Positive), ep(&r, Terminal::Input));
        assert_eq!(calls.get(), 4);

        // No-ops publish nothing
        s.delete_component(&ComponentId::from("nope"));
        s.cancel_wiring();
        s.select_component(None).unwrap();
        assert_eq!(calls.get(), 4);

        // Cascade delete is one snapshot
        s.delete_component(&v);
        assert_eq!(calls.get(), 5);

        assert!(s.unsubscribe(sub));
        s.add_component(ComponentKind::Resistor);
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn test_old_snapshots_are_untouched() {
        let mut s = store();
        let before = s.snapshot();
        s.add_component(ComponentKind::Resistor);
        assert!(before.components.is_empty());
        assert_eq!(s.snapshot().components.len(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(CircuitStore::with_config(CanvasConfig::new().with_columns(0)).is_err());
    }
}
