//! Executes parsed scripts against a [`CircuitStore`].

use std::collections::HashMap;
use std::fmt;

use log::{debug, info};
use serde::Serialize;

use super::ast::{Command, Script, Statement, TerminalRef};
use crate::analysis::SimulationResult;
use crate::circuit::{ComponentId, Endpoint, Point, ValidationReport, WireId};
use crate::error::{CanvasError, Result};
use crate::store::{CircuitStore, WiringOutcome};

/// Output produced by a script command.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Report {
    /// `point`: where a terminal sits, `null` if the component is gone
    Point {
        line: usize,
        terminal: String,
        point: Option<Point>,
    },
    /// A wiring gesture that ended without creating a wire
    WiringAborted { line: usize, reason: String },
    Validation {
        line: usize,
        #[serde(flatten)]
        report: ValidationReport,
    },
    Analysis {
        line: usize,
        result: Option<SimulationResult>,
    },
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Point { terminal, point, .. } => match point {
                Some(p) => write!(f, "{} at {}", terminal, p),
                None => write!(f, "{} not found", terminal),
            },
            Report::WiringAborted { line, reason } => {
                write!(f, "line {}: wiring aborted ({})", line, reason)
            }
            Report::Validation { report, .. } => {
                if report.is_valid() {
                    return write!(f, "Circuit is valid");
                }
                write!(f, "Circuit has {} problem(s):", report.issues.len())?;
                for error in report.errors() {
                    write!(f, "\n  - {}", error)?;
                }
                Ok(())
            }
            Report::Analysis { result, .. } => match result {
                Some(result) => write!(f, "{}", result),
                None => write!(
                    f,
                    "Cannot simulate: add at least one voltage source and one resistor"
                ),
            },
        }
    }
}

/// A store plus the aliases a script has bound.
#[derive(Debug)]
pub struct Session {
    store: CircuitStore,
    components: HashMap<String, ComponentId>,
    wires: HashMap<String, WireId>,
}

impl Session {
    pub fn new(store: CircuitStore) -> Self {
        Self {
            store,
            components: HashMap::new(),
            wires: HashMap::new(),
        }
    }

    pub fn store(&self) -> &CircuitStore {
        &self.store
    }

    pub fn into_store(self) -> CircuitStore {
        self.store
    }

    /// Run every statement in order, stopping at the first failure.
    pub fn run(&mut self, script: &Script) -> Result<Vec<Report>> {
        info!("running script with {} statement(s)", script.len());
        let mut reports = Vec::new();
        for statement in &script.statements {
            if let Some(report) = self.execute(statement)? {
                reports.push(report);
            }
        }
        Ok(reports)
    }

    /// Run one statement.
    pub fn execute(&mut self, statement: &Statement) -> Result<Option<Report>> {
        let line = statement.line;
        debug!("line {}: {:?}", line, statement.command);
        self.apply(&statement.command, line)
            .map_err(|e| e.at_line(line))
    }

    fn apply(&mut self, command: &Command, line: usize) -> Result<Option<Report>> {
        match command {
            Command::Add { kind, alias } => {
                let id = self.store.add_component(*kind);
                if let Some(alias) = alias {
                    self.components.insert(alias.clone(), id);
                }
            }
            Command::Move { target, dx, dy } => {
                let id = self.component(target, line)?;
                self.store.update_position(&id, *dx, *dy)?;
            }
            Command::Set { target, patch } => {
                let id = self.component(target, line)?;
                self.store.update_component_properties(&id, patch)?;
            }
            Command::Select { target } => {
                let id = target.as_ref().map(|t| self.component(t, line)).transpose()?;
                self.store.select_component(id.as_ref())?;
            }
            Command::SelectWire { target } => {
                let id = target.as_ref().map(|t| self.wire(t, line)).transpose()?;
                self.store.select_wire(id.as_ref())?;
            }
            Command::Wire { from, to, alias } => {
                let from = self.endpoint(from, line)?;
                let to = self.endpoint(to, line)?;
                self.store.start_wiring(from)?;
                let outcome = self.store.complete_wiring(to);
                return Ok(self.finish(outcome, alias.as_deref(), line));
            }
            Command::Start { from } => {
                let from = self.endpoint(from, line)?;
                self.store.start_wiring(from)?;
            }
            Command::Draft { x, y } => {
                self.store.update_wire_draft(*x, *y);
            }
            Command::Finish { to, alias } => {
                let to = self.endpoint(to, line)?;
                let outcome = self.store.complete_wiring(to);
                return Ok(self.finish(outcome, alias.as_deref(), line));
            }
            Command::Cancel => {
                self.store.cancel_wiring();
            }
            Command::Delete { target } => {
                let id = self.component(target, line)?;
                self.store.delete_component(&id);
            }
            Command::Unwire { target } => {
                let id = self.wire(target, line)?;
                self.store.delete_wire(&id);
            }
            Command::Point { at } => {
                let endpoint = self.endpoint(at, line)?;
                let point = self
                    .store
                    .connection_point(&endpoint.component, endpoint.terminal);
                return Ok(Some(Report::Point {
                    line,
                    terminal: at.to_string(),
                    point,
                }));
            }
            Command::Validate => {
                return Ok(Some(Report::Validation {
                    line,
                    report: self.store.validate_circuit(),
                }))
            }
            Command::Analyze => {
                return Ok(Some(Report::Analysis {
                    line,
                    result: self.store.analyze_circuit(),
                }))
            }
        }
        Ok(None)
    }

    fn finish(&mut self, outcome: WiringOutcome, alias: Option<&str>, line: usize) -> Option<Report> {
        let reason = match outcome {
            WiringOutcome::Created(id) => {
                if let Some(alias) = alias {
                    self.wires.insert(alias.to_string(), id);
                }
                return None;
            }
            WiringOutcome::SameComponent => "both ends on the same component".to_string(),
            WiringOutcome::Duplicate(id) => format!("duplicate of {}", id),
            WiringOutcome::SourceMissing => "source component was deleted".to_string(),
            WiringOutcome::TargetMissing => "target component does not exist".to_string(),
            WiringOutcome::ForeignTerminal => "target terminal is not on that component".to_string(),
            WiringOutcome::NotWiring => "no wiring in progress".to_string(),
        };
        Some(Report::WiringAborted { line, reason })
    }

    /// Resolve an alias, falling back to a raw id known to the store.
    ///
    /// A deleted alias still resolves so that stale references behave like
    /// they would in the editor.
    fn component(&self, name: &str, line: usize) -> Result<ComponentId> {
        if let Some(id) = self.components.get(name) {
            return Ok(id.clone());
        }
        let id = ComponentId::from(name);
        if self.store.component(&id).is_some() {
            return Ok(id);
        }
        Err(CanvasError::UnknownAlias {
            line,
            name: name.to_string(),
        })
    }

    fn wire(&self, name: &str, line: usize) -> Result<WireId> {
        if let Some(id) = self.wires.get(name) {
            return Ok(id.clone());
        }
        let id = WireId::from(name);
        if self.store.wire(&id).is_some() {
            return Ok(id);
        }
        Err(CanvasError::UnknownAlias {
            line,
            name: name.to_string(),
        })
    }

    fn endpoint(&self, r: &TerminalRef, line: usize) -> Result<Endpoint> {
        Ok(Endpoint::new(self.component(&r.target, line)?, r.terminal))
    }
}
