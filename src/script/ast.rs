//! Syntax tree types for session scripts.

use std::fmt;

use crate::circuit::Terminal;
use crate::components::{ComponentKind, PropertyPatch};

/// `<ref>.<terminal>` as written in a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalRef {
    /// Alias or raw component id
    pub target: String,
    pub terminal: Terminal,
}

impl fmt::Display for TerminalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.target, self.terminal)
    }
}

/// One script command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `add <kind> [as <alias>]`
    Add { kind: ComponentKind, alias: Option<String> },
    /// `move <ref> <dx> <dy>`
    Move { target: String, dx: f64, dy: f64 },
    /// `set <ref> key=value ...`
    Set { target: String, patch: PropertyPatch },
    /// `select <ref>` / `select none`
    Select { target: Option<String> },
    /// `select-wire <ref>` / `select-wire none`
    SelectWire { target: Option<String> },
    /// `wire <from> <to> [as <alias>]`: start and finish in one line
    Wire {
        from: TerminalRef,
        to: TerminalRef,
        alias: Option<String>,
    },
    /// `start <from>`
    Start { from: TerminalRef },
    /// `draft <x> <y>`
    Draft { x: f64, y: f64 },
    /// `finish <to> [as <alias>]`
    Finish { to: TerminalRef, alias: Option<String> },
    /// `cancel`
    Cancel,
    /// `delete <ref>`
    Delete { target: String },
    /// `unwire <ref>`
    Unwire { target: String },
    /// `point <ref>.<terminal>`
    Point { at: TerminalRef },
    /// `validate`
    Validate,
    /// `analyze`
    Analyze,
}

/// A command with the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub command: Command,
    /// Source line number for error reporting
    pub line: usize,
}

/// A parsed script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    pub statements: Vec<Statement>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
