//! The wiring gesture state machine.

use serde::Serialize;

use crate::circuit::{Endpoint, Point, WireId};

/// State of the wiring gesture.
///
/// ```text
/// Idle --start--> Wiring --complete/cancel--> Idle
///                   |  ^
///                   +--+ update_draft
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum WiringState {
    #[default]
    Idle,
    /// A wire is being dragged out of `source`; `pointer` tracks the cursor.
    Wiring { source: Endpoint, pointer: Point },
}

impl WiringState {
    pub fn is_wiring(&self) -> bool {
        matches!(self, WiringState::Wiring { .. })
    }

    /// Terminal the in-progress wire starts from.
    pub fn source(&self) -> Option<&Endpoint> {
        match self {
            WiringState::Wiring { source, .. } => Some(source),
            WiringState::Idle => None,
        }
    }

    pub fn pointer(&self) -> Option<Point> {
        match self {
            WiringState::Wiring { pointer, .. } => Some(*pointer),
            WiringState::Idle => None,
        }
    }
}

/// Result of completing a wiring gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WiringOutcome {
    /// A new wire was appended.
    Created(WireId),
    /// Both ends on the same component; nothing created.
    SameComponent,
    /// An equal wire already exists; nothing created.
    Duplicate(WireId),
    /// The source component was deleted while wiring.
    SourceMissing,
    /// The target component does not exist.
    TargetMissing,
    /// The target terminal does not belong to the target component's kind.
    ForeignTerminal,
    /// No wiring gesture was in progress.
    NotWiring,
}

impl WiringOutcome {
    /// Id of the created wire, if one was created.
    pub fn created(&self) -> Option<&WireId> {
        match self {
            WiringOutcome::Created(id) => Some(id),
            _ => None,
        }
    }
}
