//! Circuit graph representation and validation.
//!
//! This module provides the building blocks of the editor's graph: ids,
//! terminals and endpoints, [`Wire`]s between terminals, the geometry that
//! places terminals on the canvas, and the structural validator.

mod geometry;
mod types;
mod validate;
mod wire;

pub use geometry::Geometry;
pub use types::*;
pub use validate::{validate_circuit, ValidationIssue, ValidationReport};
pub use wire::Wire;
