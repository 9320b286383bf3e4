//! Linear passive components: Resistor.

use serde::{Deserialize, Serialize};

use crate::circuit::Terminal;

/// Properties of a resistor.
///
/// A NaN resistance means the value is missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resistor {
    pub resistance: f64,
}

impl Resistor {
    /// Terminals exposed by a resistor, left edge first.
    pub const TERMINALS: [Terminal; 2] = [Terminal::Input, Terminal::Output];

    /// Create a new resistor.
    pub fn new(resistance: f64) -> Self {
        Self { resistance }
    }

    /// True when the resistance is present and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.resistance > 0.0
    }

    /// Resistance with a missing value read as zero.
    pub fn resistance_or_zero(&self) -> f64 {
        if self.resistance.is_nan() {
            0.0
        } else {
            self.resistance
        }
    }

    /// Get the conductance (1/R).
    ///
    /// Infinite for a zero resistance, which collapses a parallel
    /// combination to zero ohms.
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance_or_zero()
    }
}
