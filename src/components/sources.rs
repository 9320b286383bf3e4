//! Voltage sources.

use serde::{Deserialize, Serialize};

use crate::circuit::Terminal;

/// Properties of a DC voltage source.
///
/// The source drives `voltage` volts from its negative (left) terminal to
/// its positive (right) terminal. A NaN voltage means the value is missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltageSource {
    pub voltage: f64,
}

impl VoltageSource {
    /// Terminals exposed by a voltage source, left edge first.
    pub const TERMINALS: [Terminal; 2] = [Terminal::Negative, Terminal::Positive];

    /// Create a new voltage source.
    pub fn new(voltage: f64) -> Self {
        Self { voltage }
    }

    /// True when the voltage is present and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.voltage > 0.0
    }

    /// Voltage with a missing value read as zero.
    pub fn voltage_or_zero(&self) -> f64 {
        if self.voltage.is_nan() {
            0.0
        } else {
            self.voltage
        }
    }
}
