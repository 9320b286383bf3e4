//! Canvas configuration.

use serde::{Deserialize, Serialize};

use crate::circuit::Geometry;
use crate::error::{CanvasError, Result};
use crate::{
    DEFAULT_COMPONENT_HEIGHT, DEFAULT_COMPONENT_WIDTH, DEFAULT_RESISTANCE, DEFAULT_VOLTAGE,
};

/// Configuration for the graph store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Width of a component box in canvas units.
    pub component_width: f64,
    /// Height of a component box in canvas units.
    pub component_height: f64,
    /// Position of the first placed component.
    pub origin_x: f64,
    pub origin_y: f64,
    /// Horizontal distance between placement slots.
    pub step_x: f64,
    /// Vertical distance between placement rows.
    pub step_y: f64,
    /// Placement slots per row.
    pub columns: usize,
    /// Voltage given to a newly added source.
    pub default_voltage: f64,
    /// Resistance given to a newly added resistor.
    pub default_resistance: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            component_width: DEFAULT_COMPONENT_WIDTH,
            component_height: DEFAULT_COMPONENT_HEIGHT,
            origin_x: 150.0,
            origin_y: 150.0,
            step_x: 150.0,
            step_y: 100.0,
            columns: 3,
            default_voltage: DEFAULT_VOLTAGE,
            default_resistance: DEFAULT_RESISTANCE,
        }
    }
}

impl CanvasConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the component box size used by the geometry resolver.
    pub fn with_component_size(mut self, width: f64, height: f64) -> Self {
        self.component_width = width;
        self.component_height = height;
        self
    }

    /// Set the staggered placement grid.
    pub fn with_placement(mut self, origin_x: f64, origin_y: f64, step_x: f64, step_y: f64) -> Self {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
        self.step_x = step_x;
        self.step_y = step_y;
        self
    }

    /// Set the number of placement slots per row.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Set the property values given to new components.
    pub fn with_defaults(mut self, voltage: f64, resistance: f64) -> Self {
        self.default_voltage = voltage;
        self.default_resistance = resistance;
        self
    }

    /// Geometry resolver for this configuration.
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.component_width, self.component_height)
    }

    /// Position of the `index`-th added component (0-based).
    pub fn slot(&self, index: usize) -> (f64, f64) {
        let col = index % self.columns;
        let row = index / self.columns;
        (
            self.origin_x + col as f64 * self.step_x,
            self.origin_y + row as f64 * self.step_y,
        )
    }

    /// Check that the configuration can drive a store.
    pub fn validate(&self) -> Result<()> {
        let size = [self.component_width, self.component_height];
        if !size.iter().all(|v| v.is_finite() && *v > 0.0) {
            return Err(CanvasError::invalid_config(format!(
                "component size must be positive and finite, got {}x{}",
                self.component_width, self.component_height
            )));
        }
        if self.columns == 0 {
            return Err(CanvasError::invalid_config("columns must be at least 1"));
        }
        let grid = [self.origin_x, self.origin_y, self.step_x, self.step_y];
        if grid.iter().any(|v| !v.is_finite()) {
            return Err(CanvasError::invalid_config("placement grid must be finite"));
        }
        if !self.default_voltage.is_finite() || !self.default_resistance.is_finite() {
            return Err(CanvasError::invalid_config("default property values must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staggered_slots() {
        let config = CanvasConfig::default();
        assert_eq!(config.slot(0), (150.0, 150.0));
        assert_eq!(config.slot(1), (300.0, 150.0));
        assert_eq!(config.slot(2), (450.0, 150.0));
        assert_eq!(config.slot(3), (150.0, 250.0));
        assert_eq!(config.slot(7), (300.0, 350.0));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(CanvasConfig::default().validate().is_ok());
        assert!(CanvasConfig::new().with_component_size(0.0, 50.0).validate().is_err());
        assert!(CanvasConfig::new().with_columns(0).validate().is_err());
        assert!(CanvasConfig::new()
            .with_defaults(f64::INFINITY, 100.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_size() {
        assert!(CanvasConfig::new()
            .with_component_size(f64::INFINITY, 50.0)
            .validate()
            .is_err());
        assert!(CanvasConfig::new()
            .with_component_size(120.0, f64::NAN)
            .validate()
            .is_err());
        assert!(matches!(
            crate::CircuitStore::with_config(CanvasConfig::new().with_component_size(f64::INFINITY, 50.0)),
            Err(CanvasError::InvalidConfig { .. })
        ));
    }
}
