//! Ohm's-law analysis over the classified topology.

use std::fmt;

use serde::Serialize;

use super::topology::{classify, Adjacency, Topology};
use crate::circuit::{ComponentId, Wire};
use crate::components::{Component, Properties, Resistor};

/// Current / voltage seen by one resistor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResistorReading {
    pub id: ComponentId,
    pub label: String,
    pub resistance: f64,
    /// Voltage across the resistor
    pub voltage_drop: f64,
    /// Current through the resistor
    pub current: f64,
}

/// Full-precision analysis output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub topology: Topology,
    pub voltage: f64,
    pub total_resistance: f64,
    pub current: f64,
    pub power: f64,
    pub readings: Vec<ResistorReading>,
}

/// Rounded values for display: current and power to 4 decimals, total
/// resistance to 2.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayResult {
    pub voltage: f64,
    pub current: String,
    pub total_resistance: f64,
    pub power: String,
    pub circuit_type: String,
}

impl SimulationResult {
    /// Round to the display precision.
    pub fn display(&self) -> DisplayResult {
        DisplayResult {
            voltage: self.voltage,
            current: format!("{:.4}", self.current),
            total_resistance: round_to(self.total_resistance, 2),
            power: format!("{:.4}", self.power),
            circuit_type: self.topology.to_string(),
        }
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.display();
        writeln!(f, "Circuit type:     {}", d.circuit_type)?;
        writeln!(f, "Voltage:          {} V", d.voltage)?;
        writeln!(f, "Total resistance: {} Ω", d.total_resistance)?;
        writeln!(f, "Current:          {} A", d.current)?;
        write!(f, "Power:            {} W", d.power)?;
        for r in &self.readings {
            write!(
                f,
                "\n  {} ({}): {:.4} V, {:.4} A",
                r.label, r.id, r.voltage_drop, r.current
            )?;
        }
        Ok(())
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Analyze a circuit.
///
/// Returns `None` when there is no voltage source or no resistor; the circuit
/// cannot be simulated then. Only the first voltage source drives the
/// circuit.
pub fn analyze_circuit(components: &[Component], wires: &[Wire]) -> Option<SimulationResult> {
    let source = components.iter().find_map(|c| match &c.properties {
        Properties::VoltageSource(v) => Some(v),
        Properties::Resistor(_) => None,
    })?;

    let resistors: Vec<(&Component, &Resistor)> = components
        .iter()
        .filter_map(|c| match &c.properties {
            Properties::Resistor(r) => Some((c, r)),
            Properties::VoltageSource(_) => None,
        })
        .collect();
    if resistors.is_empty() {
        return None;
    }

    let adjacency = Adjacency::build(components, wires);
    let topology = classify(components, &adjacency);

    let total_resistance = match topology {
        Topology::Series => resistors.iter().map(|(_, r)| r.resistance_or_zero()).sum::<f64>(),
        Topology::ParallelComplex => parallel_resistance(&resistors),
    };

    let voltage = source.voltage_or_zero();
    let current = if total_resistance > 0.0 {
        voltage / total_resistance
    } else {
        0.0
    };
    let power = voltage * current;

    let readings = resistors
        .iter()
        .map(|(c, r)| {
            let resistance = r.resistance_or_zero();
            let (voltage_drop, branch_current) = match topology {
                Topology::Series => (current * resistance, current),
                Topology::ParallelComplex => {
                    let i = if resistance > 0.0 { voltage / resistance } else { 0.0 };
                    (voltage, i)
                }
            };
            ResistorReading {
                id: c.id.clone(),
                label: c.label.clone(),
                resistance,
                voltage_drop,
                current: branch_current,
            }
        })
        .collect();

    Some(SimulationResult {
        topology,
        voltage,
        total_resistance,
        current,
        power,
        readings,
    })
}

/// 1 / Σ(1/R). A single resistor is returned as is; a zero resistance
/// shorts the combination to zero.
fn parallel_resistance(resistors: &[(&Component, &Resistor)]) -> f64 {
    match resistors {
        [] => 0.0,
        [(_, only)] => only.resistance_or_zero(),
        _ => {
            let conductance: f64 = resistors.iter().map(|(_, r)| r.conductance()).sum();
            1.0 / conductance
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::circuit::{Endpoint, Point, Terminal, WireId};
    use crate::components::VoltageSource;

    fn source(id: &str, voltage: f64) -> Component {
        Component::new(
            ComponentId::from(id),
            Point::ORIGIN,
            Properties::VoltageSource(VoltageSource::new(voltage)),
        )
    }

    fn resistor(id: &str, resistance: f64) -> Component {
        Component::new(
            ComponentId::from(id),
            Point::ORIGIN,
            Properties::Resistor(Resistor::new(resistance)),
        )
    }

    fn wire(id: &str, a: &str, ta: Terminal, b: &str, tb: Terminal) -> Wire {
        Wire::new(WireId::from(id), Endpoint::new(a, ta), Endpoint::new(b, tb))
    }

    fn series_loop() -> (Vec<Component>, Vec<Wire>) {
        let components = vec![source("v", 10.0), resistor("r1", 100.0), resistor("r2", 100.0)];
        let wires = vec![
            wire("w1", "v", Terminal::Positive, "r1", Terminal::Input),
            wire("w2", "r1", Terminal::Output, "r2", Terminal::Input),
            wire("w3", "r2", Terminal::Output, "v", Terminal::Negative),
        ];
        (components, wires)
    }

    fn parallel_pair() -> (Vec<Component>, Vec<Wire>) {
        let components = vec![source("v", 9.0), resistor("r1", 100.0), resistor("r2", 200.0)];
        let wires = vec![
            wire("w1", "v", Terminal::Positive, "r1", Terminal::Input),
            wire("w2", "r1", Terminal::Output, "v", Terminal::Negative),
            wire("w3", "v", Terminal::Positive, "r2", Terminal::Input),
            wire("w4", "r2", Terminal::Output, "v", Terminal::Negative),
        ];
        (components, wires)
    }

    #[test]
    fn test_series_loop() {
        let (components, wires) = series_loop();
        let result = analyze_circuit(&components, &wires).unwrap();
        assert_eq!(result.topology, Topology::Series);
        assert_relative_eq!(result.total_resistance, 200.0);
        assert_relative_eq!(result.current, 0.05);
        assert_relative_eq!(result.power, 0.5);

        for reading in &result.readings {
            assert_relative_eq!(reading.current, 0.05);
            assert_relative_eq!(reading.voltage_drop, 5.0);
        }
    }

    #[test]
    fn test_parallel_pair() {
        let (components, wires) = parallel_pair();
        let result = analyze_circuit(&components, &wires).unwrap();
        assert_eq!(result.topology, Topology::ParallelComplex);
        assert_relative_eq!(result.total_resistance, 200.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(result.current, 0.135, epsilon = 1e-12);
        assert_relative_eq!(result.power, 1.215, epsilon = 1e-12);

        let currents: Vec<f64> = result.readings.iter().map(|r| r.current).collect();
        assert_relative_eq!(currents[0], 0.09);
        assert_relative_eq!(currents[1], 0.045);
        assert!(result.readings.iter().all(|r| r.voltage_drop == 9.0));
    }

    #[test]
    fn test_display_rounding() {
        let (components, wires) = parallel_pair();
        let display = analyze_circuit(&components, &wires).unwrap().display();
        assert_eq!(display.total_resistance, 66.67);
        assert_eq!(display.current, "0.1350");
        assert_eq!(display.power, "1.2150");
        assert_eq!(display.circuit_type, "Parallel/Complex");
        assert_eq!(display.voltage, 9.0);
    }

    #[test]
    fn test_no_resistors_or_no_source() {
        assert!(analyze_circuit(&[source("v", 5.0)], &[]).is_none());
        assert!(analyze_circuit(&[resistor("r", 5.0)], &[]).is_none());
        assert!(analyze_circuit(&[], &[]).is_none());
    }

    #[test]
    fn test_zero_resistance_gives_zero_current() {
        let components = vec![source("v", 5.0), resistor("r", 0.0)];
        let wires = vec![wire("w1", "v", Terminal::Positive, "r", Terminal::Input)];
        let result = analyze_circuit(&components, &wires).unwrap();
        assert_eq!(result.total_resistance, 0.0);
        assert_eq!(result.current, 0.0);
        assert_eq!(result.power, 0.0);
    }

    #[test]
    fn test_zero_in_parallel_shorts_the_combination() {
        let components = vec![source("v", 5.0), resistor("r1", 0.0), resistor("r2", 100.0)];
        let result = analyze_circuit(&components, &[]).unwrap();
        assert_eq!(result.topology, Topology::ParallelComplex);
        assert_eq!(result.total_resistance, 0.0);
        assert_eq!(result.current, 0.0);
        assert!(result.current.is_finite() && result.power.is_finite());
    }

    #[test]
    fn test_missing_values_read_as_zero() {
        let (mut components, wires) = series_loop();
        components[0] = source("v", f64::NAN);
        let result = analyze_circuit(&components, &wires).unwrap();
        assert_eq!(result.voltage, 0.0);
        assert_eq!(result.current, 0.0);
    }

    #[test]
    fn test_first_source_drives() {
        let components = vec![source("v1", 3.0), source("v2", 12.0), resistor("r", 3.0)];
        let result = analyze_circuit(&components, &[]).unwrap();
        assert_eq!(result.voltage, 3.0);
        assert_relative_eq!(result.current, 1.0);
    }

    #[test]
    fn test_text_report() {
        let (components, wires) = series_loop();
        let text = analyze_circuit(&components, &wires).unwrap().to_string();
        assert!(text.contains("Circuit type:     Series"));
        assert!(text.contains("Current:          0.0500 A"));
        assert!(text.contains("Power:            0.5000 W"));
    }
}
