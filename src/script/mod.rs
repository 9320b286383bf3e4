//! Session scripts: drive the graph store from text.
//!
//! A script is a replayable log of editor gestures. It lets the store, the
//! validator and the analyzer run headless (from the CLI or in tests)
//! without a presentation layer. Nothing is ever written back.
//!
//! # Grammar Overview
//!
//! ```text
//! script    = { line }
//! line      = comment | command [comment] | empty
//! comment   = ('#' | ';') { any_char }
//! command   = keyword { argument }
//! terminal  = ref '.' ("positive" | "negative" | "input" | "output")
//! ref       = alias | component-id | wire-id
//! value     = number [unit_suffix] | "none"
//! ```
//!
//! # Commands
//!
//! | Command | Effect |
//! |---------|--------|
//! | `add <kind> [as <alias>]` | Add a voltage source or resistor |
//! | `move <ref> <dx> <dy>` | Drag a component by a delta |
//! | `set <ref> key=value ...` | Patch `label`, `voltage` or `resistance` |
//! | `select <ref>` / `select none` | Select a component |
//! | `select-wire <ref>` / `select-wire none` | Select a wire |
//! | `wire <terminal> <terminal> [as <alias>]` | Draw a wire in one step |
//! | `start <terminal>` | Begin dragging a wire |
//! | `draft <x> <y>` | Move the pointer while dragging |
//! | `finish <terminal> [as <alias>]` | Drop the wire on a terminal |
//! | `cancel` | Abandon the wire being dragged |
//! | `delete <ref>` | Delete a component and its wires |
//! | `unwire <ref>` | Delete a wire |
//! | `point <terminal>` | Report a terminal's canvas position |
//! | `validate` | Report validation problems |
//! | `analyze` | Report the circuit analysis |
//!
//! # Example
//!
//! ```text
//! # 10 V across two 100 Ω resistors in series
//! add source as V1
//! set V1 voltage=10
//! add resistor as R1
//! add resistor as R2
//!
//! wire V1.positive R1.input
//! wire R1.output R2.input
//! wire R2.output V1.negative
//!
//! analyze
//! ```

mod ast;
mod lexer;
mod parser;
mod runner;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;
pub use runner::{Report, Session};

use crate::error::Result;
use crate::store::CircuitStore;

/// Parse a script string.
pub fn parse(input: &str) -> Result<Script> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a script file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<Script> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::CanvasError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}

/// Parse and run a script against `store`, returning the session and the
/// reports it produced.
pub fn run(input: &str, store: CircuitStore) -> Result<(Session, Vec<Report>)> {
    let script = parse(input)?;
    let mut session = Session::new(store);
    let reports = session.run(&script)?;
    Ok((session, reports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Topology;

    fn analysis(reports: &[Report]) -> &crate::analysis::SimulationResult {
        reports
            .iter()
            .find_map(|r| match r {
                Report::Analysis { result: Some(result), .. } => Some(result),
                _ => None,
            })
            .expect("script should produce an analysis")
    }

    #[test]
    fn test_series_demo() {
        let (session, reports) =
            run(include_str!("../../demos/series.canvas"), CircuitStore::new()).unwrap();
        assert_eq!(session.store().wires().len(), 3);
        let result = analysis(&reports);
        assert_eq!(result.topology, Topology::Series);
        assert_eq!(result.display().current, "0.0500");
        assert_eq!(result.display().power, "0.5000");
    }

    #[test]
    fn test_parallel_demo() {
        let (session, reports) =
            run(include_str!("../../demos/parallel.canvas"), CircuitStore::new()).unwrap();
        assert_eq!(session.store().wires().len(), 4);
        assert!(reports
            .iter()
            .any(|r| matches!(r, Report::WiringAborted { .. })));
        let result = analysis(&reports);
        assert_eq!(result.topology, Topology::ParallelComplex);
        assert_eq!(result.display().total_resistance, 66.67);
    }
}
