//! circuit-canvas - headless driver for the schematic editor core
//!
//! Replays a session script against a fresh graph store and prints every
//! report, followed by the final validation and analysis.
//!
//! # Usage
//!
//! ```bash
//! circuit-canvas series.canvas
//! cat series.canvas | circuit-canvas --json
//! RUST_LOG=debug circuit-canvas series.canvas
//! ```

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use circuit_canvas::{
    analysis::DisplayResult,
    error::{CanvasError, Result},
    script::{self, Report},
    CanvasConfig, CircuitStore, ValidationReport, DEFAULT_COMPONENT_HEIGHT,
    DEFAULT_COMPONENT_WIDTH,
};

/// Schematic editor session runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the session script (reads stdin when omitted)
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Component box width used for terminal positions
    #[arg(long, default_value_t = DEFAULT_COMPONENT_WIDTH)]
    width: f64,

    /// Component box height used for terminal positions
    #[arg(long, default_value_t = DEFAULT_COMPONENT_HEIGHT)]
    height: f64,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    reports: &'a [Report],
    validation: ValidationReport,
    analysis: Option<DisplayResult>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Read the script
    let script = match &args.script {
        Some(path) => script::parse_file(path)?,
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| CanvasError::FileReadError {
                    path: "<stdin>".to_string(),
                    source: e,
                })?;
            script::parse(&input)?
        }
    };

    // Build the store
    let config = CanvasConfig::new().with_component_size(args.width, args.height);
    let store = CircuitStore::with_config(config)?;

    // Replay
    let mut session = script::Session::new(store);
    let reports = session.run(&script)?;
    let store = session.into_store();

    let validation = store.validate_circuit();
    let analysis = store.analyze_circuit();

    if args.json {
        let output = Output {
            reports: &reports,
            validation,
            analysis: analysis.as_ref().map(|r| r.display()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for report in &reports {
        println!("{}", report);
    }
    println!("--- final state ---");
    println!(
        "{} component(s), {} wire(s)",
        store.components().len(),
        store.wires().len()
    );
    println!("{}", Report::Validation { line: 0, report: validation });
    println!("{}", Report::Analysis { line: 0, result: analysis });

    Ok(())
}
