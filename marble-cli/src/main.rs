//! Marble Diagram CLI Application
//!
//! This is the command-line front end for the marble engine.
//! It uses the marble-engine library and adds:
//! - Built-in demo diagrams and TOML scenario files
//! - Retiming edits (the text equivalent of dragging a marble)
//! - Text diagram rendering and JSON reports

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use marble_engine::{fixtures, OperatorNode};
use rayon::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

mod config;
mod render;
mod report;

use config::Edit;

/// Marble diagrams - evaluate reactive operators over timed events
#[derive(Parser, Debug)]
#[command(name = "marble-cli")]
#[command(about = "Evaluate and draw reactive operator marble diagrams", long_about = None)]
#[command(version)]
struct Args {
    /// Built-in demo diagram to evaluate (map, filter, merge, zip, ...)
    #[arg(short, long, value_name = "NAME")]
    diagram: Option<String>,

    /// Evaluate every built-in demo diagram
    #[arg(long, conflicts_with = "diagram")]
    all: bool,

    /// Path to a scenario file (scenario.toml)
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["diagram", "all"])]
    scenario: Option<PathBuf>,

    /// Move a marble before drawing: INPUT:INDEX:T (can be repeated)
    #[arg(long, value_name = "EDIT")]
    retime: Vec<Edit>,

    /// Timeline width in characters
    #[arg(short, long, default_value_t = 60)]
    width: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// List the built-in demo diagrams
    #[arg(long)]
    list: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Marble CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using engine library v{}", marble_engine::VERSION);

    if args.list {
        for name in fixtures::DEMO_NAMES {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut nodes = load_nodes(&args)?;
    if nodes.is_empty() {
        println!("Marble CLI - No diagram specified");
        println!("\nQuick Start:");
        println!("  marble-cli --diagram zip");
        println!("  marble-cli --diagram combineLatest --retime 0:0:0.4");
        println!("  marble-cli --all --format json");
        println!("\nFor custom inputs:");
        println!("  marble-cli --scenario scenario.toml");
        println!("\nUse --help for more options");
        return Ok(());
    }

    for node in &mut nodes {
        for edit in &args.retime {
            edit.apply(node)?;
        }
    }

    let rendered = match args.format {
        Format::Text => {
            let width = args.width;
            let diagrams: Vec<String> = nodes
                .par_iter()
                .map(|node| render::render_node(node, width))
                .collect();
            diagrams.join("\n")
        }
        Format::Json => report::to_json(&report::build(&nodes))?,
    };

    write_output(args.output.as_ref(), &rendered)
}

/// Nodes selected by the command line, in display order
fn load_nodes(args: &Args) -> Result<Vec<OperatorNode>> {
    if let Some(path) = &args.scenario {
        log::info!("Loading scenario from: {:?}", path);
        let scenario = config::load_scenario(path)?;
        return Ok(vec![scenario.into_node()?]);
    }

    if args.all {
        return fixtures::demos().context("Failed to build demo diagrams");
    }

    match &args.diagram {
        Some(name) => {
            let node = fixtures::demo(name)
                .with_context(|| format!("Unknown diagram {:?}; try --list", name))?;
            Ok(vec![node])
        }
        None => Ok(Vec::new()),
    }
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            log::info!("Wrote {:?}", path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
