//! metadata-visitor - walks a metadata model document and prints a report
//!
//! Loads an assembly from a JSON model, runs one of the stock visitors over it
//! (or over a single type) and writes the visitor's value to stdout.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use metadata_visitor::logging::init_logger;
use metadata_visitor::metadata::load_assembly;
use metadata_visitor::visitor::transforms::{ElementCounter, ElementCounts, MemberOutline};
use metadata_visitor::{ReflectionElement, ToElement, VisitorRef, VisitorRefExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Report {
    /// Element totals per kind, as JSON
    Counts,
    /// One indented line per assembly, type and member
    Outline,
}

#[derive(Parser, Debug)]
#[command(name = "metadata-visitor")]
#[command(about = "Traverse a metadata model and report on its elements")]
struct Cli {
    /// Path to a JSON metadata model
    model: PathBuf,

    /// Report to produce
    #[arg(long, value_enum, default_value = "counts")]
    report: Report,

    /// Restrict the traversal to one type (simple or namespace-qualified name)
    #[arg(long = "type")]
    type_name: Option<String>,

    /// Also count parameters and local variables (counts report only)
    #[arg(long)]
    bodies: bool,

    /// Log filter, e.g. "debug" or "metadata_visitor=trace" (defaults to RUST_LOG, then "info")
    #[arg(long)]
    log_level: Option<String>,

    /// Append debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable ANSI colors in log output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let cli = Cli::parse();

    let _guard = match init_logger(cli.no_color, cli.log_level.as_deref(), cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let assembly = load_assembly(&cli.model)?;

    let root: ReflectionElement = match &cli.type_name {
        Some(name) => assembly
            .find_type(name)
            .with_context(|| format!("type '{}' not found in assembly '{}'", name, assembly.name()))?
            .to_element()
            .into(),
        None => assembly.to_element().into(),
    };
    info!("Visiting {} with the {:?} report", root.kind(), cli.report);

    match cli.report {
        Report::Counts => {
            let counter = if cli.bodies {
                ElementCounter::with_bodies()
            } else {
                ElementCounter::new()
            };
            let visitor: VisitorRef<ElementCounts> = Arc::new(counter);
            let counts = visitor.visit(Some(&root))?.value()?;
            println!("{}", serde_json::to_string_pretty(&counts)?);
        }
        Report::Outline => {
            let visitor: VisitorRef<Vec<String>> = Arc::new(MemberOutline::new());
            for line in visitor.visit(Some(&root))?.value()? {
                println!("{}", line);
            }
        }
    }
    Ok(())
}
