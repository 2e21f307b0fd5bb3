//! dmv CLI - Dependency Metrics Visualizer
//!
//! Loads an architecture description from a JSON document, validates
//! it, annotates every component with abstractness/instability, and
//! emits the text report and optional plot point JSON.
//!
//! Usage:
//!   dmv [OPTIONS] <INPUT>

use std::fs::{self, File};
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use dmv::{
    ComponentGraph, ComponentRecord, DmvConfig, annotate, find_config, load_config,
    write_points_json, write_report, write_summary,
};

/// dmv - plot component health on the abstractness/instability chart
#[derive(Parser, Debug)]
#[command(name = "dmv")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON document describing the architecture
    input: PathBuf,

    /// Output file for the text report (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write plot points as JSON to this file
    #[arg(long)]
    points: Option<PathBuf>,

    /// Show the one-line-per-component summary instead of the full report
    #[arg(short, long)]
    summary: bool,

    /// Skip referential validation (trusted inputs only; a dangling
    /// dependency reference aborts the run)
    #[arg(long)]
    no_validate: bool,

    /// Config file path (default: search for .dmv.toml next to the input)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Run options after resolving precedence: CLI flags override config
/// values, which override the built-in defaults.
#[derive(Debug, Clone, PartialEq)]
struct EffectiveOptions {
    validate: bool,
    report: Option<PathBuf>,
    points: Option<PathBuf>,
}

fn effective_options(args: &Args, config: &DmvConfig) -> EffectiveOptions {
    EffectiveOptions {
        validate: if args.no_validate {
            false
        } else {
            config.load.validate
        },
        report: args.output.clone().or_else(|| config.output.report.clone()),
        points: args.points.clone().or_else(|| config.output.points.clone()),
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("dmv error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Explicitly named config files must load; the implicit search may
    // come up empty.
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => match find_config(&args.input)? {
            Some(config) => {
                if args.verbose {
                    eprintln!("Loaded configuration from .dmv.toml");
                }
                config
            }
            None => DmvConfig::default(),
        },
    };

    let options = effective_options(&args, &config);

    let source = fs::read_to_string(&args.input)
        .map_err(|e| format!("'{}' not found or unreadable: {}", args.input.display(), e))?;
    let records: Vec<ComponentRecord> = serde_json::from_str(&source)
        .map_err(|e| format!("could not parse '{}': {}", args.input.display(), e))?;

    let mut graph = ComponentGraph::from_records(records, options.validate)?;
    annotate(&mut graph);

    if args.verbose {
        let modules: usize = graph.components().iter().map(|c| c.modules.len()).sum();
        eprintln!("Loaded {} component(s), {} module(s)", graph.len(), modules);
        if !options.validate {
            eprintln!("Warning: referential validation skipped");
        }
    }

    let mut writer: Box<dyn Write> = match &options.report {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(stdout()),
    };

    if args.summary {
        write_summary(&graph, &mut writer)?;
    } else {
        write_report(&graph, &mut writer)?;
    }
    writer.flush()?;

    if let Some(path) = &options.report {
        eprintln!("Report written to: {}", path.display());
    }

    if let Some(path) = &options.points {
        let mut file = BufWriter::new(File::create(path)?);
        write_points_json(&graph, &mut file)?;
        file.flush()?;
        eprintln!("Plot points written to: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::parse_from(argv)
    }

    fn config_with(validate: bool, report: Option<&str>, points: Option<&str>) -> DmvConfig {
        let mut config = DmvConfig::default();
        config.load.validate = validate;
        config.output.report = report.map(PathBuf::from);
        config.output.points = points.map(PathBuf::from);
        config
    }

    #[test]
    fn defaults_validate_and_write_to_stdout() {
        let options = effective_options(&parse(&["dmv", "arch.json"]), &DmvConfig::default());

        assert!(options.validate);
        assert!(options.report.is_none());
        assert!(options.points.is_none());
    }

    #[test]
    fn config_overrides_defaults() {
        let config = config_with(false, Some("report.txt"), Some("points.json"));
        let options = effective_options(&parse(&["dmv", "arch.json"]), &config);

        assert!(!options.validate);
        assert_eq!(options.report, Some(PathBuf::from("report.txt")));
        assert_eq!(options.points, Some(PathBuf::from("points.json")));
    }

    #[test]
    fn no_validate_flag_overrides_config() {
        let config = config_with(true, None, None);
        let options = effective_options(&parse(&["dmv", "--no-validate", "arch.json"]), &config);

        assert!(!options.validate);
    }

    #[test]
    fn validation_disabled_by_config_stays_disabled_without_flag() {
        let config = config_with(false, None, None);
        let options = effective_options(&parse(&["dmv", "arch.json"]), &config);

        assert!(!options.validate);
    }

    #[test]
    fn output_flags_override_config_paths() {
        let config = config_with(true, Some("from_config.txt"), Some("from_config.json"));
        let options = effective_options(
            &parse(&[
                "dmv",
                "-o",
                "from_cli.txt",
                "--points",
                "from_cli.json",
                "arch.json",
            ]),
            &config,
        );

        assert_eq!(options.report, Some(PathBuf::from("from_cli.txt")));
        assert_eq!(options.points, Some(PathBuf::from("from_cli.json")));
    }
}
