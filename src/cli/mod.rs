use crate::config::{OutputFormat, Settings};
use crate::resolver::{
    output_names, ClassifierOutputResolver, OutputNameSet, ProbabilitySource, TerminalDetector,
};
use crate::spec::{discover_specs, load_model, LoadError, Model};
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "nnoutputs")]
#[command(version, about = "Resolve the output blobs of neural network model specs", long_about = None)]
pub struct Args {
    /// Model spec file (.json or .toml) or directory of specs
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "NNOUTPUTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (only errors are logged)
    #[arg(short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the terminal (never consumed) blobs of each spec's layer graph
    Terminals {
        /// Specs to analyze
        specs: Vec<PathBuf>,
    },

    /// Show how a classifier's outputs were resolved
    Explain {
        /// Spec to explain
        spec: PathBuf,
    },
}

pub fn init_logging(args: &Args) {
    let level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

pub fn run(args: Args) -> Result<()> {
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(format) = args.format {
        settings.output.format = format;
    }
    if !settings.output.color {
        colored::control::set_override(false);
    }

    let failures = match &args.command {
        Some(Commands::Terminals { specs }) => show_terminals(specs, &settings)?,
        Some(Commands::Explain { spec }) => explain_spec(spec, &settings)?,
        None => {
            let Some(input) = args.input.as_deref() else {
                bail!("No input given. Pass a model spec file or a directory of specs.");
            };
            resolve_input(input, &settings)?
        }
    };

    if failures > 0 {
        bail!("{} spec(s) could not be loaded", failures);
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct SpecReport {
    spec: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outputs: Option<OutputNameSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct TerminalReport {
    spec: String,
    terminals: Vec<TerminalBlob>,
}

#[derive(Debug, Serialize)]
struct TerminalBlob {
    blob: String,
    producers: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExplainReport {
    spec: String,
    kind: &'static str,
    classifier: bool,
    excluded: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    probability_source: Option<ProbabilitySource>,
    outputs: OutputNameSet,
}

fn resolve_input(input: &Path, settings: &Settings) -> Result<usize> {
    if !input.exists() {
        bail!("Input does not exist: {}", input.display());
    }

    let specs = if input.is_dir() {
        let found = discover_specs(input, &settings.discovery.extensions);
        info!("Found {} spec(s) under {}", found.len(), input.display());
        found
    } else {
        vec![input.to_path_buf()]
    };

    let mut failures = 0;
    let mut reports = Vec::with_capacity(specs.len());

    for path in &specs {
        let report = match load(path) {
            Ok(model) => SpecReport {
                spec: path.display().to_string(),
                kind: Some(model.network.name()),
                outputs: Some(output_names(&model)),
                error: None,
            },
            Err(e) => {
                failures += 1;
                SpecReport {
                    spec: path.display().to_string(),
                    kind: None,
                    outputs: None,
                    error: Some(e.to_string()),
                }
            }
        };
        reports.push(report);
    }

    match settings.output.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => {
            for report in &reports {
                match (&report.kind, &report.outputs, &report.error) {
                    (Some(kind), Some(outputs), _) => println!(
                        "{} {} ({}): {}",
                        "✓".green(),
                        report.spec,
                        kind,
                        outputs.sorted().join(", ")
                    ),
                    (_, _, error) => println!(
                        "{} {} - {}",
                        "✗".red(),
                        report.spec,
                        error.as_deref().unwrap_or("failed to load")
                    ),
                }
            }
        }
    }

    Ok(failures)
}

fn show_terminals(specs: &[PathBuf], settings: &Settings) -> Result<usize> {
    let mut failures = 0;
    let mut reports = Vec::new();

    for path in specs {
        let model = match load(path) {
            Ok(model) => model,
            Err(e) => {
                report_failure(path, &e);
                failures += 1;
                continue;
            }
        };

        let analysis = TerminalDetector::analyze(model.network.layers());
        let terminals = analysis
            .terminals
            .sorted()
            .into_iter()
            .map(|blob| TerminalBlob {
                blob: blob.to_string(),
                producers: analysis.producers_of(blob).to_vec(),
            })
            .collect();

        reports.push(TerminalReport {
            spec: path.display().to_string(),
            terminals,
        });
    }

    match settings.output.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => {
            for report in &reports {
                println!("{}:", report.spec.bold());
                if report.terminals.is_empty() {
                    println!("  (no terminal blobs)");
                }
                for terminal in &report.terminals {
                    if terminal.producers.is_empty() {
                        println!("  {}", terminal.blob);
                    } else {
                        println!("  {} <- {}", terminal.blob, terminal.producers.join(", "));
                    }
                }
            }
        }
    }

    Ok(failures)
}

fn explain_spec(path: &Path, settings: &Settings) -> Result<usize> {
    let model = match load(path) {
        Ok(model) => model,
        Err(e) => {
            report_failure(path, &e);
            return Ok(1);
        }
    };

    let report = match model.network.as_classifier() {
        Some(classifier) => {
            let resolution = ClassifierOutputResolver::explain(&model.description, classifier);
            ExplainReport {
                spec: path.display().to_string(),
                kind: model.network.name(),
                classifier: true,
                excluded: resolution.excluded,
                probability_source: Some(resolution.probability_source),
                outputs: resolution.outputs,
            }
        }
        None => ExplainReport {
            spec: path.display().to_string(),
            kind: model.network.name(),
            classifier: false,
            excluded: Vec::new(),
            probability_source: None,
            outputs: output_names(&model),
        },
    };

    match settings.output.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_explanation(&report),
    }

    Ok(0)
}

fn print_explanation(report: &ExplainReport) {
    println!("{} ({})", report.spec.bold(), report.kind);

    if !report.classifier {
        println!("  No classifier rules apply; outputs are the declared interface outputs");
    } else {
        if report.excluded.is_empty() {
            println!("  Excluded: (none)");
        } else {
            println!("  Excluded: {}", report.excluded.join(", "));
        }

        match &report.probability_source {
            Some(ProbabilitySource::Explicit(name)) => {
                println!("  Probability blob: {} (labelProbabilityLayerName)", name);
            }
            Some(ProbabilitySource::LegacyTerminals(terminals)) => {
                println!(
                    "  Probability blob: {} {}",
                    terminals.sorted().join(", "),
                    "(legacy fallback: terminal blobs)".yellow()
                );
            }
            None => {}
        }
    }

    println!("  Outputs: {}", report.outputs.sorted().join(", "));
}

fn load(path: &Path) -> Result<Model, LoadError> {
    debug!("Reading {}", path.display());
    load_model(path)
}

fn report_failure(path: &Path, error: &LoadError) {
    eprintln!("{} {} - {}", "✗".red(), path.display(), error);
}
