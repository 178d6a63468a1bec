//! Command-line surface and configuration layering.
//!
//! Generator settings resolve CLI flag -> config file -> default, the
//! same precedence for every knob.

use crate::instance::GeneratorConfig;
use crate::model::OperStatus;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "yanggraph", about = "Triple-graph tooling for YANG-described network interfaces", version)]
pub struct Cli {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to a configuration file (YAML or JSON)",
        global = true
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a parsed schema statement tree (JSON) into schema triples.
    Compile {
        /// Statement tree in JSON interchange form.
        tree: PathBuf,
        /// Destination Turtle file.
        output: PathBuf,
    },
    /// Generate a synthetic interface population with seeded defects.
    Generate {
        /// Destination Turtle file.
        output: PathBuf,
        #[arg(long, env = "YANGGRAPH_COUNT", value_name = "N")]
        count: Option<usize>,
        #[arg(long, value_name = "RATE")]
        inconsistency_rate: Option<f64>,
        #[arg(long, value_name = "RATE")]
        overlap_rate: Option<f64>,
        #[arg(long, env = "YANGGRAPH_SEED", value_name = "SEED")]
        seed: Option<u64>,
    },
    /// Run the consistency checks over a populated graph.
    Check {
        /// Instance data (Turtle).
        instances: PathBuf,
        /// Additional schema/ontology files merged in before checking.
        #[arg(long, value_name = "FILE")]
        schema: Vec<PathBuf>,
        /// Emit the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Count, list, or inspect interfaces.
    Interfaces {
        /// Instance data (Turtle).
        instances: PathBuf,
        #[command(subcommand)]
        action: InterfaceAction,
    },
    /// Enable an interface and rewrite the instance file.
    Enable {
        instances: PathBuf,
        name: String,
    },
    /// Disable an interface and rewrite the instance file.
    Disable {
        instances: PathBuf,
        name: String,
    },
    /// Set the operational status of an interface.
    Status {
        instances: PathBuf,
        name: String,
        #[arg(value_enum)]
        status: OperStatus,
    },
}

#[derive(Subcommand, Debug)]
pub enum InterfaceAction {
    /// Print the number of interfaces.
    Count,
    /// List every interface with its state.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show one interface in detail.
    Show {
        name: String,
        #[arg(long)]
        json: bool,
    },
}

/// Generator settings as they appear in a config file; every field
/// optional.
#[derive(Debug, Default, Deserialize)]
pub struct PartialGeneratorConfig {
    pub count: Option<usize>,
    pub inconsistency_rate: Option<f64>,
    pub overlap_rate: Option<f64>,
    pub seed: Option<u64>,
}

pub fn load_config_file(path: &Path) -> Result<PartialGeneratorConfig> {
    anyhow::ensure!(path.exists(), "config file {:?} does not exist", path);
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    let ext = path
        .extension()
        .and_then(|os| os.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {:?}", path))?,
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {:?}", path))?,
        other => anyhow::bail!("unsupported config extension: {other}"),
    };
    Ok(parsed)
}

/// Merge CLI flags over file values over defaults, then validate.
pub fn resolve_generator_config(
    cli_count: Option<usize>,
    cli_inconsistency_rate: Option<f64>,
    cli_overlap_rate: Option<f64>,
    cli_seed: Option<u64>,
    file: PartialGeneratorConfig,
) -> Result<GeneratorConfig> {
    let defaults = GeneratorConfig::default();
    let config = GeneratorConfig {
        count: cli_count.or(file.count).unwrap_or(defaults.count),
        inconsistency_rate: cli_inconsistency_rate
            .or(file.inconsistency_rate)
            .unwrap_or(defaults.inconsistency_rate),
        overlap_rate: cli_overlap_rate
            .or(file.overlap_rate)
            .unwrap_or(defaults.overlap_rate),
        seed: cli_seed.or(file.seed),
    };

    anyhow::ensure!(config.count >= 1, "interface count must be positive");
    anyhow::ensure!(
        (0.0..=1.0).contains(&config.inconsistency_rate),
        "inconsistency rate must be within [0, 1]"
    );
    anyhow::ensure!(
        (0.0..=1.0).contains(&config.overlap_rate),
        "overlap rate must be within [0, 1]"
    );
    Ok(config)
}
