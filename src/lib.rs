pub mod analysis;
pub mod config;
pub mod error;
pub mod graph;
pub mod instance;
pub mod logging;
pub mod model;
pub mod ops;
pub mod schema;

pub use config::{Cli, Command, InterfaceAction};
pub use error::{Error, Result};
pub use graph::{Graph, SharedGraph, Triple, Uri};
pub use logging::{init_logging, LoggingConfig};
pub use model::{InterfaceDetails, InterfaceSummary, OperStatus};

use analysis::ConsistencyChecker;
use anyhow::Context;
use config::{load_config_file, resolve_generator_config, PartialGeneratorConfig};
use graph::turtle;
use instance::InstanceGenerator;
use schema::SchemaCompiler;
use std::path::{Path, PathBuf};

/// Dispatch one parsed invocation.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let file_config = match cli.config.as_ref() {
        Some(path) => load_config_file(path)?,
        None => PartialGeneratorConfig::default(),
    };

    match cli.command {
        Command::Compile { tree, output } => compile(&tree, &output),
        Command::Generate {
            output,
            count,
            inconsistency_rate,
            overlap_rate,
            seed,
        } => {
            let config = resolve_generator_config(
                count,
                inconsistency_rate,
                overlap_rate,
                seed,
                file_config,
            )?;
            generate(&output, config)
        }
        Command::Check {
            instances,
            schema,
            json,
        } => check(&instances, &schema, json),
        Command::Interfaces { instances, action } => interfaces(&instances, action),
        Command::Enable { instances, name } => mutate(&instances, |shared| {
            ops::set_enabled(shared, &name, true).map(|_| ())
        }),
        Command::Disable { instances, name } => mutate(&instances, |shared| {
            ops::set_enabled(shared, &name, false).map(|_| ())
        }),
        Command::Status {
            instances,
            name,
            status,
        } => mutate(&instances, |shared| {
            ops::set_oper_status(shared, &name, status).map(|_| ())
        }),
    }
}

fn compile(tree_path: &Path, output: &Path) -> anyhow::Result<()> {
    let tree = schema::read_tree(tree_path)?;
    tracing::info!(module = %tree.argument.as_deref().unwrap_or(&tree.keyword), "parsed statement tree");

    let mut graph = Graph::new();
    let root = SchemaCompiler::new(&mut graph).compile(&tree);
    tracing::info!(root = %root, triples = graph.len(), "compiled schema");

    turtle::write_file(&graph, output)
        .with_context(|| format!("failed to write {:?}", output))?;
    tracing::info!(path = %output.display(), "schema triples written");
    Ok(())
}

fn generate(output: &Path, config: instance::GeneratorConfig) -> anyhow::Result<()> {
    let mut graph = Graph::new();
    let summary = InstanceGenerator::new(config).generate(&mut graph);
    turtle::write_file(&graph, output)
        .with_context(|| format!("failed to write {:?}", output))?;
    println!(
        "generated {} interfaces ({} ipv4, {} ipv6) into {}",
        summary.interfaces,
        summary.ipv4_addresses,
        summary.ipv6_addresses,
        output.display()
    );
    Ok(())
}

fn load_population(instances: &Path, schema: &[PathBuf]) -> anyhow::Result<Graph> {
    let mut graph = Graph::new();
    for path in schema {
        let loaded = turtle::read_file(path)
            .with_context(|| format!("failed to load schema {:?}", path))?;
        graph.merge(loaded);
    }
    let loaded = turtle::read_file(instances)
        .with_context(|| format!("failed to load instances {:?}", instances))?;
    graph.merge(loaded);
    tracing::info!(triples = graph.len(), "graph loaded");
    Ok(graph)
}

fn check(instances: &Path, schema: &[PathBuf], json: bool) -> anyhow::Result<()> {
    let graph = load_population(instances, schema)?;
    let report = ConsistencyChecker::new(&graph).check_all();
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn interfaces(instances: &Path, action: InterfaceAction) -> anyhow::Result<()> {
    let graph = load_population(instances, &[])?;
    match action {
        InterfaceAction::Count => {
            println!("{}", ops::count_interfaces(&graph));
        }
        InterfaceAction::List { json } => {
            let list = ops::list_interfaces(&graph);
            if json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                for summary in list {
                    println!(
                        "{}\tenabled={}\toper-status={}",
                        summary.name.as_deref().unwrap_or("?"),
                        summary
                            .enabled
                            .map(|b| b.to_string())
                            .unwrap_or_else(|| "?".into()),
                        summary.oper_status.as_deref().unwrap_or("?"),
                    );
                }
            }
        }
        InterfaceAction::Show { name, json } => {
            let details = ops::interface_details(&graph, &name)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&details)?);
            } else {
                println!("interface: {}", details.interface);
                println!("name: {}", details.name);
                println!(
                    "enabled: {}",
                    details
                        .enabled
                        .map(|b| b.to_string())
                        .unwrap_or_else(|| "?".into())
                );
                println!("oper-status: {}", details.oper_status.as_deref().unwrap_or("?"));
                if let Some(ipv4) = &details.ipv4 {
                    match details.prefix_length {
                        Some(prefix) => println!("ipv4: {ipv4}/{prefix}"),
                        None => println!("ipv4: {ipv4}"),
                    }
                }
                if let Some(cidr) = &details.cidr {
                    println!("cidr: {cidr}");
                }
                if let Some(ipv6) = &details.ipv6 {
                    println!("ipv6: {ipv6}");
                }
            }
        }
    }
    Ok(())
}

/// Load, mutate under the shared lock, and rewrite the instance file.
fn mutate(
    instances: &Path,
    op: impl FnOnce(&SharedGraph) -> Result<()>,
) -> anyhow::Result<()> {
    let graph = load_population(instances, &[])?;
    let shared = SharedGraph::new(graph);
    op(&shared)?;
    turtle::write_file(&shared.read(), instances)
        .with_context(|| format!("failed to rewrite {:?}", instances))?;
    Ok(())
}
