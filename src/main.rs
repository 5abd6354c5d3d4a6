use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use relayout::{ExperimentDocument, ExperimentsClient, LayoutClient, auto_layout, build_graph};

#[derive(Debug, Parser)]
#[command(
    name = "relayout",
    about = "Rebuild experiment graphs and round-trip fresh layout positions into their documents."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse an experiment document and print its graph as a summary.
    Inspect {
        /// Path to the experiment document. Use '-' to read from stdin.
        #[arg(short = 'i', long = "input")]
        input: String,
    },

    /// Run the full layout round trip over a local document file.
    Layout {
        /// Path to the experiment document. Use '-' to read from stdin.
        #[arg(short = 'i', long = "input")]
        input: String,

        /// Path for the patched document. Use '-' to write to stdout.
        #[arg(short = 'o', long = "output", default_value = "-")]
        output: String,

        /// Endpoint of the external auto-layout service.
        #[arg(long = "layout-url")]
        layout_url: String,
    },

    /// Fetch an experiment from the remote service, re-lay it out, save it back.
    Run {
        /// Base endpoint of the experiment-management service.
        #[arg(long = "endpoint")]
        endpoint: String,

        /// Workspace the experiment lives in.
        #[arg(long = "workspace-id")]
        workspace_id: String,

        /// Experiment to re-lay out.
        #[arg(long = "experiment-id")]
        experiment_id: String,

        /// Bearer token for the experiment-management service.
        #[arg(long = "token")]
        token: String,

        /// Endpoint of the external auto-layout service.
        #[arg(long = "layout-url")]
        layout_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Inspect { input } => inspect(&input),
        Command::Layout {
            input,
            output,
            layout_url,
        } => layout_file(&input, &output, &layout_url).await,
        Command::Run {
            endpoint,
            workspace_id,
            experiment_id,
            token,
            layout_url,
        } => run_remote(&endpoint, &workspace_id, &experiment_id, &token, &layout_url).await,
    }
}

fn inspect(input: &str) -> Result<()> {
    let raw = read_input(input)?;
    let doc = ExperimentDocument::parse(&raw)?;
    let graph = build_graph(&doc)?;

    println!("nodes: {}", graph.node_count());
    for node in graph.nodes() {
        println!(
            "  {} ({},{}) {}x{}",
            node.id, node.center_x, node.center_y, node.width, node.height
        );
    }
    println!("edges: {}", graph.edge_count());
    for edge in graph.edges() {
        println!("  {} -> {}", edge.source, edge.destination);
    }
    Ok(())
}

async fn layout_file(input: &str, output: &str, layout_url: &str) -> Result<()> {
    let raw = read_input(input)?;
    let client = LayoutClient::new(layout_url)?;
    let patched = auto_layout(&raw, &client).await?;
    write_output(output, &patched)
}

async fn run_remote(
    endpoint: &str,
    workspace_id: &str,
    experiment_id: &str,
    token: &str,
    layout_url: &str,
) -> Result<()> {
    let experiments = ExperimentsClient::new(endpoint, workspace_id, token);
    let layout = LayoutClient::new(layout_url)?;

    let raw = experiments.get_experiment(experiment_id).await?;
    let patched = auto_layout(&raw, &layout).await?;
    experiments.save_experiment(experiment_id, &patched).await?;

    eprintln!("experiment {experiment_id} re-laid out and saved");
    Ok(())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read document from stdin")?;
        Ok(raw)
    } else {
        let path = PathBuf::from(input);
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read document from {}", path.display()))
    }
}

fn write_output(output: &str, contents: &str) -> Result<()> {
    if output == "-" {
        io::stdout()
            .write_all(contents.as_bytes())
            .context("Failed to write document to stdout")
    } else {
        let path = PathBuf::from(output);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write document to {}", path.display()))
    }
}
