//! `buffer2base64` CLI entry-point.
//!
//! Available sub-commands:
//! - `describe`: print node metadata as JSON.
//! - `run`     : execute a node definition against a batch of items.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use engine::{registry_from, NodeDefinition, NodeExecutor};
use plugin::NodeExecutionData;

#[derive(Parser)]
#[command(
    name = "buffer2base64",
    about = "Run the Buffer2base64 workflow node outside a host",
    version
)]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. `debug`, `engine=trace`).
    #[arg(long, global = true, env = "BUFFER2BASE64_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the metadata of registered node types.
    Describe {
        /// Only describe this node type.
        #[arg(long)]
        node_type: Option<String>,
    },
    /// Run a node definition once and print its output batches.
    Run {
        /// Path to the node definition JSON file.
        definition: PathBuf,
        /// Path to a JSON array of items; read from stdin when omitted.
        #[arg(long)]
        items: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(e) = dispatch(cli.command).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(command: Command) -> Result<()> {
    let executor = NodeExecutor::new(registry_from(nodes::builtin_nodes()));

    match command {
        Command::Describe { node_type } => {
            let descriptions: Vec<_> = match node_type {
                Some(name) => match executor.node_type(&name) {
                    Some(node) => vec![node.description()],
                    None => bail!("unknown node type '{name}'"),
                },
                None => executor.node_types().into_iter().map(|n| n.description()).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&descriptions)?);
        }
        Command::Run { definition, items } => {
            let definition: NodeDefinition = serde_json::from_str(&read_file(&definition)?)
                .with_context(|| format!("invalid node definition in {}", definition.display()))?;

            let raw = match &items {
                Some(path) => read_file(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("cannot read items from stdin")?;
                    buf
                }
            };
            let items: Vec<NodeExecutionData> =
                serde_json::from_str(&raw).context("items must be a JSON array of items")?;

            info!("running '{}' over {} item(s)", definition.name, items.len());
            let result = executor.run(&definition, items).await?;
            println!("{}", serde_json::to_string_pretty(&result.output)?);
        }
    }

    Ok(())
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read file {}", path.display()))
}
