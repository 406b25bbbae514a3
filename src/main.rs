use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;
use serde::Serialize;

use community_graph::config::DeriveConfig;
use community_graph::graph_file::{load_community_graph, VInt};
use community_graph::logger::init_logger;
use community_graph::{
    community_distance_graph, group_edges, group_nodes, largest_component, span_tree, tree_paths,
    GroupEdge, GroupNode,
};

#[derive(Parser)]
#[command(
    name = "community-graph",
    version,
    about = "Derive community-level graphs from a .graph file"
)]
struct Cli {
    /// Append log records to this file instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// YAML file with derivation settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print `src dst distance` for every pair of communities within reach.
    Distance {
        #[arg(long)]
        graph: PathBuf,
        /// Overrides `max_depth` of the config.
        #[arg(long, allow_negative_numbers = true)]
        max_depth: Option<i64>,
    },
    /// Print the size of the largest connected component.
    Component {
        #[arg(long)]
        graph: PathBuf,
    },
    /// Print the breadth-first tree paths from a vertex, one per line.
    Paths {
        #[arg(long)]
        graph: PathBuf,
        #[arg(long)]
        source: VInt,
    },
    /// Print the communities as group nodes and group edges, in JSON.
    Groups {
        #[arg(long)]
        graph: PathBuf,
    },
}

#[derive(Serialize)]
struct GroupReport {
    nodes: Vec<GroupNode<VInt>>,
    edges: Vec<GroupEdge>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => DeriveConfig::load(path)?,
        None => DeriveConfig::default(),
    };
    init_logger(cli.log_file.as_deref(), &config.log_level)?;
    debug!("running with {:?}", config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Distance { graph, max_depth } => {
            let (graph, communities) = load_community_graph(&graph)?;
            let max_depth = max_depth.unwrap_or(config.max_depth);
            let distances = community_distance_graph(&graph, &communities, max_depth);
            for (src, dst, distance) in distances.edges() {
                writeln!(out, "{} {} {}", src, dst, distance)?;
            }
        }
        Command::Component { graph } => {
            let (graph, _) = load_community_graph(&graph)?;
            let largest = largest_component(&graph);
            writeln!(
                out,
                "vertices: {}, edges: {}",
                largest.get_vertex_count(),
                largest.get_edge_count()
            )?;
        }
        Command::Paths { graph, source } => {
            let (graph, _) = load_community_graph(&graph)?;
            let tree = span_tree(&graph, &source);
            for path in tree_paths(&tree, &source)? {
                let line: Vec<String> = path.iter().map(|v| v.to_string()).collect();
                writeln!(out, "{}", line.join(" "))?;
            }
        }
        Command::Groups { graph } => {
            let (_, communities) = load_community_graph(&graph)?;
            let groups: Vec<_> = communities.into_values().collect();
            let nodes = group_nodes(&groups);
            let edges = group_edges(&nodes);
            writeln!(out, "{}", serde_json::to_string_pretty(&GroupReport { nodes, edges })?)?;
        }
    }
    Ok(())
}
