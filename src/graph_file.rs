use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;

use crate::community::CommunityMap;
use crate::config::READ_BUFFER_SIZE;
use crate::graph::Graph;

pub type VInt = u32;

/// A loaded graph and the communities read from its vertex lines.
pub type CommunityGraph = (Graph<VInt>, CommunityMap<VInt, VInt>);

/// Load a `.graph` file with its community column.
///
/// The first line is a header and is skipped. Vertex lines read
/// `v <id> <label> <community>` (label and community optional), edge lines
/// read `e <src> <dst>`. Edges are undirected. Blank lines are ignored.
pub fn load_community_graph(path: impl AsRef<Path>) -> Result<CommunityGraph> {
    let path = path.as_ref();
    let graph_file = File::open(path)
        .with_context(|| format!("failed to open graph file {}", path.display()))?;
    let graph_reader = BufReader::with_capacity(READ_BUFFER_SIZE, graph_file);
    let loaded = parse_community_graph(graph_reader)
        .with_context(|| format!("in graph file {}", path.display()))?;
    info!(
        "loaded {}: {} vertices, {} edges, {} communities",
        path.display(),
        loaded.0.get_vertex_count(),
        loaded.0.get_edge_count(),
        loaded.1.len()
    );
    Ok(loaded)
}

pub fn parse_community_graph(reader: impl BufRead) -> Result<CommunityGraph> {
    let mut graph = Graph::new();
    let mut communities = CommunityMap::new();
    for (line_idx, line) in reader.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line.with_context(|| format!("failed to read line {}", line_no))?;
        if line_no == 1 {
            // The header line, just skip it.
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => {}
            ["v", vid, rest @ ..] => {
                let vid = parse_id(vid, line_no)?;
                graph.insert_vertex(vid);
                if let Some(comm) = rest.get(1) {
                    let comm_id = parse_id(comm, line_no)?;
                    communities.entry(comm_id).or_default().insert(vid);
                }
            }
            ["e", src, dst] => {
                graph.insert_edge(parse_id(src, line_no)?, parse_id(dst, line_no)?);
            }
            _ => bail!("line {}: unrecognized record {:?}", line_no, line),
        }
    }
    Ok((graph, communities))
}

fn parse_id(token: &str, line_no: usize) -> Result<VInt> {
    token
        .parse()
        .with_context(|| format!("line {}: invalid vertex id {:?}", line_no, token))
}
