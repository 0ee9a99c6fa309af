//! Relevance ranking of crawled documents
//!
//! Builds a link graph over successful records and keeps the PageRank
//! winners. A record links to another when the other's URL appears in
//! its extracted text, which works because extraction appends resolved
//! anchor URLs inline.

use petgraph::graph::DiGraph;
use tracing::{debug, info};

use crate::config::RankConfig;
use crate::document::DocumentRecord;
use crate::rank::pagerank::pagerank;

/// Selects the `top_k` most central records
///
/// Error records never participate. Ties keep the input order, so the
/// result is deterministic for a fixed input. Asking for more records
/// than exist returns all of them, ranked.
pub fn rank_candidates(
    records: &[DocumentRecord],
    top_k: usize,
    config: &RankConfig,
) -> Vec<DocumentRecord> {
    let candidates: Vec<&DocumentRecord> =
        records.iter().filter(|r| !r.is_error).collect();
    if candidates.is_empty() {
        return Vec::new();
    }

    let graph = build_link_graph(&candidates);
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "link graph built"
    );

    let scores = pagerank(
        &graph,
        config.damping,
        config.tolerance,
        config.max_iterations,
    );

    let mut ranked: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(top_k);

    info!(
        candidates = candidates.len(),
        selected = ranked.len(),
        "candidate ranking complete"
    );
    ranked
        .into_iter()
        .map(|(index, _)| candidates[index].clone())
        .collect()
}

/// One node per record in input order, an edge A -> B when B's URL
/// occurs in A's text. Self references yield self loops.
fn build_link_graph(candidates: &[&DocumentRecord]) -> DiGraph<String, ()> {
    let mut graph = DiGraph::new();
    let nodes: Vec<_> = candidates
        .iter()
        .map(|r| graph.add_node(r.id.clone()))
        .collect();

    for (from, record) in candidates.iter().enumerate() {
        let content = match record.content.as_deref() {
            Some(c) => c,
            None => continue,
        };
        for (to, target) in candidates.iter().enumerate() {
            if content.contains(target.source.as_str()) {
                graph.add_edge(nodes[from], nodes[to], ());
            }
        }
    }
    graph
}
