//! PageRank over a directed graph
//!
//! Power iteration with uniform teleport, convergence on L1 change.
//! Dangling nodes spread their mass uniformly over the whole graph, so
//! the score vector keeps summing to one.

use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// Computes PageRank scores for every node, indexed by node index
///
/// `damping` is the probability of following a link rather than
/// teleporting. Iteration stops when the L1 change between successive
/// score vectors drops below `tolerance`, or after `max_iterations`.
pub fn pagerank<N, E>(
    graph: &DiGraph<N, E>,
    damping: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Vec<f64> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }

    let uniform = 1.0 / n as f64;
    let teleport = (1.0 - damping) * uniform;
    let mut scores = vec![uniform; n];

    let out_degrees: Vec<usize> = graph
        .node_indices()
        .map(|i| graph.edges_directed(i, Direction::Outgoing).count())
        .collect();

    for _ in 0..max_iterations {
        // Mass parked on nodes with no outgoing edges
        let dangling_mass: f64 = graph
            .node_indices()
            .filter(|i| out_degrees[i.index()] == 0)
            .map(|i| scores[i.index()])
            .sum();

        let mut next = vec![teleport + damping * dangling_mass * uniform; n];
        for node in graph.node_indices() {
            let degree = out_degrees[node.index()];
            if degree == 0 {
                continue;
            }
            let share = damping * scores[node.index()] / degree as f64;
            for edge in graph.edges_directed(node, Direction::Outgoing) {
                next[edge.target().index()] += share;
            }
        }

        let delta: f64 = scores
            .iter()
            .zip(next.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        scores = next;
        if delta < tolerance {
            break;
        }
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sums_to_one(scores: &[f64]) {
        let total: f64 = scores.iter().sum();
        assert!((total - 1.0).abs() < 1e-6, "scores sum to {total}");
    }

    #[test]
    fn test_empty_graph() {
        let graph: DiGraph<(), ()> = DiGraph::new();
        assert!(pagerank(&graph, 0.9, 1e-6, 100).is_empty());
    }

    #[test]
    fn test_single_node() {
        let mut graph: DiGraph<(), ()> = DiGraph::new();
        graph.add_node(());
        let scores = pagerank(&graph, 0.9, 1e-6, 100);
        assert_eq!(scores, vec![1.0]);
    }

    #[test]
    fn test_chain_favors_downstream() {
        // a -> b -> c: c collects the most mass, a only teleport
        let mut graph: DiGraph<(), ()> = DiGraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        graph.add_edge(a, b, ());
        graph.add_edge(b, c, ());

        let scores = pagerank(&graph, 0.9, 1e-6, 100);
        assert_sums_to_one(&scores);
        assert!(scores[c.index()] > scores[b.index()]);
        assert!(scores[b.index()] > scores[a.index()]);
    }

    #[test]
    fn test_dangling_mass_redistributed() {
        // b has no outgoing edges; the sum must still be one
        let mut graph: DiGraph<(), ()> = DiGraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        graph.add_edge(a, b, ());

        let scores = pagerank(&graph, 0.9, 1e-6, 100);
        assert_sums_to_one(&scores);
        assert!(scores[b.index()] > scores[a.index()]);
    }

    #[test]
    fn test_symmetric_cycle_is_uniform() {
        let mut graph: DiGraph<(), ()> = DiGraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        graph.add_edge(a, b, ());
        graph.add_edge(b, a, ());

        let scores = pagerank(&graph, 0.9, 1e-6, 100);
        assert_sums_to_one(&scores);
        assert!((scores[a.index()] - scores[b.index()]).abs() < 1e-9);
    }

    #[test]
    fn test_self_loop_retains_mass() {
        let mut graph: DiGraph<(), ()> = DiGraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        graph.add_edge(a, a, ());
        graph.add_edge(b, a, ());

        let scores = pagerank(&graph, 0.9, 1e-6, 100);
        assert_sums_to_one(&scores);
        assert!(scores[a.index()] > scores[b.index()]);
    }
}
