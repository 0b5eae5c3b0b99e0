//! Single-source shortest paths over a weighted graph.
//!
//! On a time-expanded graph the distance to an event is the elapsed time
//! from the start event, so the settled order is chronological and the
//! earliest reachable event at the destination is the nearest one.
//!
//! All search state lives in the returned [`ShortestPaths`]; nothing is
//! kept between calls.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::hash::Hash;

use tracing::trace;

use super::cancel::CancelToken;
use crate::graph::{Weight, WeightedGraph};

/// The search was stopped through its [`CancelToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("search cancelled after settling {settled} vertices")]
pub struct Cancelled {
    pub settled: usize,
}

/// Distances and predecessors from one source vertex.
///
/// A vertex missing from the distance map is unreachable; a vertex missing
/// from the predecessor map has no predecessor (the source, or unreachable).
#[derive(Debug, Clone)]
pub struct ShortestPaths<V> {
    source: V,
    distance: HashMap<V, Weight>,
    predecessor: HashMap<V, V>,
    settled: usize,
}

impl<V: Clone + Eq + Hash> ShortestPaths<V> {
    /// Returns the source vertex.
    pub fn source(&self) -> &V {
        &self.source
    }

    /// Returns the shortest distance to `vertex`, or `None` if unreachable.
    pub fn distance(&self, vertex: &V) -> Option<Weight> {
        self.distance.get(vertex).copied()
    }

    /// Returns the vertex preceding `vertex` on its shortest path.
    pub fn predecessor(&self, vertex: &V) -> Option<&V> {
        self.predecessor.get(vertex)
    }

    pub fn is_reachable(&self, vertex: &V) -> bool {
        self.distance.contains_key(vertex)
    }

    /// Iterate over reachable vertices and their distances.
    pub fn reachable(&self) -> impl Iterator<Item = (&V, Weight)> {
        self.distance.iter().map(|(v, d)| (v, *d))
    }

    /// Number of reachable vertices, the source included.
    pub fn reachable_count(&self) -> usize {
        self.distance.len()
    }

    /// Number of vertices the search settled.
    pub fn settled_count(&self) -> usize {
        self.settled
    }

    /// Assemble a result from raw maps.
    #[cfg(test)]
    pub(crate) fn from_parts(
        source: V,
        distance: HashMap<V, Weight>,
        predecessor: HashMap<V, V>,
    ) -> Self {
        let settled = distance.len();
        Self {
            source,
            distance,
            predecessor,
            settled,
        }
    }
}

/// Compute shortest paths from `source` to every reachable vertex.
///
/// Uses a binary heap keyed on `(distance, vertex)`, so equal-distance
/// vertices settle in vertex order and results are deterministic. The
/// source need not be a vertex of the graph; it is then the only reachable
/// vertex.
///
/// # Errors
///
/// Returns [`Cancelled`] if `cancel` is raised before the search finishes.
///
/// # Examples
///
/// ```
/// use transit_planner::graph::{DiGraph, WeightedGraph};
/// use transit_planner::planner::{CancelToken, shortest_paths};
///
/// let mut graph = DiGraph::new();
/// graph.upsert_edge('a', 'b', 5);
/// graph.upsert_edge('b', 'c', 5);
/// graph.upsert_edge('a', 'c', 20);
///
/// let paths = shortest_paths(&graph, &'a', &CancelToken::new()).unwrap();
/// assert_eq!(paths.distance(&'c'), Some(10));
/// assert_eq!(paths.predecessor(&'c'), Some(&'b'));
/// ```
pub fn shortest_paths<V, G>(
    graph: &G,
    source: &V,
    cancel: &CancelToken,
) -> Result<ShortestPaths<V>, Cancelled>
where
    V: Clone + Eq + Hash + Ord,
    G: WeightedGraph<V>,
{
    let mut distance: HashMap<V, Weight> = HashMap::new();
    let mut predecessor: HashMap<V, V> = HashMap::new();
    let mut visited: HashSet<V> = HashSet::new();

    distance.insert(source.clone(), 0);

    // Reverse makes BinaryHeap (max) behave as a min-heap.
    let mut heap: BinaryHeap<Reverse<(Weight, V)>> = BinaryHeap::new();
    heap.push(Reverse((0, source.clone())));

    while let Some(Reverse((cost, vertex))) = heap.pop() {
        if cancel.is_cancelled() {
            return Err(Cancelled {
                settled: visited.len(),
            });
        }

        // Later entries for a settled vertex are stale.
        if !visited.insert(vertex.clone()) {
            continue;
        }

        for (next, weight) in graph.out_edges(&vertex) {
            if visited.contains(next) {
                continue;
            }
            let Some(candidate) = cost.checked_add(weight) else {
                continue;
            };
            if distance.get(next).is_none_or(|&known| candidate < known) {
                distance.insert(next.clone(), candidate);
                predecessor.insert(next.clone(), vertex.clone());
                heap.push(Reverse((candidate, next.clone())));
            }
        }
    }

    trace!(
        settled = visited.len(),
        vertices = graph.vertex_count(),
        "shortest paths complete"
    );

    Ok(ShortestPaths {
        source: source.clone(),
        distance,
        predecessor,
        settled: visited.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DiGraph;

    fn run(graph: &DiGraph<u8>, source: u8) -> ShortestPaths<u8> {
        shortest_paths(graph, &source, &CancelToken::new()).unwrap()
    }

    #[test]
    fn empty_graph_reaches_only_source() {
        let graph: DiGraph<u8> = DiGraph::new();
        let paths = run(&graph, 0);

        assert_eq!(paths.distance(&0), Some(0));
        assert_eq!(paths.reachable_count(), 1);
        assert!(paths.predecessor(&0).is_none());
    }

    #[test]
    fn source_without_out_edges() {
        let mut graph = DiGraph::new();
        graph.upsert_edge(1, 2, 5);
        graph.add_vertex(0);

        let paths = run(&graph, 0);
        assert_eq!(paths.distance(&0), Some(0));
        assert!(!paths.is_reachable(&1));
        assert!(!paths.is_reachable(&2));
    }

    #[test]
    fn prefers_cheaper_indirect_path() {
        let mut graph = DiGraph::new();
        graph.upsert_edge(0, 1, 1);
        graph.upsert_edge(1, 2, 1);
        graph.upsert_edge(0, 2, 5);

        let paths = run(&graph, 0);
        assert_eq!(paths.distance(&2), Some(2));
        assert_eq!(paths.predecessor(&2), Some(&1));
        assert_eq!(paths.predecessor(&1), Some(&0));
    }

    #[test]
    fn direct_edge_seeds_are_improved() {
        // The source's own out-edges are not final distances.
        let mut graph = DiGraph::new();
        graph.upsert_edge(0, 3, 100);
        graph.upsert_edge(0, 1, 10);
        graph.upsert_edge(1, 3, 10);

        assert_eq!(run(&graph, 0).distance(&3), Some(20));
    }

    #[test]
    fn zero_weight_edges() {
        let mut graph = DiGraph::new();
        graph.upsert_edge(0, 1, 0);
        graph.upsert_edge(1, 2, 0);

        let paths = run(&graph, 0);
        assert_eq!(paths.distance(&2), Some(0));
        assert_eq!(paths.predecessor(&2), Some(&1));
    }

    #[test]
    fn cycles_terminate() {
        let mut graph = DiGraph::new();
        graph.upsert_edge(0, 1, 1);
        graph.upsert_edge(1, 0, 1);
        graph.upsert_edge(1, 2, 1);

        let paths = run(&graph, 0);
        assert_eq!(paths.distance(&2), Some(2));
        assert!(paths.predecessor(&0).is_none());
        assert_eq!(paths.settled_count(), 3);
    }

    #[test]
    fn overflowing_sums_are_skipped() {
        let mut graph = DiGraph::new();
        graph.upsert_edge(0, 1, Weight::MAX);
        graph.upsert_edge(1, 2, 1);

        let paths = run(&graph, 0);
        assert_eq!(paths.distance(&1), Some(Weight::MAX));
        assert!(!paths.is_reachable(&2));
    }

    #[test]
    fn equal_cost_ties_are_deterministic() {
        let mut graph = DiGraph::new();
        graph.upsert_edge(0, 1, 5);
        graph.upsert_edge(0, 2, 5);
        graph.upsert_edge(1, 3, 5);
        graph.upsert_edge(2, 3, 5);

        // Vertex 1 settles before 2, so it claims 3 first.
        for _ in 0..10 {
            assert_eq!(run(&graph, 0).predecessor(&3), Some(&1));
        }
    }

    #[test]
    fn cancelled_search_stops() {
        let mut graph = DiGraph::new();
        graph.upsert_edge(0, 1, 1);

        let cancel = CancelToken::new();
        cancel.cancel();
        let err = shortest_paths(&graph, &0u8, &cancel).unwrap_err();
        assert_eq!(err, Cancelled { settled: 0 });
    }
}
