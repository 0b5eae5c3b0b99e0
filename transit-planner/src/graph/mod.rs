//! Weighted directed graph.
//!
//! The planner only needs three capabilities from a graph: insert or update
//! an edge, list a vertex's outgoing edges, and enumerate all vertices. They
//! are expressed as the [`WeightedGraph`] trait so the search is not tied to
//! one storage layout. [`DiGraph`] is the hash-map implementation used by
//! the timetable.

use std::collections::HashMap;
use std::hash::Hash;

/// Edge weight: elapsed seconds on a time-expanded graph.
pub type Weight = u32;

/// Capability interface for a directed graph with integer edge weights.
pub trait WeightedGraph<V> {
    /// Insert an edge, or replace the weight of an existing one.
    ///
    /// Both endpoints become vertices. Returns the previous weight, if the
    /// edge already existed.
    fn upsert_edge(&mut self, from: V, to: V, weight: Weight) -> Option<Weight>;

    /// Iterate over the outgoing edges of `vertex` as `(target, weight)`.
    ///
    /// Unknown vertices have no outgoing edges.
    fn out_edges<'a>(&'a self, vertex: &V) -> impl Iterator<Item = (&'a V, Weight)> + 'a
    where
        V: 'a;

    /// Iterate over every vertex.
    fn vertices<'a>(&'a self) -> impl Iterator<Item = &'a V> + 'a
    where
        V: 'a;

    /// Number of vertices.
    fn vertex_count(&self) -> usize;
}

/// Adjacency-map directed graph.
#[derive(Debug, Clone)]
pub struct DiGraph<V> {
    adjacency: HashMap<V, HashMap<V, Weight>>,
}

impl<V> Default for DiGraph<V> {
    fn default() -> Self {
        Self {
            adjacency: HashMap::new(),
        }
    }
}

impl<V: Clone + Eq + Hash> DiGraph<V> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex with no edges. Returns false if it was already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.adjacency.contains_key(&vertex) {
            return false;
        }
        self.adjacency.insert(vertex, HashMap::new());
        true
    }

    /// Returns true if the vertex is present.
    pub fn contains(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Returns the weight of the edge `from -> to`, if present.
    pub fn weight(&self, from: &V, to: &V) -> Option<Weight> {
        self.adjacency.get(from)?.get(to).copied()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(HashMap::len).sum()
    }
}

impl<V: Clone + Eq + Hash> WeightedGraph<V> for DiGraph<V> {
    fn upsert_edge(&mut self, from: V, to: V, weight: Weight) -> Option<Weight> {
        self.add_vertex(to.clone());
        self.adjacency.entry(from).or_default().insert(to, weight)
    }

    fn out_edges<'a>(&'a self, vertex: &V) -> impl Iterator<Item = (&'a V, Weight)> + 'a
    where
        V: 'a,
    {
        self.adjacency
            .get(vertex)
            .into_iter()
            .flat_map(|targets| targets.iter().map(|(v, w)| (v, *w)))
    }

    fn vertices<'a>(&'a self) -> impl Iterator<Item = &'a V> + 'a
    where
        V: 'a,
    {
        self.adjacency.keys()
    }

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph() {
        let g: DiGraph<u8> = DiGraph::new();
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.out_edges(&1).count(), 0);
    }

    #[test]
    fn upsert_inserts_both_endpoints() {
        let mut g = DiGraph::new();
        assert_eq!(g.upsert_edge(1, 2, 10), None);

        assert!(g.contains(&1));
        assert!(g.contains(&2));
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.weight(&1, &2), Some(10));
        assert_eq!(g.weight(&2, &1), None);
    }

    #[test]
    fn upsert_replaces_weight() {
        let mut g = DiGraph::new();
        g.upsert_edge(1, 2, 10);
        assert_eq!(g.upsert_edge(1, 2, 7), Some(10));
        assert_eq!(g.weight(&1, &2), Some(7));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn out_edges_lists_targets() {
        let mut g = DiGraph::new();
        g.upsert_edge(1, 2, 10);
        g.upsert_edge(1, 3, 20);
        g.upsert_edge(2, 3, 5);

        let mut edges: Vec<_> = g.out_edges(&1).map(|(v, w)| (*v, w)).collect();
        edges.sort();
        assert_eq!(edges, vec![(2, 10), (3, 20)]);
        assert_eq!(g.out_edges(&3).count(), 0);
    }

    #[test]
    fn add_vertex_is_idempotent() {
        let mut g: DiGraph<u8> = DiGraph::new();
        assert!(g.add_vertex(1));
        assert!(!g.add_vertex(1));
        assert_eq!(g.vertex_count(), 1);
    }

    #[test]
    fn add_vertex_keeps_existing_edges() {
        let mut g = DiGraph::new();
        g.upsert_edge(1, 2, 10);
        g.add_vertex(1);
        assert_eq!(g.weight(&1, &2), Some(10));
    }

    #[test]
    fn vertices_enumerates_all() {
        let mut g = DiGraph::new();
        g.upsert_edge(1, 2, 1);
        g.add_vertex(9);
        let mut vs: Vec<_> = g.vertices().copied().collect();
        vs.sort();
        assert_eq!(vs, vec![1, 2, 9]);
    }
}
