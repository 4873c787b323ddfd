use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

use crate::index::NodeIndex;

/// A simple, undirected graph stored as sorted adjacency lists.
///
/// The graph is immutable after construction. Each neighbor list is sorted and
/// contains no duplicates and no self-loops.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Graph {
    neighbors: Vec<Vec<NodeIndex>>,
    edge_count: usize,
}

impl Graph {
    /// Build a graph with `n` nodes from a list of undirected edges.
    ///
    /// Parallel edges are merged.
    ///
    /// Panics if an edge is a self-loop or an endpoint is not smaller than `n`.
    pub fn from_edges(n: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut neighbors = vec![vec![]; n];
        for (u, v) in edges {
            assert_ne!(u, v, "self-loops are not allowed");
            assert!(u < n && v < n, "edge ({u}, {v}) out of bounds for n={n}");
            neighbors[u].push(NodeIndex::new(v));
            neighbors[v].push(NodeIndex::new(u));
        }
        let mut edge_count = 0;
        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
            edge_count += list.len();
        }
        Self { neighbors, edge_count: edge_count / 2 }
    }

    /// Number of nodes.
    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of undirected edges.
    #[inline(always)]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Iterate over all node indices in increasing order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + Clone {
        NodeIndex::range(self.node_count())
    }

    /// Number of neighbors of `u`.
    #[inline(always)]
    pub fn degree(&self, u: NodeIndex) -> usize {
        self.neighbors[u.index()].len()
    }

    /// The sorted neighbors of `u`.
    #[inline(always)]
    pub fn neighbors(&self, u: NodeIndex) -> &[NodeIndex] {
        &self.neighbors[u.index()]
    }

    /// Returns whether `u` and `v` are adjacent.
    pub fn has_edge(&self, u: NodeIndex, v: NodeIndex) -> bool {
        let (a, b) = if self.degree(u) <= self.degree(v) { (u, v) } else { (v, u) };
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Iterate over all edges `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.node_indices().flat_map(move |u| self.neighbors(u).iter().filter(move |&&v| u < v).map(move |&v| (u, v)))
    }
}

impl<N, E> From<&UnGraph<N, E>> for Graph {
    fn from(graph: &UnGraph<N, E>) -> Self {
        Self::from_edges(graph.node_count(), graph.edge_references().map(|e| (e.source().index(), e.target().index())))
    }
}
