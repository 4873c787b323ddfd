use crate::graph::Graph;
use crate::index::{ClusterIndex, NodeIndex};

/// A partition of the nodes of a graph into clusters.
///
/// Every node carries exactly one [ClusterIndex]. The nodes sharing a label form
/// one cluster. The clustering represents the cluster graph in which every
/// cluster is a clique and there are no edges between clusters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Clustering {
    labels: Vec<ClusterIndex>,
}

impl Clustering {
    /// Every node in its own cluster. The label of node `i` is `i`.
    pub fn singletons(graph: &Graph) -> Self {
        Self { labels: ClusterIndex::range(graph.node_count()).collect() }
    }

    /// Create a clustering from one label per node.
    pub fn from_labels(labels: Vec<ClusterIndex>) -> Self {
        Self { labels }
    }

    /// Number of nodes covered by the clustering.
    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// The cluster of node `u`.
    #[inline(always)]
    pub fn label(&self, u: NodeIndex) -> ClusterIndex {
        self.labels[u.index()]
    }

    /// The labels of all nodes, indexed by node.
    pub fn labels(&self) -> &[ClusterIndex] {
        &self.labels
    }

    #[inline(always)]
    pub(crate) fn set_label(&mut self, u: NodeIndex, label: ClusterIndex) {
        self.labels[u.index()] = label;
    }

    fn label_bound(&self) -> usize {
        self.labels.iter().map(|c| c.index() + 1).max().unwrap_or(0)
    }

    fn members_by_label(&self) -> Vec<Vec<NodeIndex>> {
        let mut members = vec![vec![]; self.label_bound()];
        for (u, c) in self.labels.iter().enumerate() {
            members[c.index()].push(NodeIndex::new(u));
        }
        members
    }

    /// Number of non-empty clusters.
    pub fn cluster_count(&self) -> usize {
        let mut seen = vec![false; self.label_bound()];
        let mut count = 0;
        for c in &self.labels {
            if !seen[c.index()] {
                seen[c.index()] = true;
                count += 1;
            }
        }
        count
    }

    /// The non-empty clusters, ordered by their smallest node. The nodes of each
    /// cluster are sorted.
    pub fn clusters(&self) -> Vec<Vec<NodeIndex>> {
        let mut position = vec![usize::MAX; self.label_bound()];
        let mut clusters: Vec<Vec<NodeIndex>> = vec![];
        for (u, c) in self.labels.iter().enumerate() {
            if position[c.index()] == usize::MAX {
                position[c.index()] = clusters.len();
                clusters.push(vec![]);
            }
            clusters[position[c.index()]].push(NodeIndex::new(u));
        }
        clusters
    }

    /// Number of edges between different clusters. These must be deleted.
    pub fn removal_count(&self, graph: &Graph) -> usize {
        debug_assert_eq!(self.node_count(), graph.node_count());
        graph.edges().filter(|&(u, v)| self.label(u) != self.label(v)).count()
    }

    /// Number of non-adjacent node pairs inside a cluster. These must be inserted.
    pub fn insertion_count(&self, graph: &Graph) -> usize {
        debug_assert_eq!(self.node_count(), graph.node_count());
        let n = self.label_bound();
        let mut size = vec![0_usize; n];
        let mut internal_edges = vec![0_usize; n];
        for c in &self.labels {
            size[c.index()] += 1;
        }
        for (u, v) in graph.edges() {
            if self.label(u) == self.label(v) {
                internal_edges[self.label(u).index()] += 1;
            }
        }
        size.iter().zip(&internal_edges).map(|(&s, &m)| s * s.saturating_sub(1) / 2 - m).sum()
    }

    /// Number of edge edits needed to turn `graph` into the cluster graph.
    pub fn edit_cost(&self, graph: &Graph) -> usize {
        self.removal_count(graph) + self.insertion_count(graph)
    }

    /// The node pairs `(u, v)` with `u < v` that are adjacent in exactly one of
    /// `graph` and the cluster graph.
    ///
    /// Removals are listed before insertions. The number of pairs equals
    /// [Clustering::edit_cost].
    pub fn edits(&self, graph: &Graph) -> Vec<(NodeIndex, NodeIndex)> {
        debug_assert_eq!(self.node_count(), graph.node_count());
        let mut edits: Vec<_> = graph.edges().filter(|&(u, v)| self.label(u) != self.label(v)).collect();

        let members = self.members_by_label();
        for u in graph.node_indices() {
            let cluster = &members[self.label(u).index()];
            let start = cluster.partition_point(|&v| v <= u);
            let mut neighbors = graph.neighbors(u).iter().peekable();
            for &v in &cluster[start..] {
                while neighbors.next_if(|&&w| w < v).is_some() {}
                if neighbors.next_if_eq(&&v).is_none() {
                    edits.push((u, v));
                }
            }
        }
        edits
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use crate::index::{ClusterIndex, NodeIndex};
    use crate::tests::{apply_edits, complete_graph, empty_graph, k4_minus_edge, labels, path_graph, two_triangles};
    use crate::{Clustering, Graph};

    fn one_cluster(graph: &Graph) -> Clustering {
        Clustering::from_labels(vec![ClusterIndex::new(0); graph.node_count()])
    }

    fn check_edits(graph: &Graph, clustering: &Clustering) {
        let edits = clustering.edits(graph);
        assert_eq!(edits.len(), clustering.edit_cost(graph));

        let unique: HashSet<_> = edits.iter().copied().collect();
        assert_eq!(unique.len(), edits.len());
        assert!(edits.iter().all(|(u, v)| u < v));

        let edited = apply_edits(graph, &edits);
        for u in graph.node_indices() {
            for v in graph.node_indices().filter(|&v| u < v) {
                assert_eq!(edited.has_edge(u, v), clustering.label(u) == clustering.label(v), "pair ({u}, {v})");
            }
        }
    }

    #[test]
    fn singletons() {
        let graph = path_graph(5);
        let clustering = Clustering::singletons(&graph);
        assert_eq!(clustering.node_count(), 5);
        assert_eq!(clustering.cluster_count(), 5);
        assert_eq!(clustering.label(NodeIndex::new(3)), ClusterIndex::new(3));
        assert_eq!(clustering.removal_count(&graph), 4);
        assert_eq!(clustering.insertion_count(&graph), 0);
        assert_eq!(clustering.edit_cost(&graph), graph.edge_count());
        check_edits(&graph, &clustering);
    }

    #[test]
    fn one_cluster_costs() {
        for graph in [path_graph(6), k4_minus_edge(), two_triangles(), empty_graph(4), complete_graph(5)] {
            let n = graph.node_count();
            let clustering = one_cluster(&graph);
            assert_eq!(clustering.removal_count(&graph), 0);
            assert_eq!(clustering.edit_cost(&graph), n * (n - 1) / 2 - graph.edge_count());
            check_edits(&graph, &clustering);
        }
    }

    #[test]
    fn two_triangles_are_free() {
        let graph = two_triangles();
        let clustering = Clustering::from_labels(labels(&[4, 4, 4, 1, 1, 1]));
        assert_eq!(clustering.cluster_count(), 2);
        assert_eq!(clustering.edit_cost(&graph), 0);
        assert!(clustering.edits(&graph).is_empty());
    }

    #[test]
    fn mixed_clustering() {
        let graph = path_graph(5);
        let clustering = Clustering::from_labels(labels(&[2, 2, 2, 7, 7]));
        assert_eq!(clustering.removal_count(&graph), 1);
        assert_eq!(clustering.insertion_count(&graph), 1);

        let edits: Vec<_> = clustering.edits(&graph).into_iter().map(|(u, v)| (u.index(), v.index())).collect();
        assert_eq!(edits, [(2, 3), (0, 2)]);
        check_edits(&graph, &clustering);
    }

    #[test]
    fn edits_are_idempotent() {
        let graph = k4_minus_edge();
        let clustering = Clustering::from_labels(labels(&[0, 0, 3, 3]));
        let first: HashSet<_> = clustering.edits(&graph).into_iter().collect();
        let second: HashSet<_> = clustering.edits(&graph).into_iter().collect();
        assert_eq!(first, second);
        check_edits(&graph, &clustering);
    }

    #[test]
    fn clusters() {
        let clustering = Clustering::from_labels(labels(&[5, 0, 5, 2, 0]));
        let clusters: Vec<Vec<usize>> =
            clustering.clusters().iter().map(|c| c.iter().map(|u| u.index()).collect()).collect();
        assert_eq!(clusters, [vec![0, 2], vec![1, 4], vec![3]]);
        assert_eq!(clustering.cluster_count(), 3);
    }

    #[test]
    fn empty_graph_has_no_edits() {
        let graph = Graph::default();
        let clustering = Clustering::singletons(&graph);
        assert_eq!(clustering.edit_cost(&graph), 0);
        assert!(clustering.edits(&graph).is_empty());
        assert!(clustering.clusters().is_empty());
    }
}
