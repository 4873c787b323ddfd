use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{instrument, trace};

use crate::clustering::Clustering;
use crate::graph::Graph;
use crate::index::{ClusterIndex, NodeIndex};
use crate::stop::StopToken;

/// Costs of deleting and inserting a single edge.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct EditWeights {
    /// Cost of deleting an edge.
    pub delete: i64,
    /// Cost of inserting an edge.
    pub insert: i64,
}

impl EditWeights {
    /// Deletions and insertions cost the same.
    pub const UNIT: Self = Self { delete: 1, insert: 1 };
}

impl Default for EditWeights {
    fn default() -> Self {
        Self::UNIT
    }
}

/// How [LocalSearch::run] ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SweepOutcome {
    /// No single node move improves the weighted cost.
    Converged,
    /// The stop token fired before a local optimum was reached.
    Interrupted,
}

/// Local search over single node moves.
///
/// The search owns a working [Clustering] and the bookkeeping that makes a
/// node move cheap: the size of every cluster, a scratch tally of neighbor
/// labels, a pool of unused labels and a stack of nodes that still have to be
/// reconsidered.
///
/// Labels form a dense id space. A label is in use exactly if its cluster size
/// is non-zero, and the unused labels are exactly the labels in the free pool.
#[derive(Clone, Debug)]
pub struct LocalSearch<'g> {
    graph: &'g Graph,
    clustering: Clustering,
    cluster_size: Vec<u32>,
    neighbor_tally: Vec<u32>,
    free: Vec<ClusterIndex>,
    rank: Vec<u32>,
    order: Vec<NodeIndex>,
    active: Vec<NodeIndex>,
    is_active: Vec<bool>,
}

impl<'g> LocalSearch<'g> {
    /// Start from the singleton clustering with the identity tie-break order.
    pub fn new(graph: &'g Graph) -> Self {
        let n = graph.node_count();
        Self {
            graph,
            clustering: Clustering::singletons(graph),
            cluster_size: vec![1; n],
            neighbor_tally: vec![0; n],
            free: vec![],
            rank: (0..n as u32).collect(),
            order: graph.node_indices().collect(),
            active: Vec::with_capacity(n),
            is_active: vec![false; n],
        }
    }

    /// The graph the search works on.
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// The current clustering.
    pub fn clustering(&self) -> &Clustering {
        &self.clustering
    }

    /// Number of nodes in cluster `label`. Unused labels have size zero.
    pub fn cluster_size(&self, label: ClusterIndex) -> usize {
        self.cluster_size.get(label.index()).map_or(0, |&size| size as usize)
    }

    /// Labels that are currently not in use.
    pub fn free_labels(&self) -> &[ClusterIndex] {
        &self.free
    }

    /// Returns whether the scratch neighbor tally is zero for every label.
    pub fn is_tally_clear(&self) -> bool {
        self.neighbor_tally.iter().all(|&count| count == 0)
    }

    /// Number of nodes waiting to be reconsidered.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Draw a new tie-break order for the labels and a new order in which the
    /// nodes are activated.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.rank.shuffle(rng);
        self.order.shuffle(rng);
    }

    fn release(&mut self, label: ClusterIndex) {
        let size = &mut self.cluster_size[label.index()];
        *size -= 1;
        if *size == 0 {
            self.free.push(label);
        }
    }

    fn acquire(&mut self, label: ClusterIndex) {
        debug_assert_ne!(self.cluster_size[label.index()], 0, "label {label} is free");
        self.cluster_size[label.index()] += 1;
    }

    /// Returns a label for a new cluster of size one.
    fn allocate(&mut self) -> ClusterIndex {
        let label = match self.free.pop() {
            Some(label) => label,
            None => {
                let label = ClusterIndex::new(self.cluster_size.len());
                self.cluster_size.push(0);
                self.neighbor_tally.push(0);
                self.rank.push(label.index() as u32);
                label
            }
        };
        self.cluster_size[label.index()] = 1;
        label
    }

    fn activate(&mut self, u: NodeIndex) {
        if !self.is_active[u.index()] {
            self.is_active[u.index()] = true;
            self.active.push(u);
        }
    }

    fn activate_all(&mut self) {
        self.active.clear();
        self.active.extend_from_slice(&self.order);
        self.is_active.fill(true);
    }

    fn pop_active(&mut self) -> Option<NodeIndex> {
        let u = self.active.pop()?;
        self.is_active[u.index()] = false;
        Some(u)
    }

    /// Move `x` into the cluster that minimizes its weighted edit cost.
    ///
    /// The candidates are the clusters of the neighbors of `x` and a new
    /// singleton cluster. Joining cluster `C` costs
    /// `delete * deg(x) + insert * |C| - (delete + insert) * |N(x) ∩ C|`, where
    /// `|C|` does not count `x` itself. Equal costs are decided by the tie-break
    /// rank of the labels.
    ///
    /// Returns whether the label of `x` changed. In that case `x` and its
    /// neighbors are activated.
    pub fn reassign(&mut self, x: NodeIndex, weights: EditWeights) -> bool {
        let graph = self.graph;
        let neighbors = graph.neighbors(x);

        let before = self.clustering.label(x);
        if self.cluster_size[before.index()] != 1 {
            self.release(before);
            let singleton = self.allocate();
            self.clustering.set_label(x, singleton);
        }
        let singleton = self.clustering.label(x);

        for &y in neighbors {
            self.neighbor_tally[self.clustering.label(y).index()] += 1;
        }

        let baseline = weights.delete * neighbors.len() as i64;
        let (mut best, mut best_cost) = (singleton, baseline);
        for &y in neighbors {
            let label = self.clustering.label(y);
            let size = self.cluster_size[label.index()] as i64;
            let shared = self.neighbor_tally[label.index()] as i64;
            let cost = baseline + weights.insert * size - (weights.delete + weights.insert) * shared;
            if cost < best_cost || (cost == best_cost && self.rank[label.index()] < self.rank[best.index()]) {
                best = label;
                best_cost = cost;
            }
        }

        if best != singleton {
            self.release(singleton);
            self.clustering.set_label(x, best);
            self.acquire(best);
        }

        for &y in neighbors {
            self.neighbor_tally[self.clustering.label(y).index()] -= 1;
        }

        let changed = before != best;
        if changed {
            self.activate(x);
            for &y in neighbors {
                self.activate(y);
            }
        }
        changed
    }

    /// Improve the clustering until it is a local optimum for `weights`.
    ///
    /// Every pass activates all nodes and reassigns nodes until none is active.
    /// Passes are repeated as long as the previous pass moved a node. The stop
    /// token is polled after every reassignment.
    #[instrument(level = "debug", skip_all, fields(delete = weights.delete, insert = weights.insert))]
    pub fn run(&mut self, weights: EditWeights, stop: &StopToken) -> SweepOutcome {
        let mut pass = 0_usize;
        loop {
            self.activate_all();
            let mut moves = 0_usize;
            while let Some(u) = self.pop_active() {
                if self.reassign(u, weights) {
                    moves += 1;
                }
                if stop.is_stopped() {
                    return SweepOutcome::Interrupted;
                }
            }
            pass += 1;
            trace!(pass, moves);
            if moves == 0 {
                return SweepOutcome::Converged;
            }
        }
    }
}
