use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument};

use crate::clustering::Clustering;
use crate::graph::Graph;
use crate::local_search::{EditWeights, LocalSearch, SweepOutcome};
use crate::stop::StopToken;

impl EditWeights {
    /// The weights of round `iteration`, counting from one.
    ///
    /// Rounds are grouped in blocks of four. Block 49 of every 100 blocks makes
    /// deletions twice as expensive, block 99 insertions. All other rounds use
    /// unit weights.
    pub fn for_iteration(iteration: usize) -> Self {
        match (iteration / 4) % 100 {
            49 => Self { delete: 2, insert: 1 },
            99 => Self { delete: 1, insert: 2 },
            _ => Self::UNIT,
        }
    }
}

/// Parameters of a [Solver].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SolverConfig {
    /// Seed of the random tie-break orders.
    pub seed: u64,
    /// Stop after this many rounds, even if the stop token never fires.
    pub max_rounds: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { seed: 0, max_rounds: None }
    }
}

/// The best clustering found by a [Solver].
#[derive(Clone, Debug)]
pub struct Solution {
    /// The clustering with the fewest edits.
    pub clustering: Clustering,
    /// Number of edits of `clustering`.
    pub cost: usize,
    /// Number of rounds that were started.
    pub rounds: usize,
    /// The round that found `clustering`, zero for the singleton clustering.
    pub best_round: usize,
}

/// Anytime driver around [LocalSearch].
///
/// Every round runs the local search to a local optimum under the weights of
/// [EditWeights::for_iteration], keeps a copy of the clustering if it needs
/// strictly fewer edits than the best one so far, and reshuffles the tie-break
/// order. The working clustering is carried over from round to round.
#[derive(Debug)]
pub struct Solver<'g> {
    search: LocalSearch<'g>,
    best: Clustering,
    best_cost: usize,
    best_round: usize,
    iteration: usize,
    max_rounds: Option<usize>,
    rng: StdRng,
}

impl<'g> Solver<'g> {
    /// Start from the singleton clustering.
    pub fn new(graph: &'g Graph, config: &SolverConfig) -> Self {
        let best = Clustering::singletons(graph);
        let best_cost = best.edit_cost(graph);
        Self {
            search: LocalSearch::new(graph),
            best,
            best_cost,
            best_round: 0,
            iteration: 0,
            max_rounds: config.max_rounds,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Number of edits of the best clustering so far.
    pub fn best_cost(&self) -> usize {
        self.best_cost
    }

    /// The best clustering so far.
    pub fn best(&self) -> &Clustering {
        &self.best
    }

    /// Number of rounds that were started.
    pub fn rounds(&self) -> usize {
        self.iteration
    }

    /// Run a single round.
    pub fn step(&mut self, stop: &StopToken) -> SweepOutcome {
        self.iteration += 1;
        let weights = EditWeights::for_iteration(self.iteration);
        let outcome = self.search.run(weights, stop);

        let graph = self.search.graph();
        let cost = self.search.clustering().edit_cost(graph);
        debug!(round = self.iteration, cost, ?outcome);
        if cost < self.best_cost {
            info!(round = self.iteration, cost, delete = weights.delete, insert = weights.insert, "improved");
            self.best.clone_from(self.search.clustering());
            self.best_cost = cost;
            self.best_round = self.iteration;
        }

        self.search.shuffle(&mut self.rng);
        outcome
    }

    fn has_rounds_left(&self) -> bool {
        self.max_rounds.map_or(true, |max| self.iteration < max)
    }

    /// Run rounds until the stop token fires or the round limit is reached.
    #[instrument(skip_all)]
    pub fn solve(mut self, stop: &StopToken) -> Solution {
        let graph = self.search.graph();
        info!(n = graph.node_count(), m = graph.edge_count(), initial_cost = self.best_cost);
        while !stop.is_stopped() && self.has_rounds_left() {
            self.step(stop);
        }
        info!(cost = self.best_cost, rounds = self.iteration, best_round = self.best_round);
        Solution { clustering: self.best, cost: self.best_cost, rounds: self.iteration, best_round: self.best_round }
    }
}

/// Search for a clustering with few edits until `stop` fires or
/// `config.max_rounds` rounds have been run.
///
/// Returns the singleton clustering if no round was started.
pub fn solve(graph: &Graph, config: &SolverConfig, stop: &StopToken) -> Solution {
    Solver::new(graph, config).solve(stop)
}
