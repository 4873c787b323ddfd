//! An anytime heuristic for [cluster editing](https://en.wikipedia.org/wiki/Cluster_graph).
//!
//! A graph is a *cluster graph* if every connected component is a clique.
//! Cluster editing asks for the fewest edge insertions and deletions that turn
//! a graph into a cluster graph. The problem is NP-hard; this crate improves a
//! [Clustering] by local search until it is told to stop and reports the best
//! clustering it has seen.
//!
//! # Examples
//!
//! Two triangles are already a cluster graph.
//! ```rust
//! use cluster_editing::{solve, Graph, SolverConfig, StopToken};
//!
//! let graph = Graph::from_edges(6, [(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)]);
//! let config = SolverConfig { max_rounds: Some(4), ..SolverConfig::default() };
//! let solution = solve(&graph, &config, &StopToken::default());
//!
//! assert_eq!(solution.cost, 0);
//! assert_eq!(solution.clustering.cluster_count(), 2);
//! ```
//!
//! A 4-cycle with one chord needs a single insertion.
//! ```rust
//! use cluster_editing::{solve, Graph, NodeIndex, SolverConfig, StopToken};
//!
//! let graph = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
//! let config = SolverConfig { max_rounds: Some(4), ..SolverConfig::default() };
//! let solution = solve(&graph, &config, &StopToken::default());
//!
//! assert_eq!(solution.clustering.edits(&graph), [(NodeIndex::new(1), NodeIndex::new(3))]);
//! ```
//!
//! # Stopping
//!
//! [solve] runs until the [StopToken] is set or the configured number of rounds
//! is reached. A token is created from an `Arc<AtomicBool>` that is shared
//! with whoever decides when to stop, e.g. a signal handler.

#![forbid(unsafe_code)]
#![doc(test(attr(deny(warnings, rust_2018_idioms), allow(dead_code))))]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

mod clustering;
mod graph;
mod index;
mod local_search;
mod solver;
mod stop;

pub use clustering::Clustering;
pub use graph::Graph;
pub use index::{ClusterIndex, NodeIndex};
pub use local_search::{EditWeights, LocalSearch, SweepOutcome};
pub use solver::{solve, Solution, Solver, SolverConfig};
pub use stop::StopToken;
