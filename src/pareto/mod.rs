//! Pareto dominance, non-dominated sorting and crowding distance.
//!
//! Domain-agnostic building blocks for NSGA-II and other Pareto-based
//! methods.
//!
//! # Algorithms
//!
//! - [`dominates`]: Pareto dominance under per-objective [`Direction`]s
//! - [`constrained_dominates`]: Deb's feasibility-first dominance
//! - [`non_dominated_sort`] / [`constrained_non_dominated_sort`]: fast
//!   non-dominated sorting (Deb et al., 2002)
//! - [`pareto_front_indices`]: the rank-0 subset only
//! - [`crowding_distance`]: diversity within one front
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II",
//!   IEEE Transactions on Evolutionary Computation, 6(2), 182-197
//! - Deb (2000), "An efficient constraint handling method for genetic algorithms",
//!   Computer Methods in Applied Mechanics and Engineering, 186(2-4), 311-338

mod crowding;
mod dominance;
mod sort;

pub use crowding::crowding_distance;
pub use dominance::{compare, constrained_compare, constrained_dominates, dominates, Direction, Dominance};
pub use sort::{
    constrained_non_dominated_sort, non_dominated_sort, pareto_front_indices, NondominatedSortResult,
};
pub(crate) use sort::sort_with;
