//! NSGA-II (Non-dominated Sorting Genetic Algorithm II).
//!
//! Elitist multi-objective optimization over a [`DesignSpace`](crate::space::DesignSpace)
//! with Deb's constraint handling.
//!
//! # Components
//!
//! - [`Nsga2Config`]: population size, generations, operator settings, seed
//! - [`Nsga2Runner`]: the generational loop
//! - [`sbx_crossover`], [`polynomial_mutation`]: real-valued variation
//! - [`binary_tournament`]: crowded-comparison parent selection
//! - [`RunRequest`], [`top_k`]: request validation and result ranking for
//!   an outer service layer
//!
//! # Algorithm
//!
//! 1. Sample `N` designs and evaluate them
//! 2. Rank by constrained non-dominated sorting, then crowding distance
//! 3. Fill a mating pool of `N` by binary tournament
//! 4. Produce `N` offspring with SBX and polynomial mutation, evaluate them
//! 5. Merge to `2N`, re-rank, keep the best `N` front by front
//! 6. Repeat 3-5 for the configured number of generations
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II",
//!   IEEE Transactions on Evolutionary Computation, 6(2), 182-197

mod config;
mod operators;
mod request;
mod runner;
mod selection;
mod types;

pub use config::Nsga2Config;
pub use operators::{polynomial_mutation, sbx_crossover};
pub use request::{top_k, Candidate, RunRequest};
pub use runner::{Nsga2Result, Nsga2Runner};
pub use selection::{binary_tournament, mating_pool};
pub use types::{GenerationStats, Individual};
