//! Constrained multi-objective design optimization.
//!
//! Searches a bounded design space for Pareto-optimal trade-offs between
//! competing objectives, using NSGA-II with Deb's feasibility-first
//! constraint handling. The domain model (a combustion chamber, a turbofan
//! cycle, ...) plugs in through the [`Evaluator`](evaluate::Evaluator) trait;
//! this crate knows nothing about physics.
//!
//! - **space**: named, bounded continuous and integer parameters, with
//!   optional pinned values
//! - **sampling**: uniform and Latin Hypercube initial designs
//! - **evaluate**: the evaluator contract and its result type
//! - **pareto**: dominance, non-dominated sorting and crowding distance
//! - **nsga2**: variation operators, the generational loop and result ranking
//!
//! # Example
//!
//! ```
//! use u_moo::evaluate::{infallible, EvaluationResult};
//! use u_moo::nsga2::{Nsga2Config, Nsga2Runner};
//! use u_moo::pareto::Direction;
//! use u_moo::space::{DesignSpace, Parameter};
//!
//! let space = DesignSpace::new(vec![
//!     Parameter::continuous("chamber_pressure_mpa", 5.0, 25.0),
//!     Parameter::integer("injector_elements", 40, 400),
//! ])
//! .unwrap();
//!
//! // maximize performance, minimize heat flux; flux above 50 is infeasible
//! let eval = infallible(|d| {
//!     let v = d.as_slice();
//!     let performance = 280.0 + 2.0 * v[0] + 0.01 * v[1];
//!     let flux = v[0] * v[0] / 10.0 + 1000.0 / v[1];
//!     EvaluationResult::new(vec![performance, flux], (flux - 50.0).max(0.0))
//! });
//!
//! let config = Nsga2Config::default()
//!     .with_population_size(32)
//!     .with_generations(5)
//!     .with_directions(vec![Direction::Maximize, Direction::Minimize])
//!     .with_seed(42);
//!
//! let result = Nsga2Runner::run(&space, &eval, &config).unwrap();
//! assert!(result.front.iter().all(|ind| ind.is_feasible()));
//! ```
//!
//! # Features
//!
//! - `parallel` (default): evaluate designs on the rayon thread pool
//! - `serde`: `Serialize`/`Deserialize` for boundary types

pub mod error;
pub mod evaluate;
pub mod nsga2;
pub mod pareto;
pub mod random;
pub mod sampling;
pub mod space;

pub use error::{ConfigError, RunError};
