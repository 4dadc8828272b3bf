//! Inbound run request and outbound ranked candidates.
//!
//! [`RunRequest`] is the shape an outer service layer hands in: signed
//! counts straight from the wire, checked here before anything runs.
//! [`Candidate`] is what it gets back.

use super::config::Nsga2Config;
use super::runner::Nsga2Runner;
use super::types::Individual;
use crate::error::{ConfigError, RunError};
use crate::evaluate::Evaluator;
use crate::pareto::Direction;
use crate::sampling::SamplingMethod;
use crate::space::{DesignSpace, DesignVector};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// An optimization request from an outer layer.
///
/// # Example
///
/// ```
/// use u_moo::evaluate::{infallible, EvaluationResult};
/// use u_moo::nsga2::RunRequest;
/// use u_moo::space::{DesignSpace, Parameter};
///
/// let space = DesignSpace::new(vec![Parameter::continuous("x", 0.0, 1.0)]).unwrap();
/// let request = RunRequest::new(space).with_samples(16).with_generations(2).with_topk(4);
/// let eval = infallible(|d| {
///     let x = d.as_slice()[0];
///     EvaluationResult::feasible(vec![x, 1.0 - x])
/// });
///
/// let top = request.execute(&eval).unwrap();
/// assert_eq!(top.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunRequest {
    /// Parameters to search over.
    pub design_space: DesignSpace,

    /// Population size.
    #[cfg_attr(feature = "serde", serde(default = "default_samples"))]
    pub samples: i64,

    /// Number of generations.
    #[cfg_attr(feature = "serde", serde(default = "default_generations"))]
    pub generations: i64,

    /// Random seed.
    #[cfg_attr(feature = "serde", serde(default = "default_seed"))]
    pub seed: u64,

    /// Number of candidates to return.
    #[cfg_attr(feature = "serde", serde(default = "default_topk"))]
    pub topk: i64,

    /// Initial population strategy.
    #[cfg_attr(feature = "serde", serde(default, alias = "sampling_method"))]
    pub sampling: SamplingMethod,

    /// Objective directions; empty minimizes every objective.
    #[cfg_attr(feature = "serde", serde(default))]
    pub directions: Vec<Direction>,
}

const DEFAULT_SAMPLES: i64 = 128;
const DEFAULT_GENERATIONS: i64 = 16;
const DEFAULT_SEED: u64 = 123;
const DEFAULT_TOPK: i64 = 16;

#[cfg(feature = "serde")]
fn default_samples() -> i64 {
    DEFAULT_SAMPLES
}

#[cfg(feature = "serde")]
fn default_generations() -> i64 {
    DEFAULT_GENERATIONS
}

#[cfg(feature = "serde")]
fn default_seed() -> u64 {
    DEFAULT_SEED
}

#[cfg(feature = "serde")]
fn default_topk() -> i64 {
    DEFAULT_TOPK
}

impl RunRequest {
    /// A request over `design_space` with 128 samples, 16 generations,
    /// seed 123, top 16 and LHS sampling.
    pub fn new(design_space: DesignSpace) -> Self {
        Self {
            design_space,
            samples: DEFAULT_SAMPLES,
            generations: DEFAULT_GENERATIONS,
            seed: DEFAULT_SEED,
            topk: DEFAULT_TOPK,
            sampling: SamplingMethod::default(),
            directions: Vec::new(),
        }
    }

    /// Sets the sample count.
    pub fn with_samples(mut self, samples: i64) -> Self {
        self.samples = samples;
        self
    }

    /// Sets the generation count.
    pub fn with_generations(mut self, generations: i64) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets how many candidates to return.
    pub fn with_topk(mut self, topk: i64) -> Self {
        self.topk = topk;
        self
    }

    /// Sets the sampling method.
    pub fn with_sampling(mut self, sampling: SamplingMethod) -> Self {
        self.sampling = sampling;
        self
    }

    /// Sets the objective directions.
    pub fn with_directions(mut self, directions: Vec<Direction>) -> Self {
        self.directions = directions;
        self
    }

    /// Converts into a validated [`Nsga2Config`].
    ///
    /// Fails on negative counts.
    pub fn to_config(&self) -> Result<Nsga2Config, ConfigError> {
        let config = Nsga2Config::default()
            .with_population_size(non_negative("samples", self.samples)?)
            .with_generations(non_negative("generations", self.generations)?)
            .with_sampling(self.sampling)
            .with_directions(self.directions.clone())
            .with_seed(self.seed);
        config.validate()?;
        Ok(config)
    }

    /// The validated result count.
    pub fn topk(&self) -> Result<usize, ConfigError> {
        non_negative("topk", self.topk)
    }

    /// Runs the request and returns the ranked top of the final front.
    pub fn execute<E: Evaluator>(&self, evaluator: &E) -> Result<Vec<Candidate>, RunError<E::Error>> {
        let config = self.to_config()?;
        let k = self.topk()?;
        let result = Nsga2Runner::run(&self.design_space, evaluator, &config)?;
        Ok(result.top_k(k))
    }
}

fn non_negative(field: &'static str, value: i64) -> Result<usize, ConfigError> {
    usize::try_from(value).map_err(|_| ConfigError::NegativeCount { field, value })
}

/// One ranked design handed back to the caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Candidate {
    /// The design.
    pub design: DesignVector,

    /// Objective values.
    pub objectives: Vec<f64>,

    /// Whether the design satisfies every constraint.
    pub feasible: bool,

    /// Summed constraint violation.
    pub violation: f64,

    /// Domain metrics reported by the evaluator.
    pub raw: BTreeMap<String, f64>,
}

impl From<&Individual> for Candidate {
    fn from(ind: &Individual) -> Self {
        Self {
            design: ind.design.clone(),
            objectives: ind.evaluation.objectives.clone(),
            feasible: ind.is_feasible(),
            violation: ind.evaluation.violation,
            raw: ind.evaluation.raw.clone(),
        }
    }
}

/// Ranks `individuals` and keeps the first `k`.
///
/// Order: feasible before infeasible, then lower violation, then each
/// objective in turn, better first according to its direction. The sort is
/// stable, so full ties keep input order.
pub fn top_k(individuals: &[Individual], directions: &[Direction], k: usize) -> Vec<Candidate> {
    let mut ranked: Vec<&Individual> = individuals.iter().collect();
    ranked.sort_by(|a, b| preference(a, b, directions));
    ranked.into_iter().take(k).map(Candidate::from).collect()
}

fn preference(a: &Individual, b: &Individual, directions: &[Direction]) -> Ordering {
    b.is_feasible()
        .cmp(&a.is_feasible())
        .then_with(|| a.evaluation.violation.total_cmp(&b.evaluation.violation))
        .then_with(|| {
            a.objectives()
                .iter()
                .zip(b.objectives())
                .zip(directions)
                .map(|((x, y), dir)| match dir {
                    Direction::Minimize => x.total_cmp(y),
                    Direction::Maximize => y.total_cmp(x),
                })
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        })
}
