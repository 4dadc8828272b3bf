//! NSGA-II generational loop.
//!
//! [`Nsga2Runner`] drives the population through
//! sampling → evaluation → ranking → tournament → SBX + mutation →
//! merge → truncation, for a fixed number of generations.

use super::config::Nsga2Config;
use super::operators::{polynomial_mutation, sbx_crossover};
use super::request::{top_k, Candidate};
use super::selection::mating_pool;
use super::types::{GenerationStats, Individual};
use crate::error::{ConfigError, RunError};
use crate::evaluate::{EvaluationResult, Evaluator};
use crate::pareto::{constrained_compare, crowding_distance, sort_with, Direction};
use crate::random::{resolve_rng, MooRng};
use crate::space::{DesignSpace, DesignVector};
use rand::Rng;
use tracing::{debug, info, info_span, warn};

/// Result of an NSGA-II run.
#[derive(Debug, Clone)]
pub struct Nsga2Result {
    /// Front 0 of the final population, in population order.
    pub front: Vec<Individual>,

    /// The whole final population.
    pub population: Vec<Individual>,

    /// Objective directions used for the run (inferred if none were configured).
    pub directions: Vec<Direction>,

    /// Number of generations executed after the initial population.
    pub generations: usize,

    /// Total number of designs evaluated.
    pub evaluations: usize,

    /// Evaluations that returned non-finite values.
    pub degenerate_evaluations: usize,

    /// Seed the run was driven by.
    pub seed: u64,

    /// One entry per generation, starting with the initial population.
    pub history: Vec<GenerationStats>,
}

impl Nsga2Result {
    /// The `k` best members of the final front.
    ///
    /// See [`top_k`] for the ordering.
    pub fn top_k(&self, k: usize) -> Vec<Candidate> {
        top_k(&self.front, &self.directions, k)
    }
}

/// Executes the NSGA-II loop.
///
/// # Usage
///
/// ```
/// use u_moo::evaluate::{infallible, EvaluationResult};
/// use u_moo::nsga2::{Nsga2Config, Nsga2Runner};
/// use u_moo::space::{DesignSpace, Parameter};
///
/// let space = DesignSpace::new(vec![Parameter::continuous("x", 0.0, 1.0)]).unwrap();
/// let eval = infallible(|d| {
///     let x = d.as_slice()[0];
///     EvaluationResult::feasible(vec![x, 1.0 - x])
/// });
/// let config = Nsga2Config::default()
///     .with_population_size(20)
///     .with_generations(3)
///     .with_seed(7);
///
/// let result = Nsga2Runner::run(&space, &eval, &config).unwrap();
/// assert_eq!(result.population.len(), 20);
/// assert_eq!(result.history.len(), 4);
/// ```
pub struct Nsga2Runner;

impl Nsga2Runner {
    /// Runs NSGA-II from a sampled initial population of
    /// `config.population_size` designs.
    pub fn run<E: Evaluator>(
        space: &DesignSpace,
        evaluator: &E,
        config: &Nsga2Config,
    ) -> Result<Nsga2Result, RunError<E::Error>> {
        config.validate()?;
        let (mut rng, seed) = resolve_rng(config.seed);
        let initial = config
            .sampling
            .sample(space, config.population_size, &mut rng);
        evolve(space, evaluator, config, initial, rng, seed)
    }

    /// Runs NSGA-II from caller-supplied designs.
    ///
    /// Each row must have one value per parameter; rows are conformed to
    /// the design space. The population size is the number of rows and
    /// `config.population_size` is ignored.
    pub fn run_with_population<E: Evaluator>(
        space: &DesignSpace,
        initial: Vec<Vec<f64>>,
        evaluator: &E,
        config: &Nsga2Config,
    ) -> Result<Nsga2Result, RunError<E::Error>> {
        config.validate()?;
        let initial = initial
            .into_iter()
            .map(|values| space.design(values))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        let (rng, seed) = resolve_rng(config.seed);
        evolve(space, evaluator, config, initial, rng, seed)
    }
}

fn evolve<E: Evaluator>(
    space: &DesignSpace,
    evaluator: &E,
    config: &Nsga2Config,
    initial: Vec<DesignVector>,
    mut rng: MooRng,
    seed: u64,
) -> Result<Nsga2Result, RunError<E::Error>> {
    let n = initial.len();
    let span = info_span!("nsga2", population = n, generations = config.generations, seed);
    let _guard = span.enter();

    let mut scorer = Scorer::new(evaluator, config);

    if n == 0 {
        info!("empty initial population, nothing to optimize");
        return Ok(Nsga2Result {
            front: Vec::new(),
            population: Vec::new(),
            directions: config.directions.clone(),
            generations: 0,
            evaluations: 0,
            degenerate_evaluations: 0,
            seed,
            history: Vec::new(),
        });
    }

    let (mut population, degenerate) = scorer.score(initial)?;
    rank_population(&mut population, &scorer.directions);

    let mut history = Vec::with_capacity(config.generations + 1);
    record(&mut history, evaluator, &population, 0, degenerate, scorer.evaluations);

    for generation in 1..=config.generations {
        let pool = mating_pool(&population, n, &mut rng);
        let offspring = make_offspring(space, &population, &pool, config, &mut rng);
        let (children, degenerate) = scorer.score(offspring)?;

        population.extend(children);
        let fronts = rank_population(&mut population, &scorer.directions);
        population = select_survivors(population, &fronts, n);

        record(
            &mut history,
            evaluator,
            &population,
            generation,
            degenerate,
            scorer.evaluations,
        );
    }

    let front: Vec<Individual> = population.iter().filter(|i| i.rank == 0).cloned().collect();
    info!(
        front_size = front.len(),
        evaluations = scorer.evaluations,
        degenerate = scorer.degenerate,
        "nsga2 finished"
    );

    Ok(Nsga2Result {
        front,
        population,
        directions: scorer.directions,
        generations: config.generations,
        evaluations: scorer.evaluations,
        degenerate_evaluations: scorer.degenerate,
        seed,
        history,
    })
}

/// Calls the evaluator and turns its output into population members.
struct Scorer<'a, E> {
    evaluator: &'a E,
    parallel: bool,
    directions: Vec<Direction>,
    evaluations: usize,
    degenerate: usize,
}

impl<'a, E: Evaluator> Scorer<'a, E> {
    fn new(evaluator: &'a E, config: &Nsga2Config) -> Self {
        Self {
            evaluator,
            parallel: config.parallel,
            directions: config.directions.clone(),
            evaluations: 0,
            degenerate: 0,
        }
    }

    /// Evaluates `designs`, returning the individuals and how many of them
    /// were degenerate.
    fn score(
        &mut self,
        designs: Vec<DesignVector>,
    ) -> Result<(Vec<Individual>, usize), RunError<E::Error>> {
        let results = self.evaluate(&designs)?;
        if results.len() != designs.len() {
            return Err(RunError::BatchLength {
                expected: designs.len(),
                got: results.len(),
            });
        }

        if self.directions.is_empty() {
            let m = results.first().map_or(0, |r| r.objectives.len());
            if m == 0 {
                return Err(ConfigError::NoObjectives.into());
            }
            debug!(objectives = m, "no directions configured, minimizing all objectives");
            self.directions = vec![Direction::Minimize; m];
        }

        let expected = self.directions.len();
        let mut degenerate = 0usize;
        let mut individuals = Vec::with_capacity(designs.len());
        for (index, (design, result)) in designs.into_iter().zip(results).enumerate() {
            if result.objectives.len() != expected {
                return Err(RunError::ObjectiveCount {
                    index,
                    expected,
                    got: result.objectives.len(),
                });
            }
            let (evaluation, is_degenerate) = result.sanitize(&self.directions);
            if is_degenerate {
                degenerate += 1;
                warn!(index, design = ?design.as_slice(), "non-finite evaluation treated as infeasible");
            }
            individuals.push(Individual::new(design, evaluation, is_degenerate));
        }

        self.evaluations += individuals.len();
        self.degenerate += degenerate;
        Ok((individuals, degenerate))
    }

    fn evaluate(&self, designs: &[DesignVector]) -> Result<Vec<EvaluationResult>, RunError<E::Error>> {
        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                use rayon::prelude::*;
                return designs
                    .par_iter()
                    .map(|d| self.evaluator.evaluate(d))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(RunError::Evaluation);
            }
        }
        #[cfg(not(feature = "parallel"))]
        let _ = self.parallel;

        self.evaluator
            .evaluate_batch(designs)
            .map_err(RunError::Evaluation)
    }
}

/// Assigns rank and crowding distance to every member and returns the fronts.
fn rank_population(population: &mut [Individual], directions: &[Direction]) -> Vec<Vec<usize>> {
    let sorted = sort_with(population.len(), |i, j| {
        constrained_compare(&population[i].evaluation, &population[j].evaluation, directions)
    });

    for (rank, front) in sorted.fronts.iter().enumerate() {
        let objectives: Vec<&[f64]> = front.iter().map(|&i| population[i].objectives()).collect();
        let distances = crowding_distance(&objectives);
        for (&i, crowding) in front.iter().zip(distances) {
            population[i].rank = rank;
            population[i].crowding = crowding;
        }
    }

    sorted.fronts
}

/// Pairs the mating pool sequentially and produces `pool.len()` children.
///
/// Each pair yields two children, one per parent order. An odd last member
/// is paired with the first pool member.
fn make_offspring<R: Rng>(
    space: &DesignSpace,
    population: &[Individual],
    pool: &[usize],
    config: &Nsga2Config,
    rng: &mut R,
) -> Vec<DesignVector> {
    let mut children = Vec::with_capacity(pool.len() + 1);
    for pair in pool.chunks(2) {
        let a = &population[pair[0]].design;
        let b = &population[pair.get(1).copied().unwrap_or(pool[0])].design;
        for (x, y) in [(a, b), (b, a)] {
            let child = sbx_crossover(
                x.as_slice(),
                y.as_slice(),
                config.crossover_eta,
                config.crossover_rate,
                rng,
            );
            let child = polynomial_mutation(&child, config.mutation_eta, config.mutation_rate, rng);
            children.push(space.conform(child));
        }
    }
    children.truncate(pool.len());
    children
}

/// Keeps `n` members, filling front by front. The front that overflows is
/// cut by descending crowding distance; ties keep merge order.
///
/// Survivors stay in merge order.
fn select_survivors(merged: Vec<Individual>, fronts: &[Vec<usize>], n: usize) -> Vec<Individual> {
    let mut keep = vec![false; merged.len()];
    let mut kept = 0usize;

    for front in fronts {
        let room = n - kept;
        if room == 0 {
            break;
        }
        if front.len() <= room {
            for &i in front {
                keep[i] = true;
            }
            kept += front.len();
            continue;
        }

        let mut by_crowding = front.clone();
        by_crowding.sort_by(|&a, &b| merged[b].crowding.total_cmp(&merged[a].crowding));
        for &i in &by_crowding[..room] {
            keep[i] = true;
        }
        kept = n;
    }

    merged
        .into_iter()
        .zip(keep)
        .filter_map(|(ind, k)| k.then_some(ind))
        .collect()
}

fn record<E: Evaluator>(
    history: &mut Vec<GenerationStats>,
    evaluator: &E,
    population: &[Individual],
    generation: usize,
    degenerate: usize,
    evaluations: usize,
) {
    let stats = GenerationStats {
        generation,
        population: population.len(),
        front_size: population.iter().filter(|i| i.rank == 0).count(),
        feasible: population.iter().filter(|i| i.is_feasible()).count(),
        degenerate,
        evaluations,
    };
    debug!(
        generation,
        front_size = stats.front_size,
        feasible = stats.feasible,
        degenerate,
        "generation complete"
    );
    evaluator.on_generation(&stats);
    history.push(stats);
}

// ============================================================================
// Tests
// ============================================================================
