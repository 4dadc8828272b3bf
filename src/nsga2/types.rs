//! Population members and per-generation statistics.

use crate::evaluate::EvaluationResult;
use crate::space::DesignVector;

/// A scored design inside an NSGA-II population.
///
/// `rank` and `crowding` are assigned by the runner on every sort pass and
/// only mean something relative to the population they were computed in.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Individual {
    /// The design.
    pub design: DesignVector,

    /// Its (sanitized) evaluation.
    pub evaluation: EvaluationResult,

    /// Non-domination rank; 0 is the Pareto front.
    pub rank: usize,

    /// Crowding distance within its front.
    pub crowding: f64,

    /// Whether the evaluator returned non-finite values for this design.
    pub degenerate: bool,
}

impl Individual {
    pub(crate) fn new(design: DesignVector, evaluation: EvaluationResult, degenerate: bool) -> Self {
        Self {
            design,
            evaluation,
            rank: 0,
            crowding: 0.0,
            degenerate,
        }
    }

    /// Objective values.
    pub fn objectives(&self) -> &[f64] {
        &self.evaluation.objectives
    }

    /// `true` iff the evaluation has zero violation.
    pub fn is_feasible(&self) -> bool {
        self.evaluation.is_feasible()
    }
}

/// Snapshot of one generation, reported to
/// [`Evaluator::on_generation`](crate::evaluate::Evaluator::on_generation)
/// and kept in [`Nsga2Result::history`](super::Nsga2Result::history).
///
/// Generation 0 is the initial population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation index.
    pub generation: usize,

    /// Population size after truncation.
    pub population: usize,

    /// Size of front 0.
    pub front_size: usize,

    /// Number of feasible individuals in the population.
    pub feasible: usize,

    /// Degenerate evaluations performed in this generation.
    pub degenerate: usize,

    /// Evaluations performed so far in the run.
    pub evaluations: usize,
}
