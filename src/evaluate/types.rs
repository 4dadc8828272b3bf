//! Evaluation result and the [`Evaluator`] trait.

use crate::nsga2::GenerationStats;
use crate::pareto::Direction;
use crate::space::DesignVector;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::marker::PhantomData;

/// Score of one design.
///
/// Feasibility is derived from `violation` by [`is_feasible`](Self::is_feasible)
/// and is never stored, so the two cannot disagree.
///
/// # Example
///
/// ```
/// use u_moo::evaluate::EvaluationResult;
///
/// let ok = EvaluationResult::new(vec![310.0, 8.5e6], 0.0).with_raw("isp_s", 310.0);
/// assert!(ok.is_feasible());
///
/// let bad = EvaluationResult::new(vec![290.0, 1.4e7], 0.17);
/// assert!(!bad.is_feasible());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationResult {
    /// Objective values, in the order of the configured directions.
    pub objectives: Vec<f64>,

    /// Summed constraint violation. Zero means feasible.
    pub violation: f64,

    /// Domain metrics carried through to the caller untouched.
    #[cfg_attr(feature = "serde", serde(default))]
    pub raw: BTreeMap<String, f64>,
}

impl EvaluationResult {
    /// A result with the given objectives and violation.
    pub fn new(objectives: Vec<f64>, violation: f64) -> Self {
        Self {
            objectives,
            violation,
            raw: BTreeMap::new(),
        }
    }

    /// A feasible result (`violation == 0`).
    pub fn feasible(objectives: Vec<f64>) -> Self {
        Self::new(objectives, 0.0)
    }

    /// Adds a raw metric.
    pub fn with_raw(mut self, name: impl Into<String>, value: f64) -> Self {
        self.raw.insert(name.into(), value);
        self
    }

    /// `true` iff `violation == 0`.
    pub fn is_feasible(&self) -> bool {
        self.violation == 0.0
    }

    /// Normalizes a freshly returned result.
    ///
    /// Non-finite objectives make the result maximally infeasible: the
    /// violation becomes `+Inf` and each offending objective is replaced by
    /// the worst finite value for its direction, so no NaN reaches a
    /// comparison. A NaN or `-Inf` violation also becomes `+Inf`; a finite
    /// negative one is clamped to zero.
    ///
    /// Returns the normalized result and whether it was degenerate.
    pub(crate) fn sanitize(mut self, directions: &[Direction]) -> (Self, bool) {
        let mut degenerate = false;
        for (v, dir) in self.objectives.iter_mut().zip(directions) {
            if !v.is_finite() {
                *v = dir.worst();
                degenerate = true;
            }
        }

        if degenerate || self.violation.is_nan() || self.violation == f64::NEG_INFINITY {
            self.violation = f64::INFINITY;
            degenerate = true;
        } else if self.violation < 0.0 {
            self.violation = 0.0;
        }

        (self, degenerate)
    }
}

/// A design-domain scorer.
///
/// Implement [`evaluate`](Self::evaluate). Override
/// [`evaluate_batch`](Self::evaluate_batch) when the domain scores a batch
/// more efficiently than one design at a time; the runner calls it when
/// parallel evaluation is off, and maps `evaluate` over the batch with
/// rayon when it is on.
///
/// Errors abort the run and reach the caller as
/// [`RunError::Evaluation`](crate::RunError::Evaluation). The runner never
/// retries.
///
/// # Implementing
///
/// ```
/// use std::convert::Infallible;
/// use u_moo::evaluate::{EvaluationResult, Evaluator};
/// use u_moo::space::DesignVector;
///
/// /// Minimize both `x` and `1 - x`.
/// struct Tradeoff;
///
/// impl Evaluator for Tradeoff {
///     type Error = Infallible;
///
///     fn evaluate(&self, design: &DesignVector) -> Result<EvaluationResult, Infallible> {
///         let x = design.as_slice()[0];
///         Ok(EvaluationResult::feasible(vec![x, 1.0 - x]))
///     }
/// }
/// ```
pub trait Evaluator: Send + Sync {
    /// Error raised by the domain model.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Scores one design.
    fn evaluate(&self, design: &DesignVector) -> Result<EvaluationResult, Self::Error>;

    /// Scores a batch; the output has the same length and order as `designs`.
    fn evaluate_batch(
        &self,
        designs: &[DesignVector],
    ) -> Result<Vec<EvaluationResult>, Self::Error> {
        designs.iter().map(|d| self.evaluate(d)).collect()
    }

    /// Called after each generation's truncation. Default is a no-op.
    fn on_generation(&self, _stats: &GenerationStats) {}
}

/// [`Evaluator`] backed by a closure.
///
/// ```
/// use std::convert::Infallible;
/// use u_moo::evaluate::{EvaluationResult, Evaluator, FnEvaluator};
///
/// let eval = FnEvaluator::new(|d: &u_moo::space::DesignVector| {
///     Ok::<_, Infallible>(EvaluationResult::feasible(vec![d.as_slice()[0]]))
/// });
/// # let _ = &eval;
/// ```
pub struct FnEvaluator<F, E> {
    f: F,
    _error: PhantomData<fn() -> E>,
}

impl<F, E> FnEvaluator<F, E>
where
    F: Fn(&DesignVector) -> Result<EvaluationResult, E> + Send + Sync,
    E: std::error::Error + Send + Sync + 'static,
{
    /// Wraps `f`.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _error: PhantomData,
        }
    }
}

impl<F, E> Evaluator for FnEvaluator<F, E>
where
    F: Fn(&DesignVector) -> Result<EvaluationResult, E> + Send + Sync,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn evaluate(&self, design: &DesignVector) -> Result<EvaluationResult, E> {
        (self.f)(design)
    }
}

/// [`Evaluator`] backed by a closure that cannot fail.
pub fn infallible<G>(g: G) -> impl Evaluator<Error = Infallible>
where
    G: Fn(&DesignVector) -> EvaluationResult + Send + Sync,
{
    FnEvaluator::new(move |d: &DesignVector| Ok::<_, Infallible>(g(d)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::{DesignSpace, Parameter};

    const MIN2: [Direction; 2] = [Direction::Minimize, Direction::Minimize];

    #[test]
    fn test_feasible_is_derived() {
        let mut r = EvaluationResult::feasible(vec![1.0]);
        assert!(r.is_feasible());
        r.violation = 0.5;
        assert!(!r.is_feasible());
    }

    #[test]
    fn test_sanitize_nan_objective() {
        let r = EvaluationResult::new(vec![f64::NAN, 2.0], 0.0);
        let (r, degenerate) = r.sanitize(&MIN2);
        assert!(degenerate);
        assert!(!r.is_feasible());
        assert_eq!(r.violation, f64::INFINITY);
        assert_eq!(r.objectives, vec![f64::MAX, 2.0]);
    }

    #[test]
    fn test_sanitize_inf_maximized_objective() {
        let dirs = [Direction::Maximize, Direction::Minimize];
        let r = EvaluationResult::new(vec![f64::INFINITY, 1.0], 0.0);
        let (r, degenerate) = r.sanitize(&dirs);
        assert!(degenerate);
        assert_eq!(r.objectives[0], f64::MIN);
    }

    #[test]
    fn test_sanitize_violation() {
        let (r, degenerate) = EvaluationResult::new(vec![1.0, 1.0], f64::NAN).sanitize(&MIN2);
        assert!(degenerate);
        assert_eq!(r.violation, f64::INFINITY);

        let (r, degenerate) = EvaluationResult::new(vec![1.0, 1.0], f64::NEG_INFINITY).sanitize(&MIN2);
        assert!(degenerate);
        assert!(!r.is_feasible());
        assert_eq!(r.violation, f64::INFINITY);

        let (r, degenerate) = EvaluationResult::new(vec![1.0, 1.0], -0.3).sanitize(&MIN2);
        assert!(!degenerate);
        assert!(r.is_feasible());

        let (r, degenerate) = EvaluationResult::new(vec![1.0, 1.0], 0.4).sanitize(&MIN2);
        assert!(!degenerate);
        assert_eq!(r.violation, 0.4);
    }

    #[test]
    fn test_default_batch_preserves_order() {
        let space = DesignSpace::new(vec![Parameter::continuous("x", 0.0, 10.0)]).unwrap();
        let designs: Vec<_> = (0..5)
            .map(|i| space.design(vec![i as f64]).unwrap())
            .collect();
        let eval = infallible(|d| EvaluationResult::feasible(vec![d.as_slice()[0] * 2.0]));
        let out = eval.evaluate_batch(&designs).unwrap();
        let firsts: Vec<f64> = out.iter().map(|r| r.objectives[0]).collect();
        assert_eq!(firsts, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[derive(Debug, thiserror::Error)]
    #[error("solver diverged at {0}")]
    struct Diverged(f64);

    #[test]
    fn test_batch_stops_at_first_error() {
        let space = DesignSpace::new(vec![Parameter::continuous("x", 0.0, 10.0)]).unwrap();
        let designs: Vec<_> = (0..5)
            .map(|i| space.design(vec![i as f64]).unwrap())
            .collect();
        let eval = FnEvaluator::new(|d: &DesignVector| {
            let x = d.as_slice()[0];
            if x >= 3.0 {
                Err(Diverged(x))
            } else {
                Ok(EvaluationResult::feasible(vec![x]))
            }
        });
        let err = eval.evaluate_batch(&designs).unwrap_err();
        assert_eq!(err.to_string(), "solver diverged at 3");
    }
}
