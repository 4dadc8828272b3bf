//! Pairwise dominance tests.

use crate::evaluate::EvaluationResult;

/// Optimization direction of one objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Lower is better.
    #[default]
    Minimize,
    /// Higher is better.
    Maximize,
}

impl Direction {
    /// `true` if `a` is strictly better than `b` in this direction.
    #[inline]
    pub fn better(self, a: f64, b: f64) -> bool {
        match self {
            Direction::Minimize => a < b,
            Direction::Maximize => a > b,
        }
    }

    /// Worst finite value in this direction.
    pub fn worst(self) -> f64 {
        match self {
            Direction::Minimize => f64::MAX,
            Direction::Maximize => f64::MIN,
        }
    }
}

/// Outcome of a pairwise dominance comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other.
    Neither,
}

/// Pareto comparison of two objective vectors.
///
/// One side dominates when it is at least as good in every objective and
/// strictly better in at least one.
pub fn compare(a: &[f64], b: &[f64], directions: &[Direction]) -> Dominance {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), directions.len());

    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for ((&va, &vb), &dir) in a.iter().zip(b).zip(directions) {
        if dir.better(va, vb) {
            a_better_in_some = true;
        } else if dir.better(vb, va) {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Returns `true` if `a` Pareto-dominates `b`.
///
/// # Example
///
/// ```
/// use u_moo::pareto::{dominates, Direction};
///
/// let dirs = [Direction::Maximize, Direction::Minimize];
/// assert!(dominates(&[320.0, 1.0e7], &[300.0, 1.0e7], &dirs));
/// assert!(!dominates(&[320.0, 2.0e7], &[300.0, 1.0e7], &dirs));
/// ```
pub fn dominates(a: &[f64], b: &[f64], directions: &[Direction]) -> bool {
    compare(a, b, directions) == Dominance::Left
}

/// Deb's constrained comparison.
///
/// 1. Feasible beats infeasible.
/// 2. Between two infeasible results, the smaller violation wins; equal
///    violations are incomparable.
/// 3. Between two feasible results, plain Pareto dominance on objectives.
pub fn constrained_compare(
    a: &EvaluationResult,
    b: &EvaluationResult,
    directions: &[Direction],
) -> Dominance {
    match (a.is_feasible(), b.is_feasible()) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        (false, false) => {
            if a.violation < b.violation {
                Dominance::Left
            } else if b.violation < a.violation {
                Dominance::Right
            } else {
                Dominance::Neither
            }
        }
        (true, true) => compare(&a.objectives, &b.objectives, directions),
    }
}

/// Returns `true` if `a` constrained-dominates `b`.
///
/// # Example
///
/// ```
/// use u_moo::evaluate::EvaluationResult;
/// use u_moo::pareto::{constrained_dominates, Direction};
///
/// let dirs = [Direction::Minimize, Direction::Minimize];
/// let feasible = EvaluationResult::new(vec![9.0, 9.0], 0.0);
/// let infeasible = EvaluationResult::new(vec![0.0, 0.0], 0.5);
/// assert!(constrained_dominates(&feasible, &infeasible, &dirs));
/// ```
pub fn constrained_dominates(
    a: &EvaluationResult,
    b: &EvaluationResult,
    directions: &[Direction],
) -> bool {
    constrained_compare(a, b, directions) == Dominance::Left
}
