//! Fast non-dominated sorting.

use super::dominance::{compare, constrained_compare, Direction, Dominance};
use crate::evaluate::EvaluationResult;

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the Pareto rank of the solution
/// at the same index. Rank 0 is the Pareto front (non-dominated solutions).
/// The fronts partition `0..n`: every index appears in exactly one front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NondominatedSortResult {
    /// Pareto rank for each solution (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

/// Fast non-dominated sorting of objective vectors.
///
/// # Algorithm (Deb et al., 2002)
///
/// 1. For each pair of solutions, determine dominance
/// 2. Solutions dominated by no other belong to front 0 (rank 0)
/// 3. Remove front 0, repeat to find subsequent fronts
///
/// # Complexity
///
/// O(m * n²) where m = number of objectives, n = number of solutions
///
/// An empty input yields no fronts.
///
/// # Example
///
/// ```
/// use u_moo::pareto::{non_dominated_sort, Direction};
///
/// let objectives = vec![
///     vec![1.0, 5.0],  // A
///     vec![3.0, 3.0],  // B
///     vec![5.0, 1.0],  // C
///     vec![4.0, 4.0],  // D, dominated by B
/// ];
/// let dirs = [Direction::Minimize, Direction::Minimize];
///
/// let result = non_dominated_sort(&objectives, &dirs);
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// assert_eq!(result.fronts, vec![vec![0, 1, 2], vec![3]]);
/// ```
pub fn non_dominated_sort<O: AsRef<[f64]>>(
    objectives: &[O],
    directions: &[Direction],
) -> NondominatedSortResult {
    sort_with(objectives.len(), |i, j| {
        compare(objectives[i].as_ref(), objectives[j].as_ref(), directions)
    })
}

/// Fast non-dominated sorting under Deb's constrained dominance.
///
/// When every result is feasible this is identical to
/// [`non_dominated_sort`] on the objectives.
///
/// # Example
///
/// ```
/// use u_moo::evaluate::EvaluationResult;
/// use u_moo::pareto::{constrained_non_dominated_sort, Direction};
///
/// let evals = vec![
///     EvaluationResult::new(vec![5.0, 5.0], 0.0), // A
///     EvaluationResult::new(vec![1.0, 1.0], 0.0), // B
///     EvaluationResult::new(vec![0.0, 0.0], 2.0), // C, infeasible
/// ];
/// let dirs = [Direction::Minimize, Direction::Minimize];
///
/// let result = constrained_non_dominated_sort(&evals, &dirs);
/// assert_eq!(result.fronts[0], vec![1]);
/// ```
pub fn constrained_non_dominated_sort(
    evaluations: &[EvaluationResult],
    directions: &[Direction],
) -> NondominatedSortResult {
    sort_with(evaluations.len(), |i, j| {
        constrained_compare(&evaluations[i], &evaluations[j], directions)
    })
}

/// Indices of the non-dominated solutions, in input order.
pub fn pareto_front_indices<O: AsRef<[f64]>>(
    objectives: &[O],
    directions: &[Direction],
) -> Vec<usize> {
    non_dominated_sort(objectives, directions)
        .fronts
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// Peels fronts off `0..n` using a pairwise comparison.
///
/// Every front lists its indices in ascending order.
pub(crate) fn sort_with<F>(n: usize, cmp: F) -> NondominatedSortResult
where
    F: Fn(usize, usize) -> Dominance,
{
    if n == 0 {
        return NondominatedSortResult::default();
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            match cmp(i, j) {
                Dominance::Left => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::Right => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::Neither => {}
            }
        }
    }

    let front_0: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    let mut fronts = vec![front_0];
    loop {
        let current = fronts
            .last()
            .expect("fronts is initialized with front_0; never empty");
        let mut next_front = Vec::new();

        for &i in current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    ranks[j] = fronts.len();
                    next_front.push(j);
                }
            }
        }

        if next_front.is_empty() {
            break;
        }
        next_front.sort_unstable();
        fronts.push(next_front);
    }

    NondominatedSortResult { ranks, fronts }
}

// ============================================================================
// Tests
// ============================================================================
