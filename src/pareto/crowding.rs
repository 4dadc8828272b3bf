//! Crowding distance.

use std::cmp::Ordering;

/// Objective ranges narrower than this normalize by 1.0 instead.
const MIN_RANGE: f64 = 1e-12;

/// Crowding distance assignment for diversity preservation.
///
/// Computes the crowding distance for each member of one front, measuring
/// how isolated it is in objective space. Higher distance means more
/// isolated (more valuable for diversity).
///
/// Fronts of two or fewer members get `f64::INFINITY` everywhere. Otherwise
/// the minimum and maximum member of every objective get `f64::INFINITY`.
///
/// # Algorithm (Deb et al., 2002)
///
/// For each objective:
/// 1. Sort members by objective value
/// 2. Assign infinity to the two extremes
/// 3. Every interior member adds `(next - prev) / (max - min)`; a range
///    below `1e-12` divides by 1.0 instead
///
/// # Complexity
///
/// O(m * n * log n) where m = number of objectives, n = front size
///
/// # Example
///
/// ```
/// use u_moo::pareto::crowding_distance;
///
/// let front = vec![
///     vec![1.0, 5.0],
///     vec![3.0, 3.0],
///     vec![5.0, 1.0],
/// ];
///
/// let distances = crowding_distance(&front);
/// assert!(distances[0].is_infinite());
/// assert!(distances[2].is_infinite());
/// assert!(distances[1].is_finite());
/// ```
pub fn crowding_distance<O: AsRef<[f64]>>(front: &[O]) -> Vec<f64> {
    let n = front.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = front[0].as_ref().len();
    let mut distances = vec![0.0f64; n];
    let mut order: Vec<usize> = (0..n).collect();

    for obj in 0..m {
        let value = |i: usize| front[i].as_ref()[obj];
        order.sort_by(|&a, &b| value(a).partial_cmp(&value(b)).unwrap_or(Ordering::Equal));

        let first = order[0];
        let last = order[n - 1];
        distances[first] = f64::INFINITY;
        distances[last] = f64::INFINITY;

        let range = value(last) - value(first);
        let denom = if range.abs() > MIN_RANGE { range } else { 1.0 };

        for w in order.windows(3) {
            let (prev, mid, next) = (w[0], w[1], w[2]);
            distances[mid] += (value(next) - value(prev)) / denom;
        }
    }

    distances
}

// ============================================================================
// Tests
// ============================================================================
