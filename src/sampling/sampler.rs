//! Uniform and Latin Hypercube samplers.

use crate::random::shuffle;
use crate::space::{DesignSpace, DesignVector};
use rand::Rng;

/// Strategy for drawing the initial population.
///
/// # Example
///
/// ```
/// use u_moo::random::create_rng;
/// use u_moo::sampling::SamplingMethod;
/// use u_moo::space::{DesignSpace, Parameter};
///
/// let space = DesignSpace::new(vec![
///     Parameter::continuous("x", 0.0, 1.0),
///     Parameter::integer("n", 1, 10),
/// ])
/// .unwrap();
///
/// let mut rng = create_rng(1);
/// let designs = SamplingMethod::LatinHypercube.sample(&space, 20, &mut rng);
/// assert_eq!(designs.len(), 20);
/// assert!(designs.iter().all(|d| space.contains(d)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SamplingMethod {
    /// `value = low + (high - low) * U(0, 1)` per parameter.
    Uniform,

    /// Latin Hypercube Sampling.
    ///
    /// `[0, 1)` is split into `n` bins per dimension, one jittered point is
    /// placed in each bin, and each dimension's bins are shuffled
    /// independently across the `n` samples.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "lhs"))]
    LatinHypercube,
}

impl SamplingMethod {
    /// Draws `n` design vectors from `space`.
    ///
    /// `n == 0` returns an empty population. Integer parameters are rounded
    /// after scaling and pinned parameters take their pinned value.
    pub fn sample<R: Rng>(&self, space: &DesignSpace, n: usize, rng: &mut R) -> Vec<DesignVector> {
        if n == 0 {
            return Vec::new();
        }

        let d = space.len();
        let unit = match self {
            SamplingMethod::Uniform => uniform_unit(n, d, rng),
            SamplingMethod::LatinHypercube => lhs_unit(n, d, rng),
        };

        unit.into_iter()
            .map(|row| {
                let values = row
                    .iter()
                    .zip(space.parameters())
                    .map(|(&u, p)| p.scale(u))
                    .collect();
                space.conform(values)
            })
            .collect()
    }
}

/// `n` points drawn uniformly from the `d`-dimensional unit cube.
pub fn uniform_unit<R: Rng>(n: usize, d: usize, rng: &mut R) -> Vec<Vec<f64>> {
    (0..n)
        .map(|_| (0..d).map(|_| rng.random::<f64>()).collect())
        .collect()
}

/// `n` Latin Hypercube points in the `d`-dimensional unit cube.
///
/// Row `i` is sample `i`; for every column `j`, `floor(row[j] * n)` takes
/// each value in `0..n` exactly once.
///
/// # Complexity
/// O(n * d)
pub fn lhs_unit<R: Rng>(n: usize, d: usize, rng: &mut R) -> Vec<Vec<f64>> {
    if n == 0 {
        return Vec::new();
    }
    let n_f = n as f64;

    // One column per dimension: a jittered point in each bin, then shuffled.
    let columns: Vec<Vec<f64>> = (0..d)
        .map(|_| {
            let mut col: Vec<f64> = (0..n)
                .map(|i| (i as f64 + rng.random::<f64>()) / n_f)
                .collect();
            shuffle(&mut col, rng);
            col
        })
        .collect();

    (0..n)
        .map(|i| columns.iter().map(|col| col[i]).collect())
        .collect()
}
