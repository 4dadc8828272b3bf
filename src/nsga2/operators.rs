//! Real-valued variation operators.
//!
//! Both operators read parent genes and return a new gene vector; nothing
//! is modified in place. The result may leave the parameter ranges and is
//! conformed to the design space by the runner.
//!
//! # References
//!
//! - Deb & Agrawal (1995), "Simulated Binary Crossover for Continuous Search Space",
//!   Complex Systems 9(2), 115-148
//! - Deb & Goyal (1996), "A Combined Genetic Adaptive Search (GeneAS) for
//!   Engineering Design", Computer Science and Informatics 26(4), 30-45

use rand::Rng;

/// Fraction of the parents' span allowed outside it on each side.
const SBX_SOFT_MARGIN: f64 = 0.25;

/// Polynomial mutation step, as a fraction of the gene's magnitude.
const MUTATION_SCALE: f64 = 0.15;

/// Simulated Binary Crossover (SBX) producing one child.
///
/// With probability `1 - probability` the child is a verbatim copy of a
/// randomly chosen parent. Otherwise, per gene:
///
/// - equal parent values are inherited unchanged
/// - else `u ~ U(0, 1)` gives the spread
///   `beta = (2u)^(1/(eta+1))` for `u <= 0.5`,
///   `beta = (1 / (2(1-u)))^(1/(eta+1))` otherwise,
///   the child is `0.5 * ((1 + beta) x + (1 - beta) y)`, clamped to the
///   parents' span widened by 25% on each side
///
/// # Panics
/// Panics if the parents have different lengths.
///
/// # Example
///
/// ```
/// use u_moo::nsga2::sbx_crossover;
/// use u_moo::random::create_rng;
///
/// let mut rng = create_rng(1);
/// let x = [1.0, 5.0, 9.0];
/// assert_eq!(sbx_crossover(&x, &x, 10.0, 1.0, &mut rng), x.to_vec());
/// ```
pub fn sbx_crossover<R: Rng>(
    x: &[f64],
    y: &[f64],
    eta: f64,
    probability: f64,
    rng: &mut R,
) -> Vec<f64> {
    assert_eq!(x.len(), y.len(), "parents must have equal length");

    if rng.random::<f64>() >= probability {
        return if rng.random_bool(0.5) {
            x.to_vec()
        } else {
            y.to_vec()
        };
    }

    let exponent = 1.0 / (eta + 1.0);
    x.iter()
        .zip(y)
        .map(|(&a, &b)| {
            if a == b {
                return a;
            }
            let (lower, upper) = if a < b { (a, b) } else { (b, a) };
            let u: f64 = rng.random();
            let beta = if u <= 0.5 {
                (2.0 * u).powf(exponent)
            } else {
                (1.0 / (2.0 * (1.0 - u))).powf(exponent)
            };
            let child = 0.5 * ((1.0 + beta) * a + (1.0 - beta) * b);
            let span = upper - lower;
            child.clamp(lower - SBX_SOFT_MARGIN * span, upper + SBX_SOFT_MARGIN * span)
        })
        .collect()
}

/// Polynomial mutation.
///
/// Each gene independently, with probability `probability`, is scaled by
/// `1 + 0.15 * delta` where `u ~ U(0, 1)` and
/// `delta = (2u)^(1/(eta+1)) - 1` for `u < 0.5`,
/// `delta = 1 - (2(1-u))^(1/(eta+1))` otherwise.
///
/// The step is relative to the gene's magnitude, so a gene at exactly zero
/// never moves.
pub fn polynomial_mutation<R: Rng>(
    genes: &[f64],
    eta: f64,
    probability: f64,
    rng: &mut R,
) -> Vec<f64> {
    let exponent = 1.0 / (eta + 1.0);
    genes
        .iter()
        .map(|&v| {
            if rng.random::<f64>() >= probability {
                return v;
            }
            let u: f64 = rng.random();
            let delta = if u < 0.5 {
                (2.0 * u).powf(exponent) - 1.0
            } else {
                1.0 - (2.0 * (1.0 - u)).powf(exponent)
            };
            v * (1.0 + MUTATION_SCALE * delta)
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
