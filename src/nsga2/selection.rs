//! Crowded binary tournament.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II",
//!   IEEE Transactions on Evolutionary Computation, 6(2), 182-197

use super::types::Individual;
use rand::Rng;

/// Picks two random indices and returns the winner.
///
/// Lower rank wins. On equal rank the higher crowding distance wins, with
/// the first draw kept on a crowding tie.
///
/// # Panics
/// Panics if `population` is empty.
pub fn binary_tournament<R: Rng>(population: &[Individual], rng: &mut R) -> usize {
    let n = population.len();
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    let (ia, ib) = (&population[a], &population[b]);

    if ia.rank != ib.rank {
        return if ia.rank < ib.rank { a } else { b };
    }
    if ia.crowding >= ib.crowding {
        a
    } else {
        b
    }
}

/// Fills a mating pool of `size` indices by repeated [`binary_tournament`].
pub fn mating_pool<R: Rng>(population: &[Individual], size: usize, rng: &mut R) -> Vec<usize> {
    if population.is_empty() {
        return Vec::new();
    }
    (0..size).map(|_| binary_tournament(population, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::EvaluationResult;
    use crate::random::create_rng;
    use crate::space::{DesignSpace, Parameter};

    fn individual(rank: usize, crowding: f64) -> Individual {
        let space = DesignSpace::new(vec![Parameter::continuous("x", 0.0, 1.0)]).unwrap();
        let mut ind = Individual::new(
            space.design(vec![0.5]).unwrap(),
            EvaluationResult::feasible(vec![0.0]),
            false,
        );
        ind.rank = rank;
        ind.crowding = crowding;
        ind
    }

    #[test]
    fn test_lower_rank_wins() {
        let pop = vec![individual(0, 0.0), individual(3, f64::INFINITY)];
        let mut rng = create_rng(42);
        // rank 3 only wins when drawn against itself
        let wins = (0..1000)
            .filter(|_| binary_tournament(&pop, &mut rng) == 0)
            .count();
        // P(win for 0) = 3/4
        assert!(wins > 650 && wins < 850, "wins = {wins}");
    }

    #[test]
    fn test_crowding_breaks_rank_ties() {
        let pop = vec![individual(1, 0.2), individual(1, 5.0)];
        let mut rng = create_rng(1);
        let wins = (0..1000)
            .filter(|_| binary_tournament(&pop, &mut rng) == 1)
            .count();
        assert!(wins > 650 && wins < 850, "wins = {wins}");
    }

    #[test]
    fn test_mating_pool_size() {
        let pop: Vec<_> = (0..7).map(|i| individual(i % 2, i as f64)).collect();
        let mut rng = create_rng(3);
        let pool = mating_pool(&pop, 7, &mut rng);
        assert_eq!(pool.len(), 7);
        assert!(pool.iter().all(|&i| i < 7));
        assert!(mating_pool(&[], 5, &mut rng).is_empty());
    }
}
