//! NSGA-II configuration.
//!
//! [`Nsga2Config`] holds all parameters that control the generational loop.

use crate::error::ConfigError;
use crate::pareto::Direction;
use crate::sampling::SamplingMethod;

/// Configuration for NSGA-II.
///
/// # Defaults
///
/// ```
/// use u_moo::nsga2::Nsga2Config;
/// use u_moo::sampling::SamplingMethod;
///
/// let config = Nsga2Config::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 20);
/// assert_eq!(config.sampling, SamplingMethod::LatinHypercube);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_moo::nsga2::Nsga2Config;
/// use u_moo::pareto::Direction;
///
/// let config = Nsga2Config::default()
///     .with_population_size(128)
///     .with_generations(16)
///     .with_directions(vec![Direction::Maximize, Direction::Minimize])
///     .with_seed(123);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Nsga2Config {
    /// Number of individuals `N` kept between generations.
    ///
    /// Zero is allowed and produces an empty result.
    pub population_size: usize,

    /// Number of generations. There is no convergence-based early stop.
    pub generations: usize,

    /// Initial population strategy.
    pub sampling: SamplingMethod,

    /// Direction of each objective, in evaluator output order.
    ///
    /// Empty means "minimize every objective", with the objective count
    /// taken from the first evaluation.
    pub directions: Vec<Direction>,

    /// Probability that SBX is applied to a pair (0.0–1.0).
    ///
    /// Otherwise the child copies a randomly chosen parent.
    pub crossover_rate: f64,

    /// SBX distribution index. Larger values keep children closer to parents.
    pub crossover_eta: f64,

    /// Per-gene probability of polynomial mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Polynomial mutation distribution index.
    pub mutation_eta: f64,

    /// Whether to evaluate designs in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed; the seed actually used is reported in the
    /// result.
    pub seed: Option<u64>,
}

impl Default for Nsga2Config {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 20,
            sampling: SamplingMethod::LatinHypercube,
            directions: Vec::new(),
            crossover_rate: 0.9,
            crossover_eta: 10.0,
            mutation_rate: 0.15,
            mutation_eta: 12.0,
            parallel: true,
            seed: None,
        }
    }
}

impl Nsga2Config {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
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

    /// Sets the SBX probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the SBX distribution index.
    pub fn with_crossover_eta(mut self, eta: f64) -> Self {
        self.crossover_eta = eta;
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the polynomial mutation distribution index.
    pub fn with_mutation_eta(mut self, eta: f64) -> Self {
        self.mutation_eta = eta;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick exploration: 48 individuals, 8 generations.
    pub fn fast() -> Self {
        Self {
            population_size: 48,
            generations: 8,
            ..Self::default()
        }
    }

    /// Preset matching the production endpoint: 128 individuals, 16 generations.
    pub fn balanced() -> Self {
        Self {
            population_size: 128,
            generations: 16,
            ..Self::default()
        }
    }

    /// Preset for final design studies: 256 individuals, 60 generations.
    pub fn quality() -> Self {
        Self {
            population_size: 256,
            generations: 60,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        check_eta("crossover", self.crossover_eta)?;
        check_eta("mutation", self.mutation_eta)?;
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}

fn check_eta(operator: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDistributionIndex { operator, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Nsga2Config::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.generations, 20);
        assert!(config.directions.is_empty());
        assert!((config.crossover_rate - 0.9).abs() < 1e-10);
        assert!((config.crossover_eta - 10.0).abs() < 1e-10);
        assert!((config.mutation_rate - 0.15).abs() < 1e-10);
        assert!((config.mutation_eta - 12.0).abs() < 1e-10);
        assert!(config.parallel);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = Nsga2Config::default()
            .with_population_size(64)
            .with_generations(5)
            .with_sampling(SamplingMethod::Uniform)
            .with_crossover_eta(15.0)
            .with_mutation_eta(20.0)
            .with_parallel(false)
            .with_seed(9);
        assert_eq!(config.population_size, 64);
        assert_eq!(config.generations, 5);
        assert_eq!(config.sampling, SamplingMethod::Uniform);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_clamp_rates() {
        let config = Nsga2Config::default()
            .with_crossover_rate(1.5)
            .with_mutation_rate(-0.5);
        assert_eq!(config.crossover_rate, 1.0);
        assert_eq!(config.mutation_rate, 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let mut config = Nsga2Config::default();
        config.mutation_rate = 2.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRate { name: "mutation_rate", .. })
        ));

        let config = Nsga2Config::default().with_crossover_eta(-1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDistributionIndex { operator: "crossover", .. })
        ));

        let config = Nsga2Config::default().with_mutation_eta(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_population_is_valid() {
        assert!(Nsga2Config::default()
            .with_population_size(0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_presets_validate() {
        for config in [Nsga2Config::fast(), Nsga2Config::balanced(), Nsga2Config::quality()] {
            assert!(config.validate().is_ok());
        }
        assert_eq!(Nsga2Config::balanced().population_size, 128);
        assert_eq!(Nsga2Config::balanced().generations, 16);
    }
}
