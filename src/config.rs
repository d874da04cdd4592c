//! Evolution loop configuration.
//!
//! [`EvolutionConfig`] holds all parameters that control the
//! generational loop.

use crate::error::{GaError, Result};

/// Configuration for the evolution loop.
///
/// # Defaults
///
/// ```
/// use chromo::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.epochs, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use chromo::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(50)
///     .with_epochs(200)
///     .with_mutation_probability(0.25)
///     .with_seed(9876);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionConfig {
    /// Number of genomes in the population.
    ///
    /// Must be at least 2 so that truncation selection leaves a
    /// non-empty mating pool. Typical range: 50–500.
    pub population_size: usize,

    /// Number of generations to run before stopping.
    pub epochs: usize,

    /// Probability of applying a swap mutation to each offspring (0.0–1.0).
    pub mutation_probability: f64,

    /// Crossover segment length for every genome in the population.
    ///
    /// `None` uses the per-genome default of `max(L / 3, 1)`.
    pub swap_length: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            epochs: 100,
            mutation_probability: 0.25,
            swap_length: None,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations to run.
    pub fn with_epochs(mut self, n: usize) -> Self {
        self.epochs = n;
        self
    }

    /// Sets the mutation probability, clamped to `[0, 1]`.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets an explicit crossover segment length for all genomes.
    pub fn with_swap_length(mut self, swap_length: usize) -> Self {
        self.swap_length = Some(swap_length);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`GaError::InvalidConfiguration`] if any parameter is invalid.
    /// An explicit `swap_length` is validated against the genome length
    /// at genome construction, not here.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(GaError::InvalidConfiguration(
                "population_size must be at least 2".into(),
            ));
        }
        if self.epochs == 0 {
            return Err(GaError::InvalidConfiguration(
                "epochs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EvolutionConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.epochs, 100);
        assert!((config.mutation_probability - 0.25).abs() < 1e-12);
        assert!(config.swap_length.is_none());
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EvolutionConfig::default()
            .with_population_size(10)
            .with_epochs(20)
            .with_mutation_probability(0.5)
            .with_swap_length(2)
            .with_seed(9876);

        assert_eq!(config.population_size, 10);
        assert_eq!(config.epochs, 20);
        assert!((config.mutation_probability - 0.5).abs() < 1e-12);
        assert_eq!(config.swap_length, Some(2));
        assert_eq!(config.seed, Some(9876));
    }

    #[test]
    fn test_mutation_probability_clamped() {
        let config = EvolutionConfig::default().with_mutation_probability(1.5);
        assert!((config.mutation_probability - 1.0).abs() < 1e-12);

        let config = EvolutionConfig::default().with_mutation_probability(-0.5);
        assert!(config.mutation_probability.abs() < 1e-12);
    }

    #[test]
    fn test_validate_population_too_small() {
        assert!(EvolutionConfig::default()
            .with_population_size(1)
            .validate()
            .is_err());
        assert!(EvolutionConfig::default()
            .with_population_size(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_zero_epochs() {
        assert!(EvolutionConfig::default().with_epochs(0).validate().is_err());
    }
}
