//! Generational evolution loop.
//!
//! [`Evolution`] drives repeated generations over a population of
//! genomes: evaluate → rank → select → reproduce → mutate → replace,
//! until the configured epoch count is reached.
//!
//! Selection is truncation selection: the best half of the ranked
//! population becomes the mating pool, parents are drawn from it
//! uniformly with replacement, and offspring are produced with the
//! permutation-preserving crossover. The mating pool itself carries
//! over unchanged into the next generation.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};

use crate::config::EvolutionConfig;
use crate::error::{GaError, Result};
use crate::genome::{Allele, Genome};
use crate::score::Score;

/// Result of an evolution run.
#[derive(Debug, Clone)]
pub struct EvolutionResult<A, S> {
    /// Best genome of the final ranked population.
    pub best: Genome<A>,

    /// Fitness of [`best`](Self::best).
    pub best_fitness: S,

    /// Number of generations executed.
    pub generations: usize,

    /// Best fitness of each generation, in order.
    pub fitness_history: Vec<f64>,
}

/// Executes the generational evolution loop.
///
/// # Usage
///
/// ```
/// use chromo::{Evolution, EvolutionConfig};
///
/// let domain = vec![0u32, 1, 2, 3, 4];
/// let config = EvolutionConfig::default()
///     .with_population_size(10)
///     .with_epochs(20)
///     .with_seed(42);
///
/// // Prefer tours that keep the values in ascending order.
/// let result = Evolution::run(
///     &domain,
///     |tour: &[u32]| {
///         tour.windows(2)
///             .map(|w| (w[1] as f64 - w[0] as f64).abs())
///             .sum::<f64>()
///     },
///     &config,
/// )
/// .unwrap();
/// assert_eq!(result.generations, 20);
/// ```
pub struct Evolution;

impl Evolution {
    /// Runs the loop to completion and returns the best genome found.
    ///
    /// The population is initialized with `population_size` independent
    /// random shuffles of `domain`. Lower fitness is better.
    ///
    /// # Errors
    /// [`GaError::InvalidConfiguration`] for an invalid configuration or
    /// an empty domain; any operator error is propagated unchanged. No
    /// error is retried internally.
    pub fn run<A, S, F>(
        domain: &[A],
        fitness: F,
        config: &EvolutionConfig,
    ) -> Result<EvolutionResult<A, S>>
    where
        A: Allele,
        S: Score,
        F: Fn(&[A]) -> S,
    {
        Self::run_with_observer(domain, fitness, config, |_, _, _| {})
    }

    /// Runs the loop, reporting the best genome and its fitness to
    /// `observer` once per generation (starting at generation 1).
    pub fn run_with_observer<A, S, F, O>(
        domain: &[A],
        fitness: F,
        config: &EvolutionConfig,
        mut observer: O,
    ) -> Result<EvolutionResult<A, S>>
    where
        A: Allele,
        S: Score,
        F: Fn(&[A]) -> S,
        O: FnMut(usize, &Genome<A>, S),
    {
        config.validate()?;
        if domain.is_empty() {
            return Err(GaError::InvalidConfiguration(
                "allele domain must not be empty".into(),
            ));
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        // Initial population: independent random shuffles of the domain.
        let n = config.population_size;
        let mut population: Vec<Genome<A>> = Vec::with_capacity(n);
        for _ in 0..n {
            let mut alleles = domain.to_vec();
            alleles.shuffle(&mut rng);
            let genome = match config.swap_length {
                Some(swap_length) => Genome::with_swap_length(alleles, swap_length)?,
                None => Genome::new(alleles)?,
            };
            population.push(genome);
        }

        let mut fitness_history = Vec::with_capacity(config.epochs);
        let mut generation = 1usize;

        loop {
            // EVALUATE + RANK: fresh scores every generation, stable
            // sort ascending so ties keep their original order.
            let mut scored: Vec<(S, Genome<A>)> = population
                .into_iter()
                .map(|genome| (genome.value(&fitness), genome))
                .collect();
            scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

            {
                let (score, best) = &scored[0];
                fitness_history.push(score.to_f64());
                log::debug!(
                    "generation {generation}: best fitness {:.6} ({:?})",
                    score.to_f64(),
                    best.alleles()
                );
                observer(generation, best, *score);
            }

            if generation >= config.epochs {
                let (best_fitness, best) = scored.swap_remove(0);
                return Ok(EvolutionResult {
                    best,
                    best_fitness,
                    generations: generation,
                    fitness_history,
                });
            }
            generation += 1;

            // SELECT: truncation — the best half becomes the mating pool.
            let pool_size = n / 2;
            let mut pool: Vec<Genome<A>> =
                scored.into_iter().map(|(_, genome)| genome).collect();
            pool.truncate(pool_size);

            // REPRODUCE + MUTATE: parents drawn uniformly with
            // replacement (self-mating permitted).
            let offspring_target = n - pool_size;
            let mut offspring: Vec<Genome<A>> = Vec::with_capacity(offspring_target);
            while offspring.len() < offspring_target {
                let mother = pool.choose(&mut rng).expect("mating pool is not empty");
                let father = pool.choose(&mut rng).expect("mating pool is not empty");
                let (child1, child2) = mother.mate_no_duplicates(father, &mut rng)?;
                for mut child in [child1, child2] {
                    if offspring.len() >= offspring_target {
                        break;
                    }
                    if rng.random_range(0.0..1.0) < config.mutation_probability {
                        child.mutate_swap(&mut rng);
                    }
                    offspring.push(child);
                }
            }

            // REPLACE: next generation = mating pool ++ offspring.
            population = pool;
            population.extend(offspring);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Five labeled cities with fixed coordinates.
    fn cities() -> HashMap<char, (f64, f64)> {
        HashMap::from([
            ('A', (0.0, 0.0)),
            ('B', (10.0, 0.0)),
            ('C', (10.0, 10.0)),
            ('D', (0.0, 10.0)),
            ('E', (5.0, 20.0)),
        ])
    }

    /// Sum of consecutive pairwise distances along the tour.
    fn path_length(tour: &[char], coords: &HashMap<char, (f64, f64)>) -> f64 {
        tour.windows(2)
            .map(|pair| {
                let (x1, y1) = coords[&pair[0]];
                let (x2, y2) = coords[&pair[1]];
                ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
            })
            .sum()
    }

    fn tsp_config() -> EvolutionConfig {
        EvolutionConfig::default()
            .with_population_size(10)
            .with_epochs(20)
            .with_mutation_probability(0.25)
            .with_seed(9876)
    }

    #[test]
    fn test_tsp_scenario_terminates_after_epoch_limit() {
        let coords = cities();
        let domain: Vec<char> = vec!['A', 'B', 'C', 'D', 'E'];

        let result =
            Evolution::run(&domain, |tour| path_length(tour, &coords), &tsp_config()).unwrap();

        assert_eq!(result.generations, 20);
        assert_eq!(result.fitness_history.len(), 20);

        // The returned best can never be worse than generation 1's best:
        // the mating pool carries the ranked best half over unchanged.
        assert!(
            result.best_fitness <= result.fitness_history[0],
            "final best {} worse than generation 1 best {}",
            result.best_fitness,
            result.fitness_history[0]
        );

        // The result is still a valid permutation of the domain.
        let mut tour = result.best.into_alleles();
        tour.sort_unstable();
        assert_eq!(tour, domain);
    }

    #[test]
    fn test_same_seed_reproduces_run() {
        let coords = cities();
        let domain: Vec<char> = vec!['A', 'B', 'C', 'D', 'E'];
        let fitness = |tour: &[char]| path_length(tour, &coords);

        let first = Evolution::run(&domain, fitness, &tsp_config()).unwrap();
        let second = Evolution::run(&domain, fitness, &tsp_config()).unwrap();

        assert_eq!(first.best.alleles(), second.best.alleles());
        assert_eq!(first.fitness_history, second.fitness_history);
    }

    #[test]
    fn test_observer_reports_every_generation() {
        let coords = cities();
        let domain: Vec<char> = vec!['A', 'B', 'C', 'D', 'E'];

        let mut seen: Vec<usize> = Vec::new();
        Evolution::run_with_observer(
            &domain,
            |tour| path_length(tour, &coords),
            &tsp_config(),
            |generation, best, score| {
                seen.push(generation);
                assert_eq!(best.len(), 5);
                assert!(score.is_finite());
            },
        )
        .unwrap();

        assert_eq!(seen, (1..=20).collect::<Vec<usize>>());
    }

    #[test]
    fn test_invalid_config_aborts_before_first_generation() {
        let domain = vec![0u8, 1, 2];
        let config = EvolutionConfig::default().with_population_size(1);

        let mut observed = 0usize;
        let err = Evolution::run_with_observer(
            &domain,
            |_| 0.0f64,
            &config,
            |_, _: &Genome<u8>, _| observed += 1,
        )
        .unwrap_err();

        assert!(matches!(err, GaError::InvalidConfiguration(_)));
        assert_eq!(observed, 0);
    }

    #[test]
    fn test_empty_domain_rejected() {
        let domain: Vec<u8> = vec![];
        let err = Evolution::run(&domain, |_| 0.0f64, &EvolutionConfig::default()).unwrap_err();
        assert!(matches!(err, GaError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_configured_swap_length_validated_against_domain() {
        // swap_length == L is out of range for the genomes the loop builds.
        let domain = vec![0u8, 1, 2, 3, 4];
        let config = EvolutionConfig::default()
            .with_population_size(10)
            .with_epochs(5)
            .with_swap_length(5)
            .with_seed(1);

        let err = Evolution::run(&domain, |_| 0.0f64, &config).unwrap_err();
        assert!(matches!(err, GaError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_odd_population_size_is_preserved() {
        // With N = 11 the mating pool has 5 genomes and 6 offspring are
        // produced, keeping the population size invariant.
        let coords = cities();
        let domain: Vec<char> = vec!['A', 'B', 'C', 'D', 'E'];
        let config = EvolutionConfig::default()
            .with_population_size(11)
            .with_epochs(10)
            .with_seed(7);

        let result =
            Evolution::run(&domain, |tour| path_length(tour, &coords), &config).unwrap();
        assert_eq!(result.generations, 10);
        assert_eq!(result.fitness_history.len(), 10);
    }

    #[test]
    fn test_spiral_tour_improves_over_first_generation() {
        // The original acceptance setup: cities on a spiral, labeled
        // 'A'..; a longer run should improve on a random shuffle.
        let count = 10usize;
        let mut coords: HashMap<char, (f64, f64)> = HashMap::new();
        let loops = 1.5f64;
        let dphi = std::f64::consts::PI * loops / count as f64;
        let mut phi = 0.0f64;
        for i in 0..count {
            let r = 50.0 * (i + 1) as f64 / count as f64;
            phi += dphi;
            let label = char::from(b'A' + i as u8);
            coords.insert(label, (50.0 + r * phi.cos(), 50.0 + r * phi.sin()));
        }
        let domain: Vec<char> = ('A'..).take(count).collect();

        let config = EvolutionConfig::default()
            .with_population_size(100)
            .with_epochs(100)
            .with_mutation_probability(0.25)
            .with_seed(9876);

        let result =
            Evolution::run(&domain, |tour| path_length(tour, &coords), &config).unwrap();

        assert!(
            result.best_fitness < result.fitness_history[0],
            "expected improvement over generation 1: {} vs {}",
            result.best_fitness,
            result.fitness_history[0]
        );
    }

    #[test]
    fn test_two_element_domain() {
        // Smallest domain the crossover segment bound allows everywhere.
        let domain = vec![0u8, 1];
        let config = EvolutionConfig::default()
            .with_population_size(4)
            .with_epochs(5)
            .with_seed(3);

        let result = Evolution::run(
            &domain,
            |tour: &[u8]| tour[0] as f64, // prefer tours starting with 0
            &config,
        )
        .unwrap();

        assert_eq!(result.generations, 5);
        let mut tour = result.best.into_alleles();
        tour.sort_unstable();
        assert_eq!(tour, domain);
    }
}
