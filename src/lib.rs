//! Small genetic-algorithm engine.
//!
//! A genome representation with crossover and mutation operators, plus a
//! generational evolution loop that improves a population against an
//! externally supplied fitness function (lower is better).
//!
//! # Core Types
//!
//! - [`Genome`]: fixed-length allele sequence owning the crossover and
//!   mutation operators, including permutation-preserving crossover with
//!   duplicate repair
//! - [`EvolutionConfig`]: loop parameters (population size, epochs,
//!   mutation probability, seed)
//! - [`Evolution`]: executes the evaluate → rank → select → reproduce →
//!   mutate → replace cycle
//! - [`EvolutionResult`]: best genome found plus per-generation history
//!
//! The fitness function is supplied by the caller as any
//! `Fn(&[A]) -> S` where `S` implements [`Score`]; the engine itself is
//! problem-agnostic. Runs are reproducible when a seed is set: a single
//! owned generator is threaded through every operator call.
//!
//! # Example
//!
//! ```
//! use chromo::{Evolution, EvolutionConfig};
//!
//! // Order five stops so that consecutive labels stay close together.
//! let domain = vec![1i32, 2, 3, 4, 5];
//! let config = EvolutionConfig::default()
//!     .with_population_size(10)
//!     .with_epochs(20)
//!     .with_mutation_probability(0.25)
//!     .with_seed(9876);
//!
//! let result = Evolution::run(
//!     &domain,
//!     |tour: &[i32]| {
//!         tour.windows(2)
//!             .map(|w| (w[1] - w[0]).abs() as f64)
//!             .sum::<f64>()
//!     },
//!     &config,
//! )
//! .unwrap();
//!
//! assert_eq!(result.generations, 20);
//! assert_eq!(result.best.len(), 5);
//! ```

mod config;
mod engine;
mod error;
mod genome;
mod score;

pub use config::EvolutionConfig;
pub use engine::{Evolution, EvolutionResult};
pub use error::{GaError, Result};
pub use genome::{Allele, Genome};
pub use score::Score;
