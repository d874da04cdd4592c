//! Error taxonomy for the engine.
//!
//! Every error is raised synchronously at the violated precondition and
//! is never retried internally. A configuration error aborts a run
//! before the first generation.

use thiserror::Error;

/// Errors produced by genome construction, the operators, and the
/// evolution loop.
#[derive(Debug, Error)]
pub enum GaError {
    /// Zero-length genome, `swap_length` outside `[1, L-1]`, or an
    /// invalid loop parameter (population size, epoch count).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Crossover invoked on genomes of differing length.
    #[error("incompatible genomes: mother has {mother} alleles, father has {father}")]
    IncompatibleGenomes { mother: usize, father: usize },

    /// `mutate` invoked with an empty allele pool.
    #[error("allele pool is empty")]
    EmptyAllelePool,

    /// The permutation repair still has missing alleles but no duplicate
    /// left to replace. Signals that the offspring length does not match
    /// the domain size, which a correctly constructed genome rules out.
    #[error("domain mismatch: {missing} allele(s) missing with no duplicates left to replace")]
    DomainMismatch { missing: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GaError::IncompatibleGenomes {
            mother: 5,
            father: 7,
        };
        assert_eq!(
            err.to_string(),
            "incompatible genomes: mother has 5 alleles, father has 7"
        );

        let err = GaError::EmptyAllelePool;
        assert_eq!(err.to_string(), "allele pool is empty");

        let err = GaError::DomainMismatch { missing: 2 };
        assert!(err.to_string().contains("2 allele(s) missing"));
    }
}
