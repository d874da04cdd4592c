//! Marker trait for fitness values.

/// A scalar fitness value produced by the caller's evaluator.
///
/// Scores must support comparison and be cheaply copyable.
/// Lower scores are considered better (minimization).
///
/// Built-in implementations exist for `f64` and `f32`.
/// For maximization problems, negate the score or use a wrapper type.
pub trait Score: PartialOrd + Copy + std::fmt::Debug + 'static {
    /// Converts the score to `f64` for logging and history tracking.
    fn to_f64(self) -> f64;
}

impl Score for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

impl Score for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}
