use crate::error::{Result, TraversalError};

use super::MATCH_EPSILON_SQ;

/// Boundary crossings allowed in one traversal call unless configured otherwise.
pub const DEFAULT_MAX_CROSSINGS: usize = 64;

/// Tuning for the traversal engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraversalConfig {
    match_epsilon_sq: f64,
    max_crossings: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            match_epsilon_sq: MATCH_EPSILON_SQ,
            max_crossings: DEFAULT_MAX_CROSSINGS,
        }
    }
}

impl TraversalConfig {
    /// Creates a configuration.
    ///
    /// * `match_epsilon_sq` - squared distance under which segment ends are joined.
    /// * `max_crossings` - segment boundaries one call may cross before failing.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not a positive finite number or
    /// `max_crossings` is zero.
    pub fn new(match_epsilon_sq: f64, max_crossings: usize) -> Result<Self> {
        if !(match_epsilon_sq.is_finite() && match_epsilon_sq > 0.0) {
            return Err(TraversalError::InvalidConfig(format!(
                "match tolerance must be positive and finite, got {match_epsilon_sq}"
            ))
            .into());
        }
        if max_crossings == 0 {
            return Err(
                TraversalError::InvalidConfig("at least one crossing must be allowed".into()).into(),
            );
        }
        Ok(Self {
            match_epsilon_sq,
            max_crossings,
        })
    }

    /// Squared joint-matching tolerance.
    #[must_use]
    pub fn match_epsilon_sq(&self) -> f64 {
        self.match_epsilon_sq
    }

    /// Maximum boundary crossings per call.
    #[must_use]
    pub fn max_crossings(&self) -> usize {
        self.max_crossings
    }
}
