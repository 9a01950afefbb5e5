//! Protocol parameters.

/// The bisection factor used when a caller has no specific value to supply.
pub const DEFAULT_BISECTION_FACTOR: u32 = 6;

/// Protocol parameters shared by every state in a single game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ChallengeConfig {
    /// Duration added to the current time to compute a state's deadline.
    pub grace_period: u64,
    /// Number of children a bisection produces. Must be >= 2.
    pub bisection_factor: u32,
}

impl ChallengeConfig {
    /// Build a config, asserting `bisection_factor >= 2`.
    ///
    /// # Panics
    ///
    /// Panics if `bisection_factor < 2`. Configuration is assembled once by the caller at
    /// startup, not on a hot path, so a panic here is preferable to silently running an
    /// invalid game.
    pub fn new(grace_period: u64, bisection_factor: u32) -> Self {
        assert!(
            bisection_factor >= 2,
            "bisection_factor must be >= 2, got {bisection_factor}"
        );
        Self {
            grace_period,
            bisection_factor,
        }
    }

    /// Build a config using the default bisection factor of 6.
    pub fn new_default(grace_period: u64) -> Self {
        Self::new(grace_period, DEFAULT_BISECTION_FACTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_default_uses_standard_bisection_factor() {
        let cfg = ChallengeConfig::new_default(42);
        assert_eq!(cfg.grace_period, 42);
        assert_eq!(cfg.bisection_factor, 6);
    }

    #[test]
    #[should_panic(expected = "bisection_factor must be >= 2")]
    fn rejects_bisection_factor_below_two() {
        ChallengeConfig::new(10, 1);
    }
}
