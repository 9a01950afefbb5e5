//! Error taxonomy for the challenge engine.

use thiserror::Error;

use crate::{adjudicator::AdjudicatorError, defender::DefenderError};

/// Errors the engine can surface from a transition.
///
/// Every variant but [`ChallengeError::AdjudicatorTransport`] is fatal for the current
/// game and leaves the state unadvanced; `AdjudicatorTransport` is non-fatal and is
/// paired with the already advanced state.
#[derive(Debug, Error)]
pub enum ChallengeError {
    /// The VM layer could not produce the requested move: a one-step proof or a
    /// bisection. Both are bucketed together since, from the engine's point of view,
    /// they mean the same thing: the VM layer could not produce what was asked of it.
    #[error("VM layer could not produce the requested move: {0}")]
    ProofGeneration(#[from] DefenderError),

    /// The challenger's selection index is outside the children array.
    #[error("challenged index {challenged_index} is out of bounds (have {num_children} children)")]
    OutOfBounds {
        challenged_index: u16,
        num_children: u32,
    },

    /// An event arrived that is not legal in the current state.
    #[error("desynchronized: event {event:?} is not legal in state {state:?}")]
    Desynchronized {
        state: &'static str,
        event: &'static str,
    },

    /// The adjudicator adapter returned a transport-level error.
    ///
    /// Non-fatal: the engine has already advanced its state optimistically. The caller
    /// decides whether to retry the underlying transport or abandon the game; this crate
    /// takes no position and never retries internally.
    #[error("adjudicator transport error: {0}")]
    AdjudicatorTransport(#[from] AdjudicatorError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defender_error_converts_via_from() {
        let err: ChallengeError = DefenderError::new("bad proof").into();
        assert!(matches!(err, ChallengeError::ProofGeneration(_)));
        assert_eq!(
            err.to_string(),
            "VM layer could not produce the requested move: bad proof"
        );
    }

    #[test]
    fn adjudicator_error_converts_via_from() {
        let err: ChallengeError = AdjudicatorError::new("timeout").into();
        assert!(matches!(err, ChallengeError::AdjudicatorTransport(_)));
    }

    #[test]
    fn out_of_bounds_message_names_both_counts() {
        let err = ChallengeError::OutOfBounds {
            challenged_index: 9,
            num_children: 6,
        };
        assert_eq!(
            err.to_string(),
            "challenged index 9 is out of bounds (have 6 children)"
        );
    }
}
