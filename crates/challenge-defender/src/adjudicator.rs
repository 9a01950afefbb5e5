//! The engine's view of the on-chain adjudicator.

use std::fmt;

use thiserror::Error;

use crate::types::{AssertionStub, Precondition};

/// Transport-level failure from a call to the adjudicator.
///
/// Opaque: the bridge layer owns the actual transport and decides what detail is worth
/// surfacing.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct AdjudicatorError(pub String);

impl AdjudicatorError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Inbound events the engine can receive from the adjudicator.
///
/// Only the first three kinds are acted on by `ChallengeState::on_event`; `Other` lets a
/// driver forward an adjudicator event the engine doesn't consume without fabricating one
/// of the meaningful variants. Feeding `Other` to `on_event` always yields
/// [`crate::error::ChallengeError::Desynchronized`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
    /// The adjudicator accepted a bisection move.
    BisectionConfirmed,
    /// The challenger selected a child for further dispute.
    ContinueChallenge { challenged_index: u16 },
    /// The adjudicator verified and accepted the one-step proof.
    OneStepProofAccepted,
    /// Any other adjudicator event, observable but not consumed by the engine.
    Other(&'static str),
}

/// The engine's outbound contract to the on-chain adjudicator.
///
/// Calls are fire-and-observe: the engine records its state change optimistically and
/// returns any transport error to the caller without rolling back. Held mutably by
/// exactly one engine instance.
pub trait Adjudicator: fmt::Debug {
    fn bisect_assertion_first(
        &mut self,
        parent_assertion: AssertionStub,
        parent_precondition: Precondition,
        child_stubs: &[AssertionStub],
    ) -> Result<(), AdjudicatorError>;

    fn bisect_assertion_other(
        &mut self,
        prev_assertion: AssertionStub,
        parent_assertion: AssertionStub,
        parent_precondition: Precondition,
        child_stubs: &[AssertionStub],
    ) -> Result<(), AdjudicatorError>;

    fn one_step_proof_first(
        &mut self,
        assertion: AssertionStub,
        precondition: Precondition,
        proof: Vec<u8>,
    ) -> Result<(), AdjudicatorError>;

    fn one_step_proof_other(
        &mut self,
        prev_assertion: AssertionStub,
        assertion: AssertionStub,
        precondition: Precondition,
        proof: Vec<u8>,
    ) -> Result<(), AdjudicatorError>;

    fn challenger_timed_out(&mut self) -> Result<(), AdjudicatorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_passes_message_through() {
        let err = AdjudicatorError::new("connection reset");
        assert_eq!(err.to_string(), "connection reset");
    }

    #[test]
    fn other_event_carries_its_own_name() {
        let event = Event::Other("SomeUnhandledEvent");
        assert!(matches!(event, Event::Other("SomeUnhandledEvent")));
    }
}
