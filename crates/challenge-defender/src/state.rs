//! The defender's challenge state machine.

use crate::{
    defender::AssertionDefender,
    types::{AssertionStub, Precondition},
};

/// Every distinguishable situation the defender can be in.
///
/// States are produced only by the transition engine (`engine.rs`); they are immutable
/// values, so a transition produces a new state rather than mutating the old one.
#[derive(Debug)]
pub enum ChallengeState {
    /// Just published a k-way bisection; awaiting on-chain confirmation.
    BisectedAssert {
        whole_precondition: Precondition,
        whole_assertion: AssertionStub,
        children: Vec<Box<dyn AssertionDefender>>,
        deadline: u64,
    },
    /// Bisection confirmed; waiting for the challenger to pick a child to dispute.
    WaitingBisected {
        children: Vec<Box<dyn AssertionDefender>>,
        deadline: u64,
    },
    /// Submitted a one-step proof; awaiting its acceptance.
    OneStepChallenged {
        precondition: Precondition,
        assertion: AssertionStub,
        deadline: u64,
    },
    /// Terminal: the defender (asserter) failed to move in time.
    TimedOutAsserter,
    /// Terminal: the challenger failed to move in time.
    TimedOutChallenger,
    /// Terminal: the one-step proof was accepted.
    Accepted,
}

impl ChallengeState {
    /// The state's deadline, if it has one. Only non-terminal states carry one.
    pub fn deadline(&self) -> Option<u64> {
        match self {
            ChallengeState::BisectedAssert { deadline, .. }
            | ChallengeState::WaitingBisected { deadline, .. }
            | ChallengeState::OneStepChallenged { deadline, .. } => Some(*deadline),
            ChallengeState::TimedOutAsserter
            | ChallengeState::TimedOutChallenger
            | ChallengeState::Accepted => None,
        }
    }

    /// Whether this state is terminal: no further transitions are possible once a
    /// terminal state is entered.
    pub fn is_terminal(&self) -> bool {
        self.deadline().is_none()
    }

    /// Stable name for diagnostics, used in [`crate::error::ChallengeError::Desynchronized`].
    pub fn name(&self) -> &'static str {
        match self {
            ChallengeState::BisectedAssert { .. } => "BisectedAssert",
            ChallengeState::WaitingBisected { .. } => "WaitingBisected",
            ChallengeState::OneStepChallenged { .. } => "OneStepChallenged",
            ChallengeState::TimedOutAsserter => "TimedOutAsserter",
            ChallengeState::TimedOutChallenger => "TimedOutChallenger",
            ChallengeState::Accepted => "Accepted",
        }
    }
}
