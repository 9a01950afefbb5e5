//! Transition engine: the state constructors (`open_first`/`open_other`) and the two
//! operations a non-terminal [`ChallengeState`] exposes (`on_tick`/`on_event`).
//!
//! # Return shape
//!
//! Errors are generally paired with the next state: either the pre-transition state for
//! a fatal error, or the already-advanced state for a non-fatal transport error. The one
//! exception is a `ProofGeneration` failure, which returns no state at all because the
//! engine never had anything valid to construct. That is the one place these functions
//! return `Result<_, ChallengeError>` with a genuinely state-less `Err`; every other
//! outcome, including the other fatal error kinds, carries a state alongside it.

use crate::{
    adjudicator::{Adjudicator, Event},
    config::ChallengeConfig,
    deadline,
    defender::AssertionDefender,
    error::ChallengeError,
    planner,
    state::ChallengeState,
    types::{AssertionStub, Precondition},
};

/// A completed, non-fatal transition: the new state, plus a non-fatal adjudicator-
/// transport error if the outbound call failed (recorded optimistically regardless).
pub type Advance = (ChallengeState, Option<ChallengeError>);

/// Distinguishes the leftmost child of a bisection (no predecessor) from a later child
/// (the adjudicator needs the predecessor's assertion for continuity).
enum Continuity {
    First,
    Other { prev_assertion: AssertionStub },
}

/// Begin defending the leftmost sub-range, or the entire initial range.
pub fn open_first(
    cfg: &ChallengeConfig,
    defender: Box<dyn AssertionDefender>,
    now: u64,
    adj: &mut dyn Adjudicator,
) -> Result<Advance, ChallengeError> {
    open(cfg, defender, Continuity::First, now, adj)
}

/// Begin defending a non-leftmost sub-range.
///
/// `outer_precondition` is the precondition of the whole bisected range (i.e.
/// `children[0].precondition()` of the parent bisection). The constructor itself derives
/// continuity from `prev_defender.assertion()` rather than from this value; it is kept
/// as a parameter for callers that want it for diagnostics or logging.
pub fn open_other(
    cfg: &ChallengeConfig,
    outer_precondition: Precondition,
    prev_defender: &dyn AssertionDefender,
    defender: Box<dyn AssertionDefender>,
    now: u64,
    adj: &mut dyn Adjudicator,
) -> Result<Advance, ChallengeError> {
    let _ = outer_precondition;
    let prev_assertion = prev_defender.assertion();
    open(
        cfg,
        defender,
        Continuity::Other { prev_assertion },
        now,
        adj,
    )
}

fn open(
    cfg: &ChallengeConfig,
    defender: Box<dyn AssertionDefender>,
    continuity: Continuity,
    now: u64,
    adj: &mut dyn Adjudicator,
) -> Result<Advance, ChallengeError> {
    let deadline = deadline::compute_deadline(now, cfg.grace_period);
    let precondition = defender.precondition();
    let assertion = defender.assertion();

    if assertion.is_single_step() {
        tracing::info!(?precondition, ?assertion, "generating one-step proof");
        let proof = defender.one_step_proof().map_err(ChallengeError::from)?;

        let call_result = match continuity {
            Continuity::First => adj.one_step_proof_first(assertion, precondition, proof),
            Continuity::Other { prev_assertion } => {
                adj.one_step_proof_other(prev_assertion, assertion, precondition, proof)
            }
        };

        let state = ChallengeState::OneStepChallenged {
            precondition,
            assertion,
            deadline,
        };
        return Ok((state, call_result.err().map(ChallengeError::from)));
    }

    let children = defender
        .bisect(cfg.bisection_factor)
        .map_err(ChallengeError::from)?;
    planner::validate_children(&precondition, &assertion, &children)
        .map_err(ChallengeError::from)?;

    let child_stubs: Vec<AssertionStub> = children.iter().map(|c| c.assertion()).collect();

    let call_result = match continuity {
        Continuity::First => adj.bisect_assertion_first(assertion, precondition, &child_stubs),
        Continuity::Other { prev_assertion } => {
            adj.bisect_assertion_other(prev_assertion, assertion, precondition, &child_stubs)
        }
    };

    let state = ChallengeState::BisectedAssert {
        whole_precondition: precondition,
        whole_assertion: assertion,
        children,
        deadline,
    };
    Ok((state, call_result.err().map(ChallengeError::from)))
}

impl ChallengeState {
    /// Advance on a clock tick.
    ///
    /// Never fails state-lessly: a timeout always has a state to move to, and the one
    /// adjudicator call on this path (`challenger_timed_out`) is non-fatal.
    pub fn on_tick(self, now: u64, adj: &mut dyn Adjudicator) -> Advance {
        let Some(deadline) = self.deadline() else {
            return (self, None);
        };

        if !deadline::is_expired(now, deadline) {
            return (self, None);
        }

        match self {
            ChallengeState::BisectedAssert { .. } => {
                tracing::info!("asserter timed out awaiting bisection confirmation");
                (ChallengeState::TimedOutAsserter, None)
            }
            ChallengeState::WaitingBisected { .. } => {
                tracing::info!("challenger timed out selecting a child to dispute");
                let err = adj.challenger_timed_out().err();
                (
                    ChallengeState::TimedOutChallenger,
                    err.map(ChallengeError::from),
                )
            }
            ChallengeState::OneStepChallenged { .. } => {
                tracing::info!("asserter timed out awaiting one-step-proof acceptance");
                (ChallengeState::TimedOutAsserter, None)
            }
            terminal => (terminal, None),
        }
    }

    /// Advance on an adjudicator event.
    ///
    /// Can fail state-lessly only by way of the `ContinueChallenge` branch delegating to
    /// [`open_first`]/[`open_other`], whose `ProofGeneration`/invalid-bisection failures
    /// have no state to offer. `OutOfBounds` and `Desynchronized` detected directly in
    /// this function always carry the unchanged original state instead.
    pub fn on_event(
        self,
        cfg: &ChallengeConfig,
        event: Event,
        now: u64,
        adj: &mut dyn Adjudicator,
    ) -> Result<Advance, ChallengeError> {
        match (self, event) {
            (ChallengeState::BisectedAssert { children, .. }, Event::BisectionConfirmed) => {
                let deadline = deadline::compute_deadline(now, cfg.grace_period);
                Ok((
                    ChallengeState::WaitingBisected { children, deadline },
                    None,
                ))
            }

            (
                ChallengeState::WaitingBisected {
                    mut children,
                    deadline,
                },
                Event::ContinueChallenge { challenged_index },
            ) => {
                let num_children = children.len() as u32;
                if challenged_index as usize >= children.len() {
                    let state = ChallengeState::WaitingBisected { children, deadline };
                    let err = ChallengeError::OutOfBounds {
                        challenged_index,
                        num_children,
                    };
                    return Ok((state, Some(err)));
                }

                if challenged_index == 0 {
                    let chosen = children.remove(0);
                    open_first(cfg, chosen, now, adj)
                } else {
                    let idx = challenged_index as usize;
                    let chosen = children.remove(idx);
                    // Only index `idx` was removed, and `idx > 0`, so indices below it
                    // (in particular 0 and `idx - 1`) are unaffected by the shift.
                    let outer_precondition = children[0].precondition();
                    let prev = children.remove(idx - 1);
                    open_other(cfg, outer_precondition, prev.as_ref(), chosen, now, adj)
                }
            }

            (ChallengeState::OneStepChallenged { .. }, Event::OneStepProofAccepted) => {
                tracing::info!("one-step proof accepted");
                Ok((ChallengeState::Accepted, None))
            }

            (state, event) => {
                let event_name = event_name(&event);
                tracing::warn!(
                    state = state.name(),
                    event = event_name,
                    "desynchronized"
                );
                let err = ChallengeError::Desynchronized {
                    state: state.name(),
                    event: event_name,
                };
                Ok((state, Some(err)))
            }
        }
    }
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::BisectionConfirmed => "BisectionConfirmed",
        Event::ContinueChallenge { .. } => "ContinueChallenge",
        Event::OneStepProofAccepted => "OneStepProofAccepted",
        Event::Other(name) => name,
    }
}
