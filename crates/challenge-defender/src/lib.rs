//! Defender-side challenge protocol engine.
//!
//! Drives the interactive bisection game an optimistic-rollup validator plays when
//! defending a claim against a challenger: repeatedly narrow the disputed range by
//! bisection until a single step remains, then submit a one-step proof to an on-chain
//! adjudicator. Missing a deadline forfeits the game.
//!
//! This crate is the challenge state machine only. The on-chain bridge, the VM
//! execution engine, process orchestration, and the wire encoding of proof blobs are
//! external collaborators reached through the [`Adjudicator`] and [`AssertionDefender`]
//! traits.

mod adjudicator;
mod config;
mod deadline;
mod defender;
mod engine;
mod error;
mod planner;
mod state;
mod types;

pub use adjudicator::{Adjudicator, AdjudicatorError, Event};
pub use config::{ChallengeConfig, DEFAULT_BISECTION_FACTOR};
pub use defender::{AssertionDefender, DefenderError};
pub use engine::{Advance, open_first, open_other};
pub use error::ChallengeError;
pub use state::ChallengeState;
pub use types::{AssertionStub, Digest32, Precondition};
