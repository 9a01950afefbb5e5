//! Deadline arithmetic.
//!
//! Time is a monotonic unsigned scalar supplied by the caller; this module never reads a
//! clock. Deadlines are absolute and are only ever computed here, at state-entry time.
//! `on_tick` (see `engine.rs`) consults them but never recomputes them.

/// Compute the absolute deadline for a state entered at `now` under `grace_period`.
pub(crate) fn compute_deadline(now: u64, grace_period: u64) -> u64 {
    now.saturating_add(grace_period)
}

/// Whether `now` has passed `deadline`.
pub(crate) fn is_expired(now: u64, deadline: u64) -> bool {
    now > deadline
}
