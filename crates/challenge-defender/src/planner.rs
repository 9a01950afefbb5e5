//! Validation of a bisection's output before the engine trusts it.
//!
//! Subdividing an assertion is the VM layer's job (`AssertionDefender::bisect`); this
//! module only checks that what came back is internally consistent before the engine
//! trusts it enough to publish a move. A failure here means the VM layer handed back a
//! bisection it should never have produced, so it is reported the same way as any other
//! move the VM layer could not produce: a [`DefenderError`].

use crate::{
    defender::{AssertionDefender, DefenderError},
    types::{AssertionStub, Precondition},
};

/// Check that `children` concatenate to `parent_assertion` and chain from
/// `parent_precondition`.
pub(crate) fn validate_children(
    parent_precondition: &Precondition,
    parent_assertion: &AssertionStub,
    children: &[Box<dyn AssertionDefender>],
) -> Result<(), DefenderError> {
    if children.is_empty() {
        return Err(DefenderError::new("bisection produced no children"));
    }

    // Only the first child's precondition is checkable against something the engine
    // already holds; `child[i+1].precondition() == child[i]`'s post-state can't be
    // verified here because mapping an `AssertionStub` to the `Precondition` it implies
    // is VM-specific. Chaining between interior children is therefore trusted to
    // `AssertionDefender::bisect`.
    let first_precondition = children[0].precondition();
    if first_precondition != *parent_precondition {
        tracing::warn!("bisection's first child precondition does not match parent");
        return Err(DefenderError::new(
            "bisection's first child precondition does not match parent",
        ));
    }

    let step_total: u64 = children.iter().map(|c| c.assertion().num_steps.get()).sum();

    if step_total != parent_assertion.num_steps.get() {
        tracing::warn!(
            expected = parent_assertion.num_steps.get(),
            actual = step_total,
            "bisection child step counts do not sum to parent"
        );
        return Err(DefenderError::new(format!(
            "bisection child step counts ({step_total}) do not sum to parent ({})",
            parent_assertion.num_steps.get()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU64;

    use super::*;

    #[derive(Debug)]
    struct FixedDefender {
        precondition: Precondition,
        assertion: AssertionStub,
    }

    impl AssertionDefender for FixedDefender {
        fn precondition(&self) -> Precondition {
            self.precondition
        }

        fn assertion(&self) -> AssertionStub {
            self.assertion
        }

        fn bisect(&self, _k: u32) -> Result<Vec<Box<dyn AssertionDefender>>, DefenderError> {
            unreachable!("not exercised in planner tests")
        }

        fn one_step_proof(&self) -> Result<Vec<u8>, DefenderError> {
            unreachable!("not exercised in planner tests")
        }
    }

    fn precondition(byte: u8) -> Precondition {
        Precondition {
            machine_hash: [byte; 32].into(),
            inbox_position: 0,
            time_bounds: (0, 0),
            balance_commitment: [0; 32].into(),
        }
    }

    fn stub(num_steps: u64) -> AssertionStub {
        AssertionStub {
            num_steps: NonZeroU64::new(num_steps).unwrap(),
            post_machine_hash: crate::types::Digest32::ZERO,
            messages_hash: crate::types::Digest32::ZERO,
            logs_hash: crate::types::Digest32::ZERO,
        }
    }

    #[test]
    fn valid_chain_sums_to_parent() {
        let parent_pre = precondition(0);
        let parent_assertion = stub(6);
        let children: Vec<Box<dyn AssertionDefender>> = vec![
            Box::new(FixedDefender {
                precondition: precondition(0),
                assertion: stub(3),
            }),
            Box::new(FixedDefender {
                precondition: precondition(1),
                assertion: stub(3),
            }),
        ];
        assert!(validate_children(&parent_pre, &parent_assertion, &children).is_ok());
    }

    #[test]
    fn empty_children_is_rejected() {
        let parent_pre = precondition(0);
        let parent_assertion = stub(6);
        let children: Vec<Box<dyn AssertionDefender>> = Vec::new();
        let err = validate_children(&parent_pre, &parent_assertion, &children).unwrap_err();
        assert!(err.to_string().contains("no children"));
    }

    #[test]
    fn mismatched_step_total_is_rejected() {
        let parent_pre = precondition(0);
        let parent_assertion = stub(6);
        let children: Vec<Box<dyn AssertionDefender>> = vec![Box::new(FixedDefender {
            precondition: precondition(0),
            assertion: stub(3),
        })];
        let err = validate_children(&parent_pre, &parent_assertion, &children).unwrap_err();
        assert!(err.to_string().contains("do not sum to parent"));
    }

    #[test]
    fn broken_chain_is_rejected() {
        let parent_pre = precondition(0);
        let parent_assertion = stub(6);
        let children: Vec<Box<dyn AssertionDefender>> = vec![Box::new(FixedDefender {
            precondition: precondition(9),
            assertion: stub(6),
        })];
        let err = validate_children(&parent_pre, &parent_assertion, &children).unwrap_err();
        assert!(err.to_string().contains("does not match parent"));
    }
}
