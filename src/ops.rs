//! Mamdani operators: min for `and` and implication, max for aggregation.

use num::Float;

/// Combines the degrees of a rule's premises. `None` if there are none.
pub fn conjunction<F: Float>(degrees: impl IntoIterator<Item = F>) -> Option<F> {
    degrees.into_iter().reduce(F::min)
}

/// Clips a consequence set's membership to the rule's firing strength.
#[inline]
pub fn implication<F: Float>(membership: F, strength: F) -> F {
    F::min(membership, strength)
}

/// Combines the clipped memberships of every rule concluding the same output.
pub fn aggregation<F: Float>(memberships: impl IntoIterator<Item = F>) -> F {
    memberships.into_iter().fold(F::zero(), F::max)
}

#[test]
fn test_conjunction() {
    assert_eq!(conjunction([0.7, 0.2, 0.9]), Some(0.2));
    assert_eq!(conjunction([0.2, 0.9, 0.7]), Some(0.2));
    assert_eq!(conjunction(std::iter::empty::<f64>()), None);
}

#[test]
fn test_implication_and_aggregation() {
    assert_eq!(implication(0.8, 0.5), 0.5);
    assert_eq!(implication(0.3, 0.5), 0.3);
    assert_eq!(aggregation([0.1, 0.6, 0.4]), 0.6);
    assert_eq!(aggregation(std::iter::empty::<f64>()), 0.);
}
