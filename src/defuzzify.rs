use num::Float;
use tracing::{debug, trace};

use crate::inference::Inferred;
use crate::ops::{aggregation, implication};
use crate::sampling::Samples;
use crate::variable::LinguisticVariable;

/// Membership of `x` in the aggregated output region described by `inferred`.
pub fn aggregated_membership<F: Float>(var: &LinguisticVariable<F>, inferred: &[Inferred<F>], x: F) -> F {
    aggregation(inferred.iter().filter_map(|inf| {
        let set = var.set(inf.set)?;

        Some(implication(set.membership(x), inf.strength))
    }))
}

/// Crisp value of an output by center of gravity, sampled every `step`.
///
/// Returns `None` when nothing was inferred for the output or the aggregated
/// region has no area, as there is no centroid to speak of.
pub fn defuzzify<F: Float>(var: &LinguisticVariable<F>, inferred: &[Inferred<F>], step: F) -> Option<F> {
    let (from, to) = inferred
        .iter()
        .filter_map(|inf| var.set(inf.set))
        .fold(None, |range: Option<(F, F)>, set| match range {
            None => Some((set.left(), set.right())),
            Some((from, to)) => Some((from.min(set.left()), to.max(set.right()))),
        })?;

    trace!(
        variable = var.name(),
        from = from.to_f64(),
        to = to.to_f64(),
        "integration range"
    );

    let mut numerator = F::zero();
    let mut denominator = F::zero();

    for x in Samples::new(from, to, step) {
        let membership = aggregated_membership(var, inferred, x);

        numerator = numerator + x * membership;
        denominator = denominator + membership;
    }

    if denominator == F::zero() {
        return None;
    }

    let value = numerator / denominator;

    debug!(variable = var.name(), value = value.to_f64(), "defuzzified");

    Some(value)
}

#[cfg(test)]
fn output() -> LinguisticVariable {
    use crate::error::Side;
    use crate::membership::MembershipFunction;

    let mut var = LinguisticVariable::new(Side::Output, "output".into(), 3);

    var.put(0, MembershipFunction::new("negative", -2., -1., 0.).unwrap()).unwrap();
    var.put(1, MembershipFunction::new("zero", -1., 0., 1.).unwrap()).unwrap();
    var.put(2, MembershipFunction::new("positive", 0., 1., 2.).unwrap()).unwrap();
    var
}

#[test]
fn test_single_full_set_centroid() {
    let value = defuzzify(&output(), &[Inferred { set: 2, strength: 1. }], 0.02).unwrap();

    approx::assert_abs_diff_eq!(value, 1., epsilon = 1e-9);
}

#[test]
fn test_symmetric_sets_cancel() {
    let inferred = [
        Inferred { set: 0, strength: 0.5 },
        Inferred { set: 2, strength: 0.5 },
    ];
    let value = defuzzify(&output(), &inferred, 0.02).unwrap();

    approx::assert_abs_diff_eq!(value, 0., epsilon = 1e-9);
}

#[test]
fn test_aggregation_takes_max_of_clipped_sets() {
    let var = output();
    let inferred = [
        Inferred { set: 1, strength: 0.25 },
        Inferred { set: 2, strength: 0.75 },
        Inferred { set: 2, strength: 0.5 },
    ];

    assert_eq!(aggregated_membership(&var, &inferred, 1.), 0.75);
    assert_eq!(aggregated_membership(&var, &inferred, 0.5), 0.5);
    assert_eq!(aggregated_membership(&var, &inferred, -0.5), 0.25);
    assert_eq!(aggregated_membership(&var, &inferred, -1.5), 0.);
}

#[test]
fn test_nothing_inferred() {
    assert_eq!(defuzzify(&output(), &[], 0.02), None);
    assert_eq!(defuzzify(&output(), &[Inferred { set: 1, strength: 0. }], 0.02), None);
}

#[test]
fn test_centroid_pulled_towards_stronger_set() {
    let inferred = [
        Inferred { set: 1, strength: 0.5 },
        Inferred { set: 2, strength: 0.5 },
    ];
    let value = defuzzify(&output(), &inferred, 0.02).unwrap();

    assert!(value > 0. && value < 1.);
}
