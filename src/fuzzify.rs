use num::Float;
use tracing::trace;

use crate::variable::LinguisticVariable;

/// Degree to which a crisp value belongs to one fuzzy set of a variable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fuzzified<F = f64> {
    pub set: usize,
    pub degree: F,
}

/// Converts a crisp value into the sets of `var` whose open support contains it.
pub fn fuzzify<F: Float>(var: &LinguisticVariable<F>, x: F) -> Vec<Fuzzified<F>> {
    let mut out = Vec::new();

    fuzzify_into(var, x, &mut out);

    out
}

/// Like [`fuzzify`], but reuses `out`. Whatever `out` held before is discarded.
pub fn fuzzify_into<F: Float>(var: &LinguisticVariable<F>, x: F, out: &mut Vec<Fuzzified<F>>) {
    out.clear();

    for (i, set) in var.sets() {
        // Boundary values have zero membership and are left out
        if !set.intersects(x) {
            continue;
        }

        let degree = set.membership(x);

        trace!(
            variable = var.name(),
            set = set.name(),
            x = x.to_f64(),
            degree = degree.to_f64(),
            "fuzzified"
        );

        out.push(Fuzzified { set: i, degree });
    }
}

#[cfg(test)]
fn distance() -> LinguisticVariable {
    use crate::error::Side;
    use crate::membership::MembershipFunction;

    let mut var = LinguisticVariable::new(Side::Input, "distance".into(), 3);

    var.put(0, MembershipFunction::new("small", -0.5, 0., 0.5).unwrap()).unwrap();
    var.put(1, MembershipFunction::new("medium", 0., 0.5, 1.).unwrap()).unwrap();
    var.put(2, MembershipFunction::new("big", 0.5, 1., 1.5).unwrap()).unwrap();
    var
}

#[test]
fn test_fuzzify_two_sets() {
    let res = fuzzify(&distance(), 0.2);

    assert_eq!(res.len(), 2);
    assert_eq!(res[0].set, 0);
    assert_eq!(res[1].set, 1);
    approx::assert_abs_diff_eq!(res[0].degree, 0.6, epsilon = 1e-12);
    approx::assert_abs_diff_eq!(res[1].degree, 0.4, epsilon = 1e-12);
}

#[test]
fn test_fuzzify_at_top_excludes_neighbours() {
    // 0.5 is the top of medium and a boundary of both small and big
    let res = fuzzify(&distance(), 0.5);

    assert_eq!(res, vec![Fuzzified { set: 1, degree: 1. }]);
}

#[test]
fn test_fuzzify_outside_universe() {
    assert!(fuzzify(&distance(), 7.).is_empty());
    assert!(fuzzify(&distance(), -0.5).is_empty());
}

#[test]
fn test_fuzzify_into_discards_stale_entries() {
    let var = distance();
    let mut out = vec![Fuzzified { set: 2, degree: 0.9 }; 5];

    fuzzify_into(&var, 1.25, &mut out);

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].set, 2);
    approx::assert_abs_diff_eq!(out[0].degree, 0.5, epsilon = 1e-12);
}
