use num::Float;
use tracing::debug;

use crate::fuzzify::Fuzzified;
use crate::ops::conjunction;
use crate::parser::ParsedRule;

/// Firing strength of one rule for one set of an output variable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inferred<F = f64> {
    pub set: usize,
    pub strength: F,
}

/// Outcome of a fired rule: which output it concludes and how strongly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Firing<F = f64> {
    pub output: usize,
    pub set: usize,
    pub strength: F,
}

/// Evaluates a parsed rule against the fuzzification results of every input.
///
/// The rule fires only when each of its clauses finds its set among the
/// fuzzified entries of the clause's input. The strength is the minimum of
/// all matched degrees. `fuzzified` is indexed by input.
pub fn evaluate<F: Float>(rule: &ParsedRule, fuzzified: &[Vec<Fuzzified<F>>]) -> Option<Firing<F>> {
    let mut degrees = Vec::with_capacity(rule.antecedents.len());

    for clause in &rule.antecedents {
        let before = degrees.len();
        let entries = fuzzified.get(clause.input).map(Vec::as_slice).unwrap_or_default();

        degrees.extend(entries.iter().filter(|f| f.set == clause.set).map(|f| f.degree));

        if degrees.len() == before {
            return None;
        }
    }

    let strength = conjunction(degrees)?;

    Some(Firing {
        output: rule.output,
        set: rule.output_set,
        strength,
    })
}

/// Evaluates every rule in order and appends what fired to `inferred`,
/// which is indexed by output. Stale entries are discarded first.
pub fn infer<'r, F: Float>(
    rules: impl IntoIterator<Item = &'r ParsedRule>,
    fuzzified: &[Vec<Fuzzified<F>>],
    inferred: &mut [Vec<Inferred<F>>],
) {
    for out in inferred.iter_mut() {
        out.clear();
    }

    for (i, rule) in rules.into_iter().enumerate() {
        let Some(firing) = evaluate(rule, fuzzified) else {
            continue;
        };

        debug!(
            rule = i,
            output = firing.output,
            set = firing.set,
            strength = firing.strength.to_f64(),
            "rule fired"
        );

        if let Some(out) = inferred.get_mut(firing.output) {
            out.push(Inferred {
                set: firing.set,
                strength: firing.strength,
            });
        }
    }
}

#[cfg(test)]
fn rule(antecedents: &[(usize, usize)], output: usize, output_set: usize) -> ParsedRule {
    use crate::parser::Clause;

    ParsedRule {
        antecedents: antecedents
            .iter()
            .map(|&(input, set)| Clause { input, set })
            .collect(),
        output,
        output_set,
    }
}

#[cfg(test)]
fn fz(entries: &[(usize, f64)]) -> Vec<Fuzzified> {
    entries
        .iter()
        .map(|&(set, degree)| Fuzzified { set, degree })
        .collect()
}

#[test]
fn test_rule_fires_with_min_strength() {
    let fuzzified = vec![fz(&[(0, 0.6), (1, 0.4)]), fz(&[(1, 0.75), (2, 0.25)])];
    let firing = evaluate(&rule(&[(0, 0), (1, 1)], 0, 3), &fuzzified).unwrap();

    assert_eq!(
        firing,
        Firing {
            output: 0,
            set: 3,
            strength: 0.6
        }
    );
}

#[test]
fn test_rule_needs_every_clause() {
    let fuzzified = vec![fz(&[(0, 0.6), (1, 0.4)]), fz(&[(1, 0.75), (2, 0.25)])];

    assert_eq!(evaluate(&rule(&[(0, 0), (1, 0)], 0, 0), &fuzzified), None);
    assert_eq!(evaluate(&rule(&[(0, 2)], 0, 0), &fuzzified), None);
    // Unknown input index never matches
    assert_eq!(evaluate(&rule(&[(5, 0)], 0, 0), &fuzzified), None);
}

#[test]
fn test_antecedent_order_does_not_matter() {
    let fuzzified = vec![fz(&[(0, 0.6), (1, 0.4)]), fz(&[(1, 0.75), (2, 0.25)])];
    let ab = evaluate(&rule(&[(0, 1), (1, 2)], 0, 0), &fuzzified);
    let ba = evaluate(&rule(&[(1, 2), (0, 1)], 0, 0), &fuzzified);

    assert_eq!(ab, ba);
    assert_eq!(ab.map(|f| f.strength), Some(0.25));
}

#[test]
fn test_infer_keeps_duplicates_in_rule_order() {
    let fuzzified = vec![fz(&[(0, 0.6), (1, 0.4)])];
    let rules = [rule(&[(0, 0)], 0, 2), rule(&[(0, 1)], 0, 2), rule(&[(0, 1)], 1, 0)];
    let mut inferred = vec![vec![Inferred { set: 9, strength: 1. }], Vec::new()];

    infer(&rules, &fuzzified, &mut inferred);

    assert_eq!(
        inferred[0],
        vec![
            Inferred { set: 2, strength: 0.6 },
            Inferred { set: 2, strength: 0.4 }
        ]
    );
    assert_eq!(inferred[1], vec![Inferred { set: 0, strength: 0.4 }]);
}
