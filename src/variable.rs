use num::Float;

use crate::error::{ConfigError, Side};
use crate::membership::MembershipFunction;

/// A named input or output quantity described by triangular fuzzy sets.
///
/// The number of sets is fixed when the variable is declared; each slot is
/// filled afterwards. Empty slots never match anything.
#[derive(Clone, Debug, PartialEq)]
pub struct LinguisticVariable<F = f64> {
    pub(crate) side: Side,
    pub(crate) name: String,
    pub(crate) sets: Vec<Option<MembershipFunction<F>>>,
}

impl<F: Float> LinguisticVariable<F> {
    pub(crate) fn new(side: Side, name: String, n_sets: usize) -> Self {
        Self {
            side,
            name,
            sets: vec![None; n_sets],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Declared number of set slots, filled or not.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn set(&self, index: usize) -> Option<&MembershipFunction<F>> {
        self.sets.get(index).and_then(Option::as_ref)
    }

    /// Filled sets with their slot index, in declaration order.
    pub fn sets(&self) -> impl Iterator<Item = (usize, &MembershipFunction<F>)> {
        self.sets
            .iter()
            .enumerate()
            .filter_map(|(i, set)| set.as_ref().map(|set| (i, set)))
    }

    /// Index of the set with this exact name.
    pub fn set_index(&self, name: &str) -> Option<usize> {
        self.sets().find(|(_, set)| set.name() == name).map(|(i, _)| i)
    }

    pub(crate) fn put(&mut self, index: usize, set: MembershipFunction<F>) -> Result<(), ConfigError> {
        let len = self.sets.len();
        let slot_taken_by_other = self.set_index(set.name()).is_some_and(|i| i != index);

        if index >= len {
            return Err(ConfigError::IndexOutOfRange {
                what: "fuzzy set",
                index,
                len,
            });
        }
        if slot_taken_by_other {
            return Err(ConfigError::DuplicateSetName {
                side: self.side,
                variable: self.name.clone(),
                name: set.name().to_owned(),
            });
        }

        self.sets[index] = Some(set);

        Ok(())
    }
}

#[cfg(test)]
fn speed() -> LinguisticVariable {
    let mut var = LinguisticVariable::new(Side::Input, "speed".into(), 3);

    var.put(0, MembershipFunction::new("slow", -1., 0., 1.).unwrap()).unwrap();
    var.put(1, MembershipFunction::new("medium", 0., 1., 2.).unwrap()).unwrap();
    var.put(2, MembershipFunction::new("fast", 1., 2., 3.).unwrap()).unwrap();
    var
}

#[test]
fn test_set_lookup() {
    let var = speed();

    assert_eq!(var.len(), 3);
    assert_eq!(var.set_index("slow"), Some(0));
    assert_eq!(var.set_index("fast"), Some(2));
    assert_eq!(var.set_index("Fast"), None);
    assert_eq!(var.set(1).map(MembershipFunction::name), Some("medium"));
}

#[test]
fn test_unfilled_slots() {
    let mut var = LinguisticVariable::<f64>::new(Side::Output, "brake".into(), 2);

    var.put(1, MembershipFunction::new("hard", 0.5, 1., 1.5).unwrap()).unwrap();

    assert!(var.set(0).is_none());
    assert_eq!(var.sets().map(|(i, _)| i).collect::<Vec<_>>(), vec![1]);
}

#[test]
fn test_put_rejects_duplicates_and_overflow() {
    let mut var = speed();
    let dup = MembershipFunction::new("slow", 5., 6., 7.).unwrap();

    assert!(matches!(
        var.put(1, dup.clone()),
        Err(ConfigError::DuplicateSetName { .. })
    ));
    // Replacing a set with one of the same name is fine
    assert_eq!(var.put(0, dup), Ok(()));
    assert!(matches!(
        var.put(3, MembershipFunction::new("extra", 0., 1., 2.).unwrap()),
        Err(ConfigError::IndexOutOfRange { index: 3, len: 3, .. })
    ));
}
