use num::Float;

/// Crisp output values of the last evaluation cycle.
///
/// An output holds no value before the first cycle, after a failed cycle, or
/// when none of the rules concluding it fired.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outputs<F = f64>(pub(crate) Vec<Option<F>>);

impl<F: Float> Outputs<F> {
    pub(crate) fn new(n_outputs: usize) -> Self {
        Outputs(vec![None; n_outputs])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `None` if the index is out of range, `Some(None)` if the output has no value.
    pub fn get(&self, index: usize) -> Option<Option<F>> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<F>> + '_ {
        self.0.iter().copied()
    }

    pub(crate) fn clear(&mut self) {
        for value in &mut self.0 {
            *value = None;
        }
    }
}

#[test]
fn test_outputs() {
    let mut outputs = Outputs::<f64>::new(2);

    assert_eq!(outputs.get(0), Some(None));
    outputs.0[1] = Some(0.5);
    assert_eq!(outputs.iter().collect::<Vec<_>>(), vec![None, Some(0.5)]);
    outputs.clear();
    assert_eq!(outputs.get(1), Some(None));
    assert_eq!(outputs.get(2), None);
}
