use num::Float;

use crate::error::ConfigError;

/// Crisp input values, one per declared input. All start at zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inputs<F = f64>(pub(crate) Vec<F>);

impl<F: Float> Inputs<F> {
    pub(crate) fn new(n_inputs: usize) -> Self {
        Inputs(vec![F::zero(); n_inputs])
    }

    pub fn get(&self, index: usize) -> Option<F> {
        self.0.get(index).copied()
    }

    pub(crate) fn set(&mut self, index: usize, value: F) -> Result<(), ConfigError> {
        let len = self.0.len();
        let slot = self.0.get_mut(index).ok_or(ConfigError::IndexOutOfRange {
            what: "input",
            index,
            len,
        })?;

        *slot = value;

        Ok(())
    }
}

#[test]
fn test_inputs() {
    let mut inputs = Inputs::<f64>::new(2);

    assert_eq!(inputs.get(1), Some(0.));
    assert_eq!(inputs.set(1, 1.25), Ok(()));
    assert_eq!(inputs.get(1), Some(1.25));
    assert_eq!(inputs.get(2), None);
    assert!(inputs.set(2, 0.).is_err());
}
