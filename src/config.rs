#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Capacity limits and integration step of a [`FuzzySystem`](crate::FuzzySystem).
///
/// Every limit is enforced when the system is configured; a call that would
/// exceed one is rejected instead of truncated. The defaults match the sizes
/// the library was originally tuned for on small controllers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Limits {
    pub max_inputs: usize,
    pub max_outputs: usize,
    /// Fuzzy sets per linguistic variable
    pub max_sets: usize,
    pub max_rules: usize,
    /// `is` clauses before `then` in a single rule
    pub max_antecedents: usize,
    /// In bytes
    pub max_rule_len: usize,
    /// In bytes, applies to variable and set names
    pub max_name_len: usize,
    /// Sampling step of the center of gravity integration
    pub cog_step: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_inputs: 4,
            max_outputs: 2,
            max_sets: 16,
            max_rules: 256,
            max_antecedents: 4,
            max_rule_len: 128,
            max_name_len: 15,
            cog_step: 0.02,
        }
    }
}

impl Limits {
    pub fn with_max_inputs(mut self, n: usize) -> Self {
        self.max_inputs = n;
        self
    }

    pub fn with_max_outputs(mut self, n: usize) -> Self {
        self.max_outputs = n;
        self
    }

    pub fn with_max_sets(mut self, n: usize) -> Self {
        self.max_sets = n;
        self
    }

    pub fn with_max_rules(mut self, n: usize) -> Self {
        self.max_rules = n;
        self
    }

    pub fn with_max_antecedents(mut self, n: usize) -> Self {
        self.max_antecedents = n;
        self
    }

    pub fn with_max_rule_len(mut self, n: usize) -> Self {
        self.max_rule_len = n;
        self
    }

    pub fn with_max_name_len(mut self, n: usize) -> Self {
        self.max_name_len = n;
        self
    }

    pub fn with_cog_step(mut self, step: f64) -> Self {
        self.cog_step = step;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cog_step.is_finite() && self.cog_step > 0.) {
            return Err(ConfigError::InvalidLimits("cog_step must be finite and > 0"));
        }
        if self.max_antecedents == 0 {
            return Err(ConfigError::InvalidLimits("max_antecedents must be > 0"));
        }
        if self.max_name_len == 0 {
            return Err(ConfigError::InvalidLimits("max_name_len must be > 0"));
        }

        Ok(())
    }

    /// Checks a variable or fuzzy set name: non-empty, no whitespace, within `max_name_len`.
    pub(crate) fn check_name(&self, name: &str) -> Result<(), ConfigError> {
        if name.is_empty() || name.len() > self.max_name_len || name.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidName {
                name: name.to_owned(),
                max_len: self.max_name_len,
            });
        }

        Ok(())
    }
}

#[test]
fn test_default_limits() {
    let limits = Limits::default();

    assert_eq!(limits.max_inputs, 4);
    assert_eq!(limits.max_outputs, 2);
    assert_eq!(limits.max_sets, 16);
    assert_eq!(limits.max_rules, 256);
    assert_eq!(limits.cog_step, 0.02);
    assert_eq!(limits.validate(), Ok(()));
}

#[test]
fn test_invalid_limits() {
    assert!(Limits::default().with_cog_step(0.).validate().is_err());
    assert!(Limits::default().with_cog_step(f64::NAN).validate().is_err());
    assert!(Limits::default().with_max_antecedents(0).validate().is_err());
}

#[test]
fn test_check_name() {
    let limits = Limits::default().with_max_name_len(8);

    assert_eq!(limits.check_name("speed"), Ok(()));
    assert!(limits.check_name("").is_err());
    assert!(limits.check_name("two words").is_err());
    assert!(limits.check_name("tab\tname").is_err());
    assert!(limits.check_name("muchtoolong").is_err());
}
