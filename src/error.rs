use std::fmt;

use thiserror::Error;

/// Which side of the system a variable or set lives on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Input,
    Output,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// What a rule name failed to resolve to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameKind {
    InputVariable,
    OutputVariable,
    InputSet,
    OutputSet,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputVariable => f.write_str("input variable"),
            Self::OutputVariable => f.write_str("output variable"),
            Self::InputSet => f.write_str("input fuzzy set"),
            Self::OutputSet => f.write_str("output fuzzy set"),
        }
    }
}

/// Token the rule parser was waiting for when it failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Expected {
    If,
    InputName,
    Is,
    InputSetName,
    AndOrThen,
    OutputName,
    OutputSetName,
    EndOfRule,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::If => f.write_str("'if'"),
            Self::InputName => f.write_str("input name"),
            Self::Is => f.write_str("'is'"),
            Self::InputSetName => f.write_str("input fuzzy set name"),
            Self::AndOrThen => f.write_str("'and' or 'then'"),
            Self::OutputName => f.write_str("output name"),
            Self::OutputSetName => f.write_str("output fuzzy set name"),
            Self::EndOfRule => f.write_str("end of rule"),
        }
    }
}

/// Rejected configuration call. The system is left as it was before the call.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{requested} inputs requested, at most {max} allowed")]
    TooManyInputs { requested: usize, max: usize },
    #[error("{requested} outputs requested, at most {max} allowed")]
    TooManyOutputs { requested: usize, max: usize },
    #[error("{requested} fuzzy sets requested for {side} '{variable}', at most {max} allowed")]
    TooManySets {
        side: Side,
        variable: String,
        requested: usize,
        max: usize,
    },
    #[error("rule limit of {max} reached")]
    TooManyRules { max: usize },
    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange { what: &'static str, index: usize, len: usize },
    #[error("invalid triangle '{name}': expected left <= top <= right, got [{left}, {top}, {right}]")]
    InvalidTriangle { name: String, left: f64, top: f64, right: f64 },
    #[error("invalid name {name:?}: must be 1..={max_len} bytes without whitespace")]
    InvalidName { name: String, max_len: usize },
    #[error("{side} '{variable}' already has a fuzzy set named '{name}'")]
    DuplicateSetName { side: Side, variable: String, name: String },
    #[error("another {side} is already named '{name}'")]
    DuplicateVariableName { side: Side, name: String },
    #[error("output set '{name}' lies where an integration step of {step} no longer advances")]
    BeyondStepResolution { name: String, step: f64 },
    #[error("rule is {len} bytes long, at most {max} allowed")]
    RuleTooLong { len: usize, max: usize },
    #[error("rule has {count} antecedent clauses, at most {max} allowed")]
    TooManyAntecedents { count: usize, max: usize },
    #[error("invalid limits: {0}")]
    InvalidLimits(&'static str),
}

/// Failure to turn one rule's text into a [`ParsedRule`](crate::ParsedRule).
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RuleError {
    #[error("syntax error at token {position}: expected {expected}, found {found:?}")]
    Syntax {
        position: usize,
        found: String,
        expected: Expected,
    },
    #[error("{kind} '{name}' not found")]
    NameNotFound { kind: NameKind, name: String },
    #[error("rule has more than {max} antecedent clauses")]
    TooManyClauses { max: usize },
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("rule {index} \"{rule}\": {source}")]
    Rule {
        index: usize,
        rule: String,
        #[source]
        source: RuleError,
    },
    #[error("no rule fired for output {output} ('{name}')")]
    NoRuleFired { output: usize, name: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[test]
fn test_error_messages() {
    let err = Error::Rule {
        index: 2,
        rule: "if speed is quick then brake is hard".into(),
        source: RuleError::NameNotFound {
            kind: NameKind::InputSet,
            name: "quick".into(),
        },
    };

    assert_eq!(
        err.to_string(),
        "rule 2 \"if speed is quick then brake is hard\": input fuzzy set 'quick' not found"
    );

    let err = RuleError::Syntax {
        position: 4,
        found: "than".into(),
        expected: Expected::AndOrThen,
    };

    assert_eq!(
        err.to_string(),
        "syntax error at token 4: expected 'and' or 'then', found \"than\""
    );
}
