//! Rule text parser.
//!
//! Rules have the form
//!
//! ```text
//! if <input> is <set> [and <input> is <set>]... then <output> is <set>
//! ```
//!
//! Tokens are separated by exactly one space and compared case-sensitively.
//! Names are resolved against the system as soon as they are read.

use num::Float;

use crate::error::{Expected, NameKind, RuleError};
use crate::system::FuzzySystem;
use crate::variable::LinguisticVariable;

/// One `<input> is <set>` premise, by index.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Clause {
    pub input: usize,
    pub set: usize,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ParsedRule {
    pub antecedents: Vec<Clause>,
    pub output: usize,
    pub output_set: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    If,
    InputName,
    InputIs,
    InputSetName,
    AndOrThen,
    OutputName,
    OutputIs,
    OutputSetName,
    Done,
}

impl State {
    fn expected(self) -> Expected {
        match self {
            Self::If => Expected::If,
            Self::InputName => Expected::InputName,
            Self::InputIs | Self::OutputIs => Expected::Is,
            Self::InputSetName => Expected::InputSetName,
            Self::AndOrThen => Expected::AndOrThen,
            Self::OutputName => Expected::OutputName,
            Self::OutputSetName => Expected::OutputSetName,
            Self::Done => Expected::EndOfRule,
        }
    }
}

/// Parses `text` against the variables and sets declared in `system`.
pub fn parse<F: Float>(text: &str, system: &FuzzySystem<F>) -> Result<ParsedRule, RuleError> {
    parse_with(text, &system.inputs, &system.outputs, system.limits.max_antecedents)
}

pub(crate) fn parse_with<F: Float>(
    text: &str,
    inputs: &[LinguisticVariable<F>],
    outputs: &[LinguisticVariable<F>],
    max_antecedents: usize,
) -> Result<ParsedRule, RuleError> {
    let mut state = State::If;
    let mut antecedents = Vec::new();
    let mut input = 0;
    let mut output = 0;
    let mut output_set = 0;
    let mut n_tokens = 0;

    for (position, token) in text.split(' ').enumerate() {
        n_tokens = position + 1;

        if token.is_empty() {
            return Err(syntax(position, token, state));
        }

        state = match state {
            State::If => {
                keyword(position, token, "if", state)?;
                State::InputName
            },
            State::InputName => {
                input = inputs
                    .iter()
                    .position(|var| var.name() == token)
                    .ok_or_else(|| not_found(NameKind::InputVariable, token))?;
                State::InputIs
            },
            State::InputIs => {
                keyword(position, token, "is", state)?;
                State::InputSetName
            },
            State::InputSetName => {
                let set = inputs[input]
                    .set_index(token)
                    .ok_or_else(|| not_found(NameKind::InputSet, token))?;

                if antecedents.len() == max_antecedents {
                    return Err(RuleError::TooManyClauses { max: max_antecedents });
                }

                antecedents.push(Clause { input, set });
                State::AndOrThen
            },
            State::AndOrThen => match token {
                "and" => State::InputName,
                "then" => State::OutputName,
                _ => return Err(syntax(position, token, state)),
            },
            State::OutputName => {
                output = outputs
                    .iter()
                    .position(|var| var.name() == token)
                    .ok_or_else(|| not_found(NameKind::OutputVariable, token))?;
                State::OutputIs
            },
            State::OutputIs => {
                keyword(position, token, "is", state)?;
                State::OutputSetName
            },
            // Last token, nothing after it
            State::OutputSetName => {
                output_set = outputs[output]
                    .set_index(token)
                    .ok_or_else(|| not_found(NameKind::OutputSet, token))?;
                State::Done
            },
            State::Done => return Err(syntax(position, token, state)),
        };
    }

    if state != State::Done {
        return Err(syntax(n_tokens, "", state));
    }

    Ok(ParsedRule {
        antecedents,
        output,
        output_set,
    })
}

/// Number of premises a rule text declares: the one after `if` plus one per
/// `and` ahead of `then`. Needs no variables, so it can run when the rule is stored.
pub(crate) fn count_antecedents(text: &str) -> usize {
    1 + text
        .split(' ')
        .take_while(|&token| token != "then")
        .filter(|&token| token == "and")
        .count()
}

fn keyword(position: usize, token: &str, keyword: &str, state: State) -> Result<(), RuleError> {
    if token == keyword {
        Ok(())
    } else {
        Err(syntax(position, token, state))
    }
}

fn syntax(position: usize, found: &str, state: State) -> RuleError {
    RuleError::Syntax {
        position,
        found: found.to_owned(),
        expected: state.expected(),
    }
}

fn not_found(kind: NameKind, name: &str) -> RuleError {
    RuleError::NameNotFound {
        kind,
        name: name.to_owned(),
    }
}

#[cfg(test)]
fn vars() -> (Vec<LinguisticVariable>, Vec<LinguisticVariable>) {
    use crate::error::Side;
    use crate::membership::MembershipFunction;

    let mut distance = LinguisticVariable::new(Side::Input, "distance".into(), 2);
    let mut speed = LinguisticVariable::new(Side::Input, "speed".into(), 2);
    let mut throttle = LinguisticVariable::new(Side::Output, "throttle".into(), 2);

    distance.put(0, MembershipFunction::new("small", -0.5, 0., 0.5).unwrap()).unwrap();
    distance.put(1, MembershipFunction::new("big", 0., 0.5, 1.).unwrap()).unwrap();
    speed.put(0, MembershipFunction::new("slow", -1., 0., 1.).unwrap()).unwrap();
    speed.put(1, MembershipFunction::new("fast", 0., 1., 2.).unwrap()).unwrap();
    throttle.put(0, MembershipFunction::new("zero", -0.5, 0., 0.5).unwrap()).unwrap();
    throttle.put(1, MembershipFunction::new("full", 0., 0.5, 1.).unwrap()).unwrap();

    (vec![distance, speed], vec![throttle])
}

#[cfg(test)]
fn parse_test(text: &str) -> Result<ParsedRule, RuleError> {
    let (inputs, outputs) = vars();

    parse_with(text, &inputs, &outputs, 4)
}

#[test]
fn test_parse_single_clause() {
    let rule = parse_test("if distance is big then throttle is full").unwrap();

    assert_eq!(rule.antecedents, vec![Clause { input: 0, set: 1 }]);
    assert_eq!(rule.output, 0);
    assert_eq!(rule.output_set, 1);
}

#[test]
fn test_parse_conjunction() {
    let rule = parse_test("if distance is small and speed is fast then throttle is zero").unwrap();

    assert_eq!(
        rule.antecedents,
        vec![Clause { input: 0, set: 0 }, Clause { input: 1, set: 1 }]
    );
    assert_eq!(rule.output_set, 0);
}

#[test]
fn test_parse_is_pure() {
    let text = "if speed is slow and distance is big then throttle is full";

    assert_eq!(parse_test(text), parse_test(text));
}

#[test]
fn test_syntax_errors() {
    let err = |text: &str| match parse_test(text) {
        Err(RuleError::Syntax { position, expected, .. }) => (position, expected),
        other => panic!("expected syntax error for {text:?}, got {other:?}"),
    };

    assert_eq!(err("when distance is big then throttle is full"), (0, Expected::If));
    assert_eq!(err("if distance was big then throttle is full"), (2, Expected::Is));
    assert_eq!(err("if distance is big throttle is full"), (4, Expected::AndOrThen));
    assert_eq!(err("if distance is big then throttle equals full"), (6, Expected::Is));
    assert_eq!(err("if distance is big then throttle is"), (7, Expected::OutputSetName));
    assert_eq!(err("if distance is big"), (4, Expected::AndOrThen));
    assert_eq!(err("if distance is big then throttle is full now"), (8, Expected::EndOfRule));
    assert_eq!(err("if distance is big then throttle is full "), (8, Expected::EndOfRule));
    assert_eq!(err("if  distance is big then throttle is full"), (1, Expected::InputName));
    assert_eq!(err(""), (0, Expected::If));
    assert_eq!(err("If distance is big then throttle is full"), (0, Expected::If));
}

#[test]
fn test_names_not_found() {
    let kind = |text: &str| match parse_test(text) {
        Err(RuleError::NameNotFound { kind, name }) => (kind, name),
        other => panic!("expected missing name for {text:?}, got {other:?}"),
    };

    assert_eq!(
        kind("if altitude is big then throttle is full"),
        (NameKind::InputVariable, "altitude".to_owned())
    );
    assert_eq!(
        kind("if distance is huge then throttle is full"),
        (NameKind::InputSet, "huge".to_owned())
    );
    assert_eq!(
        kind("if distance is big then brake is full"),
        (NameKind::OutputVariable, "brake".to_owned())
    );
    assert_eq!(
        kind("if distance is big then throttle is Full"),
        (NameKind::OutputSet, "Full".to_owned())
    );
    // Sets are looked up on the variable named in the same clause
    assert_eq!(
        kind("if speed is small then throttle is full"),
        (NameKind::InputSet, "small".to_owned())
    );
}

#[test]
fn test_too_many_clauses() {
    let (inputs, outputs) = vars();
    let text = "if distance is big and speed is fast and distance is small then throttle is full";

    assert_eq!(
        parse_with(text, &inputs, &outputs, 2),
        Err(RuleError::TooManyClauses { max: 2 })
    );
    assert!(parse_with(text, &inputs, &outputs, 3).is_ok());
}

#[test]
fn test_count_antecedents() {
    assert_eq!(count_antecedents("if distance is small then throttle is full"), 1);
    assert_eq!(
        count_antecedents("if distance is small and speed is slow and distance is big then throttle is zero"),
        3
    );
    // Only premises count, whatever follows `then`
    assert_eq!(count_antecedents("if speed is slow then throttle is and"), 1);
}
