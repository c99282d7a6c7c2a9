use crate::error::RuleError;
use crate::parser::ParsedRule;

/// Rule texts in declaration order.
///
/// The parsed form of each rule is cached next to its text. The cache is only
/// an optimisation: it is dropped whenever the text changes or the variables
/// the rules refer to are reconfigured, so results are the same as parsing
/// every time.
///
/// Only a [`FuzzySystem`](crate::FuzzySystem) builds and fills one; callers
/// read it through [`FuzzySystem::rules`](crate::FuzzySystem::rules).
///
/// ```compile_fail
/// let rules = fuzzy_mamdani::Rules::new();
/// ```
#[derive(Clone, Debug)]
pub struct Rules(pub(crate) Vec<Rule>);

#[derive(Clone, Debug)]
pub(crate) struct Rule {
    pub(crate) text: String,
    pub(crate) parsed: Option<ParsedRule>,
}

impl Rules {
    pub(crate) fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(|rule| rule.text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|rule| rule.text.as_str())
    }

    pub(crate) fn push(&mut self, text: String) -> usize {
        self.0.push(Rule { text, parsed: None });
        self.0.len() - 1
    }

    /// Replaces the text of an existing rule. `false` if there is no such rule.
    pub(crate) fn replace(&mut self, index: usize, text: String) -> bool {
        let Some(rule) = self.0.get_mut(index) else {
            return false;
        };

        *rule = Rule { text, parsed: None };

        true
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.0.len()).then(|| self.0.remove(index).text)
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }

    pub(crate) fn invalidate(&mut self) {
        for rule in &mut self.0 {
            rule.parsed = None;
        }
    }

    /// Parses every rule not parsed since the last change, stopping at the first error.
    pub(crate) fn parse_all(
        &mut self,
        mut parse: impl FnMut(&str) -> Result<ParsedRule, RuleError>,
    ) -> Result<(), (usize, RuleError)> {
        for (i, rule) in self.0.iter_mut().enumerate() {
            if rule.parsed.is_none() {
                rule.parsed = Some(parse(&rule.text).map_err(|e| (i, e))?);
            }
        }

        Ok(())
    }

    /// Parsed rules, in order. Rules not parsed yet are skipped.
    pub(crate) fn parsed(&self) -> impl Iterator<Item = &ParsedRule> {
        self.0.iter().filter_map(|rule| rule.parsed.as_ref())
    }
}

#[test]
fn test_parse_cache() {
    let mut rules = Rules::new();
    let mut calls = 0;

    rules.push("a".into());
    rules.push("b".into());

    let mut parse = |_: &str| {
        calls += 1;
        Ok(ParsedRule {
            antecedents: Vec::new(),
            output: 0,
            output_set: 0,
        })
    };

    assert_eq!(rules.parse_all(&mut parse), Ok(()));
    assert_eq!(rules.parse_all(&mut parse), Ok(()));
    rules.invalidate();
    assert_eq!(rules.parse_all(&mut parse), Ok(()));
    assert_eq!(calls, 4);
    assert_eq!(rules.parsed().count(), 2);
}

#[test]
fn test_parse_all_reports_failing_index() {
    let mut rules = Rules::new();

    rules.push("good".into());
    rules.push("bad".into());

    let res = rules.parse_all(|text| {
        if text == "bad" {
            Err(RuleError::TooManyClauses { max: 1 })
        } else {
            Ok(ParsedRule {
                antecedents: Vec::new(),
                output: 0,
                output_set: 0,
            })
        }
    });

    assert_eq!(res, Err((1, RuleError::TooManyClauses { max: 1 })));
    assert_eq!(rules.get(1), Some("bad"));
}
