use num::Float;
use tracing::{debug, warn};

use crate::config::Limits;
use crate::defuzzify::defuzzify;
use crate::error::{ConfigError, Error, Result, RuleError, Side};
use crate::fuzzify::{fuzzify_into, Fuzzified};
use crate::inference::{infer, Inferred};
use crate::inputs::Inputs;
use crate::membership::MembershipFunction;
use crate::outputs::Outputs;
use crate::parser::{count_antecedents, parse_with, ParsedRule};
use crate::rules::Rules;
use crate::variable::LinguisticVariable;

/// A complete Mamdani fuzzy system: variables, rules, crisp inputs and outputs.
///
/// Configure it with [`define_input`](Self::define_input),
/// [`define_output`](Self::define_output), the `set_*_fcn` methods and
/// [`add_rule`](Self::add_rule), then repeatedly [`set_input`](Self::set_input),
/// [`calculate_output`](Self::calculate_output) and read [`output`](Self::output).
#[derive(Clone, Debug)]
pub struct FuzzySystem<F = f64> {
    pub(crate) limits: Limits,
    cog_step: F,
    pub(crate) inputs: Vec<LinguisticVariable<F>>,
    pub(crate) outputs: Vec<LinguisticVariable<F>>,
    pub(crate) rules: Rules,
    input_values: Inputs<F>,
    output_values: Outputs<F>,
    // Scratch, rebuilt every cycle
    fuzzified: Vec<Vec<Fuzzified<F>>>,
    inferred: Vec<Vec<Inferred<F>>>,
}

impl<F: Float> FuzzySystem<F> {
    /// A system with the default [`Limits`].
    pub fn new(n_inputs: usize, n_outputs: usize) -> Result<Self> {
        Self::with_limits(n_inputs, n_outputs, Limits::default())
    }

    pub fn with_limits(n_inputs: usize, n_outputs: usize, limits: Limits) -> Result<Self> {
        limits.validate()?;

        if n_inputs > limits.max_inputs {
            return Err(ConfigError::TooManyInputs {
                requested: n_inputs,
                max: limits.max_inputs,
            }
            .into());
        }
        if n_outputs > limits.max_outputs {
            return Err(ConfigError::TooManyOutputs {
                requested: n_outputs,
                max: limits.max_outputs,
            }
            .into());
        }

        let cog_step = F::from(limits.cog_step).ok_or(ConfigError::InvalidLimits(
            "cog_step is not representable in the chosen float type",
        ))?;

        Ok(Self {
            limits,
            cog_step,
            inputs: (0..n_inputs)
                .map(|_| LinguisticVariable::new(Side::Input, String::new(), 0))
                .collect(),
            outputs: (0..n_outputs)
                .map(|_| LinguisticVariable::new(Side::Output, String::new(), 0))
                .collect(),
            rules: Rules::new(),
            input_values: Inputs::new(n_inputs),
            output_values: Outputs::new(n_outputs),
            fuzzified: vec![Vec::new(); n_inputs],
            inferred: vec![Vec::new(); n_outputs],
        })
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Names input `index` and reserves `n_sets` fuzzy set slots for it.
    /// Any sets it had before are dropped.
    pub fn define_input(&mut self, index: usize, name: impl Into<String>, n_sets: usize) -> Result<()> {
        self.define(Side::Input, index, name.into(), n_sets)
    }

    /// Names output `index` and reserves `n_sets` fuzzy set slots for it.
    /// Any sets it had before are dropped.
    pub fn define_output(&mut self, index: usize, name: impl Into<String>, n_sets: usize) -> Result<()> {
        self.define(Side::Output, index, name.into(), n_sets)
    }

    fn define(&mut self, side: Side, index: usize, name: String, n_sets: usize) -> Result<()> {
        self.limits.check_name(&name)?;

        if n_sets > self.limits.max_sets {
            return Err(ConfigError::TooManySets {
                side,
                variable: name,
                requested: n_sets,
                max: self.limits.max_sets,
            }
            .into());
        }

        let vars = self.variables_mut(side);
        let len = vars.len();

        if index >= len {
            return Err(ConfigError::IndexOutOfRange {
                what: variable_what(side),
                index,
                len,
            }
            .into());
        }
        if vars.iter().enumerate().any(|(i, var)| i != index && var.name() == name) {
            return Err(ConfigError::DuplicateVariableName { side, name }.into());
        }

        vars[index] = LinguisticVariable::new(side, name, n_sets);
        self.rules.invalidate();

        debug!(%side, index, n_sets, "variable defined");

        Ok(())
    }

    /// Puts `set` in slot `set_index` of input `input`.
    pub fn set_input_fcn(&mut self, input: usize, set_index: usize, set: MembershipFunction<F>) -> Result<()> {
        self.set_fcn(Side::Input, input, set_index, set)
    }

    /// Puts `set` in slot `set_index` of output `output`.
    pub fn set_output_fcn(&mut self, output: usize, set_index: usize, set: MembershipFunction<F>) -> Result<()> {
        self.set_fcn(Side::Output, output, set_index, set)
    }

    fn set_fcn(&mut self, side: Side, index: usize, set_index: usize, set: MembershipFunction<F>) -> Result<()> {
        self.limits.check_name(set.name())?;

        if side == Side::Output {
            self.check_resolution(&set)?;
        }

        let vars = self.variables_mut(side);
        let len = vars.len();
        let var = vars.get_mut(index).ok_or(ConfigError::IndexOutOfRange {
            what: variable_what(side),
            index,
            len,
        })?;

        var.put(set_index, set)?;
        self.rules.invalidate();

        Ok(())
    }

    /// The centroid walks an output set in `cog_step` increments, which must
    /// still move the sample point at the set's largest magnitude.
    fn check_resolution(&self, set: &MembershipFunction<F>) -> Result<()> {
        let step = self.cog_step;

        if set.left() + step > set.left() && set.right() + step > set.right() {
            return Ok(());
        }

        Err(ConfigError::BeyondStepResolution {
            name: set.name().to_owned(),
            step: self.limits.cog_step,
        }
        .into())
    }

    fn variables_mut(&mut self, side: Side) -> &mut Vec<LinguisticVariable<F>> {
        match side {
            Side::Input => &mut self.inputs,
            Side::Output => &mut self.outputs,
        }
    }

    pub fn input_variable(&self, index: usize) -> Option<&LinguisticVariable<F>> {
        self.inputs.get(index)
    }

    pub fn output_variable(&self, index: usize) -> Option<&LinguisticVariable<F>> {
        self.outputs.get(index)
    }

    pub fn input_variables(&self) -> &[LinguisticVariable<F>] {
        &self.inputs
    }

    pub fn output_variables(&self) -> &[LinguisticVariable<F>] {
        &self.outputs
    }

    /// Index of the input with this exact name.
    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|var| var.name() == name)
    }

    /// Index of the output with this exact name.
    pub fn output_index(&self, name: &str) -> Option<usize> {
        self.outputs.iter().position(|var| var.name() == name)
    }

    /// Appends a rule and returns its index. Only the length and the number of
    /// antecedent clauses are checked here; the text is parsed on the next
    /// [`calculate_output`](Self::calculate_output) or [`check_rules`](Self::check_rules).
    pub fn add_rule(&mut self, text: impl Into<String>) -> Result<usize> {
        let text = text.into();

        if self.rules.len() >= self.limits.max_rules {
            return Err(ConfigError::TooManyRules {
                max: self.limits.max_rules,
            }
            .into());
        }

        self.check_rule_shape(&text)?;

        Ok(self.rules.push(text))
    }

    pub fn set_rule(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let text = text.into();

        self.check_rule_shape(&text)?;

        let len = self.rules.len();

        if !self.rules.replace(index, text) {
            return Err(ConfigError::IndexOutOfRange { what: "rule", index, len }.into());
        }

        Ok(())
    }

    /// Removes a rule, shifting later rules down by one. Returns its text.
    pub fn remove_rule(&mut self, index: usize) -> Result<String> {
        let len = self.rules.len();

        self.rules
            .remove(index)
            .ok_or_else(|| ConfigError::IndexOutOfRange { what: "rule", index, len }.into())
    }

    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    fn check_rule_shape(&self, text: &str) -> Result<()> {
        if text.len() > self.limits.max_rule_len {
            return Err(ConfigError::RuleTooLong {
                len: text.len(),
                max: self.limits.max_rule_len,
            }
            .into());
        }

        let count = count_antecedents(text);

        if count > self.limits.max_antecedents {
            return Err(ConfigError::TooManyAntecedents {
                count,
                max: self.limits.max_antecedents,
            }
            .into());
        }

        Ok(())
    }

    /// Parses `text` against this system without storing it.
    pub fn parse_rule(&self, text: &str) -> std::result::Result<ParsedRule, RuleError> {
        parse_with(text, &self.inputs, &self.outputs, self.limits.max_antecedents)
    }

    /// Parses every stored rule now instead of waiting for the next cycle.
    pub fn check_rules(&mut self) -> Result<()> {
        let (inputs, outputs) = (&self.inputs, &self.outputs);
        let max_antecedents = self.limits.max_antecedents;

        match self
            .rules
            .parse_all(|text| parse_with(text, inputs, outputs, max_antecedents))
        {
            Ok(()) => Ok(()),
            Err((index, source)) => Err(Error::Rule {
                index,
                rule: self.rules.get(index).unwrap_or_default().to_owned(),
                source,
            }),
        }
    }

    pub fn set_input(&mut self, index: usize, value: F) -> Result<()> {
        Ok(self.input_values.set(index, value)?)
    }

    pub fn input(&self, index: usize) -> Result<F> {
        let len = self.input_values.0.len();

        self.input_values
            .get(index)
            .ok_or_else(|| ConfigError::IndexOutOfRange { what: "input", index, len }.into())
    }

    /// Crisp value of output `index` from the last cycle.
    ///
    /// Fails with [`Error::NoRuleFired`] when no rule concluding this output
    /// fired, or when no successful cycle has run yet.
    pub fn output(&self, index: usize) -> Result<F> {
        let len = self.output_values.len();

        match self.output_values.get(index) {
            Some(Some(value)) => Ok(value),
            Some(None) => Err(Error::NoRuleFired {
                output: index,
                name: self.outputs[index].name().to_owned(),
            }),
            None => Err(ConfigError::IndexOutOfRange { what: "output", index, len }.into()),
        }
    }

    pub fn outputs(&self) -> &Outputs<F> {
        &self.output_values
    }

    /// Fuzzification result of `input` from the last cycle.
    pub fn fuzzified(&self, input: usize) -> &[Fuzzified<F>] {
        self.fuzzified.get(input).map(Vec::as_slice).unwrap_or_default()
    }

    /// Rules that fired for `output` in the last cycle, in rule order.
    pub fn inferred(&self, output: usize) -> &[Inferred<F>] {
        self.inferred.get(output).map(Vec::as_slice).unwrap_or_default()
    }

    /// Runs fuzzification, inference and defuzzification over the current inputs.
    ///
    /// Every output is overwritten. If a rule fails to parse the cycle stops
    /// there and all outputs are left without a value.
    pub fn calculate_output(&mut self) -> Result<()> {
        self.output_values.clear();

        self.fuzzified.iter_mut().for_each(Vec::clear);
        self.inferred.iter_mut().for_each(Vec::clear);

        self.check_rules()?;

        for ((var, &x), out) in self.inputs.iter().zip(&self.input_values.0).zip(&mut self.fuzzified) {
            fuzzify_into(var, x, out);
        }

        infer(self.rules.parsed(), &self.fuzzified, &mut self.inferred);

        for (i, ((var, inferred), value)) in self
            .outputs
            .iter()
            .zip(&self.inferred)
            .zip(&mut self.output_values.0)
            .enumerate()
        {
            *value = defuzzify(var, inferred, self.cog_step);

            if value.is_none() {
                warn!(output = i, name = var.name(), "no rule fired");
            }
        }

        Ok(())
    }
}

fn variable_what(side: Side) -> &'static str {
    match side {
        Side::Input => "input",
        Side::Output => "output",
    }
}
