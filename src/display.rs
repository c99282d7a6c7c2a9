//! Human readable dumps of a system's configuration.

use std::fmt::{self, Display, Formatter};

use num::Float;

use crate::error::Side;
use crate::membership::MembershipFunction;
use crate::rules::Rules;
use crate::system::FuzzySystem;
use crate::variable::LinguisticVariable;

fn coord<F: Float>(x: F) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

impl<F: Float> Display for MembershipFunction<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fuzzy set named \"{}\": [{:.6},0],[{:.6},1],[{:.6},0]",
            self.name(),
            coord(self.left()),
            coord(self.top()),
            coord(self.right())
        )
    }
}

fn write_sets<F: Float>(f: &mut Formatter<'_>, var: &LinguisticVariable<F>) -> fmt::Result {
    for (i, slot) in var.sets.iter().enumerate() {
        match slot {
            Some(set) => writeln!(
                f,
                "Fuzzy set {i} named \"{}\": [{:.6},0],[{:.6},1],[{:.6},0]",
                set.name(),
                coord(set.left()),
                coord(set.top()),
                coord(set.right())
            )?,
            None => writeln!(f, "Fuzzy set {i} is not defined")?,
        }
    }

    Ok(())
}

fn side_title(side: Side) -> &'static str {
    match side {
        Side::Input => "Input",
        Side::Output => "Output",
    }
}

impl<F: Float> Display for LinguisticVariable<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} set named \"{}\":", side_title(self.side), self.name)?;
        write_sets(f, self)
    }
}

impl Display for Rules {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "System contains {} rules of inferential mechanism:", self.len())?;

        for (i, rule) in self.iter().enumerate() {
            writeln!(f, "{i:>3}: {rule}")?;
        }

        Ok(())
    }
}

/// Renders one input or output variable of a system, with its index.
pub struct VariableDisplay<'a, F> {
    index: usize,
    var: &'a LinguisticVariable<F>,
}

impl<F: Float> Display for VariableDisplay<'_, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let side = self.var.side;

        writeln!(
            f,
            "{} set for {side} {} named \"{}\":",
            side_title(side),
            self.index,
            self.var.name
        )?;
        write_sets(f, self.var)
    }
}

impl<F: Float> FuzzySystem<F> {
    /// The sets of input `index`, `None` if there is no such input.
    pub fn input_display(&self, index: usize) -> Option<VariableDisplay<'_, F>> {
        self.inputs.get(index).map(|var| VariableDisplay { index, var })
    }

    /// The sets of output `index`, `None` if there is no such output.
    pub fn output_display(&self, index: usize) -> Option<VariableDisplay<'_, F>> {
        self.outputs.get(index).map(|var| VariableDisplay { index, var })
    }
}

impl<F: Float> Display for FuzzySystem<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "+----------------------------------------+")?;
        writeln!(f, "|              Fuzzy system              |")?;
        writeln!(f, "+----------------------------------------+")?;
        writeln!(f)?;

        for (index, var) in self.inputs.iter().enumerate() {
            writeln!(f, "{}", VariableDisplay { index, var })?;
        }
        for (index, var) in self.outputs.iter().enumerate() {
            writeln!(f, "{}", VariableDisplay { index, var })?;
        }

        write!(f, "{}", self.rules)
    }
}

#[test]
fn test_membership_display() {
    let mf = MembershipFunction::new("slow", -1., 0., 1.).unwrap();

    assert_eq!(
        mf.to_string(),
        "Fuzzy set named \"slow\": [-1.000000,0],[0.000000,1],[1.000000,0]"
    );
}

#[test]
fn test_system_display() {
    let mut sys = FuzzySystem::<f64>::new(1, 1).unwrap();

    sys.define_input(0, "speed", 2).unwrap();
    sys.define_output(0, "brake", 1).unwrap();
    sys.set_input_fcn(0, 0, MembershipFunction::new("slow", -1., 0., 1.).unwrap())
        .unwrap();
    sys.set_output_fcn(0, 0, MembershipFunction::new("hard", 0.5, 1., 1.5).unwrap())
        .unwrap();
    sys.add_rule("if speed is slow then brake is hard").unwrap();

    assert_eq!(
        sys.input_display(0).unwrap().to_string(),
        "Input set for input 0 named \"speed\":\n\
         Fuzzy set 0 named \"slow\": [-1.000000,0],[0.000000,1],[1.000000,0]\n\
         Fuzzy set 1 is not defined\n"
    );
    assert_eq!(
        sys.rules().to_string(),
        "System contains 1 rules of inferential mechanism:\n  0: if speed is slow then brake is hard\n"
    );

    let dump = sys.to_string();

    assert!(dump.starts_with("+----"));
    assert!(dump.contains("Output set for output 0 named \"brake\":\n"));
    assert!(dump.ends_with("  0: if speed is slow then brake is hard\n"));
}
