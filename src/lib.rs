//! Mamdani fuzzy inference with triangular fuzzy sets and plain-text rules.
//!
//! ```
//! use fuzzy_mamdani::{FuzzySystem, MembershipFunction};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut sys = FuzzySystem::<f64>::new(1, 1)?;
//!
//! sys.define_input(0, "input", 3)?;
//! sys.define_output(0, "output", 3)?;
//!
//! for (i, name, top) in [(0, "negative", -1.), (1, "zero", 0.), (2, "positive", 1.)] {
//!     sys.set_input_fcn(0, i, MembershipFunction::new(name, top - 1., top, top + 1.)?)?;
//!     sys.set_output_fcn(0, i, MembershipFunction::new(name, top - 1., top, top + 1.)?)?;
//! }
//!
//! sys.add_rule("if input is negative then output is positive")?;
//! sys.add_rule("if input is zero then output is zero")?;
//! sys.add_rule("if input is positive then output is negative")?;
//!
//! sys.set_input(0, -1.)?;
//! sys.calculate_output()?;
//!
//! assert!((sys.output(0)? - 1.).abs() < 1e-6);
//! # Ok(())
//! # }
//! ```
//!
//! Rules read `if <input> is <set> and ... then <output> is <set>`. Each
//! evaluation cycle fuzzifies every input, fires the rules whose premises all
//! match (strength = min of the premise degrees), clips each concluded set to
//! its rule's strength, aggregates with max and takes the center of gravity.

mod config;
mod defuzzify;
mod display;
mod error;
mod fuzzify;
mod inference;
mod inputs;
mod membership;
mod ops;
mod outputs;
mod parser;
mod rules;
mod sampling;
mod system;
mod variable;

pub use config::Limits;
pub use defuzzify::{aggregated_membership, defuzzify};
pub use display::VariableDisplay;
pub use error::{ConfigError, Error, Expected, NameKind, Result, RuleError, Side};
pub use fuzzify::{fuzzify, fuzzify_into, Fuzzified};
pub use inference::{evaluate, infer, Firing, Inferred};
pub use inputs::Inputs;
pub use membership::MembershipFunction;
pub use outputs::Outputs;
pub use parser::{parse, Clause, ParsedRule};
pub use rules::Rules;
pub use system::FuzzySystem;
pub use variable::LinguisticVariable;

#[test]
fn test_system_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<FuzzySystem<f64>>();
    assert_send_sync::<FuzzySystem<f32>>();
}
