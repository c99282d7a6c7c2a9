//! Demonstrates the library on a car following another vehicle.
//!
//! Distance and speed go in, throttle and brake come out. With `--sweeps` it
//! also runs three small sweep demos over simpler systems.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fuzzy_mamdani::{Error, FuzzySystem, MembershipFunction};

#[derive(Parser)]
#[command(name = "fzz-demo")]
#[command(about = "Mamdani fuzzy controller demo", long_about = None)]
struct Cli {
    /// Distance to the vehicle ahead
    #[arg(long, default_value_t = 0.2)]
    distance: f64,

    /// Own speed
    #[arg(long, default_value_t = 1.25)]
    speed: f64,

    /// Print the configured system before evaluating it
    #[arg(short, long)]
    print: bool,

    /// Also run the one-input, two-output and two-input sweeps
    #[arg(long)]
    sweeps: bool,
}

fn main() -> Result<()> {
    // RUST_LOG=fuzzy_mamdani=trace shows every fuzzified set and fired rule
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let mut sys = follower().context("building the follower system")?;

    if cli.print {
        println!("{sys}");
        println!("{}", sys.input_display(1).context("speed input")?);
        println!("{}", sys.output_display(0).context("throttle output")?);
    }

    sys.set_input(0, cli.distance)?;
    sys.set_input(1, cli.speed)?;
    sys.calculate_output()?;

    println!("distance {:+.3}, speed {:+.3}", cli.distance, cli.speed);
    for (i, var) in sys.output_variables().iter().enumerate() {
        println!("{:>8}: {}", var.name(), show(sys.output(i)));
    }

    if cli.sweeps {
        one_to_one()?;
        one_to_two()?;
        two_to_one()?;
    }

    Ok(())
}

fn show(value: fuzzy_mamdani::Result<f64>) -> String {
    match value {
        Ok(v) => format!("{v:+.6}"),
        Err(Error::NoRuleFired { .. }) => "no rule fired".to_owned(),
        Err(e) => e.to_string(),
    }
}

fn mf(name: &str, left: f64, top: f64, right: f64) -> Result<MembershipFunction> {
    Ok(MembershipFunction::new(name, left, top, right)?)
}

fn follower() -> Result<FuzzySystem> {
    let mut sys = FuzzySystem::new(2, 2)?;

    sys.define_input(0, "distance", 3)?;
    sys.define_input(1, "speed", 3)?;
    sys.define_output(0, "throttle", 5)?;
    sys.define_output(1, "brake", 3)?;

    sys.set_input_fcn(0, 0, mf("small", -0.5, 0., 0.5)?)?;
    sys.set_input_fcn(0, 1, mf("medium", 0., 0.5, 1.)?)?;
    sys.set_input_fcn(0, 2, mf("big", 0.5, 1., 1.5)?)?;
    sys.set_input_fcn(1, 0, mf("slow", -1., 0., 1.)?)?;
    sys.set_input_fcn(1, 1, mf("medium", 0., 1., 2.)?)?;
    sys.set_input_fcn(1, 2, mf("fast", 1., 2., 3.)?)?;

    sys.set_output_fcn(0, 0, mf("negativeBig", -1.5, -1., -0.5)?)?;
    sys.set_output_fcn(0, 1, mf("negative", -1., -0.5, 0.)?)?;
    sys.set_output_fcn(0, 2, mf("zero", -0.5, 0., 0.5)?)?;
    sys.set_output_fcn(0, 3, mf("positive", 0., 0.5, 1.)?)?;
    sys.set_output_fcn(0, 4, mf("positiveBig", 0.5, 1., 1.5)?)?;
    sys.set_output_fcn(1, 0, mf("none", -0.5, 0., 0.5)?)?;
    sys.set_output_fcn(1, 1, mf("light", 0., 0.5, 1.)?)?;
    sys.set_output_fcn(1, 2, mf("hard", 0.5, 1., 1.5)?)?;

    let throttle = [
        ["zero", "negative", "negativeBig"],
        ["positive", "zero", "negative"],
        ["positiveBig", "positive", "zero"],
    ];
    let brake = [["light", "hard", "hard"], ["none", "light", "hard"], ["none", "none", "light"]];

    for (output, table) in [("throttle", throttle), ("brake", brake)] {
        for (distance, row) in ["small", "medium", "big"].into_iter().zip(table) {
            for (speed, set) in ["slow", "medium", "fast"].into_iter().zip(row) {
                sys.add_rule(format!(
                    "if distance is {distance} and speed is {speed} then {output} is {set}"
                ))?;
            }
        }
    }

    sys.check_rules()?;

    Ok(sys)
}

/// negative, zero, positive over [-2, 2] scaled by `scale`.
fn signs(sys: &mut FuzzySystem, input: Option<usize>, output: Option<usize>, scale: f64) -> Result<()> {
    for (i, (name, top)) in [("negative", -1.), ("zero", 0.), ("positive", 1.)].into_iter().enumerate() {
        let set = mf(name, (top - 1.) * scale, top * scale, (top + 1.) * scale)?;

        if let Some(input) = input {
            sys.set_input_fcn(input, i, set.clone())?;
        }
        if let Some(output) = output {
            sys.set_output_fcn(output, i, set)?;
        }
    }

    Ok(())
}

fn sweep(from: f64, to: f64, step: f64) -> impl Iterator<Item = f64> {
    let n = ((to - from) / step).round() as usize;

    (0..=n).map(move |i| from + step * i as f64)
}

fn one_to_one() -> Result<()> {
    let mut sys = FuzzySystem::new(1, 1)?;

    sys.define_input(0, "input", 3)?;
    sys.define_output(0, "output", 3)?;
    signs(&mut sys, Some(0), Some(0), 1.)?;
    sys.add_rule("if input is negative then output is positive")?;
    sys.add_rule("if input is zero then output is zero")?;
    sys.add_rule("if input is positive then output is negative")?;

    println!("\n{sys}\nCalculated outputs:");
    for x in sweep(-1., 1., 0.1) {
        sys.set_input(0, x)?;
        sys.calculate_output()?;
        println!("{x:+.6} => {}", show(sys.output(0)));
    }

    Ok(())
}

fn one_to_two() -> Result<()> {
    let mut sys = FuzzySystem::new(1, 2)?;

    sys.define_input(0, "input", 3)?;
    sys.define_output(0, "output1", 3)?;
    sys.define_output(1, "output2", 3)?;
    signs(&mut sys, Some(0), Some(0), 1.)?;
    signs(&mut sys, None, Some(1), 2.)?;
    sys.add_rule("if input is negative then output1 is positive")?;
    sys.add_rule("if input is zero then output1 is zero")?;
    sys.add_rule("if input is positive then output1 is negative")?;
    sys.add_rule("if input is negative then output2 is negative")?;
    sys.add_rule("if input is zero then output2 is negative")?;
    sys.add_rule("if input is positive then output2 is positive")?;

    println!("\n{sys}\nCalculated outputs:");
    for x in sweep(-1., 1., 0.1) {
        sys.set_input(0, x)?;
        sys.calculate_output()?;
        println!("{x:+.6} => {} {}", show(sys.output(0)), show(sys.output(1)));
    }

    Ok(())
}

fn two_to_one() -> Result<()> {
    let mut sys = FuzzySystem::new(2, 1)?;
    let names = ["negative", "zero", "positive"];
    let table = [
        ["negative", "negative", "zero"],
        ["negative", "zero", "positive"],
        ["zero", "positive", "positive"],
    ];

    sys.define_input(0, "input1", 3)?;
    sys.define_input(1, "input2", 3)?;
    sys.define_output(0, "output", 3)?;
    signs(&mut sys, Some(0), Some(0), 1.)?;
    signs(&mut sys, Some(1), None, 1.)?;

    for (a, row) in names.into_iter().zip(table) {
        for (b, set) in names.into_iter().zip(row) {
            sys.add_rule(format!("if input1 is {a} and input2 is {b} then output is {set}"))?;
        }
    }

    println!("\n{sys}\nCalculated outputs:");
    print!(" x1\\x2 |");
    for x2 in sweep(-1., 1., 0.25) {
        print!(" {x2:+.2} |");
    }
    println!("\n{}", "-".repeat(80));

    for x1 in sweep(-1., 1., 0.25) {
        print!(" {x1:+.2} |");
        for x2 in sweep(-1., 1., 0.25) {
            sys.set_input(0, x1)?;
            sys.set_input(1, x2)?;
            sys.calculate_output()?;

            match sys.output(0) {
                Ok(y) => print!(" {y:+.2} |"),
                Err(_) => print!("   --  |"),
            }
        }
        println!();
    }
    println!("{}", "-".repeat(80));

    Ok(())
}
