use approx::assert_abs_diff_eq;
use fuzzy_mamdani::{ConfigError, Error, FuzzySystem, Limits, MembershipFunction, NameKind, RuleError, Side};

fn mf(name: &str, left: f64, top: f64, right: f64) -> MembershipFunction {
    MembershipFunction::new(name, left, top, right).unwrap()
}

fn inverter() -> FuzzySystem {
    let mut sys = FuzzySystem::new(1, 1).unwrap();

    sys.define_input(0, "input", 3).unwrap();
    sys.define_output(0, "output", 3).unwrap();
    sys.set_input_fcn(0, 0, mf("negative", -2., -1., 0.)).unwrap();
    sys.set_input_fcn(0, 1, mf("zero", -1., 0., 1.)).unwrap();
    sys.set_input_fcn(0, 2, mf("positive", 0., 1., 2.)).unwrap();
    sys.set_output_fcn(0, 0, mf("negative", -2., -1., 0.)).unwrap();
    sys.set_output_fcn(0, 1, mf("zero", -1., 0., 1.)).unwrap();
    sys.set_output_fcn(0, 2, mf("positive", 0., 1., 2.)).unwrap();
    sys.add_rule("if input is negative then output is positive").unwrap();
    sys.add_rule("if input is zero then output is zero").unwrap();
    sys.add_rule("if input is positive then output is negative").unwrap();
    sys
}

fn follower() -> FuzzySystem {
    let mut sys = FuzzySystem::new(2, 2).unwrap();

    sys.define_input(0, "distance", 3).unwrap();
    sys.define_input(1, "speed", 3).unwrap();
    sys.define_output(0, "throttle", 5).unwrap();
    sys.define_output(1, "brake", 3).unwrap();

    sys.set_input_fcn(0, 0, mf("small", -0.5, 0., 0.5)).unwrap();
    sys.set_input_fcn(0, 1, mf("medium", 0., 0.5, 1.)).unwrap();
    sys.set_input_fcn(0, 2, mf("big", 0.5, 1., 1.5)).unwrap();
    sys.set_input_fcn(1, 0, mf("slow", -1., 0., 1.)).unwrap();
    sys.set_input_fcn(1, 1, mf("medium", 0., 1., 2.)).unwrap();
    sys.set_input_fcn(1, 2, mf("fast", 1., 2., 3.)).unwrap();

    sys.set_output_fcn(0, 0, mf("negativeBig", -1.5, -1., -0.5)).unwrap();
    sys.set_output_fcn(0, 1, mf("negative", -1., -0.5, 0.)).unwrap();
    sys.set_output_fcn(0, 2, mf("zero", -0.5, 0., 0.5)).unwrap();
    sys.set_output_fcn(0, 3, mf("positive", 0., 0.5, 1.)).unwrap();
    sys.set_output_fcn(0, 4, mf("positiveBig", 0.5, 1., 1.5)).unwrap();
    sys.set_output_fcn(1, 0, mf("none", -0.5, 0., 0.5)).unwrap();
    sys.set_output_fcn(1, 1, mf("light", 0., 0.5, 1.)).unwrap();
    sys.set_output_fcn(1, 2, mf("hard", 0.5, 1., 1.5)).unwrap();

    for rule in [
        "if distance is small and speed is slow then throttle is zero",
        "if distance is small and speed is medium then throttle is negative",
        "if distance is small and speed is fast then throttle is negativeBig",
        "if distance is medium and speed is slow then throttle is positive",
        "if distance is medium and speed is medium then throttle is zero",
        "if distance is medium and speed is fast then throttle is negative",
        "if distance is big and speed is slow then throttle is positiveBig",
        "if distance is big and speed is medium then throttle is positive",
        "if distance is big and speed is fast then throttle is zero",
        "if distance is small and speed is slow then brake is light",
        "if distance is small and speed is medium then brake is hard",
        "if distance is small and speed is fast then brake is hard",
        "if distance is medium and speed is slow then brake is none",
        "if distance is medium and speed is medium then brake is light",
        "if distance is medium and speed is fast then brake is hard",
        "if distance is big and speed is slow then brake is none",
        "if distance is big and speed is medium then brake is none",
        "if distance is big and speed is fast then brake is light",
    ] {
        sys.add_rule(rule).unwrap();
    }

    sys
}

fn run(sys: &mut FuzzySystem, inputs: &[f64]) -> Vec<f64> {
    for (i, &x) in inputs.iter().enumerate() {
        sys.set_input(i, x).unwrap();
    }

    sys.calculate_output().unwrap();

    (0..sys.output_variables().len())
        .map(|i| sys.output(i).unwrap())
        .collect()
}

#[test]
fn test_inverter() {
    let mut sys = inverter();

    assert_abs_diff_eq!(run(&mut sys, &[0.])[0], 0., epsilon = 1e-9);
    assert_abs_diff_eq!(run(&mut sys, &[-1.])[0], 1., epsilon = 1e-9);
    assert_abs_diff_eq!(run(&mut sys, &[1.])[0], -1., epsilon = 1e-9);
    assert_abs_diff_eq!(run(&mut sys, &[-0.5])[0], 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(run(&mut sys, &[0.5])[0], -0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(run(&mut sys, &[0.25])[0], -0.28945595418561554, epsilon = 1e-9);
}

#[test]
fn test_follower_golden_values() {
    let mut sys = follower();

    let out = run(&mut sys, &[0.2, 1.25]);
    assert_abs_diff_eq!(out[0], -0.44080536912751694, epsilon = 1e-9);
    assert_abs_diff_eq!(out[1], 0.79032258064516059, epsilon = 1e-9);

    let out = run(&mut sys, &[0.75, 0.5]);
    assert_abs_diff_eq!(out[0], 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(out[1], 0.25, epsilon = 1e-9);

    // Both inputs sit on set boundaries, only "big and fast" fires
    let out = run(&mut sys, &[1., 2.]);
    assert_abs_diff_eq!(out[0], 0., epsilon = 1e-9);
    assert_abs_diff_eq!(out[1], 0.5, epsilon = 1e-9);
    assert_eq!(sys.inferred(0).len(), 1);
    assert_eq!(sys.inferred(1).len(), 1);
}

#[test]
fn test_follower_inspection() {
    let mut sys = follower();

    run(&mut sys, &[0.2, 1.25]);

    assert_eq!(sys.fuzzified(0).iter().map(|f| f.set).collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(sys.fuzzified(1).iter().map(|f| f.set).collect::<Vec<_>>(), vec![1, 2]);
    // 2 x 2 active sets fire four rules per output
    assert_eq!(sys.inferred(0).len(), 4);
    assert_eq!(sys.inferred(1).len(), 4);
    assert!(sys.fuzzified(7).is_empty());
}

#[test]
fn test_calculate_twice_is_idempotent() {
    let mut sys = follower();

    let first = run(&mut sys, &[0.3, 0.8]);
    let second = run(&mut sys, &[0.3, 0.8]);

    assert_eq!(first, second);
}

#[test]
fn test_no_stale_state_between_cycles() {
    let mut fresh = follower();
    let mut used = follower();

    run(&mut used, &[1.2, 2.5]);
    run(&mut used, &[0.1, 0.1]);

    assert_eq!(run(&mut used, &[0.6, 1.7]), run(&mut fresh, &[0.6, 1.7]));
}

#[test]
fn test_no_rule_fired() {
    let mut sys = inverter();

    sys.set_input(0, 5.).unwrap();
    sys.calculate_output().unwrap();

    assert_eq!(
        sys.output(0),
        Err(Error::NoRuleFired {
            output: 0,
            name: "output".into()
        })
    );

    // Next cycle is unaffected
    assert_abs_diff_eq!(run(&mut sys, &[1.])[0], -1., epsilon = 1e-9);
}

#[test]
fn test_output_missing_before_first_cycle() {
    let sys = inverter();

    assert!(matches!(sys.output(0), Err(Error::NoRuleFired { .. })));
    assert!(matches!(
        sys.output(1),
        Err(Error::Config(ConfigError::IndexOutOfRange { what: "output", .. }))
    ));
}

#[test]
fn test_only_one_output_without_rules() {
    let mut sys = follower();

    // Drop every brake rule
    while sys.rules().len() > 9 {
        sys.remove_rule(9).unwrap();
    }

    sys.set_input(0, 0.2).unwrap();
    sys.set_input(1, 1.25).unwrap();
    sys.calculate_output().unwrap();

    assert_abs_diff_eq!(sys.output(0).unwrap(), -0.44080536912751694, epsilon = 1e-9);
    assert!(matches!(sys.output(1), Err(Error::NoRuleFired { output: 1, .. })));
}

#[test]
fn test_bad_rule_fails_cycle_and_recovers() {
    let mut sys = inverter();

    run(&mut sys, &[-1.]);

    let index = sys.add_rule("if input is huge then output is zero").unwrap();

    match sys.calculate_output() {
        Err(Error::Rule { index: i, rule, source }) => {
            assert_eq!(i, index);
            assert_eq!(rule, "if input is huge then output is zero");
            assert_eq!(
                source,
                RuleError::NameNotFound {
                    kind: NameKind::InputSet,
                    name: "huge".into()
                }
            );
        },
        other => panic!("expected rule error, got {other:?}"),
    }

    // Outputs from the previous cycle are gone
    assert!(sys.output(0).is_err());

    sys.set_rule(index, "if input is zero then output is zero").unwrap();

    assert_abs_diff_eq!(run(&mut sys, &[-1.])[0], 1., epsilon = 1e-9);
}

#[test]
fn test_rule_cache_follows_renames() {
    let mut sys = inverter();

    sys.check_rules().unwrap();
    sys.set_input_fcn(0, 2, mf("pos", 0., 1., 2.)).unwrap();

    assert!(matches!(sys.check_rules(), Err(Error::Rule { index: 2, .. })));
    assert!(sys.calculate_output().is_err());

    sys.set_rule(2, "if input is pos then output is negative").unwrap();

    assert_abs_diff_eq!(run(&mut sys, &[1.])[0], -1., epsilon = 1e-9);
}

#[test]
fn test_antecedent_order_is_irrelevant() {
    let mut a = follower();
    let mut b = follower();

    for i in 0..b.rules().len() {
        let text = b.rules().get(i).unwrap().to_owned();
        let (head, tail) = text.split_once(" then ").unwrap();
        let (first, second) = head.trim_start_matches("if ").split_once(" and ").unwrap();

        b.set_rule(i, format!("if {second} and {first} then {tail}")).unwrap();
    }

    assert_ne!(a.rules().get(0), b.rules().get(0));
    assert_eq!(run(&mut a, &[0.2, 1.25]), run(&mut b, &[0.2, 1.25]));
}

#[test]
fn test_capacity_limits() {
    assert!(matches!(
        FuzzySystem::<f64>::new(5, 1),
        Err(Error::Config(ConfigError::TooManyInputs { requested: 5, max: 4 }))
    ));
    assert!(matches!(
        FuzzySystem::<f64>::new(1, 3),
        Err(Error::Config(ConfigError::TooManyOutputs { requested: 3, max: 2 }))
    ));

    let limits = Limits::default().with_max_rules(2).with_max_sets(2).with_max_rule_len(48);
    let mut sys = FuzzySystem::<f64>::with_limits(1, 1, limits).unwrap();

    assert!(matches!(
        sys.define_input(0, "input", 3),
        Err(Error::Config(ConfigError::TooManySets { requested: 3, max: 2, .. }))
    ));
    assert!(matches!(
        sys.define_input(1, "input", 1),
        Err(Error::Config(ConfigError::IndexOutOfRange { what: "input", index: 1, len: 1 }))
    ));
    assert!(matches!(
        sys.define_output(0, "bad name", 1),
        Err(Error::Config(ConfigError::InvalidName { .. }))
    ));

    sys.add_rule("if a is b then c is d").unwrap();
    sys.add_rule("if a is b then c is e").unwrap();

    assert!(matches!(
        sys.add_rule("if a is b then c is f"),
        Err(Error::Config(ConfigError::TooManyRules { max: 2 }))
    ));
    assert!(matches!(
        sys.set_rule(0, "if input is something and input is other then out is x"),
        Err(Error::Config(ConfigError::RuleTooLong { max: 48, .. }))
    ));
    assert_eq!(sys.rules().get(0), Some("if a is b then c is d"));
    assert!(sys.set_rule(2, "x").is_err());
    assert!(sys.remove_rule(2).is_err());

    sys.clear_rules();
    assert!(sys.rules().is_empty());
}

#[test]
fn test_too_many_antecedents() {
    let limits = Limits::default().with_max_antecedents(1);
    let mut sys = FuzzySystem::<f64>::with_limits(2, 1, limits).unwrap();

    sys.define_input(0, "a", 1).unwrap();
    sys.define_input(1, "b", 1).unwrap();
    sys.define_output(0, "c", 1).unwrap();
    sys.set_input_fcn(0, 0, mf("x", 0., 1., 2.)).unwrap();
    sys.set_input_fcn(1, 0, mf("x", 0., 1., 2.)).unwrap();
    sys.set_output_fcn(0, 0, mf("x", 0., 1., 2.)).unwrap();
    sys.add_rule("if a is x then c is x").unwrap();

    assert_eq!(
        sys.add_rule("if a is x and b is x then c is x"),
        Err(Error::Config(ConfigError::TooManyAntecedents { count: 2, max: 1 }))
    );
    assert_eq!(
        sys.set_rule(0, "if a is x and b is x then c is x"),
        Err(Error::Config(ConfigError::TooManyAntecedents { count: 2, max: 1 }))
    );
    assert_eq!(sys.rules().len(), 1);
    assert_eq!(sys.rules().get(0), Some("if a is x then c is x"));

    sys.set_input(0, 1.).unwrap();
    sys.calculate_output().unwrap();
    assert_abs_diff_eq!(sys.output(0).unwrap(), 1., epsilon = 1e-9);
}

#[test]
fn test_output_sets_beyond_step_resolution() {
    let mut sys = FuzzySystem::<f32>::new(1, 1).unwrap();

    sys.define_input(0, "x", 1).unwrap();
    sys.define_output(0, "y", 2).unwrap();
    sys.set_input_fcn(0, 0, MembershipFunction::new("a", 0., 1., 2.).unwrap()).unwrap();

    // f32 spacing around 6e5 is 0.0625, a 0.02 step would never move
    let high = MembershipFunction::new("high", 600_000., 600_001., 600_002.).unwrap();

    assert!(matches!(
        sys.set_output_fcn(0, 0, high),
        Err(Error::Config(ConfigError::BeyondStepResolution { .. }))
    ));
    assert!(sys.output_variable(0).unwrap().set(0).is_none());

    // Inputs are never integrated, so the same set is fine there
    sys.set_input_fcn(0, 0, MembershipFunction::new("high", 600_000., 600_001., 600_002.).unwrap())
        .unwrap();

    let mut sys = FuzzySystem::<f64>::new(1, 1).unwrap();

    sys.define_output(0, "y", 2).unwrap();
    assert!(matches!(
        sys.set_output_fcn(0, 0, mf("far", 1e15, 1e15 + 1., 1e15 + 2.)),
        Err(Error::Config(ConfigError::BeyondStepResolution { .. }))
    ));
    assert!(matches!(
        sys.set_output_fcn(0, 1, mf("behind", -1e15 - 2., -1e15 - 1., -1e15)),
        Err(Error::Config(ConfigError::BeyondStepResolution { .. }))
    ));
    sys.set_output_fcn(0, 0, mf("near", 1e6, 1e6 + 1., 1e6 + 2.)).unwrap();
}

#[test]
fn test_duplicate_variable_names() {
    let mut sys = follower();

    assert_eq!(
        sys.define_input(1, "distance", 3),
        Err(Error::Config(ConfigError::DuplicateVariableName {
            side: Side::Input,
            name: "distance".into(),
        }))
    );
    assert_eq!(
        sys.define_output(0, "brake", 3),
        Err(Error::Config(ConfigError::DuplicateVariableName {
            side: Side::Output,
            name: "brake".into(),
        }))
    );
    assert_eq!(sys.input_variable(1).unwrap().name(), "speed");

    // Redefining a variable under its own name, or reusing an input name for an output, is fine
    sys.define_input(0, "distance", 3).unwrap();
    sys.define_output(0, "speed", 1).unwrap();
}

#[test]
fn test_nan_input_matches_no_set() {
    let mut sys = inverter();

    sys.set_input(0, f64::NAN).unwrap();
    sys.calculate_output().unwrap();

    assert!(sys.fuzzified(0).is_empty());
    assert!(sys.inferred(0).is_empty());
    assert!(matches!(sys.output(0), Err(Error::NoRuleFired { output: 0, .. })));
}

#[test]
fn test_vertical_edge_output_sets() {
    let mut sys = FuzzySystem::<f64>::new(1, 1).unwrap();

    sys.define_input(0, "x", 1).unwrap();
    sys.define_output(0, "y", 2).unwrap();
    sys.set_input_fcn(0, 0, mf("on", -1., 0., 1.)).unwrap();
    sys.set_output_fcn(0, 0, mf("drop", 0., 0., 1.)).unwrap();
    sys.set_output_fcn(0, 1, mf("climb", -1., 0., 0.)).unwrap();
    sys.add_rule("if x is on then y is drop").unwrap();
    sys.set_input(0, 0.).unwrap();
    sys.calculate_output().unwrap();

    // Discrete centroid of 1 - x sampled every 0.02 over (0, 1)
    assert_abs_diff_eq!(sys.output(0).unwrap(), 0.34, epsilon = 1e-9);

    sys.set_rule(0, "if x is on then y is climb").unwrap();
    sys.calculate_output().unwrap();

    assert_abs_diff_eq!(sys.output(0).unwrap(), -0.34, epsilon = 1e-9);
}

#[test]
fn test_lookups() {
    let sys = follower();

    assert_eq!(sys.input_index("speed"), Some(1));
    assert_eq!(sys.output_index("brake"), Some(1));
    assert_eq!(sys.output_index("Brake"), None);
    assert_eq!(sys.input_variable(0).and_then(|v| v.set_index("big")), Some(2));
    assert_eq!(
        sys.parse_rule("if speed is fast then brake is hard").map(|r| r.output_set),
        Ok(2)
    );
}

#[test]
fn test_f32_system() {
    let mut sys = FuzzySystem::<f32>::new(1, 1).unwrap();

    sys.define_input(0, "x", 1).unwrap();
    sys.define_output(0, "y", 1).unwrap();
    sys.set_input_fcn(0, 0, MembershipFunction::new("a", 0., 1., 2.).unwrap()).unwrap();
    sys.set_output_fcn(0, 0, MembershipFunction::new("b", 0., 1., 2.).unwrap()).unwrap();
    sys.add_rule("if x is a then y is b").unwrap();
    sys.set_input(0, 0.5).unwrap();
    sys.calculate_output().unwrap();

    assert!((sys.output(0).unwrap() - 1.).abs() < 1e-3);
}
