//! Tests for the JSON training configuration layer.

mod common;

use common::Quadratic;
use ndarray::array;
use stograd::optim::LearnRate;
use stograd::{learn, LearnConfig, Objective, OptError, StopReason, UpdateRule};

#[test]
fn parses_a_minimal_config() {
    let cfg = LearnConfig::from_json(r#"{ "algorithm": "sgd", "lr": 0.1 }"#).unwrap();
    assert_eq!(cfg.algorithm, "sgd");
    assert_eq!(cfg.lr_policy(), LearnRate::Fixed(0.1));
    assert!(cfg.maxiter.is_none());
}

#[test]
fn omitted_lr_falls_back_to_default() {
    let cfg = LearnConfig::from_json(r#"{ "algorithm": "adam" }"#).unwrap();
    assert_eq!(cfg.lr_policy(), LearnRate::Fixed(0.01));
}

#[test]
fn lr_policy_wins_over_fixed_lr() {
    let cfg = LearnConfig::from_json(
        r#"{
            "algorithm": "sgd",
            "lr": 0.5,
            "lr_policy": { "step_decay": { "base": 0.4, "every": 10, "gamma": 0.5 } }
        }"#,
    )
    .unwrap();
    assert_eq!(
        cfg.lr_policy(),
        LearnRate::StepDecay {
            base: 0.4,
            every: 10,
            gamma: 0.5
        }
    );
}

#[test]
fn every_algorithm_name_builds() {
    for name in ["sgd", "adagrad", "adadelta", "adam", "adamax", "rmsprop"] {
        let cfg = LearnConfig::from_json(&format!(r#"{{ "algorithm": "{}" }}"#, name)).unwrap();
        let rule = cfg.build_rule().unwrap();
        assert_eq!(rule.name(), name);
    }
}

#[test]
fn unknown_algorithm_is_a_config_error() {
    let cfg = LearnConfig::from_json(r#"{ "algorithm": "newton" }"#).unwrap();
    assert!(matches!(cfg.build_rule(), Err(OptError::Config(_))));
}

#[test]
fn malformed_json_is_a_config_error() {
    assert!(matches!(
        LearnConfig::from_json("{ not json"),
        Err(OptError::Config(_))
    ));
}

#[test]
fn built_learner_trains_end_to_end() {
    let cfg = LearnConfig::from_json(
        r#"{ "algorithm": "sgd", "lr": 0.1, "maxiter": 300 }"#,
    )
    .unwrap();
    let mut learner = cfg.build::<Quadratic>().unwrap();

    let mut obj = Quadratic::new(array![1.5, -0.5], array![0.5, 0.5]);
    let reason = learn(&mut obj, &mut learner, std::iter::repeat(())).unwrap();
    assert_eq!(reason, StopReason::CriterionMet);
    assert!(obj.value() < 1e-4);
}

#[test]
fn hyperparameter_overrides_reach_the_rule() {
    // An absurd eps makes the first Adagrad step visibly smaller than the
    // default-built one would take.
    let cfg =
        LearnConfig::from_json(r#"{ "algorithm": "adagrad", "lr": 0.1, "eps": 100.0 }"#).unwrap();
    let mut rule = cfg.build_rule().unwrap();
    let delta = rule
        .delta(&array![0.0], &array![3.0], 0.1)
        .unwrap();
    // -0.1 * 3 / (3 + 100)
    assert!((delta[0] + 0.3 / 103.0).abs() < 1e-9);
}
