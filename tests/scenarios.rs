//! End-to-end optimizer scenarios.

use std::convert::Infallible;
use u_moo::evaluate::{infallible, EvaluationResult, Evaluator, FnEvaluator};
use u_moo::nsga2::{Nsga2Config, Nsga2Runner, RunRequest};
use u_moo::pareto::{constrained_non_dominated_sort, dominates, Direction};
use u_moo::sampling::SamplingMethod;
use u_moo::space::{DesignSpace, DesignVector, ParamKind, Parameter};
use u_moo::{ConfigError, RunError};

fn linear_tradeoff() -> impl Evaluator<Error = Infallible> {
    infallible(|d| {
        let x = d.as_slice()[0];
        EvaluationResult::feasible(vec![x, 1.0 - x])
    })
}

fn unit_space() -> DesignSpace {
    DesignSpace::new(vec![Parameter::continuous("x", 0.0, 1.0)]).unwrap()
}

#[test]
fn linear_tradeoff_keeps_whole_population_on_front() {
    let config = Nsga2Config::default()
        .with_population_size(50)
        .with_generations(1)
        .with_sampling(SamplingMethod::LatinHypercube)
        .with_seed(1);

    let result = Nsga2Runner::run(&unit_space(), &linear_tradeoff(), &config).unwrap();

    assert_eq!(result.history[0].front_size, 50);
    assert_eq!(result.front.len(), 50);
    assert_eq!(result.population.len(), 50);
    for a in &result.front {
        for b in &result.front {
            assert!(!dominates(a.objectives(), b.objectives(), &result.directions));
        }
    }
}

#[test]
fn infeasible_design_loses_despite_better_objectives() {
    let evals = vec![
        EvaluationResult::new(vec![5.0, 5.0], 0.0),
        EvaluationResult::new(vec![1.0, 1.0], 0.0),
        EvaluationResult::new(vec![0.0, 0.0], 2.0),
    ];
    let sorted = constrained_non_dominated_sort(&evals, &[Direction::Minimize; 2]);
    assert_eq!(sorted.fronts[0], vec![1]);
}

#[test]
fn identical_seeds_give_identical_fronts() {
    let space = DesignSpace::new(vec![
        Parameter::continuous("a", -2.0, 2.0),
        Parameter::continuous("b", 0.5, 4.0),
        Parameter::integer("k", 1, 8),
    ])
    .unwrap();
    let eval = infallible(|d| {
        let v = d.as_slice();
        let f1 = v[0] * v[0] + v[1];
        let f2 = (v[0] - 1.0).powi(2) + v[2] / v[1];
        EvaluationResult::new(vec![f1, f2], (1.0 - v[1]).max(0.0))
    });
    let config = Nsga2Config::default()
        .with_population_size(30)
        .with_generations(8)
        .with_seed(2024);

    let first = Nsga2Runner::run(&space, &eval, &config).unwrap();
    let second = Nsga2Runner::run(&space, &eval, &config).unwrap();

    assert_eq!(first.front, second.front);
    assert_eq!(first.history, second.history);
    let bits = |r: &u_moo::nsga2::Nsga2Result| -> Vec<u64> {
        r.front
            .iter()
            .flat_map(|i| i.design.as_slice().iter().chain(i.objectives()))
            .map(|v| v.to_bits())
            .collect()
    };
    assert_eq!(bits(&first), bits(&second));
}

#[test]
fn different_seeds_explore_differently() {
    let config = Nsga2Config::default().with_population_size(20).with_generations(2);
    let a = Nsga2Runner::run(&unit_space(), &linear_tradeoff(), &config.clone().with_seed(1)).unwrap();
    let b = Nsga2Runner::run(&unit_space(), &linear_tradeoff(), &config.with_seed(2)).unwrap();
    assert_ne!(a.population, b.population);
}

#[test]
fn random_seed_is_reported_and_replayable() {
    let config = Nsga2Config::default().with_population_size(12).with_generations(2);
    let first = Nsga2Runner::run(&unit_space(), &linear_tradeoff(), &config).unwrap();
    let replay = Nsga2Runner::run(
        &unit_space(),
        &linear_tradeoff(),
        &config.with_seed(first.seed),
    )
    .unwrap();
    assert_eq!(first.population, replay.population);
}

#[test]
fn non_finite_objectives_do_not_crash_the_loop() {
    let eval = infallible(|d| {
        let x = d.as_slice()[0];
        if x > 0.7 {
            EvaluationResult::feasible(vec![f64::NAN, f64::INFINITY])
        } else {
            EvaluationResult::feasible(vec![x, 1.0 - x])
        }
    });
    let config = Nsga2Config::default()
        .with_population_size(30)
        .with_generations(5)
        .with_seed(9);

    let result = Nsga2Runner::run(&unit_space(), &eval, &config).unwrap();

    assert!(result.degenerate_evaluations > 0);
    assert!(result.front.iter().all(|i| !i.degenerate && i.is_feasible()));
}

#[derive(Debug, thiserror::Error)]
#[error("thermal model failed to converge at x = {0}")]
struct ThermalError(f64);

#[test]
fn evaluator_error_reaches_caller_verbatim() {
    let eval = FnEvaluator::new(|d: &DesignVector| {
        let x = d.as_slice()[0];
        if x < 0.1 {
            Err(ThermalError(x))
        } else {
            Ok(EvaluationResult::feasible(vec![x]))
        }
    });
    let config = Nsga2Config::default().with_population_size(20).with_seed(3);

    let err = Nsga2Runner::run(&unit_space(), &eval, &config).unwrap_err();

    let inner = err.evaluation().expect("evaluation error");
    assert!(inner.0 < 0.1);
    let source = std::error::Error::source(&err).expect("source is set");
    assert!(source.to_string().starts_with("thermal model failed"));
}

#[test]
fn empty_population_returns_empty_result() {
    let config = Nsga2Config::default().with_population_size(0).with_seed(1);
    let result = Nsga2Runner::run(&unit_space(), &linear_tradeoff(), &config).unwrap();
    assert!(result.front.is_empty());
    assert!(result.population.is_empty());
    assert_eq!(result.evaluations, 0);

    let top = RunRequest::new(unit_space())
        .with_samples(0)
        .execute(&linear_tradeoff())
        .unwrap();
    assert!(top.is_empty());
}

#[test]
fn invalid_design_space_fails_fast() {
    let err = DesignSpace::new(vec![Parameter::continuous("throat_radius", 0.05, 0.05)]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBounds { .. }));

    let no_whole_number = Parameter {
        name: "injector_rings".into(),
        kind: ParamKind::Integer,
        low: 0.2,
        high: 0.8,
    };
    let err = DesignSpace::new(vec![no_whole_number]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBounds { .. }));
}

#[test]
fn negative_infinite_violation_is_degenerate() {
    let eval = infallible(|d| {
        let x = d.as_slice()[0];
        let violation = if x > 0.5 { f64::NEG_INFINITY } else { 0.0 };
        EvaluationResult::new(vec![x, 1.0 - x], violation)
    });
    let config = Nsga2Config::default()
        .with_population_size(20)
        .with_generations(0)
        .with_seed(4);

    let result = Nsga2Runner::run(&unit_space(), &eval, &config).unwrap();

    assert_eq!(result.degenerate_evaluations, 10);
    for ind in &result.population {
        assert_eq!(ind.is_feasible(), ind.design.as_slice()[0] <= 0.5);
    }
}

#[test]
fn negative_request_counts_fail_fast() {
    let err = RunRequest::new(unit_space())
        .with_generations(-1)
        .execute(&linear_tradeoff())
        .unwrap_err();
    assert!(matches!(
        err,
        RunError::Config(ConfigError::NegativeCount { field: "generations", value: -1 })
    ));
}

#[test]
fn request_returns_ranked_top_k() {
    let space = DesignSpace::new(vec![
        Parameter::continuous("pc_mpa", 5.0, 20.0),
        Parameter::continuous("expansion_ratio", 10.0, 80.0),
    ])
    .unwrap();
    let eval = infallible(|d| {
        let v = d.as_slice();
        let isp = 250.0 + 3.0 * v[0].ln() + 20.0 * v[1].ln();
        let mass = 0.5 * v[0] + 0.2 * v[1];
        EvaluationResult::new(vec![isp, mass], (mass - 18.0).max(0.0)).with_raw("isp_s", isp)
    });

    let top = RunRequest::new(space)
        .with_samples(40)
        .with_generations(10)
        .with_seed(123)
        .with_topk(5)
        .with_directions(vec![Direction::Maximize, Direction::Minimize])
        .execute(&eval)
        .unwrap();

    assert_eq!(top.len(), 5);
    assert!(top.iter().all(|c| c.feasible));
    assert!(top.windows(2).all(|w| w[0].objectives[0] >= w[1].objectives[0]));
    assert!(top.iter().all(|c| c.raw.contains_key("isp_s")));
}

#[test]
fn pinned_parameter_survives_the_run() {
    let space = DesignSpace::new(vec![
        Parameter::continuous("bypass_ratio", 0.2, 2.0),
        Parameter::continuous("flight_mach", 0.0, 3.2),
        Parameter::continuous("altitude_km", 0.0, 25.0),
    ])
    .unwrap()
    .pin("flight_mach", 2.5)
    .unwrap()
    .pin("altitude_km", 18.0)
    .unwrap();
    let eval = infallible(|d| {
        let v = d.as_slice();
        EvaluationResult::feasible(vec![v[0], 2.0 / v[0] + v[1]])
    });
    let config = Nsga2Config::default()
        .with_population_size(16)
        .with_generations(4)
        .with_seed(5);

    let result = Nsga2Runner::run(&space, &eval, &config).unwrap();

    for ind in &result.population {
        assert_eq!(ind.design.get(&space, "flight_mach"), Some(2.5));
        assert_eq!(ind.design.get(&space, "altitude_km"), Some(18.0));
    }
}
