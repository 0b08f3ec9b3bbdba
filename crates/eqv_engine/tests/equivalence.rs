//! End-to-end equivalence scenarios through the full decision policy.

use eqv_ast::builder::*;
use eqv_ast::{NodeSeq, OperatorKind::*};
use eqv_engine::fallback::AlgebraEngine;
use eqv_engine::{CheckConfig, Checker, EqvError, Method};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Engine double that records calls and answers from a fixed script.
/// With `echo_simplify`, `simplify` returns its input unchanged, which
/// models an engine whose normal forms keep distinct sides distinct.
struct Scripted {
    zero_answer: Option<bool>,
    simplify_answer: Option<&'static str>,
    echo_simplify: bool,
    calls: AtomicUsize,
}

impl Scripted {
    fn unreachable_engine() -> Arc<Self> {
        Arc::new(Scripted {
            zero_answer: None,
            simplify_answer: None,
            echo_simplify: false,
            calls: AtomicUsize::new(0),
        })
    }

    fn zero(answer: bool) -> Arc<Self> {
        Arc::new(Scripted {
            zero_answer: Some(answer),
            simplify_answer: None,
            echo_simplify: false,
            calls: AtomicUsize::new(0),
        })
    }

    fn distinguishing() -> Arc<Self> {
        Arc::new(Scripted {
            zero_answer: Some(false),
            simplify_answer: None,
            echo_simplify: true,
            calls: AtomicUsize::new(0),
        })
    }
}

impl AlgebraEngine for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    fn is_zero(&self, _expr: &str) -> Result<bool, EqvError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.zero_answer
            .ok_or_else(|| EqvError::Engine("no scripted iszero answer".into()))
    }

    fn simplify(&self, expr: &str) -> Result<String, EqvError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.echo_simplify {
            return Ok(expr.to_string());
        }
        self.simplify_answer
            .map(str::to_string)
            .ok_or_else(|| EqvError::Engine("no scripted simplify answer".into()))
    }
}

struct Sleepy;

impl AlgebraEngine for Sleepy {
    fn name(&self) -> &str {
        "sleepy"
    }
    fn is_zero(&self, _expr: &str) -> Result<bool, EqvError> {
        thread::sleep(Duration::from_secs(10));
        Ok(true)
    }
    fn simplify(&self, _expr: &str) -> Result<String, EqvError> {
        thread::sleep(Duration::from_secs(10));
        Ok("0".into())
    }
}

fn binomial_expanded() -> NodeSeq {
    // x^2 + 4x + 4, with the product left implicit as a parser would
    seq([
        pow(seq([sym("x")]), seq([num(2.0)])),
        op(Add),
        num(4.0),
        sym("x"),
        op(Add),
        num(4.0),
    ])
}

fn binomial_square() -> NodeSeq {
    // (x + 2)^2
    seq([pow(
        seq([group(seq([sym("x"), op(Add), num(2.0)]))]),
        seq([num(2.0)]),
    )])
}

#[test]
fn binomial_square_is_equivalent_by_canonicalization() {
    let engine = Scripted::unreachable_engine();
    let checker = Checker::new(Arc::clone(&engine) as Arc<dyn AlgebraEngine>);
    let result = checker
        .check(&binomial_expanded(), &binomial_square(), &CheckConfig::default())
        .unwrap();
    assert!(result.equivalent);
    assert_eq!(result.method, Method::Canonicalization);
    assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn sign_flipped_binomial_is_not_confused() {
    // x^2 + 4x + 4 vs (x - 2)^2: canonical forms differ, a non-zero
    // difference alone is not a verdict, and the simplified sides stay
    // distinct
    let engine = Scripted::distinguishing();
    let checker = Checker::new(Arc::clone(&engine) as Arc<dyn AlgebraEngine>);
    let rhs = seq([pow(
        seq([group(seq([sym("x"), op(Sub), num(2.0)]))]),
        seq([num(2.0)]),
    )]);
    let result = checker
        .check(&binomial_expanded(), &rhs, &CheckConfig::default())
        .unwrap();
    assert!(!result.equivalent);
    assert_eq!(result.method, Method::FallbackSimplify);
    // one difference query plus one simplify query per side
    assert_eq!(engine.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn difference_only_exits_positively() {
    // sin(x)^2 + cos(x)^2 vs 1 with an engine that cannot cancel the
    // difference but simplifies both sides to the same form
    let engine = Arc::new(Scripted {
        zero_answer: Some(false),
        simplify_answer: Some("1"),
        echo_simplify: false,
        calls: AtomicUsize::new(0),
    });
    let checker = Checker::new(engine as Arc<dyn AlgebraEngine>);
    let lhs = seq([
        pow(seq(call("sin", seq([sym("x")]))), seq([num(2.0)])),
        op(Add),
        pow(seq(call("cos", seq([sym("x")]))), seq([num(2.0)])),
    ]);
    let result = checker
        .check(&lhs, &seq([num(1.0)]), &CheckConfig::default())
        .unwrap();
    assert!(result.equivalent);
    assert_eq!(result.method, Method::FallbackSimplify);
}

#[test]
fn negated_denominator_matches_negated_fraction() {
    let engine = Scripted::unreachable_engine();
    let checker = Checker::new(engine as Arc<dyn AlgebraEngine>);
    let lhs = seq([frac(seq([sym("x")]), seq([neg(), num(2.0)]))]);
    let rhs = seq([neg(), group(seq([frac(seq([sym("x")]), seq([num(2.0)]))]))]);
    let result = checker.check(&lhs, &rhs, &CheckConfig::default()).unwrap();
    assert!(result.equivalent);
    assert_eq!(result.method, Method::Canonicalization);
}

#[test]
fn cancelling_terms_equal_literal_zero() {
    let engine = Scripted::unreachable_engine();
    let checker = Checker::new(engine as Arc<dyn AlgebraEngine>);
    let lhs = seq([num(3.0), sym("x"), op(Sub), num(3.0), op(Mul), sym("x")]);
    let rhs = seq([num(0.0)]);
    let result = checker.check(&lhs, &rhs, &CheckConfig::default()).unwrap();
    assert!(result.equivalent);
    assert_eq!(result.method, Method::Canonicalization);
}

#[test]
fn pythagorean_identity_needs_the_fallback() {
    // sin(x)^2 + cos(x)^2 vs 1: no rewrite rule knows this identity
    let engine = Scripted::zero(true);
    let checker = Checker::new(engine as Arc<dyn AlgebraEngine>);
    let mut sin_sq = vec![pow(seq(call("sin", seq([sym("x")]))), seq([num(2.0)]))];
    sin_sq.push(op(Add));
    sin_sq.push(pow(seq(call("cos", seq([sym("x")]))), seq([num(2.0)])));
    let lhs = seq(sin_sq);
    let rhs = seq([num(1.0)]);
    let result = checker.check(&lhs, &rhs, &CheckConfig::default()).unwrap();
    assert!(result.equivalent);
    assert_eq!(result.method, Method::FallbackDifference);
}

#[test]
fn division_by_zero_is_never_decided_by_rewriting() {
    let engine = Scripted::distinguishing();
    let checker = Checker::new(Arc::clone(&engine) as Arc<dyn AlgebraEngine>);
    let lhs = seq([num(10.0), op(Div), num(0.0)]);
    let rhs = seq([num(0.0)]);
    let result = checker.check(&lhs, &rhs, &CheckConfig::default()).unwrap();
    assert!(!result.equivalent);
    assert_eq!(result.method, Method::FallbackSimplify);
    assert!(engine.calls.load(Ordering::SeqCst) > 0);
}

#[test]
fn eastern_names_unify_under_the_east_rule_set() {
    let tg = seq(call("tg", seq([sym("x")])));
    let tan = seq(call("tan", seq([sym("x")])));

    let engine = Scripted::unreachable_engine();
    let checker = Checker::new(engine as Arc<dyn AlgebraEngine>);
    let east = CheckConfig {
        rule_set_region: Some("east".into()),
        ..CheckConfig::default()
    };
    let result = checker.check(&tg, &tan, &east).unwrap();
    assert!(result.equivalent);
    assert_eq!(result.method, Method::Canonicalization);
}

#[test]
fn unknown_region_fails_before_any_work() {
    let engine = Scripted::unreachable_engine();
    let checker = Checker::new(Arc::clone(&engine) as Arc<dyn AlgebraEngine>);
    let config = CheckConfig {
        rule_set_region: Some("nowhere".into()),
        ..CheckConfig::default()
    };
    let result = checker.check(&seq([sym("x")]), &seq([sym("x")]), &config);
    assert!(matches!(result, Err(EqvError::UnknownRegion(region)) if region == "nowhere"));
    assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn forced_fallback_consults_the_engine_even_for_identical_input() {
    let engine = Scripted::zero(true);
    let checker = Checker::new(Arc::clone(&engine) as Arc<dyn AlgebraEngine>);
    let config = CheckConfig {
        force_fallback: true,
        ..CheckConfig::default()
    };
    let result = checker
        .check(&seq([sym("x")]), &seq([sym("x")]), &config)
        .unwrap();
    assert!(result.equivalent);
    assert!(result.forced);
    assert_eq!(result.method, Method::FallbackDifference);
    assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn hung_engine_resolves_as_error_within_the_budget() {
    let checker = Checker::new(Arc::new(Sleepy) as Arc<dyn AlgebraEngine>);
    let config = CheckConfig {
        fallback_timeout_ms: 100,
        ..CheckConfig::default()
    };
    let started = std::time::Instant::now();
    let result = checker
        .check(
            &seq(call("sin", seq([sym("x")]))),
            &seq(call("cos", seq([sym("x")]))),
            &config,
        )
        .unwrap();
    // one difference attempt plus two simplify attempts, 100 ms each
    assert!(started.elapsed() < Duration::from_secs(3));
    assert!(!result.equivalent);
    assert_eq!(result.method, Method::Error);
    assert!(!result.forced);
}

#[test]
fn checks_are_independent_across_threads() {
    let engine = Scripted::zero(true);
    let checker = Arc::new(Checker::new(engine as Arc<dyn AlgebraEngine>));
    let mut handles = Vec::new();
    for i in 0..8 {
        let checker = Arc::clone(&checker);
        handles.push(thread::spawn(move || {
            let lhs = seq([sym("x"), op(Add), num(i as f64)]);
            let rhs = seq([num(i as f64), op(Add), sym("x")]);
            let result = checker.check(&lhs, &rhs, &CheckConfig::default()).unwrap();
            assert!(result.equivalent);
            assert_eq!(result.method, Method::Canonicalization);
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn debug_trace_reconstructs_the_rewrite_path() {
    let engine = Scripted::unreachable_engine();
    let checker = Checker::new(engine as Arc<dyn AlgebraEngine>);
    let config = CheckConfig {
        debug: true,
        ..CheckConfig::default()
    };
    let result = checker
        .check(&binomial_expanded(), &binomial_square(), &config)
        .unwrap();
    assert!(result.equivalent);
    assert!(result
        .steps
        .iter()
        .any(|s| s.rule == "Binomial Square Expansion"));
    assert!(result.steps.iter().any(|s| s.rule == "Fold Constants"));
}
