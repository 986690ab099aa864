use super::{ascending_branch, assert_curves_close, descending_branch};
use crate::{Universe, XmuContext, XmuError, XmuFunction};

fn u16() -> Universe {
    Universe::new(1.0, 6.0).unwrap()
}

fn small() -> XmuFunction {
    XmuFunction::downward_gradient(u16(), 2.0, 4.0).unwrap()
}

fn large() -> XmuFunction {
    XmuFunction::upward_gradient(u16(), 3.0, 5.0).unwrap()
}

fn medium() -> XmuFunction {
    XmuFunction::trapezoidal(u16(), 1.0, 3.0, 4.0, 6.0).unwrap()
}

#[test]
fn test_union_is_commutative() {
    let ab = small().union_x(&large()).unwrap();
    let ba = large().union_x(&small()).unwrap();
    assert_curves_close(&ab.sample(81), &ba.sample(81));
}

#[test]
fn test_union_is_idempotent() {
    let a = small();
    let aa = a.union_x(&a).unwrap();
    assert_curves_close(&aa.sample(81), &a.sample(81));
}

#[test]
fn test_union_of_disjoint_intervals_keeps_both() {
    // Small and Large separate above mu = 0.25; the union must not smear
    // into a single hull covering the gap between them
    let either = small().union_x(&large()).unwrap();
    let breakpoints = either.breakpoints();
    assert_eq!(breakpoints.len(), 1);
    assert!((breakpoints[0] - 0.25).abs() < 1e-6);

    // At mu = 0.75 the set is {2.5} union {4.5}; x = 3.5 is outside
    let curve = either.sample(81);
    let near_gap = curve
        .points
        .iter()
        .any(|p| (p.mu - 0.75).abs() < 1e-6 && (p.x - 3.5).abs() < 0.4);
    assert!(!near_gap, "union filled the gap between disjoint intervals");
}

#[test]
fn test_intersection_is_commutative() {
    let ab = small().intersect_x(&large()).unwrap();
    let ba = large().intersect_x(&small()).unwrap();
    assert_curves_close(&ab.sample(81), &ba.sample(81));
}

#[test]
fn test_intersection_is_idempotent() {
    let a = large();
    let aa = a.intersect_x(&a).unwrap();
    assert_curves_close(&aa.sample(81), &a.sample(81));
}

#[test]
fn test_intersection_narrows_the_interval() {
    // Small and Large overlap only up to mu = 0.25
    let both = small().intersect_x(&large()).unwrap();
    let asc = ascending_branch(&both);
    let desc = descending_branch(&both);
    assert!((asc.eval(0.0).unwrap() - 3.0).abs() < 1e-9);
    assert!((desc.eval(0.0).unwrap() - 4.0).abs() < 1e-9);

    let curve = both.sample(81);
    assert!(!curve.points.is_empty());
    assert!(curve.points.iter().all(|p| p.mu <= 0.25 + 1e-6));
}

#[test]
fn test_empty_intersection_samples_to_nothing() {
    let u = Universe::new(0.0, 10.0).unwrap();
    let left = XmuFunction::downward_gradient(u, 1.0, 3.0).unwrap();
    let right = XmuFunction::upward_gradient(u, 6.0, 8.0).unwrap();
    let both = left.intersect_x(&right).unwrap();
    let curve = both.sample(41);
    assert!(curve.points.is_empty());
    assert!(curve.skipped.is_empty());
}

#[test]
fn test_complement_of_upward_is_downward() {
    let u = Universe::new(0.0, 10.0).unwrap();
    let up = XmuFunction::upward_gradient(u, 3.0, 5.0).unwrap();
    let down = XmuFunction::downward_gradient(u, 3.0, 5.0).unwrap();
    let complement = up.complement().unwrap();
    assert_curves_close(&complement.sample(61), &down.sample(61));
}

#[test]
fn test_complement_is_involutive_for_gradients() {
    let f = small();
    let back = f.complement().unwrap().complement().unwrap();
    assert_curves_close(&back.sample(61), &f.sample(61));
}

#[test]
fn test_complement_of_trapezoid_splits_in_two() {
    // An interior trapezoid leaves residual membership on both flanks
    let complement = medium().complement().unwrap();
    assert_eq!(complement.branches().len(), 4);
    let curve = complement.sample(41);
    assert!(!curve.points.is_empty());
    // Near full membership the complement hugs the universe edges
    for p in curve.points.iter().filter(|p| p.mu > 0.9) {
        assert!(p.x < 1.5 || p.x > 5.5, "interior x {} at mu {}", p.x, p.mu);
    }
}

#[test]
fn test_complement_of_multi_interval_unsupported() {
    let split = medium().complement().unwrap();
    let err = split.complement().unwrap_err();
    assert!(matches!(err, XmuError::UnsupportedCombination(_)));
}

#[test]
fn test_union_of_multi_interval_unsupported() {
    let split = medium().complement().unwrap();
    let err = split.union_x(&small()).unwrap_err();
    assert!(matches!(err, XmuError::UnsupportedCombination(_)));
}

#[test]
fn test_difference_matches_intersection_with_complement() {
    let mut context = XmuContext::new();
    let direct = context.difference(&small(), &large()).unwrap();
    let negated = large().complement().unwrap();
    let via_complement = small().intersect_x(&negated).unwrap();
    assert_curves_close(&direct.sample(61), &via_complement.sample(61));
}

#[test]
fn test_mismatched_universes_rejected() {
    let a = XmuFunction::upward_gradient(Universe::new(0.0, 10.0).unwrap(), 2.0, 5.0).unwrap();
    let b = XmuFunction::upward_gradient(Universe::new(0.0, 5.0).unwrap(), 2.0, 4.0).unwrap();
    let err = a.union_x(&b).unwrap_err();
    match err {
        XmuError::Domain { parameter, .. } => assert_eq!(parameter, "universe"),
        other => panic!("expected domain error, got {}", other),
    }
    assert!(a.add_x(&b).is_err());
}

#[test]
fn test_small_or_large_but_not_medium() {
    // (Small or Large) excluding Medium keeps the flanks of the universe
    // and records where the piecewise definition changes level behavior
    let mut context = XmuContext::new();
    let either = context.union(&small(), &large()).unwrap();
    let result = context.difference(&either, &medium()).unwrap();

    assert!(!result.breakpoints().is_empty());
    assert!((result.breakpoints()[0] - 0.25).abs() < 1e-6);

    let curve = result.sample(101);
    assert!(!curve.points.is_empty());
    for p in &curve.points {
        assert!(p.x >= 1.0 - 1e-9 && p.x <= 6.0 + 1e-9);
        assert!(p.mu >= -1e-12 && p.mu <= 1.0 + 1e-12);
    }
}

#[test]
fn test_shared_context_reuses_simplifications() {
    let mut context = XmuContext::new();
    let first = context.complement(&large()).unwrap();
    let second = context.complement(&large()).unwrap();
    assert_curves_close(&first.sample(21), &second.sample(21));
    assert!(context.cache().hits() > 0);
}
