use super::{ascending_branch, descending_branch};
use crate::symbolic::{Expr, Piecewise};
use crate::{Branch, ShapeFamily, Universe, XmuError, XmuFunction};

fn u() -> Universe {
    Universe::new(0.0, 10.0).unwrap()
}

#[test]
fn test_upward_gradient_endpoints() {
    let f = XmuFunction::upward_gradient(Universe::new(1.0, 6.0).unwrap(), 3.0, 5.0).unwrap();
    assert_eq!(f.family(), ShapeFamily::UpwardGradient);
    let asc = ascending_branch(&f);
    assert!((asc.eval(0.0).unwrap() - 3.0).abs() < 1e-9);
    assert!((asc.eval(1.0).unwrap() - 5.0).abs() < 1e-9);
    // Above the ramp the set extends to the universe's upper bound
    let desc = descending_branch(&f);
    assert!((desc.eval(0.5).unwrap() - 6.0).abs() < 1e-9);
    assert!(f.breakpoints().is_empty());
}

#[test]
fn test_downward_gradient_endpoints() {
    let f = XmuFunction::downward_gradient(Universe::new(1.0, 6.0).unwrap(), 2.0, 4.0).unwrap();
    assert_eq!(f.family(), ShapeFamily::DownwardGradient);
    let desc = descending_branch(&f);
    assert!((desc.eval(0.0).unwrap() - 4.0).abs() < 1e-9);
    assert!((desc.eval(1.0).unwrap() - 2.0).abs() < 1e-9);
    let asc = ascending_branch(&f);
    assert!((asc.eval(0.5).unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn test_triangular_ramps_meet_at_apex() {
    let f = XmuFunction::triangular(u(), 1.0, 3.0, 4.0).unwrap();
    assert_eq!(f.family(), ShapeFamily::Triangular);
    let asc = ascending_branch(&f);
    let desc = descending_branch(&f);
    assert!((asc.eval(0.0).unwrap() - 1.0).abs() < 1e-9);
    assert!((asc.eval(1.0).unwrap() - 3.0).abs() < 1e-9);
    assert!((desc.eval(0.0).unwrap() - 4.0).abs() < 1e-9);
    assert!((desc.eval(1.0).unwrap() - 3.0).abs() < 1e-9);
    assert_eq!(f.plateau_span().unwrap(), None);
}

#[test]
fn test_triangular_keeps_forward_formulas() {
    let f = XmuFunction::triangular(u(), 1.0, 3.0, 4.0).unwrap();
    assert_eq!(f.mu_equals().len(), 2);
    // Forward ramp evaluated at the apex gives full membership
    let mut bindings = crate::symbolic::Bindings::new();
    bindings.insert("x".to_string(), 3.0);
    let mu = crate::symbolic::evaluate(&f.mu_equals()[0], &bindings).unwrap();
    assert!((mu - 1.0).abs() < 1e-9);
}

#[test]
fn test_degenerate_triangle_has_crisp_edge() {
    // a == b collapses the ascending ramp to a vertical edge at x = 2
    let f = XmuFunction::triangular(u(), 2.0, 2.0, 5.0).unwrap();
    let asc = ascending_branch(&f);
    assert!((asc.eval(0.0).unwrap() - 2.0).abs() < 1e-9);
    assert!((asc.eval(1.0).unwrap() - 2.0).abs() < 1e-9);
}

#[test]
fn test_trapezoidal_plateau() {
    let f = XmuFunction::trapezoidal(u(), 1.0, 3.0, 4.0, 6.0).unwrap();
    assert_eq!(f.family(), ShapeFamily::Trapezoidal);
    assert_eq!(f.branches().len(), 3);
    assert_eq!(f.plateau_span().unwrap(), Some((3.0, 4.0)));
    let asc = ascending_branch(&f);
    let desc = descending_branch(&f);
    assert!((asc.eval(1.0).unwrap() - 3.0).abs() < 1e-9);
    assert!((desc.eval(1.0).unwrap() - 4.0).abs() < 1e-9);
}

#[test]
fn test_trapezoidal_rejects_unordered_parameters() {
    let err = XmuFunction::trapezoidal(u(), 5.0, 3.0, 4.0, 6.0).unwrap_err();
    match err {
        XmuError::Domain { parameter, .. } => assert_eq!(parameter, "b"),
        other => panic!("expected domain error, got {}", other),
    }
}

#[test]
fn test_parameters_outside_universe_rejected() {
    let narrow = Universe::new(1.0, 6.0).unwrap();
    let err = XmuFunction::upward_gradient(narrow, 0.5, 2.0).unwrap_err();
    match err {
        XmuError::Domain { parameter, .. } => assert_eq!(parameter, "a"),
        other => panic!("expected domain error, got {}", other),
    }
    assert!(XmuFunction::triangular(narrow, 2.0, 3.0, 7.0).is_err());
}

#[test]
fn test_gradient_rejects_flat_ramp() {
    assert!(matches!(
        XmuFunction::upward_gradient(u(), 4.0, 4.0),
        Err(XmuError::Domain { .. })
    ));
    assert!(XmuFunction::downward_gradient(u(), 6.0, 2.0).is_err());
}

#[test]
fn test_from_branches_accepts_custom_pair() {
    let branches = vec![
        Branch::Ascending(Piecewise::uniform(Expr::num(2.0) + Expr::mu())),
        Branch::Descending(Piecewise::uniform(Expr::num(8.0) - Expr::mu())),
    ];
    let f = XmuFunction::from_branches(u(), branches, vec![]).unwrap();
    assert_eq!(f.family(), ShapeFamily::Derived);
    assert!(f.mu_equals().is_empty());
    assert_eq!(f.sample(11).points.len(), 22);
}

#[test]
fn test_from_branches_rejects_unpaired_structure() {
    let branches = vec![Branch::Descending(Piecewise::uniform(Expr::num(5.0)))];
    let err = XmuFunction::from_branches(u(), branches, vec![]).unwrap_err();
    assert!(matches!(err, XmuError::UnsupportedCombination(_)));
}

#[test]
fn test_display_names_the_family() {
    let f = XmuFunction::triangular(u(), 1.0, 3.0, 4.0).unwrap();
    let rendered = format!("{}", f);
    assert!(rendered.contains("triangular"));
    assert!(rendered.contains("asc"));
}
