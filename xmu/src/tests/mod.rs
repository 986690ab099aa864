// Universe and shape builder tests
mod shapes;


// Combination algebra tests
mod algebra;



use crate::function::Branch;
use crate::sampling::SampledCurve;
use crate::symbolic::Piecewise;
use crate::XmuFunction;

/// Compare two sampled curves pointwise within floating tolerance
pub(crate) fn assert_curves_close(a: &SampledCurve, b: &SampledCurve) {
    assert_eq!(
        a.points.len(),
        b.points.len(),
        "curves have different point counts"
    );
    for (p, q) in a.points.iter().zip(&b.points) {
        assert!(
            (p.x - q.x).abs() < 1e-6 && (p.mu - q.mu).abs() < 1e-6,
            "points diverge: ({}, {}) vs ({}, {})",
            p.x,
            p.mu,
            q.x,
            q.mu
        );
    }
}

/// The first ascending branch of a function
pub(crate) fn ascending_branch(function: &XmuFunction) -> &Piecewise {
    function
        .branches()
        .iter()
        .find_map(|branch| match branch {
            Branch::Ascending(pw) => Some(pw),
            _ => None,
        })
        .unwrap()
}

/// The last descending branch of a function
pub(crate) fn descending_branch(function: &XmuFunction) -> &Piecewise {
    function
        .branches()
        .iter()
        .rev()
        .find_map(|branch| match branch {
            Branch::Descending(pw) => Some(pw),
            _ => None,
        })
        .unwrap()
}
