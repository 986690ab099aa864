//! The XmuFunction entity
//!
//! Wraps a universe, the inverted (x-equals) expression branches, and the
//! breakpoint metadata of one fuzzy membership function. Instances are
//! immutable; every combination allocates a new one.

use crate::symbolic::{Expr, Piecewise};
use crate::{Universe, XmuError, XmuResult, EPS};
use std::fmt;

/// Shape family that produced a function
///
/// Carried as metadata for piecewise-merge heuristics and display; it does
/// not drive dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeFamily {
    UpwardGradient,
    DownwardGradient,
    Triangular,
    Trapezoidal,
    Derived,
}

impl fmt::Display for ShapeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeFamily::UpwardGradient => "upward_gradient",
            ShapeFamily::DownwardGradient => "downward_gradient",
            ShapeFamily::Triangular => "triangular",
            ShapeFamily::Trapezoidal => "trapezoidal",
            ShapeFamily::Derived => "derived",
        };
        write!(f, "{}", name)
    }
}

/// One monotonic piece of the inverse representation
///
/// At each membership level the fuzzy set occupies an x-interval; the
/// ascending branch is its lower envelope and the descending branch its
/// upper envelope. A plateau records the x span at μ = 1 for shapes with a
/// flat top. A single μ value can map to two distinct x values, one per
/// ramp; keeping the branch kinds apart is what lets combinations pair
/// operand sides explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum Branch {
    /// Lower envelope of the x-interval per membership level
    Ascending(Piecewise),
    /// Upper envelope of the x-interval per membership level
    Descending(Piecewise),
    /// x span at μ = 1 (the flat top of a trapezoid)
    Plateau(Expr, Expr),
}

/// Raw x-equals expression set: the terminal accessor payload
///
/// Feeds sampling/export, or chains into another combination.
#[derive(Debug, Clone, PartialEq)]
pub struct XEquals {
    pub branches: Vec<Branch>,
    pub breakpoints: Vec<f64>,
}

/// A membership function in X-mu form: x as a function of μ
#[derive(Debug, Clone, PartialEq)]
pub struct XmuFunction {
    universe: Universe,
    branches: Vec<Branch>,
    breakpoints: Vec<f64>,
    family: ShapeFamily,
    forward: Vec<Expr>,
}

impl XmuFunction {
    pub(crate) fn from_parts(
        universe: Universe,
        branches: Vec<Branch>,
        breakpoints: Vec<f64>,
        family: ShapeFamily,
        forward: Vec<Expr>,
    ) -> XmuResult<Self> {
        // Validates the ascending/descending pairing up front
        pair_branches(&branches)?;
        Ok(Self {
            universe,
            branches,
            breakpoints: normalize_breakpoints(breakpoints),
            family,
            forward,
        })
    }

    /// Build a function from user-supplied closed-form branches
    ///
    /// Branches must come in ascending/descending pairs, optionally with a
    /// plateau between the two. The combination algebra operates on such
    /// functions structurally, like on any canonical shape.
    pub fn from_branches(
        universe: Universe,
        branches: Vec<Branch>,
        breakpoints: Vec<f64>,
    ) -> XmuResult<Self> {
        Self::from_parts(universe, branches, breakpoints, ShapeFamily::Derived, vec![])
    }

    pub fn universe(&self) -> Universe {
        self.universe
    }

    pub fn family(&self) -> ShapeFamily {
        self.family
    }

    /// Membership-degree thresholds where the piecewise definition changes
    /// branch expression, strictly inside (0, 1)
    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Forward membership ramp formulas in x, kept from the inversion step
    /// (ascending ramp first, then descending where the shape has one);
    /// empty for derived functions
    pub fn mu_equals(&self) -> &[Expr] {
        &self.forward
    }

    /// The raw piecewise symbolic expression set plus breakpoints
    pub fn xequals(&self) -> XEquals {
        XEquals {
            branches: self.branches.clone(),
            breakpoints: self.breakpoints.clone(),
        }
    }

    /// The x span covered at μ = 1, when the shape carries a flat top
    pub fn plateau_span(&self) -> XmuResult<Option<(f64, f64)>> {
        let pairs = pair_branches(&self.branches)?;
        for pair in &pairs {
            if let Some((lo, hi)) = pair.plateau {
                let lo = crate::symbolic::evaluate_at(lo, 1.0)?;
                let hi = crate::symbolic::evaluate_at(hi, 1.0)?;
                return Ok(Some((lo, hi)));
            }
        }
        Ok(None)
    }
}

impl fmt::Display for XmuFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x-mu over {}:", self.family, self.universe)?;
        for branch in &self.branches {
            match branch {
                Branch::Ascending(pw) => write!(f, " asc {}", describe(pw))?,
                Branch::Descending(pw) => write!(f, " desc {}", describe(pw))?,
                Branch::Plateau(lo, hi) => write!(f, " plateau [{}, {}]", lo, hi)?,
            }
        }
        Ok(())
    }
}

fn describe(pw: &Piecewise) -> String {
    let rendered: Vec<String> = pw
        .pieces()
        .iter()
        .map(|piece| format!("{} on [{}, {}]", piece.expr, piece.lower, piece.upper))
        .collect();
    rendered.join("; ")
}

/// One x-interval of a function: ascending and descending envelope with an
/// optional plateau
pub(crate) struct IntervalPair<'a> {
    pub ascending: &'a Piecewise,
    pub descending: &'a Piecewise,
    pub plateau: Option<(&'a Expr, &'a Expr)>,
}

/// Group a branch list into ascending/descending pairs
///
/// Errors with `UnsupportedCombination` when the structure cannot be
/// reconciled, e.g. after repeated differencing left an odd branch set.
pub(crate) fn pair_branches(branches: &[Branch]) -> XmuResult<Vec<IntervalPair<'_>>> {
    let mut pairs = Vec::new();
    let mut i = 0;
    while i < branches.len() {
        let Branch::Ascending(ascending) = &branches[i] else {
            return Err(XmuError::unsupported(format!(
                "expected an ascending branch at position {}",
                i
            )));
        };
        i += 1;
        let plateau = match branches.get(i) {
            Some(Branch::Plateau(lo, hi)) => {
                i += 1;
                Some((lo, hi))
            }
            _ => None,
        };
        let Some(Branch::Descending(descending)) = branches.get(i) else {
            return Err(XmuError::unsupported(format!(
                "expected a descending branch at position {}",
                i
            )));
        };
        i += 1;
        pairs.push(IntervalPair {
            ascending,
            descending,
            plateau,
        });
    }
    if pairs.is_empty() {
        return Err(XmuError::unsupported("function has no branches"));
    }
    Ok(pairs)
}

/// Clamp breakpoints to the open interval (0, 1), sort, deduplicate
pub(crate) fn normalize_breakpoints(mut points: Vec<f64>) -> Vec<f64> {
    points.retain(|p| *p > EPS && *p < 1.0 - EPS);
    points.sort_by(f64::total_cmp);
    points.dedup_by(|a, b| (*a - *b).abs() < EPS);
    points
}
