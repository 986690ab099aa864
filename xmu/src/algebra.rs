//! Combination algebra over X-mu functions
//!
//! Every binary operation takes two functions over the same universe and
//! returns a new symbolic function; nothing is discretized. Union and
//! intersection select, per ascending/descending branch and per membership
//! segment, whichever operand's expression wins; arithmetic applies the
//! operator to the paired branch expressions directly, which is the payoff
//! of the inverted representation.
//!
//! Where the operands carry differing piece boundaries, the result is
//! rebuilt over the union of both breakpoint sets with the winner
//! re-evaluated on every combined segment.

use crate::function::{pair_branches, Branch, IntervalPair, ShapeFamily};
use crate::symbolic::piecewise::crossings;
use crate::symbolic::{Expr, Piece, Piecewise, SimplifyCache};
use crate::{Universe, XmuError, XmuFunction, XmuResult, EPS};

/// Probe tolerance when deciding whether an x-interval is empty
const CUT_EPS: f64 = 1e-7;

/// Arithmetic operators of the fuzzy extension principle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl ArithmeticOp {
    pub fn name(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "addition",
            ArithmeticOp::Subtract => "subtraction",
            ArithmeticOp::Multiply => "multiplication",
            ArithmeticOp::Divide => "division",
            ArithmeticOp::Power => "power",
        }
    }

    fn apply(&self, l: Expr, r: Expr) -> Expr {
        match self {
            ArithmeticOp::Add => l + r,
            ArithmeticOp::Subtract => l - r,
            ArithmeticOp::Multiply => l * r,
            ArithmeticOp::Divide => l / r,
            ArithmeticOp::Power => l.pow(r),
        }
    }

    fn apply_numeric(&self, l: f64, r: f64) -> f64 {
        match self {
            ArithmeticOp::Add => l + r,
            ArithmeticOp::Subtract => l - r,
            ArithmeticOp::Multiply => l * r,
            ArithmeticOp::Divide => l / r,
            ArithmeticOp::Power => l.powf(r),
        }
    }
}

/// Computation context for chained combinations
///
/// Owns the simplification memo table so repeated subexpressions across a
/// chain of operations are simplified once.
#[derive(Debug, Default)]
pub struct XmuContext {
    cache: SimplifyCache,
}

impl XmuContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &SimplifyCache {
        &self.cache
    }

    /// Set union: commutative and idempotent
    ///
    /// At every membership level the combined set takes the wider x
    /// extent; the ascending branch keeps the smaller x, the descending
    /// branch the larger. Where the operands' intervals come apart, the
    /// result carries two interval pairs instead of a lossy hull.
    pub fn union(&mut self, a: &XmuFunction, b: &XmuFunction) -> XmuResult<XmuFunction> {
        check_universes(a, b)?;
        let pa = single_pair(a, "union")?;
        let pb = single_pair(b, "union")?;

        let segments = overlap_segments(&pa, &pb);
        let disjoint_anywhere = segments.iter().any(|segment| !segment.overlap);

        let ascending = Piecewise::select(pa.ascending, pb.ascending, |xa, xb| xa <= xb);
        let descending_hull = Piecewise::select(pa.descending, pb.descending, |xa, xb| xa >= xb);

        let mut branches = Vec::new();
        if !disjoint_anywhere {
            if let Some(plateau) = carry_plateau(&ascending, &descending_hull, pa.plateau.is_some() || pb.plateau.is_some()) {
                branches.push(Branch::Ascending(ascending));
                branches.push(plateau);
                branches.push(Branch::Descending(descending_hull));
            } else {
                branches.push(Branch::Ascending(ascending));
                branches.push(Branch::Descending(descending_hull));
            }
        } else {
            // The operands separate on part of the level axis: keep the
            // left interval and the right interval as distinct pairs,
            // degenerating the second pair where they merge into a hull
            let mut lower_desc = Vec::new();
            let mut upper_asc = Vec::new();
            for segment in &segments {
                let mid = (segment.lower + segment.upper) / 2.0;
                if segment.overlap {
                    let top = descending_hull.expr_at(mid).clone();
                    lower_desc.push(Piece {
                        lower: segment.lower,
                        upper: segment.upper,
                        expr: top.clone(),
                    });
                    upper_asc.push(Piece {
                        lower: segment.lower,
                        upper: segment.upper,
                        expr: top,
                    });
                } else {
                    let (left, right) = if left_operand_first(&pa, &pb, mid) {
                        (&pa, &pb)
                    } else {
                        (&pb, &pa)
                    };
                    lower_desc.push(Piece {
                        lower: segment.lower,
                        upper: segment.upper,
                        expr: left.descending.expr_at(mid).clone(),
                    });
                    upper_asc.push(Piece {
                        lower: segment.lower,
                        upper: segment.upper,
                        expr: right.ascending.expr_at(mid).clone(),
                    });
                }
            }
            branches.push(Branch::Ascending(ascending));
            branches.push(Branch::Descending(Piecewise::from_pieces(lower_desc)?));
            branches.push(Branch::Ascending(Piecewise::from_pieces(upper_asc)?));
            branches.push(Branch::Descending(descending_hull));
        }

        let breakpoints = collect_breakpoints(&branches);
        XmuFunction::from_parts(a.universe(), branches, breakpoints, ShapeFamily::Derived, vec![])
    }

    /// Set intersection: commutative and idempotent, dual of union
    ///
    /// Narrows the x-interval at each level: larger x wins on the
    /// ascending branch, smaller on the descending. Distributes over
    /// multi-interval operands; an all-empty result is kept as one
    /// degenerate pair that samples to nothing.
    pub fn intersect(&mut self, a: &XmuFunction, b: &XmuFunction) -> XmuResult<XmuFunction> {
        check_universes(a, b)?;
        let pairs_a = pair_branches(a.branches())?;
        let pairs_b = pair_branches(b.branches())?;

        let mut branches = Vec::new();
        let mut fallback: Option<(Piecewise, Piecewise)> = None;
        for pa in &pairs_a {
            for pb in &pairs_b {
                let ascending = Piecewise::select(pa.ascending, pb.ascending, |xa, xb| xa >= xb);
                let descending = Piecewise::select(pa.descending, pb.descending, |xa, xb| xa <= xb);
                if nonempty_somewhere(&ascending, &descending) {
                    let carry = pa.plateau.is_some() && pb.plateau.is_some();
                    if let Some(plateau) = carry_plateau(&ascending, &descending, carry) {
                        branches.push(Branch::Ascending(ascending));
                        branches.push(plateau);
                        branches.push(Branch::Descending(descending));
                    } else {
                        branches.push(Branch::Ascending(ascending));
                        branches.push(Branch::Descending(descending));
                    }
                } else if fallback.is_none() {
                    fallback = Some((ascending, descending));
                }
            }
        }
        if branches.is_empty() {
            if let Some((ascending, descending)) = fallback {
                branches.push(Branch::Ascending(ascending));
                branches.push(Branch::Descending(descending));
            }
        }

        let breakpoints = collect_breakpoints(&branches);
        XmuFunction::from_parts(a.universe(), branches, breakpoints, ShapeFamily::Derived, vec![])
    }

    /// Set difference A − B ("A excluding B")
    ///
    /// Computed as the intersection of A with the complement of B.
    pub fn difference(&mut self, a: &XmuFunction, b: &XmuFunction) -> XmuResult<XmuFunction> {
        let complement = self.complement(b)?;
        self.intersect(a, &complement)
    }

    /// Complement: negate the membership axis
    ///
    /// Every branch expression is re-evaluated at 1 − μ with the
    /// ascending/descending roles swapped; a side pinned to a universe
    /// bound flips to the opposite bound. A two-ramp operand yields two
    /// interval pairs, [lo, asc∘(1−μ)] and [desc∘(1−μ), hi].
    pub fn complement(&mut self, a: &XmuFunction) -> XmuResult<XmuFunction> {
        let pairs = pair_branches(a.branches())?;
        if pairs.len() != 1 {
            return Err(XmuError::unsupported(
                "complement of a multi-interval function is not representable",
            ));
        }
        let pair = &pairs[0];
        let universe = a.universe();

        let mut branches = Vec::new();
        if !pinned_to(pair.ascending, universe.lo()) {
            let descending = self.reflect_simplified(pair.ascending);
            branches.push(Branch::Ascending(Piecewise::uniform(Expr::num(universe.lo()))));
            branches.push(Branch::Descending(descending));
        }
        if !pinned_to(pair.descending, universe.hi()) {
            let ascending = self.reflect_simplified(pair.descending);
            branches.push(Branch::Ascending(ascending));
            branches.push(Branch::Descending(Piecewise::uniform(Expr::num(universe.hi()))));
        }
        if branches.is_empty() {
            // Complement of the whole universe: empty at every level,
            // kept as an inverted pair that samples to nothing
            branches.push(Branch::Ascending(Piecewise::uniform(Expr::num(universe.hi()))));
            branches.push(Branch::Descending(Piecewise::uniform(Expr::num(universe.lo()))));
        }

        let breakpoints = a.breakpoints().iter().map(|b| 1.0 - b).collect();
        XmuFunction::from_parts(universe, branches, breakpoints, ShapeFamily::Derived, vec![])
    }

    /// Extension-principle arithmetic
    ///
    /// Operands are paired branch by branch (ascending with ascending,
    /// descending with descending) and the operator is applied to the two
    /// x-equals expressions directly; no numeric convolution happens. The
    /// result's universe is derived by interval arithmetic on the operand
    /// universes, range-restricted for division and power rather than
    /// failing; a level that cannot be evaluated surfaces only at
    /// sampling time.
    pub fn arithmetic(
        &mut self,
        op: ArithmeticOp,
        a: &XmuFunction,
        b: &XmuFunction,
    ) -> XmuResult<XmuFunction> {
        check_universes(a, b)?;
        let pa = single_pair(a, op.name())?;
        let pb = single_pair(b, op.name())?;

        let ascending = Piecewise::combine(pa.ascending, pb.ascending, |l, r| {
            self.cache.simplify(&op.apply(l.clone(), r.clone()))
        });
        let descending = Piecewise::combine(pa.descending, pb.descending, |l, r| {
            self.cache.simplify(&op.apply(l.clone(), r.clone()))
        });

        let universe = derived_universe(op, a.universe(), b.universe());
        let carry = pa.plateau.is_some() || pb.plateau.is_some();
        let mut branches = Vec::new();
        if let Some(plateau) = carry_plateau(&ascending, &descending, carry) {
            branches.push(Branch::Ascending(ascending));
            branches.push(plateau);
            branches.push(Branch::Descending(descending));
        } else {
            branches.push(Branch::Ascending(ascending));
            branches.push(Branch::Descending(descending));
        }
        let breakpoints = collect_breakpoints(&branches);
        XmuFunction::from_parts(universe, branches, breakpoints, ShapeFamily::Derived, vec![])
    }

    pub fn add(&mut self, a: &XmuFunction, b: &XmuFunction) -> XmuResult<XmuFunction> {
        self.arithmetic(ArithmeticOp::Add, a, b)
    }

    /// Not commutative: `sub(a, b)` is a − b
    pub fn sub(&mut self, a: &XmuFunction, b: &XmuFunction) -> XmuResult<XmuFunction> {
        self.arithmetic(ArithmeticOp::Subtract, a, b)
    }

    pub fn mul(&mut self, a: &XmuFunction, b: &XmuFunction) -> XmuResult<XmuFunction> {
        self.arithmetic(ArithmeticOp::Multiply, a, b)
    }

    /// Not commutative: `div(a, b)` is a / b; a level where b's branch
    /// reaches zero fails at sampling time, not here
    pub fn div(&mut self, a: &XmuFunction, b: &XmuFunction) -> XmuResult<XmuFunction> {
        self.arithmetic(ArithmeticOp::Divide, a, b)
    }

    pub fn pow(&mut self, a: &XmuFunction, b: &XmuFunction) -> XmuResult<XmuFunction> {
        self.arithmetic(ArithmeticOp::Power, a, b)
    }

    fn reflect_simplified(&mut self, pw: &Piecewise) -> Piecewise {
        pw.reflect().map(|expr| self.cache.simplify(expr))
    }
}

impl XmuFunction {
    /// Set union with a throwaway context; see [`XmuContext::union`]
    pub fn union_x(&self, other: &Self) -> XmuResult<Self> {
        XmuContext::new().union(self, other)
    }

    /// Set intersection; see [`XmuContext::intersect`]
    pub fn intersect_x(&self, other: &Self) -> XmuResult<Self> {
        XmuContext::new().intersect(self, other)
    }

    /// Set difference self − other; see [`XmuContext::difference`]
    pub fn difference_x(&self, other: &Self) -> XmuResult<Self> {
        XmuContext::new().difference(self, other)
    }

    /// Complement; see [`XmuContext::complement`]
    pub fn complement(&self) -> XmuResult<Self> {
        XmuContext::new().complement(self)
    }

    pub fn add_x(&self, other: &Self) -> XmuResult<Self> {
        XmuContext::new().add(self, other)
    }

    /// self − other; not commutative
    pub fn sub_x(&self, other: &Self) -> XmuResult<Self> {
        XmuContext::new().sub(self, other)
    }

    pub fn mul_x(&self, other: &Self) -> XmuResult<Self> {
        XmuContext::new().mul(self, other)
    }

    /// self / other; not commutative
    pub fn div_x(&self, other: &Self) -> XmuResult<Self> {
        XmuContext::new().div(self, other)
    }

    pub fn pow_x(&self, other: &Self) -> XmuResult<Self> {
        XmuContext::new().pow(self, other)
    }
}

fn check_universes(a: &XmuFunction, b: &XmuFunction) -> XmuResult<()> {
    if a.universe() != b.universe() {
        return Err(XmuError::domain(
            "universe",
            format!(
                "operands are defined over different universes: {} vs {}",
                a.universe(),
                b.universe()
            ),
        ));
    }
    Ok(())
}

fn single_pair<'f>(f: &'f XmuFunction, op: &str) -> XmuResult<IntervalPair<'f>> {
    let mut pairs = pair_branches(f.branches())?;
    if pairs.len() != 1 {
        return Err(XmuError::unsupported(format!(
            "{} requires operands with a single ascending/descending pair, found {}",
            op,
            pairs.len()
        )));
    }
    Ok(pairs.remove(0))
}

/// One segment of the level axis with its interval-overlap classification
struct OverlapSegment {
    lower: f64,
    upper: f64,
    overlap: bool,
}

/// Segment [0, 1] by whether the operands' x-intervals overlap
///
/// Boundaries are the operands' piece bounds plus the crossings of each
/// descending branch with the other operand's ascending branch; a segment
/// that cannot be probed numerically is classified as overlapping, which
/// keeps the hull behavior as the robust default.
fn overlap_segments(pa: &IntervalPair<'_>, pb: &IntervalPair<'_>) -> Vec<OverlapSegment> {
    let mut grid = Vec::new();
    for pw in [pa.ascending, pa.descending, pb.ascending, pb.descending] {
        for piece in pw.pieces() {
            grid.push(piece.lower);
            grid.push(piece.upper);
        }
    }
    grid.extend(crossings(pa.descending, pb.ascending));
    grid.extend(crossings(pb.descending, pa.ascending));
    grid.sort_by(f64::total_cmp);
    grid.dedup_by(|x, y| (*x - *y).abs() < EPS);

    let mut segments = Vec::with_capacity(grid.len().saturating_sub(1));
    for window in grid.windows(2) {
        let mid = (window[0] + window[1]) / 2.0;
        let probes = (
            pa.ascending.eval(mid),
            pa.descending.eval(mid),
            pb.ascending.eval(mid),
            pb.descending.eval(mid),
        );
        let overlap = match probes {
            (Ok(asc_a), Ok(desc_a), Ok(asc_b), Ok(desc_b)) => {
                asc_a.max(asc_b) <= desc_a.min(desc_b) + CUT_EPS
            }
            _ => true,
        };
        segments.push(OverlapSegment {
            lower: window[0],
            upper: window[1],
            overlap,
        });
    }
    segments
}

/// Whether operand A's interval sits left of B's at the given level
fn left_operand_first(pa: &IntervalPair<'_>, pb: &IntervalPair<'_>, mu: f64) -> bool {
    match (pa.ascending.eval(mu), pb.ascending.eval(mu)) {
        (Ok(xa), Ok(xb)) => xa <= xb,
        (Ok(_), Err(_)) => true,
        _ => false,
    }
}

/// Whether every piece of the branch is the given constant bound
fn pinned_to(pw: &Piecewise, bound: f64) -> bool {
    pw.pieces().iter().all(|piece| piece.expr.is_const(bound))
}

/// Whether the pair [ascending, descending] is non-empty at some level
fn nonempty_somewhere(ascending: &Piecewise, descending: &Piecewise) -> bool {
    (0..=10).any(|i| {
        let mu = f64::from(i) / 10.0;
        match (ascending.eval(mu), descending.eval(mu)) {
            (Ok(lo), Ok(hi)) => lo <= hi + CUT_EPS,
            _ => false,
        }
    })
}

/// Emit a plateau branch for a combined result when an operand carried one
/// and the combined envelopes still span a positive width at μ = 1
fn carry_plateau(ascending: &Piecewise, descending: &Piecewise, carry: bool) -> Option<Branch> {
    if !carry {
        return None;
    }
    let lo = ascending.eval(1.0).ok()?;
    let hi = descending.eval(1.0).ok()?;
    if hi - lo > CUT_EPS {
        Some(Branch::Plateau(
            ascending.expr_at(1.0).clone(),
            descending.expr_at(1.0).clone(),
        ))
    } else {
        None
    }
}

/// Interior boundaries of every branch, normalized into (0, 1)
fn collect_breakpoints(branches: &[Branch]) -> Vec<f64> {
    let mut points = Vec::new();
    for branch in branches {
        if let Branch::Ascending(pw) | Branch::Descending(pw) = branch {
            points.extend(pw.breakpoints());
        }
    }
    crate::function::normalize_breakpoints(points)
}

/// Interval arithmetic on the operand universes
///
/// Division and power drop non-finite bound combinations (range
/// restriction) instead of failing; when nothing survives, the left
/// operand's universe is kept.
fn derived_universe(op: ArithmeticOp, ua: Universe, ub: Universe) -> Universe {
    let candidates: Vec<f64> = match op {
        ArithmeticOp::Add => vec![ua.lo() + ub.lo(), ua.hi() + ub.hi()],
        ArithmeticOp::Subtract => vec![ua.lo() - ub.hi(), ua.hi() - ub.lo()],
        ArithmeticOp::Multiply | ArithmeticOp::Power => {
            let mut all = Vec::with_capacity(4);
            for x in [ua.lo(), ua.hi()] {
                for y in [ub.lo(), ub.hi()] {
                    all.push(op.apply_numeric(x, y));
                }
            }
            all
        }
        ArithmeticOp::Divide => {
            let mut all = Vec::with_capacity(4);
            for x in [ua.lo(), ua.hi()] {
                for y in [ub.lo(), ub.hi()] {
                    if y.abs() > EPS {
                        all.push(x / y);
                    }
                }
            }
            all
        }
    };
    let finite: Vec<f64> = candidates.into_iter().filter(|v| v.is_finite()).collect();
    let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Universe::new(lo, hi).unwrap_or(ua)
}
