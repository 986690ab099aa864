//! Canonical membership shape builders
//!
//! Each builder validates its breakpoint parameters against the universe,
//! writes down the forward ramp formula μ = f(x), and inverts it through
//! the symbolic solver into the x-equals form. Where the forward shape is
//! flat at 0 or 1, the inverse resolves to the universe bound, so every
//! function is defined for all μ in [0, 1].

use crate::function::{Branch, ShapeFamily};
use crate::symbolic::{simplify, solve_for, Expr, Piecewise, X};
use crate::{Universe, XmuError, XmuFunction, XmuResult};

impl XmuFunction {
    /// Upward straight-line membership: 0 below `a`, ramp up to 1 at `b`
    ///
    /// Requires `a < b`, both within the universe.
    pub fn upward_gradient(universe: Universe, a: f64, b: f64) -> XmuResult<Self> {
        check_param(universe, "a", a)?;
        check_param(universe, "b", b)?;
        if a >= b {
            return Err(XmuError::domain(
                "a",
                format!("expected a < b, got a = {}, b = {}", a, b),
            ));
        }
        // μ = (x - a) / (b - a) on the ramp
        let ramp = (Expr::var(X) - Expr::num(a)) / (Expr::num(b) - Expr::num(a));
        let ascending = invert_ramp(&ramp)?;
        Self::from_parts(
            universe,
            vec![
                Branch::Ascending(Piecewise::uniform(ascending)),
                Branch::Descending(Piecewise::uniform(Expr::num(universe.hi()))),
            ],
            vec![],
            ShapeFamily::UpwardGradient,
            vec![ramp],
        )
    }

    /// Downward straight-line membership: 1 up to `a`, ramp down to 0 at `b`
    ///
    /// Requires `a < b`, both within the universe.
    pub fn downward_gradient(universe: Universe, a: f64, b: f64) -> XmuResult<Self> {
        check_param(universe, "a", a)?;
        check_param(universe, "b", b)?;
        if a >= b {
            return Err(XmuError::domain(
                "a",
                format!("expected a < b, got a = {}, b = {}", a, b),
            ));
        }
        // μ = (b - x) / (b - a) on the ramp
        let ramp = (Expr::num(b) - Expr::var(X)) / (Expr::num(b) - Expr::num(a));
        let descending = invert_ramp(&ramp)?;
        Self::from_parts(
            universe,
            vec![
                Branch::Ascending(Piecewise::uniform(Expr::num(universe.lo()))),
                Branch::Descending(Piecewise::uniform(descending)),
            ],
            vec![],
            ShapeFamily::DownwardGradient,
            vec![ramp],
        )
    }

    /// Triangular membership with apex at `b`
    ///
    /// Requires `a ≤ b ≤ c`. The two ramps invert into one ascending and
    /// one descending branch meeting at μ = 1.
    pub fn triangular(universe: Universe, a: f64, b: f64, c: f64) -> XmuResult<Self> {
        check_param(universe, "a", a)?;
        check_param(universe, "b", b)?;
        check_param(universe, "c", c)?;
        check_order(&[("a", a), ("b", b), ("c", c)])?;
        let up = ramp_up(a, b);
        let down = ramp_down(b, c);
        let ascending = invert_ramp(&up)?;
        let descending = invert_ramp(&down)?;
        Self::from_parts(
            universe,
            vec![
                Branch::Ascending(Piecewise::uniform(ascending)),
                Branch::Descending(Piecewise::uniform(descending)),
            ],
            vec![],
            ShapeFamily::Triangular,
            vec![up, down],
        )
    }

    /// Trapezoidal membership with flat top between `b` and `c`
    ///
    /// Requires `a ≤ b ≤ c ≤ d`. The inversion yields two candidate
    /// x-equals branches and a plateau spanning [b, c] at μ = 1; a single
    /// μ value maps to one x per ramp, so the branches stay tagged apart.
    pub fn trapezoidal(universe: Universe, a: f64, b: f64, c: f64, d: f64) -> XmuResult<Self> {
        check_param(universe, "a", a)?;
        check_param(universe, "b", b)?;
        check_param(universe, "c", c)?;
        check_param(universe, "d", d)?;
        check_order(&[("a", a), ("b", b), ("c", c), ("d", d)])?;
        let up = ramp_up(a, b);
        let down = ramp_down(c, d);
        let ascending = invert_ramp(&up)?;
        let descending = invert_ramp(&down)?;
        Self::from_parts(
            universe,
            vec![
                Branch::Ascending(Piecewise::uniform(ascending)),
                Branch::Plateau(Expr::num(b), Expr::num(c)),
                Branch::Descending(Piecewise::uniform(descending)),
            ],
            vec![],
            ShapeFamily::Trapezoidal,
            vec![up, down],
        )
    }
}

/// Forward ascending ramp μ = (x - a) / (b - a)
fn ramp_up(a: f64, b: f64) -> Expr {
    (Expr::var(X) - Expr::num(a)) / (Expr::num(b) - Expr::num(a))
}

/// Forward descending ramp μ = (d - x) / (d - c)
fn ramp_down(c: f64, d: f64) -> Expr {
    (Expr::num(d) - Expr::var(X)) / (Expr::num(d) - Expr::num(c))
}

/// Invert a forward ramp for x via the symbolic solver
///
/// A degenerate ramp (zero width) collapses to its anchor constant during
/// simplification, which is exactly the crisp-edge behavior wanted.
fn invert_ramp(ramp: &Expr) -> XmuResult<Expr> {
    solve_for(ramp, X, &Expr::mu())
        .map(|inverse| simplify(&inverse))
        .ok_or_else(|| {
            XmuError::unsupported(format!("membership formula `{}` cannot be inverted for x", ramp))
        })
}

fn check_param(universe: Universe, name: &str, value: f64) -> XmuResult<()> {
    if !value.is_finite() {
        return Err(XmuError::domain(
            name,
            format!("parameter must be finite, got {}", value),
        ));
    }
    if !universe.contains(value) {
        return Err(XmuError::domain(
            name,
            format!("{} is outside the universe {}", value, universe),
        ));
    }
    Ok(())
}

/// Enforce non-decreasing order across shape parameters, reporting the
/// first parameter that breaks it
fn check_order(params: &[(&str, f64)]) -> XmuResult<()> {
    for window in params.windows(2) {
        let (prev_name, prev) = window[0];
        let (name, value) = window[1];
        if value < prev {
            return Err(XmuError::domain(
                name,
                format!(
                    "expected {} ≥ {} ({}), got {}",
                    name, prev_name, prev, value
                ),
            ));
        }
    }
    Ok(())
}
