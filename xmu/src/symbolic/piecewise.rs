//! Piecewise expressions over the membership axis
//!
//! A `Piecewise` covers [0, 1] with contiguous pieces, each holding one
//! closed-form expression in `mu`. Combination operations align two
//! piecewise functions on the union of their boundaries and decide, per
//! segment, which expression carries over.

use super::eval::evaluate_at;
use super::Expr;
use crate::{XmuError, XmuResult, EPS};

/// One contiguous segment of the membership axis and its expression
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub lower: f64,
    pub upper: f64,
    pub expr: Expr,
}

/// A piecewise expression covering the membership range [0, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct Piecewise {
    pieces: Vec<Piece>,
}

impl Piecewise {
    /// A single expression valid over the whole membership range
    pub fn uniform(expr: Expr) -> Self {
        Self {
            pieces: vec![Piece {
                lower: 0.0,
                upper: 1.0,
                expr,
            }],
        }
    }

    /// Build from explicit pieces; they must be sorted, contiguous, and
    /// cover [0, 1] exactly
    pub fn from_pieces(pieces: Vec<Piece>) -> XmuResult<Self> {
        let Some(first) = pieces.first() else {
            return Err(XmuError::domain("pieces", "piecewise needs at least one piece"));
        };
        if first.lower.abs() > EPS {
            return Err(XmuError::domain(
                "pieces",
                format!("coverage must start at 0, got {}", first.lower),
            ));
        }
        let mut end = first.lower;
        for piece in &pieces {
            if (piece.lower - end).abs() > EPS || piece.upper <= piece.lower {
                return Err(XmuError::domain(
                    "pieces",
                    format!("pieces are not contiguous at [{}, {}]", piece.lower, piece.upper),
                ));
            }
            end = piece.upper;
        }
        if (end - 1.0).abs() > EPS {
            return Err(XmuError::domain(
                "pieces",
                format!("coverage must end at 1, got {}", end),
            ));
        }
        Ok(Self {
            pieces: coalesce(pieces),
        })
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The expression active at the given membership level
    pub fn expr_at(&self, mu: f64) -> &Expr {
        for (i, piece) in self.pieces.iter().enumerate() {
            if i + 1 == self.pieces.len() || mu <= piece.upper + EPS {
                return &piece.expr;
            }
        }
        unreachable!("piecewise always holds at least one piece")
    }

    /// Numerically evaluate at a membership level
    pub fn eval(&self, mu: f64) -> XmuResult<f64> {
        evaluate_at(self.expr_at(mu), mu)
    }

    /// Interior boundaries strictly inside (0, 1)
    pub fn breakpoints(&self) -> impl Iterator<Item = f64> + '_ {
        self.pieces
            .iter()
            .skip(1)
            .map(|piece| piece.lower)
            .filter(|b| *b > EPS && *b < 1.0 - EPS)
    }

    /// Transform every piece expression, keeping the segmentation
    pub fn map(&self, mut f: impl FnMut(&Expr) -> Expr) -> Piecewise {
        Piecewise {
            pieces: coalesce(
                self.pieces
                    .iter()
                    .map(|piece| Piece {
                        lower: piece.lower,
                        upper: piece.upper,
                        expr: f(&piece.expr),
                    })
                    .collect(),
            ),
        }
    }

    /// Reflect the membership axis: μ becomes 1 − μ
    ///
    /// Piece bounds mirror around 1/2 and every expression is composed
    /// with (1 − μ). Used by the complement operation.
    pub fn reflect(&self) -> Piecewise {
        let one_minus_mu = Expr::num(1.0) - Expr::mu();
        let pieces = self
            .pieces
            .iter()
            .rev()
            .map(|piece| Piece {
                lower: (1.0 - piece.upper).max(0.0),
                upper: (1.0 - piece.lower).min(1.0),
                expr: piece.expr.substitute(super::MU, &one_minus_mu),
            })
            .collect();
        Piecewise {
            pieces: coalesce(pieces),
        }
    }

    /// Apply a binary operation segment by segment over the union of both
    /// operands' boundaries
    pub fn combine(a: &Piecewise, b: &Piecewise, mut f: impl FnMut(&Expr, &Expr) -> Expr) -> Piecewise {
        let grid = boundary_grid(a, b);
        let mut pieces = Vec::with_capacity(grid.len().saturating_sub(1));
        for window in grid.windows(2) {
            let mid = (window[0] + window[1]) / 2.0;
            pieces.push(Piece {
                lower: window[0],
                upper: window[1],
                expr: f(a.expr_at(mid), b.expr_at(mid)),
            });
        }
        Piecewise {
            pieces: coalesce(pieces),
        }
    }

    /// Pick, per segment, whichever operand's expression wins
    ///
    /// The grid is the union of both operands' boundaries plus the points
    /// where the two curves cross, so a winner never changes inside a
    /// segment. `prefer_first` sees the numeric values of both operands at
    /// the segment midpoint; a branch that fails to evaluate there loses.
    pub fn select(
        a: &Piecewise,
        b: &Piecewise,
        prefer_first: impl Fn(f64, f64) -> bool,
    ) -> Piecewise {
        let mut grid = boundary_grid(a, b);
        grid.extend(crossings(a, b));
        grid.sort_by(f64::total_cmp);
        grid.dedup_by(|x, y| (*x - *y).abs() < EPS);

        let mut pieces = Vec::with_capacity(grid.len().saturating_sub(1));
        for window in grid.windows(2) {
            let mid = (window[0] + window[1]) / 2.0;
            let expr = match (a.eval(mid), b.eval(mid)) {
                (Ok(xa), Ok(xb)) => {
                    if prefer_first(xa, xb) {
                        a.expr_at(mid)
                    } else {
                        b.expr_at(mid)
                    }
                }
                (Ok(_), Err(_)) => a.expr_at(mid),
                (Err(_), Ok(_)) => b.expr_at(mid),
                (Err(_), Err(_)) => a.expr_at(mid),
            };
            pieces.push(Piece {
                lower: window[0],
                upper: window[1],
                expr: expr.clone(),
            });
        }
        Piecewise {
            pieces: coalesce(pieces),
        }
    }
}

/// Union of both operands' piece boundaries, sorted and deduplicated
pub(crate) fn boundary_grid(a: &Piecewise, b: &Piecewise) -> Vec<f64> {
    let mut grid = Vec::new();
    for piece in a.pieces().iter().chain(b.pieces()) {
        grid.push(piece.lower);
        grid.push(piece.upper);
    }
    grid.sort_by(f64::total_cmp);
    grid.dedup_by(|x, y| (*x - *y).abs() < EPS);
    grid
}

/// Membership levels where the two curves cross, found by bisection on
/// each segment with a sign change
pub(crate) fn crossings(a: &Piecewise, b: &Piecewise) -> Vec<f64> {
    let diff = |mu: f64| -> Option<f64> {
        match (a.eval(mu), b.eval(mu)) {
            (Ok(xa), Ok(xb)) => Some(xa - xb),
            _ => None,
        }
    };

    let grid = boundary_grid(a, b);
    let mut found = Vec::new();
    for window in grid.windows(2) {
        let (mut lo, mut hi) = (window[0], window[1]);
        let (Some(mut f_lo), Some(f_hi)) = (diff(lo), diff(hi)) else {
            continue;
        };
        if f_lo * f_hi >= 0.0 {
            continue;
        }
        for _ in 0..64 {
            let mid = (lo + hi) / 2.0;
            let Some(f_mid) = diff(mid) else { break };
            if f_lo * f_mid <= 0.0 {
                hi = mid;
            } else {
                lo = mid;
                f_lo = f_mid;
            }
        }
        let root = (lo + hi) / 2.0;
        if root > EPS && root < 1.0 - EPS {
            found.push(root);
        }
    }
    found
}

/// Merge adjacent pieces holding equal expressions
fn coalesce(pieces: Vec<Piece>) -> Vec<Piece> {
    let mut merged: Vec<Piece> = Vec::with_capacity(pieces.len());
    for piece in pieces {
        match merged.last_mut() {
            Some(last) if last.expr == piece.expr && (last.upper - piece.lower).abs() < EPS => {
                last.upper = piece.upper;
            }
            _ => merged.push(piece),
        }
    }
    merged
}
