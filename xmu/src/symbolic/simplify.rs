//! Algebraic simplification: constant folding and identity elimination

use super::Expr;

/// Simplify an expression bottom-up
///
/// Folds constant subtrees and removes arithmetic identities. Pure and
/// idempotent; does not attempt factoring or term collection.
pub fn simplify(expr: &Expr) -> Expr {
    match expr {
        Expr::Num(_) | Expr::Var(_) => expr.clone(),
        Expr::Add(l, r) => {
            let l = simplify(l);
            let r = simplify(r);
            match (&l, &r) {
                (Expr::Num(a), Expr::Num(b)) => Expr::Num(a + b),
                (Expr::Num(z), _) if *z == 0.0 => r,
                (_, Expr::Num(z)) if *z == 0.0 => l,
                _ => Expr::Add(l.boxed(), r.boxed()),
            }
        }
        Expr::Sub(l, r) => {
            let l = simplify(l);
            let r = simplify(r);
            match (&l, &r) {
                (Expr::Num(a), Expr::Num(b)) => Expr::Num(a - b),
                (_, Expr::Num(z)) if *z == 0.0 => l,
                (Expr::Num(z), _) if *z == 0.0 => Expr::Neg(r.boxed()),
                _ if l == r => Expr::Num(0.0),
                _ => Expr::Sub(l.boxed(), r.boxed()),
            }
        }
        Expr::Mul(l, r) => {
            let l = simplify(l);
            let r = simplify(r);
            match (&l, &r) {
                (Expr::Num(a), Expr::Num(b)) => Expr::Num(a * b),
                (Expr::Num(z), _) | (_, Expr::Num(z)) if *z == 0.0 => Expr::Num(0.0),
                (Expr::Num(o), _) if *o == 1.0 => r,
                (_, Expr::Num(o)) if *o == 1.0 => l,
                _ => Expr::Mul(l.boxed(), r.boxed()),
            }
        }
        Expr::Div(l, r) => {
            let l = simplify(l);
            let r = simplify(r);
            match (&l, &r) {
                (Expr::Num(a), Expr::Num(b)) if *b != 0.0 => Expr::Num(a / b),
                (_, Expr::Num(o)) if *o == 1.0 => l,
                (Expr::Num(z), _) if *z == 0.0 => Expr::Num(0.0),
                _ => Expr::Div(l.boxed(), r.boxed()),
            }
        }
        Expr::Pow(l, r) => {
            let l = simplify(l);
            let r = simplify(r);
            match (&l, &r) {
                (Expr::Num(a), Expr::Num(b)) => {
                    let v = a.powf(*b);
                    if v.is_finite() {
                        Expr::Num(v)
                    } else {
                        Expr::Pow(l.boxed(), r.boxed())
                    }
                }
                (_, Expr::Num(o)) if *o == 1.0 => l,
                (_, Expr::Num(z)) if *z == 0.0 => Expr::Num(1.0),
                _ => Expr::Pow(l.boxed(), r.boxed()),
            }
        }
        Expr::Neg(inner) => {
            let inner = simplify(inner);
            match inner {
                Expr::Num(v) => Expr::Num(-v),
                Expr::Neg(original) => *original,
                _ => Expr::Neg(inner.boxed()),
            }
        }
    }
}
