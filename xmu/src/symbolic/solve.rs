//! Algebraic equation solving for a single unknown
//!
//! This is the inversion step: given a forward membership formula μ = f(x),
//! rearrange it into the x-equals form x = g(μ).

use super::{simplify, Expr};

/// Attempt to solve `lhs = target` for a single unknown variable
///
/// Walks the expression, peeling one operation per step and moving its
/// counterpart onto the target side.
///
/// Supports: +, -, *, /, ^ (constant exponent)
///
/// Returns None if:
/// - The unknown appears on both sides of an operation (can't isolate)
/// - The unknown sits in an exponent (no logarithm in the expression tree)
/// - The equation cannot be algebraically rearranged
pub fn solve_for(lhs: &Expr, var: &str, target: &Expr) -> Option<Expr> {
    match lhs {
        Expr::Var(name) if name == var => Some(simplify(target)),
        Expr::Num(_) | Expr::Var(_) => None,
        Expr::Neg(inner) => {
            if !inner.contains_var(var) {
                return None;
            }
            // -u = t  =>  u = -t
            solve_for(inner, var, &Expr::Neg(target.clone().boxed()))
        }
        Expr::Add(l, r) => {
            let l_contains = l.contains_var(var);
            let r_contains = r.contains_var(var);
            if l_contains && !r_contains {
                // u + c = t  =>  u = t - c
                solve_for(l, var, &(target.clone() - (**r).clone()))
            } else if r_contains && !l_contains {
                solve_for(r, var, &(target.clone() - (**l).clone()))
            } else {
                None
            }
        }
        Expr::Sub(l, r) => {
            let l_contains = l.contains_var(var);
            let r_contains = r.contains_var(var);
            if l_contains && !r_contains {
                // u - c = t  =>  u = t + c
                solve_for(l, var, &(target.clone() + (**r).clone()))
            } else if r_contains && !l_contains {
                // c - u = t  =>  u = c - t
                solve_for(r, var, &((**l).clone() - target.clone()))
            } else {
                None
            }
        }
        Expr::Mul(l, r) => {
            let l_contains = l.contains_var(var);
            let r_contains = r.contains_var(var);
            if l_contains && !r_contains {
                // u * c = t  =>  u = t / c
                solve_for(l, var, &(target.clone() / (**r).clone()))
            } else if r_contains && !l_contains {
                solve_for(r, var, &(target.clone() / (**l).clone()))
            } else {
                None
            }
        }
        Expr::Div(l, r) => {
            let l_contains = l.contains_var(var);
            let r_contains = r.contains_var(var);
            if l_contains && !r_contains {
                // u / c = t  =>  u = t * c
                solve_for(l, var, &(target.clone() * (**r).clone()))
            } else if r_contains && !l_contains {
                // c / u = t  =>  u = c / t
                solve_for(r, var, &((**l).clone() / target.clone()))
            } else {
                None
            }
        }
        Expr::Pow(l, r) => {
            let l_contains = l.contains_var(var);
            let r_contains = r.contains_var(var);
            if l_contains && !r_contains {
                // u ^ c = t  =>  u = t ^ (1 / c)
                let inverse_exponent = Expr::num(1.0) / (**r).clone();
                solve_for(l, var, &target.clone().pow(inverse_exponent))
            } else {
                // Unknown in the exponent needs a logarithm; unsupported
                None
            }
        }
    }
}
