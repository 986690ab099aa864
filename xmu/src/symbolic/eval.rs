//! Numeric evaluation of symbolic expressions

use super::{Expr, MU};
use crate::{XmuError, XmuResult};
use std::collections::HashMap;

/// Variable bindings for evaluation
pub type Bindings = HashMap<String, f64>;

/// Divisors smaller than this are treated as symbolic zeros
const DIV_EPS: f64 = 1e-12;

/// Evaluate an expression under the given bindings
///
/// Fails with `XmuError::Evaluation` on unbound variables, division by
/// (near-)zero, and non-finite results such as a negative base raised to
/// a fractional power. The membership level reported in the error is read
/// from the `mu` binding when present.
pub fn evaluate(expr: &Expr, bindings: &Bindings) -> XmuResult<f64> {
    let mu = bindings.get(MU).copied().unwrap_or(f64::NAN);
    let value = eval_inner(expr, bindings, mu)?;
    if !value.is_finite() {
        return Err(XmuError::evaluation(
            mu,
            format!("expression `{}` produced a non-finite value", expr),
        ));
    }
    Ok(value)
}

/// Evaluate an expression at a single membership level
pub fn evaluate_at(expr: &Expr, mu: f64) -> XmuResult<f64> {
    let mut bindings = Bindings::new();
    bindings.insert(MU.to_string(), mu);
    evaluate(expr, &bindings)
}

fn eval_inner(expr: &Expr, bindings: &Bindings, mu: f64) -> XmuResult<f64> {
    match expr {
        Expr::Num(v) => Ok(*v),
        Expr::Var(name) => bindings
            .get(name)
            .copied()
            .ok_or_else(|| XmuError::evaluation(mu, format!("unbound variable `{}`", name))),
        Expr::Add(l, r) => Ok(eval_inner(l, bindings, mu)? + eval_inner(r, bindings, mu)?),
        Expr::Sub(l, r) => Ok(eval_inner(l, bindings, mu)? - eval_inner(r, bindings, mu)?),
        Expr::Mul(l, r) => Ok(eval_inner(l, bindings, mu)? * eval_inner(r, bindings, mu)?),
        Expr::Div(l, r) => {
            let numerator = eval_inner(l, bindings, mu)?;
            let denominator = eval_inner(r, bindings, mu)?;
            if denominator.abs() < DIV_EPS {
                return Err(XmuError::evaluation(
                    mu,
                    format!("division by zero in `{}`", expr),
                ));
            }
            Ok(numerator / denominator)
        }
        Expr::Pow(l, r) => {
            let base = eval_inner(l, bindings, mu)?;
            let exponent = eval_inner(r, bindings, mu)?;
            let value = base.powf(exponent);
            if value.is_nan() {
                return Err(XmuError::evaluation(
                    mu,
                    format!("invalid power {} ^ {} in `{}`", base, exponent, expr),
                ));
            }
            Ok(value)
        }
        Expr::Neg(inner) => Ok(-eval_inner(inner, bindings, mu)?),
    }
}
