//! Symbolic expression tree

use std::fmt;
use std::ops;

/// Name of the membership-degree variable, ranging over [0, 1]
pub const MU: &str = "mu";

/// Name of the domain variable in forward membership formulas
pub const X: &str = "x";

/// A symbolic expression over real-valued variables
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    Var(String),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
}

impl Expr {
    pub fn num(value: f64) -> Self {
        Expr::Num(value)
    }

    pub fn var(name: &str) -> Self {
        Expr::Var(name.to_string())
    }

    /// The membership-degree variable
    pub fn mu() -> Self {
        Expr::var(MU)
    }

    pub fn pow(self, exponent: Expr) -> Self {
        Expr::Pow(self.boxed(), exponent.boxed())
    }

    pub fn boxed(self) -> Box<Expr> {
        Box::new(self)
    }

    /// Whether the expression references the named variable
    pub fn contains_var(&self, name: &str) -> bool {
        match self {
            Expr::Num(_) => false,
            Expr::Var(v) => v == name,
            Expr::Add(l, r)
            | Expr::Sub(l, r)
            | Expr::Mul(l, r)
            | Expr::Div(l, r)
            | Expr::Pow(l, r) => l.contains_var(name) || r.contains_var(name),
            Expr::Neg(inner) => inner.contains_var(name),
        }
    }

    /// Replace every occurrence of a variable with another expression
    pub fn substitute(&self, name: &str, replacement: &Expr) -> Expr {
        match self {
            Expr::Num(_) => self.clone(),
            Expr::Var(v) => {
                if v == name {
                    replacement.clone()
                } else {
                    self.clone()
                }
            }
            Expr::Add(l, r) => Expr::Add(
                l.substitute(name, replacement).boxed(),
                r.substitute(name, replacement).boxed(),
            ),
            Expr::Sub(l, r) => Expr::Sub(
                l.substitute(name, replacement).boxed(),
                r.substitute(name, replacement).boxed(),
            ),
            Expr::Mul(l, r) => Expr::Mul(
                l.substitute(name, replacement).boxed(),
                r.substitute(name, replacement).boxed(),
            ),
            Expr::Div(l, r) => Expr::Div(
                l.substitute(name, replacement).boxed(),
                r.substitute(name, replacement).boxed(),
            ),
            Expr::Pow(l, r) => Expr::Pow(
                l.substitute(name, replacement).boxed(),
                r.substitute(name, replacement).boxed(),
            ),
            Expr::Neg(inner) => Expr::Neg(inner.substitute(name, replacement).boxed()),
        }
    }

    /// Whether the expression is the given constant
    pub fn is_const(&self, value: f64) -> bool {
        matches!(self, Expr::Num(v) if (v - value).abs() < crate::EPS)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(v) => write!(f, "{}", v),
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Add(l, r) => write!(f, "({} + {})", l, r),
            Expr::Sub(l, r) => write!(f, "({} - {})", l, r),
            Expr::Mul(l, r) => write!(f, "({} * {})", l, r),
            Expr::Div(l, r) => write!(f, "({} / {})", l, r),
            Expr::Pow(l, r) => write!(f, "({} ^ {})", l, r),
            Expr::Neg(inner) => write!(f, "(-{})", inner),
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Num(value)
    }
}

impl ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Neg(self.boxed())
    }
}
