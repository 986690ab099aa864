//! # X-mu Engine
//!
//! **Symbolic fuzzy membership functions, inverted**
//!
//! Instead of storing a membership function μ(x) that maps a universe value
//! to a degree of membership, this crate stores and manipulates the inverse
//! relation x = g(μ): a closed-form symbolic expression giving, for each
//! membership level, the extent of the fuzzy set on the domain axis.
//!
//! The payoff of the inversion is that set operations (union, intersection,
//! difference) and fuzzy arithmetic (extension-principle add, subtract,
//! multiply, divide, power) become algebraic manipulation of expressions
//! rather than pointwise combination of sampled curves.
//!
//! ## Quick Start
//!
//! ```rust
//! use xmu::{Universe, XmuFunction, XmuResult};
//!
//! fn main() -> XmuResult<()> {
//!     let u = Universe::new(1.0, 6.0)?;
//!
//!     let small = XmuFunction::downward_gradient(u, 2.0, 4.0)?;
//!     let large = XmuFunction::upward_gradient(u, 3.0, 5.0)?;
//!
//!     // Symbolic set union; no discretization happens here
//!     let either = small.union_x(&large)?;
//!
//!     // Discretize only at the edge, for rendering
//!     let curve = either.sample(101);
//!     assert!(!curve.points.is_empty());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Universe
//! The bounded real interval all membership functions of one problem are
//! defined over. Functions over different universes cannot be combined.
//!
//! ### X-mu functions
//! The central entity. Built by the canonical shape constructors (upward
//! gradient, downward gradient, triangular, trapezoidal) or returned by a
//! combination; each holds the inverted, piecewise symbolic expression of
//! its shape as ascending/descending branch envelopes.
//!
//! ### Branches
//! A non-monotonic shape maps one membership level to two domain values,
//! one per ramp. Branches keep the two sides apart so combinations can
//! pair them explicitly.

pub mod algebra;
pub mod error;
pub mod function;
pub mod render;
pub mod sampling;
pub mod serializers;
pub mod shapes;
pub mod symbolic;
pub mod universe;

pub use algebra::{ArithmeticOp, XmuContext};
pub use error::XmuError;
pub use function::{Branch, ShapeFamily, XEquals, XmuFunction};
pub use render::Plotter;
pub use sampling::{sample, Sample, SampleFailure, SampledCurve};
pub use symbolic::{Expr, Piecewise, MU};
pub use universe::Universe;

/// Result type for X-mu operations
pub type XmuResult<T> = Result<T, XmuError>;

/// Comparison tolerance for membership levels and domain values
pub(crate) const EPS: f64 = 1e-9;

#[cfg(test)]
mod tests;
