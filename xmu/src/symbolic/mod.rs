//! Minimal symbolic expression engine
//!
//! Provides the collaborator surface the X-mu core needs: expression
//! construction, simplification, equation solving (isolate a variable),
//! piecewise expressions over the membership axis, numeric evaluation,
//! and a memoization table for repeated simplifications.

pub mod cache;
pub mod eval;
pub mod expr;
pub mod piecewise;
pub mod simplify;
pub mod solve;

pub use cache::SimplifyCache;
pub use eval::{evaluate, evaluate_at, Bindings};
pub use expr::{Expr, MU, X};
pub use piecewise::{Piece, Piecewise};
pub use simplify::simplify;
pub use solve::solve_for;
