//! Sampling and export
//!
//! The only place the library discretizes: evenly spaced membership levels
//! are pushed through the x-equals branches to produce renderable (x, μ)
//! pairs. A level that fails to evaluate is skipped and recorded, never
//! fatal; a level whose x-interval is empty is skipped silently.

use crate::function::pair_branches;
use crate::{XEquals, XmuFunction};
use serde::Serialize;

/// Probe tolerance when deciding whether a cut is empty
const CUT_EPS: f64 = 1e-7;

/// One (x, μ) point of a sampled curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub x: f64,
    pub mu: f64,
}

/// A membership level that could not be evaluated on some branch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleFailure {
    pub mu: f64,
    pub message: String,
}

/// Result of sampling: the renderable points plus the levels skipped
/// because of evaluation failures
#[derive(Debug, Clone, Default, Serialize)]
pub struct SampledCurve {
    pub points: Vec<Sample>,
    pub skipped: Vec<SampleFailure>,
}

/// Evenly spaced values over a closed interval, endpoints included
struct Linspace {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 {
            (max - min) / (n - 1) as f64
        } else {
            0.0
        };
        Linspace {
            start: min,
            step,
            index: 0,
            len: n,
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            let i = self.index;
            self.index += 1;
            Some(self.start + self.step * i as f64)
        }
    }
}

/// Sample a raw x-equals expression set at `n` membership levels
///
/// Per interval pair, the ascending branch is walked from μ = 0 up and
/// the descending branch back down, yielding one curve ordered by x for
/// any proper single-interval shape. Branch structure problems reduce to
/// an empty curve rather than an error, since a sampled rendering of a
/// partially defined function is still useful.
pub fn sample(xequals: &XEquals, n: usize) -> SampledCurve {
    let mut curve = SampledCurve::default();
    let Ok(pairs) = pair_branches(&xequals.branches) else {
        return curve;
    };

    for pair in &pairs {
        let mut descending_back = Vec::new();
        for mu in Linspace::new(0.0, 1.0, n) {
            let lo = match pair.ascending.eval(mu) {
                Ok(v) => Some(v),
                Err(err) => {
                    curve.skipped.push(SampleFailure {
                        mu,
                        message: err.to_string(),
                    });
                    None
                }
            };
            let hi = match pair.descending.eval(mu) {
                Ok(v) => Some(v),
                Err(err) => {
                    curve.skipped.push(SampleFailure {
                        mu,
                        message: err.to_string(),
                    });
                    None
                }
            };
            let (Some(lo), Some(hi)) = (lo, hi) else {
                continue;
            };
            // Empty cut at this level: the pair contributes nothing
            if lo > hi + CUT_EPS {
                continue;
            }
            curve.points.push(Sample { x: lo, mu });
            descending_back.push(Sample { x: hi, mu });
        }
        curve.points.extend(descending_back.into_iter().rev());
    }
    curve
}

impl XmuFunction {
    /// Sample this function at `n` evenly spaced membership levels
    pub fn sample(&self, n: usize) -> SampledCurve {
        sample(&self.xequals(), n)
    }
}
