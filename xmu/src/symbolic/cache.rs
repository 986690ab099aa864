//! Memoization of repeated simplifications
//!
//! Chained combinations resimplify structurally identical subtrees over
//! and over; the cache short-circuits that. It is owned by the computation
//! context, never process-global.

use super::{simplify, Expr};
use std::collections::HashMap;

/// Simplification memo table keyed by the canonical rendering of the
/// input expression
#[derive(Debug, Default)]
pub struct SimplifyCache {
    entries: HashMap<String, Expr>,
    hits: usize,
}

impl SimplifyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simplify through the cache
    pub fn simplify(&mut self, expr: &Expr) -> Expr {
        let key = expr.to_string();
        if let Some(cached) = self.entries.get(&key) {
            self.hits += 1;
            return cached.clone();
        }
        let simplified = simplify(expr);
        self.entries.insert(key, simplified.clone());
        simplified
    }

    /// Number of distinct expressions cached so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lookups answered from the cache
    pub fn hits(&self) -> usize {
        self.hits
    }
}
