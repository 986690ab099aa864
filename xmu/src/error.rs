use std::fmt;

/// Error types for the X-mu core
///
/// Construction and combination fail fast with `Domain` or
/// `UnsupportedCombination`; numeric trouble is deferred to sampling time
/// and reported per level as `Evaluation`.
#[derive(Debug, Clone, PartialEq)]
pub enum XmuError {
    /// Invalid shape parameter, out-of-universe value, or mismatched
    /// universes between combination operands
    Domain { parameter: String, message: String },

    /// Numeric evaluation of a symbolic expression failed for a specific
    /// membership level; the symbolic object itself remains valid
    Evaluation { mu: f64, message: String },

    /// The branch structures of the operands cannot be reconciled
    UnsupportedCombination(String),
}

impl XmuError {
    /// Create a domain error naming the offending parameter
    pub fn domain(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Domain {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create an evaluation error for a specific membership level
    pub fn evaluation(mu: f64, message: impl Into<String>) -> Self {
        Self::Evaluation {
            mu,
            message: message.into(),
        }
    }

    /// Create an unsupported-combination error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedCombination(message.into())
    }
}

impl fmt::Display for XmuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmuError::Domain { parameter, message } => {
                write!(f, "Domain error: parameter `{}`: {}", parameter, message)
            }
            XmuError::Evaluation { mu, message } => {
                write!(f, "Evaluation error at mu = {}: {}", mu, message)
            }
            XmuError::UnsupportedCombination(message) => {
                write!(f, "Unsupported combination: {}", message)
            }
        }
    }
}

impl std::error::Error for XmuError {}
