//! Error types for the sieve crate.

use std::fmt;

use thiserror::Error;

/// Why a condition was rejected as degenerate.
///
/// Detection is structural: it looks at the [`Shape`](crate::Shape) a
/// condition was built with, never at what the condition returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Degeneracy {
    /// The condition is the literal `true`.
    AlwaysTrue,
    /// The condition is the literal `false`.
    AlwaysFalse,
    /// The condition is a literal null test.
    AlwaysNull,
    /// The condition is a comparison whose left operand is the literal `0`.
    ZeroLeftOperand,
}

impl Degeneracy {
    /// Returns the literal the condition collapses to.
    pub fn as_str(self) -> &'static str {
        match self {
            Degeneracy::AlwaysTrue => "true",
            Degeneracy::AlwaysFalse => "false",
            Degeneracy::AlwaysNull => "null",
            Degeneracy::ZeroLeftOperand => "0",
        }
    }
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.as_str())
    }
}

/// Errors that can occur while composing a filter.
///
/// Every error is raised synchronously by the call that misused the API.
/// A failed call never leaves a partial mutation behind.
#[derive(Debug, Error)]
pub enum SieveError {
    /// The condition can never discriminate between entities.
    #[error("the condition provided has no effect because it is always {0}")]
    DegenerateCondition(Degeneracy),

    /// A required accessor or routine is missing.
    #[error("missing required argument: {0}")]
    NullArgument(String),

    /// A literal parameter is semantically invalid.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// A count parameter is outside its permitted range.
    #[error("argument `{name}` is out of range ({value}): {reason}")]
    OutOfRange {
        name: &'static str,
        value: i64,
        reason: &'static str,
    },

    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SieveError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SieveError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Returns the degeneracy reason if this is a `DegenerateCondition` error.
    pub fn degeneracy(&self) -> Option<Degeneracy> {
        match self {
            SieveError::DegenerateCondition(d) => Some(*d),
            _ => None,
        }
    }
}

/// Result type for sieve operations.
pub type Result<T> = std::result::Result<T, SieveError>;
