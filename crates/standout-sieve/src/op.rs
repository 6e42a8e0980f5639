//! Comparison operators for conditions and field clauses.
//!
//! The [`Op`] enum covers both ordering comparisons (used by
//! [`Condition::compare`](crate::Condition::compare) and the numeric
//! conditions) and the string operators available to by-name clauses.
//! [`Op::accepts`] tells which value kinds an operator applies to.

use std::cmp::Ordering;
use std::fmt;

use crate::value::ValueKind;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Earlier than (alias for `Lt` on dates).
    Before,
    /// Later than (alias for `Gt` on dates).
    After,
    /// String starts with prefix.
    StartsWith,
    /// String ends with suffix.
    EndsWith,
    /// String contains substring.
    Contains,
    /// String matches regular expression.
    Regex,
}

impl Op {
    /// Returns `true` if this operator can be decided from an [`Ordering`].
    pub fn is_ordering(self) -> bool {
        matches!(
            self.normalize(),
            Op::Eq | Op::Ne | Op::Gt | Op::Gte | Op::Lt | Op::Lte
        )
    }

    /// Returns `true` if this operator applies to values of `kind`.
    pub fn accepts(self, kind: ValueKind) -> bool {
        match kind {
            ValueKind::String => matches!(
                self,
                Op::Eq | Op::Ne | Op::StartsWith | Op::EndsWith | Op::Contains | Op::Regex
            ),
            ValueKind::Number => self.is_ordering() && !matches!(self, Op::Before | Op::After),
            ValueKind::DateTime => self.is_ordering(),
            ValueKind::Bool => matches!(self, Op::Eq | Op::Ne),
        }
    }

    /// Maps date aliases onto their canonical operators.
    pub fn normalize(self) -> Op {
        match self {
            Op::Before => Op::Lt,
            Op::After => Op::Gt,
            other => other,
        }
    }

    /// Evaluates an ordering-based operator.
    ///
    /// Always `false` for string operators.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self.normalize() {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Returns the operator as written in an expression.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::Gt | Op::After => ">",
            Op::Gte => ">=",
            Op::Lt | Op::Before => "<",
            Op::Lte => "<=",
            Op::StartsWith => "startswith",
            Op::EndsWith => "endswith",
            Op::Contains => "contains",
            Op::Regex => "~",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
