//! By-name field clauses.
//!
//! Most conditions are attached through typed accessors. For filters whose
//! shape is only known at runtime (a field name typed by a user, a saved
//! view) a type can implement [`Fields`] and take clauses by name:
//!
//! ```
//! use standout_sieve::{Fields, Filter, Number, Op, Value};
//!
//! struct Task {
//!     name: String,
//!     priority: u8,
//! }
//!
//! impl Fields for Task {
//!     const FIELDS: &'static [&'static str] = &["name", "priority"];
//!
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "name" => Value::String(&self.name),
//!             "priority" => Value::Number(Number::from(self.priority)),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! let mut filter = Filter::<Task>::new();
//! filter
//!     .where_field("priority", Op::Gte, 3u8).unwrap()
//!     .where_field("name", Op::StartsWith, "fix").unwrap();
//!
//! let p = filter.build();
//! assert!(p.test(&Task { name: "fix login".into(), priority: 4 }));
//! assert!(!p.test(&Task { name: "fix typo".into(), priority: 1 }));
//! assert!(filter.where_field("owner", Op::Eq, "ada").is_err());
//! ```

use chrono::NaiveDateTime;
use regex::Regex;

use crate::condition::Condition;
use crate::error::{Result, SieveError};
use crate::filter::Filter;
use crate::op::Op;
use crate::validation;
use crate::value::{Number, Value, ValueKind};

/// Types whose fields can be addressed by name.
pub trait Fields {
    /// Names accepted by [`field_value`](Self::field_value).
    const FIELDS: &'static [&'static str];

    /// Returns the value of a field, or [`Value::None`] if it is unset.
    fn field_value(&self, field: &str) -> Value<'_>;
}

/// A single by-name check: field, operator and comparison value.
#[derive(Debug, Clone)]
pub struct Clause {
    /// The field name to compare.
    pub field: String,
    /// The comparison operator.
    pub op: Op,
    /// The value to compare against.
    pub value: ClauseValue,
}

impl Clause {
    /// Creates a clause without validating it.
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<ClauseValue>) -> Self {
        Clause {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Creates a clause for a field of `T`, validating the name and operator.
    ///
    /// A string value with [`Op::Regex`] is compiled here.
    pub fn checked<T: Fields>(field: &str, op: Op, value: ClauseValue) -> Result<Self> {
        if !T::FIELDS.contains(&field) {
            return Err(SieveError::NullArgument(format!(
                "no accessor for field `{field}`"
            )));
        }

        let value = match (op, value) {
            (Op::Regex, ClauseValue::String(pattern)) => {
                if pattern.is_empty() {
                    return Err(SieveError::invalid("pattern", "must not be empty"));
                }
                ClauseValue::Regex(Regex::new(&pattern)?)
            }
            (Op::Regex, value @ ClauseValue::Regex(_)) => value,
            (_, ClauseValue::Regex(_)) | (Op::Regex, _) => {
                return Err(SieveError::invalid(
                    "op",
                    "regex values and the regex operator only go together",
                ));
            }
            (op, value) => {
                let kind = value.kind();
                if !op.accepts(kind) {
                    return Err(SieveError::invalid(
                        "op",
                        format!("operator '{op}' does not apply to {kind} values"),
                    ));
                }
                value
            }
        };

        Ok(Clause {
            field: field.to_string(),
            op,
            value,
        })
    }

    /// Evaluates this clause against a field value.
    ///
    /// Mismatched kinds and missing values never match.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        match (&self.value, field_value) {
            (ClauseValue::String(pattern), Value::String(s)) => self.match_string(s, pattern),
            (ClauseValue::Regex(regex), Value::String(s)) => regex.is_match(s),
            (ClauseValue::Number(clause), Value::Number(field)) => field
                .compare(*clause)
                .is_some_and(|ordering| self.op.eval_ordering(ordering)),
            (ClauseValue::DateTime(clause), Value::DateTime(field)) => {
                self.op.eval_ordering(field.cmp(clause))
            }
            (ClauseValue::Bool(clause), Value::Bool(field)) => match self.op {
                Op::Eq => field == clause,
                Op::Ne => field != clause,
                _ => false,
            },
            _ => false,
        }
    }

    fn match_string(&self, field: &str, pattern: &str) -> bool {
        match self.op {
            Op::Eq => field == pattern,
            Op::Ne => field != pattern,
            Op::StartsWith => field.starts_with(pattern),
            Op::EndsWith => field.ends_with(pattern),
            Op::Contains => field.contains(pattern),
            _ => false,
        }
    }

    /// Turns this clause into a condition over `T`.
    pub fn into_condition<T: Fields + 'static>(self) -> Condition<T> {
        Condition::new(move |item: &T| self.matches(&item.field_value(&self.field)))
    }
}

/// Owned comparison value stored in a [`Clause`].
#[derive(Debug, Clone)]
pub enum ClauseValue {
    /// String value.
    String(String),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Date and time value.
    DateTime(NaiveDateTime),
    /// Compiled regular expression.
    Regex(Regex),
}

impl ClauseValue {
    /// Returns the kind of field value this compares against.
    pub fn kind(&self) -> ValueKind {
        match self {
            ClauseValue::String(_) | ClauseValue::Regex(_) => ValueKind::String,
            ClauseValue::Number(_) => ValueKind::Number,
            ClauseValue::Bool(_) => ValueKind::Bool,
            ClauseValue::DateTime(_) => ValueKind::DateTime,
        }
    }
}

impl From<String> for ClauseValue {
    fn from(s: String) -> Self {
        ClauseValue::String(s)
    }
}

impl From<&str> for ClauseValue {
    fn from(s: &str) -> Self {
        ClauseValue::String(s.to_string())
    }
}

impl From<bool> for ClauseValue {
    fn from(b: bool) -> Self {
        ClauseValue::Bool(b)
    }
}

impl From<NaiveDateTime> for ClauseValue {
    fn from(dt: NaiveDateTime) -> Self {
        ClauseValue::DateTime(dt)
    }
}

impl From<Regex> for ClauseValue {
    fn from(r: Regex) -> Self {
        ClauseValue::Regex(r)
    }
}

impl From<Number> for ClauseValue {
    fn from(n: Number) -> Self {
        ClauseValue::Number(n)
    }
}

macro_rules! clause_number_from {
    ($($source:ty),+) => {
        $(
            impl From<$source> for ClauseValue {
                fn from(n: $source) -> Self {
                    ClauseValue::Number(Number::from(n))
                }
            }
        )+
    };
}

clause_number_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: Fields + 'static> Filter<T> {
    /// Adds a clause on a named field.
    ///
    /// Fails with [`SieveError::NullArgument`] if `T` has no such field and
    /// with [`SieveError::InvalidArgument`] if `op` does not apply to the
    /// value's kind.
    pub fn where_field(
        &mut self,
        field: &str,
        op: Op,
        value: impl Into<ClauseValue>,
    ) -> Result<&mut Self> {
        let clause = Clause::checked::<T>(field, op, value.into())?;
        self.add(clause.into_condition())
    }

    /// Adds a regular expression clause on a named string field.
    pub fn where_regex(&mut self, field: &str, pattern: &str) -> Result<&mut Self> {
        validation::ensure_not_blank("pattern", pattern)?;
        self.where_field(field, Op::Regex, pattern)
    }
}
