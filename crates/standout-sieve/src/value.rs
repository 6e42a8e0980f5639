//! Runtime value types for field comparison.
//!
//! [`Number`] unifies every primitive numeric type so that one set of
//! comparison conditions serves `i8` through `f64`. [`Value`] is the borrowed
//! runtime value of a named field, used by the [`Fields`](crate::Fields)
//! clause path.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Comparisons between different variants are exact: an integer is never
/// rounded to `f64` before it is compared with a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            // A negative signed value is below every unsigned one.
            (Number::I64(a), Number::U64(b)) => Some(if a < 0 {
                Ordering::Less
            } else {
                (a as u64).cmp(&b)
            }),
            (Number::U64(a), Number::I64(b)) => Some(if b < 0 {
                Ordering::Greater
            } else {
                a.cmp(&(b as u64))
            }),
            (Number::I64(a), Number::F64(b)) => cmp_int_float(i128::from(a), b),
            (Number::U64(a), Number::F64(b)) => cmp_int_float(i128::from(a), b),
            (Number::F64(a), Number::I64(b)) => {
                cmp_int_float(i128::from(b), a).map(Ordering::reverse)
            }
            (Number::F64(a), Number::U64(b)) => {
                cmp_int_float(i128::from(b), a).map(Ordering::reverse)
            }
        }
    }

    /// Returns `true` for an integer zero (`I64(0)` or `U64(0)`).
    ///
    /// Floating-point zero is excluded.
    pub fn is_integer_zero(self) -> bool {
        matches!(self, Number::I64(0) | Number::U64(0))
    }
}

/// Orders an integer against a float without rounding the integer.
fn cmp_int_float(int: i128, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    // 2^127; every i64 and u64 lies well inside.
    const LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;
    let whole = float.trunc();
    if whole >= LIMIT {
        return Some(Ordering::Less);
    }
    if whole < -LIMIT {
        return Some(Ordering::Greater);
    }
    match int.cmp(&(whole as i128)) {
        Ordering::Equal => 0f64.partial_cmp(&(float - whole)),
        unequal => Some(unequal),
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )+
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// The kind of a runtime value, used to validate operators up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Text.
    String,
    /// Any numeric type.
    Number,
    /// Boolean.
    Bool,
    /// Calendar date and time.
    DateTime,
}

impl ValueKind {
    /// Returns the display name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Bool => "bool",
            ValueKind::DateTime => "datetime",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime value of a named field, borrowed from the source struct.
///
/// # Example
///
/// ```
/// use standout_sieve::{Number, Value};
///
/// struct Task {
///     name: String,
///     priority: u8,
/// }
///
/// fn field<'a>(task: &'a Task, name: &str) -> Value<'a> {
///     match name {
///         "name" => Value::String(&task.name),
///         "priority" => Value::Number(Number::from(task.priority)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Boolean value.
    Bool(bool),
    /// Date and time value.
    DateTime(NaiveDateTime),
    /// Field not present or null.
    None,
}

impl<'a> Value<'a> {
    /// Returns the kind of this value, or `None` for [`Value::None`].
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::String(_) => Some(ValueKind::String),
            Value::Number(_) => Some(ValueKind::Number),
            Value::Bool(_) => Some(ValueKind::Bool),
            Value::DateTime(_) => Some(ValueKind::DateTime),
            Value::None => None,
        }
    }

    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(s)
    }
}

impl From<NaiveDateTime> for Value<'_> {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl<T: Into<Number>> From<Option<T>> for Value<'_> {
    fn from(n: Option<T>) -> Self {
        n.map_or(Value::None, |n| Value::Number(n.into()))
    }
}
