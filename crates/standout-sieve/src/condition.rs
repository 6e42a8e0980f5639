//! Condition fragments.
//!
//! A [`Condition`] is one boolean check over a value. Besides the closure it
//! evaluates, every condition records the [`Shape`] it was built with. The
//! shape is what degeneracy detection inspects: a condition built with
//! [`Condition::literal`] is known to be constant without ever running it,
//! while one built with [`Condition::new`] is opaque.
//!
//! Conditions are written once against the narrow value type and then
//! rewritten onto an entity field with [`Condition::via`]:
//!
//! ```
//! use standout_sieve::Condition;
//!
//! struct Order {
//!     total: u32,
//! }
//!
//! let large = Condition::new(|v: &u32| *v > 100);
//! let on_order = large.via(|o: &Order| &o.total);
//!
//! assert!(on_order.evaluate(&Order { total: 250 }));
//! assert!(!on_order.evaluate(&Order { total: 20 }));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::{Degeneracy, Result, SieveError};
use crate::op::Op;
use crate::value::{Number, ValueKind};

pub(crate) type Eval<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Structural form of a condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// An arbitrary closure; nothing is known about it.
    Opaque,
    /// A boolean literal.
    Literal(bool),
    /// A literal null test.
    Null,
    /// A binary comparison. `left` holds the left operand when it is a literal.
    Comparison { left: Option<Number> },
    /// An AND, OR or NOT combination of other conditions.
    Logical,
}

impl Shape {
    /// Returns why a condition of this shape is degenerate, if it is.
    ///
    /// Only literal forms are caught; a closure that happens to always return
    /// `true` is [`Shape::Opaque`] and passes.
    pub fn degeneracy(self) -> Option<Degeneracy> {
        match self {
            Shape::Literal(true) => Some(Degeneracy::AlwaysTrue),
            Shape::Literal(false) => Some(Degeneracy::AlwaysFalse),
            Shape::Null => Some(Degeneracy::AlwaysNull),
            Shape::Comparison { left: Some(n) } if n.is_integer_zero() => {
                Some(Degeneracy::ZeroLeftOperand)
            }
            _ => None,
        }
    }
}

/// One boolean check over a `T`.
pub struct Condition<T: ?Sized> {
    shape: Shape,
    eval: Eval<T>,
}

impl<T: ?Sized> Clone for Condition<T> {
    fn clone(&self) -> Self {
        Condition {
            shape: self.shape,
            eval: Arc::clone(&self.eval),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Condition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition")
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized + 'static> Condition<T> {
    /// Wraps a closure as an opaque condition.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Condition {
            shape: Shape::Opaque,
            eval: Arc::new(check),
        }
    }

    /// A condition that is the boolean literal `value`.
    pub fn literal(value: bool) -> Self {
        Condition {
            shape: Shape::Literal(value),
            eval: Arc::new(move |_: &T| value),
        }
    }

    /// A literal null test. Evaluates to `false`.
    pub fn null() -> Self {
        Condition {
            shape: Shape::Null,
            eval: Arc::new(|_: &T| false),
        }
    }

    /// A numeric comparison `left op right`.
    ///
    /// NaN operands compare as unordered, so the condition is `false` for them.
    /// Only ordering operators are accepted.
    pub fn compare(left: Operand<T>, op: Op, right: Operand<T>) -> Result<Self> {
        if !op.accepts(ValueKind::Number) {
            return Err(SieveError::invalid(
                "op",
                format!("operator '{op}' is not valid for number comparisons"),
            ));
        }
        let shape = Shape::Comparison {
            left: left.as_literal(),
        };
        Ok(Condition {
            shape,
            eval: Arc::new(move |item: &T| {
                left.resolve(item)
                    .compare(right.resolve(item))
                    .is_some_and(|ordering| op.eval_ordering(ordering))
            }),
        })
    }

    pub(crate) fn from_parts(shape: Shape, eval: Eval<T>) -> Self {
        Condition { shape, eval }
    }

    /// Returns the structural form of this condition.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns why this condition is degenerate, if it is.
    pub fn degeneracy(&self) -> Option<Degeneracy> {
        self.shape.degeneracy()
    }

    /// Evaluates this condition.
    pub fn evaluate(&self, value: &T) -> bool {
        (self.eval)(value)
    }

    pub(crate) fn eval(&self) -> &Eval<T> {
        &self.eval
    }

    /// Rewrites this condition to read its value through `accessor`.
    ///
    /// The shape carries over unchanged: replacing the parameter does not
    /// alter the structure of the check.
    pub fn via<S, F>(self, accessor: F) -> Condition<S>
    where
        S: ?Sized + 'static,
        F: for<'a> Fn(&'a S) -> &'a T + Send + Sync + 'static,
    {
        let eval = self.eval;
        Condition {
            shape: self.shape,
            eval: Arc::new(move |item: &S| eval(accessor(item))),
        }
    }

    /// Like [`via`](Self::via), for accessors that compute an owned value.
    pub fn via_owned<S, F>(self, accessor: F) -> Condition<S>
    where
        S: ?Sized + 'static,
        T: Sized,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        let eval = self.eval;
        Condition {
            shape: self.shape,
            eval: Arc::new(move |item: &S| eval(&accessor(item))),
        }
    }

    /// Both conditions must hold.
    pub fn and(self, other: Condition<T>) -> Self {
        let (a, b) = (self.eval, other.eval);
        Condition {
            shape: Shape::Logical,
            eval: Arc::new(move |item: &T| a(item) && b(item)),
        }
    }

    /// At least one condition must hold.
    pub fn or(self, other: Condition<T>) -> Self {
        let (a, b) = (self.eval, other.eval);
        Condition {
            shape: Shape::Logical,
            eval: Arc::new(move |item: &T| a(item) || b(item)),
        }
    }

    /// The logical complement of this condition.
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        let inner = self.eval;
        Condition {
            shape: Shape::Logical,
            eval: Arc::new(move |item: &T| !inner(item)),
        }
    }
}

/// One side of a numeric comparison.
pub enum Operand<T: ?Sized> {
    /// A constant.
    Literal(Number),
    /// A value read from the compared item.
    Value(Arc<dyn Fn(&T) -> Number + Send + Sync>),
}

impl<T: ?Sized> Clone for Operand<T> {
    fn clone(&self) -> Self {
        match self {
            Operand::Literal(n) => Operand::Literal(*n),
            Operand::Value(f) => Operand::Value(Arc::clone(f)),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Operand<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(n) => f.debug_tuple("Literal").field(n).finish(),
            Operand::Value(_) => f.write_str("Value(..)"),
        }
    }
}

impl<T: ?Sized> Operand<T> {
    /// A constant operand.
    pub fn literal(n: impl Into<Number>) -> Self {
        Operand::Literal(n.into())
    }

    /// An operand read from the item.
    pub fn field<F>(read: F) -> Self
    where
        F: Fn(&T) -> Number + Send + Sync + 'static,
    {
        Operand::Value(Arc::new(read))
    }

    /// Returns the constant, if this operand is one.
    pub fn as_literal(&self) -> Option<Number> {
        match self {
            Operand::Literal(n) => Some(*n),
            Operand::Value(_) => None,
        }
    }

    fn resolve(&self, item: &T) -> Number {
        match self {
            Operand::Literal(n) => *n,
            Operand::Value(read) => read(item),
        }
    }
}

impl<N> Operand<N>
where
    N: Into<Number> + Copy + 'static,
{
    /// The compared item itself.
    pub fn this() -> Self {
        Operand::Value(Arc::new(|n: &N| (*n).into()))
    }
}
