//! Numeric conditions.
//!
//! One generic family covers every primitive: the accessor may return any
//! `N: Into<Number> + Copy`, and literal bounds may be of a different
//! numeric type than the field. Comparisons go through [`Number::compare`],
//! so a NaN field never matches.

use std::cmp::Ordering;

use crate::condition::{Condition, Operand};
use crate::error::Result;
use crate::filter::Filter;
use crate::op::Op;
use crate::validation;
use crate::value::Number;

fn compare_literal<N>(op: Op, value: Number) -> Result<Condition<N>>
where
    N: Into<Number> + Copy + 'static,
{
    Condition::compare(Operand::this(), op, Operand::Literal(value))
}

impl<T: ?Sized + 'static> Filter<T> {
    fn add_comparison<N, F>(&mut self, accessor: F, op: Op, value: Number) -> Result<&mut Self>
    where
        N: Into<Number> + Copy + 'static,
        F: for<'a> Fn(&'a T) -> &'a N + Send + Sync + 'static,
    {
        let check = compare_literal(op, value)?;
        self.add_via(accessor, check)
    }

    /// Equal to zero.
    pub fn zero<N, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        N: Into<Number> + Copy + 'static,
        F: for<'a> Fn(&'a T) -> &'a N + Send + Sync + 'static,
    {
        self.add_comparison(accessor, Op::Eq, Number::I64(0))
    }

    /// Anything but zero.
    pub fn not_zero<N, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        N: Into<Number> + Copy + 'static,
        F: for<'a> Fn(&'a T) -> &'a N + Send + Sync + 'static,
    {
        self.add_comparison(accessor, Op::Ne, Number::I64(0))
    }

    /// Strictly greater than zero.
    pub fn positive<N, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        N: Into<Number> + Copy + 'static,
        F: for<'a> Fn(&'a T) -> &'a N + Send + Sync + 'static,
    {
        self.add_comparison(accessor, Op::Gt, Number::I64(0))
    }

    /// Strictly less than zero.
    pub fn negative<N, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        N: Into<Number> + Copy + 'static,
        F: for<'a> Fn(&'a T) -> &'a N + Send + Sync + 'static,
    {
        self.add_comparison(accessor, Op::Lt, Number::I64(0))
    }

    /// Strictly greater than `value`.
    pub fn greater_than<N, F>(&mut self, accessor: F, value: impl Into<Number>) -> Result<&mut Self>
    where
        N: Into<Number> + Copy + 'static,
        F: for<'a> Fn(&'a T) -> &'a N + Send + Sync + 'static,
    {
        self.add_comparison(accessor, Op::Gt, value.into())
    }

    /// Greater than or equal to `value`.
    pub fn greater_than_or_equal_to<N, F>(
        &mut self,
        accessor: F,
        value: impl Into<Number>,
    ) -> Result<&mut Self>
    where
        N: Into<Number> + Copy + 'static,
        F: for<'a> Fn(&'a T) -> &'a N + Send + Sync + 'static,
    {
        self.add_comparison(accessor, Op::Gte, value.into())
    }

    /// Strictly less than `value`.
    pub fn less_than<N, F>(&mut self, accessor: F, value: impl Into<Number>) -> Result<&mut Self>
    where
        N: Into<Number> + Copy + 'static,
        F: for<'a> Fn(&'a T) -> &'a N + Send + Sync + 'static,
    {
        self.add_comparison(accessor, Op::Lt, value.into())
    }

    /// Less than or equal to `value`.
    pub fn less_than_or_equal_to<N, F>(
        &mut self,
        accessor: F,
        value: impl Into<Number>,
    ) -> Result<&mut Self>
    where
        N: Into<Number> + Copy + 'static,
        F: for<'a> Fn(&'a T) -> &'a N + Send + Sync + 'static,
    {
        self.add_comparison(accessor, Op::Lte, value.into())
    }

    /// At least `min`.
    pub fn min_value<N, F>(&mut self, accessor: F, min: impl Into<Number>) -> Result<&mut Self>
    where
        N: Into<Number> + Copy + 'static,
        F: for<'a> Fn(&'a T) -> &'a N + Send + Sync + 'static,
    {
        self.add_comparison(accessor, Op::Gte, min.into())
    }

    /// At most `max`.
    pub fn max_value<N, F>(&mut self, accessor: F, max: impl Into<Number>) -> Result<&mut Self>
    where
        N: Into<Number> + Copy + 'static,
        F: for<'a> Fn(&'a T) -> &'a N + Send + Sync + 'static,
    {
        self.add_comparison(accessor, Op::Lte, max.into())
    }

    /// Between `min` and `max`, both inclusive.
    ///
    /// Fails with [`SieveError::InvalidArgument`](crate::SieveError::InvalidArgument)
    /// when `min > max`.
    pub fn in_range<N, F>(
        &mut self,
        accessor: F,
        min: impl Into<Number>,
        max: impl Into<Number>,
    ) -> Result<&mut Self>
    where
        N: Into<Number> + Copy + 'static,
        F: for<'a> Fn(&'a T) -> &'a N + Send + Sync + 'static,
    {
        let (min, max) = (min.into(), max.into());
        validation::ensure_ordered(min, max)?;
        let check = compare_literal::<N>(Op::Gte, min)?.and(compare_literal(Op::Lte, max)?);
        self.add_via(accessor, check)
    }

    /// Between two other fields of the same item, both inclusive.
    ///
    /// Items whose own bounds are inverted never match.
    pub fn in_range_fields<N, F, L, H>(&mut self, accessor: F, min: L, max: H) -> Result<&mut Self>
    where
        N: Into<Number> + Copy + 'static,
        F: for<'a> Fn(&'a T) -> &'a N + Send + Sync + 'static,
        L: for<'a> Fn(&'a T) -> &'a N + Send + Sync + 'static,
        H: for<'a> Fn(&'a T) -> &'a N + Send + Sync + 'static,
    {
        self.add(Condition::new(move |item: &T| {
            let value: Number = (*accessor(item)).into();
            let low = value.compare((*min(item)).into());
            let high = value.compare((*max(item)).into());
            matches!(low, Some(Ordering::Greater | Ordering::Equal))
                && matches!(high, Some(Ordering::Less | Ordering::Equal))
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::SieveError;
    use crate::filter::Filter;
    use crate::predicate::Predicate;

    #[derive(Debug, Clone, Copy)]
    struct Reading {
        value: f64,
        count: u32,
        delta: i16,
        low: i16,
        high: i16,
    }

    fn reading(value: f64, count: u32, delta: i16) -> Reading {
        Reading {
            value,
            count,
            delta,
            low: -5,
            high: 5,
        }
    }

    fn deltas(p: &Predicate<Reading>, candidates: &[i16]) -> Vec<bool> {
        candidates.iter().map(|d| p.test(&reading(0.0, 0, *d))).collect()
    }

    #[test]
    fn sign_checks() {
        let mut f = Filter::new();
        f.zero(|r: &Reading| &r.delta).unwrap();
        assert_eq!(deltas(&f.build(), &[-1, 0, 1]), [false, true, false]);

        let mut f = Filter::new();
        f.not_zero(|r: &Reading| &r.delta).unwrap();
        assert_eq!(deltas(&f.build(), &[-1, 0, 1]), [true, false, true]);

        let mut f = Filter::new();
        f.positive(|r: &Reading| &r.delta).unwrap();
        assert_eq!(deltas(&f.build(), &[-1, 0, 1]), [false, false, true]);

        let mut f = Filter::new();
        f.negative(|r: &Reading| &r.delta).unwrap();
        assert_eq!(deltas(&f.build(), &[-1, 0, 1]), [true, false, false]);
    }

    #[test]
    fn float_zero() {
        let mut f = Filter::new();
        f.zero(|r: &Reading| &r.value).unwrap();
        let p = f.build();
        assert!(p.test(&reading(0.0, 0, 0)));
        assert!(p.test(&reading(-0.0, 0, 0)));
        assert!(!p.test(&reading(0.1, 0, 0)));
        assert!(!p.test(&reading(f64::NAN, 0, 0)));
    }

    #[test]
    fn comparisons_across_types() {
        let mut f = Filter::new();
        f.greater_than(|r: &Reading| &r.count, 2i64)
            .unwrap()
            .less_than_or_equal_to(|r: &Reading| &r.count, 4.5f64)
            .unwrap();
        let p = f.build();
        let counts: Vec<_> = (0..6).map(|c| p.test(&reading(0.0, c, 0))).collect();
        assert_eq!(counts, [false, false, false, true, true, false]);

        let mut f = Filter::new();
        f.greater_than_or_equal_to(|r: &Reading| &r.delta, -1i32)
            .unwrap()
            .less_than(|r: &Reading| &r.delta, 1u8)
            .unwrap();
        assert_eq!(deltas(&f.build(), &[-2, -1, 0, 1]), [false, true, true, false]);
    }

    #[test]
    fn min_and_max_value() {
        let mut f = Filter::new();
        f.min_value(|r: &Reading| &r.delta, -1i32)
            .unwrap()
            .max_value(|r: &Reading| &r.delta, 1i32)
            .unwrap();
        assert_eq!(deltas(&f.build(), &[-2, -1, 1, 2]), [false, true, true, false]);
    }

    #[test]
    fn in_range_inclusive() {
        let mut f = Filter::new();
        f.in_range(|r: &Reading| &r.delta, -2i32, 2i32).unwrap();
        assert_eq!(deltas(&f.build(), &[-3, -2, 0, 2, 3]), [false, true, true, true, false]);

        let mut f = Filter::<Reading>::new();
        assert!(matches!(
            f.in_range(|r: &Reading| &r.delta, 3i32, 1i32),
            Err(SieveError::InvalidArgument { name: "min", .. })
        ));
        assert!(f.is_empty());
    }

    #[test]
    fn in_range_rejects_nan_bounds() {
        let mut f = Filter::<Reading>::new();
        assert!(matches!(
            f.in_range(|r: &Reading| &r.value, f64::NAN, 5i32),
            Err(SieveError::InvalidArgument { name: "min", .. })
        ));
        assert!(matches!(
            f.in_range(|r: &Reading| &r.value, 0i32, f64::NAN),
            Err(SieveError::InvalidArgument { name: "min", .. })
        ));
        assert!(f.is_empty());
    }

    #[test]
    fn large_integers_compare_exactly_with_floats() {
        let mut f = Filter::new();
        f.greater_than(|n: &i64| n, 9_007_199_254_740_992.0f64).unwrap();
        let p = f.build();
        assert!(p.test(&9_007_199_254_740_993));
        assert!(!p.test(&9_007_199_254_740_992));
    }

    #[test]
    fn in_range_fields_reads_bounds() {
        let mut f = Filter::new();
        f.in_range_fields(|r: &Reading| &r.delta, |r: &Reading| &r.low, |r: &Reading| &r.high)
            .unwrap();
        assert_eq!(deltas(&f.build(), &[-6, -5, 5, 6]), [false, true, true, false]);

        let mut inverted = reading(0.0, 0, 0);
        inverted.low = 3;
        inverted.high = -3;
        assert!(!f.build().test(&inverted));
    }

    #[test]
    fn numeric_leaves_are_not_degenerate() {
        // The compared field sits on the left, so a literal 0 bound is fine.
        let mut f = Filter::<Reading>::new();
        assert!(f.less_than(|r: &Reading| &r.delta, 0i32).is_ok());
        assert!(f.greater_than(|r: &Reading| &r.count, 0u32).is_ok());
    }
}
