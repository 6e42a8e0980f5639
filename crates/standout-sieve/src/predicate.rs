//! Compiled predicates.
//!
//! A [`Predicate`] is what [`Filter::build`](crate::Filter::build) returns:
//! one closure over `T` that owns no builder state. It is cheap to clone and
//! can be evaluated from several threads at once.
//!
//! Besides testing single values it offers the usual collection helpers:
//!
//! ```
//! use standout_sieve::{Condition, Filter};
//!
//! let mut filter = Filter::new();
//! filter.add(Condition::new(|n: &i32| n % 2 == 0)).unwrap();
//! let even = filter.build();
//!
//! let numbers = [1, 2, 3, 4, 5, 6];
//! assert_eq!(even.filter(&numbers), vec![&2, &4, &6]);
//! assert_eq!(even.count(&numbers), 3);
//! assert_eq!(even.page(&numbers, 2, 2).unwrap(), vec![&6]);
//! ```

use std::fmt;

use crate::condition::{Condition, Shape};
use crate::error::Result;
use crate::validation;

/// A composed, reusable boolean test over `T`.
pub struct Predicate<T: ?Sized> {
    condition: Condition<T>,
}

impl<T: ?Sized> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Predicate {
            condition: self.condition.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.condition).finish()
    }
}

impl<T: ?Sized + 'static> Predicate<T> {
    pub(crate) fn from_condition(condition: Condition<T>) -> Self {
        Predicate { condition }
    }

    /// Tests a single value.
    pub fn test(&self, value: &T) -> bool {
        self.condition.evaluate(value)
    }

    /// Returns the logical complement of this predicate.
    pub fn negate(&self) -> Predicate<T> {
        Predicate {
            condition: self.condition.clone().not(),
        }
    }

    /// Returns the structural form of this predicate.
    ///
    /// The predicate of an empty filter is [`Shape::Literal(true)`](Shape::Literal).
    pub fn shape(&self) -> Shape {
        self.condition.shape()
    }

    /// Turns this predicate back into a condition, to be added to another
    /// filter.
    pub fn into_condition(self) -> Condition<T> {
        self.condition
    }
}

impl<T: ?Sized + 'static> From<Predicate<T>> for Condition<T> {
    fn from(predicate: Predicate<T>) -> Self {
        predicate.into_condition()
    }
}

// ============================================================================
// Execution
// ============================================================================

impl<T: 'static> Predicate<T> {
    /// Filters a slice, returning references to matching items.
    pub fn filter<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.test(item)).collect()
    }

    /// Filters and clones matching items.
    pub fn filter_cloned(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        items.iter().filter(|item| self.test(item)).cloned().collect()
    }

    /// Filters a vector in place, keeping only matching items.
    pub fn filter_mut(&self, items: &mut Vec<T>) {
        items.retain(|item| self.test(item));
    }

    /// Counts the number of matching items.
    pub fn count(&self, items: &[T]) -> usize {
        items.iter().filter(|item| self.test(item)).count()
    }

    /// Returns `true` if any item matches.
    pub fn any(&self, items: &[T]) -> bool {
        items.iter().any(|item| self.test(item))
    }

    /// Returns `true` if all items match.
    pub fn all(&self, items: &[T]) -> bool {
        items.iter().all(|item| self.test(item))
    }

    /// Finds the first matching item.
    pub fn find<'a>(&self, items: &'a [T]) -> Option<&'a T> {
        items.iter().find(|item| self.test(item))
    }

    /// Finds the first matching item and returns its index.
    pub fn position(&self, items: &[T]) -> Option<usize> {
        items.iter().position(|item| self.test(item))
    }

    /// Returns one page of the matching items.
    ///
    /// Pages are numbered from 1. A page past the end is empty. Fails with
    /// [`SieveError::OutOfRange`](crate::SieveError::OutOfRange) when `page`
    /// or `page_size` is zero.
    pub fn page<'a>(&self, items: &'a [T], page: usize, page_size: usize) -> Result<Vec<&'a T>> {
        validation::ensure_pagination(page, page_size)?;
        let skip = (page - 1).saturating_mul(page_size);
        Ok(items
            .iter()
            .filter(|item| self.test(item))
            .skip(skip)
            .take(page_size)
            .collect())
    }
}
