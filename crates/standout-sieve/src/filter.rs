//! The composition core.
//!
//! A [`Filter`] accumulates conditions in order, each tagged with the
//! [`Join`] that attaches it to everything before it. Calling
//! [`or`](Filter::or) pulls the most recent condition out of that chain into
//! a pending OR group; conditions added while the group is open join the
//! group. [`build`](Filter::build) folds the chain left to right, then folds
//! the group with OR and attaches it with the current join.
//!
//! ```
//! use standout_sieve::{Condition, Filter};
//!
//! struct User {
//!     age: u32,
//!     admin: bool,
//!     banned: bool,
//! }
//!
//! let mut filter = Filter::new();
//! filter
//!     .add(Condition::new(|u: &User| !u.banned)).unwrap()
//!     .add_group(|g| {
//!         g.add(Condition::new(|u: &User| u.age >= 18))?
//!             .or()
//!             .add(Condition::new(|u: &User| u.admin))?;
//!         Ok(())
//!     }).unwrap();
//!
//! let allowed = filter.build();
//! assert!(allowed.test(&User { age: 30, admin: false, banned: false }));
//! assert!(allowed.test(&User { age: 12, admin: true, banned: false }));
//! assert!(!allowed.test(&User { age: 30, admin: true, banned: true }));
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::condition::{Condition, Eval, Shape};
use crate::config::SieveConfig;
use crate::error::{Result, SieveError};
use crate::predicate::Predicate;

/// How a condition attaches to the conditions before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Join {
    /// Both sides must hold.
    #[default]
    And,
    /// Either side may hold.
    Or,
}

impl Join {
    fn combine<T: ?Sized + 'static>(self, left: Eval<T>, right: Eval<T>) -> Eval<T> {
        match self {
            Join::And => Arc::new(move |item: &T| left(item) && right(item)),
            Join::Or => Arc::new(move |item: &T| left(item) || right(item)),
        }
    }
}

/// Fluent builder that composes conditions into one [`Predicate`].
pub struct Filter<T: ?Sized> {
    records: Vec<(Condition<T>, Join)>,
    group: Vec<Condition<T>>,
    next: Join,
    config: SieveConfig,
}

impl<T: ?Sized> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("records", &self.records)
            .field("group", &self.group)
            .field("next", &self.next)
            .field("config", &self.config)
            .finish()
    }
}

impl<T: ?Sized> Clone for Filter<T> {
    fn clone(&self) -> Self {
        Filter {
            records: self.records.clone(),
            group: self.group.clone(),
            next: self.next,
            config: self.config.clone(),
        }
    }
}

impl<T: ?Sized + 'static> Default for Filter<T> {
    fn default() -> Self {
        Filter::with_config(SieveConfig::default())
    }
}

impl<T: ?Sized + 'static> Filter<T> {
    /// Creates an empty filter. An empty filter matches everything.
    pub fn new() -> Self {
        Filter::default()
    }

    /// Creates an empty filter with the given configuration.
    pub fn with_config(config: SieveConfig) -> Self {
        Filter {
            records: Vec::new(),
            group: Vec::new(),
            next: Join::And,
            config,
        }
    }

    // ========================================================================
    // Composition
    // ========================================================================

    /// Appends a condition.
    ///
    /// If an OR group is open the condition joins it, otherwise it is
    /// attached to the chain with the current join. The join resets to AND
    /// either way.
    ///
    /// Fails with [`SieveError::DegenerateCondition`] for literal `true`,
    /// `false` and null conditions and for comparisons against a literal `0`
    /// on the left. Nothing is changed on failure.
    pub fn add(&mut self, condition: Condition<T>) -> Result<&mut Self> {
        if self.config.reject_degenerate {
            if let Some(reason) = condition.degeneracy() {
                debug!(%reason, "rejecting degenerate condition");
                return Err(SieveError::DegenerateCondition(reason));
            }
        }

        if self.group.is_empty() {
            self.records.push((condition, self.next));
        } else {
            self.group.push(condition);
        }
        self.next = Join::And;
        Ok(self)
    }

    /// Appends a condition over a field of `T`.
    ///
    /// `check` is written against the field type and rewritten to read the
    /// field through `accessor`. The accessor must be a pure read.
    pub fn add_via<V, F>(&mut self, accessor: F, check: Condition<V>) -> Result<&mut Self>
    where
        V: ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a V + Send + Sync + 'static,
    {
        self.add(check.via(accessor))
    }

    /// Appends a condition over a value computed from `T`.
    pub fn add_computed<V, F>(&mut self, accessor: F, check: Condition<V>) -> Result<&mut Self>
    where
        V: 'static,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.add(check.via_owned(accessor))
    }

    /// Appends a parenthesized sub-expression.
    ///
    /// `configure` receives a fresh filter sharing this filter's
    /// configuration. Its compiled predicate is added here as a single
    /// condition. A group that adds nothing compiles to the literal `true`
    /// and is rejected as degenerate.
    pub fn add_group<F>(&mut self, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Filter<T>) -> Result<()>,
    {
        let mut sub = Filter::with_config(self.config.clone());
        configure(&mut sub)?;
        trace!(
            records = sub.records.len(),
            grouped = sub.group.len(),
            "folding sub-group"
        );
        self.add(sub.build().into_condition())
    }

    /// Makes the next condition join with AND.
    ///
    /// An open OR group is discarded: its conditions are dropped, not folded
    /// into the chain.
    pub fn and(&mut self) -> &mut Self {
        if !self.group.is_empty() {
            debug!(
                dropped = self.group.len(),
                "and() discards the pending or-group"
            );
        }
        self.next = Join::And;
        self.group.clear();
        self
    }

    /// Makes the next condition join with OR.
    ///
    /// The most recent condition is moved out of the chain to seed an OR
    /// group, so `a.or().b` reads as `a || b`.
    pub fn or(&mut self) -> &mut Self {
        self.next = Join::Or;
        if let Some((last, _)) = self.records.pop() {
            self.group = vec![last];
        }
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Compiles the accumulated conditions into a predicate.
    ///
    /// Does not change the filter; calling it again without changes yields
    /// an equivalent predicate.
    pub fn build(&self) -> Predicate<T> {
        if self.records.is_empty() && self.group.is_empty() {
            return Predicate::from_condition(Condition::literal(true));
        }
        trace!(
            records = self.records.len(),
            grouped = self.group.len(),
            next = ?self.next,
            "compiling filter"
        );

        let mut body: Option<Eval<T>> = None;
        for (condition, join) in &self.records {
            let eval = Arc::clone(condition.eval());
            body = Some(match body {
                None => eval,
                Some(acc) => join.combine(acc, eval),
            });
        }

        let group = self
            .group
            .iter()
            .map(|condition| Arc::clone(condition.eval()))
            .reduce(|acc, eval| Join::Or.combine(acc, eval));
        if let Some(group) = group {
            body = Some(match body {
                None => group,
                Some(acc) => self.next.combine(acc, group),
            });
        }

        match body {
            Some(eval) => Predicate::from_condition(Condition::from_parts(Shape::Logical, eval)),
            None => Predicate::from_condition(Condition::literal(true)),
        }
    }

    /// Compiles the logical complement of [`build`](Self::build).
    pub fn build_negated(&self) -> Predicate<T> {
        self.build().negate()
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the number of conditions held, grouped or not.
    pub fn len(&self) -> usize {
        self.records.len() + self.group.len()
    }

    /// Returns `true` if no condition is held (the filter matches everything).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.group.is_empty()
    }

    /// Returns `true` while an OR group is open.
    pub fn has_pending_group(&self) -> bool {
        !self.group.is_empty()
    }

    /// Returns the join the next condition will use.
    pub fn next_join(&self) -> Join {
        self.next
    }

    /// Returns this filter's configuration.
    pub fn config(&self) -> &SieveConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Degeneracy;

    fn gt(n: i32) -> Condition<i32> {
        Condition::new(move |v: &i32| *v > n)
    }

    fn eq(n: i32) -> Condition<i32> {
        Condition::new(move |v: &i32| *v == n)
    }

    fn truth_table(p: &Predicate<i32>) -> Vec<bool> {
        (-2..=12).map(|v| p.test(&v)).collect()
    }

    #[test]
    fn empty_matches_everything() {
        let filter = Filter::<i32>::new();
        let p = filter.build();
        assert!(p.test(&i32::MIN));
        assert!(p.test(&0));
        assert!(filter.is_empty());
    }

    #[test]
    fn add_defaults_to_and() {
        let mut filter = Filter::new();
        filter.add(gt(2)).unwrap().add(gt(5)).unwrap();
        let p = filter.build();
        assert!(p.test(&6));
        assert!(!p.test(&4));
        assert_eq!(filter.next_join(), Join::And);
    }

    #[test]
    fn or_pulls_previous_into_group() {
        let mut filter = Filter::new();
        filter.add(eq(1)).unwrap().or();
        assert!(filter.has_pending_group());
        assert_eq!(filter.next_join(), Join::Or);

        filter.add(eq(2)).unwrap();
        assert_eq!(filter.next_join(), Join::And);

        let p = filter.build();
        assert!(p.test(&1));
        assert!(p.test(&2));
        assert!(!p.test(&3));
    }

    #[test]
    fn or_on_empty_only_sets_join() {
        let mut filter = Filter::new();
        filter.or();
        assert!(!filter.has_pending_group());
        assert_eq!(filter.next_join(), Join::Or);

        filter.add(eq(4)).unwrap();
        let p = filter.build();
        assert!(p.test(&4));
        assert!(!p.test(&5));
    }

    #[test]
    fn and_discards_open_group() {
        let mut filter = Filter::new();
        filter
            .add(gt(0))
            .unwrap()
            .or()
            .add(eq(-1))
            .unwrap()
            .and()
            .add(gt(5))
            .unwrap();

        assert!(!filter.has_pending_group());
        assert_eq!(filter.len(), 1);

        // The whole group, including the first condition, is gone.
        let p = filter.build();
        assert!(p.test(&6));
        assert!(!p.test(&-1));
        assert!(!p.test(&3));
    }

    #[test]
    fn conditions_after_or_stay_in_group() {
        let mut filter = Filter::new();
        filter
            .add(eq(1))
            .unwrap()
            .or()
            .add(eq(2))
            .unwrap()
            .add(eq(3))
            .unwrap();

        assert_eq!(filter.len(), 3);
        let p = filter.build();
        assert!(p.test(&1) && p.test(&2) && p.test(&3));
        assert!(!p.test(&4));
    }

    #[test]
    fn group_attaches_with_current_join() {
        // chain: >0 AND <10, then or() pulls <10 into the group with ==42
        let mut filter = Filter::new();
        filter
            .add(gt(0))
            .unwrap()
            .add(Condition::new(|v: &i32| *v < 10))
            .unwrap()
            .or()
            .add(eq(42))
            .unwrap();

        let p = filter.build();
        assert!(p.test(&5));
        assert!(p.test(&42));
        assert!(!p.test(&-5));
        assert!(!p.test(&11));
    }

    #[test]
    fn trailing_or_attaches_group_with_or() {
        let mut filter = Filter::new();
        filter.add(gt(5)).unwrap().add(gt(100)).unwrap();
        filter.or();
        // chain: [>5], group: [>100], join OR  =>  >5 || >100
        let p = filter.build();
        assert!(p.test(&6));
        assert!(!p.test(&5));
    }

    #[test]
    fn degenerate_rejected_without_mutation() {
        let mut filter = Filter::new();
        filter.add(gt(3)).unwrap().or();
        let before = truth_table(&filter.build());

        for (condition, reason) in [
            (Condition::literal(true), Degeneracy::AlwaysTrue),
            (Condition::literal(false), Degeneracy::AlwaysFalse),
            (Condition::null(), Degeneracy::AlwaysNull),
        ] {
            let err = filter.add(condition).unwrap_err();
            assert_eq!(err.degeneracy(), Some(reason));
        }

        assert_eq!(truth_table(&filter.build()), before);
        assert_eq!(filter.next_join(), Join::Or);
    }

    #[test]
    fn degenerate_allowed_when_disabled() {
        let mut filter = Filter::with_config(SieveConfig::default().reject_degenerate(false));
        filter.add(Condition::literal(false)).unwrap();
        assert!(!filter.build().test(&1));
    }

    #[test]
    fn empty_group_is_degenerate() {
        let mut filter = Filter::<i32>::new();
        let err = filter.add_group(|_| Ok(())).unwrap_err();
        assert_eq!(err.degeneracy(), Some(Degeneracy::AlwaysTrue));
        assert!(filter.is_empty());
    }

    #[test]
    fn group_errors_propagate() {
        let mut filter = Filter::<i32>::new();
        filter.add(gt(0)).unwrap();
        let err = filter
            .add_group(|g| {
                g.add(Condition::null())?;
                Ok(())
            })
            .unwrap_err();
        assert_eq!(err.degeneracy(), Some(Degeneracy::AlwaysNull));
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn group_inherits_config() {
        let config = SieveConfig::default().reject_degenerate(false);
        let mut filter = Filter::<i32>::with_config(config.clone());
        filter
            .add_group(|g| {
                assert_eq!(g.config(), &config);
                g.add(Condition::literal(false))?;
                Ok(())
            })
            .unwrap();
        assert!(!filter.build().test(&0));
    }

    #[test]
    fn build_is_repeatable_and_sees_later_adds() {
        let mut filter = Filter::new();
        filter.add(gt(0)).unwrap();
        let first = filter.build();
        let second = filter.build();
        assert_eq!(truth_table(&first), truth_table(&second));

        filter.add(Condition::new(|v: &i32| v % 2 == 0)).unwrap();
        let third = filter.build();
        assert!(first.test(&3));
        assert!(!third.test(&3));
    }

    #[test]
    fn negated_is_complement() {
        let mut filter = Filter::new();
        filter.add(gt(2)).unwrap().or().add(eq(-1)).unwrap();
        let p = filter.build();
        let n = filter.build_negated();
        for v in -2..=12 {
            assert_eq!(n.test(&v), !p.test(&v));
        }
    }

    #[test]
    fn add_via_reads_field() {
        struct Row {
            field: i32,
        }
        let mut filter = Filter::new();
        filter
            .add_via(|r: &Row| &r.field, Condition::new(|v: &i32| *v > 5))
            .unwrap();
        let p = filter.build();
        assert!(p.test(&Row { field: 6 }));
        assert!(!p.test(&Row { field: 5 }));
    }

    #[test]
    fn add_computed_reads_derived_value() {
        let mut filter = Filter::<String>::new();
        filter
            .add_computed(|s: &String| s.len(), Condition::new(|n: &usize| *n > 2))
            .unwrap();
        let p = filter.build();
        assert!(p.test(&"abc".to_string()));
        assert!(!p.test(&"ab".to_string()));
    }
}
