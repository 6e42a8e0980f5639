//! Conditions over slices and set membership.
//!
//! Collection accessors return a slice; a `Vec` field is read with
//! `|o| o.items.as_slice()`.

use std::collections::HashSet;
use std::hash::Hash;

use crate::condition::Condition;
use crate::error::Result;
use crate::filter::Filter;
use crate::validation;

impl<T: ?Sized + 'static> Filter<T> {
    /// At least one element.
    pub fn not_empty_collection<V, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        V: 'static,
        F: for<'a> Fn(&'a T) -> &'a [V] + Send + Sync + 'static,
    {
        self.add_via(accessor, Condition::new(|items: &[V]| !items.is_empty()))
    }

    /// The field is one of `values`.
    pub fn in_set<V, F, I>(&mut self, accessor: F, values: I) -> Result<&mut Self>
    where
        V: Eq + Hash + Send + Sync + 'static,
        F: for<'a> Fn(&'a T) -> &'a V + Send + Sync + 'static,
        I: IntoIterator<Item = V>,
    {
        let set: HashSet<V> = values.into_iter().collect();
        self.add_via(accessor, Condition::new(move |v: &V| set.contains(v)))
    }

    /// The field is none of `values`.
    pub fn not_in_set<V, F, I>(&mut self, accessor: F, values: I) -> Result<&mut Self>
    where
        V: Eq + Hash + Send + Sync + 'static,
        F: for<'a> Fn(&'a T) -> &'a V + Send + Sync + 'static,
        I: IntoIterator<Item = V>,
    {
        let set: HashSet<V> = values.into_iter().collect();
        self.add_via(accessor, Condition::new(move |v: &V| !set.contains(v)))
    }

    /// Exactly `count` elements.
    pub fn count<V, F>(&mut self, accessor: F, count: usize) -> Result<&mut Self>
    where
        V: 'static,
        F: for<'a> Fn(&'a T) -> &'a [V] + Send + Sync + 'static,
    {
        self.add_via(accessor, Condition::new(move |items: &[V]| items.len() == count))
    }

    /// Between `min` and `max` elements, both inclusive.
    pub fn count_between<V, F>(&mut self, accessor: F, min: usize, max: usize) -> Result<&mut Self>
    where
        V: 'static,
        F: for<'a> Fn(&'a T) -> &'a [V] + Send + Sync + 'static,
    {
        validation::ensure_ordered(min, max)?;
        self.add_via(
            accessor,
            Condition::new(move |items: &[V]| (min..=max).contains(&items.len())),
        )
    }

    /// Every element satisfies `check`. True for an empty slice.
    pub fn all<V, F, P>(&mut self, accessor: F, check: P) -> Result<&mut Self>
    where
        V: 'static,
        F: for<'a> Fn(&'a T) -> &'a [V] + Send + Sync + 'static,
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.add_via(accessor, Condition::new(move |items: &[V]| items.iter().all(&check)))
    }

    /// Some element satisfies `check`.
    pub fn any<V, F, P>(&mut self, accessor: F, check: P) -> Result<&mut Self>
    where
        V: 'static,
        F: for<'a> Fn(&'a T) -> &'a [V] + Send + Sync + 'static,
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.add_via(accessor, Condition::new(move |items: &[V]| items.iter().any(&check)))
    }

    /// No element satisfies `check`.
    pub fn none<V, F, P>(&mut self, accessor: F, check: P) -> Result<&mut Self>
    where
        V: 'static,
        F: for<'a> Fn(&'a T) -> &'a [V] + Send + Sync + 'static,
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.add_via(accessor, Condition::new(move |items: &[V]| !items.iter().any(&check)))
    }

    /// Some element equals `value`.
    pub fn contains_item<V, F>(&mut self, accessor: F, value: V) -> Result<&mut Self>
    where
        V: PartialEq + Send + Sync + 'static,
        F: for<'a> Fn(&'a T) -> &'a [V] + Send + Sync + 'static,
    {
        self.add_via(accessor, Condition::new(move |items: &[V]| items.contains(&value)))
    }

    /// Exactly `count` distinct elements.
    pub fn distinct_count<V, F>(&mut self, accessor: F, count: usize) -> Result<&mut Self>
    where
        V: Eq + Hash + 'static,
        F: for<'a> Fn(&'a T) -> &'a [V] + Send + Sync + 'static,
    {
        self.add_via(
            accessor,
            Condition::new(move |items: &[V]| {
                items.iter().collect::<HashSet<&V>>().len() == count
            }),
        )
    }
}
