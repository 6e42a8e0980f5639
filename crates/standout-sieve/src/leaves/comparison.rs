use crate::condition::Condition;
use crate::error::Result;
use crate::filter::Filter;

impl<T: ?Sized + 'static> Filter<T> {
    /// Adds a check that an optional field is `None`.
    pub fn is_null<V, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        V: 'static,
        F: for<'a> Fn(&'a T) -> &'a Option<V> + Send + Sync + 'static,
    {
        self.add_via(accessor, Condition::new(|v: &Option<V>| v.is_none()))
    }

    /// Adds a check that an optional field is `Some`.
    pub fn not_null<V, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        V: 'static,
        F: for<'a> Fn(&'a T) -> &'a Option<V> + Send + Sync + 'static,
    {
        self.add_via(accessor, Condition::new(|v: &Option<V>| v.is_some()))
    }

    /// Adds a check that a field equals `value`.
    pub fn equal_to<V, F>(&mut self, accessor: F, value: V) -> Result<&mut Self>
    where
        V: PartialEq + Send + Sync + 'static,
        F: for<'a> Fn(&'a T) -> &'a V + Send + Sync + 'static,
    {
        self.add_via(accessor, Condition::new(move |v: &V| *v == value))
    }

    /// Adds a check that a field differs from `value`.
    pub fn not_equal_to<V, F>(&mut self, accessor: F, value: V) -> Result<&mut Self>
    where
        V: PartialEq + Send + Sync + 'static,
        F: for<'a> Fn(&'a T) -> &'a V + Send + Sync + 'static,
    {
        self.add_via(accessor, Condition::new(move |v: &V| *v != value))
    }
}
