//! Ready-made conditions, one module per value domain.
//!
//! Every factory here is an inherent method on [`Filter`](crate::Filter)
//! that takes an accessor plus literal parameters, validates the
//! parameters, and adds one condition through
//! [`add_via`](crate::Filter::add_via). Parameter errors are raised before
//! anything is added.

mod boolean;
mod collection;
mod comparison;
mod date;
mod numeric;
mod string;

use std::sync::Arc;

/// A shareable accessor returning a reference into `T`.
///
/// Used where a factory takes several accessors at once, such as
/// [`Filter::contains_any`](crate::Filter::contains_any).
pub type Accessor<T, V> = Arc<dyn for<'a> Fn(&'a T) -> &'a V + Send + Sync>;

/// Wraps a closure as an [`Accessor`].
///
/// ```
/// use standout_sieve::field;
///
/// struct User {
///     name: String,
/// }
///
/// let name = field(|u: &User| u.name.as_str());
/// assert_eq!(name(&User { name: "ada".into() }), "ada");
/// ```
pub fn field<T, V, F>(accessor: F) -> Accessor<T, V>
where
    T: ?Sized,
    V: ?Sized,
    F: for<'a> Fn(&'a T) -> &'a V + Send + Sync + 'static,
{
    Arc::new(accessor)
}
