use crate::condition::Condition;
use crate::error::Result;
use crate::filter::Filter;

impl<T: ?Sized + 'static> Filter<T> {
    /// Adds a check that `flag` is `true`.
    pub fn is_true<F>(&mut self, flag: F) -> Result<&mut Self>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.add(Condition::new(flag))
    }

    /// Adds a check that `flag` is `false`.
    pub fn is_false<F>(&mut self, flag: F) -> Result<&mut Self>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.add(Condition::new(move |item: &T| !flag(item)))
    }
}
