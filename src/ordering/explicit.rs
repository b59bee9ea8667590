use std::{
    any::Any,
    cmp,
    collections::{HashMap, hash_map::Entry},
    fmt,
    hash::Hash,
};

use super::{Adapter, Ordering, Variant};
use crate::{Error, Result};

impl<T> Ordering<T>
where
    T: Eq + Hash + fmt::Debug + Send + Sync + 'static,
{
    /// Orders values in the order they appear in `values`.
    ///
    /// Returns [`Error::DuplicateValue`] if a value appears more than once.
    /// Comparing a value which isn't in `values` returns
    /// [`Error::IncomparableValue`].
    ///
    /// ```
    /// use ordering::{Error, prelude::*};
    ///
    /// let ordering = Ordering::explicit(["b", "a", "c"]).unwrap();
    /// assert!(ordering.compare(&"a", &"c").unwrap().is_lt());
    /// assert_eq!(ordering.compare(&"a", &"z"), Err(Error::IncomparableValue("\"z\"".into())));
    /// ```
    pub fn explicit<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Ok(Self::new(Variant::Explicit(Box::new(Explicit::new(values)?))))
    }
}

/// Values ranked by their position in a list.
pub(super) struct Explicit<T> {
    ranks: HashMap<T, usize>,
    description: String,
}

impl<T: Eq + Hash + fmt::Debug> Explicit<T> {
    pub(super) fn new<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut ranks = HashMap::new();
        let mut listed = Vec::new();
        for value in values {
            let shown = format!("{value:?}");
            let rank = ranks.len();
            match ranks.entry(value) {
                Entry::Occupied(_) => return Err(Error::DuplicateValue(shown)),
                Entry::Vacant(entry) => {
                    entry.insert(rank);
                }
            }
            listed.push(shown);
        }
        let description = format!("explicit([{}])", listed.join(", "));
        Ok(Explicit { ranks, description })
    }

    fn rank(&self, value: &T) -> Result<usize> {
        self.ranks.get(value).copied().ok_or_else(|| Error::IncomparableValue(format!("{value:?}")))
    }
}

impl<T> Adapter<T> for Explicit<T>
where
    T: Eq + Hash + fmt::Debug + Send + Sync + 'static,
{
    fn compare(&self, a: &T, b: &T) -> Result<cmp::Ordering> {
        let a = self.rank(a)?;
        let b = self.rank(b)?;
        Ok(a.cmp(&b))
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn same_as(&self, other: &dyn Adapter<T>) -> bool {
        other.as_any().downcast_ref::<Self>().is_some_and(|other| self.ranks == other.ranks)
    }
}
