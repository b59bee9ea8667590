use std::{any::Any, cmp, fmt};

use super::{Adapter, Ordering};
use crate::{Comparator, Result};

/// Orders `Option<T>`, with every `None` before or after every `Some`.
pub(super) struct Nulls<T> {
    inner: Ordering<T>,
    first: bool,
}

impl<T> Nulls<T> {
    pub(super) fn new(inner: Ordering<T>, first: bool) -> Self {
        Nulls { inner, first }
    }
}

impl<T: 'static> Adapter<Option<T>> for Nulls<T> {
    fn compare(&self, a: &Option<T>, b: &Option<T>) -> Result<cmp::Ordering> {
        let none_to_some = if self.first { cmp::Ordering::Less } else { cmp::Ordering::Greater };
        match (a, b) {
            (None, None) => Ok(cmp::Ordering::Equal),
            (None, Some(_)) => Ok(none_to_some),
            (Some(_), None) => Ok(none_to_some.reverse()),
            (Some(a), Some(b)) => self.inner.compare(a, b),
        }
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.first { "nulls_first" } else { "nulls_last" };
        write!(f, "{}.{name}()", self.inner)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn same_as(&self, other: &dyn Adapter<Option<T>>) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| self.first == other.first && self.inner == other.inner)
    }
}
