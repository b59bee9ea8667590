use std::{any::Any, cmp, fmt, marker::PhantomData};

use super::{Adapter, Ordering};
use crate::{Comparator, Result};

/// Orders sequences `S` of `T` element by element.
pub(super) struct Lexicographical<T, S> {
    inner: Ordering<T>,
    _sequence: PhantomData<fn(&S)>,
}

impl<T, S> Lexicographical<T, S> {
    pub(super) fn new(inner: Ordering<T>) -> Self {
        Lexicographical { inner, _sequence: PhantomData }
    }
}

impl<T, S> Adapter<S> for Lexicographical<T, S>
where
    for<'a> &'a S: IntoIterator<Item = &'a T>,
    S: 'static,
    T: 'static,
{
    fn compare(&self, a: &S, b: &S) -> Result<cmp::Ordering> {
        let mut left = a.into_iter();
        let mut right = b.into_iter();
        loop {
            match (left.next(), right.next()) {
                (Some(x), Some(y)) => {
                    let result = self.inner.compare(x, y)?;
                    if result.is_ne() {
                        return Ok(result);
                    }
                }
                // `b` is a prefix of `a`
                (Some(_), None) => return Ok(cmp::Ordering::Greater),
                (None, Some(_)) => return Ok(cmp::Ordering::Less),
                (None, None) => return Ok(cmp::Ordering::Equal),
            }
        }
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.lexicographical()", self.inner)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn same_as(&self, other: &dyn Adapter<S>) -> bool {
        other.as_any().downcast_ref::<Self>().is_some_and(|other| self.inner == other.inner)
    }
}
