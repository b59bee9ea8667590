use std::{any::Any, cmp, fmt, marker::PhantomData, ptr};

use super::{Adapter, Ordering};
use crate::{Comparator, Result};

/// Orders `S` by the `T` that `function` maps it to.
pub(super) struct ByFunction<S, T, F> {
    function: F,
    inner: Ordering<T>,
    _source: PhantomData<fn(&S)>,
}

impl<S, T, F> ByFunction<S, T, F> {
    pub(super) fn new(function: F, inner: Ordering<T>) -> Self {
        ByFunction { function, inner, _source: PhantomData }
    }
}

impl<S, T, F> Adapter<S> for ByFunction<S, T, F>
where
    F: Fn(&S) -> T + Send + Sync + 'static,
    S: 'static,
    T: 'static,
{
    fn compare(&self, a: &S, b: &S) -> Result<cmp::Ordering> {
        self.inner.compare(&(self.function)(a), &(self.function)(b))
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.on_result_of(..)", self.inner)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    // The function can't be compared, so this has to be the same instance.
    fn same_as(&self, other: &dyn Adapter<S>) -> bool {
        other.as_any().downcast_ref::<Self>().is_some_and(|other| ptr::eq(self, other))
    }
}

/// Orders pairs by their first field.
pub(super) struct OnKeys<K, V> {
    inner: Ordering<K>,
    _value: PhantomData<fn(&V)>,
}

impl<K, V> OnKeys<K, V> {
    pub(super) fn new(inner: Ordering<K>) -> Self {
        OnKeys { inner, _value: PhantomData }
    }
}

impl<K: 'static, V: 'static> Adapter<(K, V)> for OnKeys<K, V> {
    fn compare(&self, a: &(K, V), b: &(K, V)) -> Result<cmp::Ordering> {
        self.inner.compare(&a.0, &b.0)
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.on_keys()", self.inner)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn same_as(&self, other: &dyn Adapter<(K, V)>) -> bool {
        other.as_any().downcast_ref::<Self>().is_some_and(|other| self.inner == other.inner)
    }
}
