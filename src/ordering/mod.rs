//! The [`Ordering`] type and the orderings it can be built from.
//!
//! An ordering is one of a fixed set of variants:
//! - [`natural`](Ordering::natural), the order given by [`Ord`].
//! - [`from_fn`](Ordering::from_fn), the order of a comparison function.
//! - [`explicit`](Ordering::explicit), the order of a list of values.
//! - [`all_equal`](Ordering::all_equal), where every value is equivalent.
//! - [`using_to_string`](Ordering::using_to_string), the order of the
//!   values' string representations.
//! - [`arbitrary`](Ordering::arbitrary), an order of object identities.
//!
//! and the variants created by the combinators on [`Ordering`], which wrap
//! an existing ordering. Orderings are immutable and cheap to clone, the
//! wrapped orderings are shared.

use std::{any::Any, cmp, fmt, sync::Arc};

use crate::{Comparator, Result};

mod arbitrary;
mod by_function;
mod explicit;
mod lexicographical;
mod nulls;

use by_function::{ByFunction, OnKeys};
use lexicographical::Lexicographical;
use nulls::Nulls;

/// An immutable, composable ordering of `T`.
///
/// Use the methods of [`Comparator`] to compare, sort and select with it.
///
/// ```
/// use ordering::prelude::*;
///
/// let ordering = Ordering::natural().nulls_first();
/// let sorted = ordering.sorted_copy([Some(3), None, Some(1), None, Some(2)]).unwrap();
/// assert_eq!(sorted, [None, None, Some(1), Some(2), Some(3)]);
/// assert_eq!(ordering.to_string(), "natural().nulls_first()");
/// ```
pub struct Ordering<T> {
    variant: Arc<Variant<T>>,
}

enum Variant<T> {
    Natural(fn(&T, &T) -> cmp::Ordering),
    From(Box<dyn Fn(&T, &T) -> cmp::Ordering + Send + Sync>),
    Reverse(Ordering<T>),
    NullsFirst(Box<dyn Adapter<T>>),
    NullsLast(Box<dyn Adapter<T>>),
    ByFunction(Box<dyn Adapter<T>>),
    OnKeys(Box<dyn Adapter<T>>),
    Explicit(Box<dyn Adapter<T>>),
    // Primary ordering first.
    Compound(Vec<Ordering<T>>),
    Lexicographical(Box<dyn Adapter<T>>),
    AllEqual,
    UsingToString(fn(&T) -> String),
    Arbitrary(fn(&T, &T) -> cmp::Ordering),
}

/// The part of a variant that doesn't fit in `Variant<T>` directly, because
/// it orders `T` through some other type or needs more bounds on `T`.
trait Adapter<T>: Send + Sync {
    fn compare(&self, a: &T, b: &T) -> Result<cmp::Ordering>;

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    fn as_any(&self) -> &dyn Any;

    /// Returns true if `other` is the same kind of adapter, holding equal
    /// parts.
    fn same_as(&self, other: &dyn Adapter<T>) -> bool;
}

impl<T> Clone for Ordering<T> {
    fn clone(&self) -> Self {
        Self { variant: Arc::clone(&self.variant) }
    }
}

impl<T> Ordering<T> {
    fn new(variant: Variant<T>) -> Self {
        Self { variant: Arc::new(variant) }
    }

    /// The ordering given by [`Ord`].
    pub fn natural() -> Self
    where
        T: Ord,
    {
        Self::new(Variant::Natural(<T as Ord>::cmp))
    }

    /// The ordering given by the comparison function `f`.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&T, &T) -> cmp::Ordering + Send + Sync + 'static,
    {
        Self::new(Variant::From(Box::new(f)))
    }

    /// An ordering where every value is equivalent to every other value.
    ///
    /// Sorting with it is a no-op, as the sorts are stable. Combined with
    /// [`nulls_last`](Ordering::nulls_last) it moves every `None` to the end
    /// and keeps everything else in place.
    pub fn all_equal() -> Self {
        Self::new(Variant::AllEqual)
    }

    /// Orders values by their string representations, from
    /// [`ToString::to_string`].
    pub fn using_to_string() -> Self
    where
        T: fmt::Display,
    {
        Self::new(Variant::UsingToString(<T as ToString>::to_string))
    }

    /// An ordering which tries every ordering in `orderings`, in turn, until
    /// one of them doesn't consider the values equivalent. If `orderings` is
    /// empty then every value is equivalent.
    pub fn compound_all<I>(orderings: I) -> Self
    where
        I: IntoIterator<Item = Ordering<T>>,
    {
        Self::new(Variant::Compound(orderings.into_iter().collect()))
    }

    /// The reverse of this ordering. Reversing a reversed ordering gives back
    /// the ordering it was made from.
    #[must_use]
    pub fn reverse(&self) -> Self {
        match &*self.variant {
            Variant::Reverse(forward) => forward.clone(),
            _ => Self::new(Variant::Reverse(self.clone())),
        }
    }

    /// Orders `None` before every `Some` value, and `Some` values by this
    /// ordering.
    #[must_use]
    pub fn nulls_first(&self) -> Ordering<Option<T>>
    where
        T: 'static,
    {
        Ordering::new(Variant::NullsFirst(Box::new(Nulls::new(self.clone(), true))))
    }

    /// Orders `None` after every `Some` value, and `Some` values by this
    /// ordering.
    #[must_use]
    pub fn nulls_last(&self) -> Ordering<Option<T>>
    where
        T: 'static,
    {
        Ordering::new(Variant::NullsLast(Box::new(Nulls::new(self.clone(), false))))
    }

    /// Orders values of `S` by applying `function` to them and comparing the
    /// results with this ordering.
    ///
    /// ```
    /// use ordering::prelude::*;
    ///
    /// let by_abs = Ordering::natural().on_result_of(|x: &i32| x.abs());
    /// assert_eq!(by_abs.sorted_copy([-3, 2, -1]).unwrap(), [-1, 2, -3]);
    /// ```
    #[must_use]
    pub fn on_result_of<S, F>(&self, function: F) -> Ordering<S>
    where
        F: Fn(&S) -> T + Send + Sync + 'static,
        S: 'static,
        T: 'static,
    {
        Ordering::new(Variant::ByFunction(Box::new(ByFunction::new(function, self.clone()))))
    }

    /// Orders pairs by comparing their first field with this ordering.
    #[must_use]
    pub fn on_keys<V>(&self) -> Ordering<(T, V)>
    where
        T: 'static,
        V: 'static,
    {
        Ordering::new(Variant::OnKeys(Box::new(OnKeys::new(self.clone()))))
    }

    /// An ordering which first uses this ordering, and uses `secondary` to
    /// break ties.
    #[must_use]
    pub fn compound(&self, secondary: Ordering<T>) -> Self {
        let orderings = match &*self.variant {
            Variant::Compound(orderings) => {
                let mut orderings = orderings.clone();
                orderings.push(secondary);
                orderings
            }
            _ => vec![self.clone(), secondary],
        };
        Self::new(Variant::Compound(orderings))
    }

    /// Orders sequences of `T` element by element, using this ordering. The
    /// first pair of elements that aren't equivalent decides the order. If one
    /// sequence is a prefix of the other, the shorter sequence comes first.
    ///
    /// ```
    /// use ordering::prelude::*;
    ///
    /// let lex = Ordering::<u8>::natural().lexicographical();
    /// let words: Vec<Vec<u8>> = vec![vec![1, 2], vec![1], vec![0, 9, 9]];
    /// assert_eq!(lex.sorted_copy(words).unwrap(), [vec![0, 9, 9], vec![1], vec![1, 2]]);
    /// ```
    #[must_use]
    pub fn lexicographical<S>(&self) -> Ordering<S>
    where
        for<'a> &'a S: IntoIterator<Item = &'a T>,
        S: 'static,
        T: 'static,
    {
        Ordering::new(Variant::Lexicographical(Box::new(Lexicographical::new(self.clone()))))
    }
}

impl<T> Comparator<T> for Ordering<T> {
    fn compare(&self, a: &T, b: &T) -> Result<cmp::Ordering> {
        match &*self.variant {
            Variant::Natural(cmp) | Variant::Arbitrary(cmp) => Ok(cmp(a, b)),
            Variant::From(f) => Ok(f(a, b)),
            Variant::Reverse(forward) => forward.compare(b, a),
            Variant::NullsFirst(adapter)
            | Variant::NullsLast(adapter)
            | Variant::ByFunction(adapter)
            | Variant::OnKeys(adapter)
            | Variant::Explicit(adapter)
            | Variant::Lexicographical(adapter) => adapter.compare(a, b),
            Variant::Compound(orderings) => {
                for ordering in orderings {
                    let result = ordering.compare(a, b)?;
                    if result.is_ne() {
                        return Ok(result);
                    }
                }
                Ok(cmp::Ordering::Equal)
            }
            Variant::AllEqual => Ok(cmp::Ordering::Equal),
            Variant::UsingToString(to_string) => Ok(to_string(a).cmp(&to_string(b))),
        }
    }
}

impl<T> PartialEq for Ordering<T> {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.variant, &other.variant) {
            return true;
        }
        match (&*self.variant, &*other.variant) {
            // There is only one of each of these for every `T`.
            (Variant::Natural(_), Variant::Natural(_))
            | (Variant::AllEqual, Variant::AllEqual)
            | (Variant::UsingToString(_), Variant::UsingToString(_))
            | (Variant::Arbitrary(_), Variant::Arbitrary(_)) => true,
            (Variant::Reverse(a), Variant::Reverse(b)) => a == b,
            (Variant::Compound(a), Variant::Compound(b)) => a == b,
            (Variant::NullsFirst(a), Variant::NullsFirst(b))
            | (Variant::NullsLast(a), Variant::NullsLast(b))
            | (Variant::ByFunction(a), Variant::ByFunction(b))
            | (Variant::OnKeys(a), Variant::OnKeys(b))
            | (Variant::Explicit(a), Variant::Explicit(b))
            | (Variant::Lexicographical(a), Variant::Lexicographical(b)) => a.same_as(&**b),
            // Functions can't be compared, so only clones are equal, which
            // was checked above.
            _ => false,
        }
    }
}

impl<T> fmt::Display for Ordering<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.variant {
            Variant::Natural(_) => write!(f, "natural()"),
            Variant::From(_) => write!(f, "from_fn(..)"),
            Variant::Reverse(forward) => write!(f, "{forward}.reverse()"),
            Variant::NullsFirst(adapter)
            | Variant::NullsLast(adapter)
            | Variant::ByFunction(adapter)
            | Variant::OnKeys(adapter)
            | Variant::Explicit(adapter)
            | Variant::Lexicographical(adapter) => adapter.describe(f),
            Variant::Compound(orderings) => {
                write!(f, "compound([")?;
                for (i, ordering) in orderings.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{ordering}")?;
                }
                write!(f, "])")
            }
            Variant::AllEqual => write!(f, "all_equal()"),
            Variant::UsingToString(_) => write!(f, "using_to_string()"),
            Variant::Arbitrary(_) => write!(f, "arbitrary()"),
        }
    }
}

impl<T> fmt::Debug for Ordering<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ordering({self})")
    }
}
