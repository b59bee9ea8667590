use std::cmp;

use crate::{Error, Result, Selection, sort, top_k};

/// A three-way comparison over `T`, and everything that can be derived from
/// it.
///
/// Only [`compare`](Comparator::compare) has to be implemented. It is
/// implemented for [`Ordering`](crate::Ordering) and for every closure
/// `Fn(&T, &T) -> std::cmp::Ordering`.
///
/// Whenever two elements are equivalent, the derived methods prefer the one
/// that came first.
pub trait Comparator<T> {
    /// Compare `a` with `b`. Only orderings over a known domain can fail,
    /// see [`Ordering::explicit`](crate::Ordering::explicit).
    fn compare(&self, a: &T, b: &T) -> Result<cmp::Ordering>;

    /// The lesser of `a` and `b`, or `a` if they are equivalent.
    fn min(&self, a: T, b: T) -> Result<T> {
        if self.compare(&a, &b)?.is_le() { Ok(a) } else { Ok(b) }
    }

    /// The greater of `a` and `b`, or `a` if they are equivalent.
    fn max(&self, a: T, b: T) -> Result<T> {
        if self.compare(&a, &b)?.is_ge() { Ok(a) } else { Ok(b) }
    }

    /// The least element of `iter`, returns [`Error::Empty`] if it has no
    /// elements.
    fn min_of<I>(&self, iter: I) -> Result<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = iter.into_iter();
        let first = iter.next().ok_or(Error::Empty)?;
        iter.try_fold(first, |least, x| self.min(least, x))
    }

    /// The greatest element of `iter`, returns [`Error::Empty`] if it has no
    /// elements.
    fn max_of<I>(&self, iter: I) -> Result<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut iter = iter.into_iter();
        let first = iter.next().ok_or(Error::Empty)?;
        iter.try_fold(first, |greatest, x| self.max(greatest, x))
    }

    /// The least of at least three values, compared in argument order.
    fn min_many<I>(&self, a: T, b: T, c: T, rest: I) -> Result<T>
    where
        I: IntoIterator<Item = T>,
    {
        let least = self.min(self.min(a, b)?, c)?;
        rest.into_iter().try_fold(least, |least, x| self.min(least, x))
    }

    /// The greatest of at least three values, compared in argument order.
    fn max_many<I>(&self, a: T, b: T, c: T, rest: I) -> Result<T>
    where
        I: IntoIterator<Item = T>,
    {
        let greatest = self.max(self.max(a, b)?, c)?;
        rest.into_iter().try_fold(greatest, |greatest, x| self.max(greatest, x))
    }

    /// Returns true if every element is less than or equivalent to the next.
    fn is_ordered(&self, v: &[T]) -> Result<bool> {
        for pair in v.windows(2) {
            if self.compare(&pair[0], &pair[1])?.is_gt() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Returns true if every element is strictly less than the next.
    fn is_strictly_ordered(&self, v: &[T]) -> Result<bool> {
        for pair in v.windows(2) {
            if self.compare(&pair[0], &pair[1])?.is_ge() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Search `sorted`, which has to be sorted by this comparator, for `key`.
    ///
    /// Like [`slice::binary_search`], the inner result is `Ok` with the index
    /// of a matching element, or `Err` with the index where `key` could be
    /// inserted while keeping `sorted` sorted.
    ///
    /// ```
    /// use ordering::prelude::*;
    ///
    /// let desc = Ordering::natural().reverse();
    /// let v = [9, 7, 7, 2];
    /// assert_eq!(desc.binary_search(&v, &2), Ok(Ok(3)));
    /// assert_eq!(desc.binary_search(&v, &8), Ok(Err(1)));
    /// ```
    fn binary_search(&self, sorted: &[T], key: &T) -> Result<std::result::Result<usize, usize>> {
        let mut low = 0;
        let mut high = sorted.len();
        while low < high {
            let mid = low + (high - low) / 2;
            match self.compare(&sorted[mid], key)? {
                cmp::Ordering::Less => low = mid + 1,
                cmp::Ordering::Greater => high = mid,
                cmp::Ordering::Equal => return Ok(Ok(mid)),
            }
        }
        Ok(Err(low))
    }

    /// Collect `iter` into a `Vec` sorted by this comparator. The sort is
    /// stable.
    fn sorted_copy<I>(&self, iter: I) -> Result<Vec<T>>
    where
        I: IntoIterator<Item = T>,
    {
        sort::merge_sort(iter.into_iter().collect(), self)
    }

    /// The `k` least elements of `iter`, in ascending order.
    ///
    /// Unless most of the input is kept, this doesn't sort the whole input
    /// and only keeps about `2 * k` elements in memory at once. Equivalent
    /// elements may then be returned in any order.
    ///
    /// ```
    /// use ordering::prelude::*;
    ///
    /// let natural = Ordering::natural();
    /// let least = natural.least_of([5, 1, 4, 1, 5, 9, 2, 6], 3).unwrap();
    /// assert_eq!(&least[..], [1, 1, 2]);
    /// ```
    fn least_of<I>(&self, iter: I, k: usize) -> Result<Selection<T>>
    where
        I: IntoIterator<Item = T>,
    {
        top_k::least_of(self, iter, k)
    }

    /// The `k` greatest elements of `iter`, in descending order. See
    /// [`least_of`](Comparator::least_of).
    fn greatest_of<I>(&self, iter: I, k: usize) -> Result<Selection<T>>
    where
        I: IntoIterator<Item = T>,
    {
        top_k::least_of(&Reversed(ByRef(self)), iter, k)
    }
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> cmp::Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Result<cmp::Ordering> {
        Ok(self(a, b))
    }
}

/// A comparator in the opposite order of the one it wraps.
#[derive(Clone, Copy, Debug)]
pub struct Reversed<C>(pub C);

impl<T, C> Comparator<T> for Reversed<C>
where
    C: Comparator<T>,
{
    fn compare(&self, a: &T, b: &T) -> Result<cmp::Ordering> {
        self.0.compare(b, a)
    }
}

// Lets a borrowed comparator be stored where an owned one is expected.
pub(crate) struct ByRef<'a, C: ?Sized>(pub(crate) &'a C);

impl<T, C> Comparator<T> for ByRef<'_, C>
where
    C: Comparator<T> + ?Sized,
{
    fn compare(&self, a: &T, b: &T) -> Result<cmp::Ordering> {
        self.0.compare(a, b)
    }
}

#[cfg(test)]
mod tests {
    use std::cmp;

    use super::*;

    fn by_first(a: &(i32, char), b: &(i32, char)) -> cmp::Ordering {
        a.0.cmp(&b.0)
    }

    fn natural(a: &i32, b: &i32) -> cmp::Ordering {
        a.cmp(b)
    }

    #[test]
    fn min_max_ties_keep_first() {
        assert_eq!(by_first.min((1, 'a'), (1, 'b')), Ok((1, 'a')));
        assert_eq!(by_first.max((1, 'a'), (1, 'b')), Ok((1, 'a')));
        assert_eq!(by_first.min((2, 'a'), (1, 'b')), Ok((1, 'b')));
        assert_eq!(by_first.max((2, 'a'), (3, 'b')), Ok((3, 'b')));
    }

    #[test]
    fn min_of_ties_keep_earliest() {
        let v = [(3, 'a'), (1, 'b'), (5, 'c'), (1, 'd'), (5, 'e')];
        assert_eq!(by_first.min_of(v), Ok((1, 'b')));
        assert_eq!(by_first.max_of(v), Ok((5, 'c')));
    }

    #[test]
    fn min_of_empty() {
        assert_eq!(natural.min_of(Vec::new()), Err(Error::Empty));
        assert_eq!(natural.max_of(std::iter::empty()), Err(Error::Empty));
    }

    #[test]
    fn min_many() {
        assert_eq!(natural.min_many(4, 3, 5, []), Ok(3));
        assert_eq!(natural.max_many(4, 3, 5, [9, -1]), Ok(9));
        assert_eq!(by_first.min_many((1, 'a'), (2, 'b'), (1, 'c'), [(1, 'd')]), Ok((1, 'a')));
        assert_eq!(by_first.max_many((0, 'a'), (2, 'b'), (1, 'c'), [(2, 'd')]), Ok((2, 'b')));
    }

    #[test]
    fn ordered() {
        let empty: [i32; 0] = [];
        assert!(natural.is_ordered(&empty).unwrap());
        assert!(natural.is_ordered(&[7]).unwrap());
        assert!(natural.is_ordered(&[1, 2, 2, 3]).unwrap());
        assert!(!natural.is_ordered(&[1, 3, 2]).unwrap());

        assert!(natural.is_strictly_ordered(&empty).unwrap());
        assert!(natural.is_strictly_ordered(&[7]).unwrap());
        assert!(natural.is_strictly_ordered(&[1, 2, 3]).unwrap());
        assert!(!natural.is_strictly_ordered(&[1, 2, 2, 3]).unwrap());
    }

    #[test]
    fn reversed() {
        let rev = Reversed(natural);
        assert_eq!(rev.compare(&1, &2), Ok(cmp::Ordering::Greater));
        assert_eq!(rev.sorted_copy([2, 3, 1]), Ok(vec![3, 2, 1]));
    }

    #[quickcheck]
    fn binary_search_like_slice(v: Vec<i32>, key: i32) -> bool {
        let mut v = v;
        v.sort();
        v.dedup();
        natural.binary_search(&v, &key).unwrap() == v.binary_search(&key)
    }

    #[quickcheck]
    fn min_of_like_iter(v: Vec<i32>) -> bool {
        natural.min_of(v.clone()).ok() == v.iter().copied().min()
            && natural.max_of(v.clone()).ok() == v.iter().copied().max()
    }

    #[quickcheck]
    fn sorted_copy_is_ordered(v: Vec<i32>) -> bool {
        let sorted = natural.sorted_copy(v).unwrap();
        natural.is_ordered(&sorted).unwrap()
    }

    #[quickcheck]
    fn greatest_of_is_reversed_least_of(v: Vec<i32>, k: usize) -> bool {
        let k = k % (v.len() + 2);
        let greatest = natural.greatest_of(v.clone(), k).unwrap();
        let reversed = Reversed(natural).least_of(v, k).unwrap();
        greatest == reversed
    }
}
