//! Selecting the `k` least or greatest elements of an input.
//!
//! Most of the time this is done by [`Comparator::least_of`] and
//! [`Comparator::greatest_of`], which pick a strategy depending on `k` and
//! the input. [`TopKSelector`] can be used directly when elements arrive one
//! at a time.

use std::{ops::Deref, slice, vec};

use tracing::trace;

use crate::{
    Comparator, Result,
    comparator::{ByRef, Reversed},
    sort::{heap_sort, merge_sort},
};

/// An immutable list of selected elements, sorted by the comparator that
/// selected them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selection<T> {
    items: Box<[T]>,
}

impl<T> Selection<T> {
    fn from_vec(items: Vec<T>) -> Self {
        Selection { items: items.into_boxed_slice() }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items.into_vec()
    }
}

impl<T> Deref for Selection<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> IntoIterator for Selection<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Selection<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

pub(crate) fn least_of<T, C, I>(cmp: &C, iter: I, k: usize) -> Result<Selection<T>>
where
    C: Comparator<T> + ?Sized,
    I: IntoIterator<Item = T>,
{
    let iter = iter.into_iter();
    if k == 0 {
        return Ok(Selection::from_vec(Vec::new()));
    }
    let (lower, upper) = iter.size_hint();
    if upper == Some(lower) && lower <= k.saturating_mul(2) {
        // Most of the input is kept, so sorting all of it is cheaper.
        trace!(k, len = lower, "selecting by sorting the whole input");
        return sorted_prefix(iter.collect(), cmp, k);
    }
    if k >= usize::MAX / 2 {
        trace!(k, "selecting by sorting the whole input, k is too large to buffer 2k elements");
        return sorted_prefix(iter.collect(), cmp, k);
    }
    trace!(k, lower, ?upper, "selecting with a bounded buffer");
    let mut selector = TopKSelector::least(k, ByRef(cmp));
    selector.offer_all(iter)?;
    selector.top_k()
}

fn sorted_prefix<T, C>(v: Vec<T>, cmp: &C, k: usize) -> Result<Selection<T>>
where
    C: Comparator<T> + ?Sized,
{
    let mut sorted = merge_sort(v, cmp)?;
    sorted.truncate(k);
    Ok(Selection::from_vec(sorted))
}

/// Keeps the `k` least elements offered to it, using memory for at most
/// `2 * k` elements.
///
/// Elements are buffered until there are `2 * k` of them, then the buffer is
/// partitioned so that only the `k` least remain. Once `k` elements are held,
/// elements which aren't less than all of them are dropped right away. Which
/// of several equivalent elements are kept, and their order in the result, is
/// unspecified.
///
/// ```
/// use ordering::{Ordering, TopKSelector};
///
/// let mut selector = TopKSelector::greatest(2, Ordering::<i32>::natural());
/// for x in [3, 9, 4, 1, 7] {
///     selector.offer(x).unwrap();
/// }
/// assert_eq!(selector.top_k().unwrap().into_vec(), [9, 7]);
/// ```
pub struct TopKSelector<T, C> {
    k: usize,
    cmp: C,
    buffer: Vec<T>,
    // Index of the greatest of the first `k` elements of `buffer`. Elements
    // after those are all less than it.
    threshold: Option<usize>,
}

impl<T, C> TopKSelector<T, C>
where
    C: Comparator<T>,
{
    /// A selector of the `k` least elements according to `cmp`.
    pub fn least(k: usize, cmp: C) -> Self {
        TopKSelector { k, cmp, buffer: Vec::new(), threshold: None }
    }

    /// A selector of the `k` greatest elements according to `cmp`.
    pub fn greatest(k: usize, cmp: C) -> TopKSelector<T, Reversed<C>> {
        TopKSelector::least(k, Reversed(cmp))
    }

    fn capacity(&self) -> usize {
        self.k.saturating_mul(2)
    }

    /// Offer `element` to the selector, which keeps it if it is among the `k`
    /// least elements seen so far.
    pub fn offer(&mut self, element: T) -> Result<()> {
        if self.k == 0 {
            return Ok(());
        }
        match self.threshold {
            None => {
                self.buffer.push(element);
                self.threshold = Some(0);
            }
            Some(threshold) if self.buffer.len() < self.k => {
                if self.cmp.compare(&element, &self.buffer[threshold])?.is_gt() {
                    self.threshold = Some(self.buffer.len());
                }
                self.buffer.push(element);
            }
            Some(threshold) => {
                if self.cmp.compare(&element, &self.buffer[threshold])?.is_lt() {
                    self.buffer.push(element);
                    if self.buffer.len() == self.capacity() {
                        self.trim()?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Offer every element of `iter`, in order.
    pub fn offer_all<I>(&mut self, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        for element in iter {
            self.offer(element)?;
        }
        Ok(())
    }

    /// Move the `k` least elements to the front of the buffer, by quickselect,
    /// and drop the rest.
    fn trim(&mut self) -> Result<()> {
        trace!(len = self.buffer.len(), k = self.k, "trimming top-k buffer");
        let k = self.k;
        let mut left = 0;
        let mut right = self.buffer.len() - 1;
        // Everything before this is less than the element at this position.
        let mut min_threshold_position = 0;
        // Give up on quickselect after this many rounds, which means the pivots
        // are bad, and sort what is left instead.
        let max_iterations = 3 * ceil_log2(right - left);
        let mut iterations = 0;
        while left < right {
            let pivot = (left + right + 1) / 2;
            let pivot = self.partition(left, right, pivot)?;
            if pivot > k {
                right = pivot - 1;
            } else if pivot < k {
                left = pivot.max(left + 1);
                min_threshold_position = pivot;
            } else {
                break;
            }
            iterations += 1;
            if iterations >= max_iterations {
                heap_sort(&mut self.buffer[left..=right], &self.cmp)?;
                break;
            }
        }
        self.buffer.truncate(k);

        let mut threshold = min_threshold_position;
        for i in (min_threshold_position + 1)..k {
            if self.cmp.compare(&self.buffer[i], &self.buffer[threshold])?.is_gt() {
                threshold = i;
            }
        }
        self.threshold = Some(threshold);
        Ok(())
    }

    /// Partition `buffer[left..=right]` around the element at `pivot`, and
    /// return the pivot's new position. Elements less than the pivot end up
    /// before it, the others after it.
    fn partition(&mut self, left: usize, right: usize, pivot: usize) -> Result<usize> {
        self.buffer.swap(pivot, right);
        let mut new_pivot = left;
        for i in left..right {
            if self.cmp.compare(&self.buffer[i], &self.buffer[right])?.is_lt() {
                self.buffer.swap(new_pivot, i);
                new_pivot += 1;
            }
        }
        self.buffer.swap(right, new_pivot);
        Ok(new_pivot)
    }

    /// The `k` least elements offered, in ascending order, or every element if
    /// fewer than `k` were offered.
    pub fn top_k(self) -> Result<Selection<T>> {
        let TopKSelector { k, cmp, buffer, .. } = self;
        let mut sorted = merge_sort(buffer, &cmp)?;
        sorted.truncate(k);
        Ok(Selection::from_vec(sorted))
    }
}

// `ceil(log2(n))`, for `n >= 1`
fn ceil_log2(n: usize) -> usize {
    (usize::BITS - (n - 1).leading_zeros()) as usize
}

#[cfg(test)]
mod tests {
    use std::cmp;

    use quickcheck::{Arbitrary, Gen};
    use rand::{Rng, SeedableRng, seq::SliceRandom};
    use rand_chacha::ChaCha12Rng;
    use rand_distr::{Distribution, Uniform};

    use super::*;
    use crate::{Error, Ordering, tests::std_rng};

    #[derive(Clone, Debug)]
    struct Input {
        values: Vec<i32>,
        k: usize,
    }

    impl Arbitrary for Input {
        fn arbitrary(g: &mut Gen) -> Self {
            let len = usize::arbitrary(g) % (4 * g.size());
            // Sometimes ask for more than there is.
            let k = usize::arbitrary(g) % (len + 3);
            // A small range, so there are ties.
            let range = Uniform::new(0, 1 + i32::arbitrary(g).rem_euclid(200)).unwrap();
            let values = range.sample_iter(&mut std_rng(g)).take(len).collect();
            Input { values, k }
        }
    }

    // Hides the length of the input, so the bounded buffer is used.
    fn unsized_iter(v: Vec<i32>) -> impl Iterator<Item = i32> {
        v.into_iter().filter(|_| true)
    }

    fn natural(a: &i32, b: &i32) -> cmp::Ordering {
        a.cmp(b)
    }

    fn expected_least(mut v: Vec<i32>, k: usize) -> Vec<i32> {
        v.sort();
        v.truncate(k);
        v
    }

    #[test]
    fn scenario() {
        let v = vec![5, 1, 4, 1, 5, 9, 2, 6];
        let natural = Ordering::natural();
        assert_eq!(&natural.least_of(v.clone(), 3).unwrap()[..], [1, 1, 2]);
        assert_eq!(&natural.greatest_of(v.clone(), 3).unwrap()[..], [9, 6, 5]);
        assert_eq!(&natural.least_of(unsized_iter(v.clone()), 3).unwrap()[..], [1, 1, 2]);
        assert_eq!(&natural.greatest_of(unsized_iter(v), 3).unwrap()[..], [9, 6, 5]);
    }

    #[test]
    fn zero_and_empty() {
        assert!(natural.least_of(vec![3, 2, 1], 0).unwrap().is_empty());
        assert!(natural.least_of(unsized_iter(vec![3, 2, 1]), 0).unwrap().is_empty());
        assert!(natural.least_of(Vec::new(), 5).unwrap().is_empty());
        assert!(natural.greatest_of(unsized_iter(Vec::new()), 5).unwrap().is_empty());
    }

    #[test]
    fn huge_k() {
        let v = vec![3, 1, 2];
        assert_eq!(natural.least_of(unsized_iter(v.clone()), usize::MAX).unwrap().into_vec(), [1, 2, 3]);
        assert_eq!(natural.least_of(v, usize::MAX / 2).unwrap().into_vec(), [1, 2, 3]);
    }

    #[test]
    fn full_sort_is_stable() {
        let by_first = |a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0);
        let v = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd'), (1, 'e')];
        let least = by_first.least_of(v.clone(), 3).unwrap();
        assert_eq!(&least[..], [(0, 'b'), (0, 'd'), (1, 'a')]);
        let least = by_first.least_of(v.into_iter().filter(|_| true), usize::MAX).unwrap();
        assert_eq!(&least[..], [(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c'), (1, 'e')]);
    }

    #[test]
    fn explicit_failure_aborts() {
        let ordering = Ordering::explicit([1, 2, 3]).unwrap();
        let v: Vec<i32> = (0..100).map(|i| i % 3 + 1).chain([7]).collect();
        assert_eq!(
            ordering.least_of(unsized_iter(v.clone()), 5),
            Err(Error::IncomparableValue("7".into()))
        );
        assert_eq!(ordering.least_of(v, 80), Err(Error::IncomparableValue("7".into())));
    }

    #[test]
    fn large_input() {
        let mut rng = ChaCha12Rng::from_seed([3; 32]);
        let mut v: Vec<i32> = (0..100_000).collect();
        v.shuffle(&mut rng);
        for k in [1, 2, 10, 1000, 49_999] {
            let least = natural.least_of(unsized_iter(v.clone()), k).unwrap();
            assert_eq!(least.into_vec(), (0..k as i32).collect::<Vec<_>>());
            let greatest = natural.greatest_of(unsized_iter(v.clone()), k).unwrap();
            assert_eq!(greatest.into_vec(), (100_000 - k as i32..100_000).rev().collect::<Vec<_>>());
        }
    }

    #[test]
    fn sorted_and_reversed_input() {
        // Bad inputs for some pivot choices.
        let ascending: Vec<i32> = (0..10_000).collect();
        let descending: Vec<i32> = (0..10_000).rev().collect();
        let constant = vec![4; 10_000];
        for v in [ascending, descending, constant] {
            for k in [1, 7, 100, 4_999] {
                let least = natural.least_of(unsized_iter(v.clone()), k).unwrap();
                assert_eq!(least.into_vec(), expected_least(v.clone(), k));
            }
        }
    }

    #[test]
    fn selector_directly() {
        let mut rng = ChaCha12Rng::from_seed([9; 32]);
        let mut selector = TopKSelector::least(10, natural);
        let mut all = Vec::new();
        for _ in 0..1000 {
            let x = rng.random_range(-1000..1000);
            all.push(x);
            selector.offer(x).unwrap();
        }
        assert_eq!(selector.top_k().unwrap().into_vec(), expected_least(all, 10));

        let mut selector = TopKSelector::least(0, natural);
        selector.offer_all([1, 2, 3]).unwrap();
        assert!(selector.top_k().unwrap().is_empty());
    }

    #[test]
    fn buffer_stays_bounded() {
        let k = 10;
        let mut rng = ChaCha12Rng::from_seed([11; 32]);
        let mut selector = TopKSelector::least(k, natural);
        let mut all = Vec::new();
        // Descending input makes every element a new candidate.
        for i in 0..100_000 {
            let x = if i < 50_000 { 100_000 - i } else { rng.random_range(-100_000..100_000) };
            all.push(x);
            selector.offer(x).unwrap();
            assert!(selector.buffer.len() <= 2 * k);
        }
        assert_eq!(selector.top_k().unwrap().into_vec(), expected_least(all, k));
    }

    #[test]
    fn selection_access() {
        let selection = natural.least_of(vec![3, 1, 2], 2).unwrap();
        assert_eq!(selection.len(), 2);
        assert_eq!(selection[1], 2);
        assert_eq!(selection.as_slice(), [1, 2]);
        assert_eq!((&selection).into_iter().sum::<i32>(), 3);
        assert_eq!(selection.into_iter().collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn ceil_log2_values() {
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(4), 2);
        assert_eq!(ceil_log2(5), 3);
        assert_eq!(ceil_log2(1 << 20), 20);
    }

    #[quickcheck]
    fn least_of_matches_sort(input: Input) -> bool {
        let Input { values, k } = input;
        let expected = expected_least(values.clone(), k);
        let sized = natural.least_of(values.clone(), k).unwrap();
        let bounded = natural.least_of(unsized_iter(values), k).unwrap();
        sized.as_slice() == expected && bounded.as_slice() == expected
    }

    #[quickcheck]
    fn greatest_of_matches_reversed(input: Input) -> bool {
        let Input { values, k } = input;
        let reversed = Ordering::natural().reverse();
        let greatest = Ordering::natural().greatest_of(unsized_iter(values.clone()), k).unwrap();
        let least = reversed.least_of(unsized_iter(values), k).unwrap();
        greatest == least
    }

    #[quickcheck]
    fn result_is_sub_multiset(input: Input) -> bool {
        let Input { values, k } = input;
        // Tag values so equal keys can be told apart.
        let tagged: Vec<(i32, usize)> = values.iter().copied().zip(0..).collect();
        let by_key = |a: &(i32, usize), b: &(i32, usize)| a.0.cmp(&b.0);
        let least = by_key.least_of(tagged.clone().into_iter().filter(|_| true), k).unwrap();
        let mut tags: Vec<usize> = least.iter().map(|x| x.1).collect();
        tags.sort();
        tags.dedup();
        least.len() == k.min(values.len())
            && tags.len() == least.len()
            && least.iter().all(|x| tagged[x.1] == *x)
            && by_key.is_ordered(&least).unwrap()
    }
}
