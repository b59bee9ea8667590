// Sorting with a comparison that can fail. `slice::sort_by` can't be stopped
// halfway, so these return the first error and give up on the input.

use std::{cmp, mem};

use crate::{Comparator, Result};

// Runs at most this long are sorted with insertion sort.
const INSERTION_LIMIT: usize = 16;

/// Stable merge sort.
///
/// Sorts positions into `v` rather than the elements themselves, bottom-up,
/// merging back and forth between two index buffers. The elements are moved
/// into place once at the end.
pub(crate) fn merge_sort<T, C>(v: Vec<T>, cmp: &C) -> Result<Vec<T>>
where
    C: Comparator<T> + ?Sized,
{
    let len = v.len();
    let mut order: Vec<usize> = (0..len).collect();
    let mut scratch = vec![0; len];
    let by_position = ByPosition { values: &v, cmp };
    for run in order.chunks_mut(INSERTION_LIMIT) {
        insertion_sort(run, &by_position)?;
    }
    let mut width = INSERTION_LIMIT;
    while width < len {
        for start in (0..len).step_by(2 * width) {
            let middle = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge(&order[start..middle], &order[middle..end], &mut scratch[start..end], &by_position)?;
        }
        mem::swap(&mut order, &mut scratch);
        width *= 2;
    }

    let mut slots: Vec<Option<T>> = v.into_iter().map(Some).collect();
    Ok(order.into_iter().filter_map(|i| slots[i].take()).collect())
}

// Compares positions by the elements at them.
struct ByPosition<'a, T, C: ?Sized> {
    values: &'a [T],
    cmp: &'a C,
}

impl<T, C> Comparator<usize> for ByPosition<'_, T, C>
where
    C: Comparator<T> + ?Sized,
{
    fn compare(&self, a: &usize, b: &usize) -> Result<cmp::Ordering> {
        self.cmp.compare(&self.values[*a], &self.values[*b])
    }
}

// `out` has room for exactly `left.len() + right.len()` positions.
fn merge<C>(left: &[usize], right: &[usize], out: &mut [usize], cmp: &C) -> Result<()>
where
    C: Comparator<usize>,
{
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        // Equal elements are taken from the left run first.
        let take_right = if i == left.len() {
            true
        } else if j == right.len() {
            false
        } else {
            cmp.compare(&right[j], &left[i])? == cmp::Ordering::Less
        };
        if take_right {
            *slot = right[j];
            j += 1;
        } else {
            *slot = left[i];
            i += 1;
        }
    }
    Ok(())
}

// Stable.
pub(crate) fn insertion_sort<T, C>(v: &mut [T], cmp: &C) -> Result<()>
where
    C: Comparator<T> + ?Sized,
{
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && cmp.compare(&v[j - 1], &v[j])? == cmp::Ordering::Greater {
            v.swap(j, j - 1);
            j -= 1;
        }
    }
    Ok(())
}

/// In-place heap sort. Not stable.
pub(crate) fn heap_sort<T, C>(v: &mut [T], cmp: &C) -> Result<()>
where
    C: Comparator<T> + ?Sized,
{
    let len = v.len();
    for node in (0..len / 2).rev() {
        sift_down(v, node, len, cmp)?;
    }
    for end in (1..len).rev() {
        v.swap(0, end);
        sift_down(v, 0, end, cmp)?;
    }
    Ok(())
}

fn sift_down<T, C>(v: &mut [T], mut node: usize, end: usize, cmp: &C) -> Result<()>
where
    C: Comparator<T> + ?Sized,
{
    loop {
        let mut child = 2 * node + 1;
        if child >= end {
            return Ok(());
        }
        if child + 1 < end && cmp.compare(&v[child], &v[child + 1])? == cmp::Ordering::Less {
            child += 1;
        }
        if cmp.compare(&v[node], &v[child])? != cmp::Ordering::Less {
            return Ok(());
        }
        v.swap(node, child);
        node = child;
    }
}
