//! Stable, adaptive merge sort (TimSort) for slices.
//!
//! The sort walks the input once to find natural runs, extends short runs with binary insertion
//! sort, and merges runs from a stack whose invariants keep the merges balanced. Merges switch to
//! exponential search ("galloping") while one run keeps winning, which makes partially ordered
//! input much cheaper than random input.
//!
//! [`sort_indexed`] sorts collections that can only compare and swap positions.

use core::cmp::Ordering;

mod gallop;
mod indexed;
mod insertion;
mod merge;
mod run;
mod run_stack;
mod timsort;

pub use indexed::{sort_indexed, IndexedCollection};

/// Sorts the slice, preserving the initial order of equal elements.
///
/// This sort is stable (i.e., does not reorder equal elements) and *O*(*n* \* log(*n*))
/// worst-case. Already sorted and reverse sorted slices take *O*(*n*) comparisons.
///
/// # Current implementation
///
/// The current algorithm is TimSort, an adaptive merge sort by Tim Peters, inspired by
/// [listsort.txt]. It is fastest on slices that consist of a few long sorted sequences, and
/// allocates temporary storage of at most half the size of `v`. Slices shorter than 32 elements
/// are sorted with binary insertion sort and do not allocate.
///
/// # Examples
///
/// ```
/// let mut v = [-5, 4, 1, -3, 2];
///
/// timsort::sort(&mut v);
/// assert!(v == [-5, -3, 1, 2, 4]);
/// ```
///
/// [listsort.txt]: https://github.com/python/cpython/blob/main/Objects/listsort.txt
#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord,
{
    timsort::stable_sort(v, &mut |a: &T, b: &T| a.lt(b));
}

/// Sorts the slice with a comparator function, preserving the initial order of equal elements.
///
/// This sort is stable (i.e., does not reorder equal elements) and *O*(*n* \* log(*n*))
/// worst-case.
///
/// The comparator function must define a total ordering for the elements in the slice. If
/// the ordering is not total, the order of the elements is unspecified, but the slice still
/// holds all of its original elements and no memory is accessed out of bounds. An order is a
/// total order if it is (for all `a`, `b` and `c`):
///
/// * total and antisymmetric: exactly one of `a < b`, `a == b` or `a > b` is true, and
/// * transitive, `a < b` and `b < c` implies `a < c`. The same must hold for both `==` and `>`.
///
/// For example, while [`f64`] doesn't implement [`Ord`] because `NaN != NaN`, we can use
/// `partial_cmp` as our sort function when we know the slice doesn't contain a `NaN`.
///
/// ```
/// let mut floats = [5f64, 4.0, 1.0, 3.0, 2.0];
/// timsort::sort_by(&mut floats, |a, b| a.partial_cmp(b).unwrap());
/// assert_eq!(floats, [1.0, 2.0, 3.0, 4.0, 5.0]);
/// ```
///
/// # Examples
///
/// ```
/// let mut v = [5, 4, 1, 3, 2];
/// timsort::sort_by(&mut v, |a, b| a.cmp(b));
/// assert!(v == [1, 2, 3, 4, 5]);
///
/// // reverse sorting
/// timsort::sort_by(&mut v, |a, b| b.cmp(a));
/// assert!(v == [5, 4, 3, 2, 1]);
/// ```
#[inline]
pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    timsort::stable_sort(v, &mut |a: &T, b: &T| compare(a, b) == Ordering::Less);
}

/// Sorts the slice with a key extraction function, preserving the initial order of equal
/// elements.
///
/// The key function is called *O*(*n* \* log(*n*)) times, it should be cheap.
///
/// # Examples
///
/// ```
/// let mut v = [(3, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
///
/// timsort::sort_by_key(&mut v, |e| e.0);
/// assert!(v == [(1, 'b'), (1, 'd'), (2, 'c'), (3, 'a')]);
/// ```
#[inline]
pub fn sort_by_key<T, K, F>(v: &mut [T], mut f: F)
where
    F: FnMut(&T) -> K,
    K: Ord,
{
    timsort::stable_sort(v, &mut |a: &T, b: &T| f(a).lt(&f(b)));
}

/// Sorts the slice with a "less than" predicate, preserving the initial order of equal elements.
///
/// `is_less(a, b)` must return `true` if and only if `a` is ordered strictly before `b`, and must
/// be a strict weak order. Two elements for which neither `is_less(a, b)` nor `is_less(b, a)`
/// holds are equal and keep their relative order.
///
/// # Examples
///
/// ```
/// let mut words = ["delta", "Alpha", "charlie", "Bravo"];
///
/// timsort::sort_by_less(&mut words, |a, b| a.to_lowercase() < b.to_lowercase());
/// assert_eq!(words, ["Alpha", "Bravo", "charlie", "delta"]);
/// ```
#[inline]
pub fn sort_by_less<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    timsort::stable_sort(v, &mut is_less);
}
