//! Exponential searches used by the merge to find where one run's head belongs in the other run.
//!
//! Both searches start at `hint` and compare at offsets 1, 3, 7, 15, ... in the direction indicated
//! by the first comparison, until the target is bracketed. The bracket is then binary searched.
//! This costs *O*(log *d*) comparisons where *d* is the distance between `hint` and the result,
//! instead of *O*(log *n*) for a plain binary search over `v`.

/// Returns the leftmost position at which `key` could be inserted into the sorted slice `v`, ie.
/// the number of elements in `v` strictly less than `key`.
///
/// Elements equal to `key` are placed after it, which is what the merge needs when `key` comes from
/// the right run.
///
/// `hint` must be in `0..v.len()`. The closer it is to the result, the fewer comparisons are
/// needed.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn gallop_left<T, F>(key: &T, v: &[T], hint: usize, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    debug_assert!(hint < len);

    let mut last_ofs = 0;
    let mut ofs = 1;

    let (lo, hi) = if is_less(&v[hint], key) {
        // Gallop right until v[hint + last_ofs] < key <= v[hint + ofs].
        let max_ofs = len - hint;
        while ofs < max_ofs && is_less(&v[hint + ofs], key) {
            last_ofs = ofs;
            ofs = next_offset(ofs);
        }
        ofs = ofs.min(max_ofs);

        (hint + last_ofs + 1, hint + ofs)
    } else {
        // key <= v[hint], gallop left until v[hint - ofs] < key <= v[hint - last_ofs].
        let max_ofs = hint + 1;
        while ofs < max_ofs && !is_less(&v[hint - ofs], key) {
            last_ofs = ofs;
            ofs = next_offset(ofs);
        }
        ofs = ofs.min(max_ofs);

        (hint + 1 - ofs, hint - last_ofs)
    };

    debug_assert!(lo <= hi && hi <= len);

    // The result is in lo..=hi.
    lo + v[lo..hi].partition_point(|elem| is_less(elem, key))
}

/// Like [`gallop_left`], except that elements equal to `key` are placed before it. Returns the
/// number of elements in `v` that are not greater than `key`.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn gallop_right<T, F>(key: &T, v: &[T], hint: usize, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    debug_assert!(hint < len);

    let mut last_ofs = 0;
    let mut ofs = 1;

    let (lo, hi) = if is_less(key, &v[hint]) {
        // Gallop left until v[hint - ofs] <= key < v[hint - last_ofs].
        let max_ofs = hint + 1;
        while ofs < max_ofs && is_less(key, &v[hint - ofs]) {
            last_ofs = ofs;
            ofs = next_offset(ofs);
        }
        ofs = ofs.min(max_ofs);

        (hint + 1 - ofs, hint - last_ofs)
    } else {
        // v[hint] <= key, gallop right until v[hint + last_ofs] <= key < v[hint + ofs].
        let max_ofs = len - hint;
        while ofs < max_ofs && !is_less(key, &v[hint + ofs]) {
            last_ofs = ofs;
            ofs = next_offset(ofs);
        }
        ofs = ofs.min(max_ofs);

        (hint + last_ofs + 1, hint + ofs)
    };

    debug_assert!(lo <= hi && hi <= len);

    lo + v[lo..hi].partition_point(|elem| !is_less(key, elem))
}

#[inline(always)]
const fn next_offset(ofs: usize) -> usize {
    // Saturates instead of wrapping, the caller clamps to max_ofs anyway.
    ofs.saturating_mul(2).saturating_add(1)
}
