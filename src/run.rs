/// This is the minimum sized sequence that will be merged. Shorter sequences are lengthened with
/// binary insertion sort, and if the whole slice is shorter than this, no merges are performed.
///
/// Must be a power of two, [`min_run_length`] relies on that.
pub(crate) const MIN_MERGE: usize = 32;

/// Returns the length of the run beginning at the start of `v`, reversing the run first if it is
/// descending. When this returns, `v[..run_len]` is always ascending.
///
/// A run is the longest ascending sequence with:
///
/// `v[0] <= v[1] <= v[2] <= ...`
///
/// or the longest descending sequence with:
///
/// `v[0] > v[1] > v[2] > ...`
///
/// The strictness of the descending definition is what makes the reversal safe for a stable
/// sort. Equal neighbours always extend an ascending run and never end up reversed.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn count_run_and_make_ascending<T, F>(v: &mut [T], is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    debug_assert!(len > 0);

    if len < 2 {
        return len;
    }

    let mut end = 2;

    if is_less(&v[1], &v[0]) {
        while end < len && is_less(&v[end], &v[end - 1]) {
            end += 1;
        }
        v[..end].reverse();
    } else {
        while end < len && !is_less(&v[end], &v[end - 1]) {
            end += 1;
        }
    }

    end
}

/// Returns the minimum acceptable run length for a slice of length `len`. Natural runs shorter
/// than this are extended with binary insertion sort.
///
/// Roughly speaking:
///
/// - If `len < MIN_MERGE`, return `len`, it's too small to bother with merging.
/// - Else if `len` is an exact power of two, return `MIN_MERGE / 2`.
/// - Else return `k` with `MIN_MERGE / 2 <= k <= MIN_MERGE`, such that `len / k` is close to, but
///   strictly less than, an exact power of two.
///
/// Keeping the number of runs at or just below a power of two keeps the merges balanced.
#[must_use]
pub(crate) const fn min_run_length(mut len: usize) -> usize {
    // Becomes 1 if any 1 bits are shifted off.
    let mut r = 0;
    while len >= MIN_MERGE {
        r |= len & 1;
        len >>= 1;
    }

    len + r
}
