use core::{cmp, mem};

use crate::gallop::{gallop_left, gallop_right};
use crate::insertion::binary_insertion_sort;
use crate::merge::Merger;
use crate::run::{count_run_and_make_ascending, min_run_length, MIN_MERGE};
use crate::run_stack::{RunStack, TimSortRun};

/// Sorts `v` stably in ascending order according to `is_less`.
///
/// Slices shorter than [`MIN_MERGE`] are sorted with binary insertion sort after extending their
/// leading run, without allocating. Everything else goes through the full merge machinery.
#[inline]
pub(crate) fn stable_sort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    // Sorting has no meaningful behavior on zero-sized types, and 0 or 1 elements are sorted.
    if mem::size_of::<T>() == 0 || len < 2 {
        return;
    }

    if len < MIN_MERGE {
        let run_len = count_run_and_make_ascending(v, is_less);
        binary_insertion_sort(v, run_len, is_less);
        return;
    }

    TimSort::new(v, is_less).sort();
}

/// State of one sort call. Nothing in here outlives the call or is shared between calls.
struct TimSort<'a, T, F> {
    v: &'a mut [T],
    is_less: &'a mut F,
    merger: Merger<T>,
    runs: RunStack,
}

impl<'a, T, F> TimSort<'a, T, F>
where
    F: FnMut(&T, &T) -> bool,
{
    fn new(v: &'a mut [T], is_less: &'a mut F) -> Self {
        let len = v.len();

        Self {
            v,
            is_less,
            merger: Merger::new(len),
            runs: RunStack::new(len),
        }
    }

    /// Walks the slice once from left to right, finding natural runs, extending short ones to the
    /// minimum run length and merging pending runs as needed to keep the stack balanced.
    fn sort(mut self) {
        let len = self.v.len();
        let min_run = min_run_length(len);

        let mut start = 0;
        while start < len {
            let tail = &mut self.v[start..];

            let mut run_len = count_run_and_make_ascending(tail, self.is_less);

            // Extend the run if it is shorter than min_run, or covers what is left.
            if run_len < min_run {
                let forced_len = cmp::min(min_run, tail.len());
                binary_insertion_sort(&mut tail[..forced_len], run_len, self.is_less);
                run_len = forced_len;
            }

            self.runs.push(TimSortRun { start, len: run_len });
            start += run_len;

            self.merge_collapse();
        }

        self.merge_force_collapse();

        debug_assert_eq!(self.runs.as_slice(), &[TimSortRun { start: 0, len }]);
    }

    /// Merges adjacent runs until the stack invariants hold again. Called after every push, so
    /// they hold for everything below the top on entry.
    #[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
    fn merge_collapse(&mut self) {
        while let Some(i) = self.runs.next_merge() {
            self.merge_at(i);
        }

        debug_assert!(self.runs.invariants_hold());
    }

    /// Merges all runs on the stack until only one is left.
    #[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
    fn merge_force_collapse(&mut self) {
        while let Some(i) = self.runs.next_forced_merge() {
            self.merge_at(i);
        }
    }

    /// Merges the runs at stack indices `i` and `i + 1`.
    fn merge_at(&mut self, i: usize) {
        let (left, right) = self.runs.merge_at(i);

        let v = &mut self.v[left.start..right.start + right.len];
        let is_less = &mut *self.is_less;

        // Elements of the left run that are not greater than the first element of the right run
        // are already in place.
        let k = gallop_right(&v[left.len], &v[..left.len], 0, is_less);
        if k == left.len {
            return;
        }

        let v = &mut v[k..];
        let mid = left.len - k;

        // Same for elements of the right run that are not less than the last element of the left
        // run.
        let right_len = gallop_left(&v[mid - 1], &v[mid..], right.len - 1, is_less);
        if right_len == 0 {
            return;
        }

        let v = &mut v[..mid + right_len];

        // Use scratch space for the shorter of the two runs.
        if mid <= right_len {
            self.merger.merge_lo(v, mid, is_less);
        } else {
            self.merger.merge_hi(v, mid, is_less);
        }
    }
}
