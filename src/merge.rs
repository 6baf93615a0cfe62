use core::{cmp, mem, ptr, slice};

use crate::gallop::{gallop_left, gallop_right};

/// Initial threshold of consecutive wins by one run before a merge switches to galloping.
pub(crate) const MIN_GALLOP: usize = 7;

/// Upper bound for the scratch buffer allocated up-front. Larger merges grow it on demand.
pub(crate) const INITIAL_TMP_STORAGE_LEN: usize = 256;

/// Merge state that lives for one sort call: the scratch buffer and the adaptive gallop
/// threshold.
///
/// `buf` always has length 0. Its spare capacity temporarily holds bitwise copies of the
/// shorter run during a merge, ownership of which is tracked by a [`MergeHole`].
pub(crate) struct Merger<T> {
    buf: Vec<T>,
    max_buf_len: usize,
    min_gallop: usize,
}

impl<T> Merger<T> {
    /// Creates the merge state for sorting a slice of length `len`.
    pub(crate) fn new(len: usize) -> Self {
        // A merge never needs more than half of the slice in scratch space.
        let max_buf_len = len / 2;

        Self {
            buf: Vec::with_capacity(cmp::min(INITIAL_TMP_STORAGE_LEN, max_buf_len)),
            max_buf_len,
            min_gallop: MIN_GALLOP,
        }
    }

    #[cfg(test)]
    pub(crate) fn min_gallop(&self) -> usize {
        self.min_gallop
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Ensures the scratch buffer can hold at least `min_capacity` elements.
    ///
    /// Grows to the next power of two, capped at half the length of the sorted slice, so the
    /// total reallocation cost stays linear over a whole sort. Never shrinks.
    pub(crate) fn ensure_capacity(&mut self, min_capacity: usize) {
        if self.buf.capacity() >= min_capacity {
            return;
        }

        let new_capacity = min_capacity
            .checked_next_power_of_two()
            .unwrap_or(min_capacity)
            .min(self.max_buf_len)
            .max(min_capacity);

        // The buffer is empty, there is nothing to carry over.
        self.buf = Vec::with_capacity(new_capacity);
    }

    /// Merges the sorted runs `v[..mid]` and `v[mid..]` in place, left to right, using scratch
    /// space for the left run.
    ///
    /// For performance this should only be called when `mid <= v.len() - mid`. The caller must
    /// have trimmed both runs so that `v[mid] < v[0]` and `v[v.len() - 1] < v[mid - 1]`, the
    /// result is a permutation of `v` even if that does not hold.
    #[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
    pub(crate) fn merge_lo<F>(&mut self, v: &mut [T], mid: usize, is_less: &mut F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        let len = v.len();
        debug_assert!(mem::size_of::<T>() != 0);
        debug_assert!(mid > 0 && mid < len);

        self.ensure_capacity(mid);

        let arr_ptr = v.as_mut_ptr();
        let buf = self.buf.as_mut_ptr();

        // SAFETY: `buf` has capacity for at least `mid` elements and is disjoint from `v`. From here
        // on `hole` owns the copies and writes whatever is left of them back into the gap on drop,
        // including when `is_less` panics.
        let mut hole = unsafe {
            ptr::copy_nonoverlapping(arr_ptr, buf, mid);
            MergeHole {
                buf,
                start: 0,
                end: mid,
                arr: arr_ptr,
                dest: 0,
            }
        };

        // Cursor into the right run, which stays in place. The gap v[hole.dest..right] always has
        // exactly the length of what is left of the left run.
        let mut right = mid;
        let mut min_gallop = self.min_gallop;

        // SAFETY for all blocks below: `hole.start < hole.end <= mid` and `right < len` whenever an
        // element is read, and `hole.dest < right`, so every read and write is in bounds. Single
        // element copies never overlap because the gap is non-empty.
        unsafe {
            // The first element of the right run goes first.
            ptr::copy_nonoverlapping(arr_ptr.add(right), arr_ptr.add(hole.dest), 1);
            hole.dest += 1;
            right += 1;

            'outer: {
                if right == len || hole.end - hole.start == 1 {
                    break 'outer;
                }

                loop {
                    // Number of times in a row that each run won.
                    let mut count1 = 0usize;
                    let mut count2 = 0usize;

                    // Straightforward merge until one run starts winning consistently.
                    loop {
                        debug_assert!(hole.end - hole.start > 1 && right < len);

                        if is_less(&*arr_ptr.add(right), &*buf.add(hole.start)) {
                            ptr::copy_nonoverlapping(arr_ptr.add(right), arr_ptr.add(hole.dest), 1);
                            hole.dest += 1;
                            right += 1;
                            count2 += 1;
                            count1 = 0;
                            if right == len {
                                break 'outer;
                            }
                        } else {
                            ptr::copy_nonoverlapping(buf.add(hole.start), arr_ptr.add(hole.dest), 1);
                            hole.dest += 1;
                            hole.start += 1;
                            count1 += 1;
                            count2 = 0;
                            if hole.end - hole.start == 1 {
                                break 'outer;
                            }
                        }

                        if (count1 | count2) >= min_gallop {
                            break;
                        }
                    }

                    // Galloping: search for the next insertion point and move whole blocks, until
                    // neither run wins by a large enough margin.
                    loop {
                        debug_assert!(hole.end - hole.start > 1 && right < len);

                        let left_run =
                            slice::from_raw_parts(buf.add(hole.start), hole.end - hole.start);
                        count1 = gallop_right(&*arr_ptr.add(right), left_run, 0, is_less);
                        if count1 != 0 {
                            ptr::copy_nonoverlapping(
                                buf.add(hole.start),
                                arr_ptr.add(hole.dest),
                                count1,
                            );
                            hole.dest += count1;
                            hole.start += count1;
                            if hole.end - hole.start <= 1 {
                                break 'outer;
                            }
                        }

                        ptr::copy_nonoverlapping(arr_ptr.add(right), arr_ptr.add(hole.dest), 1);
                        hole.dest += 1;
                        right += 1;
                        if right == len {
                            break 'outer;
                        }

                        let right_run = slice::from_raw_parts(arr_ptr.add(right), len - right);
                        count2 = gallop_left(&*buf.add(hole.start), right_run, 0, is_less);
                        if count2 != 0 {
                            // Source and destination may overlap.
                            ptr::copy(arr_ptr.add(right), arr_ptr.add(hole.dest), count2);
                            hole.dest += count2;
                            right += count2;
                            if right == len {
                                break 'outer;
                            }
                        }

                        ptr::copy_nonoverlapping(buf.add(hole.start), arr_ptr.add(hole.dest), 1);
                        hole.dest += 1;
                        hole.start += 1;
                        if hole.end - hole.start == 1 {
                            break 'outer;
                        }

                        min_gallop = min_gallop.saturating_sub(1);
                        if count1 < min_gallop && count2 < min_gallop {
                            break;
                        }
                    }

                    // Penalize for leaving gallop mode.
                    min_gallop += 2;
                }
            }

            if hole.end - hole.start == 1 {
                // The last element of the left run is greater than the rest of the right run.
                let tail = len - right;
                ptr::copy(arr_ptr.add(right), arr_ptr.add(hole.dest), tail);
                hole.dest += tail;
            }
        }

        self.min_gallop = cmp::max(min_gallop, 1);

        // `hole` gets dropped here and fills the gap with the rest of the left run.
    }

    /// Like [`Merger::merge_lo`], except that it merges right to left with the right run in
    /// scratch space. For performance this should only be called when `mid > v.len() - mid`.
    ///
    /// The same trimming requirements as for `merge_lo` apply.
    #[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
    pub(crate) fn merge_hi<F>(&mut self, v: &mut [T], mid: usize, is_less: &mut F)
    where
        F: FnMut(&T, &T) -> bool,
    {
        let len = v.len();
        debug_assert!(mem::size_of::<T>() != 0);
        debug_assert!(mid > 0 && mid < len);

        let len2 = len - mid;
        self.ensure_capacity(len2);

        let arr_ptr = v.as_mut_ptr();
        let buf = self.buf.as_mut_ptr();

        // Here the hole always starts at the beginning of the buffer. `hole.dest` is the number of
        // left run elements still in place at the front of `v`, and `hole.end` the number of right
        // run elements still in the buffer. Output is written backwards from
        // `hole.dest + hole.end - 1`.
        //
        // SAFETY: `buf` has capacity for at least `len2` elements and is disjoint from `v`.
        let mut hole = unsafe {
            ptr::copy_nonoverlapping(arr_ptr.add(mid), buf, len2);
            MergeHole {
                buf,
                start: 0,
                end: len2,
                arr: arr_ptr,
                dest: mid,
            }
        };

        let mut min_gallop = self.min_gallop;

        // SAFETY for all blocks below: elements are only read at `hole.dest - 1` and below in `v`
        // while `hole.dest > 0`, and at `hole.end - 1` and below in `buf` while `hole.end > 0`. The
        // output slot `hole.dest + hole.end - 1` lies in the gap, past every unread element.
        unsafe {
            // The last element of the left run goes last.
            ptr::copy_nonoverlapping(
                arr_ptr.add(hole.dest - 1),
                arr_ptr.add(hole.dest + hole.end - 1),
                1,
            );
            hole.dest -= 1;

            'outer: {
                if hole.dest == 0 || hole.end == 1 {
                    break 'outer;
                }

                loop {
                    let mut count1 = 0usize;
                    let mut count2 = 0usize;

                    loop {
                        debug_assert!(hole.dest > 0 && hole.end > 1);

                        let out = hole.dest + hole.end - 1;
                        if is_less(&*buf.add(hole.end - 1), &*arr_ptr.add(hole.dest - 1)) {
                            ptr::copy_nonoverlapping(arr_ptr.add(hole.dest - 1), arr_ptr.add(out), 1);
                            hole.dest -= 1;
                            count1 += 1;
                            count2 = 0;
                            if hole.dest == 0 {
                                break 'outer;
                            }
                        } else {
                            ptr::copy_nonoverlapping(buf.add(hole.end - 1), arr_ptr.add(out), 1);
                            hole.end -= 1;
                            count2 += 1;
                            count1 = 0;
                            if hole.end == 1 {
                                break 'outer;
                            }
                        }

                        if (count1 | count2) >= min_gallop {
                            break;
                        }
                    }

                    loop {
                        debug_assert!(hole.dest > 0 && hole.end > 1);

                        let left_run = slice::from_raw_parts(arr_ptr, hole.dest);
                        let key = &*buf.add(hole.end - 1);
                        count1 = hole.dest - gallop_right(key, left_run, hole.dest - 1, is_less);
                        if count1 != 0 {
                            let out = hole.dest + hole.end - count1;
                            // Source and destination may overlap.
                            ptr::copy(arr_ptr.add(hole.dest - count1), arr_ptr.add(out), count1);
                            hole.dest -= count1;
                            if hole.dest == 0 {
                                break 'outer;
                            }
                        }

                        let out = hole.dest + hole.end - 1;
                        ptr::copy_nonoverlapping(buf.add(hole.end - 1), arr_ptr.add(out), 1);
                        hole.end -= 1;
                        if hole.end == 1 {
                            break 'outer;
                        }

                        let right_run = slice::from_raw_parts(buf, hole.end);
                        let key = &*arr_ptr.add(hole.dest - 1);
                        count2 = hole.end - gallop_left(key, right_run, hole.end - 1, is_less);
                        if count2 != 0 {
                            let out = hole.dest + hole.end - count2;
                            ptr::copy_nonoverlapping(
                                buf.add(hole.end - count2),
                                arr_ptr.add(out),
                                count2,
                            );
                            hole.end -= count2;
                            if hole.end <= 1 {
                                break 'outer;
                            }
                        }

                        let out = hole.dest + hole.end - 1;
                        ptr::copy_nonoverlapping(arr_ptr.add(hole.dest - 1), arr_ptr.add(out), 1);
                        hole.dest -= 1;
                        if hole.dest == 0 {
                            break 'outer;
                        }

                        min_gallop = min_gallop.saturating_sub(1);
                        if count1 < min_gallop && count2 < min_gallop {
                            break;
                        }
                    }

                    min_gallop += 2;
                }
            }

            if hole.end == 1 {
                // The first element of the right run is less than the rest of the left run.
                ptr::copy(arr_ptr, arr_ptr.add(1), hole.dest);
                hole.dest = 0;
            }
        }

        self.min_gallop = cmp::max(min_gallop, 1);
    }
}

/// Owns the elements of one run that were copied into scratch space. On drop, which also happens
/// during unwinding, `buf[start..end]` is copied into `arr[dest..]`.
///
/// While the hole is alive, `arr[dest..dest + (end - start)]` is logically uninitialized and
/// nothing else may be written there.
struct MergeHole<T> {
    buf: *mut T,
    start: usize,
    end: usize,
    arr: *mut T,
    dest: usize,
}

impl<T> Drop for MergeHole<T> {
    fn drop(&mut self) {
        // SAFETY: `buf[start..end]` holds initialized elements that are not present in `arr`, and
        // the gap they came from is exactly as long. The buffer and the slice never overlap.
        unsafe {
            let len = self.end - self.start;
            ptr::copy_nonoverlapping(self.buf.add(self.start), self.arr.add(self.dest), len);
        }
    }
}
