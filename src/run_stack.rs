/// A run that is pending to be merged. Runs are adjacent and cover the sorted prefix of the slice
/// in stack order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TimSortRun {
    pub(crate) start: usize,
    pub(crate) len: usize,
}

/// Stack of pending runs.
///
/// The capacity is fixed when the sort starts, from the length of the slice. Keeping the merge
/// invariants on every push bounds the number of pending runs logarithmically, so the stack never
/// has to grow. Accesses are bounds-checked, an inconsistent comparator cannot push past the end
/// because run lengths never depend on merge results.
pub(crate) struct RunStack {
    runs: Box<[TimSortRun]>,
    size: usize,
}

impl RunStack {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            runs: vec![TimSortRun::default(); stack_capacity(len)].into_boxed_slice(),
            size: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.size
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.runs.len()
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[TimSortRun] {
        &self.runs[..self.size]
    }

    /// Pushes a run that starts right where the topmost run ends.
    #[inline]
    pub(crate) fn push(&mut self, run: TimSortRun) {
        debug_assert!(self
            .as_slice()
            .last()
            .map_or(true, |top| top.start + top.len == run.start));

        self.runs[self.size] = run;
        self.size += 1;
    }

    /// Replaces runs `i` and `i + 1` with a single run covering both, and returns the two runs
    /// that were replaced. `i` must be the second or third run from the top.
    pub(crate) fn merge_at(&mut self, i: usize) -> (TimSortRun, TimSortRun) {
        debug_assert!(self.size >= 2);
        debug_assert!(i + 2 == self.size || i + 3 == self.size);

        let left = self.runs[i];
        let right = self.runs[i + 1];
        debug_assert_eq!(left.start + left.len, right.start);

        self.runs[i] = TimSortRun {
            start: left.start,
            len: left.len + right.len,
        };

        // The topmost run is not part of this merge, slide it down.
        if i + 3 == self.size {
            self.runs[i + 1] = self.runs[i + 2];
        }
        self.size -= 1;

        (left, right)
    }

    /// Returns the run index to merge next for the stack invariants to hold, or `None` if they
    /// already do.
    ///
    /// With `L` the run lengths and `n` the second run from the top, the invariants are
    ///
    /// 1. `L[n - 1] > L[n] + L[n + 1]` and `L[n - 2] > L[n - 1] + L[n]`
    /// 2. `L[n] > L[n + 1]`
    ///
    /// Checking the first rule one level deeper than the classic formulation is needed, otherwise
    /// the invariants can break further down the stack and its capacity can be exceeded.
    pub(crate) fn next_merge(&self) -> Option<usize> {
        if self.size < 2 {
            return None;
        }

        let runs = self.as_slice();
        let n = self.size - 2;

        if (n > 0 && runs[n - 1].len <= runs[n].len + runs[n + 1].len)
            || (n > 1 && runs[n - 2].len <= runs[n - 1].len + runs[n].len)
        {
            if runs[n - 1].len < runs[n + 1].len {
                Some(n - 1)
            } else {
                Some(n)
            }
        } else if runs[n].len <= runs[n + 1].len {
            Some(n)
        } else {
            None
        }
    }

    /// Returns the run index to merge next when all runs must be merged into one, or `None` if at
    /// most one run is left.
    pub(crate) fn next_forced_merge(&self) -> Option<usize> {
        if self.size < 2 {
            return None;
        }

        let runs = self.as_slice();
        let n = self.size - 2;

        if n > 0 && runs[n - 1].len < runs[n + 1].len {
            Some(n - 1)
        } else {
            Some(n)
        }
    }

    /// Checks the invariants over the whole stack, not just the top.
    pub(crate) fn invariants_hold(&self) -> bool {
        let runs = self.as_slice();

        runs.windows(2).all(|w| w[0].len > w[1].len)
            && runs.windows(3).all(|w| w[0].len > w[1].len + w[2].len)
    }
}

/// Number of pending runs that can be on the stack at once, for a slice of length `len`.
///
/// The thresholds are the smallest lengths that allow one more run under the invariants, given
/// runs of at least 16 elements. Smaller stacks are noticeably cheaper for small slices.
#[must_use]
pub(crate) const fn stack_capacity(len: usize) -> usize {
    if len < 120 {
        5
    } else if len < 1542 {
        10
    } else if len < 119_151 {
        19
    } else if len < (1 << 31) {
        40
    } else {
        85
    }
}
