use crate::timsort::stable_sort;

/// A collection that can only be accessed by position: compare two positions, swap two
/// positions.
///
/// This is the interface to use for data that cannot be handed out as a `&mut [T]`, for example
/// several parallel arrays that must be permuted together, or storage behind an FFI boundary.
pub trait IndexedCollection {
    /// Number of elements in the collection.
    fn len(&self) -> usize;

    /// Returns `true` if the collection holds no elements. [`sort_indexed`] leaves such a
    /// collection untouched.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the element at position `i` must be ordered before the element at
    /// position `j`. Must be a strict weak order for the result to be sorted.
    fn is_less(&self, i: usize, j: usize) -> bool;

    /// Swaps the elements at positions `i` and `j`.
    fn swap(&mut self, i: usize, j: usize);
}

impl<T: Ord> IndexedCollection for [T] {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn is_less(&self, i: usize, j: usize) -> bool {
        self[i] < self[j]
    }

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        <[T]>::swap(self, i, j);
    }
}

/// Sorts `data` stably, using only index comparisons and swaps.
///
/// A permutation of the positions is sorted first, without touching `data`, so all comparisons
/// see the original layout. The permutation is then applied by following its cycles. A cycle of
/// length *k* costs *k* - 1 swaps, positions that are already in place cost nothing, and no
/// position is visited twice.
///
/// Allocates one `usize` per element plus the scratch space of the merge sort.
///
/// # Examples
///
/// ```
/// use timsort::IndexedCollection;
///
/// struct Columns {
///     keys: Vec<u32>,
///     names: Vec<&'static str>,
/// }
///
/// impl IndexedCollection for Columns {
///     fn len(&self) -> usize {
///         self.keys.len()
///     }
///
///     fn is_less(&self, i: usize, j: usize) -> bool {
///         self.keys[i] < self.keys[j]
///     }
///
///     fn swap(&mut self, i: usize, j: usize) {
///         self.keys.swap(i, j);
///         self.names.swap(i, j);
///     }
/// }
///
/// let mut columns = Columns {
///     keys: vec![3, 1, 2, 1],
///     names: vec!["c", "a", "b", "a2"],
/// };
/// timsort::sort_indexed(&mut columns);
///
/// assert_eq!(columns.keys, [1, 1, 2, 3]);
/// assert_eq!(columns.names, ["a", "a2", "b", "c"]);
/// ```
pub fn sort_indexed<C>(data: &mut C)
where
    C: IndexedCollection + ?Sized,
{
    let len = data.len();
    if len < 2 {
        return;
    }

    let mut perm = (0..len).collect::<Vec<usize>>();
    {
        let data = &*data;
        stable_sort(&mut perm, &mut |a: &usize, b: &usize| data.is_less(*a, *b));
    }

    apply_permutation(data, &mut perm);
}

/// Moves the element at position `perm[i]` to position `i`, for every `i`. Leaves `perm` as the
/// identity.
fn apply_permutation<C>(data: &mut C, perm: &mut [usize])
where
    C: IndexedCollection + ?Sized,
{
    debug_assert_eq!(data.len(), perm.len());

    for start in 0..perm.len() {
        if perm[start] == start {
            continue;
        }

        // Everything on this cycle except `start` still holds its original element, the element
        // that belongs at `cur` is always found at `perm[cur]`.
        let mut cur = start;
        let mut next = perm[cur];
        while next != start {
            data.swap(cur, next);
            perm[cur] = cur;
            cur = next;
            next = perm[cur];
        }
        perm[cur] = cur;
    }
}
