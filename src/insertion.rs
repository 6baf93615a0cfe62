/// Sorts `v` using binary insertion sort, assuming `v[..offset]` is already sorted.
///
/// This needs *O*(*n* \* log(*n*)) comparisons but *O*(*n*^2) element moves in the worst case,
/// which makes it the best option for short slices and for extending short runs.
///
/// Each new element is inserted after all elements that are equal to it, which keeps the sort
/// stable. The shift happens via rotation, so there is never more than one live copy of an element
/// and a panicking `is_less` leaves `v` a permutation of its input.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub(crate) fn binary_insertion_sort<T, F>(v: &mut [T], offset: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    debug_assert!(offset <= len);

    // A single element is trivially sorted.
    let start = offset.max(1);

    for i in start..len {
        let (sorted, tail) = v.split_at(i);
        let pivot = &tail[0];

        // Invariants of the binary search:
        //   pivot >= all in sorted[..pos]
        //   pivot <  all in sorted[pos..]
        let pos = sorted.partition_point(|elem| !is_less(pivot, elem));

        if pos != i {
            v[pos..=i].rotate_right(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_from_offset() {
        let mut v = [1, 4, 9, 3, 0, 9, 2];
        binary_insertion_sort(&mut v, 3, &mut |a, b| a < b);
        assert_eq!(v, [0, 1, 2, 3, 4, 9, 9]);
    }

    #[test]
    fn zero_offset() {
        let mut v = [3, 2, 1];
        binary_insertion_sort(&mut v, 0, &mut |a, b| a < b);
        assert_eq!(v, [1, 2, 3]);

        let mut empty: [i32; 0] = [];
        binary_insertion_sort(&mut empty, 0, &mut |a, b| a < b);
    }

    #[test]
    fn equal_elements_keep_order() {
        let mut v = [(2, 0), (1, 1), (2, 2), (1, 3), (0, 4), (2, 5), (1, 6)];
        binary_insertion_sort(&mut v, 1, &mut |a, b| a.0 < b.0);
        assert_eq!(
            v,
            [(0, 4), (1, 1), (1, 3), (1, 6), (2, 0), (2, 2), (2, 5)]
        );
    }
}
