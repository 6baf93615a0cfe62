use sort_test_tools::patterns;
use sort_test_tools::test_types::Keyed;
use sort_test_tools::{instantiate_sort_tests, Sort};

struct SortImpl {}

impl Sort for SortImpl {
    fn name() -> String {
        "rust_timsort_stable".into()
    }

    fn sort<T>(arr: &mut [T])
    where
        T: Ord,
    {
        timsort::sort(arr);
    }

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        timsort::sort_by(arr, compare);
    }
}

instantiate_sort_tests!(SortImpl);

// --- Engine specific ---

fn count_comparisons(v: &mut [i32]) -> usize {
    let mut comps = 0;
    timsort::sort_by_less(v, |a, b| {
        comps += 1;
        a < b
    });

    comps
}

fn ceil_log2(n: usize) -> usize {
    n.next_power_of_two().trailing_zeros() as usize
}

fn assert_sorted_stable(keys: &[i32]) {
    let mut v = Keyed::tag_all(keys);
    timsort::sort_by(&mut v, Keyed::cmp_key);

    assert_eq!(v.len(), keys.len());
    assert!(Keyed::is_stably_sorted(&v), "len: {}", keys.len());
}

#[test]
fn distinct_keys() {
    let mut v = [(3, 'a'), (1, 'b'), (2, 'c')];
    timsort::sort_by_key(&mut v, |e| e.0);

    assert_eq!(v, [(1, 'b'), (2, 'c'), (3, 'a')]);
}

#[test]
fn equal_keys_keep_input_order() {
    let mut v = [(3, 'a'), (2, 'b'), (2, 'c')];
    timsort::sort_by_key(&mut v, |e| e.0);

    assert_eq!(v, [(2, 'b'), (2, 'c'), (3, 'a')]);
}

#[test]
fn masked_index_restores_input() {
    let original = Keyed::tag_all(&patterns::masked_index(1024));

    let mut v = original.clone();
    timsort::sort_by_key(&mut v, |e| e.key);
    assert!(Keyed::is_stably_sorted(&v));

    timsort::sort_by_key(&mut v, |e| e.order);
    assert_eq!(v, original);
}

#[test]
fn descending_odd_len() {
    let mut v = patterns::descending(1025);
    let comps = count_comparisons(&mut v);

    assert_eq!(v, patterns::ascending(1025));
    // One strictly descending run, reversed in place, nothing to merge.
    assert_eq!(comps, 1024);
}

#[test]
fn presorted_comparison_budget() {
    for len in [2, 17, 31, 32, 33, 100, 1_000, 10_000] {
        let mut v = patterns::ascending(len);
        assert_eq!(count_comparisons(&mut v), len - 1, "len: {len}");
        assert_eq!(v, patterns::ascending(len));

        let mut v = patterns::descending(len);
        assert_eq!(count_comparisons(&mut v), len - 1, "len: {len}");
        assert_eq!(v, patterns::ascending(len));
    }
}

#[test]
fn one_swap_comparison_budget() {
    for len in [1_000, 1_025, 10_000] {
        let mut v = patterns::ascending_one_swap(len);
        let comps = count_comparisons(&mut v);

        assert_eq!(v, patterns::ascending(len));
        assert!(
            comps <= len + 4 * ceil_log2(len) + 16,
            "len: {len} comparisons: {comps}"
        );
    }
}

#[test]
fn random_comparison_budget() {
    for len in [100, 1_000, 10_000] {
        let mut v = patterns::random(len);
        let comps = count_comparisons(&mut v);

        assert!(v.windows(2).all(|w| w[0] <= w[1]));
        assert!(
            comps <= len * (ceil_log2(len) + 2),
            "len: {len} comparisons: {comps}"
        );
    }
}

fn stack_threshold_impl(len: usize) {
    let saw_count = (len / 20).max(1);

    assert_sorted_stable(&patterns::random(len));
    assert_sorted_stable(&patterns::random_uniform(len, 0..64));
    assert_sorted_stable(&patterns::saw_mixed(len, saw_count));
    assert_sorted_stable(&patterns::saw_mixed_range(len, 16..40));
    assert_sorted_stable(&patterns::pipe_organ(len));
    assert_sorted_stable(&patterns::masked_index(len));
}

macro_rules! stack_threshold_tests {
    ($($len:literal),*) => {
        $(
            paste::paste! {
                #[test]
                #[cfg_attr(miri, ignore)]
                fn [<stack_threshold_ $len>]() {
                    stack_threshold_impl($len);
                }
            }
        )*
    };
}

// Lengths on both sides of every run stack capacity step.
stack_threshold_tests!(119, 120, 1541, 1542, 119150, 119151);

#[test]
fn merge_threshold_boundaries() {
    // Lengths on both sides of the point where sorting switches from a single insertion pass to
    // merging runs, and of the next two powers of two.
    for len in [31, 32, 33, 63, 64, 65, 127, 128, 129] {
        assert_sorted_stable(&patterns::random(len));
        assert_sorted_stable(&patterns::descending(len));
        assert_sorted_stable(&patterns::ascending_one_swap(len));

        for run_len in [len / 2, len / 2 + 1] {
            // Two ascending runs split near the middle, the second one entirely below the first.
            let keys = (0..len)
                .map(|i| {
                    if i < run_len {
                        (i + len) as i32
                    } else {
                        i as i32
                    }
                })
                .collect::<Vec<_>>();
            assert_sorted_stable(&keys);
        }
    }
}

#[test]
#[cfg(not(miri))]
fn large_random() {
    let mut v = patterns::random(1_000_000);
    let mut expected = v.clone();
    expected.sort();

    timsort::sort(&mut v);
    assert!(v == expected);
}

#[test]
fn sort_by_less_reverse() {
    let mut v = patterns::random_uniform(500, 0..50);
    let mut expected = v.clone();
    expected.sort_by(|a, b| b.cmp(a));

    timsort::sort_by_less(&mut v, |a, b| b < a);
    assert_eq!(v, expected);
}

#[test]
fn sort_by_key_owned_strings() {
    let mut v = patterns::random_uniform(300, 0..1_000)
        .into_iter()
        .map(|val| "x".repeat((val % 7) as usize) + &val.to_string())
        .collect::<Vec<String>>();
    let mut expected = v.clone();
    expected.sort_by_key(|s| s.len());

    timsort::sort_by_key(&mut v, |s| s.len());
    assert_eq!(v, expected);
}

#[test]
fn zero_sized_elements_are_not_compared() {
    let mut v = vec![(); 1_000];
    let mut comps = 0;
    timsort::sort_by_less(&mut v, |_, _| {
        comps += 1;
        false
    });

    assert_eq!(comps, 0);
    assert_eq!(v.len(), 1_000);
}
