use sort_test_tools::patterns::{self, bentley_mcilroy};
use sort_test_tools::test_types::Keyed;
use timsort::{sort_indexed, IndexedCollection};

/// Parallel columns that have to be permuted together, sorted by `keys`.
struct Table {
    keys: Vec<i32>,
    orders: Vec<usize>,
    swaps: usize,
}

impl Table {
    fn new(keys: &[i32]) -> Self {
        Self {
            keys: keys.to_vec(),
            orders: (0..keys.len()).collect(),
            swaps: 0,
        }
    }

    fn rows(&self) -> Vec<Keyed> {
        self.keys
            .iter()
            .zip(&self.orders)
            .map(|(&key, &order)| Keyed { key, order })
            .collect()
    }
}

impl IndexedCollection for Table {
    fn len(&self) -> usize {
        self.keys.len()
    }

    fn is_less(&self, i: usize, j: usize) -> bool {
        self.keys[i] < self.keys[j]
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.keys.swap(i, j);
        self.orders.swap(i, j);
        self.swaps += 1;
    }
}

/// Swaps needed to apply the permutation that stably sorts `keys`.
fn expected_swaps(keys: &[i32]) -> usize {
    let mut perm = (0..keys.len()).collect::<Vec<_>>();
    perm.sort_by_key(|&i| keys[i]);

    let mut visited = vec![false; perm.len()];
    let mut cycles = 0;
    for start in 0..perm.len() {
        if visited[start] {
            continue;
        }

        cycles += 1;
        let mut cur = start;
        while !visited[cur] {
            visited[cur] = true;
            cur = perm[cur];
        }
    }

    perm.len() - cycles
}

#[test]
fn empty_and_single() {
    let mut table = Table::new(&[]);
    assert!(table.is_empty());
    sort_indexed(&mut table);
    assert!(table.is_empty());
    assert_eq!(table.swaps, 0);

    let mut table = Table::new(&[42]);
    assert!(!table.is_empty());
    sort_indexed(&mut table);
    assert_eq!(table.keys, [42]);
    assert_eq!(table.swaps, 0);
}

#[test]
fn columns_move_together() {
    let mut table = Table::new(&[3, 1, 2, 1, 3, 0]);
    sort_indexed(&mut table);

    assert_eq!(table.keys, [0, 1, 1, 2, 3, 3]);
    assert_eq!(table.orders, [5, 1, 3, 2, 0, 4]);
}

#[test]
fn stable_for_patterns() {
    let pattern_fns: [fn(usize) -> Vec<i32>; 5] = [
        patterns::random,
        |len| patterns::random_uniform(len, 0..8),
        patterns::descending,
        patterns::all_equal,
        |len| patterns::saw_mixed(len, 7),
    ];

    for pattern_fn in pattern_fns {
        for len in [2, 10, 31, 32, 33, 100, 1_000, 2_048] {
            let mut table = Table::new(&pattern_fn(len));
            sort_indexed(&mut table);

            assert!(Keyed::is_stably_sorted(&table.rows()), "len: {len}");
        }
    }
}

#[test]
fn masked_index_restores_input() {
    let keys = patterns::masked_index(1024);

    let mut table = Table::new(&keys);
    sort_indexed(&mut table);
    assert!(Keyed::is_stably_sorted(&table.rows()));

    // Sorting by input position undoes the first sort.
    let mut by_order = Table {
        keys: table.orders.iter().map(|&order| order as i32).collect(),
        orders: table.keys.iter().map(|&key| key as usize).collect(),
        swaps: 0,
    };
    sort_indexed(&mut by_order);

    let restored = by_order.orders.iter().map(|&key| key as i32).collect::<Vec<_>>();
    assert_eq!(restored, keys);
}

#[test]
fn swap_count_is_len_minus_cycles() {
    for keys in [
        patterns::random(1_000),
        patterns::random_uniform(1_000, 0..10),
        patterns::ascending_one_swap(1_000),
        patterns::descending(999),
        patterns::ascending(500),
    ] {
        let mut table = Table::new(&keys);
        sort_indexed(&mut table);

        assert_eq!(table.swaps, expected_swaps(&keys));
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn bentley_mcilroy_matrix() {
    for len in [100, 1023, 1024, 1025] {
        for m in bentley_mcilroy::m_values(len) {
            for dist in bentley_mcilroy::Distribution::ALL {
                let data = dist.generate(len, m);

                for modifier in bentley_mcilroy::Modifier::ALL {
                    let keys = modifier.apply(&data);
                    let mut table = Table::new(&keys);
                    sort_indexed(&mut table);

                    assert!(
                        Keyed::is_stably_sorted(&table.rows()),
                        "len: {len} m: {m} dist: {dist:?} modifier: {modifier:?}"
                    );

                    let mut sorted_keys = keys.clone();
                    sorted_keys.sort();
                    assert_eq!(table.keys, sorted_keys);
                }
            }
        }
    }
}

#[test]
fn plain_slice() {
    let mut v = patterns::random_uniform(777, -100..100);
    let mut expected = v.clone();
    expected.sort();

    sort_indexed(&mut v[..]);
    assert_eq!(v, expected);

    let mut words = ["pear", "apple", "fig", "apple"];
    sort_indexed(&mut words[..]);
    assert_eq!(words, ["apple", "apple", "fig", "pear"]);
}
