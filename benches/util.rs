use std::cell::{Cell, RefCell};
use std::env;
use std::rc::Rc;

use criterion::{black_box, BatchSize, Criterion};
use once_cell::sync::OnceCell;
use regex::Regex;

pub fn pin_thread_to_core() {
    let pin_core_id: usize = 2;

    thread_local! {static AFFINITY_ALREADY_SET: Cell<bool> = Cell::new(false); }

    // Set affinity only once per thread.
    AFFINITY_ALREADY_SET.with(|affinity_already_set| {
        if !affinity_already_set.get() {
            if let Some(core_id_2) = core_affinity::get_core_ids()
                .as_ref()
                .and_then(|ids| ids.get(pin_core_id))
            {
                core_affinity::set_for_current(*core_id_2);
            }

            affinity_already_set.set(true);
        }
    });
}

/// `CUSTOM_BENCH_REGEX` restricts the benchmarks to the names it matches.
fn is_bench_name_ok(name: &str) -> bool {
    static FILTER_REGEX: OnceCell<Option<Regex>> = OnceCell::new();

    let filter_regex = FILTER_REGEX.get_or_init(|| {
        env::var("CUSTOM_BENCH_REGEX")
            .ok()
            .map(|filter_regex| Regex::new(&filter_regex).unwrap())
    });

    filter_regex
        .as_ref()
        .map(|reg| reg.is_match(name))
        .unwrap_or(true)
}

#[inline(never)]
pub fn bench_fn<T: Ord + std::fmt::Debug>(
    c: &mut Criterion,
    test_size: usize,
    transform_name: &str,
    transform: &fn(Vec<i32>) -> Vec<T>,
    pattern_name: &str,
    pattern_provider: &fn(usize) -> Vec<i32>,
    bench_name: &str,
    sort_fn: impl Fn(&mut [T]),
) {
    // Pin the benchmark to the same core to improve repeatability, while criterion is free to
    // use other threads.
    pin_thread_to_core();

    let batch_size = if test_size > 30 {
        BatchSize::LargeInput
    } else {
        BatchSize::SmallInput
    };

    let full_name = format!("{bench_name}-hot-{transform_name}-{pattern_name}-{test_size}");
    if !is_bench_name_ok(&full_name) {
        return;
    }

    c.bench_function(&full_name, |b| {
        b.iter_batched_ref(
            || transform(pattern_provider(test_size)),
            |test_data| {
                sort_fn(black_box(test_data.as_mut_slice()));
                black_box(test_data); // side-effect
            },
            batch_size,
        )
    });
}

/// Prints how many comparisons `instrumented_sort_fn` performs on average. It has to count into
/// `comp_count`.
pub fn measure_comp_count(
    name: &str,
    test_size: usize,
    instrumented_sort_fn: impl Fn(),
    comp_count: Rc<RefCell<u64>>,
) {
    if !is_bench_name_ok(name) {
        return;
    }

    let run_count: usize = if test_size <= 20 {
        100_000
    } else if test_size < 10_000 {
        3000
    } else if test_size < 100_000 {
        1000
    } else {
        100
    };

    *comp_count.borrow_mut() = 0;
    for _ in 0..run_count {
        instrumented_sort_fn();
    }

    // Less than one comparison on average rounds to 0, only happens for tiny inputs.
    let total = *comp_count.borrow() / (run_count as u64);
    println!("{name}: mean comparisons: {total}");
}
