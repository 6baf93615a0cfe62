//! Input patterns for testing and benchmarking sorts. All values are `i32`, other types are
//! derived from them by the caller.
//!
//! Random patterns draw from a seed that is fixed per process, so a failing run can be reproduced
//! with `OVERRIDE_SEED=<seed>`.

use std::env;
use std::str::FromStr;
use std::sync::Mutex;

use rand::prelude::*;

use zipf::ZipfDistribution;

// --- Public ---

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    let mut rng = seeded_rng();
    (0..len).map(|_| rng.gen::<i32>()).collect()
}

pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<rand::distributions::Uniform<i32>>,
{
    let mut rng = seeded_rng();
    let dist: rand::distributions::Uniform<i32> = range.into();

    (0..len).map(|_| dist.sample(&mut rng)).collect()
}

/// Few very common values and a long tail, see <https://en.wikipedia.org/wiki/Zipf's_law>.
pub fn random_zipf(len: usize, exponent: f64) -> Vec<i32> {
    if len == 0 {
        return Vec::new();
    }

    let mut rng = seeded_rng();
    let dist = ZipfDistribution::new(len, exponent).expect("invalid zipf parameters");

    (0..len).map(|_| dist.sample(&mut rng) as i32).collect()
}

/// A sorted prefix of `sorted_percent` percent of the values, followed by random values.
pub fn random_sorted(len: usize, sorted_percent: f64) -> Vec<i32> {
    //     .:
    //   .:::. :
    // .::::::.::
    // [----][--]

    let mut v = random(len);
    let sorted_len = ((len as f64) * (sorted_percent / 100.0)).round() as usize;
    v[..sorted_len].sort_unstable();

    v
}

pub fn all_equal(len: usize) -> Vec<i32> {
    vec![66; len]
}

pub fn ascending(len: usize) -> Vec<i32> {
    (0..len as i32).collect()
}

pub fn descending(len: usize) -> Vec<i32> {
    (0..len as i32).rev().collect()
}

/// Ascending values with one adjacent pair swapped in the middle.
pub fn ascending_one_swap(len: usize) -> Vec<i32> {
    let mut v = ascending(len);
    if len >= 2 {
        let mid = len / 2;
        v.swap(mid - 1, mid);
    }

    v
}

/// `i & 0xeeeeee` for every index `i`: ascending stretches with duplicate keys and regular drops.
pub fn masked_index(len: usize) -> Vec<i32> {
    (0..len as i32).map(|i| i & 0xee_eeee).collect()
}

pub fn saw_ascending(len: usize, saw_count: usize) -> Vec<i32> {
    //   .:  .:
    // .:::.:::

    saws(len, saw_count, |_| SawDirection::Ascending)
}

pub fn saw_descending(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.
    // :::.:::.

    saws(len, saw_count, |_| SawDirection::Descending)
}

pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    let directions = random_uniform(saw_count.max(1) + 1, 0..=1);
    saws(len, saw_count, |i| SawDirection::from_bit(directions[i]))
}

/// Saws of random direction with a random length in `range` each.
pub fn saw_mixed_range(len: usize, range: std::ops::Range<usize>) -> Vec<i32> {
    //     :.
    // :.  :::.    .::.      .:
    // :::.:::::..::::::..:.:::

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random(len);

    let max_chunks = len / range.start + 1;
    let directions = random_uniform(max_chunks, 0..=1);
    let chunk_lens = random_uniform(max_chunks, (range.start as i32)..(range.end as i32));

    let mut start = 0;
    for (&direction, &chunk_len) in directions.iter().zip(&chunk_lens) {
        if start >= len {
            break;
        }

        let end = (start + chunk_len as usize).min(len);
        SawDirection::from_bit(direction).apply(&mut vals[start..end]);
        start = end;
    }

    vals
}

pub fn pipe_organ(len: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    let mut vals = random(len);
    let (first_half, second_half) = vals.split_at_mut(len / 2);

    SawDirection::Ascending.apply(first_half);
    SawDirection::Descending.apply(second_half);

    vals
}

/// Inputs from "Engineering a Sort Function" by Bentley and McIlroy. A distribution with
/// parameter `m` produces the base data, a modifier then rearranges it.
pub mod bentley_mcilroy {
    use rand::Rng;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Distribution {
        Sawtooth,
        Random,
        Stagger,
        Plateau,
        Shuffle,
    }

    impl Distribution {
        pub const ALL: [Self; 5] = [
            Self::Sawtooth,
            Self::Random,
            Self::Stagger,
            Self::Plateau,
            Self::Shuffle,
        ];

        pub fn generate(self, len: usize, m: usize) -> Vec<i32> {
            debug_assert!(m > 0);

            let mut rng = super::seeded_rng();
            let (mut even, mut odd) = (0i64, 1i64);

            (0..len)
                .map(|i| match self {
                    Self::Sawtooth => (i % m) as i32,
                    Self::Random => rng.gen_range(0..m) as i32,
                    Self::Stagger => ((i * m + i) % len) as i32,
                    Self::Plateau => i.min(m) as i32,
                    Self::Shuffle => {
                        if rng.gen_range(0..m) != 0 {
                            even += 2;
                            even as i32
                        } else {
                            odd += 2;
                            odd as i32
                        }
                    }
                })
                .collect()
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Modifier {
        Copy,
        Reverse,
        ReverseFirstHalf,
        ReverseSecondHalf,
        Sorted,
        Dither,
    }

    impl Modifier {
        pub const ALL: [Self; 6] = [
            Self::Copy,
            Self::Reverse,
            Self::ReverseFirstHalf,
            Self::ReverseSecondHalf,
            Self::Sorted,
            Self::Dither,
        ];

        pub fn apply(self, data: &[i32]) -> Vec<i32> {
            let mut out = data.to_vec();
            let half = out.len() / 2;

            match self {
                Self::Copy => {}
                Self::Reverse => out.reverse(),
                Self::ReverseFirstHalf => out[..half].reverse(),
                Self::ReverseSecondHalf => out[half..].reverse(),
                Self::Sorted => out.sort(),
                Self::Dither => {
                    for (i, val) in out.iter_mut().enumerate() {
                        *val += (i % 5) as i32;
                    }
                }
            }

            out
        }
    }

    /// Values of `m` used with a length: 1, 2, 4, ... below `2 * len`.
    pub fn m_values(len: usize) -> impl Iterator<Item = usize> {
        std::iter::successors(Some(1usize), |m| m.checked_mul(2)).take_while(move |&m| m < 2 * len)
    }
}

/// Overwrites the default behavior so that each call to a random derived pattern yields new random
/// values.
///
/// By default `patterns::random(4)` will yield the same values per process invocation.
/// Benchmarks should call this.
pub fn use_random_seed_each_time() {
    let (seed_type, _) = get_or_init_seed_type_and_value();
    if seed_type == SeedType::ExternalOverride {
        panic!("Using use_random_seed_each_time conflicts with the external seed override.");
    }

    *lock_seed() = Some((SeedType::RandomEachTime, 0));
}

pub fn random_init_seed() -> u64 {
    get_or_init_seed_type_and_value().1
}

// --- Private ---

#[derive(Clone, Copy)]
enum SawDirection {
    Ascending,
    Descending,
}

impl SawDirection {
    fn from_bit(bit: i32) -> Self {
        if bit == 0 {
            Self::Ascending
        } else {
            Self::Descending
        }
    }

    fn apply(self, chunk: &mut [i32]) {
        match self {
            Self::Ascending => chunk.sort_unstable(),
            Self::Descending => chunk.sort_unstable_by(|a, b| b.cmp(a)),
        }
    }
}

fn saws(len: usize, saw_count: usize, direction: impl Fn(usize) -> SawDirection) -> Vec<i32> {
    if len == 0 {
        return Vec::new();
    }

    let mut vals = random(len);
    let chunk_len = (len / saw_count.max(1)).max(1);

    for (i, chunk) in vals.chunks_mut(chunk_len).enumerate() {
        // More chunks than saws if len is not divisible, the remainder reuses the last direction.
        direction(i.min(saw_count.max(1))).apply(chunk);
    }

    vals
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum SeedType {
    RandomEachTime,
    RandomOncePerProcess,
    ExternalOverride,
}

static SEED_TYPE_AND_VALUE: Mutex<Option<(SeedType, u64)>> = Mutex::new(None);

fn lock_seed() -> std::sync::MutexGuard<'static, Option<(SeedType, u64)>> {
    // A panicking test must not poison the seed for all others.
    SEED_TYPE_AND_VALUE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn get_or_init_seed_type_and_value() -> (SeedType, u64) {
    let (seed_type, seed_val) = *lock_seed().get_or_insert_with(|| {
        match env::var("OVERRIDE_SEED") {
            Ok(seed) => (
                SeedType::ExternalOverride,
                u64::from_str(&seed).expect("OVERRIDE_SEED must be a u64"),
            ),
            Err(_) => (SeedType::RandomOncePerProcess, thread_rng().gen()),
        }
    });

    if seed_type == SeedType::RandomEachTime {
        (seed_type, thread_rng().gen())
    } else {
        (seed_type, seed_val)
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(random_init_seed())
}
