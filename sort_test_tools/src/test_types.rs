use std::cmp::Ordering;
use std::hint::black_box;

/// Element tagged with its position in the input, compared by `key` only.
///
/// Sorting by key and then by `order` has to restore the input exactly, and within equal keys a
/// stable sort leaves `order` ascending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keyed {
    pub key: i32,
    pub order: usize,
}

impl Keyed {
    /// Tags every value with its index.
    pub fn tag_all(keys: &[i32]) -> Vec<Self> {
        keys.iter()
            .enumerate()
            .map(|(order, &key)| Self { key, order })
            .collect()
    }

    pub fn cmp_key(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }

    pub fn cmp_order(&self, other: &Self) -> Ordering {
        self.order.cmp(&other.order)
    }

    /// Checks that `v` is ascending by key, and by order within equal keys.
    pub fn is_stably_sorted(v: &[Self]) -> bool {
        v.windows(2)
            .all(|w| (w[0].key, w[0].order) < (w[1].key, w[1].order))
    }
}

/// Large stack value, moving it is much more expensive than comparing it.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct LargeValue {
    values: [i64; 128],
}

impl LargeValue {
    pub fn new(val: i32) -> Self {
        let mut values = [0i64; 128];
        let mut next = val as i64;

        for elem in &mut values {
            *elem = next;
            next = black_box(next + 1);
        }

        Self { values }
    }

    fn key(&self) -> i64 {
        self.values[3] + self.values[64] + self.values[127]
    }
}

impl PartialOrd for LargeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LargeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// 16 byte `Copy` value with a comparison that costs a few floating point operations.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Ratio {
    num: f64,
    den: f64,
}

impl Ratio {
    pub fn new(val: i32) -> Self {
        let shifted = (val as f64) + (i32::MAX as f64) + 10.0;

        let num = shifted + 0.1;
        let den = shifted.log(4.1);

        assert!(num.is_normal() && den.is_normal() && den < num);

        Self { num, den }
    }

    fn value(&self) -> f64 {
        self.num / self.den
    }
}

// Only ever constructed from normal values, NaN is impossible.
impl Eq for Ratio {}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().total_cmp(&other.value())
    }
}

/// Zero-sized type with a total order in which all values are equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Unit;
