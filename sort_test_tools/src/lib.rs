//! Implementation-agnostic test harness for stable sorts.
//!
//! A sort plugs in by implementing [`Sort`], the generic test bodies in [`tests`] are then
//! instantiated as `#[test]` functions with [`instantiate_sort_tests!`].

pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering;
}

pub mod patterns;
pub mod test_types;
