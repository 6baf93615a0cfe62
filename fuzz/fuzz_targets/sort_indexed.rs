#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut v = data.to_vec();
    let mut expected = v.clone();
    expected.sort();

    timsort::sort_indexed(&mut v[..]);
    assert_eq!(v, expected);
});
