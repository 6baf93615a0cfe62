#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Little endian i32s, a trailing partial value is dropped.
    let mut v = data
        .chunks_exact(4)
        .map(|chunk| i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect::<Vec<_>>();

    let mut expected = v.clone();
    expected.sort();

    timsort::sort(&mut v);
    assert_eq!(v, expected);
});
