#![no_main]

use hyperloglog_estimator::Estimator;
use libfuzzer_sys::fuzz_target;
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let split_index = wyhash(data, 0) as usize % data.len();
    let (first_half, second_half) = data.split_at(split_index);

    let mut left = Estimator::new(64).unwrap();
    for chunk in first_half.chunks(4) {
        left.insert_hash(wyhash(chunk, 1) as u32);
        assert!(left.estimate() > 0);
    }

    let mut right = Estimator::new(64).unwrap();
    for chunk in second_half.chunks(4) {
        right.insert_hash(wyhash(chunk, 2) as u32);
    }

    let mut merged = left.clone();
    merged.merge(&right).unwrap();

    let mut reversed = right.clone();
    reversed.merge(&left).unwrap();
    assert_eq!(merged, reversed);

    // Intersection may be noisy but must never error for same-size inputs.
    let _ = left.intersect(&right).unwrap();
});
