#![no_main]

use hyperloglog_estimator::Estimator;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(estimator) = Estimator::from_json(input) {
        // Decode is lenient by contract; estimation must hold up for any
        // register state that parses, and the state must survive a
        // re-encode.
        let _ = estimator.estimate();
        let encoded = estimator.to_json().unwrap();
        let decoded = Estimator::from_json(&encoded).unwrap();
        assert_eq!(decoded.registers(), estimator.registers());
    }
});
