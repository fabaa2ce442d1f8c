use hyperloglog_estimator::Estimator;
use wyhash::wyhash;

/// The estimator consumes pre-hashed 32-bit values; any hasher with good
/// avalanche behavior works. Here: upper half of a 64-bit wyhash.
fn hash32(value: &str) -> u32 {
    (wyhash(value.as_bytes(), 0) >> 32) as u32
}

fn main() -> Result<(), hyperloglog_estimator::Error> {
    let mut monday = Estimator::new(1024)?;
    for visitor in 0..10_000 {
        monday.insert_hash(hash32(&format!("visitor-{visitor}")));
    }
    println!("monday distinct visitors  ~ {}", monday.estimate());

    let mut tuesday = Estimator::new(1024)?;
    for visitor in 5_000..12_000 {
        tuesday.insert_hash(hash32(&format!("visitor-{visitor}")));
    }
    println!("tuesday distinct visitors ~ {}", tuesday.estimate());

    println!("returning visitors        ~ {}", monday.intersect(&tuesday)?);

    let mut both = monday.clone();
    both.merge(&tuesday)?;
    println!("two-day distinct visitors ~ {}", both.estimate());

    let encoded = both.to_json()?;
    let restored = Estimator::from_json(&encoded)?;
    assert_eq!(restored, both);
    println!("snapshot round trip ok ({} bytes)", encoded.len());

    Ok(())
}
