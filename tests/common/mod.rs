#![allow(dead_code)]

use consistent::Ring;
use rand::{
    Rng,
    SeedableRng,
    rngs::StdRng,
};

pub const SAMPLE_KEYS: [&str; 6] = ["AAAA", "BBBB", "CCCC", "DDDD", "EEEE", "FFFF"];

/// `count` member names of the form `member-N`.
pub fn members(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("member-{i}")).collect()
}

/// A reproducible sample of random keys.
pub fn random_keys(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| format!("key-{}", rng.random::<u64>())).collect()
}

/// Resolve every key, panicking on an empty ring.
pub fn resolve_all(ring: &Ring, keys: &[String]) -> Vec<String> {
    keys.iter()
        .map(|key| ring.resolve(key).expect("ring should not be empty"))
        .collect()
}
