//! Seed derivation for reproducible agents and search workers.

use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

/// Stable seed mixer (same as common SplitMix64).
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// An explicit seed, or the wall clock when none was configured.
pub fn seed_or_time(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    })
}

/// Per-worker generator: the base seed mixed with the worker index, so a
/// fixed base gives every worker its own reproducible stream.
pub fn worker_rng(base: u64, worker: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(splitmix64(base ^ worker))
}
