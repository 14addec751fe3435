//! gs-agent: shared agent plumbing (string property bag, RNG seeding).

pub mod properties;
pub mod seed;

pub use properties::{Properties, PropertyError};
pub use seed::{seed_or_time, splitmix64, worker_rng};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nonempty() {
        assert!(!VERSION.is_empty());
    }
}

#[cfg(test)]
mod properties_tests;
