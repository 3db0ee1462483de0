//! `rand`-backed random source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ports::random_port::RandomPort;

pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Reproducible stream for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is set, otherwise from OS entropy.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }
}

impl RandomPort for StdRandom {
    fn next(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}
