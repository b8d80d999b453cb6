use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of randomness injected into strategies and controllers.
pub trait RandomSource: Send + Sync {
    /// Used to generate shuffle seeds.
    fn next_u64(&self) -> u64;
    /// Used as the coin flip of `TranslateMode::Random`.
    fn next_bool(&self) -> bool;
}

/// Thread-local OS-seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_u64(&self) -> u64 {
        rand::thread_rng().gen()
    }

    fn next_bool(&self) -> bool {
        rand::thread_rng().gen()
    }
}

/// Deterministic generator for reproducible sessions.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_u64(&self) -> u64 {
        self.rng.lock().gen()
    }

    fn next_bool(&self) -> bool {
        self.rng.lock().gen()
    }
}
