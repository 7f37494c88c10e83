//! Clock and random implementations.

use chrono::{DateTime, Utc};

use crate::infrastructure::ports::{ClockPort, RandomPort};

/// System clock - uses real time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        use rand::Rng;
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Seeded random for reproducible runs (simulation and tests).
pub struct SeededRandom {
    rng: std::sync::Mutex<rand::rngs::StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            rng: std::sync::Mutex::new(rand::rngs::StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomPort for SeededRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        use rand::Rng;
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(min..=max),
            // A poisoned lock means a panic mid-draw; fall back to the
            // lower bound rather than propagating the poison.
            Err(poisoned) => poisoned.into_inner().gen_range(min..=max),
        }
    }
}

/// Fixed clock for testing.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_random_is_reproducible() {
        let a = SeededRandom::new(7);
        let b = SeededRandom::new(7);
        let draws_a: Vec<i32> = (0..10).map(|_| a.gen_range(1, 100)).collect();
        let draws_b: Vec<i32> = (0..10).map(|_| b.gen_range(1, 100)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn system_random_respects_bounds() {
        let random = SystemRandom::new();
        for _ in 0..100 {
            let draw = random.gen_range(1, 100);
            assert!((1..=100).contains(&draw));
        }
    }
}
