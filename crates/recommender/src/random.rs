//! Randomness used by the fallback path.
//!
//! The engine never touches a global generator. Callers hand it a
//! `RandomSource`, which lets tests pin the fallback choice.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks an index uniformly from `0..len`.
pub trait RandomSource {
    /// Return an index in `0..len`. Callers guarantee `len > 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}

/// OS-seeded thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Reproducible generator seeded from a `u64`
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Always returns the same index, clamped into range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIndex(pub usize);

impl RandomSource for FixedIndex {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_index_clamps() {
        let mut fixed = FixedIndex(7);
        assert_eq!(fixed.pick_index(10), 7);
        assert_eq!(fixed.pick_index(3), 2);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        let picks_a: Vec<usize> = (0..20).map(|_| a.pick_index(100)).collect();
        let picks_b: Vec<usize> = (0..20).map(|_| b.pick_index(100)).collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn test_thread_random_in_range() {
        let mut rng = ThreadRandom;
        for _ in 0..100 {
            assert!(rng.pick_index(3) < 3);
        }
    }

    #[test]
    fn test_borrowed_source() {
        let mut fixed = FixedIndex(1);
        let borrowed: &mut dyn RandomSource = &mut fixed;
        assert_eq!(borrowed.pick_index(5), 1);
    }
}
