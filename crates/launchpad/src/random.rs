//! Injectable randomness
//!
//! Mock wallet addresses, launch ids, the cosmetic quality score and the price
//! jitter all draw from a `RandomSource`, so tests can replay fixed values.

use gaspad_types::{GasPadError, GasPadResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const BASE36_UPPER: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const BASE36_LOWER: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Uniform random values in [0, 1)
pub trait RandomSource: Send + Sync {
    fn next_f64(&mut self) -> f64;

    /// Integer in [0, n); 0 when n is 0
    fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        let scaled = (self.next_f64() * n as f64).floor() as u32;
        scaled.min(n - 1)
    }

    /// `len` characters from 0-9 and A-Z
    fn alphanumeric_upper(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| BASE36_UPPER[self.below(36) as usize] as char)
            .collect()
    }

    /// `len` characters from 0-9 and a-z
    fn alphanumeric_lower(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| BASE36_LOWER[self.below(36) as usize] as char)
            .collect()
    }
}

/// ChaCha20-backed source
pub struct ChaChaRandom {
    rng: ChaCha20Rng,
}

impl ChaChaRandom {
    /// Seed from operating system entropy
    pub fn from_entropy() -> GasPadResult<Self> {
        let mut seed = [0u8; 32];
        getrandom::getrandom(&mut seed)
            .map_err(|e| GasPadError::generic_with_context(&e.to_string(), "seeding random source"))?;
        Ok(Self {
            rng: ChaCha20Rng::from_seed(seed),
        })
    }

    /// Deterministic source for reproducible runs
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Independent child source seeded from this one
    pub fn fork(&mut self) -> Self {
        Self::from_seed(self.rng.gen::<u64>())
    }
}

impl RandomSource for ChaChaRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    index: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, index: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value.clamp(0.0, 0.999_999_999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_stays_in_range() {
        let mut random = SequenceRandom::new(vec![0.0, 0.5, 0.999_999_999, 1.0]);
        assert_eq!(random.below(15), 0);
        assert_eq!(random.below(15), 7);
        assert_eq!(random.below(15), 14);
        assert_eq!(random.below(15), 14);
        assert_eq!(random.below(0), 0);
    }

    #[test]
    fn test_alphanumeric_alphabets() {
        let mut random = SequenceRandom::new(vec![0.0, 0.99]);
        assert_eq!(random.alphanumeric_upper(4), "0Z0Z");
        assert_eq!(random.alphanumeric_lower(2), "0z");
    }

    #[test]
    fn test_seeded_sources_are_reproducible() {
        let mut a = ChaChaRandom::from_seed(7);
        let mut b = ChaChaRandom::from_seed(7);
        for _ in 0..16 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn test_forks_are_independent_and_reproducible() {
        let mut parent_a = ChaChaRandom::from_seed(7);
        let mut parent_b = ChaChaRandom::from_seed(7);

        let mut first = parent_a.fork();
        let mut second = parent_a.fork();
        assert_ne!(first.next_f64(), second.next_f64());

        let mut replay = parent_b.fork();
        assert_eq!(ChaChaRandom::from_seed(7).fork().next_f64(), replay.next_f64());
    }

    #[test]
    fn test_entropy_source_produces_unit_interval() {
        let mut random = ChaChaRandom::from_entropy().unwrap();
        for _ in 0..100 {
            let value = random.next_f64();
            assert!((0.0..1.0).contains(&value));
        }
    }
}
