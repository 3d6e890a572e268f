//! RNG module - uniform piece generation
//!
//! Every piece is an independent uniform choice of shape and rotation slot.
//! Bounded draws reject the remainder of the generator's output space instead of
//! reducing modulo the bound, so a bound of 7 is as fair as a bound of 4.
//!
//! The generator is a simple LCG so a seed replays the same game.

use crate::types::{PieceKind, Rotation, PIECE_COUNT, ROTATION_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    ///
    /// Every seed is used as-is. The increment is odd, so 0 is an ordinary state.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Seed from the thread-local entropy source
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u32>())
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate a uniform value in [0, bound)
    ///
    /// The 2^32 output space is split into `bound` equal buckets; draws landing in
    /// the leftover tail are discarded and retried. Dividing by the bucket size
    /// reads the high bits, which are the strong ones in an LCG.
    ///
    /// A bound of 0 yields 0.
    pub fn next_index(&mut self, bound: u32) -> u32 {
        if bound <= 1 {
            return 0;
        }
        let space = u32::MAX as u64 + 1;
        let bucket = space / bound as u64;
        let limit = bucket * bound as u64;
        loop {
            let val = self.next_u32() as u64;
            if val < limit {
                return (val / bucket) as u32;
            }
        }
    }

    /// Current internal state (replays the upcoming sequence when used as a seed)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Draw an independent uniform piece: shape in [0,7), rotation slot in [0,4)
pub fn random_piece(rng: &mut SimpleRng) -> (PieceKind, Rotation) {
    let kind = PieceKind::from_index(rng.next_index(PIECE_COUNT as u32) as usize);
    let rotation = Rotation::from_index(rng.next_index(ROTATION_COUNT as u32) as usize);
    (kind, rotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_not_degenerate() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.state(), 0);
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, b);
        assert_ne!(a, 0);
    }

    #[test]
    fn test_next_index_stays_below_bound() {
        let mut rng = SimpleRng::new(7);
        for bound in 1..=13 {
            for _ in 0..500 {
                assert!(rng.next_index(bound) < bound);
            }
        }
        assert_eq!(rng.next_index(0), 0);
    }

    fn assert_uniform(bound: u32, draws: u32) {
        let mut rng = SimpleRng::new(20240601);
        let mut counts = vec![0u32; bound as usize];
        for _ in 0..draws {
            counts[rng.next_index(bound) as usize] += 1;
        }
        let expected = draws as f64 / bound as f64;
        for (value, &count) in counts.iter().enumerate() {
            let deviation = (count as f64 - expected).abs() / expected;
            assert!(
                deviation < 0.05,
                "value {} drawn {} times, expected ~{}",
                value,
                count,
                expected
            );
        }
    }

    #[test]
    fn test_next_index_uniform_over_seven() {
        assert_uniform(7, 70_000);
    }

    #[test]
    fn test_next_index_uniform_over_four() {
        assert_uniform(4, 40_000);
    }

    #[test]
    fn test_random_piece_covers_catalog() {
        let mut rng = SimpleRng::new(99);
        let mut seen_kinds = [false; PIECE_COUNT];
        let mut seen_rotations = [false; ROTATION_COUNT];
        for _ in 0..1000 {
            let (kind, rotation) = random_piece(&mut rng);
            seen_kinds[kind.index()] = true;
            seen_rotations[rotation.index()] = true;
        }
        assert!(seen_kinds.iter().all(|&s| s));
        assert!(seen_rotations.iter().all(|&s| s));
    }

    #[test]
    fn test_state_replays_sequence() {
        let mut rng = SimpleRng::new(4242);
        rng.next_u32();
        let mut replay = SimpleRng::new(rng.state());
        assert_eq!(rng.next_index(7), replay.next_index(7));
    }

    #[test]
    fn test_zero_state_replays_sequence() {
        // Predecessor of 0: (0 - c) * a^-1 mod 2^32, with a^-1 = 4276115653
        let mut rng = SimpleRng::new(0u32.wrapping_sub(1013904223).wrapping_mul(4276115653));
        assert_eq!(rng.next_u32(), 0);
        assert_eq!(rng.state(), 0);

        let mut replay = SimpleRng::new(rng.state());
        for _ in 0..16 {
            assert_eq!(rng.next_u32(), replay.next_u32());
        }
    }
}
