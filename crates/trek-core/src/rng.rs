use serde::{Deserialize, Serialize};

/// Small seedable RNG for card draws.
///
/// A plain LCG, so a seed replays the same game on every platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// Create a new deterministic RNG from a seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    /// Seed from the system clock, for interactive games without `--seed`.
    #[must_use]
    pub fn from_clock() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        #[allow(clippy::cast_possible_truncation)]
        Self::new(nanos as u64)
    }

    /// Next pseudo-random `u64`.
    pub const fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }

    /// Next value in `[0, upper_exclusive)`.
    pub fn next_bounded(&mut self, upper_exclusive: u64) -> u64 {
        if upper_exclusive == 0 {
            return 0;
        }
        // The low bits of an LCG have short periods; draw from the high half.
        (self.next_u64() >> 33) % upper_exclusive
    }

    /// Roll a die with faces `1..=sides`. Returns 1 for `sides == 0`.
    pub fn roll(&mut self, sides: u32) -> u32 {
        let face = self.next_bounded(u64::from(sides.max(1)));
        u32::try_from(face).map_or(1, |f| f + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = DeterministicRng::new(42);
        let mut b = DeterministicRng::new(42);
        for _ in 0..32 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = DeterministicRng::new(1);
        let mut b = DeterministicRng::new(2);
        let xs: Vec<u64> = (0..8).map(|_| a.next_u64()).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.next_u64()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn bounded_zero_is_zero() {
        let mut rng = DeterministicRng::new(7);
        assert_eq!(rng.next_bounded(0), 0);
    }

    #[test]
    fn roll_stays_on_the_die() {
        let mut rng = DeterministicRng::new(99);
        let mut seen = [false; 10];
        for _ in 0..1_000 {
            let face = rng.roll(10);
            assert!((1..=10).contains(&face), "face {face}");
            seen[face as usize - 1] = true;
        }
        assert!(seen.iter().all(|s| *s), "every face should come up");
        assert_eq!(rng.roll(0), 1);
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut rng = DeterministicRng::new(5);
        let _ = rng.next_u64();
        let json = serde_json::to_string(&rng).expect("serialize");
        let mut back: DeterministicRng = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(rng.next_u64(), back.next_u64());
    }
}
