use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Highest level a node can reach. Head carries `MAX_LEVEL + 1` links.
pub const MAX_LEVEL: usize = 32;

/// Source of node heights for newly inserted entries.
///
/// A height `h` means the node is linked on levels `0..=h`. Values above
/// [`MAX_LEVEL`] are clamped by the list.
pub trait LevelGenerator {
    fn random_level(&mut self) -> usize;
}

impl<G: LevelGenerator + ?Sized> LevelGenerator for &mut G {
    fn random_level(&mut self) -> usize {
        (**self).random_level()
    }
}

impl<G: LevelGenerator + ?Sized> LevelGenerator for Box<G> {
    fn random_level(&mut self) -> usize {
        (**self).random_level()
    }
}

/// Geometric height distribution with p = 1/2.
///
/// The level is the number of one bits drawn before the first zero bit, so
/// a node reaches level `i` with probability `2^-i`. One 64 bit word holds
/// more coin flips than [`MAX_LEVEL`] needs.
#[derive(Debug, Clone)]
pub struct Geometric {
    rng: ChaCha8Rng,
}

impl Geometric {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    // reproducible heights, mostly for tests and benchmarks
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for Geometric {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelGenerator for Geometric {
    fn random_level(&mut self) -> usize {
        let heads = self.rng.next_u64().trailing_ones() as usize;
        heads.min(MAX_LEVEL)
    }
}

/// Always produces the same height. Useful to build degenerate lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLevel(pub usize);

impl LevelGenerator for FixedLevel {
    fn random_level(&mut self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_levels_are_capped() {
        let mut levels = Geometric::seeded(7);
        for _ in 0..100_000 {
            assert!(levels.random_level() <= MAX_LEVEL);
        }
    }

    #[test]
    fn test_geometric_distribution() {
        let mut levels = Geometric::seeded(42);
        let samples = 200_000;
        let mut histogram = [0usize; MAX_LEVEL + 1];
        for _ in 0..samples {
            histogram[levels.random_level()] += 1;
        }

        // roughly half of the samples stop at every level
        let zero = histogram[0] as f64 / samples as f64;
        let one = histogram[1] as f64 / samples as f64;
        let two = histogram[2] as f64 / samples as f64;
        assert!((zero - 0.5).abs() < 0.01, "level 0 ratio {}", zero);
        assert!((one - 0.25).abs() < 0.01, "level 1 ratio {}", one);
        assert!((two - 0.125).abs() < 0.01, "level 2 ratio {}", two);

        let mean = histogram
            .iter()
            .enumerate()
            .map(|(level, n)| level * n)
            .sum::<usize>() as f64
            / samples as f64;
        assert!((mean - 1.0).abs() < 0.05, "mean height {}", mean);
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut a = Geometric::seeded(3);
        let mut b = Geometric::seeded(3);
        let left = (0..64).map(|_| a.random_level()).collect::<Vec<_>>();
        let right = (0..64).map(|_| b.random_level()).collect::<Vec<_>>();
        assert_eq!(left, right);
    }

    #[test]
    fn test_fixed_level() {
        let mut levels = FixedLevel(4);
        assert_eq!(levels.random_level(), 4);
        let mut boxed: Box<dyn LevelGenerator> = Box::new(FixedLevel(2));
        assert_eq!(boxed.random_level(), 2);
    }
}
