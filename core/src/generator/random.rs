use rand::prelude::*;

use super::*;

/// Uniform random colors from a seeded generator, reproducible for a given seed.
#[derive(Clone, Debug)]
pub struct RandomColors {
    seed: u64,
    rng: SmallRng,
}

impl RandomColors {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl ColorSource for RandomColors {
    fn next_color(&mut self, color_count: usize) -> ColorIndex {
        let color_count = color_count.clamp(1, EngineConfig::MAX_COLORS);
        self.rng.random_range(0..color_count) as ColorIndex
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn same_seed_same_colors() {
        let mut a = RandomColors::new(7);
        let mut b = RandomColors::new(7);

        let from_a: Vec<_> = (0..32).map(|_| a.next_color(6)).collect();
        let from_b: Vec<_> = (0..32).map(|_| b.next_color(6)).collect();

        assert_eq!(from_a, from_b);
    }

    #[test]
    fn colors_stay_in_range_and_cover_palette() {
        let mut colors = RandomColors::new(1234);
        let mut seen = [false; 6];

        for _ in 0..600 {
            let color = colors.next_color(6);
            assert!(usize::from(color) < 6);
            seen[usize::from(color)] = true;
        }

        assert!(seen.iter().all(|&hit| hit));
    }
}
