/// Supplies uniform indices for the draw and the palette's starting offset.
pub trait RandomSource {
    /// Uniform index in `0..len`. Callers never pass `len == 0`; implementations return 0 if they do.
    fn next_index(&mut self, len: usize) -> usize;
}

impl<G: RandomSource + ?Sized> RandomSource for Box<G> {
    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

/// SplitMix64 generator. Same seed, same draws.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        // Top 53 bits as a float in [0, 1), the same shape as Math.random.
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        ((unit * len as f64) as usize).min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        let xs: Vec<usize> = (0..32).map(|_| a.next_index(1000)).collect();
        let ys: Vec<usize> = (0..32).map(|_| b.next_index(1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededRandom::new(1);
        let mut b = SeededRandom::new(2);
        let xs: Vec<usize> = (0..16).map(|_| a.next_index(1 << 20)).collect();
        let ys: Vec<usize> = (0..16).map(|_| b.next_index(1 << 20)).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn indices_stay_in_range() {
        let mut rng = SeededRandom::new(9);
        for len in 1..20 {
            for _ in 0..200 {
                assert!(rng.next_index(len) < len);
            }
        }
        assert_eq!(rng.next_index(0), 0);
    }

    #[test]
    fn boxed_source_delegates() {
        let mut boxed: Box<dyn RandomSource> = Box::new(SeededRandom::new(5));
        let mut plain = SeededRandom::new(5);
        assert_eq!(boxed.next_index(10), plain.next_index(10));
    }
}
