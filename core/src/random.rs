use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Where generators get their randomness from at construction time.
// Implemented for every rand RNG, but callers may plug in their own.
pub trait RandomSource {
    // Uniform draw in [0, 1)
    fn uniform(&mut self) -> f64;

    // Uniformly random permutation of 0..n
    fn permutation(&mut self, n: usize) -> Vec<usize>;
}

impl<R: RngCore> RandomSource for R {
    fn uniform(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut p: Vec<usize> = (0..n).collect();
        p.shuffle(self);
        p
    }
}

// Deterministic source for a given seed. ChaCha8 is pinned so tables stay
// the same across platforms and rand releases.
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
