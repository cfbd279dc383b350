//! Deterministic random number generation.
//!
//! RULE: Nothing in the core may call a platform RNG. All game
//! randomness (action rewards, crime outcomes, rob flips, invest
//! rolls, quest sampling, surge timing) flows through one GameRng
//! seeded when the engine is built, so identically seeded engines
//! replay identically.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

pub struct GameRng {
    inner: Pcg64Mcg,
}

impl GameRng {
    pub fn seed_from(seed: u64) -> Self {
        Self { inner: Pcg64Mcg::seed_from_u64(seed) }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Bernoulli trial: true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Roll an integer in [lo, hi] inclusive.
    pub fn range_i64(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(lo <= hi, "range_i64: lo must not exceed hi");
        use rand::RngCore;
        let span = (hi - lo + 1) as u64;
        lo + (self.inner.next_u64() % span) as i64
    }

    /// Uniform float in [lo, hi).
    pub fn fraction(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Pick one element uniformly.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "pick: empty slice");
        &items[self.range_i64(0, items.len() as i64 - 1) as usize]
    }

    /// Sample `n` distinct indices from [0, len) without replacement.
    /// Partial Fisher-Yates; order of the draw is preserved.
    pub fn sample_indices(&mut self, len: usize, n: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..len).collect();
        let take = n.min(len);
        let mut out = Vec::with_capacity(take);
        for _ in 0..take {
            let i = self.range_i64(0, pool.len() as i64 - 1) as usize;
            out.push(pool.swap_remove(i));
        }
        out
    }
}
