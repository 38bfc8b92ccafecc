// crates/vc_core/src/rng.rs
//
// Seedable RNG for synthetic electorates (voter blocs, random ballots).
// Tally engines never draw randomness; only generators in vc_spatial do.
//
// Seeding is explicit: the 64-bit seed goes little-endian into the first
// 8 bytes of the ChaCha20 seed, the remaining 24 bytes are zero. Same seed,
// same stream, on every platform.

use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

/// Deterministic generator for voter positions.
#[derive(Debug, Clone)]
pub struct VoterRng {
    rng: ChaCha20Rng,
    words_consumed: u128,
    /// Second Box-Muller deviate, returned by the next `next_gaussian` call.
    spare: Option<f64>,
}

impl VoterRng {
    #[inline]
    pub fn from_seed_u64(seed: u64) -> Self {
        let mut seed32 = [0u8; 32];
        seed32[..8].copy_from_slice(&seed.to_le_bytes());
        Self {
            rng: ChaCha20Rng::from_seed(seed32),
            words_consumed: 0,
            spare: None,
        }
    }

    /// Total number of 64-bit words drawn so far (saturating).
    #[inline]
    pub fn words_consumed(&self) -> u128 {
        self.words_consumed
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.words_consumed = self.words_consumed.saturating_add(1);
        self.rng.next_u64()
    }

    /// Uniform in `[0, 1)` with 53 bits of precision.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Standard normal deviate via the Box-Muller transform.
    pub fn next_gaussian(&mut self) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        // u1 in (0, 1] so ln(u1) is finite.
        let u1 = 1.0 - self.next_f64();
        let u2 = self.next_f64();
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * core::f64::consts::PI * u2;
        self.spare = Some(r * theta.sin());
        r * theta.cos()
    }

    /// Normal deviate with the given mean and standard deviation.
    #[inline]
    pub fn next_normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.next_gaussian()
    }
}

impl Default for VoterRng {
    fn default() -> Self {
        Self::from_seed_u64(0)
    }
}
