use serde::{Deserialize, Serialize};

use super::traits::RandomNumberGenerator;

const FNV_OFFSET: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 16_777_619;
const ZERO_STATE_FALLBACK: u32 = 123_456_789;
const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// # SeededStream
/// Deterministic stream of uniform draws in `[0, 1)` seeded from a string.
///
/// The seed is folded with FNV-1a over its UTF-16 code units and the stream
/// advances with a 32-bit linear congruential step, so a given seed yields
/// the same sequence on every platform.
///
/// ## Example
/// ```
/// use finatlas::prelude::*;
/// let mut a = SeededStream::new("1001");
/// let mut b = SeededStream::new("1001");
/// assert_eq!(a.next_value(), b.next_value());
/// let x = a.gen_range(3000.0, 8000.0, 0);
/// assert_eq!(x, x.round());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededStream {
    state: u32,
}

impl SeededStream {
    pub fn new(seed: &str) -> SeededStream {
        SeededStream {
            state: Self::hash_seed(seed),
        }
    }

    pub fn hash_seed(seed: &str) -> u32 {
        let hash = seed.encode_utf16().fold(FNV_OFFSET, |h, unit| {
            (h ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
        });
        if hash == 0 {
            ZERO_STATE_FALLBACK
        } else {
            hash
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn next_value(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        f64::from(self.state) / TWO_POW_32
    }
}

impl RandomNumberGenerator for SeededStream {
    fn gen_rand(&mut self) -> f64 {
        self.next_value()
    }
}

impl Iterator for SeededStream {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_value())
    }
}
