use crate::math::rounding::round_to;

/// # RandomNumberGenerator
/// Source of uniform draws in `[0, 1)` with the helpers the case
/// generators build on.
pub trait RandomNumberGenerator {
    fn gen_rand(&mut self) -> f64;

    /// Uniform draw in `[min, max)` rounded to `decimals` places.
    fn gen_range(&mut self, min: f64, max: f64, decimals: u32) -> f64 {
        let value = min + (max - min) * self.gen_rand();
        round_to(value, decimals)
    }

    fn gen_index(&mut self, len: usize) -> usize {
        let index = (self.gen_rand() * len as f64).floor() as usize;
        index.min(len.saturating_sub(1))
    }

    fn pick<'p, T>(&mut self, pool: &'p [T]) -> &'p T {
        &pool[self.gen_index(pool.len())]
    }
}
