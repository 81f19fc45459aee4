use serde::{Deserialize, Serialize};

pub const TILT_STEP: f64 = 0.05;
pub const MAX_SKILL_TILT: f64 = 2.0;
pub const MIN_LOSS_PROBABILITY: f64 = 0.05;
pub const MAX_DEALS: usize = 60;
pub const WINNER_MULTIPLE: f64 = 2.0;

/// # OutcomeBucket
/// One band of the power-law outcome distribution: a probability and the
/// `[min, max)` range of multiples drawn uniformly inside it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutcomeBucket {
    pub probability: f64,
    pub min_multiple: f64,
    pub max_multiple: f64,
}

impl OutcomeBucket {
    const fn new(probability: f64, min_multiple: f64, max_multiple: f64) -> OutcomeBucket {
        OutcomeBucket {
            probability,
            min_multiple,
            max_multiple,
        }
    }
}

pub const BASE_BUCKETS: [OutcomeBucket; 5] = [
    OutcomeBucket::new(0.55, 0.0, 0.2),
    OutcomeBucket::new(0.25, 0.5, 1.5),
    OutcomeBucket::new(0.15, 2.0, 5.0),
    OutcomeBucket::new(0.045, 5.0, 20.0),
    OutcomeBucket::new(0.005, 20.0, 100.0),
];

/// Outcome buckets after applying a manager skill tilt.
///
/// A positive tilt moves `0.05` of probability per unit from the write-off
/// bucket into the three winning buckets, in proportion to their weights;
/// a negative tilt moves it back. The write-off bucket never drops below
/// `0.05` and the result always sums to one.
///
/// ## Example
/// ```
/// use finatlas::prelude::*;
/// let buckets = tilted_buckets(1.0);
/// let total: f64 = buckets.iter().map(|b| b.probability).sum();
/// assert!((total - 1.0).abs() < 1e-12);
/// assert!(buckets[0].probability < BASE_BUCKETS[0].probability);
/// ```
pub fn tilted_buckets(skill_tilt: f64) -> [OutcomeBucket; 5] {
    let tilt = if skill_tilt.is_finite() {
        skill_tilt.clamp(-MAX_SKILL_TILT, MAX_SKILL_TILT)
    } else {
        0.0
    };
    let shift = tilt * TILT_STEP;
    let mut buckets = BASE_BUCKETS;
    if shift != 0.0 {
        let take = (buckets[0].probability - MIN_LOSS_PROBABILITY)
            .max(0.0)
            .min(shift.abs());
        let moved = take * shift.signum();
        buckets[0].probability -= moved;
        let denom: f64 = buckets[2..].iter().map(|b| b.probability).sum();
        for bucket in buckets[2..].iter_mut() {
            bucket.probability += bucket.probability / denom * moved;
        }
    }
    let total: f64 = buckets.iter().map(|b| b.probability).sum();
    for bucket in buckets.iter_mut() {
        bucket.probability /= total;
    }
    buckets
}

/// # VentureParameters
/// Fund construction inputs of the power-law simulator. There is no stored
/// case: every simulation is seeded from these values and a run counter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VentureParameters {
    pub fund_size: f64,
    pub deals: usize,
    pub reserve_multiplier: f64,
    pub skill_tilt: f64,
}

impl Default for VentureParameters {
    fn default() -> Self {
        VentureParameters {
            fund_size: 100.0,
            deals: 25,
            reserve_multiplier: 1.5,
            skill_tilt: 0.0,
        }
    }
}

impl VentureParameters {
    pub fn with_fund_size(mut self, fund_size: f64) -> Self {
        self.fund_size = fund_size;
        self
    }

    pub fn with_deals(mut self, deals: usize) -> Self {
        self.deals = deals;
        self
    }

    pub fn with_reserve_multiplier(mut self, reserve_multiplier: f64) -> Self {
        self.reserve_multiplier = reserve_multiplier;
        self
    }

    pub fn with_skill_tilt(mut self, skill_tilt: f64) -> Self {
        self.skill_tilt = skill_tilt;
        self
    }

    /// Stream seed for one run: the case id, run counter and every fund
    /// input are folded in, so changing any of them reshuffles the deals.
    ///
    /// ## Example
    /// ```
    /// use finatlas::prelude::*;
    /// let params = VentureParameters::default();
    /// assert_eq!(params.stream_seed("1001", 0), "VC1001:0:100:25:1.5:0");
    /// ```
    pub fn stream_seed(&self, seed: &str, run: u64) -> String {
        format!(
            "VC{}:{}:{}:{}:{}:{}",
            seed,
            run,
            seed_component(self.fund_size.round()),
            self.deals,
            seed_component(self.reserve_multiplier),
            seed_component(self.skill_tilt)
        )
    }
}

// -0.0 and 0.0 must seed identically
fn seed_component(x: f64) -> String {
    if x == 0.0 {
        "0".to_string()
    } else {
        x.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(buckets: &[OutcomeBucket]) -> f64 {
        buckets.iter().map(|b| b.probability).sum()
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let mut tilt = -2.0;
        while tilt <= 2.0 + 1e-9 {
            let buckets = tilted_buckets(tilt);
            assert!((total(&buckets) - 1.0).abs() < 1e-12, "tilt {}", tilt);
            assert!(buckets.iter().all(|b| b.probability >= 0.0));
            tilt += 0.1;
        }
    }

    #[test]
    fn test_zero_tilt_is_base() {
        let buckets = tilted_buckets(0.0);
        for (b, base) in buckets.iter().zip(BASE_BUCKETS.iter()) {
            assert!((b.probability - base.probability).abs() < 1e-15);
        }
    }

    #[test]
    fn test_positive_tilt_moves_mass_to_winners() {
        let buckets = tilted_buckets(2.0);
        assert!((buckets[0].probability - 0.45).abs() < 1e-12);
        assert!((buckets[1].probability - 0.25).abs() < 1e-12);
        // winners keep their relative weights
        let ratio = buckets[3].probability / buckets[2].probability;
        assert!((ratio - 0.045 / 0.15).abs() < 1e-12);
        assert!((buckets[2].probability + buckets[3].probability + buckets[4].probability - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_negative_tilt_moves_mass_to_losses() {
        let buckets = tilted_buckets(-1.0);
        assert!((buckets[0].probability - 0.6).abs() < 1e-12);
        assert!(buckets[4].probability < BASE_BUCKETS[4].probability);
    }

    #[test]
    fn test_tilt_is_clamped() {
        assert_eq!(tilted_buckets(7.5), tilted_buckets(2.0));
        assert_eq!(tilted_buckets(f64::NAN), tilted_buckets(0.0));
    }

    #[test]
    fn test_stream_seed_formatting() {
        let params = VentureParameters::default()
            .with_fund_size(250.4)
            .with_deals(40)
            .with_reserve_multiplier(0.0)
            .with_skill_tilt(-0.0);
        assert_eq!(params.stream_seed("x", 3), "VCx:3:250:40:0:0");
        let tilted = params.with_skill_tilt(1.2);
        assert_eq!(tilted.stream_seed("x", 3), "VCx:3:250:40:0:1.2");
    }
}
