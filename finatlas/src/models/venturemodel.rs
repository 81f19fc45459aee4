use serde::{Deserialize, Serialize};

use super::traits::MonteCarloModel;
use crate::{
    cases::venturecase::{tilted_buckets, OutcomeBucket, VentureParameters, MAX_DEALS, WINNER_MULTIPLE},
    random::{seededstream::SeededStream, traits::RandomNumberGenerator},
    rates::interestrate::annualized_return,
    utils::errors::{AtlasError, Result},
};

pub const FUND_YEARS: f64 = 10.0;
pub const TVPI_TARGET: f64 = 3.0;
pub const IRR_TARGET: f64 = 0.25;
pub const HOME_RUN_MULTIPLE: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundGates {
    pub tvpi_ok: bool,
    pub irr_ok: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FundOutcome {
    pub run: u64,
    pub initial_per_deal: f64,
    pub reserve_pool: f64,
    pub invested_total: f64,
    pub returned_total: f64,
    pub tvpi: f64,
    pub irr: f64,
    pub multiples: Vec<f64>,
    pub winners: usize,
    pub hits_10x: usize,
    pub top_multiple: f64,
    pub gates: FundGates,
}

/// # VentureModel
/// Power-law fund simulation. Each deal draws an outcome bucket and then a
/// multiple inside it; the reserve pool follows on into every deal that
/// returned at least 2x, at that deal's multiple.
///
/// ## Example
/// ```
/// use finatlas::prelude::*;
/// let params = VentureParameters::default().with_deals(1).with_reserve_multiplier(0.0);
/// let outcome = VentureModel::new("1001", params).unwrap().simulate(0).unwrap();
/// assert_eq!(outcome.invested_total, 100.0);
/// assert_eq!(outcome.returned_total, 100.0 * outcome.multiples[0]);
/// ```
#[derive(Clone, Debug)]
pub struct VentureModel<'a> {
    seed: &'a str,
    params: VentureParameters,
    buckets: [OutcomeBucket; 5],
}

impl<'a> VentureModel<'a> {
    pub fn new(seed: &'a str, params: VentureParameters) -> Result<Self> {
        if !(params.fund_size.is_finite() && params.fund_size > 0.0) {
            return Err(AtlasError::InvalidValueErr(format!(
                "Fund size must be positive, got {}",
                params.fund_size
            )));
        }
        if !params.reserve_multiplier.is_finite() {
            return Err(AtlasError::InvalidValueErr(
                "Reserve multiplier must be finite".to_string(),
            ));
        }
        let deals = params.deals.clamp(1, MAX_DEALS);
        let reserve_multiplier = params.reserve_multiplier.max(0.0);
        if deals != params.deals || reserve_multiplier != params.reserve_multiplier {
            tracing::warn!(deals, reserve_multiplier, "venture parameters clamped");
        }
        let params = params
            .with_deals(deals)
            .with_reserve_multiplier(reserve_multiplier);
        Ok(Self {
            seed,
            params,
            buckets: tilted_buckets(params.skill_tilt),
        })
    }

    pub fn params(&self) -> &VentureParameters {
        &self.params
    }

    pub fn buckets(&self) -> &[OutcomeBucket; 5] {
        &self.buckets
    }

    fn draw_bucket(&self, draw: f64) -> &OutcomeBucket {
        let mut cumulative = 0.0;
        for bucket in &self.buckets {
            cumulative += bucket.probability;
            if draw <= cumulative {
                return bucket;
            }
        }
        // rounding can leave the cumulative sum a hair below one
        &self.buckets[self.buckets.len() - 1]
    }
}

impl<'a> MonteCarloModel for VentureModel<'a> {
    type Outcome = FundOutcome;

    fn simulate(&self, run: u64) -> Result<FundOutcome> {
        let params = &self.params;
        let mut stream = SeededStream::new(&params.stream_seed(self.seed, run));
        let initial_per_deal =
            params.fund_size / (params.deals as f64 * (1.0 + params.reserve_multiplier));
        let reserve_pool = params.fund_size - initial_per_deal * params.deals as f64;

        let mut invested_total = 0.0;
        let mut returned_total = 0.0;
        let mut multiples = Vec::with_capacity(params.deals);
        for _ in 0..params.deals {
            let bucket = self.draw_bucket(stream.gen_rand());
            let multiple = stream.gen_range(bucket.min_multiple, bucket.max_multiple, 3);
            invested_total += initial_per_deal;
            returned_total += initial_per_deal * multiple;
            multiples.push(multiple);
        }

        let winners: Vec<f64> = multiples
            .iter()
            .copied()
            .filter(|m| *m >= WINNER_MULTIPLE)
            .collect();
        if !winners.is_empty() && reserve_pool > 0.0 {
            let follow_on = reserve_pool / winners.len() as f64;
            invested_total += reserve_pool;
            for multiple in &winners {
                returned_total += follow_on * multiple;
            }
        }

        let tvpi = returned_total / invested_total;
        let irr = annualized_return(tvpi, FUND_YEARS);
        let hits_10x = multiples.iter().filter(|m| **m >= HOME_RUN_MULTIPLE).count();
        let top_multiple = multiples.iter().copied().fold(0.0, f64::max);
        tracing::debug!(run, tvpi, irr, "venture fund simulated");

        Ok(FundOutcome {
            run,
            initial_per_deal,
            reserve_pool,
            invested_total,
            returned_total,
            tvpi,
            irr,
            multiples,
            winners: winners.len(),
            hits_10x,
            top_multiple,
            gates: FundGates {
                tvpi_ok: tvpi >= TVPI_TARGET,
                irr_ok: irr >= IRR_TARGET,
            },
        })
    }
}
