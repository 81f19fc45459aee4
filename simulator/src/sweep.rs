use finatlas::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Distribution, Max, Median, Min, OrderStatistics};

use crate::{
    config::MAX_SWEEP_RUNS,
    utils::errors::{Result, SimulatorError},
};

/// Distribution of fund outcomes over many consecutive runs of one
/// venture configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub runs: usize,
    pub tvpi_mean: f64,
    pub tvpi_std_dev: f64,
    pub tvpi_median: f64,
    pub tvpi_p10: f64,
    pub tvpi_p90: f64,
    pub tvpi_min: f64,
    pub tvpi_max: f64,
    pub irr_mean: f64,
    pub tvpi_pass_rate: f64,
    pub irr_pass_rate: f64,
}

/// Simulates runs `0..runs` and summarises TVPI and IRR.
///
/// ## Example
/// ```
/// use simulator::prelude::*;
/// use finatlas::prelude::VentureParameters;
/// let summary = sweep("1001", VentureParameters::default(), 200).unwrap();
/// assert_eq!(summary.runs, 200);
/// assert!(summary.tvpi_min <= summary.tvpi_median && summary.tvpi_median <= summary.tvpi_max);
/// ```
pub fn sweep(seed: &str, params: VentureParameters, runs: usize) -> Result<SweepSummary> {
    if runs == 0 || runs > MAX_SWEEP_RUNS {
        return Err(SimulatorError::InvalidInput(format!(
            "runs must lie in 1..={}, got {}",
            MAX_SWEEP_RUNS, runs
        )));
    }
    let model = VentureModel::new(seed, params)?;
    let outcomes = model.simulate_runs(0, runs)?;

    let tvpi_passes = outcomes.iter().filter(|o| o.gates.tvpi_ok).count();
    let irr_passes = outcomes.iter().filter(|o| o.gates.irr_ok).count();
    let irr = Data::new(outcomes.iter().map(|o| o.irr).collect::<Vec<f64>>());
    let mut tvpi = Data::new(outcomes.iter().map(|o| o.tvpi).collect::<Vec<f64>>());
    tracing::debug!(runs, tvpi_passes, irr_passes, "venture sweep finished");

    Ok(SweepSummary {
        runs,
        tvpi_mean: tvpi.mean().unwrap_or(f64::NAN),
        tvpi_std_dev: tvpi.std_dev().unwrap_or(0.0),
        tvpi_median: tvpi.median(),
        tvpi_p10: tvpi.percentile(10),
        tvpi_p90: tvpi.percentile(90),
        tvpi_min: tvpi.min(),
        tvpi_max: tvpi.max(),
        irr_mean: irr.mean().unwrap_or(f64::NAN),
        tvpi_pass_rate: tvpi_passes as f64 / runs as f64,
        irr_pass_rate: irr_passes as f64 / runs as f64,
    })
}
