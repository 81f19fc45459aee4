use serde::{Deserialize, Serialize};

use super::traits::DeterministicModel;
use crate::{
    cases::hedgefundcase::HedgeFundUniverse,
    utils::errors::{AtlasError, Result},
};

pub const MAX_WEIGHT: f64 = 100.0;

/// # RiskLimits
/// Book-level gates, with exposures in percent of capital.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskLimits {
    pub max_gross: f64,
    pub max_abs_net: f64,
    pub min_sharpe: f64,
}

impl Default for RiskLimits {
    fn default() -> Self {
        RiskLimits {
            max_gross: 200.0,
            max_abs_net: 20.0,
            min_sharpe: 0.8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskGates {
    pub gross_ok: bool,
    pub net_ok: bool,
    pub sharpe_ok: bool,
}

impl RiskGates {
    pub fn all_pass(&self) -> bool {
        self.gross_ok && self.net_ok && self.sharpe_ok
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRisk {
    pub weights: Vec<f64>,
    pub gross: f64,
    pub net: f64,
    pub expected_return: f64,
    pub volatility: f64,
    pub sharpe: f64,
    pub gates: RiskGates,
}

/// # PortfolioModel
/// Long/short book over a [`HedgeFundUniverse`]. Weights are percentages in
/// `[-100, 100]`; positions are treated as uncorrelated.
///
/// ## Example
/// ```
/// use finatlas::prelude::*;
/// let universe = HedgeFundUniverse::generate("1001");
/// let flat = PortfolioModel::new(&universe).evaluate().unwrap();
/// assert_eq!(flat.gross, 0.0);
/// assert_eq!(flat.sharpe, 0.0);
///
/// let book = PortfolioModel::new(&universe)
///     .with_weights(vec![50.0, -50.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
///     .unwrap()
///     .evaluate()
///     .unwrap();
/// assert_eq!(book.gross, 100.0);
/// assert_eq!(book.net, 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct PortfolioModel<'a> {
    universe: &'a HedgeFundUniverse,
    weights: Vec<f64>,
    limits: RiskLimits,
}

impl<'a> PortfolioModel<'a> {
    /// A flat book: every weight zero.
    pub fn new(universe: &'a HedgeFundUniverse) -> Self {
        Self {
            universe,
            weights: vec![0.0; universe.len()],
            limits: RiskLimits::default(),
        }
    }

    pub fn with_weights(mut self, weights: Vec<f64>) -> Result<Self> {
        if weights.len() != self.universe.len() {
            return Err(AtlasError::InvalidValueErr(format!(
                "Expected {} weights, got {}",
                self.universe.len(),
                weights.len()
            )));
        }
        self.weights = weights.into_iter().map(clamp_weight).collect();
        Ok(self)
    }

    pub fn with_limits(mut self, limits: RiskLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

/// Clamps a weight to `[-100, 100]`; a NaN weight counts as flat.
pub fn clamp_weight(weight: f64) -> f64 {
    if weight.is_nan() {
        tracing::warn!("NaN weight treated as zero");
        return 0.0;
    }
    let clamped = weight.clamp(-MAX_WEIGHT, MAX_WEIGHT);
    if clamped != weight {
        tracing::warn!(weight, clamped, "weight clamped");
    }
    clamped
}

impl<'a> DeterministicModel for PortfolioModel<'a> {
    type Output = PortfolioRisk;

    fn evaluate(&self) -> Result<PortfolioRisk> {
        let instruments = self.universe.instruments();
        let gross = self.weights.iter().fold(0.0, |acc, w| acc + w.abs());
        let net = self.weights.iter().fold(0.0, |acc, w| acc + w);
        let expected_return = self
            .weights
            .iter()
            .zip(instruments)
            .fold(0.0, |acc, (w, i)| acc + w / 100.0 * i.mu);
        let variance = self
            .weights
            .iter()
            .zip(instruments)
            .fold(0.0, |acc, (w, i)| acc + (w / 100.0 * i.sigma).powi(2));
        let volatility = variance.sqrt();
        let sharpe = if volatility > 0.0 {
            expected_return / volatility
        } else {
            0.0
        };

        let gates = RiskGates {
            gross_ok: gross <= self.limits.max_gross,
            net_ok: net.abs() <= self.limits.max_abs_net,
            sharpe_ok: sharpe >= self.limits.min_sharpe,
        };
        tracing::debug!(gross, net, sharpe, "portfolio evaluated");

        Ok(PortfolioRisk {
            weights: self.weights.clone(),
            gross,
            net,
            expected_return,
            volatility,
            sharpe,
            gates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::{hedgefundcase::Instrument, traits::CaseGenerator};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn two_names() -> HedgeFundUniverse {
        HedgeFundUniverse::new(vec![
            Instrument {
                ticker: "LONG".to_string(),
                mu: 0.12,
                sigma: 0.3,
            },
            Instrument {
                ticker: "SHRT".to_string(),
                mu: -0.04,
                sigma: 0.4,
            },
        ])
    }

    #[test]
    fn test_hand_computed_book() {
        let universe = two_names();
        let risk = PortfolioModel::new(&universe)
            .with_weights(vec![60.0, -40.0])
            .unwrap()
            .evaluate()
            .unwrap();
        assert_eq!(risk.gross, 100.0);
        assert_eq!(risk.net, 20.0);
        // 0.6 * 0.12 + 0.4 * 0.04
        assert!((risk.expected_return - 0.088).abs() < 1e-12);
        // sqrt(0.18^2 + 0.16^2)
        assert!((risk.volatility - (0.0324f64 + 0.0256).sqrt()).abs() < 1e-12);
        assert!((risk.sharpe - 0.088 / risk.volatility).abs() < 1e-12);
        assert!(risk.gates.gross_ok);
        assert!(risk.gates.net_ok);
        assert!(!risk.gates.sharpe_ok);
    }

    #[test]
    fn test_exposures_are_exact_sums() {
        let universe = HedgeFundUniverse::generate("1001");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let weights: Vec<f64> = (0..universe.len())
                .map(|_| rng.gen_range(-100..=100) as f64)
                .collect();
            let risk = PortfolioModel::new(&universe)
                .with_weights(weights.clone())
                .unwrap()
                .evaluate()
                .unwrap();
            assert_eq!(risk.gross, weights.iter().map(|w| w.abs()).sum::<f64>());
            assert_eq!(risk.net, weights.iter().sum::<f64>());
            assert!(risk.sharpe.is_finite());
        }
    }

    #[test]
    fn test_flat_book_has_zero_sharpe() {
        let universe = HedgeFundUniverse::generate("x");
        let risk = PortfolioModel::new(&universe).evaluate().unwrap();
        assert_eq!(risk.volatility, 0.0);
        assert_eq!(risk.sharpe, 0.0);
        assert!(!risk.sharpe.is_nan());
        assert!(!risk.gates.sharpe_ok);
    }

    #[test]
    fn test_weights_are_clamped() {
        let universe = two_names();
        let model = PortfolioModel::new(&universe)
            .with_weights(vec![250.0, f64::NAN])
            .unwrap();
        assert_eq!(model.weights(), &[100.0, 0.0]);
    }

    #[test]
    fn test_weight_count_must_match() {
        let universe = two_names();
        assert!(PortfolioModel::new(&universe)
            .with_weights(vec![10.0])
            .is_err());
    }

    #[test]
    fn test_gross_limit() {
        let universe = HedgeFundUniverse::generate("limits");
        let risk = PortfolioModel::new(&universe)
            .with_weights(vec![100.0, -100.0, 10.0, 0.0, 0.0, 0.0, 0.0, 0.0])
            .unwrap()
            .evaluate()
            .unwrap();
        assert_eq!(risk.gross, 210.0);
        assert!(!risk.gates.gross_ok);
        assert!(risk.gates.net_ok);

        let relaxed = RiskLimits {
            max_gross: 250.0,
            ..RiskLimits::default()
        };
        let risk = PortfolioModel::new(&universe)
            .with_limits(relaxed)
            .with_weights(vec![100.0, -100.0, 10.0, 0.0, 0.0, 0.0, 0.0, 0.0])
            .unwrap()
            .evaluate()
            .unwrap();
        assert!(risk.gates.gross_ok);
    }
}
