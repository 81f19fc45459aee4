use std::{fs, path::Path};

use finatlas::prelude::{RiskLimits, VentureParameters, GUESS_TOLERANCE};
use serde::{Deserialize, Serialize};

use crate::utils::errors::{Result, SimulatorError};

pub const DEFAULT_SWEEP_RUNS: usize = 1000;
pub const MAX_SWEEP_RUNS: usize = 100_000;

/// # SimulatorConfig
/// Presentation and default settings, read from an optional JSON file.
/// Missing keys keep their defaults.
///
/// ## Example
/// ```
/// use simulator::prelude::*;
/// let config = SimulatorConfig::from_json(r#"{ "currency_symbol": "$", "sweep_runs": 250 }"#).unwrap();
/// assert_eq!(config.currency_symbol, "$");
/// assert_eq!(config.sweep_runs, 250);
/// assert_eq!(config.guess_tolerance, 0.05);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub currency_symbol: String,
    pub guess_tolerance: f64,
    pub risk_limits: RiskLimits,
    pub venture: VentureParameters,
    pub sweep_runs: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            currency_symbol: "£".to_string(),
            guess_tolerance: GUESS_TOLERANCE,
            risk_limits: RiskLimits::default(),
            venture: VentureParameters::default(),
            sweep_runs: DEFAULT_SWEEP_RUNS,
        }
    }
}

impl SimulatorConfig {
    pub fn from_json(json: &str) -> Result<SimulatorConfig> {
        let config: SimulatorConfig = serde_json::from_str(json)?;
        config.validate()
    }

    pub fn from_path(path: &Path) -> Result<SimulatorConfig> {
        let json = fs::read_to_string(path)?;
        let config = SimulatorConfig::from_json(&json)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    fn validate(self) -> Result<SimulatorConfig> {
        if !(self.guess_tolerance.is_finite() && self.guess_tolerance >= 0.0) {
            return Err(SimulatorError::ConfigError(format!(
                "guess_tolerance must be a non-negative number, got {}",
                self.guess_tolerance
            )));
        }
        if self.sweep_runs == 0 || self.sweep_runs > MAX_SWEEP_RUNS {
            return Err(SimulatorError::ConfigError(format!(
                "sweep_runs must lie in 1..={}, got {}",
                MAX_SWEEP_RUNS, self.sweep_runs
            )));
        }
        if !(self.venture.fund_size.is_finite() && self.venture.fund_size > 0.0) {
            return Err(SimulatorError::ConfigError(
                "venture.fund_size must be positive".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(
            SimulatorConfig::from_json("{}").unwrap(),
            SimulatorConfig::default()
        );
    }

    #[test]
    fn test_nested_sections() {
        let json = r#"{
            "risk_limits": { "max_gross": 150.0, "max_abs_net": 10.0, "min_sharpe": 1.0 },
            "venture": { "fund_size": 250.0, "deals": 40, "reserve_multiplier": 1.0, "skill_tilt": 0.5 }
        }"#;
        let config = SimulatorConfig::from_json(json).unwrap();
        assert_eq!(config.risk_limits.max_gross, 150.0);
        assert_eq!(config.venture.deals, 40);
        assert_eq!(config.currency_symbol, "£");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            SimulatorConfig::from_json(r#"{ "sweep_runs": 0 }"#),
            Err(SimulatorError::ConfigError(_))
        ));
        assert!(matches!(
            SimulatorConfig::from_json(r#"{ "guess_tolerance": -0.1 }"#),
            Err(SimulatorError::ConfigError(_))
        ));
        assert!(matches!(
            SimulatorConfig::from_json("not json"),
            Err(SimulatorError::SerializationError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = SimulatorConfig::from_path(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(SimulatorError::IoError(_))));
    }
}
