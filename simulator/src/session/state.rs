use std::{fmt, str::FromStr};

use finatlas::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::errors::{Result, SimulatorError};

pub const LBO_DEBT_RANGE: (f64, f64) = (0.4, 0.8);
pub const LBO_EXIT_SPREAD: f64 = 2.0;
pub const LBO_GROWTH_RANGE: (f64, f64) = (0.03, 0.12);
pub const LBO_CAPEX_RANGE: (f64, f64) = (0.15, 0.4);
pub const VC_DEALS_RANGE: (usize, usize) = (5, MAX_DEALS);
pub const VC_RESERVE_RANGE: (f64, f64) = (0.0, 2.5);
pub const VC_TILT_RANGE: (f64, f64) = (-MAX_SKILL_TILT, MAX_SKILL_TILT);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Module {
    Dcf,
    Lbo,
    Merger,
    HedgeFund,
    Venture,
}

impl Module {
    pub const ALL: [Module; 5] = [
        Module::Dcf,
        Module::Lbo,
        Module::Merger,
        Module::HedgeFund,
        Module::Venture,
    ];
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Module::Dcf => "DCF",
            Module::Lbo => "LBO",
            Module::Merger => "M&A",
            Module::HedgeFund => "HF",
            Module::Venture => "VC",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Module {
    type Err = SimulatorError;

    fn from_str(s: &str) -> Result<Module> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dcf" => Ok(Module::Dcf),
            "lbo" => Ok(Module::Lbo),
            "mna" | "m&a" | "merger" => Ok(Module::Merger),
            "hf" | "hedgefund" => Ok(Module::HedgeFund),
            "vc" | "venture" => Ok(Module::Venture),
            other => Err(SimulatorError::InvalidInput(format!(
                "unknown module {}",
                other
            ))),
        }
    }
}

fn clamp_to(value: f64, (min, max): (f64, f64)) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.clamp(min, max)
}

/// # SessionState
/// Everything a user has chosen in the current session. Transitions consume
/// the state and return the next one; the generated case lives separately in
/// the [`CaseCache`](super::cache::CaseCache).
///
/// Switching module or seed starts the inputs over, the way a freshly opened
/// exercise does.
///
/// ## Example
/// ```
/// use finatlas::prelude::*;
/// use simulator::prelude::*;
/// let state = SessionState::new("1001", VentureParameters::default())
///     .with_module(Module::Lbo)
///     .with_lbo_debt(0.95);
/// assert_eq!(state.lbo().debt_pct, Some(0.8));
/// let next = state.clone().with_seed("1002");
/// assert_eq!(next.lbo().debt_pct, None);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    seed: String,
    module: Module,
    guess: Option<String>,
    lbo: LboAssumptions,
    merger: MergerAssumptions,
    weights: Vec<f64>,
    venture_defaults: VentureParameters,
    venture: VentureParameters,
    run: u64,
}

impl SessionState {
    pub fn new(seed: &str, venture_defaults: VentureParameters) -> SessionState {
        let venture_defaults =
            venture_defaults.with_deals(venture_defaults.deals.clamp(VC_DEALS_RANGE.0, VC_DEALS_RANGE.1));
        SessionState {
            seed: seed.to_string(),
            module: Module::Dcf,
            guess: None,
            lbo: LboAssumptions::default(),
            merger: MergerAssumptions::default(),
            weights: vec![0.0; TICKERS.len()],
            venture_defaults,
            venture: venture_defaults,
            run: 0,
        }
    }

    fn reset_inputs(mut self) -> SessionState {
        self.guess = None;
        self.lbo = LboAssumptions::default();
        self.merger = MergerAssumptions::default();
        self.weights = vec![0.0; TICKERS.len()];
        self.venture = self.venture_defaults;
        self.run = 0;
        self
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn module(&self) -> Module {
        self.module
    }

    pub fn guess(&self) -> Option<&str> {
        self.guess.as_deref()
    }

    pub fn lbo(&self) -> &LboAssumptions {
        &self.lbo
    }

    pub fn merger(&self) -> &MergerAssumptions {
        &self.merger
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn venture(&self) -> &VentureParameters {
        &self.venture
    }

    pub fn run(&self) -> u64 {
        self.run
    }

    pub fn with_seed(self, seed: &str) -> SessionState {
        if seed == self.seed {
            return self;
        }
        let mut next = self.reset_inputs();
        next.seed = seed.to_string();
        next
    }

    pub fn with_module(self, module: Module) -> SessionState {
        if module == self.module {
            return self;
        }
        let mut next = self.reset_inputs();
        next.module = module;
        next
    }

    pub fn with_guess(mut self, text: &str) -> SessionState {
        self.guess = Some(text.to_string());
        self
    }

    pub fn with_lbo_debt(mut self, debt_pct: f64) -> SessionState {
        self.lbo = self.lbo.with_debt_pct(clamp_to(debt_pct, LBO_DEBT_RANGE));
        self
    }

    /// The exit multiple moves within two turns of the case's entry multiple.
    pub fn with_lbo_exit(mut self, exit_multiple: f64, entry_multiple: f64) -> SessionState {
        let range = (
            (entry_multiple - LBO_EXIT_SPREAD).max(0.0),
            entry_multiple + LBO_EXIT_SPREAD,
        );
        self.lbo = self.lbo.with_exit_multiple(clamp_to(exit_multiple, range));
        self
    }

    pub fn with_lbo_growth(mut self, growth: f64) -> SessionState {
        self.lbo = self.lbo.with_growth(clamp_to(growth, LBO_GROWTH_RANGE));
        self
    }

    pub fn with_lbo_capex(mut self, capex_pct_ebitda: f64) -> SessionState {
        self.lbo = self
            .lbo
            .with_capex_pct_ebitda(clamp_to(capex_pct_ebitda, LBO_CAPEX_RANGE));
        self
    }

    /// Stock may use whatever debt leaves of the price.
    pub fn with_stock(mut self, stock_pct: f64) -> SessionState {
        let max = 1.0 - self.merger.debt_pct;
        self.merger = self.merger.with_stock_pct(clamp_to(stock_pct, (0.0, max)));
        self
    }

    /// Debt may use whatever stock leaves of the price.
    pub fn with_merger_debt(mut self, debt_pct: f64) -> SessionState {
        let max = 1.0 - self.merger.stock_pct;
        self.merger = self.merger.with_debt_pct(clamp_to(debt_pct, (0.0, max)));
        self
    }

    pub fn with_synergy(mut self, synergy: f64) -> SessionState {
        self.merger = self.merger.with_synergy(synergy);
        self
    }

    pub fn with_weight(mut self, index: usize, weight: f64) -> Result<SessionState> {
        let slot = self.weights.get_mut(index).ok_or_else(|| {
            SimulatorError::InvalidInput(format!("no instrument at position {}", index + 1))
        })?;
        *slot = clamp_weight(weight);
        Ok(self)
    }

    pub fn with_fund_size(mut self, fund_size: f64) -> Result<SessionState> {
        if !fund_size.is_finite() || fund_size <= 0.0 {
            return Err(SimulatorError::InvalidInput(format!(
                "fund size must be positive, got {}",
                fund_size
            )));
        }
        self.venture = self.venture.with_fund_size(fund_size);
        Ok(self)
    }

    pub fn with_deals(mut self, deals: usize) -> SessionState {
        self.venture = self
            .venture
            .with_deals(deals.clamp(VC_DEALS_RANGE.0, VC_DEALS_RANGE.1));
        self
    }

    pub fn with_reserve(mut self, reserve_multiplier: f64) -> SessionState {
        self.venture = self
            .venture
            .with_reserve_multiplier(clamp_to(reserve_multiplier, VC_RESERVE_RANGE));
        self
    }

    pub fn with_tilt(mut self, skill_tilt: f64) -> SessionState {
        self.venture = self
            .venture
            .with_skill_tilt(clamp_to(skill_tilt, VC_TILT_RANGE));
        self
    }

    pub fn with_next_run(mut self) -> SessionState {
        self.run += 1;
        self
    }
}
