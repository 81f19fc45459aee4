pub mod cache;
pub mod command;
pub mod state;

use finatlas::prelude::*;

use self::{
    cache::{CaseCache, ModuleCase},
    command::{Command, Lever, HELP},
    state::{Module, SessionState},
};
use crate::{
    config::SimulatorConfig,
    display::{format::NumberFormat, report},
    input::parsing::GuessFeedback,
    utils::errors::{Result, SimulatorError},
};

/// Offsets around the case rates used by the DCF sensitivity grid.
pub const SENSITIVITY_STEPS: [f64; 5] = [-0.01, -0.005, 0.0, 0.005, 0.01];

/// # Session
/// Drives one interactive session: applies commands to the
/// [`SessionState`], looks the case up in the [`CaseCache`] and renders the
/// recomputed output. Every engine call works on a fresh snapshot.
///
/// ## Example
/// ```
/// use simulator::prelude::*;
/// let mut session = Session::new("1001", SimulatorConfig::default());
/// session.execute(Command::Module(Module::Lbo)).unwrap();
/// let view = session.execute(Command::Set(Lever::Debt, 0.5)).unwrap();
/// assert!(view.contains("MOIC"));
/// assert_eq!(session.cache().generations(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    state: SessionState,
    cache: CaseCache,
    config: SimulatorConfig,
    format: NumberFormat,
}

impl Session {
    pub fn new(seed: &str, config: SimulatorConfig) -> Session {
        Session {
            state: SessionState::new(seed, config.venture),
            cache: CaseCache::default(),
            format: NumberFormat::new(&config.currency_symbol),
            config,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn cache(&self) -> &CaseCache {
        &self.cache
    }

    /// Applies a command and returns the text to show. `Quit` is left to
    /// the caller and renders nothing. A command that fails leaves the state
    /// as it was.
    pub fn execute(&mut self, command: Command) -> Result<String> {
        tracing::debug!(?command, module = %self.state.module(), "executing");
        let previous = self.state.clone();
        let result = self.apply(command);
        if let Err(e) = &result {
            tracing::debug!(error = %e, "command rejected");
            self.state = previous;
        }
        result
    }

    fn apply(&mut self, command: Command) -> Result<String> {
        match command {
            Command::Seed(seed) => self.transition(|s| Ok(s.with_seed(&seed)))?,
            Command::Module(module) => self.transition(|s| Ok(s.with_module(module)))?,
            Command::Show => {}
            Command::Guess(text) => {
                self.require(Module::Dcf, "guess")?;
                self.transition(|s| Ok(s.with_guess(&text)))?;
                return self.guess_feedback();
            }
            Command::Solution => {
                self.require(Module::Dcf, "solution")?;
                let case = self.dcf_case()?;
                let valuation = DcfModel::new(&case).evaluate()?;
                return Ok(report::dcf_solution(&valuation, &self.format));
            }
            Command::Sensitivity => {
                self.require(Module::Dcf, "sensitivity")?;
                return self.sensitivity();
            }
            Command::Set(lever, value) => self.set_lever(lever, value)?,
            Command::Weight(target, value) => {
                self.require(Module::HedgeFund, "weight")?;
                let index = self.ticker_index(&target)?;
                self.transition(|s| s.with_weight(index, value))?;
            }
            Command::Deals(deals) => {
                self.require(Module::Venture, "deals")?;
                self.transition(|s| Ok(s.with_deals(deals)))?;
            }
            Command::Run => {
                self.require(Module::Venture, "run")?;
                self.transition(|s| Ok(s.with_next_run()))?;
            }
            Command::Help => return Ok(HELP.to_string()),
            Command::Quit => return Ok(String::new()),
        }
        self.view()
    }

    fn transition<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(SessionState) -> Result<SessionState>,
    {
        self.state = f(self.state.clone())?;
        Ok(())
    }

    fn require(&self, module: Module, command: &str) -> Result<()> {
        if self.state.module() == module {
            Ok(())
        } else {
            Err(SimulatorError::InvalidInput(format!(
                "{} applies to {}, current module is {}",
                command,
                module,
                self.state.module()
            )))
        }
    }

    fn set_lever(&mut self, lever: Lever, value: f64) -> Result<()> {
        match (self.state.module(), lever) {
            (Module::Lbo, Lever::Debt) => self.transition(|s| Ok(s.with_lbo_debt(value))),
            (Module::Lbo, Lever::Exit) => {
                let entry = self.lbo_case()?.entry_multiple;
                self.transition(|s| Ok(s.with_lbo_exit(value, entry)))
            }
            (Module::Lbo, Lever::Growth) => self.transition(|s| Ok(s.with_lbo_growth(value))),
            (Module::Lbo, Lever::Capex) => self.transition(|s| Ok(s.with_lbo_capex(value))),
            (Module::Merger, Lever::Debt) => self.transition(|s| Ok(s.with_merger_debt(value))),
            (Module::Merger, Lever::Stock) => self.transition(|s| Ok(s.with_stock(value))),
            (Module::Merger, Lever::Synergy) => self.transition(|s| Ok(s.with_synergy(value))),
            (Module::Venture, Lever::Fund) => self.transition(|s| s.with_fund_size(value)),
            (Module::Venture, Lever::Reserve) => self.transition(|s| Ok(s.with_reserve(value))),
            (Module::Venture, Lever::Tilt) => self.transition(|s| Ok(s.with_tilt(value))),
            (module, lever) => Err(SimulatorError::InvalidInput(format!(
                "{:?} does not apply to {}",
                lever, module
            ))),
        }
    }

    fn ticker_index(&self, target: &str) -> Result<usize> {
        if let Some(index) = TICKERS
            .iter()
            .position(|t| t.eq_ignore_ascii_case(target))
        {
            return Ok(index);
        }
        match target.parse::<usize>() {
            Ok(n) if (1..=TICKERS.len()).contains(&n) => Ok(n - 1),
            _ => Err(SimulatorError::InvalidInput(format!(
                "unknown instrument {}",
                target
            ))),
        }
    }

    fn case(&mut self) -> &ModuleCase {
        self.cache.get(self.state.module(), self.state.seed())
    }

    fn dcf_case(&mut self) -> Result<DcfCase> {
        match self.case() {
            ModuleCase::Dcf(case) => Ok(case.clone()),
            _ => Err(SimulatorError::InvalidInput("no DCF case loaded".to_string())),
        }
    }

    fn lbo_case(&mut self) -> Result<LboCase> {
        match self.case() {
            ModuleCase::Lbo(case) => Ok(case.clone()),
            _ => Err(SimulatorError::InvalidInput("no LBO case loaded".to_string())),
        }
    }

    fn guess_feedback(&mut self) -> Result<String> {
        let case = self.dcf_case()?;
        let valuation = DcfModel::new(&case).evaluate()?;
        let text = self.state.guess().unwrap_or_default();
        Ok(GuessFeedback::check(&valuation, text, self.config.guess_tolerance).to_string())
    }

    fn sensitivity(&mut self) -> Result<String> {
        let case = self.dcf_case()?;
        let waccs: Vec<f64> = SENSITIVITY_STEPS.iter().map(|d| case.wacc + d).collect();
        let growths: Vec<f64> = SENSITIVITY_STEPS
            .iter()
            .map(|d| case.terminal_growth + d)
            .collect();
        let grid = DcfModel::new(&case).sensitivity(&waccs, &growths);
        Ok(report::dcf_sensitivity(&waccs, &growths, &grid, &self.format))
    }

    /// Renders the current module from the cached case and current inputs.
    pub fn view(&mut self) -> Result<String> {
        let seed = self.state.seed().to_string();
        let state = self.state.clone();
        let format = self.format.clone();
        let limits = self.config.risk_limits;
        match self.case() {
            ModuleCase::Dcf(case) => Ok(report::dcf_case(case, &format)),
            ModuleCase::Lbo(case) => {
                let returns = LboModel::new(case)
                    .with_assumptions(*state.lbo())
                    .evaluate()?;
                Ok(report::lbo(case, &returns, &format))
            }
            ModuleCase::Merger(case) => {
                let outcome = MergerModel::new(case)
                    .with_assumptions(*state.merger())
                    .evaluate()?;
                Ok(report::merger(case, &outcome, &format))
            }
            ModuleCase::HedgeFund(universe) => {
                let risk = PortfolioModel::new(universe)
                    .with_limits(limits)
                    .with_weights(state.weights().to_vec())?
                    .evaluate()?;
                Ok(report::portfolio(universe, &risk, &limits))
            }
            ModuleCase::Venture => {
                let outcome = VentureModel::new(&seed, *state.venture())?.simulate(state.run())?;
                Ok(report::venture(&outcome, &format))
            }
        }
    }
}
