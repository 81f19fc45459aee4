//! simulator CLI - seeded finance exercises in the terminal

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use finatlas::prelude::*;
use serde::Serialize;
use simulator::prelude::*;
use simulator::utils::errors::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simulator")]
#[command(about = "Seeded DCF, LBO, M&A, hedge fund and venture exercises")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log engine activity
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a generated company with a five-year DCF
    Dcf {
        #[arg(short, long, default_value = "1001")]
        seed: String,
        #[arg(long)]
        wacc: Option<f64>,
        #[arg(long)]
        growth: Option<f64>,
        /// Check a per-share guess instead of printing the solution
        #[arg(long)]
        guess: Option<String>,
        /// Print a per-share grid around the case rates
        #[arg(long)]
        sensitivity: bool,
    },
    /// Run a generated buyout
    Lbo {
        #[arg(short, long, default_value = "1001")]
        seed: String,
        #[command(flatten)]
        levers: LboArgs,
    },
    /// EPS accretion/dilution of a generated acquisition
    Mna {
        #[arg(short, long, default_value = "1001")]
        seed: String,
        #[arg(long, default_value_t = 0.4)]
        stock: f64,
        #[arg(long, default_value_t = 0.4)]
        debt: f64,
        #[arg(long)]
        synergy: Option<f64>,
    },
    /// Risk of a long/short book over the generated universe
    Hf {
        #[arg(short, long, default_value = "1001")]
        seed: String,
        /// Comma separated weights in percent, one per instrument
        #[arg(short, long, allow_hyphen_values = true)]
        weights: Option<String>,
    },
    /// Simulate one venture fund
    Vc {
        #[arg(short, long, default_value = "1001")]
        seed: String,
        #[command(flatten)]
        fund: FundArgs,
        #[arg(long, default_value_t = 0)]
        run: u64,
    },
    /// Summarise many venture fund runs
    Sweep {
        #[arg(short, long, default_value = "1001")]
        seed: String,
        #[command(flatten)]
        fund: FundArgs,
        #[arg(long)]
        runs: Option<usize>,
    },
    /// Interactive session over stdin
    Play {
        #[arg(short, long, default_value = "1001")]
        seed: String,
    },
}

#[derive(clap::Args)]
struct LboArgs {
    #[arg(long)]
    debt: Option<f64>,
    #[arg(long)]
    exit: Option<f64>,
    #[arg(long)]
    growth: Option<f64>,
    #[arg(long)]
    capex: Option<f64>,
}

impl LboArgs {
    fn apply(&self, state: SessionState, entry_multiple: f64) -> LboAssumptions {
        let mut state = state.with_module(Module::Lbo);
        if let Some(debt) = self.debt {
            state = state.with_lbo_debt(debt);
        }
        if let Some(exit) = self.exit {
            state = state.with_lbo_exit(exit, entry_multiple);
        }
        if let Some(growth) = self.growth {
            state = state.with_lbo_growth(growth);
        }
        if let Some(capex) = self.capex {
            state = state.with_lbo_capex(capex);
        }
        *state.lbo()
    }
}

#[derive(clap::Args)]
struct FundArgs {
    #[arg(long)]
    fund: Option<f64>,
    #[arg(long)]
    deals: Option<usize>,
    #[arg(long)]
    reserve: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    tilt: Option<f64>,
}

impl FundArgs {
    /// Applies the flags through the session transitions so they get the
    /// same ranges as the interactive sliders.
    fn apply(&self, seed: &str, defaults: VentureParameters) -> Result<VentureParameters> {
        let mut state = SessionState::new(seed, defaults).with_module(Module::Venture);
        if let Some(fund) = self.fund {
            state = state.with_fund_size(fund)?;
        }
        if let Some(deals) = self.deals {
            state = state.with_deals(deals);
        }
        if let Some(reserve) = self.reserve {
            state = state.with_reserve(reserve);
        }
        if let Some(tilt) = self.tilt {
            state = state.with_tilt(tilt);
        }
        Ok(*state.venture())
    }
}

fn main() {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => SimulatorConfig::from_path(path)?,
        None => SimulatorConfig::default(),
    };
    let format = NumberFormat::new(&config.currency_symbol);
    let json = cli.json;

    match cli.command {
        Commands::Dcf {
            seed,
            wacc,
            growth,
            guess,
            sensitivity,
        } => {
            let case = DcfCase::generate(&seed);
            let mut assumptions = DcfAssumptions::default();
            if let Some(wacc) = wacc {
                assumptions = assumptions.with_wacc(wacc);
            }
            if let Some(growth) = growth {
                assumptions = assumptions.with_terminal_growth(growth);
            }
            let model = DcfModel::new(&case).with_assumptions(assumptions);
            let valuation = model.evaluate()?;
            if let Some(text) = guess {
                let feedback = GuessFeedback::check(&valuation, &text, config.guess_tolerance);
                return emit(json, &feedback, || feedback.to_string());
            }
            if sensitivity {
                let waccs: Vec<f64> = SENSITIVITY_STEPS.iter().map(|d| model.wacc() + d).collect();
                let growths: Vec<f64> = SENSITIVITY_STEPS
                    .iter()
                    .map(|d| model.terminal_growth() + d)
                    .collect();
                let grid = model.sensitivity(&waccs, &growths);
                return emit(json, &grid, || {
                    report::dcf_sensitivity(&waccs, &growths, &grid, &format)
                });
            }
            emit(json, &valuation, || {
                format!(
                    "{}\n{}",
                    report::dcf_case(&case, &format),
                    report::dcf_solution(&valuation, &format)
                )
            })
        }
        Commands::Lbo { seed, levers } => {
            let case = LboCase::generate(&seed);
            let state = SessionState::new(&seed, config.venture);
            let assumptions = levers.apply(state, case.entry_multiple);
            let returns = LboModel::new(&case).with_assumptions(assumptions).evaluate()?;
            emit(json, &returns, || report::lbo(&case, &returns, &format))
        }
        Commands::Mna {
            seed,
            stock,
            debt,
            synergy,
        } => {
            let case = MergerCase::generate(&seed);
            // stock is placed first, debt takes what is left
            let mut state = SessionState::new(&seed, config.venture)
                .with_module(Module::Merger)
                .with_merger_debt(0.0)
                .with_stock(stock)
                .with_merger_debt(debt);
            if let Some(synergy) = synergy {
                state = state.with_synergy(synergy);
            }
            let outcome = MergerModel::new(&case)
                .with_assumptions(*state.merger())
                .evaluate()?;
            emit(json, &outcome, || report::merger(&case, &outcome, &format))
        }
        Commands::Hf { seed, weights } => {
            let universe = HedgeFundUniverse::generate(&seed);
            let mut model = PortfolioModel::new(&universe).with_limits(config.risk_limits);
            if let Some(text) = weights {
                model = model.with_weights(parse_list(&text)?)?;
            }
            let risk = model.evaluate()?;
            emit(json, &risk, || {
                report::portfolio(&universe, &risk, &config.risk_limits)
            })
        }
        Commands::Vc { seed, fund, run } => {
            let params = fund.apply(&seed, config.venture)?;
            let outcome = VentureModel::new(&seed, params)?.simulate(run)?;
            emit(json, &outcome, || report::venture(&outcome, &format))
        }
        Commands::Sweep { seed, fund, runs } => {
            let params = fund.apply(&seed, config.venture)?;
            let summary = sweep(&seed, params, runs.unwrap_or(config.sweep_runs))?;
            emit(json, &summary, || report::sweep(&summary))
        }
        Commands::Play { seed } => play(&seed, config),
    }
}

fn emit<T, F>(json: bool, value: &T, text: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn play(seed: &str, config: SimulatorConfig) -> Result<()> {
    let mut session = Session::new(seed, config);
    info!(seed, "session started");
    println!("Finance Skill Simulator: DCF • LBO • M&A EPS • Hedge Fund L/S • VC Power-Law");
    println!("{}", session.view()?);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("[{} {}]> ", session.state().module(), session.state().seed());
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let command = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        match session.execute(command) {
            Ok(text) => println!("{}", text),
            Err(e) => println!("{}", e),
        }
    }
    info!(generations = session.cache().generations(), "session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn test_fund_flags_use_slider_ranges() {
        let Commands::Vc { seed, fund, .. } =
            parse(&["simulator", "vc", "--deals", "1", "--reserve", "9", "--tilt", "-4"])
        else {
            panic!("expected vc");
        };
        let params = fund.apply(&seed, VentureParameters::default()).unwrap();
        assert_eq!(params.deals, 5);
        assert_eq!(params.reserve_multiplier, 2.5);
        assert_eq!(params.skill_tilt, -2.0);
    }

    #[test]
    fn test_fund_flag_rejects_non_positive_size() {
        let Commands::Sweep { seed, fund, .. } = parse(&["simulator", "sweep", "--fund=-10"])
        else {
            panic!("expected sweep");
        };
        assert!(matches!(
            fund.apply(&seed, VentureParameters::default()),
            Err(SimulatorError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_lbo_flags_use_slider_ranges() {
        let Commands::Lbo { seed, levers } = parse(&[
            "simulator", "lbo", "--debt", "0.95", "--exit", "30", "--growth", "0.01",
        ]) else {
            panic!("expected lbo");
        };
        let case = LboCase::generate(&seed);
        let state = SessionState::new(&seed, VentureParameters::default());
        let assumptions = levers.apply(state, case.entry_multiple);
        assert_eq!(assumptions.debt_pct, Some(0.8));
        assert_eq!(assumptions.exit_multiple, Some(case.entry_multiple + 2.0));
        assert_eq!(assumptions.growth, Some(0.03));
        assert_eq!(assumptions.capex_pct_ebitda, None);
    }
}
