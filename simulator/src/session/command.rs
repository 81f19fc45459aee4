use std::str::FromStr;

use super::state::Module;
use crate::{
    input::parsing::{parse_count, parse_number},
    utils::errors::{Result, SimulatorError},
};

pub const HELP: &str = "\
commands:
  seed <id>              switch case id
  module <dcf|lbo|mna|hf|vc>
  show                   recompute the current module
  guess <value>          DCF: check a per-share value
  solution               DCF: show the model
  sensitivity            DCF: per-share grid around the case rates
  debt <x>               LBO or M&A: debt fraction
  exit <x>               LBO: exit multiple
  growth <x>             LBO: EBITDA growth
  capex <x>              LBO: capex % EBITDA
  stock <x>              M&A: stock fraction
  synergy <x>            M&A: pre-tax synergies
  weight <ticker|n> <w>  HF: weight in percent
  fund <x>               VC: fund size
  deals <n>              VC: number of initial deals
  reserve <x>            VC: reserve multiplier
  tilt <x>               VC: skill tilt
  run                    VC: next simulation run
  help | quit";

/// A lever that takes a single numeric value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lever {
    Debt,
    Exit,
    Growth,
    Capex,
    Stock,
    Synergy,
    Fund,
    Reserve,
    Tilt,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Seed(String),
    Module(Module),
    Show,
    Guess(String),
    Solution,
    Sensitivity,
    Set(Lever, f64),
    Weight(String, f64),
    Deals(usize),
    Run,
    Help,
    Quit,
}

fn argument<'a>(name: &str, rest: &'a str) -> Result<&'a str> {
    if rest.is_empty() {
        Err(SimulatorError::InvalidInput(format!("{} needs a value", name)))
    } else {
        Ok(rest)
    }
}

impl FromStr for Command {
    type Err = SimulatorError;

    /// ## Example
    /// ```
    /// use simulator::prelude::*;
    /// assert_eq!("debt 0.6".parse::<Command>().unwrap(), Command::Set(Lever::Debt, 0.6));
    /// assert_eq!("guess six".parse::<Command>().unwrap(), Command::Guess("six".to_string()));
    /// assert!("debt".parse::<Command>().is_err());
    /// ```
    fn from_str(line: &str) -> Result<Command> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let word = word.to_ascii_lowercase();
        let lever = |lever: Lever| -> Result<Command> {
            Ok(Command::Set(lever, parse_number(argument(&word, rest)?)?))
        };

        match word.as_str() {
            "seed" => Ok(Command::Seed(argument("seed", rest)?.to_string())),
            "module" => Ok(Command::Module(argument("module", rest)?.parse()?)),
            "show" | "" => Ok(Command::Show),
            // raw text so a bad guess becomes feedback, not an error
            "guess" => Ok(Command::Guess(rest.to_string())),
            "solution" => Ok(Command::Solution),
            "sensitivity" => Ok(Command::Sensitivity),
            "debt" => lever(Lever::Debt),
            "exit" => lever(Lever::Exit),
            "growth" => lever(Lever::Growth),
            "capex" => lever(Lever::Capex),
            "stock" => lever(Lever::Stock),
            "synergy" => lever(Lever::Synergy),
            "fund" => lever(Lever::Fund),
            "reserve" => lever(Lever::Reserve),
            "tilt" => lever(Lever::Tilt),
            "deals" => Ok(Command::Deals(parse_count(argument("deals", rest)?)?)),
            "weight" => {
                let (target, value) = argument("weight", rest)?
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| {
                        SimulatorError::InvalidInput("weight needs a ticker and a value".to_string())
                    })?;
                Ok(Command::Weight(target.to_string(), parse_number(value)?))
            }
            "run" => Ok(Command::Run),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" => Ok(Command::Quit),
            other => Err(SimulatorError::UnknownCommand(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "seed  Case 7 ".parse::<Command>().unwrap(),
            Command::Seed("Case 7".to_string())
        );
        assert_eq!(
            "MODULE vc".parse::<Command>().unwrap(),
            Command::Module(Module::Venture)
        );
        assert_eq!("".parse::<Command>().unwrap(), Command::Show);
        assert_eq!(
            "weight alfa -25".parse::<Command>().unwrap(),
            Command::Weight("alfa".to_string(), -25.0)
        );
        assert_eq!("deals 30".parse::<Command>().unwrap(), Command::Deals(30));
        assert_eq!("guess".parse::<Command>().unwrap(), Command::Guess(String::new()));
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "leverage 3".parse::<Command>(),
            Err(SimulatorError::UnknownCommand(_))
        ));
        assert!(matches!(
            "tilt lots".parse::<Command>(),
            Err(SimulatorError::ParsingError(_))
        ));
        assert!(matches!(
            "weight ALFA".parse::<Command>(),
            Err(SimulatorError::InvalidInput(_))
        ));
        assert!("module fx".parse::<Command>().is_err());
    }
}
