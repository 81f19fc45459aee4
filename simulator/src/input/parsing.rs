use std::fmt;

use finatlas::prelude::DcfValuation;
use serde::{Deserialize, Serialize};

use crate::utils::errors::{Result, SimulatorError};

/// Parses a free-text number. Surrounding whitespace is ignored; empty,
/// `NaN` and infinite inputs are rejected.
///
/// ## Example
/// ```
/// use simulator::prelude::*;
/// assert_eq!(parse_number(" 6.42 ").unwrap(), 6.42);
/// assert!(parse_number("abc").is_err());
/// assert!(parse_number("inf").is_err());
/// ```
pub fn parse_number(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SimulatorError::InvalidInput("empty number".to_string()));
    }
    let value: f64 = trimmed.parse()?;
    if !value.is_finite() {
        return Err(SimulatorError::InvalidInput(format!(
            "{} is not a finite number",
            trimmed
        )));
    }
    Ok(value)
}

/// Parses a whole count such as a number of deals. Fractions are rounded
/// and negative values rejected.
pub fn parse_count(text: &str) -> Result<usize> {
    let value = parse_number(text)?.round();
    if value < 0.0 {
        return Err(SimulatorError::InvalidInput(format!(
            "count must not be negative, got {}",
            value
        )));
    }
    Ok(value as usize)
}

/// Parses a comma separated list of numbers, e.g. portfolio weights.
pub fn parse_list(text: &str) -> Result<Vec<f64>> {
    text.split(',').map(parse_number).collect()
}

/// Feedback on a per-share guess typed by the user.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GuessFeedback {
    NotANumber,
    Correct { tolerance: f64 },
    Off { relative_error: f64 },
}

impl GuessFeedback {
    /// Checks raw guess text against a valuation. Text that does not parse
    /// is reported as feedback, not as an error.
    pub fn check(valuation: &DcfValuation, text: &str, tolerance: f64) -> GuessFeedback {
        match parse_number(text) {
            Ok(guess) => {
                let check = valuation.check_guess_with_tolerance(guess, tolerance);
                if check.correct {
                    GuessFeedback::Correct { tolerance }
                } else {
                    GuessFeedback::Off {
                        relative_error: check.relative_error,
                    }
                }
            }
            Err(e) => {
                tracing::debug!(text, error = %e, "guess rejected");
                GuessFeedback::NotANumber
            }
        }
    }
}

impl fmt::Display for GuessFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuessFeedback::NotANumber => write!(f, "Enter a number"),
            GuessFeedback::Correct { tolerance } => {
                write!(f, "Correct (±{:.0}%)", tolerance * 100.0)
            }
            GuessFeedback::Off { relative_error } => {
                write!(f, "Off by {:.1}%", relative_error * 100.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finatlas::prelude::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42").unwrap(), 42.0);
        assert_eq!(parse_number("-1.5e2").unwrap(), -150.0);
        assert!(matches!(
            parse_number("12abc"),
            Err(SimulatorError::ParsingError(_))
        ));
        assert!(matches!(
            parse_number("   "),
            Err(SimulatorError::InvalidInput(_))
        ));
        assert!(parse_number("NaN").is_err());
        assert!(parse_number("-inf").is_err());
    }

    #[test]
    fn test_parse_count_and_list() {
        assert_eq!(parse_count("24.6").unwrap(), 25);
        assert!(parse_count("-3").is_err());
        assert_eq!(
            parse_list("10, -20,0").unwrap(),
            vec![10.0, -20.0, 0.0]
        );
        assert!(parse_list("10,,5").is_err());
    }

    #[test]
    fn test_guess_feedback() {
        let case = DcfCase::generate("1001");
        let valuation = DcfModel::new(&case).evaluate().unwrap();
        let exact = valuation.per_share.to_string();
        assert_eq!(
            GuessFeedback::check(&valuation, &exact, 0.05).to_string(),
            "Correct (±5%)"
        );
        assert_eq!(
            GuessFeedback::check(&valuation, "six", 0.05).to_string(),
            "Enter a number"
        );
        assert_eq!(
            GuessFeedback::check(&valuation, "", 0.05),
            GuessFeedback::NotANumber
        );
        let far = (valuation.per_share + 10.0 * valuation.per_share.abs().max(1.0)).to_string();
        match GuessFeedback::check(&valuation, &far, 0.05) {
            GuessFeedback::Off { relative_error } => assert!((relative_error - 10.0).abs() < 1e-9),
            other => panic!("unexpected feedback {:?}", other),
        }
    }

    #[test]
    fn test_off_by_message() {
        let feedback = GuessFeedback::Off {
            relative_error: 0.1234,
        };
        assert_eq!(feedback.to_string(), "Off by 12.3%");
    }
}
