use serde::{Deserialize, Serialize};

use crate::utils::errors::{AtlasError, Result};

/// # InterestRate
/// An annually compounded rate. Time is measured in year fractions.
///
/// ## Example
/// ```
/// use finatlas::prelude::*;
/// let wacc = InterestRate::new(0.08);
/// assert_eq!(wacc.rate(), 0.08);
/// assert!((wacc.discount_factor(2.0) - 1.0 / 1.08f64.powi(2)).abs() < 1e-15);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct InterestRate {
    rate: f64,
}

impl InterestRate {
    pub fn new(rate: f64) -> InterestRate {
        InterestRate { rate }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Rate that turns 1 into `compound` over `t` years.
    ///
    /// ## Example
    /// ```
    /// use finatlas::prelude::*;
    /// let irr = InterestRate::implied_rate(2.0, 5.0).unwrap();
    /// assert!((irr.rate() - (2.0f64.powf(0.2) - 1.0)).abs() < 1e-15);
    /// ```
    pub fn implied_rate(compound: f64, t: f64) -> Result<InterestRate> {
        if compound <= 0.0 || !compound.is_finite() {
            return Err(AtlasError::InvalidValueErr(
                "Positive compound factor required".to_string(),
            ));
        }
        let r = if compound == 1.0 {
            if t < 0.0 {
                return Err(AtlasError::InvalidValueErr(
                    "Non-negative time required".to_string(),
                ));
            }
            0.0
        } else {
            if t <= 0.0 {
                return Err(AtlasError::InvalidValueErr(
                    "Positive time required".to_string(),
                ));
            }
            compound.powf(1.0 / t) - 1.0
        };
        Ok(InterestRate::new(r))
    }

    pub fn compound_factor(&self, year_fraction: f64) -> f64 {
        (1.0 + self.rate).powf(year_fraction)
    }

    pub fn discount_factor(&self, year_fraction: f64) -> f64 {
        1.0 / self.compound_factor(year_fraction)
    }

    /// Present value of `amount` received after `year_fraction` years.
    pub fn discount(&self, amount: f64, year_fraction: f64) -> f64 {
        amount / self.compound_factor(year_fraction)
    }
}

/// Annualized return of a money multiple over a holding period, floored at
/// a total loss (-100%) when the multiple is not positive.
///
/// ## Example
/// ```
/// use finatlas::prelude::*;
/// assert!((annualized_return(2.0, 5.0) - (2.0f64.powf(0.2) - 1.0)).abs() < 1e-15);
/// assert_eq!(annualized_return(-0.3, 5.0), -1.0);
/// ```
pub fn annualized_return(multiple: f64, years: f64) -> f64 {
    InterestRate::implied_rate(multiple, years)
        .map(|r| r.rate())
        .unwrap_or(-1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct InterestRateData {
        rate: f64,
        time: f64,
        discount_factor: f64,
        precision: i32,
    }

    fn test_cases() -> Vec<InterestRateData> {
        vec![
            InterestRateData {
                rate: 0.0800,
                time: 1.00,
                discount_factor: 0.9259,
                precision: 4,
            },
            InterestRateData {
                rate: 0.1000,
                time: 2.00,
                discount_factor: 0.8264,
                precision: 4,
            },
            InterestRateData {
                rate: 0.1200,
                time: 0.50,
                discount_factor: 0.9449,
                precision: 4,
            },
        ]
    }

    #[test]
    fn test_discount_factors() {
        for case in test_cases() {
            let ir = InterestRate::new(case.rate);
            let scale = 10f64.powi(case.precision);
            assert_eq!(
                (ir.discount_factor(case.time) * scale).round() / scale,
                case.discount_factor
            );
        }
    }

    #[test]
    fn test_implied_rate_inverts_compounding() {
        for case in test_cases() {
            let compound = InterestRate::new(case.rate).compound_factor(case.time);
            let implied = InterestRate::implied_rate(compound, case.time).unwrap();
            assert!((implied.rate() - case.rate).abs() < 1e-12);
        }
    }

    #[test]
    fn test_annual_discounting() {
        let wacc = InterestRate::new(0.085);
        for t in 1..=5 {
            let expected = 100.0 / 1.085f64.powi(t);
            assert!((wacc.discount(100.0, t as f64) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_implied_rate_rejects_non_positive() {
        assert!(InterestRate::implied_rate(0.0, 5.0).is_err());
        assert!(InterestRate::implied_rate(1.5, 0.0).is_err());
    }

    #[test]
    fn test_annualized_return_unit_multiple() {
        assert_eq!(annualized_return(1.0, 10.0), 0.0);
        assert_eq!(annualized_return(0.0, 10.0), -1.0);
    }
}
