use serde::{Deserialize, Serialize};

use super::traits::DeterministicModel;
use crate::{
    cases::dcfcase::DcfCase,
    math::interpolation::linear::LinearInterpolator,
    rates::interestrate::InterestRate,
    utils::errors::{AtlasError, Result},
};

pub const PROJECTION_YEARS: usize = 5;
pub const GUESS_TOLERANCE: f64 = 0.05;

/// # DcfAssumptions
/// Optional overrides of the case's discount rate and terminal growth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DcfAssumptions {
    pub wacc: Option<f64>,
    pub terminal_growth: Option<f64>,
}

impl DcfAssumptions {
    pub fn with_wacc(mut self, wacc: f64) -> Self {
        self.wacc = Some(wacc);
        self
    }

    pub fn with_terminal_growth(mut self, terminal_growth: f64) -> Self {
        self.terminal_growth = Some(terminal_growth);
        self
    }
}

/// One projected year. Revenue and free cash flow are whole numbers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectionYear {
    pub year: usize,
    pub growth: f64,
    pub revenue: f64,
    pub ebit: f64,
    pub nopat: f64,
    pub da: f64,
    pub capex: f64,
    pub delta_nwc: f64,
    pub fcf: f64,
    pub pv_fcf: f64,
}

/// Result of checking a per-share guess against the model value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuessCheck {
    pub guess: f64,
    pub relative_error: f64,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DcfValuation {
    pub wacc: f64,
    pub terminal_growth: f64,
    pub projections: Vec<ProjectionYear>,
    pub terminal_value: f64,
    pub pv_terminal_value: f64,
    pub enterprise_value: f64,
    pub equity_value: f64,
    pub per_share: f64,
}

impl DcfValuation {
    pub fn fcf(&self) -> Vec<f64> {
        self.projections.iter().map(|p| p.fcf).collect()
    }

    pub fn check_guess(&self, guess: f64) -> GuessCheck {
        self.check_guess_with_tolerance(guess, GUESS_TOLERANCE)
    }

    /// Relative error is measured against `max(1, |value|)` so values near
    /// zero do not blow it up.
    pub fn check_guess_with_tolerance(&self, guess: f64, tolerance: f64) -> GuessCheck {
        let relative_error = (guess - self.per_share).abs() / self.per_share.abs().max(1.0);
        GuessCheck {
            guess,
            relative_error,
            correct: relative_error <= tolerance,
        }
    }
}

/// # DcfModel
/// Five-year unlevered free cash flow projection with a Gordon growth
/// terminal value.
///
/// Revenue is rounded to a whole number every year before it feeds the next
/// year's growth and the working-capital build, and each year's free cash
/// flow is rounded as well.
///
/// ## Example
/// ```
/// use finatlas::prelude::*;
/// let case = DcfCase::generate("1001");
/// let valuation = DcfModel::new(&case).evaluate().unwrap();
/// assert_eq!(valuation.projections.len(), 5);
/// assert!(valuation.check_guess(valuation.per_share).correct);
///
/// let degenerate = DcfAssumptions::default().with_wacc(0.02).with_terminal_growth(0.03);
/// assert!(DcfModel::new(&case).with_assumptions(degenerate).evaluate().is_err());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DcfModel<'a> {
    case: &'a DcfCase,
    assumptions: DcfAssumptions,
}

impl<'a> DcfModel<'a> {
    pub fn new(case: &'a DcfCase) -> Self {
        Self {
            case,
            assumptions: DcfAssumptions::default(),
        }
    }

    pub fn with_assumptions(mut self, assumptions: DcfAssumptions) -> Self {
        self.assumptions = assumptions;
        self
    }

    pub fn case(&self) -> &DcfCase {
        self.case
    }

    pub fn wacc(&self) -> f64 {
        self.assumptions.wacc.unwrap_or(self.case.wacc)
    }

    pub fn terminal_growth(&self) -> f64 {
        self.assumptions
            .terminal_growth
            .unwrap_or(self.case.terminal_growth)
    }

    fn project(&self, discount: &InterestRate) -> Result<Vec<ProjectionYear>> {
        let case = self.case;
        let growth_path =
            LinearInterpolator::path(case.growth_start, case.growth_end, PROJECTION_YEARS)?;
        let mut prev_revenue = case.revenue;
        let mut projections = Vec::with_capacity(PROJECTION_YEARS);
        for (i, growth) in growth_path.into_iter().enumerate() {
            let year = i + 1;
            let revenue = (prev_revenue * (1.0 + growth)).round();
            let ebit = revenue * case.ebit_margin;
            let nopat = ebit * (1.0 - case.tax_rate);
            let da = revenue * case.da_pct;
            let capex = revenue * case.capex_pct;
            let delta_nwc = revenue * case.nwc_pct - prev_revenue * case.nwc_pct;
            let fcf = (nopat + da - capex - delta_nwc).round();
            projections.push(ProjectionYear {
                year,
                growth,
                revenue,
                ebit,
                nopat,
                da,
                capex,
                delta_nwc,
                fcf,
                pv_fcf: discount.discount(fcf, year as f64),
            });
            prev_revenue = revenue;
        }
        Ok(projections)
    }

    /// Per-share values over a grid of discount rates (rows) and terminal
    /// growth rates (columns). Cells where the terminal value does not
    /// converge are `None`.
    pub fn sensitivity(&self, waccs: &[f64], growths: &[f64]) -> Vec<Vec<Option<f64>>> {
        waccs
            .iter()
            .map(|&wacc| {
                growths
                    .iter()
                    .map(|&g| {
                        let assumptions = DcfAssumptions::default()
                            .with_wacc(wacc)
                            .with_terminal_growth(g);
                        self.with_assumptions(assumptions)
                            .evaluate()
                            .ok()
                            .map(|v| v.per_share)
                    })
                    .collect()
            })
            .collect()
    }
}

impl<'a> DeterministicModel for DcfModel<'a> {
    type Output = DcfValuation;

    fn evaluate(&self) -> Result<DcfValuation> {
        let wacc = self.wacc();
        let g = self.terminal_growth();
        if !wacc.is_finite() || !g.is_finite() {
            return Err(AtlasError::InvalidValueErr(
                "Discount and terminal growth rates must be finite".to_string(),
            ));
        }
        if wacc <= g {
            tracing::warn!(wacc, g, "terminal value does not converge");
            return Err(AtlasError::NonConvergentErr(format!(
                "WACC {} must exceed terminal growth {}",
                wacc, g
            )));
        }
        if self.case.shares <= 0.0 {
            return Err(AtlasError::InvalidValueErr(
                "Share count must be positive".to_string(),
            ));
        }

        let discount = InterestRate::new(wacc);
        let projections = self.project(&discount)?;
        let last_fcf = projections
            .last()
            .map(|p| p.fcf)
            .ok_or_else(|| AtlasError::NotFoundErr("final year cash flow".to_string()))?;

        let terminal_value = last_fcf * (1.0 + g) / (wacc - g);
        let pv_terminal_value = discount.discount(terminal_value, PROJECTION_YEARS as f64);
        let pv_sum: f64 = projections.iter().map(|p| p.pv_fcf).sum();
        let enterprise_value = (pv_sum + pv_terminal_value).round();
        let equity_value = enterprise_value - self.case.net_debt;
        let per_share = equity_value / self.case.shares;
        tracing::debug!(enterprise_value, per_share, "dcf evaluated");

        Ok(DcfValuation {
            wacc,
            terminal_growth: g,
            projections,
            terminal_value,
            pv_terminal_value,
            enterprise_value,
            equity_value,
            per_share,
        })
    }
}
