use serde::{Deserialize, Serialize};

use super::traits::DeterministicModel;
use crate::{
    cases::lbocase::LboCase,
    rates::interestrate::annualized_return,
    utils::errors::{AtlasError, Result},
};

pub const HOLD_YEARS: usize = 5;

/// # LboAssumptions
/// Deal levers that may be moved after the case is generated. Unset levers
/// fall back to the case values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LboAssumptions {
    pub entry_multiple: Option<f64>,
    pub exit_multiple: Option<f64>,
    pub debt_pct: Option<f64>,
    pub growth: Option<f64>,
    pub capex_pct_ebitda: Option<f64>,
}

impl LboAssumptions {
    pub fn with_entry_multiple(mut self, entry_multiple: f64) -> Self {
        self.entry_multiple = Some(entry_multiple);
        self
    }

    pub fn with_exit_multiple(mut self, exit_multiple: f64) -> Self {
        self.exit_multiple = Some(exit_multiple);
        self
    }

    pub fn with_debt_pct(mut self, debt_pct: f64) -> Self {
        self.debt_pct = Some(debt_pct);
        self
    }

    pub fn with_growth(mut self, growth: f64) -> Self {
        self.growth = Some(growth);
        self
    }

    pub fn with_capex_pct_ebitda(mut self, capex_pct_ebitda: f64) -> Self {
        self.capex_pct_ebitda = Some(capex_pct_ebitda);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleYear {
    pub year: usize,
    pub ebitda: f64,
    pub da: f64,
    pub ebit: f64,
    pub interest: f64,
    pub taxes: f64,
    pub capex: f64,
    pub delta_nwc: f64,
    pub fcf: f64,
    pub repayment: f64,
    pub closing_debt: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LboReturns {
    pub entry_ev: f64,
    pub entry_debt: f64,
    pub entry_equity: f64,
    pub exit_ev: f64,
    pub exit_equity: f64,
    pub moic: f64,
    pub irr: f64,
    pub schedule: Vec<ScheduleYear>,
}

/// # LboModel
/// Five-year buyout with a full cash sweep: free cash flow after interest,
/// taxes, capex and working capital repays debt until it is gone. Negative
/// free cash flow repays nothing and draws nothing.
///
/// ## Example
/// ```
/// use finatlas::prelude::*;
/// let case = LboCase::generate("1001");
/// let base = LboModel::new(&case).evaluate().unwrap();
/// let levered = LboModel::new(&case)
///     .with_assumptions(LboAssumptions::default().with_debt_pct(0.8))
///     .evaluate()
///     .unwrap();
/// assert!(levered.entry_equity < base.entry_equity);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct LboModel<'a> {
    case: &'a LboCase,
    assumptions: LboAssumptions,
}

impl<'a> LboModel<'a> {
    pub fn new(case: &'a LboCase) -> Self {
        Self {
            case,
            assumptions: LboAssumptions::default(),
        }
    }

    pub fn with_assumptions(mut self, assumptions: LboAssumptions) -> Self {
        self.assumptions = assumptions;
        self
    }

    pub fn case(&self) -> &LboCase {
        self.case
    }

    pub fn entry_multiple(&self) -> f64 {
        non_negative("entry multiple", self.assumptions.entry_multiple, self.case.entry_multiple)
    }

    pub fn exit_multiple(&self) -> f64 {
        non_negative("exit multiple", self.assumptions.exit_multiple, self.case.exit_multiple)
    }

    pub fn debt_pct(&self) -> f64 {
        let raw = self.assumptions.debt_pct.unwrap_or(self.case.debt_pct);
        let clamped = raw.clamp(0.0, 1.0);
        if clamped != raw {
            tracing::warn!(raw, clamped, "debt fraction clamped");
        }
        clamped
    }

    pub fn growth(&self) -> f64 {
        self.assumptions.growth.unwrap_or(self.case.growth)
    }

    pub fn capex_pct_ebitda(&self) -> f64 {
        non_negative(
            "capex % EBITDA",
            self.assumptions.capex_pct_ebitda,
            self.case.capex_pct_ebitda,
        )
    }
}

fn non_negative(name: &str, value: Option<f64>, fallback: f64) -> f64 {
    let raw = value.unwrap_or(fallback);
    if raw < 0.0 {
        tracing::warn!(name, raw, "negative lever clamped to zero");
        0.0
    } else {
        raw
    }
}

impl<'a> DeterministicModel for LboModel<'a> {
    type Output = LboReturns;

    fn evaluate(&self) -> Result<LboReturns> {
        let case = self.case;
        let entry_multiple = self.entry_multiple();
        let exit_multiple = self.exit_multiple();
        let debt_pct = self.debt_pct();
        let growth = self.growth();
        let capex_pct = self.capex_pct_ebitda();
        if [entry_multiple, exit_multiple, debt_pct, growth, capex_pct]
            .iter()
            .any(|x| !x.is_finite())
        {
            return Err(AtlasError::InvalidValueErr(
                "LBO levers must be finite".to_string(),
            ));
        }

        let entry_ev = case.ebitda * entry_multiple;
        let entry_debt = entry_ev * debt_pct;
        let entry_equity = entry_ev - entry_debt;
        if entry_equity <= 0.0 {
            return Err(AtlasError::InvalidValueErr(format!(
                "Sponsor equity at entry must be positive, got {}",
                entry_equity
            )));
        }

        let mut debt = entry_debt;
        let mut ebitda = case.ebitda;
        let mut schedule = Vec::with_capacity(HOLD_YEARS);
        for year in 1..=HOLD_YEARS {
            ebitda *= 1.0 + growth;
            let da = ebitda * case.da_pct_ebitda;
            let ebit = ebitda - da;
            let interest = debt * case.interest_rate;
            let taxable = (ebit - interest).max(0.0);
            let taxes = taxable * case.tax_rate;
            let capex = ebitda * capex_pct;
            let delta_nwc = ebitda * case.nwc_pct_ebitda;
            let fcf = ebitda - interest - taxes - capex - delta_nwc;
            let repayment = debt.min(fcf.max(0.0));
            debt = (debt - repayment).max(0.0);
            schedule.push(ScheduleYear {
                year,
                ebitda,
                da,
                ebit,
                interest,
                taxes,
                capex,
                delta_nwc,
                fcf,
                repayment,
                closing_debt: debt,
            });
        }

        let exit_ev = ebitda * exit_multiple;
        let exit_equity = exit_ev - debt;
        let moic = exit_equity / entry_equity;
        let irr = annualized_return(moic, HOLD_YEARS as f64);
        tracing::debug!(moic, irr, "lbo evaluated");

        Ok(LboReturns {
            entry_ev,
            entry_debt,
            entry_equity,
            exit_ev,
            exit_equity,
            moic,
            irr,
            schedule,
        })
    }
}
