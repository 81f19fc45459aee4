use std::fmt;

use serde::{Deserialize, Serialize};

use super::traits::DeterministicModel;
use crate::{
    cases::mergercase::MergerCase,
    utils::errors::{AtlasError, Result},
};

/// # MergerAssumptions
/// How the purchase is funded and what synergies are expected. Cash makes
/// up whatever stock and debt leave over.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergerAssumptions {
    pub stock_pct: f64,
    pub debt_pct: f64,
    pub synergy: Option<f64>,
}

impl Default for MergerAssumptions {
    fn default() -> Self {
        MergerAssumptions {
            stock_pct: 0.4,
            debt_pct: 0.4,
            synergy: None,
        }
    }
}

impl MergerAssumptions {
    pub fn with_stock_pct(mut self, stock_pct: f64) -> Self {
        self.stock_pct = stock_pct;
        self
    }

    pub fn with_debt_pct(mut self, debt_pct: f64) -> Self {
        self.debt_pct = debt_pct;
        self
    }

    pub fn with_synergy(mut self, synergy: f64) -> Self {
        self.synergy = Some(synergy);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsiderationMix {
    pub stock: f64,
    pub debt: f64,
    pub cash: f64,
}

impl ConsiderationMix {
    /// Fractions clamped to `[0, 1]`; debt gives way when stock and debt
    /// together exceed the whole price.
    pub fn new(stock_pct: f64, debt_pct: f64) -> ConsiderationMix {
        let stock = if stock_pct.is_nan() { 0.0 } else { stock_pct.clamp(0.0, 1.0) };
        let debt = if debt_pct.is_nan() { 0.0 } else { debt_pct.clamp(0.0, 1.0 - stock) };
        if stock != stock_pct || debt != debt_pct {
            tracing::warn!(stock_pct, debt_pct, stock, debt, "consideration mix clamped");
        }
        ConsiderationMix {
            stock,
            debt,
            cash: (1.0 - stock - debt).max(0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealVerdict {
    Accretive,
    Dilutive,
}

impl fmt::Display for DealVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealVerdict::Accretive => write!(f, "Accretive"),
            DealVerdict::Dilutive => write!(f, "Dilutive"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergerOutcome {
    pub equity_value: f64,
    pub acquirer_price: f64,
    pub mix: ConsiderationMix,
    pub synergy: f64,
    pub new_shares: f64,
    pub debt_raised: f64,
    pub after_tax_interest: f64,
    pub after_tax_synergies: f64,
    pub pro_forma_net_income: f64,
    pub pro_forma_shares: f64,
    pub pro_forma_eps: f64,
    pub accretion: f64,
    pub breakeven_synergy: f64,
    pub verdict: DealVerdict,
}

/// # MergerModel
/// First-year EPS accretion/dilution of an acquisition.
///
/// ## Example
/// ```
/// use finatlas::prelude::*;
/// let case = MergerCase::generate("1001");
/// let outcome = MergerModel::new(&case).evaluate().unwrap();
/// let at_breakeven = MergerModel::new(&case)
///     .with_assumptions(MergerAssumptions::default().with_synergy(outcome.breakeven_synergy))
///     .evaluate()
///     .unwrap();
/// assert!(at_breakeven.accretion >= -1e-9);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MergerModel<'a> {
    case: &'a MergerCase,
    assumptions: MergerAssumptions,
}

impl<'a> MergerModel<'a> {
    pub fn new(case: &'a MergerCase) -> Self {
        Self {
            case,
            assumptions: MergerAssumptions::default(),
        }
    }

    pub fn with_assumptions(mut self, assumptions: MergerAssumptions) -> Self {
        self.assumptions = assumptions;
        self
    }

    pub fn case(&self) -> &MergerCase {
        self.case
    }
}

impl<'a> DeterministicModel for MergerModel<'a> {
    type Output = MergerOutcome;

    fn evaluate(&self) -> Result<MergerOutcome> {
        let case = self.case;
        if !(0.0..1.0).contains(&case.tax_rate) {
            return Err(AtlasError::InvalidValueErr(format!(
                "Tax rate must lie in [0, 1), got {}",
                case.tax_rate
            )));
        }
        let acquirer_price = case.acquirer_price();
        if acquirer_price <= 0.0 || case.acquirer_eps == 0.0 {
            return Err(AtlasError::InvalidValueErr(
                "Acquirer share price and EPS must be positive".to_string(),
            ));
        }
        let synergy = self.assumptions.synergy.unwrap_or(case.base_synergy);
        if !synergy.is_finite() {
            return Err(AtlasError::InvalidValueErr(
                "Synergy must be finite".to_string(),
            ));
        }

        let mix = ConsiderationMix::new(self.assumptions.stock_pct, self.assumptions.debt_pct);
        let equity_value = case.target_equity_value();
        let acquirer_ni = case.acquirer_net_income();
        let target_ni = case.target_net_income();

        let debt_raised = equity_value * mix.debt;
        let after_tax_interest = debt_raised * case.cost_of_debt * (1.0 - case.tax_rate);
        let new_shares = equity_value * mix.stock / acquirer_price;
        let after_tax_synergies = synergy * (1.0 - case.tax_rate);
        let pro_forma_net_income = acquirer_ni + target_ni + after_tax_synergies - after_tax_interest;
        let pro_forma_shares = case.acquirer_shares + new_shares;
        let pro_forma_eps = pro_forma_net_income / pro_forma_shares;
        let accretion = pro_forma_eps / case.acquirer_eps - 1.0;

        // net income needed to hold EPS flat on the enlarged share count
        let parity_ni = case.acquirer_eps * pro_forma_shares;
        let needed_after_tax = (parity_ni - (acquirer_ni + target_ni) + after_tax_interest).max(0.0);
        let breakeven_synergy = needed_after_tax / (1.0 - case.tax_rate);

        let verdict = if accretion >= 0.0 {
            DealVerdict::Accretive
        } else {
            DealVerdict::Dilutive
        };
        tracing::debug!(accretion, breakeven_synergy, %verdict, "merger evaluated");

        Ok(MergerOutcome {
            equity_value,
            acquirer_price,
            mix,
            synergy,
            new_shares,
            debt_raised,
            after_tax_interest,
            after_tax_synergies,
            pro_forma_net_income,
            pro_forma_shares,
            pro_forma_eps,
            accretion,
            breakeven_synergy,
            verdict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::traits::CaseGenerator;

    fn sample_case() -> MergerCase {
        MergerCase {
            acquirer: "Acquirer plc".to_string(),
            target: "Target Ltd".to_string(),
            tax_rate: 0.25,
            acquirer_pe: 15.0,
            acquirer_eps: 2.0,
            acquirer_shares: 1000.0,
            target_eps: 1.0,
            target_shares: 500.0,
            offer_pe: 20.0,
            cost_of_debt: 0.08,
            base_synergy: 100.0,
        }
    }

    #[test]
    fn test_hand_computed_outcome() {
        let case = sample_case();
        let out = MergerModel::new(&case).evaluate().unwrap();
        // equity 10000, price 30
        assert_eq!(out.equity_value, 10000.0);
        assert_eq!(out.acquirer_price, 30.0);
        assert!((out.new_shares - 4000.0 / 30.0).abs() < 1e-9);
        assert!((out.after_tax_interest - 240.0).abs() < 1e-9);
        assert!((out.after_tax_synergies - 75.0).abs() < 1e-9);
        // 2000 + 500 + 75 - 240
        assert!((out.pro_forma_net_income - 2335.0).abs() < 1e-9);
        assert!((out.mix.cash - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_breakeven_synergy_gives_zero_accretion() {
        let case = sample_case();
        for (stock, debt) in [(0.4, 0.4), (1.0, 0.0), (0.0, 1.0), (0.2, 0.7), (0.6, 0.2), (0.7, 0.3)] {
            let assumptions = MergerAssumptions::default()
                .with_stock_pct(stock)
                .with_debt_pct(debt);
            let out = MergerModel::new(&case)
                .with_assumptions(assumptions)
                .evaluate()
                .unwrap();
            assert!(out.breakeven_synergy > 0.0);
            let total = out.mix.stock + out.mix.debt + out.mix.cash;
            assert!((total - 1.0).abs() < 1e-12);
            let at_breakeven = MergerModel::new(&case)
                .with_assumptions(assumptions.with_synergy(out.breakeven_synergy))
                .evaluate()
                .unwrap();
            assert!(at_breakeven.accretion.abs() < 1e-12, "{} {}", stock, debt);
        }
    }

    #[test]
    fn test_verdict_follows_sign() {
        let case = sample_case();
        let rich = MergerModel::new(&case)
            .with_assumptions(MergerAssumptions::default().with_synergy(5000.0))
            .evaluate()
            .unwrap();
        assert_eq!(rich.verdict, DealVerdict::Accretive);
        let none = MergerModel::new(&case)
            .with_assumptions(MergerAssumptions::default().with_synergy(0.0))
            .evaluate()
            .unwrap();
        assert_eq!(none.verdict, DealVerdict::Dilutive);
        assert_eq!(none.verdict.to_string(), "Dilutive");
    }

    #[test]
    fn test_breakeven_floors_at_zero() {
        let mut case = sample_case();
        // target bought cheaply for cash: accretive with no synergies
        case.offer_pe = 5.0;
        let out = MergerModel::new(&case)
            .with_assumptions(MergerAssumptions::default().with_stock_pct(0.0).with_debt_pct(0.0))
            .evaluate()
            .unwrap();
        assert_eq!(out.breakeven_synergy, 0.0);
        assert!(out.accretion > 0.0);
    }

    #[test]
    fn test_overfunded_mix_is_clamped() {
        let mix = ConsiderationMix::new(0.7, 0.6);
        assert_eq!(mix.stock, 0.7);
        assert!((mix.debt - 0.3).abs() < 1e-12);
        assert_eq!(mix.cash, 0.0);
        let negative = ConsiderationMix::new(-0.2, 0.5);
        assert_eq!(negative.stock, 0.0);
        assert_eq!(negative.cash, 0.5);
    }

    #[test]
    fn test_generated_cases_breakeven_property() {
        for i in 0..200 {
            let case = MergerCase::generate(&i.to_string());
            let out = MergerModel::new(&case).evaluate().unwrap();
            if out.breakeven_synergy > 0.0 {
                let at_breakeven = MergerModel::new(&case)
                    .with_assumptions(MergerAssumptions::default().with_synergy(out.breakeven_synergy))
                    .evaluate()
                    .unwrap();
                assert!(at_breakeven.accretion.abs() < 1e-9);
            }
        }
    }
}
