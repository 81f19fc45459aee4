use serde::{Deserialize, Serialize};

use super::traits::CaseGenerator;
use crate::random::{seededstream::SeededStream, traits::RandomNumberGenerator};

const ACQUIRER_POOL: [&str; 4] = [
    "Britannia Consumer plc",
    "NorthRiver Tech",
    "Union Transport",
    "Crown Health plc",
];

const TARGET_POOL: [&str; 4] = [
    "DailyFresh Ltd",
    "SwiftWare Ltd",
    "Arcadia Devices",
    "Coastal Care Ltd",
];

/// # MergerCase
/// Standalone figures of an acquirer and a target, plus offer terms.
/// Share counts and synergies are in millions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergerCase {
    pub acquirer: String,
    pub target: String,
    pub tax_rate: f64,
    pub acquirer_pe: f64,
    pub acquirer_eps: f64,
    pub acquirer_shares: f64,
    pub target_eps: f64,
    pub target_shares: f64,
    pub offer_pe: f64,
    pub cost_of_debt: f64,
    pub base_synergy: f64,
}

impl MergerCase {
    pub fn acquirer_price(&self) -> f64 {
        self.acquirer_eps * self.acquirer_pe
    }

    pub fn acquirer_net_income(&self) -> f64 {
        self.acquirer_eps * self.acquirer_shares
    }

    pub fn target_net_income(&self) -> f64 {
        self.target_eps * self.target_shares
    }

    /// Purchase price of the target's equity at the offer P/E.
    pub fn target_equity_value(&self) -> f64 {
        self.target_eps * self.offer_pe * self.target_shares
    }
}

impl CaseGenerator for MergerCase {
    const SEED_PREFIX: &'static str = "MNA";

    fn from_stream(stream: &mut SeededStream) -> Self {
        let acquirer = stream.pick(&ACQUIRER_POOL).to_string();
        let target = stream.pick(&TARGET_POOL).to_string();
        MergerCase {
            acquirer,
            target,
            tax_rate: stream.gen_range(0.22, 0.27, 3),
            acquirer_pe: stream.gen_range(12.0, 22.0, 2),
            acquirer_eps: stream.gen_range(1.2, 3.5, 2),
            acquirer_shares: stream.gen_range(600.0, 1600.0, 0),
            target_eps: stream.gen_range(0.6, 2.0, 2),
            target_shares: stream.gen_range(200.0, 800.0, 0),
            offer_pe: stream.gen_range(14.0, 22.0, 2),
            cost_of_debt: stream.gen_range(0.05, 0.09, 3),
            base_synergy: stream.gen_range(50.0, 300.0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_figures() {
        let case = MergerCase::generate("1001");
        assert_eq!(case.acquirer_price(), case.acquirer_eps * case.acquirer_pe);
        assert_eq!(
            case.target_equity_value(),
            case.target_eps * case.offer_pe * case.target_shares
        );
    }

    #[test]
    fn test_generation_ranges() {
        for i in 0..300 {
            let case = MergerCase::generate(&i.to_string());
            assert!(ACQUIRER_POOL.contains(&case.acquirer.as_str()));
            assert!(TARGET_POOL.contains(&case.target.as_str()));
            assert!((0.22..=0.27).contains(&case.tax_rate));
            assert!((14.0..=22.0).contains(&case.offer_pe));
            assert!((50.0..=300.0).contains(&case.base_synergy));
        }
    }
}
