use serde::{Deserialize, Serialize};

use super::traits::CaseGenerator;
use crate::random::{seededstream::SeededStream, traits::RandomNumberGenerator};

const COMPANY_POOL: [&str; 6] = [
    "Northland Foods plc",
    "MetroMart Group",
    "BritFresh Beverages",
    "Crown Household plc",
    "Greenfield Staples",
    "PrimeCare & Home",
];

/// # DcfCase
/// Operating assumptions of a company to value with a five-year DCF.
/// Monetary values are in millions.
///
/// ## Example
/// ```
/// use finatlas::prelude::*;
/// let case = DcfCase::generate("1001");
/// assert_eq!(case, DcfCase::generate("1001"));
/// assert!(case.wacc > case.terminal_growth);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DcfCase {
    pub company: String,
    pub revenue: f64,
    pub ebit_margin: f64,
    pub tax_rate: f64,
    pub da_pct: f64,
    pub capex_pct: f64,
    pub nwc_pct: f64,
    pub wacc: f64,
    pub terminal_growth: f64,
    pub net_debt: f64,
    pub shares: f64,
    pub growth_start: f64,
    pub growth_end: f64,
}

impl CaseGenerator for DcfCase {
    const SEED_PREFIX: &'static str = "DCF";

    fn from_stream(stream: &mut SeededStream) -> Self {
        let company = stream.pick(&COMPANY_POOL).to_string();
        DcfCase {
            company,
            revenue: stream.gen_range(3000.0, 8000.0, 0),
            ebit_margin: stream.gen_range(0.1, 0.25, 3),
            tax_rate: stream.gen_range(0.2, 0.28, 3),
            da_pct: stream.gen_range(0.03, 0.06, 3),
            capex_pct: stream.gen_range(0.03, 0.07, 3),
            nwc_pct: stream.gen_range(0.08, 0.15, 3),
            wacc: stream.gen_range(0.07, 0.1, 3),
            terminal_growth: stream.gen_range(0.02, 0.03, 3),
            net_debt: stream.gen_range(500.0, 2000.0, 0),
            shares: stream.gen_range(800.0, 1800.0, 0),
            growth_start: stream.gen_range(0.08, 0.12, 3),
            growth_end: stream.gen_range(0.03, 0.06, 3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_1001_is_reproducible() {
        let a = DcfCase::generate("1001");
        let b = DcfCase::generate("1001");
        assert_eq!(a.revenue.to_bits(), b.revenue.to_bits());
        assert_eq!(a.ebit_margin.to_bits(), b.ebit_margin.to_bits());
        assert_eq!(a.wacc.to_bits(), b.wacc.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_generation_ranges() {
        for i in 0..500 {
            let case = DcfCase::generate(&i.to_string());
            assert!(COMPANY_POOL.contains(&case.company.as_str()));
            assert!((3000.0..=8000.0).contains(&case.revenue));
            assert_eq!(case.revenue.fract(), 0.0);
            assert!((0.1..=0.25).contains(&case.ebit_margin));
            assert!((0.07..=0.1).contains(&case.wacc));
            assert!((0.02..=0.03).contains(&case.terminal_growth));
            assert!((800.0..=1800.0).contains(&case.shares));
            assert!(case.growth_start >= case.growth_end);
        }
    }

    #[test]
    fn test_draw_order_follows_stream() {
        let case = DcfCase::generate("order");
        let mut stream = SeededStream::new("DCForder");
        stream.next_value();
        assert_eq!(case.revenue, stream.gen_range(3000.0, 8000.0, 0));
        assert_eq!(case.ebit_margin, stream.gen_range(0.1, 0.25, 3));
    }

    #[test]
    fn test_serializes() {
        let case = DcfCase::generate("json");
        let json = serde_json::to_string(&case).unwrap();
        let back: DcfCase = serde_json::from_str(&json).unwrap();
        assert_eq!(case, back);
    }
}
