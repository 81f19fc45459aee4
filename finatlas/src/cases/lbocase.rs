use serde::{Deserialize, Serialize};

use super::traits::CaseGenerator;
use crate::random::{seededstream::SeededStream, traits::RandomNumberGenerator};

const COMPANY_POOL: [&str; 6] = [
    "Atlas Components",
    "Harbor Services",
    "Northern Tools",
    "BluePeak Systems",
    "VistaHome Retail",
    "Orion Diagnostics",
];

/// # LboCase
/// Entry terms and operating profile of a buyout target. D&A, capex and
/// working-capital build are expressed as fractions of EBITDA.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LboCase {
    pub company: String,
    pub ebitda: f64,
    pub entry_multiple: f64,
    pub exit_multiple: f64,
    pub debt_pct: f64,
    pub interest_rate: f64,
    pub tax_rate: f64,
    pub da_pct_ebitda: f64,
    pub capex_pct_ebitda: f64,
    pub nwc_pct_ebitda: f64,
    pub growth: f64,
}

impl CaseGenerator for LboCase {
    const SEED_PREFIX: &'static str = "LBO";

    fn from_stream(stream: &mut SeededStream) -> Self {
        let company = stream.pick(&COMPANY_POOL).to_string();
        let ebitda = stream.gen_range(200.0, 600.0, 0);
        let entry_multiple = stream.gen_range(8.0, 12.0, 2);
        let exit_multiple = entry_multiple + stream.gen_range(-1.0, 1.0, 2);
        LboCase {
            company,
            ebitda,
            entry_multiple,
            exit_multiple,
            debt_pct: stream.gen_range(0.55, 0.7, 2),
            interest_rate: stream.gen_range(0.07, 0.11, 3),
            tax_rate: stream.gen_range(0.22, 0.28, 3),
            da_pct_ebitda: stream.gen_range(0.04, 0.07, 3),
            capex_pct_ebitda: stream.gen_range(0.2, 0.35, 3),
            nwc_pct_ebitda: stream.gen_range(0.02, 0.06, 3),
            growth: stream.gen_range(0.05, 0.09, 3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_ranges() {
        for i in 0..500 {
            let case = LboCase::generate(&format!("case-{}", i));
            assert!(COMPANY_POOL.contains(&case.company.as_str()));
            assert!((200.0..=600.0).contains(&case.ebitda));
            assert!((8.0..=12.0).contains(&case.entry_multiple));
            assert!((case.exit_multiple - case.entry_multiple).abs() <= 1.0 + 1e-9);
            assert!((0.55..=0.7).contains(&case.debt_pct));
            assert!((0.05..=0.09).contains(&case.growth));
        }
    }

    #[test]
    fn test_modules_are_independent() {
        // same case id, different module prefix
        let lbo = SeededStream::new("LBO1001").next_value();
        let dcf = SeededStream::new("DCF1001").next_value();
        assert_ne!(lbo, dcf);
    }
}
