use serde::{Deserialize, Serialize};

use super::traits::CaseGenerator;
use crate::random::{seededstream::SeededStream, traits::RandomNumberGenerator};

pub const TICKERS: [&str; 8] = [
    "ALFA", "BRAV", "CHAR", "DELT", "ECHO", "FOXT", "GOLF", "HOTL",
];

/// # Instrument
/// A tradable name with expected annual return `mu` and volatility `sigma`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub ticker: String,
    pub mu: f64,
    pub sigma: f64,
}

/// # HedgeFundUniverse
/// The fixed set of instruments available to the long/short book.
///
/// ## Example
/// ```
/// use finatlas::prelude::*;
/// let universe = HedgeFundUniverse::generate("1001");
/// assert_eq!(universe.len(), 8);
/// assert_eq!(universe.instruments()[0].ticker, "ALFA");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HedgeFundUniverse {
    instruments: Vec<Instrument>,
}

impl HedgeFundUniverse {
    pub fn new(instruments: Vec<Instrument>) -> HedgeFundUniverse {
        HedgeFundUniverse { instruments }
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

impl CaseGenerator for HedgeFundUniverse {
    const SEED_PREFIX: &'static str = "HF";

    fn from_stream(stream: &mut SeededStream) -> Self {
        let instruments = TICKERS
            .iter()
            .map(|ticker| Instrument {
                ticker: ticker.to_string(),
                mu: stream.gen_range(-0.05, 0.15, 3),
                sigma: stream.gen_range(0.1, 0.4, 3),
            })
            .collect();
        HedgeFundUniverse { instruments }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mu_then_sigma_per_ticker() {
        let universe = HedgeFundUniverse::generate("abc");
        let mut stream = SeededStream::new("HFabc");
        for instrument in universe.instruments() {
            assert_eq!(instrument.mu, stream.gen_range(-0.05, 0.15, 3));
            assert_eq!(instrument.sigma, stream.gen_range(0.1, 0.4, 3));
        }
    }

    #[test]
    fn test_generation_ranges() {
        for i in 0..300 {
            let universe = HedgeFundUniverse::generate(&i.to_string());
            for instrument in universe.instruments() {
                assert!((-0.05..=0.15).contains(&instrument.mu));
                assert!((0.1..=0.4).contains(&instrument.sigma));
            }
        }
    }
}
