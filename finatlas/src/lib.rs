//! Seeded case generation and valuation engines for the five finance
//! exercises: DCF, LBO, M&A accretion/dilution, long/short portfolio
//! construction and a power-law venture fund.
//!
//! Every engine is a pure function of a generated case plus the current
//! assumptions, so callers can recompute freely without touching the case.

pub mod cases;
pub mod math;
pub mod models;
pub mod prelude;
pub mod random;
pub mod rates;
pub mod utils;
