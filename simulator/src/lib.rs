//! Terminal front-end for the finance exercises in `finatlas`: session
//! state with a per-selection case cache, text input parsing, number
//! formatting, configuration and venture run sweeps.

pub mod config;
pub mod display;
pub mod input;
pub mod prelude;
pub mod session;
pub mod sweep;
pub mod utils;
