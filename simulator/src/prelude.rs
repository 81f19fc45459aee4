pub use crate::{
    config::*,
    display::{format::*, report},
    input::parsing::*,
    session::{cache::*, command::*, state::*, *},
    sweep::*,
    utils::errors::*,
};
