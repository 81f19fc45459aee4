pub use crate::{
    cases::{dcfcase::*, hedgefundcase::*, lbocase::*, mergercase::*, traits::*, venturecase::*},
    math::{
        interpolation::{linear::*, traits::*},
        rounding::*,
    },
    models::{
        dcfmodel::*, hedgefundmodel::*, lbomodel::*, mergermodel::*, traits::*, venturemodel::*,
    },
    random::{seededstream::*, traits::*},
    rates::interestrate::*,
    utils::errors::*,
};
