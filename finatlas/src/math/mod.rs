pub mod interpolation;
pub mod rounding;
