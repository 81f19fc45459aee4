pub mod dcfcase;
pub mod hedgefundcase;
pub mod lbocase;
pub mod mergercase;
pub mod traits;
pub mod venturecase;
