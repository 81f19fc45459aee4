pub mod dcfmodel;
pub mod hedgefundmodel;
pub mod lbomodel;
pub mod mergermodel;
pub mod traits;
pub mod venturemodel;
