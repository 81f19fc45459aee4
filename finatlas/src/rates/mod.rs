pub mod interestrate;
