//! The `Quine-McCluskey Kit (qmkit)` crate reduces Boolean expressions over named variables
//! to minimal sums of products.
//!
//! Functions are given as expressions or lists of minterms. Their prime implicants are obtained
//! by iterated merging of adjacent terms, then a cover is selected among them: essential implicants
//! first, a greedy choice for the remaining minterms, and a final removal of redundant implicants.

#[macro_use]
extern crate pest_derive;
extern crate thiserror;

pub mod command;
pub mod func;
pub mod helper;
