pub mod cfpq;
pub mod check;
pub mod common;
pub mod info;
pub mod rpq;
pub mod run;

#[cfg(test)]
mod output_tests;
