//! Pure risk evaluation (no IO).
//!
//! Input: a fully materialized architecture model constructed elsewhere.
//! Output: risks + per-rule failures + summary data.

#![forbid(unsafe_code)]

pub mod model;
pub mod policy;
pub mod predicates;
pub mod report;

mod engine;
pub mod rules;

pub use engine::{analyze, builtin_rules};

#[cfg(test)]
mod proptest;
#[cfg(test)]
pub(crate) mod test_support;
