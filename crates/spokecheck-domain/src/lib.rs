//! Pure topology evaluation (no IO).
//!
//! Input: a topology snapshot assembled by a fact provider elsewhere.
//! Output: ordered findings + connectivity verdict, and a composed summary.

#![forbid(unsafe_code)]

pub mod fingerprint;
pub mod model;
pub mod policy;
pub mod report;
pub mod summary;

mod engine;
pub mod checks;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod test_support;

pub use engine::{evaluate, evaluate_with};
pub use summary::{summarize, DisplaySymbol, NO_ISSUES_NARRATIVE};
