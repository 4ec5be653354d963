//! Meter and timing alignment engine.
//!
//! Parses `meta/meter/@value` once per file, sums `step/@beats` per figure,
//! and checks the totals against the bar length and, for additive meters,
//! the group pattern.

pub mod meter;
pub mod validator;

pub use meter::{parse_meter, Meter};
pub use validator::{validate_collect, validate_document, validate_one};
