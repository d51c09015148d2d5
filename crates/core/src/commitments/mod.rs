//! Commitments module - per asset class aggregation and filtering.
//!
//! Everything here is a pure function of an investor snapshot. Callers
//! recompute on every change instead of keeping aggregates in sync.

mod aggregation;
mod commitments_model;

pub use aggregation::*;
pub use commitments_model::*;
