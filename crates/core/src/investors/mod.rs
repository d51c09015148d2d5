//! Investors module - domain models and the data-source trait.

mod investors_model;
mod investors_traits;

pub use investors_model::{Commitment, InvestorDetail, InvestorSummary};
pub use investors_traits::InvestorDataSourceTrait;
