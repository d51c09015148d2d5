//! Investor Dashboard Client - HTTP data source for the investors API.
//!
//! Implements [`InvestorDataSourceTrait`](investor_dashboard_core::InvestorDataSourceTrait)
//! on top of `reqwest`.

mod client;

pub use client::{InvestorApiClient, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
