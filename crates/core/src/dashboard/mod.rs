//! Dashboard module - explicit load states, the event reducer and its async driver.
//!
//! [`DashboardState`] is a pure reducer: events in, at most one fetch command
//! out. [`DashboardController`] executes those commands against an
//! [`InvestorDataSourceTrait`](crate::investors::InvestorDataSourceTrait) and
//! feeds the results back as events.

mod dashboard_controller;
mod dashboard_model;
mod dashboard_state;
mod load_state;

pub use dashboard_controller::DashboardController;
pub use dashboard_model::{DashboardCommand, DashboardEvent, DetailRequest, RequestId};
pub use dashboard_state::DashboardState;
pub use load_state::LoadState;
