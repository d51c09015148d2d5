//! Events and commands exchanged between the dashboard reducer and its driver.

use crate::commitments::AssetClassFilter;
use crate::errors::Result;
use crate::investors::{InvestorDetail, InvestorSummary};

/// Identifies one issued fetch. Increases monotonically per dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// A detail fetch issued for a selected investor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRequest {
    pub id: RequestId,
    pub investor_id: i64,
}

/// Inputs to [`super::DashboardState::handle`].
#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// The dashboard was shown for the first time.
    Mounted,
    /// The user asked to reload the investors list.
    Refresh,
    InvestorSelected(i64),
    FilterSelected(AssetClassFilter),
    InvestorsLoaded {
        request: RequestId,
        result: Result<Vec<InvestorSummary>>,
    },
    DetailLoaded {
        request: DetailRequest,
        result: Result<InvestorDetail>,
    },
}

/// Fetches the reducer asks its driver to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardCommand {
    FetchInvestors(RequestId),
    FetchInvestorDetail(DetailRequest),
}
