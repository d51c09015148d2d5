use crate::errors::Result;
use crate::investors::investors_model::{InvestorDetail, InvestorSummary};
use async_trait::async_trait;

/// Read-only source of investor records.
///
/// Implemented over HTTP by the client crate; tests provide in-memory versions.
#[async_trait]
pub trait InvestorDataSourceTrait: Send + Sync {
    /// Lists every investor known to the service.
    async fn list_investors(&self) -> Result<Vec<InvestorSummary>>;

    /// Fetches one investor together with their commitments.
    ///
    /// A missing investor surfaces as a transport error for which
    /// [`crate::Error::is_not_found`] returns true.
    async fn get_investor_detail(&self, investor_id: i64) -> Result<InvestorDetail>;
}
