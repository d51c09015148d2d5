//! Event reducer holding the dashboard's view state.

use log::{debug, error};

use crate::commitments::{
    filter_by_asset_class, filter_options, summarize_by_asset_class, validate_commitment_totals,
    AssetClassFilter, AssetClassSummary, FilterOption,
};
use crate::investors::{Commitment, InvestorDetail, InvestorSummary};

use super::{DashboardCommand, DashboardEvent, DetailRequest, LoadState, RequestId};

/// View state of the dashboard.
///
/// Only fetched snapshots are stored. Summaries, filter options and the
/// visible commitments are derived on every call.
#[derive(Debug, Default)]
pub struct DashboardState {
    investors: LoadState<Vec<InvestorSummary>>,
    selected_investor: Option<i64>,
    detail: LoadState<InvestorDetail>,
    active_filter: AssetClassFilter,
    pending_investors: Option<RequestId>,
    pending_detail: Option<DetailRequest>,
    next_request: u64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one event and returns the fetch it requires, if any.
    ///
    /// Completions are only applied when they answer the latest request of
    /// their kind. A response for an investor that is no longer selected is
    /// dropped, whatever order responses arrive in.
    pub fn handle(&mut self, event: DashboardEvent) -> Option<DashboardCommand> {
        match event {
            DashboardEvent::Mounted | DashboardEvent::Refresh => {
                let request = self.next_request_id();
                self.investors = LoadState::Loading;
                self.pending_investors = Some(request);
                Some(DashboardCommand::FetchInvestors(request))
            }
            DashboardEvent::InvestorSelected(investor_id) => self.select_investor(investor_id),
            DashboardEvent::FilterSelected(filter) => {
                debug!("Asset class filter set to '{}'", filter);
                self.active_filter = filter;
                None
            }
            DashboardEvent::InvestorsLoaded { request, result } => {
                if self.pending_investors != Some(request) {
                    debug!("Ignoring stale investors response {:?}", request);
                    return None;
                }
                self.pending_investors = None;
                if let Err(e) = &result {
                    error!("Failed to fetch investors: {}", e);
                }
                self.investors = result.into();
                None
            }
            DashboardEvent::DetailLoaded { request, result } => {
                if self.pending_detail != Some(request) {
                    debug!(
                        "Ignoring stale detail response for investor {} ({:?})",
                        request.investor_id, request.id
                    );
                    return None;
                }
                self.pending_detail = None;
                let result = result.and_then(|detail| {
                    validate_commitment_totals(&detail)?;
                    Ok(detail)
                });
                if let Err(e) = &result {
                    error!(
                        "Failed to fetch details for investor {}: {}",
                        request.investor_id, e
                    );
                }
                self.detail = result.into();
                None
            }
        }
    }

    fn select_investor(&mut self, investor_id: i64) -> Option<DashboardCommand> {
        let unchanged = self.selected_investor == Some(investor_id)
            && (self.detail.is_loading() || self.detail.is_loaded());
        if unchanged {
            debug!("Investor {} already selected", investor_id);
            return None;
        }

        let request = DetailRequest {
            id: self.next_request_id(),
            investor_id,
        };
        self.selected_investor = Some(investor_id);
        self.active_filter = AssetClassFilter::All;
        self.detail = LoadState::Loading;
        self.pending_detail = Some(request);
        Some(DashboardCommand::FetchInvestorDetail(request))
    }

    fn next_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }

    pub fn investors(&self) -> &LoadState<Vec<InvestorSummary>> {
        &self.investors
    }

    pub fn selected_investor(&self) -> Option<i64> {
        self.selected_investor
    }

    pub fn detail(&self) -> &LoadState<InvestorDetail> {
        &self.detail
    }

    pub fn active_filter(&self) -> &AssetClassFilter {
        &self.active_filter
    }

    /// The detail request whose response will be applied, if one is outstanding.
    pub fn pending_detail(&self) -> Option<DetailRequest> {
        self.pending_detail
    }

    /// Per asset class totals of the loaded investor; empty when nothing is loaded.
    ///
    /// A loaded detail has passed [`validate_commitment_totals`], so the
    /// summary cannot fail here.
    pub fn asset_class_totals(&self) -> Vec<AssetClassSummary> {
        self.detail
            .as_ref()
            .and_then(|detail| summarize_by_asset_class(&detail.commitments).ok())
            .unwrap_or_default()
    }

    /// Commitments of the loaded investor that pass the active filter.
    pub fn visible_commitments(&self) -> Vec<Commitment> {
        self.detail
            .as_ref()
            .map(|detail| filter_by_asset_class(&detail.commitments, &self.active_filter))
            .unwrap_or_default()
    }

    pub fn filter_options(&self) -> Vec<FilterOption> {
        self.detail
            .as_ref()
            .and_then(|detail| filter_options(detail).ok())
            .unwrap_or_default()
    }
}
