//! Async driver for [`DashboardState`].

use std::future::Future;
use std::sync::Arc;

use log::{debug, error};
use tokio::sync::mpsc;

use crate::errors::{Error, Result};
use crate::investors::InvestorDataSourceTrait;

use super::{DashboardCommand, DashboardEvent, DashboardState};

/// Runs fetches for the dashboard and applies their results in arrival order.
///
/// Fetches run as tokio tasks; the state itself is only touched by the owner
/// of the controller, so it needs no locking. Superseded fetches are not
/// cancelled. Their late results are dropped by the reducer.
///
/// [`dispatch`](Self::dispatch) spawns tasks and must be called from within
/// a tokio runtime.
pub struct DashboardController {
    source: Arc<dyn InvestorDataSourceTrait>,
    state: DashboardState,
    sender: mpsc::UnboundedSender<DashboardEvent>,
    receiver: mpsc::UnboundedReceiver<DashboardEvent>,
    in_flight: usize,
}

impl DashboardController {
    pub fn new(source: Arc<dyn InvestorDataSourceTrait>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            source,
            state: DashboardState::new(),
            sender,
            receiver,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Number of fetches started and not yet applied, stale ones included.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Applies a user event and starts the fetch it requires.
    pub fn dispatch(&mut self, event: DashboardEvent) {
        if let Some(command) = self.state.handle(event) {
            self.execute(command);
        }
    }

    /// Waits for the next fetch to finish and applies it.
    ///
    /// Returns `false` without waiting when nothing is in flight.
    pub async fn next_update(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.receiver.recv().await {
            Some(event) => {
                self.in_flight -= 1;
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Waits until every started fetch has been applied.
    pub async fn settle(&mut self) {
        while self.next_update().await {}
    }

    fn execute(&mut self, command: DashboardCommand) {
        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();
        self.in_flight += 1;

        match command {
            DashboardCommand::FetchInvestors(request) => {
                debug!("Fetching investors ({:?})", request);
                tokio::spawn(async move {
                    let result = run_fetch(async move { source.list_investors().await }).await;
                    // The receiver lives as long as the controller
                    let _ = sender.send(DashboardEvent::InvestorsLoaded { request, result });
                });
            }
            DashboardCommand::FetchInvestorDetail(request) => {
                debug!(
                    "Fetching details for investor {} ({:?})",
                    request.investor_id, request.id
                );
                tokio::spawn(async move {
                    let investor_id = request.investor_id;
                    let result =
                        run_fetch(async move { source.get_investor_detail(investor_id).await })
                            .await;
                    let _ = sender.send(DashboardEvent::DetailLoaded { request, result });
                });
            }
        }
    }
}

/// Runs a fetch on its own task so that a panicking data source still
/// produces a completion, keeping `in_flight` accurate.
async fn run_fetch<T, F>(fetch: F) -> Result<T>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    match tokio::spawn(fetch).await {
        Ok(result) => result,
        Err(join_error) => {
            error!("Fetch task did not complete: {}", join_error);
            Err(Error::Unexpected(format!(
                "Fetch task did not complete: {}",
                join_error
            )))
        }
    }
}
