//! End-to-end tests for the dashboard controller against an in-memory data source.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use investor_dashboard_core::dashboard::{DashboardController, DashboardEvent};
use investor_dashboard_core::errors::{Error, Result, TransportError};
use investor_dashboard_core::{
    AssetClassFilter, Commitment, InvestorDataSourceTrait, InvestorDetail, InvestorSummary,
};
use rust_decimal_macros::dec;
use tokio::sync::Notify;

// ============================================================================
// Mock Implementations
// ============================================================================

/// Data source whose detail responses are held until the test releases them.
#[derive(Default)]
struct GatedDataSource {
    details: HashMap<i64, InvestorDetail>,
    gates: Mutex<HashMap<i64, Arc<Notify>>>,
    detail_calls: Mutex<Vec<i64>>,
    list_calls: Mutex<usize>,
}

impl GatedDataSource {
    fn with_investors(ids: &[i64]) -> Self {
        let details = ids.iter().map(|&id| (id, detail(id))).collect();
        Self {
            details,
            ..Self::default()
        }
    }

    fn gate(&self, investor_id: i64) -> Arc<Notify> {
        let mut gates = self.gates.lock().unwrap();
        Arc::clone(gates.entry(investor_id).or_default())
    }

    fn release(&self, investor_id: i64) {
        self.gate(investor_id).notify_one();
    }

    fn detail_calls_for(&self, investor_id: i64) -> usize {
        self.detail_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|&&id| id == investor_id)
            .count()
    }
}

#[async_trait]
impl InvestorDataSourceTrait for GatedDataSource {
    async fn list_investors(&self) -> Result<Vec<InvestorSummary>> {
        *self.list_calls.lock().unwrap() += 1;
        let mut investors: Vec<InvestorSummary> =
            self.details.values().map(InvestorDetail::summary).collect();
        investors.sort_by_key(|i| i.id);
        Ok(investors)
    }

    async fn get_investor_detail(&self, investor_id: i64) -> Result<InvestorDetail> {
        self.detail_calls.lock().unwrap().push(investor_id);
        let gate = self.gate(investor_id);
        gate.notified().await;

        self.details.get(&investor_id).cloned().ok_or_else(|| {
            Error::from(TransportError::Status {
                status: 404,
                message: format!("Investor with ID {} not found", investor_id),
            })
        })
    }
}

/// Data source whose calls panic, as a buggy backend adapter would.
struct PanickingDataSource;

#[async_trait]
impl InvestorDataSourceTrait for PanickingDataSource {
    async fn list_investors(&self) -> Result<Vec<InvestorSummary>> {
        panic!("investors backend crashed")
    }

    async fn get_investor_detail(&self, investor_id: i64) -> Result<InvestorDetail> {
        panic!("detail backend crashed for {}", investor_id)
    }
}

fn detail(investor_id: i64) -> InvestorDetail {
    InvestorDetail {
        id: investor_id,
        name: format!("Investor {}", investor_id),
        investor_type: "bank".to_string(),
        country: "United Kingdom".to_string(),
        date_added: NaiveDate::from_ymd_opt(2011, 9, 14).unwrap(),
        total_commitment: dec!(1000000),
        commitments: vec![
            Commitment {
                id: investor_id * 10,
                asset_class: "Equity".to_string(),
                amount: dec!(400000),
                currency: "GBP".to_string(),
            },
            Commitment {
                id: investor_id * 10 + 1,
                asset_class: "Debt".to_string(),
                amount: dec!(600000),
                currency: "GBP".to_string(),
            },
        ],
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_mount_loads_investors() {
    let source = Arc::new(GatedDataSource::with_investors(&[1, 2, 3]));
    let mut controller = DashboardController::new(source.clone());

    controller.dispatch(DashboardEvent::Mounted);
    assert!(controller.state().investors().is_loading());

    controller.settle().await;

    let ids: Vec<i64> = controller
        .state()
        .investors()
        .as_ref()
        .unwrap()
        .iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(*source.list_calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_later_selection_wins_when_earlier_response_arrives_last() {
    let source = Arc::new(GatedDataSource::with_investors(&[7, 9]));
    let mut controller = DashboardController::new(source.clone());

    controller.dispatch(DashboardEvent::InvestorSelected(7));
    controller.dispatch(DashboardEvent::InvestorSelected(9));
    assert_eq!(controller.in_flight(), 2);

    source.release(9);
    assert!(controller.next_update().await);
    assert_eq!(controller.state().detail().as_ref().map(|d| d.id), Some(9));

    source.release(7);
    assert!(controller.next_update().await);

    assert_eq!(controller.in_flight(), 0);
    assert_eq!(controller.state().selected_investor(), Some(9));
    assert_eq!(controller.state().detail().as_ref().map(|d| d.id), Some(9));
    assert_eq!(source.detail_calls_for(7), 1);
    assert_eq!(source.detail_calls_for(9), 1);
}

#[tokio::test]
async fn test_later_selection_wins_when_earlier_response_arrives_first() {
    let source = Arc::new(GatedDataSource::with_investors(&[7, 9]));
    let mut controller = DashboardController::new(source.clone());

    controller.dispatch(DashboardEvent::InvestorSelected(7));
    controller.dispatch(DashboardEvent::InvestorSelected(9));

    source.release(7);
    assert!(controller.next_update().await);
    assert!(controller.state().detail().is_loading());

    source.release(9);
    controller.settle().await;

    assert_eq!(controller.state().detail().as_ref().map(|d| d.id), Some(9));
    assert_eq!(source.detail_calls_for(7), 1);
}

#[tokio::test]
async fn test_missing_investor_surfaces_failure() {
    let source = Arc::new(GatedDataSource::with_investors(&[1]));
    let mut controller = DashboardController::new(source.clone());

    controller.dispatch(DashboardEvent::InvestorSelected(42));
    source.release(42);
    controller.settle().await;

    let error = controller.state().detail().error().cloned();
    assert!(error.is_some_and(|e| e.is_not_found()));
    assert!(controller.state().visible_commitments().is_empty());
}

#[tokio::test]
async fn test_filter_selection_does_not_fetch() {
    let source = Arc::new(GatedDataSource::with_investors(&[5]));
    let mut controller = DashboardController::new(source.clone());

    controller.dispatch(DashboardEvent::InvestorSelected(5));
    source.release(5);
    controller.settle().await;

    controller.dispatch(DashboardEvent::FilterSelected(AssetClassFilter::from_name(
        "Debt",
    )));

    assert_eq!(controller.in_flight(), 0);
    assert!(!controller.next_update().await);
    assert_eq!(source.detail_calls_for(5), 1);

    let visible = controller.state().visible_commitments();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].asset_class, "Debt");
}

#[tokio::test]
async fn test_panicking_fetch_settles_as_failure() {
    let mut controller = DashboardController::new(Arc::new(PanickingDataSource));

    controller.dispatch(DashboardEvent::Mounted);
    controller.dispatch(DashboardEvent::InvestorSelected(3));
    assert_eq!(controller.in_flight(), 2);

    tokio::time::timeout(Duration::from_secs(5), controller.settle())
        .await
        .expect("settle should finish after a fetch panics");

    assert_eq!(controller.in_flight(), 0);
    assert!(matches!(
        controller.state().investors().error(),
        Some(Error::Unexpected(_))
    ));
    assert!(matches!(
        controller.state().detail().error(),
        Some(Error::Unexpected(_))
    ));
}
