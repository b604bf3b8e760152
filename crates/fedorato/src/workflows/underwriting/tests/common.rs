use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::underwriting::domain::{
    CustomerInfo, Jurisdiction, Submission, SubmissionId, UnderwritingMetrics,
};
use crate::workflows::underwriting::evaluation::{GuidelineThresholds, UnderwritingEngine};
use crate::workflows::underwriting::intake::{CustomerDraft, MetricsDraft, SubmissionDraft};
use crate::workflows::underwriting::repository::{
    GuidelineStore, GuidelineStoreError, RepositoryError, SubmissionRecord, SubmissionRepository,
};
use crate::workflows::underwriting::{underwriting_router, TriageService};

/// Acme Corp from the sample inbox: passes every rule at default thresholds.
pub(super) fn submission(id: &str) -> Submission {
    Submission {
        id: SubmissionId(id.to_string()),
        title: "Acme Corp - General Liability".to_string(),
        broker: "Marsh".to_string(),
        line_of_business: Some("General Liability".to_string()),
        effective_date: NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid date"),
        expiration_date: NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"),
        customer: CustomerInfo {
            name: "Acme Corp".to_string(),
            address: "123 Main St, Anytown, USA".to_string(),
            jurisdiction: Jurisdiction::new("CA"),
        },
        metrics: UnderwritingMetrics {
            tiv: 50_000_000.0,
            total_premium: 200_000.0,
            revenue: "$100M".to_string(),
            employee_count: "500".to_string(),
            claims_history: "No claims in last 3 years".to_string(),
        },
        construction_type: "frame".to_string(),
        oldest_building: 1985,
        winnability: 90,
        missing_data: vec!["Employee count".to_string()],
    }
}

pub(super) struct Scenario {
    pub(super) tiv: f64,
    pub(super) premium: f64,
    pub(super) winnability: u8,
    pub(super) year: i32,
    pub(super) construction: &'static str,
    pub(super) state: &'static str,
}

pub(super) fn scenario(scenario: Scenario) -> Submission {
    let mut submission = submission("scenario");
    submission.metrics.tiv = scenario.tiv;
    submission.metrics.total_premium = scenario.premium;
    submission.winnability = scenario.winnability;
    submission.oldest_building = scenario.year;
    submission.construction_type = scenario.construction.to_string();
    submission.customer.jurisdiction = Jurisdiction::new(scenario.state);
    submission
}

pub(super) fn thresholds() -> GuidelineThresholds {
    GuidelineThresholds::default()
}

pub(super) fn engine() -> UnderwritingEngine {
    UnderwritingEngine::new(thresholds())
}

pub(super) fn draft() -> SubmissionDraft {
    SubmissionDraft {
        id: None,
        title: Some("Cyberdyne Systems - Cyber Security".to_string()),
        broker: Some("Broker: Aon".to_string()),
        line_of_business: Some("Cyber Security".to_string()),
        effective_date: Some("10/15/2025".to_string()),
        expiration_date: Some("2026-10-15".to_string()),
        customer: CustomerDraft {
            name: Some("Cyberdyne Systems".to_string()),
            address: Some("456 Tech Rd, Future City, USA".to_string()),
            jurisdiction: Some(" tx ".to_string()),
        },
        metrics: MetricsDraft {
            tiv: Some(80_000_000.0),
            total_premium: Some(300_000.0),
            revenue: Some("$5B".to_string()),
            employee_count: Some("10000".to_string()),
            claims_history: Some("1 claim in last 5 years".to_string()),
        },
        construction_type: Some("Concrete".to_string()),
        oldest_building: Some(2005),
        winnability: Some(95),
        missing_data: vec!["Cyber security audit report".to_string()],
    }
}

pub(super) fn low_winnability_draft() -> SubmissionDraft {
    let mut draft = draft();
    draft.winnability = Some(40);
    draft
}

pub(super) fn build_service() -> (
    TriageService<MemoryRepository, MemoryGuidelines>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let guidelines = Arc::new(MemoryGuidelines(thresholds()));
    let service = TriageService::new(repository.clone(), guidelines);
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<Vec<SubmissionRecord>>>,
}

impl SubmissionRepository for MemoryRepository {
    fn insert(&self, record: SubmissionRecord) -> Result<SubmissionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.submission.id == record.submission.id)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: SubmissionRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard
            .iter_mut()
            .find(|existing| existing.submission.id == record.submission.id)
        {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &SubmissionId) -> Result<Option<SubmissionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .find(|record| &record.submission.id == id)
            .cloned())
    }

    fn list(&self) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        Ok(self.records.lock().expect("repository mutex poisoned").clone())
    }
}

pub(super) struct MemoryGuidelines(pub(super) GuidelineThresholds);

impl GuidelineStore for MemoryGuidelines {
    fn load(&self) -> Result<GuidelineThresholds, GuidelineStoreError> {
        Ok(self.0.clone())
    }
}

pub(super) struct OfflineGuidelines;

impl GuidelineStore for OfflineGuidelines {
    fn load(&self) -> Result<GuidelineThresholds, GuidelineStoreError> {
        Err(GuidelineStoreError::Unavailable("firestore offline".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl SubmissionRepository for UnavailableRepository {
    fn insert(&self, _record: SubmissionRecord) -> Result<SubmissionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: SubmissionRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SubmissionId) -> Result<Option<SubmissionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: TriageService<MemoryRepository, MemoryGuidelines>,
) -> axum::Router {
    underwriting_router(Arc::new(service))
}
