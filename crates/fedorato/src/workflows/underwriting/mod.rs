//! Submission triage against underwriting guidelines.
//!
//! Drafts pass through [`IntakeGuard`] into typed [`Submission`]s, the rule cascade in
//! [`evaluation`] classifies them, and [`TriageService`] ties both to a submission
//! repository and a guideline store.

pub mod domain;
pub mod evaluation;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;
pub mod summary;

#[cfg(test)]
mod tests;

pub use domain::{CustomerInfo, Jurisdiction, Submission, SubmissionId, UnderwritingMetrics};
pub use evaluation::{
    evaluate, premium_ratio_pct, Advisory, Classification, GuidelineThresholds, RuleKind,
    UnderwritingEngine, Verdict, SAFE_REASONING,
};
pub use intake::{CustomerDraft, IntakeGuard, MetricsDraft, SubmissionDraft, ValidationError};
pub use repository::{
    GuidelineStore, GuidelineStoreError, RepositoryError, SubmissionRecord,
    SubmissionRepository, SubmissionStatusView,
};
pub use router::underwriting_router;
pub use service::{TriageService, TriageServiceError};
pub use summary::TriageSummary;
