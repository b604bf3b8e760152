use serde::{Deserialize, Serialize};

use super::domain::{Submission, SubmissionId};
use super::evaluation::{Classification, GuidelineThresholds, Verdict};

/// Repository record pairing a submission with its latest classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub submission: Submission,
    pub classification: Option<Classification>,
}

impl SubmissionRecord {
    pub fn pending(submission: Submission) -> Self {
        Self {
            submission,
            classification: None,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.classification.is_some() {
            "classified"
        } else {
            "pending"
        }
    }

    pub fn status_view(&self) -> SubmissionStatusView {
        let classification = self.classification.as_ref();
        SubmissionStatusView {
            submission_id: self.submission.id.clone(),
            title: self.submission.title.clone(),
            broker: self.submission.broker.clone(),
            status: self.status_label(),
            verdict: classification.map(|outcome| outcome.verdict),
            score: self.submission.winnability,
            reasoning: classification
                .map(|outcome| outcome.reasoning.clone())
                .unwrap_or_else(|| "pending evaluation".to_string()),
            advisories: classification
                .map(|outcome| outcome.advisories.iter().map(|a| a.message()).collect())
                .unwrap_or_default(),
        }
    }
}

/// Submission source the triage service reads from and writes classifications back to.
pub trait SubmissionRepository: Send + Sync {
    fn insert(&self, record: SubmissionRecord) -> Result<SubmissionRecord, RepositoryError>;
    fn update(&self, record: SubmissionRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SubmissionId) -> Result<Option<SubmissionRecord>, RepositoryError>;
    /// All records in insertion order.
    fn list(&self) -> Result<Vec<SubmissionRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to the guideline configuration in effect.
pub trait GuidelineStore: Send + Sync {
    fn load(&self) -> Result<GuidelineThresholds, GuidelineStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GuidelineStoreError {
    #[error("guideline configuration unavailable: {0}")]
    Unavailable(String),
}

/// Dashboard row for a submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionStatusView {
    pub submission_id: SubmissionId,
    pub title: String,
    pub broker: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    pub score: u8,
    pub reasoning: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<String>,
}
