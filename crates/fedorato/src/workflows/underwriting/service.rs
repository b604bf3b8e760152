use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{Submission, SubmissionId};
use super::evaluation::{Classification, GuidelineThresholds, UnderwritingEngine};
use super::intake::{IntakeGuard, SubmissionDraft, ValidationError};
use super::repository::{
    GuidelineStore, GuidelineStoreError, RepositoryError, SubmissionRecord, SubmissionRepository,
};
use super::summary::TriageSummary;

/// Service composing intake validation, the submission repository, and the rule engine.
///
/// Thresholds are loaded from the guideline store on every classification so a store
/// that is refreshed externally takes effect without restarting.
pub struct TriageService<R, G> {
    guard: IntakeGuard,
    repository: Arc<R>,
    guidelines: Arc<G>,
}

static SUBMISSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_submission_id() -> SubmissionId {
    let id = SUBMISSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SubmissionId(format!("sub-{id:06}"))
}

impl<R, G> TriageService<R, G>
where
    R: SubmissionRepository + 'static,
    G: GuidelineStore + 'static,
{
    pub fn new(repository: Arc<R>, guidelines: Arc<G>) -> Self {
        Self {
            guard: IntakeGuard,
            repository,
            guidelines,
        }
    }

    /// Validate and store a draft. Classification happens separately.
    ///
    /// A supplied id is kept as given; a conflict on it is an error. Drafts without one
    /// get the next generated id that is not already taken.
    pub fn submit(&self, draft: SubmissionDraft) -> Result<SubmissionRecord, TriageServiceError> {
        let supplied = draft.supplied_id();
        let mut submission = self.guard.submission_from_draft(draft)?;

        let stored = match supplied {
            Some(id) => {
                submission.id = id;
                self.repository.insert(SubmissionRecord::pending(submission))?
            }
            None => self.insert_with_generated_id(submission)?,
        };
        info!(submission_id = %stored.submission.id, "submission received");
        Ok(stored)
    }

    fn insert_with_generated_id(
        &self,
        mut submission: Submission,
    ) -> Result<SubmissionRecord, RepositoryError> {
        loop {
            submission.id = next_submission_id();
            match self
                .repository
                .insert(SubmissionRecord::pending(submission.clone()))
            {
                Err(RepositoryError::Conflict) => {
                    debug!(submission_id = %submission.id, "generated id taken, skipping");
                }
                outcome => return outcome,
            }
        }
    }

    /// Classify a stored submission and persist the outcome.
    pub fn classify(&self, id: &SubmissionId) -> Result<Classification, TriageServiceError> {
        let mut record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        let engine = self.engine()?;
        let classification = classify_logged(&engine, &record.submission);
        record.classification = Some(classification.clone());
        self.repository.update(record)?;

        Ok(classification)
    }

    /// Classify every record that has no classification yet and return the full inbox.
    pub fn classify_pending(&self) -> Result<Vec<SubmissionRecord>, TriageServiceError> {
        let mut records = self.repository.list()?;
        if records.iter().all(|record| record.classification.is_some()) {
            return Ok(records);
        }

        let engine = self.engine()?;
        for record in records
            .iter_mut()
            .filter(|record| record.classification.is_none())
        {
            record.classification = Some(classify_logged(&engine, &record.submission));
            self.repository.update(record.clone())?;
        }

        Ok(records)
    }

    /// Validate and classify a draft without storing it.
    pub fn preview(&self, draft: SubmissionDraft) -> Result<Classification, TriageServiceError> {
        let submission = self.guard.submission_from_draft(draft)?;
        let engine = self.engine()?;
        Ok(engine.evaluate(&submission))
    }

    pub fn get(&self, id: &SubmissionId) -> Result<SubmissionRecord, TriageServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn inbox(&self) -> Result<Vec<SubmissionRecord>, TriageServiceError> {
        Ok(self.repository.list()?)
    }

    pub fn summary(&self) -> Result<TriageSummary, TriageServiceError> {
        let records = self.repository.list()?;
        Ok(TriageSummary::from_records(&records))
    }

    pub fn guidelines(&self) -> Result<GuidelineThresholds, TriageServiceError> {
        Ok(self.guidelines.load()?)
    }

    fn engine(&self) -> Result<UnderwritingEngine, TriageServiceError> {
        Ok(UnderwritingEngine::new(self.guidelines.load()?))
    }
}

fn classify_logged(engine: &UnderwritingEngine, submission: &Submission) -> Classification {
    let classification = engine.evaluate(submission);
    info!(
        submission_id = %submission.id,
        verdict = classification.verdict.label(),
        rule = classification.triggered_rule.map(|rule| rule.label()).unwrap_or("none"),
        "submission classified"
    );
    for advisory in &classification.advisories {
        debug!(submission_id = %submission.id, advisory = %advisory.message(), "advisory raised");
    }
    classification
}

/// Error raised by the triage service.
#[derive(Debug, thiserror::Error)]
pub enum TriageServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Guidelines(#[from] GuidelineStoreError),
}
