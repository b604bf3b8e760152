use fedorato::workflows::underwriting::{
    GuidelineStore, GuidelineStoreError, GuidelineThresholds, RepositoryError, SubmissionId,
    SubmissionRecord, SubmissionRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Inbox kept in arrival order so listings match broker submission order.
#[derive(Default, Clone)]
pub(crate) struct InMemorySubmissionRepository {
    records: Arc<Mutex<Vec<SubmissionRecord>>>,
}

impl SubmissionRepository for InMemorySubmissionRepository {
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
            Some(slot) => {
                *slot = record;
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
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.clone())
    }
}

/// Thresholds resolved once at startup from defaults or `APP_GUIDELINES_PATH`.
#[derive(Debug, Clone, Default)]
pub(crate) struct StaticGuidelineStore {
    thresholds: GuidelineThresholds,
}

impl StaticGuidelineStore {
    pub(crate) fn new(thresholds: GuidelineThresholds) -> Self {
        Self { thresholds }
    }
}

impl GuidelineStore for StaticGuidelineStore {
    fn load(&self) -> Result<GuidelineThresholds, GuidelineStoreError> {
        Ok(self.thresholds.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::sample_inbox;
    use fedorato::workflows::underwriting::IntakeGuard;

    fn pending_record(index: usize) -> SubmissionRecord {
        let draft = sample_inbox().swap_remove(index);
        let submission = IntakeGuard
            .submission_from_draft(draft)
            .expect("sample drafts are valid");
        SubmissionRecord::pending(submission)
    }

    #[test]
    fn repository_lists_in_insertion_order() {
        let repository = InMemorySubmissionRepository::default();
        repository.insert(pending_record(2)).expect("insert");
        repository.insert(pending_record(0)).expect("insert");

        let ids: Vec<String> = repository
            .list()
            .expect("list")
            .into_iter()
            .map(|record| record.submission.id.0)
            .collect();

        assert_eq!(ids, vec!["3".to_string(), "1".to_string()]);
    }

    #[test]
    fn repository_rejects_duplicates_and_unknown_updates() {
        let repository = InMemorySubmissionRepository::default();
        repository.insert(pending_record(0)).expect("insert");

        assert!(matches!(
            repository.insert(pending_record(0)),
            Err(RepositoryError::Conflict)
        ));
        assert!(matches!(
            repository.update(pending_record(1)),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn static_store_returns_configured_thresholds() {
        let mut thresholds = GuidelineThresholds::default();
        thresholds.min_winnability = 70;
        let store = StaticGuidelineStore::new(thresholds);

        assert_eq!(store.load().expect("load").min_winnability, 70);
    }
}
