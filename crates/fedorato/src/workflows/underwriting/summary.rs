use std::collections::BTreeMap;

use serde::Serialize;

use super::evaluation::{RuleKind, Verdict};
use super::repository::SubmissionRecord;

/// Inbox roll-up: verdict counts and which rules are rejecting business.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TriageSummary {
    pub total: usize,
    pub safe: usize,
    pub not_safe: usize,
    pub pending: usize,
    /// Share of classified submissions, one decimal place.
    pub safe_pct: f64,
    pub not_safe_pct: f64,
    pub rejections_by_rule: BTreeMap<RuleKind, usize>,
}

impl TriageSummary {
    pub fn from_records(records: &[SubmissionRecord]) -> Self {
        let mut summary = TriageSummary {
            total: records.len(),
            ..TriageSummary::default()
        };

        for record in records {
            match &record.classification {
                None => summary.pending += 1,
                Some(classification) => match classification.verdict {
                    Verdict::Safe => summary.safe += 1,
                    Verdict::NotSafe => {
                        summary.not_safe += 1;
                        if let Some(rule) = classification.triggered_rule {
                            *summary.rejections_by_rule.entry(rule).or_insert(0) += 1;
                        }
                    }
                },
            }
        }

        let classified = summary.safe + summary.not_safe;
        summary.safe_pct = percentage(summary.safe, classified);
        summary.not_safe_pct = percentage(summary.not_safe, classified);
        summary
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let pct = part as f64 / whole as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}
