mod policy;
mod rules;
mod thresholds;

pub use policy::{Advisory, Classification, Verdict, SAFE_REASONING};
pub use rules::{premium_ratio_pct, RuleKind};
pub use thresholds::GuidelineThresholds;

use super::domain::Submission;

/// Classify one submission against resolved thresholds.
///
/// Pure and infallible: the same inputs always produce the same classification, and
/// neither input is retained.
pub fn evaluate(submission: &Submission, thresholds: &GuidelineThresholds) -> Classification {
    policy::classify(submission, thresholds)
}

/// Stateless evaluator bound to one set of guideline thresholds.
#[derive(Debug, Clone)]
pub struct UnderwritingEngine {
    thresholds: GuidelineThresholds,
}

impl UnderwritingEngine {
    pub fn new(thresholds: GuidelineThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &GuidelineThresholds {
        &self.thresholds
    }

    pub fn evaluate(&self, submission: &Submission) -> Classification {
        evaluate(submission, &self.thresholds)
    }

    /// Classify a batch, preserving input order.
    pub fn evaluate_batch(&self, submissions: &[Submission]) -> Vec<Classification> {
        submissions
            .iter()
            .map(|submission| self.evaluate(submission))
            .collect()
    }
}

impl Default for UnderwritingEngine {
    fn default() -> Self {
        Self::new(GuidelineThresholds::default())
    }
}
