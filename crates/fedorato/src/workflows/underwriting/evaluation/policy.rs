use serde::{Deserialize, Serialize};

use super::super::domain::{Jurisdiction, Submission};
use super::rules::{RuleKind, CASCADE};
use super::thresholds::GuidelineThresholds;

pub const SAFE_REASONING: &str = "Policy meets all safety criteria.";

/// Triage verdict for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Safe,
    NotSafe,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Verdict::Safe => "SAFE",
            Verdict::NotSafe => "NOT SAFE",
        }
    }
}

/// Non-fatal note raised when a submission falls outside a configured lookup list.
///
/// Advisories travel with the classification and never change the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    UnknownJurisdiction { jurisdiction: Jurisdiction },
    UnrecognizedConstruction { construction_type: String },
}

impl Advisory {
    pub fn message(&self) -> String {
        match self {
            Advisory::UnknownJurisdiction { jurisdiction } => {
                format!("jurisdiction {jurisdiction} is not in the acceptable states list")
            }
            Advisory::UnrecognizedConstruction { construction_type } => {
                format!("construction type '{construction_type}' is not a recognized category")
            }
        }
    }
}

/// Engine output: verdict, the single owning explanation, and the pass-through score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub verdict: Verdict,
    pub reasoning: String,
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggered_rule: Option<RuleKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<Advisory>,
}

impl Classification {
    pub fn is_safe(&self) -> bool {
        self.verdict == Verdict::Safe
    }
}

pub(crate) fn classify(
    submission: &Submission,
    thresholds: &GuidelineThresholds,
) -> Classification {
    let advisories = advisories(submission, thresholds);

    let fired = CASCADE.iter().find_map(|rule| {
        rule.apply(submission, thresholds)
            .map(|reasoning| (rule.kind, reasoning))
    });

    match fired {
        Some((kind, reasoning)) => Classification {
            verdict: Verdict::NotSafe,
            reasoning,
            score: submission.winnability,
            triggered_rule: Some(kind),
            advisories,
        },
        None => Classification {
            verdict: Verdict::Safe,
            reasoning: SAFE_REASONING.to_string(),
            score: submission.winnability,
            triggered_rule: None,
            advisories,
        },
    }
}

fn advisories(submission: &Submission, thresholds: &GuidelineThresholds) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    let jurisdiction = &submission.customer.jurisdiction;
    if !thresholds.acceptable_jurisdictions.is_empty()
        && !thresholds.acceptable_jurisdictions.contains(jurisdiction)
    {
        advisories.push(Advisory::UnknownJurisdiction {
            jurisdiction: jurisdiction.clone(),
        });
    }

    let construction = submission.construction_type.to_ascii_lowercase();
    let recognized = thresholds
        .recognized_construction_types
        .iter()
        .any(|known| construction.contains(&known.to_ascii_lowercase()));
    if !thresholds.recognized_construction_types.is_empty() && !recognized {
        advisories.push(Advisory::UnrecognizedConstruction {
            construction_type: submission.construction_type.clone(),
        });
    }

    advisories
}
