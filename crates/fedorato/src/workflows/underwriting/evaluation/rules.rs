use serde::{Deserialize, Serialize};

use super::super::domain::Submission;
use super::thresholds::GuidelineThresholds;

/// Guideline rules in cascade order. The first rule that fires owns the reasoning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    TivCeiling,
    SeismicBuildingAge,
    WinnabilityFloor,
    PricingAdequacy,
    FrameConstructionExposure,
}

impl RuleKind {
    pub const fn ordered() -> [RuleKind; 5] {
        [
            RuleKind::TivCeiling,
            RuleKind::SeismicBuildingAge,
            RuleKind::WinnabilityFloor,
            RuleKind::PricingAdequacy,
            RuleKind::FrameConstructionExposure,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            RuleKind::TivCeiling => "TIV ceiling",
            RuleKind::SeismicBuildingAge => "Old building in high-risk state",
            RuleKind::WinnabilityFloor => "Winnability floor",
            RuleKind::PricingAdequacy => "Pricing adequacy",
            RuleKind::FrameConstructionExposure => "Frame construction exposure",
        }
    }

    /// Evaluate this rule alone, returning its reasoning when the predicate holds.
    pub fn check(self, submission: &Submission, thresholds: &GuidelineThresholds) -> Option<String> {
        CASCADE
            .iter()
            .find(|rule| rule.kind == self)
            .and_then(|rule| rule.apply(submission, thresholds))
    }
}

pub(crate) struct UnderwritingRule {
    pub(crate) kind: RuleKind,
    fires: fn(&Submission, &GuidelineThresholds) -> bool,
    explain: fn(&Submission, &GuidelineThresholds) -> String,
}

impl UnderwritingRule {
    pub(crate) fn apply(
        &self,
        submission: &Submission,
        thresholds: &GuidelineThresholds,
    ) -> Option<String> {
        if (self.fires)(submission, thresholds) {
            Some((self.explain)(submission, thresholds))
        } else {
            None
        }
    }
}

pub(crate) const CASCADE: [UnderwritingRule; 5] = [
    UnderwritingRule {
        kind: RuleKind::TivCeiling,
        fires: |submission, thresholds| submission.metrics.tiv > thresholds.max_tiv,
        explain: |submission, thresholds| {
            format!(
                "TIV of {} exceeds {} limit without special approval",
                submission.metrics.tiv,
                compact_currency(thresholds.max_tiv)
            )
        },
    },
    UnderwritingRule {
        kind: RuleKind::SeismicBuildingAge,
        fires: |submission, thresholds| {
            submission.oldest_building < thresholds.seismic_building_year_cutoff
                && thresholds
                    .high_risk_jurisdictions
                    .contains(&submission.customer.jurisdiction)
        },
        explain: |submission, _| {
            format!(
                "Building from {} in high-risk state {} - too old",
                submission.oldest_building, submission.customer.jurisdiction
            )
        },
    },
    UnderwritingRule {
        kind: RuleKind::WinnabilityFloor,
        fires: |submission, thresholds| submission.winnability < thresholds.min_winnability,
        explain: |submission, thresholds| {
            format!(
                "Winnability score of {} is below minimum threshold of {}",
                submission.winnability, thresholds.min_winnability
            )
        },
    },
    UnderwritingRule {
        kind: RuleKind::PricingAdequacy,
        fires: |submission, thresholds| {
            premium_ratio_pct(submission.metrics.tiv, submission.metrics.total_premium)
                < thresholds.min_premium_ratio_pct
        },
        explain: |submission, thresholds| {
            format!(
                "Premium ratio of {:.2}% is below {}% - inadequate pricing",
                premium_ratio_pct(submission.metrics.tiv, submission.metrics.total_premium),
                thresholds.min_premium_ratio_pct
            )
        },
    },
    UnderwritingRule {
        kind: RuleKind::FrameConstructionExposure,
        fires: |submission, thresholds| {
            has_frame_token(&submission.construction_type, &thresholds.frame_construction_tokens)
                && submission.oldest_building < thresholds.frame_building_year_cutoff
                && submission.customer.jurisdiction == thresholds.frame_jurisdiction
        },
        explain: |_, _| {
            "Frame construction + pre-1970 building + California = high earthquake risk"
                .to_string()
        },
    },
];

/// Premium as a percentage of TIV. Zero when TIV is not positive; never NaN or infinite.
pub fn premium_ratio_pct(tiv: f64, total_premium: f64) -> f64 {
    if tiv <= 0.0 || tiv.is_nan() {
        return 0.0;
    }

    let ratio = total_premium / tiv * 100.0;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

fn has_frame_token(construction_type: &str, tokens: &[String]) -> bool {
    let construction = construction_type.to_ascii_lowercase();
    tokens
        .iter()
        .any(|token| construction.contains(&token.to_ascii_lowercase()))
}

/// Dollar amount in the short form underwriters quote limits in ("$100M", "$2.5B").
///
/// A scale is used only when two decimals of it state the amount exactly; otherwise the
/// next smaller scale is tried, down to the plain dollar figure.
pub(crate) fn compact_currency(amount: f64) -> String {
    const SCALES: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

    for (scale, suffix) in SCALES {
        if amount.abs() < scale {
            continue;
        }
        let scaled = round_cents(amount / scale);
        if (scaled * scale - amount).abs() < 0.005 {
            return format!("${}{}", scaled, suffix);
        }
    }

    format!("${}", amount)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premium_ratio_guards_non_positive_tiv() {
        assert_eq!(premium_ratio_pct(0.0, 0.0), 0.0);
        assert_eq!(premium_ratio_pct(0.0, 50_000.0), 0.0);
        assert_eq!(premium_ratio_pct(-10.0, 50_000.0), 0.0);
        assert_eq!(premium_ratio_pct(f64::NAN, 50_000.0), 0.0);
        assert_eq!(premium_ratio_pct(1_000.0, f64::INFINITY), 0.0);
    }

    #[test]
    fn premium_ratio_is_a_percentage() {
        let ratio = premium_ratio_pct(50_000_000.0, 200_000.0);
        assert!((ratio - 0.4).abs() < 1e-9);
    }

    #[test]
    fn compact_currency_uses_largest_whole_scale() {
        assert_eq!(compact_currency(100_000_000.0), "$100M");
        assert_eq!(compact_currency(2_500_000_000.0), "$2.5B");
        assert_eq!(compact_currency(750_000.0), "$750K");
        assert_eq!(compact_currency(950.0), "$950");
    }

    #[test]
    fn compact_currency_never_rounds_a_limit() {
        assert_eq!(compact_currency(1_999_999.0), "$1999999");
        assert_eq!(compact_currency(999_999_999.0), "$999999999");
        assert_eq!(compact_currency(1_235_000.0), "$1235K");
        assert_eq!(compact_currency(1_100_000.0), "$1.1M");
        assert_eq!(compact_currency(1_250.0), "$1.25K");
        assert_eq!(compact_currency(1_255.5), "$1255.5");
    }

    #[test]
    fn cascade_order_matches_rule_kind_order() {
        let kinds: Vec<RuleKind> = CASCADE.iter().map(|rule| rule.kind).collect();
        assert_eq!(kinds, RuleKind::ordered().to_vec());
    }

    #[test]
    fn frame_token_match_ignores_case() {
        let tokens = vec!["frame".to_string()];
        assert!(has_frame_token("Wood FRAME", &tokens));
        assert!(!has_frame_token("concrete", &tokens));
    }
}
