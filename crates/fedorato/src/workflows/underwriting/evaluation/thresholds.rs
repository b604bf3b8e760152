use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::super::domain::Jurisdiction;

/// Resolved guideline bounds consumed by the rule cascade.
///
/// Every field has a default, so a partial JSON document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidelineThresholds {
    pub max_tiv: f64,
    pub seismic_building_year_cutoff: i32,
    pub high_risk_jurisdictions: BTreeSet<Jurisdiction>,
    pub min_winnability: u8,
    /// Minimum premium as a percentage of TIV (0.3 means 0.3%).
    pub min_premium_ratio_pct: f64,
    pub frame_construction_tokens: Vec<String>,
    pub frame_building_year_cutoff: i32,
    pub frame_jurisdiction: Jurisdiction,
    /// Jurisdictions the book writes. Empty disables the advisory.
    pub acceptable_jurisdictions: BTreeSet<Jurisdiction>,
    /// Construction categories the guidelines know about. Empty disables the advisory.
    pub recognized_construction_types: Vec<String>,
}

impl Default for GuidelineThresholds {
    fn default() -> Self {
        Self {
            max_tiv: 100_000_000.0,
            seismic_building_year_cutoff: 1950,
            high_risk_jurisdictions: jurisdictions(&["CA", "FL", "TX"]),
            min_winnability: 50,
            min_premium_ratio_pct: 0.3,
            frame_construction_tokens: vec!["frame".to_string()],
            frame_building_year_cutoff: 1970,
            frame_jurisdiction: Jurisdiction::new("CA"),
            acceptable_jurisdictions: jurisdictions(&[
                "OH", "PA", "MD", "CO", "CA", "FL", "NC", "SC", "GA", "VA", "UT",
            ]),
            recognized_construction_types: [
                "frame",
                "joisted masonry",
                "masonry",
                "masonry non combustible",
                "non combustible",
                "steel",
                "concrete",
                "fire resistive",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
        }
    }
}

fn jurisdictions(codes: &[&str]) -> BTreeSet<Jurisdiction> {
    codes.iter().copied().map(Jurisdiction::new).collect()
}
