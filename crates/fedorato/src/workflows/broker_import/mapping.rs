use super::normalizer::normalize_label;
use std::collections::HashMap;
use std::sync::OnceLock;

static CONSTRUCTION_MAP: OnceLock<HashMap<String, &'static str>> = OnceLock::new();

/// Canonical construction category for a broker's wording, or the normalized text when
/// the wording is unknown.
pub(crate) fn canonical_construction(raw: &str) -> String {
    let normalized = normalize_label(raw);
    match construction_map().get(&normalized) {
        Some(canonical) => canonical.to_string(),
        None => normalized,
    }
}

fn construction_map() -> &'static HashMap<String, &'static str> {
    CONSTRUCTION_MAP.get_or_init(|| {
        const ALIASES: &[(&str, &str)] = &[
            // ISO class 1
            ("Frame", "frame"),
            ("Wood Frame", "frame"),
            ("Wood", "frame"),
            ("ISO 1", "frame"),
            // ISO class 2
            ("JM", "joisted masonry"),
            ("Joisted Masonry", "joisted masonry"),
            ("ISO 2", "joisted masonry"),
            // ISO class 3
            ("NC", "non combustible"),
            ("Non Combustible", "non combustible"),
            ("Non-Combustible", "non combustible"),
            ("Noncombustible", "non combustible"),
            ("Non Combustible/Steel", "steel"),
            ("Steel", "steel"),
            ("ISO 3", "non combustible"),
            // ISO class 4
            ("MNC", "masonry non combustible"),
            ("Masonry Non Combustible", "masonry non combustible"),
            ("Masonry Non-Combustible", "masonry non combustible"),
            ("ISO 4", "masonry non combustible"),
            ("Masonry", "masonry"),
            // ISO classes 5 and 6
            ("MFR", "fire resistive"),
            ("Modified Fire Resistive", "fire resistive"),
            ("Fire Resistive", "fire resistive"),
            ("ISO 5", "fire resistive"),
            ("ISO 6", "fire resistive"),
            ("Concrete", "concrete"),
            ("Reinforced Concrete", "concrete"),
        ];

        let mut map = HashMap::with_capacity(ALIASES.len());
        for (alias, canonical) in ALIASES {
            map.insert(normalize_label(alias), *canonical);
        }
        map
    })
}

#[cfg(test)]
pub(crate) fn lookup_for_tests(raw: &str) -> String {
    canonical_construction(raw)
}
