//! Header normalization.
//!
//! Uploaded files spell the same column many ways (`fuzzing_idx`,
//! `Fuzzing Idx`, ` TIER `). [`normalize_headers`] maps every known spelling
//! onto the canonical vocabulary in [`crate::fields`] and passes unknown
//! headers through trimmed, so extra columns survive a round trip.

use crate::fields::{
    CANONICAL_FIELDS, CLASSIFICATION, FUZZING_IDX, INDUSTRY, KEYWORDS, PREFIX, PROMPT, RISKS,
    SUB_TOPIC, SUBTOPIC, TIER, TOPIC,
};

/// Lookup key for a header: lower-cased with whitespace runs collapsed to `-`.
pub fn header_key(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

fn alias(key: &str) -> Option<&'static str> {
    let canonical = match key {
        "tier" => TIER,
        "industry" => INDUSTRY,
        "topic" => TOPIC,
        "subtopic" => SUBTOPIC,
        "sub-topic" | "sub_topic" => SUB_TOPIC,
        "prefix" => PREFIX,
        "fuzzing-idx" | "fuzzing_idx" | "fuzzingidx" => FUZZING_IDX,
        "prompt" => PROMPT,
        "risks" => RISKS,
        "keywords" => KEYWORDS,
        "classification" => CLASSIFICATION,
        _ => return None,
    };
    Some(canonical)
}

pub fn normalize_header(header: &str) -> String {
    let trimmed = header.trim();
    // Canonical spellings are fixed points; `SubTopic` must not fold into
    // `Subtopic` through the case-insensitive lookup.
    if CANONICAL_FIELDS.contains(&trimmed) {
        return trimmed.to_string();
    }
    match alias(&header_key(trimmed)) {
        Some(canonical) => canonical.to_string(),
        None => trimmed.to_string(),
    }
}

pub fn normalize_headers<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    headers
        .iter()
        .map(|header| normalize_header(header.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_variations_map_to_canonical_names() {
        let normalized =
            normalize_headers(&["tier", "Industry", "TOPIC", "sub-topic", "fuzzing_idx"]);
        assert_eq!(
            normalized,
            vec!["Tier", "Industry", "Topic", "SubTopic", "Fuzzing-Idx"]
        );
    }

    #[test]
    fn separators_and_spacing_variants() {
        assert_eq!(normalize_header("Fuzzing Idx"), "Fuzzing-Idx");
        assert_eq!(normalize_header("fuzzingidx"), "Fuzzing-Idx");
        assert_eq!(normalize_header("  Sub   Topic "), "SubTopic");
        assert_eq!(normalize_header("sub_topic"), "SubTopic");
        assert_eq!(normalize_header("subTopic"), "Subtopic");
    }

    #[test]
    fn unknown_headers_are_trimmed_only() {
        assert_eq!(
            normalize_headers(&[" CustomField ", "unknown_header"]),
            vec!["CustomField", "unknown_header"]
        );
    }

    #[test]
    fn canonical_headers_are_fixed_points() {
        let canonical: Vec<String> = CANONICAL_FIELDS.iter().map(|s| s.to_string()).collect();
        assert_eq!(normalize_headers(&canonical), canonical);
    }

    #[test]
    fn header_key_collapses_whitespace() {
        assert_eq!(header_key("  Fuzzing \t Idx "), "fuzzing-idx");
    }
}
