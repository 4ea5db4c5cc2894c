use std::collections::HashSet;

/// Similarity awarded when one normalized name contains the other
pub const CONTAINMENT_SIMILARITY: f64 = 0.8;

/// Normalize text into a slug-like form for name comparison
///
/// Lowercases, drops every character that is neither alphanumeric nor
/// whitespace, joins the remaining words with single hyphens.
///
/// ```
/// use clinic_algo::core::similarity::normalize_for_match;
/// assert_eq!(normalize_for_match("  Jumeirah Lake Towers (JLT) "), "jumeirah-lake-towers-jlt");
/// ```
pub fn normalize_for_match(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    // split_whitespace already skips leading/trailing runs, so no stray hyphens remain
    cleaned.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Score how alike two location names are, in [0, 1]
///
/// 1. Equal after normalization: 1.0
/// 2. Either side empty after normalization: 0.0
/// 3. One contains the other: 0.8
/// 4. Otherwise: distinct shared words / word count of the longer name
pub fn string_similarity(a: &str, b: &str) -> f64 {
    let s1 = normalize_for_match(a);
    let s2 = normalize_for_match(b);

    if s1 == s2 {
        return 1.0;
    }
    if s1.is_empty() || s2.is_empty() {
        return 0.0;
    }
    if s1.contains(&s2) || s2.contains(&s1) {
        return CONTAINMENT_SIMILARITY;
    }

    let words1: Vec<&str> = s1.split('-').collect();
    let words2: Vec<&str> = s2.split('-').collect();
    let set1: HashSet<&str> = words1.iter().copied().collect();
    let set2: HashSet<&str> = words2.iter().copied().collect();

    let common = set1.intersection(&set2).count();
    if common == 0 {
        return 0.0;
    }

    common as f64 / words1.len().max(words2.len()) as f64
}
