//! Clinic Algo - Location matching and reputation scoring for a dental clinic directory
//!
//! This library resolves free-text Google Business Profile addresses to the
//! directory's canonical country, city and area rows, and computes the 0-100
//! reputation score shown on the clinic dashboard.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{
    compute_reputation_score, parse_address, string_similarity, KeywordTable, LocationMatcher,
    ReputationInputs, ReputationScore,
};
pub use models::{LocationMatch, MatchConfidence, ParsedAddress};
pub use services::{CachedDirectory, DirectoryError, InMemoryDirectory, LocationDirectory, PostgresClient};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let parsed = parse_address(Some("Downtown, Dubai, UAE"), &KeywordTable::builtin());
        assert_eq!(parsed.city.as_deref(), Some("Dubai"));
        assert_eq!(string_similarity("Dubai", "dubai"), 1.0);
    }
}
