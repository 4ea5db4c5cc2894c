// Core algorithm exports
pub mod address;
pub mod funnel;
pub mod listing;
pub mod location;
pub mod reputation;
pub mod similarity;

pub use address::{parse_address, KeywordTable};
pub use funnel::{summarize_funnel, FunnelSummary};
pub use listing::{normalize_business_hours, placement_for, slugify, unique_slug, ListingPlacement};
pub use location::{AddressResolution, LocationMatcher};
pub use reputation::{
    compute_reputation_score, reputation_trend, ReputationInputs, ReputationReport, ReputationScore,
    ScoreLabel,
};
pub use similarity::{normalize_for_match, string_similarity};
