// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Area, City, ClinicRating, Country, FunnelEvent, FunnelEventType, GoogleReview, LocationMatch,
    MatchConfidence, ParsedAddress,
};
pub use requests::{AddressRequest, BusinessListing, ListingPreviewRequest, ReputationScoreRequest};
pub use responses::{ErrorResponse, HealthResponse, ListingPreviewResponse, MatchLocationResponse};
