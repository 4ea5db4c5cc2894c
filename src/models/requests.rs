use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::core::listing::BusinessHoursPeriod;

/// Request to parse or match a free-text address
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddressRequest {
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub address: Option<String>,
}

/// Request to score explicit reputation inputs
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_score_counts"))]
pub struct ReputationScoreRequest {
    #[validate(range(min = 0.0, max = 5.0))]
    pub avg_rating: f64,
    #[serde(default)]
    pub last_30_day_positive_count: u32,
    #[serde(default)]
    pub previous_30_day_positive_count: u32,
    #[serde(default)]
    pub unreplied_count: u32,
    #[serde(default)]
    pub total_review_count: u32,
    #[serde(default)]
    pub total_funnel_events: u32,
    #[serde(default)]
    pub positive_funnel_events: u32,
}

fn validate_score_counts(req: &ReputationScoreRequest) -> Result<(), ValidationError> {
    if req.unreplied_count > req.total_review_count {
        let mut err = ValidationError::new("unreplied_exceeds_total");
        err.message = Some("unrepliedCount cannot exceed totalReviewCount".into());
        return Err(err);
    }
    if req.positive_funnel_events > req.total_funnel_events {
        let mut err = ValidationError::new("positive_exceeds_total");
        err.message = Some("positiveFunnelEvents cannot exceed totalFunnelEvents".into());
        return Err(err);
    }
    Ok(())
}

/// Business details picked from a Google Business Profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BusinessListing {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub hours: Option<Vec<BusinessHoursPeriod>>,
}

/// Request to preview the clinic listing created from a business profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListingPreviewRequest {
    #[validate(nested)]
    pub business: BusinessListing,
}
