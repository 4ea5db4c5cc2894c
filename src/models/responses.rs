use serde::{Deserialize, Serialize};

use crate::core::listing::{ClinicHours, ListingPlacement};
use crate::models::domain::{LocationMatch, ParsedAddress};

/// Response for the location match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchLocationResponse {
    pub parsed_address: ParsedAddress,
    pub location_match: LocationMatch,
}

/// Response for the listing preview endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPreviewResponse {
    pub slug: String,
    pub parsed_address: ParsedAddress,
    pub location_match: LocationMatch,
    pub placement: ListingPlacement,
    pub hours: Vec<ClinicHours>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code,
        }
    }
}
