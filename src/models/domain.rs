use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical country row (read-only, owned by the directory system)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: Uuid,
    pub name: String,
    pub code: String,
}

/// Canonical city row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(rename = "countryId")]
    pub country_id: Option<Uuid>,
}

/// Canonical area (neighbourhood) row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(rename = "cityId")]
    pub city_id: Uuid,
}

/// Location components extracted from a free-text address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedAddress {
    pub country: Option<String>,
    pub city: Option<String>,
    pub area: Option<String>,
    pub postal_code: Option<String>,
}

impl ParsedAddress {
    pub fn is_empty(&self) -> bool {
        self.country.is_none() && self.city.is_none() && self.area.is_none() && self.postal_code.is_none()
    }
}

/// How much of an address could be resolved against the canonical tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchConfidence {
    High,
    Medium,
    Low,
    None,
}

impl MatchConfidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }
}

/// Result of matching an address against the canonical location tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMatch {
    pub country_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    pub area_id: Option<Uuid>,
    pub country_name: Option<String>,
    pub city_name: Option<String>,
    pub area_name: Option<String>,
    pub postal_code: Option<String>,
    pub match_confidence: MatchConfidence,
    pub requires_manual_selection: bool,
}

impl Default for LocationMatch {
    fn default() -> Self {
        Self {
            country_id: None,
            city_id: None,
            area_id: None,
            country_name: None,
            city_name: None,
            area_name: None,
            postal_code: None,
            match_confidence: MatchConfidence::None,
            requires_manual_selection: true,
        }
    }
}

/// Review funnel event as recorded by the patient feedback flow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelEvent {
    pub event_type: FunnelEventType,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunnelEventType {
    ThumbsUp,
    ThumbsDown,
    /// Page views, redirects and anything else the funnel logs
    #[serde(other)]
    Other,
}

impl From<&str> for FunnelEventType {
    fn from(value: &str) -> Self {
        match value {
            "thumbs_up" => Self::ThumbsUp,
            "thumbs_down" => Self::ThumbsDown,
            _ => Self::Other,
        }
    }
}

/// Google review as synced for a clinic; only the reply state matters here
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleReview {
    pub reply_status: Option<String>,
}

impl GoogleReview {
    pub fn is_replied(&self) -> bool {
        self.reply_status.as_deref() == Some("posted")
    }
}

/// Average star rating stored on the clinic row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicRating {
    pub rating: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clinic_rating_carries_only_the_rating() {
        let rating = ClinicRating { rating: Some(4.5) };
        assert_eq!(serde_json::to_value(rating).unwrap(), serde_json::json!({ "rating": 4.5 }));

        let unrated: ClinicRating = serde_json::from_str(r#"{"rating": null}"#).unwrap();
        assert_eq!(unrated.rating, None);
    }

    #[test]
    fn test_review_reply_state() {
        let posted = GoogleReview { reply_status: Some("posted".to_string()) };
        let draft = GoogleReview { reply_status: Some("draft".to_string()) };
        assert!(posted.is_replied());
        assert!(!draft.is_replied());
        assert!(!GoogleReview { reply_status: None }.is_replied());
    }
}
