use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::LocationMatch;

/// Longest slug generated for a clinic
pub const MAX_SLUG_LEN: usize = 80;

const DEFAULT_OPEN: (u8, u8) = (9, 0);
const DEFAULT_CLOSE: (u8, u8) = (18, 0);

/// Location columns written onto a clinic row for a matched address
///
/// A listing is published straight away only when the location was matched
/// down to the area; everything else waits for a manual pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPlacement {
    pub city_id: Option<Uuid>,
    pub area_id: Option<Uuid>,
    pub location_verified: bool,
    pub location_pending_approval: bool,
    pub is_active: bool,
}

pub fn placement_for(location: &LocationMatch) -> ListingPlacement {
    let verified = !location.requires_manual_selection;
    ListingPlacement {
        city_id: location.city_id,
        area_id: location.area_id,
        location_verified: verified,
        location_pending_approval: false,
        is_active: verified,
    }
}

/// Build a URL slug from a clinic name
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut slug = String::with_capacity(lower.len());
    let mut pending_hyphen = false;

    for c in lower.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c == '-' || c.is_whitespace() {
            pending_hyphen = true;
        }
    }

    // ASCII only, so byte truncation is safe
    slug.truncate(MAX_SLUG_LEN);
    slug.trim_end_matches('-').to_string()
}

/// Pick a slug not present in `existing`, suffixing `-2`, `-3`, ... as needed
pub fn unique_slug(base: &str, existing: &[String]) -> String {
    let taken = |candidate: &str| existing.iter().any(|s| s == candidate);

    if !taken(base) {
        return base.to_string();
    }

    let mut counter = 2u32;
    loop {
        let candidate = format!("{}-{}", base, counter);
        if !taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Time of day as reported by Google Business Profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hours: Option<u8>,
    pub minutes: Option<u8>,
}

/// One opening period from a Google Business Profile listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHoursPeriod {
    pub open_day: Option<String>,
    pub open_time: Option<TimeOfDay>,
    pub close_day: Option<String>,
    pub close_time: Option<TimeOfDay>,
}

/// Opening hours row for a clinic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicHours {
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    pub open_time: String,
    pub close_time: String,
    pub is_closed: bool,
}

fn day_number(day: Option<&str>) -> u8 {
    match day.map(str::to_uppercase).as_deref() {
        Some("SUNDAY") => 0,
        Some("MONDAY") => 1,
        Some("TUESDAY") => 2,
        Some("WEDNESDAY") => 3,
        Some("THURSDAY") => 4,
        Some("FRIDAY") => 5,
        Some("SATURDAY") => 6,
        _ => 0,
    }
}

fn format_time(time: Option<&TimeOfDay>, default: (u8, u8)) -> String {
    let hours = time.and_then(|t| t.hours).unwrap_or(default.0);
    let minutes = time.and_then(|t| t.minutes).unwrap_or(default.1);
    format!("{:02}:{:02}", hours, minutes)
}

/// Convert GMB opening periods into clinic hours rows
///
/// Missing times fall back to 09:00-18:00; unknown days map to Sunday.
pub fn normalize_business_hours(periods: &[BusinessHoursPeriod]) -> Vec<ClinicHours> {
    periods
        .iter()
        .map(|period| ClinicHours {
            day_of_week: day_number(period.open_day.as_deref()),
            open_time: format_time(period.open_time.as_ref(), DEFAULT_OPEN),
            close_time: format_time(period.close_time.as_ref(), DEFAULT_CLOSE),
            is_closed: false,
        })
        .collect()
}
