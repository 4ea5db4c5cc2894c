use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{FunnelEvent, FunnelEventType, GoogleReview};

/// Trailing window used for velocity and trend
pub const VELOCITY_WINDOW_DAYS: i64 = 30;
/// Short window shown next to the velocity figure
pub const WEEK_WINDOW_DAYS: i64 = 7;

/// Counts derived from a clinic's feedback funnel and Google reviews
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelSummary {
    pub total_events: u32,
    pub thumbs_up: u32,
    pub thumbs_down: u32,
    /// Positive share of all funnel events, in percent
    pub conversion_rate: f64,
    pub last_30_positive: u32,
    pub last_30_total: u32,
    pub last_7_positive: u32,
    /// Positive events in [now - 60d, now - 30d)
    pub previous_30_positive: u32,
    pub unreplied_reviews: u32,
    pub total_reviews: u32,
}

/// Aggregate raw funnel events and reviews as of `now`
///
/// Events dated after `now` count towards the totals and the trailing
/// windows alike, matching a plain `created_at >= cutoff` filter.
pub fn summarize_funnel(
    events: &[FunnelEvent],
    reviews: &[GoogleReview],
    now: DateTime<Utc>,
) -> FunnelSummary {
    let last_30_cutoff = now - Duration::days(VELOCITY_WINDOW_DAYS);
    let previous_30_cutoff = now - Duration::days(VELOCITY_WINDOW_DAYS * 2);
    let last_7_cutoff = now - Duration::days(WEEK_WINDOW_DAYS);

    let mut summary = FunnelSummary {
        total_events: events.len() as u32,
        total_reviews: reviews.len() as u32,
        ..FunnelSummary::default()
    };

    for event in events {
        let positive = event.event_type == FunnelEventType::ThumbsUp;

        match event.event_type {
            FunnelEventType::ThumbsUp => summary.thumbs_up += 1,
            FunnelEventType::ThumbsDown => summary.thumbs_down += 1,
            FunnelEventType::Other => {}
        }

        if event.created_at >= last_30_cutoff {
            summary.last_30_total += 1;
            if positive {
                summary.last_30_positive += 1;
            }
        } else if event.created_at >= previous_30_cutoff && positive {
            summary.previous_30_positive += 1;
        }

        if positive && event.created_at >= last_7_cutoff {
            summary.last_7_positive += 1;
        }
    }

    summary.unreplied_reviews = reviews.iter().filter(|r| !r.is_replied()).count() as u32;

    summary.conversion_rate = if summary.total_events > 0 {
        summary.thumbs_up as f64 / summary.total_events as f64 * 100.0
    } else {
        0.0
    };

    summary
}
