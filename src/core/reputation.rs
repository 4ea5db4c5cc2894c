use serde::{Deserialize, Serialize};

use crate::core::funnel::FunnelSummary;

/// Maximum points from the average star rating
pub const RATING_MAX: u32 = 40;
/// Maximum points from recent positive feedback volume
pub const VELOCITY_MAX: u32 = 25;
/// Maximum points from the review reply rate
pub const RESPONSE_MAX: u32 = 20;
/// Maximum points from the share of positive funnel feedback
pub const SENTIMENT_MAX: u32 = 15;

/// Positive events in the trailing 30 days at which velocity saturates
pub const VELOCITY_SATURATION: f64 = 10.0;

/// Share of a sub-score awarded when there is nothing to judge it by yet
pub const DEFAULT_NO_DATA_CREDIT_RATIO: f64 = 0.5;

const MAX_STAR_RATING: f64 = 5.0;

/// Aggregated counts the reputation score is computed from
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationInputs {
    /// Average star rating, expected in [0, 5]
    pub avg_rating: f64,
    pub last_30_day_positive_count: u32,
    pub unreplied_count: u32,
    pub total_review_count: u32,
    pub total_funnel_events: u32,
    pub positive_funnel_events: u32,
}

impl ReputationInputs {
    pub fn from_summary(avg_rating: f64, summary: &FunnelSummary) -> Self {
        Self {
            avg_rating,
            last_30_day_positive_count: summary.last_30_positive,
            unreplied_count: summary.unreplied_reviews,
            total_review_count: summary.total_reviews,
            total_funnel_events: summary.total_events,
            positive_funnel_events: summary.thumbs_up,
        }
    }
}

/// Composite 0-100 score and the sub-scores it is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationScore {
    pub total_score: u32,
    pub rating_score: u32,
    pub velocity_score: u32,
    pub response_score: u32,
    pub sentiment_score: u32,
}

impl ReputationScore {
    pub fn label(&self) -> ScoreLabel {
        ScoreLabel::for_score(self.total_score)
    }
}

/// Dashboard tier for a total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLabel {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
}

impl ScoreLabel {
    pub fn for_score(score: u32) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::NeedsAttention,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsAttention => "Needs Attention",
        }
    }
}

/// Compute the reputation score from aggregated counts
///
/// Scoring formula (each term rounded, then clamped to its maximum):
/// score = (
///     rating / 5 * 40 +                      # average star rating
///     min(last30Positive / 10, 1) * 25 +     # recent positive feedback
///     replied / reviews * 20 +               # reply rate, 10 with no reviews
///     positive / funnelEvents * 15           # sentiment, 8 with no feedback
/// )
///
/// Inputs are not validated; out-of-range values are clamped rather than
/// rejected, so the result always lies in [0, 100].
pub fn compute_reputation_score(inputs: &ReputationInputs) -> ReputationScore {
    let rating_score = scaled(inputs.avg_rating / MAX_STAR_RATING, RATING_MAX);

    let velocity_ratio = (inputs.last_30_day_positive_count as f64 / VELOCITY_SATURATION).min(1.0);
    let velocity_score = scaled(velocity_ratio, VELOCITY_MAX);

    let response_score = if inputs.total_review_count > 0 {
        let total = inputs.total_review_count as f64;
        let replied = total - inputs.unreplied_count as f64;
        scaled(replied / total, RESPONSE_MAX)
    } else {
        scaled(DEFAULT_NO_DATA_CREDIT_RATIO, RESPONSE_MAX)
    };

    let sentiment_score = if inputs.total_funnel_events > 0 {
        let ratio = inputs.positive_funnel_events as f64 / inputs.total_funnel_events as f64;
        scaled(ratio, SENTIMENT_MAX)
    } else {
        scaled(DEFAULT_NO_DATA_CREDIT_RATIO, SENTIMENT_MAX)
    };

    ReputationScore {
        total_score: rating_score + velocity_score + response_score + sentiment_score,
        rating_score,
        velocity_score,
        response_score,
        sentiment_score,
    }
}

/// Round `ratio * max` half away from zero and clamp into [0, max]
#[inline]
fn scaled(ratio: f64, max: u32) -> u32 {
    let points = (ratio * max as f64).round();
    if points.is_nan() {
        return 0;
    }
    points.clamp(0.0, max as f64) as u32
}

/// Signed change in positive feedback versus the previous 30-day window
#[inline]
pub fn reputation_trend(last_30_positive: u32, previous_30_positive: u32) -> i64 {
    last_30_positive as i64 - previous_30_positive as i64
}

/// Everything the reputation dashboard shows for a clinic
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationReport {
    pub score: ReputationScore,
    pub label: ScoreLabel,
    pub trend: i64,
    pub inputs: ReputationInputs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<FunnelSummary>,
}

impl ReputationReport {
    /// Report for explicit inputs; `previous_30_positive` feeds the trend
    pub fn from_inputs(inputs: ReputationInputs, previous_30_positive: u32) -> Self {
        let score = compute_reputation_score(&inputs);
        Self {
            label: score.label(),
            trend: reputation_trend(inputs.last_30_day_positive_count, previous_30_positive),
            score,
            inputs,
            summary: None,
        }
    }

    /// Report for a clinic from its rating and aggregated funnel activity
    pub fn from_summary(avg_rating: f64, summary: FunnelSummary) -> Self {
        let inputs = ReputationInputs::from_summary(avg_rating, &summary);
        let mut report = Self::from_inputs(inputs, summary.previous_30_positive);
        report.summary = Some(summary);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(
        avg_rating: f64,
        last_30: u32,
        unreplied: u32,
        reviews: u32,
        funnel: u32,
        positive: u32,
    ) -> ReputationInputs {
        ReputationInputs {
            avg_rating,
            last_30_day_positive_count: last_30,
            unreplied_count: unreplied,
            total_review_count: reviews,
            total_funnel_events: funnel,
            positive_funnel_events: positive,
        }
    }

    #[test]
    fn test_perfect_score() {
        let score = compute_reputation_score(&inputs(5.0, 10, 0, 10, 10, 10));
        assert_eq!(score.rating_score, 40);
        assert_eq!(score.velocity_score, 25);
        assert_eq!(score.response_score, 20);
        assert_eq!(score.sentiment_score, 15);
        assert_eq!(score.total_score, 100);
    }

    #[test]
    fn test_no_data_defaults() {
        let score = compute_reputation_score(&inputs(0.0, 0, 0, 0, 0, 0));
        assert_eq!(score.rating_score, 0);
        assert_eq!(score.velocity_score, 0);
        assert_eq!(score.response_score, 10);
        assert_eq!(score.sentiment_score, 8);
        assert_eq!(score.total_score, 18);
    }

    #[test]
    fn test_partial_scores() {
        // 4.2 stars -> 33.6 -> 34; 4 of 10 -> 10; 6 of 8 replied -> 15; 3 of 4 positive -> 11.25 -> 11
        let score = compute_reputation_score(&inputs(4.2, 4, 2, 8, 4, 3));
        assert_eq!(score.rating_score, 34);
        assert_eq!(score.velocity_score, 10);
        assert_eq!(score.response_score, 15);
        assert_eq!(score.sentiment_score, 11);
        assert_eq!(score.total_score, 70);
    }

    #[test]
    fn test_saturation_with_huge_counts() {
        let score = compute_reputation_score(&inputs(5.0, u32::MAX, 0, u32::MAX, u32::MAX, u32::MAX));
        assert_eq!(score.velocity_score, VELOCITY_MAX);
        assert_eq!(score.response_score, RESPONSE_MAX);
        assert_eq!(score.sentiment_score, SENTIMENT_MAX);
        assert!(score.total_score <= 100);
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        let score = compute_reputation_score(&inputs(9.0, 3, 50, 10, 2, 7));
        assert_eq!(score.rating_score, RATING_MAX);
        assert_eq!(score.response_score, 0);
        assert_eq!(score.sentiment_score, SENTIMENT_MAX);

        let negative = compute_reputation_score(&inputs(-3.0, 0, 0, 0, 0, 0));
        assert_eq!(negative.rating_score, 0);

        let nan = compute_reputation_score(&inputs(f64::NAN, 0, 0, 0, 0, 0));
        assert_eq!(nan.rating_score, 0);
    }

    #[test]
    fn test_sub_scores_sum_to_total() {
        for rating in [0.0, 1.3, 2.5, 3.9, 4.7, 5.0] {
            for last_30 in [0, 3, 9, 40] {
                let s = compute_reputation_score(&inputs(rating, last_30, 1, 7, 13, 5));
                assert_eq!(
                    s.total_score,
                    s.rating_score + s.velocity_score + s.response_score + s.sentiment_score
                );
            }
        }
    }

    #[test]
    fn test_score_labels() {
        assert_eq!(ScoreLabel::for_score(100), ScoreLabel::Excellent);
        assert_eq!(ScoreLabel::for_score(80), ScoreLabel::Excellent);
        assert_eq!(ScoreLabel::for_score(79), ScoreLabel::Good);
        assert_eq!(ScoreLabel::for_score(60), ScoreLabel::Good);
        assert_eq!(ScoreLabel::for_score(45), ScoreLabel::Fair);
        assert_eq!(ScoreLabel::for_score(39), ScoreLabel::NeedsAttention);
        assert_eq!(ScoreLabel::NeedsAttention.as_str(), "Needs Attention");
    }

    #[test]
    fn test_trend() {
        assert_eq!(reputation_trend(12, 5), 7);
        assert_eq!(reputation_trend(0, 4), -4);
        assert_eq!(reputation_trend(3, 3), 0);
    }

    #[test]
    fn test_report_from_inputs() {
        let report = ReputationReport::from_inputs(inputs(5.0, 10, 0, 10, 10, 10), 4);
        assert_eq!(report.score.total_score, 100);
        assert_eq!(report.label, ScoreLabel::Excellent);
        assert_eq!(report.trend, 6);
        assert!(report.summary.is_none());
    }
}
