use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use super::{ApiError, AppState};
use crate::core::{summarize_funnel, ReputationInputs, ReputationReport};
use crate::models::ReputationScoreRequest;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/reputation/score", web::post().to(score_inputs))
        .route("/clinics/{clinic_id}/reputation", web::get().to(clinic_reputation));
}

/// Score explicit, already aggregated inputs
///
/// POST /api/v1/reputation/score
///
/// Request body:
/// ```json
/// {
///   "avgRating": 4.6,
///   "last30DayPositiveCount": 7,
///   "previous30DayPositiveCount": 4,
///   "unrepliedCount": 2,
///   "totalReviewCount": 40,
///   "totalFunnelEvents": 25,
///   "positiveFunnelEvents": 21
/// }
/// ```
async fn score_inputs(req: web::Json<ReputationScoreRequest>) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let inputs = ReputationInputs {
        avg_rating: req.avg_rating,
        last_30_day_positive_count: req.last_30_day_positive_count,
        unreplied_count: req.unreplied_count,
        total_review_count: req.total_review_count,
        total_funnel_events: req.total_funnel_events,
        positive_funnel_events: req.positive_funnel_events,
    };

    let report = ReputationReport::from_inputs(inputs, req.previous_30_day_positive_count);
    Ok(HttpResponse::Ok().json(report))
}

/// Reputation report for a stored clinic
///
/// GET /api/v1/clinics/{clinic_id}/reputation
async fn clinic_reputation(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let clinic_id = path.into_inner();
    let limits = &state.reputation;

    let rating = state.postgres.get_clinic_rating(clinic_id).await?;
    let events = state
        .postgres
        .get_funnel_events(clinic_id, limits.funnel_event_limit)
        .await?;
    let reviews = state
        .postgres
        .get_google_reviews(clinic_id, limits.review_limit)
        .await?;

    let summary = summarize_funnel(&events, &reviews, chrono::Utc::now());
    let report = ReputationReport::from_summary(rating.rating.unwrap_or(0.0), summary);

    tracing::info!(
        "Reputation for clinic {}: {} ({})",
        clinic_id,
        report.score.total_score,
        report.label.as_str()
    );

    Ok(HttpResponse::Ok().json(report))
}
