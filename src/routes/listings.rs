use actix_web::{web, HttpResponse};
use validator::Validate;

use super::{ApiError, AppState};
use crate::core::{normalize_business_hours, placement_for, slugify, unique_slug};
use crate::models::{ListingPreviewRequest, ListingPreviewResponse};

/// Slug base for names without a single ASCII letter or digit
const FALLBACK_SLUG: &str = "clinic";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/listings/preview", web::post().to(preview_listing));
}

/// Show what a clinic listing created from a business profile would look like
///
/// POST /api/v1/listings/preview
///
/// Nothing is written; the slug is only unique at the time of the call.
async fn preview_listing(
    state: web::Data<AppState>,
    req: web::Json<ListingPreviewRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;
    let business = &req.business;

    let resolution = state.locations.resolve(business.address.as_deref()).await?;

    let mut base = slugify(&business.name);
    if base.is_empty() {
        base = FALLBACK_SLUG.to_string();
    }
    let existing = state.postgres.get_slugs_with_prefix(&base).await?;
    let slug = unique_slug(&base, &existing);

    let hours = business
        .hours
        .as_deref()
        .map(normalize_business_hours)
        .unwrap_or_default();

    tracing::debug!("Listing preview for {:?}: slug={}", business.name, slug);

    Ok(HttpResponse::Ok().json(ListingPreviewResponse {
        slug,
        placement: placement_for(&resolution.location),
        parsed_address: resolution.parsed,
        location_match: resolution.location,
        hours,
    }))
}
