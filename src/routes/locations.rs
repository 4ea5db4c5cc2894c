use actix_web::{web, HttpResponse};
use validator::Validate;

use super::{ApiError, AppState};
use crate::core::parse_address;
use crate::models::{AddressRequest, MatchLocationResponse};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/locations/parse", web::post().to(parse_location))
        .route("/locations/match", web::post().to(match_location));
}

/// Split an address into its components without touching the database
///
/// POST /api/v1/locations/parse
///
/// Request body:
/// ```json
/// { "address": "Shop 5, Al Wasl Rd, Jumeirah 1, Dubai, UAE" }
/// ```
async fn parse_location(
    state: web::Data<AppState>,
    req: web::Json<AddressRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let parsed = parse_address(req.address.as_deref(), state.locations.keywords());
    Ok(HttpResponse::Ok().json(parsed))
}

/// Resolve an address to canonical country, city and area rows
///
/// POST /api/v1/locations/match
async fn match_location(
    state: web::Data<AppState>,
    req: web::Json<AddressRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let resolution = state.locations.resolve(req.address.as_deref()).await?;

    Ok(HttpResponse::Ok().json(MatchLocationResponse {
        parsed_address: resolution.parsed,
        location_match: resolution.location,
    }))
}
