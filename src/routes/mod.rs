// Route exports
pub mod health;
pub mod listings;
pub mod locations;
pub mod reputation;

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use std::sync::Arc;
use thiserror::Error;

use crate::config::ReputationSettings;
use crate::core::LocationMatcher;
use crate::models::ErrorResponse;
use crate::services::{CachedDirectory, DirectoryError, PostgresClient, PostgresError};

/// Location matcher backed by the cached Postgres directory
pub type LocationService = LocationMatcher<CachedDirectory<Arc<PostgresClient>>>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub locations: Arc<LocationService>,
    pub reputation: ReputationSettings,
}

impl AppState {
    /// Build the state around one Postgres client
    pub fn new(
        postgres: Arc<PostgresClient>,
        locations: LocationService,
        reputation: ReputationSettings,
    ) -> Self {
        Self {
            postgres,
            locations: Arc::new(locations),
            reputation,
        }
    }
}

/// Errors returned by route handlers, rendered as [`ErrorResponse`] bodies
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Postgres(#[from] PostgresError),
}

impl ApiError {
    fn label(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "Validation failed",
            ApiError::Directory(_) => "Location lookup failed",
            ApiError::Postgres(PostgresError::NotFound(_)) => "Not found",
            ApiError::Postgres(_) => "Database error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Postgres(PostgresError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Directory(_) | ApiError::Postgres(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}: {}", self.label(), self);
        } else {
            tracing::info!("{}: {}", self.label(), self);
        }

        HttpResponse::build(status).json(ErrorResponse::new(
            self.label(),
            self.to_string(),
            status.as_u16(),
        ))
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(locations::configure)
            .configure(reputation::configure)
            .configure(listings::configure),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let not_found = ApiError::from(PostgresError::NotFound("Clinic x not found".to_string()));
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let unavailable = ApiError::from(DirectoryError::Unavailable("down".to_string()));
        assert_eq!(unavailable.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(unavailable.label(), "Location lookup failed");
    }
}
