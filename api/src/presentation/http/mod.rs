use axum::{Router, http::StatusCode, middleware};
use uuid::Uuid;

use crate::bootstrap::app_context::AppContext;
use response::ApiError;

pub mod applications;
pub mod auth;
pub mod claims;
pub mod farmers;
pub mod gate;
pub mod health;
pub mod policies;
pub mod projections;
pub mod response;

/// Malformed ids are reported the same way as ids that match nothing.
pub(crate) fn parse_id(entity: &'static str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw)
        .map_err(|_| ApiError::new(StatusCode::NOT_FOUND, format!("{} not found", entity)))
}

/// Record routes, all behind the store availability gate.
pub fn v1_routes(ctx: AppContext) -> Router {
    Router::new()
        .merge(farmers::routes(ctx.clone()))
        .merge(policies::routes(ctx.clone()))
        .merge(claims::routes(ctx.clone()))
        .merge(applications::routes(ctx.clone()))
        .layer(middleware::from_fn_with_state(ctx, gate::require_store))
}
