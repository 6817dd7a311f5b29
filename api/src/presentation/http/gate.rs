use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::application::error::ServiceError;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::response::ApiError;

/// Short-circuits with 503 when the startup probe could not reach the store.
pub async fn require_store(
    State(ctx): State<AppContext>,
    req: Request,
    next: Next,
) -> Response {
    if !ctx.store_health().is_reachable() {
        tracing::warn!(path = %req.uri().path(), "request_rejected_store_unavailable");
        return ApiError::from(ServiceError::StoreUnavailable).into_response();
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request as HttpRequest, StatusCode};
    use tower::ServiceExt;

    use crate::application::testing::MemoryStore;
    use crate::bootstrap::app_context::{AppContext, AppServices};
    use crate::bootstrap::config::Config;
    use crate::infrastructure::db::StartupProbe;
    use crate::infrastructure::storage::FsUploadStorage;
    use crate::presentation::http::v1_routes;

    fn context(reachable: bool, uploads: &std::path::Path) -> AppContext {
        let store = Arc::new(MemoryStore::default());
        let services = AppServices::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            Arc::new(FsUploadStorage::new(uploads.to_path_buf(), 1024)),
            Arc::new(StartupProbe::fixed(reachable)),
        );
        AppContext::new(Config::for_tests(), services)
    }

    fn farmers_request() -> HttpRequest<Body> {
        HttpRequest::builder()
            .uri("/farmers")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn unreachable_store_answers_503_before_authentication() {
        let dir = tempfile::tempdir().unwrap();
        let app = v1_routes(context(false, dir.path()));

        let res = app.oneshot(farmers_request()).await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "error": "Database connection is not available"
            })
        );
    }

    #[tokio::test]
    async fn reachable_store_lets_requests_through() {
        let dir = tempfile::tempdir().unwrap();
        let app = v1_routes(context(true, dir.path()));

        let res = app.oneshot(farmers_request()).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
