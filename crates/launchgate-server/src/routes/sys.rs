//! System routes.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

/// Build the sys router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

/// `GET /v1/sys/health` — liveness probe for the hosting platform.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use launchgate_storage::MemoryStore;
    use tower::util::ServiceExt;

    use super::*;
    use crate::state::AppState;

    #[tokio::test]
    async fn health_reports_ok() {
        let state = Arc::new(AppState::new(Arc::new(MemoryStore::new())));
        let app = crate::routes::router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/sys/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
